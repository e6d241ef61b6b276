//! Rulebook and inventory files.
//!
//! Both are JSON arrays:
//!
//! ```json
//! [{ "id": "r1", "name": "Spirantization", "rule": "[-continuant] → [+continuant] / V_V" }]
//! ```
//!
//! ```json
//! [{ "id": "t", "symbol": "t", "name": "Voiceless Alveolar Plosive",
//!    "category": "consonant", "manner": "plosive", "place": "alveolar" }]
//! ```
//!
//! # Example
//!
//! ```no_run
//! use liballophone::serialization::{load_inventory, load_rulebook};
//! use liballophone::rules::parse_rules;
//!
//! let sources = load_rulebook("rules.json")?;
//! let rules = parse_rules(&sources);
//! let inventory = load_inventory("inventory.json")?;
//! # Ok::<(), liballophone::serialization::SerializationError>(())
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::inventory::PhonemeModel;
use crate::rules::RuleSource;

/// Errors that can occur while reading or writing files.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// Malformed or mistyped JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// JSON reader/writer shared by every file kind.
pub struct JsonSerializer;

impl JsonSerializer {
    /// Write `value` as pretty-printed JSON followed by a newline.
    pub fn serialize<T, W>(value: &T, mut writer: W) -> Result<(), SerializationError>
    where
        T: Serialize + ?Sized,
        W: Write,
    {
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Read one JSON document.
    pub fn deserialize<T, R>(reader: R) -> Result<T, SerializationError>
    where
        T: DeserializeOwned,
        R: Read,
    {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read a JSON file.
    pub fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, SerializationError> {
        let file = File::open(path)?;
        Self::deserialize(BufReader::new(file))
    }

    /// Write a JSON file, replacing any previous content.
    pub fn save<T: Serialize + ?Sized>(
        value: &T,
        path: impl AsRef<Path>,
    ) -> Result<(), SerializationError> {
        let file = File::create(path)?;
        Self::serialize(value, BufWriter::new(file))
    }
}

/// Read a rulebook.
pub fn load_rulebook(path: impl AsRef<Path>) -> Result<Vec<RuleSource>, SerializationError> {
    JsonSerializer::load(path)
}

/// Write a rulebook.
pub fn save_rulebook(rules: &[RuleSource], path: impl AsRef<Path>) -> Result<(), SerializationError> {
    JsonSerializer::save(rules, path)
}

/// Read an inventory.
pub fn load_inventory(path: impl AsRef<Path>) -> Result<Vec<PhonemeModel>, SerializationError> {
    JsonSerializer::load(path)
}

/// Write an inventory.
pub fn save_inventory(
    models: &[PhonemeModel],
    path: impl AsRef<Path>,
) -> Result<(), SerializationError> {
    JsonSerializer::save(models, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{compute_feature_vector, PhonemeDescriptor};
    use crate::inventory::standard_inventory;
    use crate::rules::parse_rules;

    #[test]
    fn test_rulebook_roundtrip() {
        let rules = vec![
            RuleSource::new("r1", "Spirantization", "[-continuant] → [+continuant] / V_V"),
            RuleSource::new("r2", "Flapping", "/t/ → [ɾ]"),
        ];
        let mut buffer = Vec::new();
        JsonSerializer::serialize(&rules, &mut buffer).unwrap();
        let loaded: Vec<RuleSource> = JsonSerializer::deserialize(&buffer[..]).unwrap();
        assert_eq!(loaded, rules);
        assert_eq!(parse_rules(&loaded).len(), 2);
    }

    #[test]
    fn test_rule_name_defaults_to_empty() {
        let json = r#"[{ "id": "r1", "rule": "[+nasal] -> [-voice]" }]"#;
        let loaded: Vec<RuleSource> = JsonSerializer::deserialize(json.as_bytes()).unwrap();
        assert_eq!(loaded[0].name, "");
    }

    #[test]
    fn test_inventory_roundtrip() {
        let models = standard_inventory();
        let mut buffer = Vec::new();
        JsonSerializer::serialize(&models, &mut buffer).unwrap();
        let loaded: Vec<PhonemeModel> = JsonSerializer::deserialize(&buffer[..]).unwrap();
        assert_eq!(loaded, models);
    }

    #[test]
    fn test_inventory_json_layout() {
        let json = r#"[{
            "id": "tʰ", "symbol": "tʰ", "name": "Voiceless Alveolar Plosive",
            "category": "consonant", "manner": "plosive", "place": "alveolar",
            "modifiers": ["aspirated"]
        }]"#;
        let loaded: Vec<PhonemeModel> = JsonSerializer::deserialize(json.as_bytes()).unwrap();
        let expected = PhonemeDescriptor::consonant("plosive", "alveolar")
            .with_name("Voiceless Alveolar Plosive")
            .with_modifier("aspirated");
        assert_eq!(loaded[0].descriptor, expected);
        assert_eq!(loaded[0].vector(), compute_feature_vector(&expected));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = JsonSerializer::deserialize::<Vec<RuleSource>, _>(&b"[{"[..]).unwrap_err();
        assert!(matches!(err, SerializationError::Json(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_rulebook("/nonexistent/liballophone/rules.json").unwrap_err();
        assert!(matches!(err, SerializationError::Io(_)));
    }
}
