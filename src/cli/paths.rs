//! Settings file location and contents

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use crate::identity::IdEncoding;
use crate::serialization::JsonSerializer;

/// Directory holding liballophone's settings
pub fn config_dir() -> Result<PathBuf> {
    dirs::data_local_dir()
        .map(|base| base.join("liballophone"))
        .context("No local data directory on this platform")
}

/// `config.json` inside [`config_dir`], creating the directory if needed
pub fn default_config_path() -> Result<PathBuf> {
    let dir = config_dir()?;
    ensure_dir(&dir)?;
    Ok(dir.join("config.json"))
}

/// The `--config` path if given, else [`default_config_path`]
pub fn config_file_path_with_override(custom_path: Option<PathBuf>) -> Result<PathBuf> {
    let Some(path) = custom_path else {
        return default_config_path();
    };
    validate_config_path(&path)?;
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    Ok(path)
}

/// Settings are JSON; reject any other extension
pub fn validate_config_path(path: &Path) -> Result<()> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(()),
        other => bail!(
            "Settings file {} must end in .json (found {})",
            path.display(),
            other.map_or_else(|| "no extension".to_string(), |ext| format!(".{ext}"))
        ),
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create settings directory {}", dir.display()))
}

/// User configuration stored in config file
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PersistentConfig {
    /// Default inventory path (standard inventory if unset)
    #[serde(default)]
    pub inventory_path: Option<PathBuf>,
    /// Default rulebook path
    #[serde(default)]
    pub rulebook_path: Option<PathBuf>,
    /// Default id payload encoding
    #[serde(default)]
    pub id_encoding: Option<IdEncoding>,
    /// Default log verbosity
    #[serde(default)]
    pub verbosity: Option<u8>,
}

impl PersistentConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from custom path; a missing file yields defaults
    pub fn load_from(custom_path: Option<PathBuf>) -> Result<Self> {
        let path = config_file_path_with_override(custom_path)?;
        if !path.exists() {
            return Ok(Self::default());
        }
        JsonSerializer::load(&path)
            .with_context(|| format!("Cannot read settings from {}", path.display()))
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(None)
    }

    /// Save configuration to custom path
    pub fn save_to(&self, custom_path: Option<PathBuf>) -> Result<()> {
        let path = config_file_path_with_override(custom_path)?;
        JsonSerializer::save(self, &path)
            .with_context(|| format!("Cannot write settings to {}", path.display()))
    }

    /// Merge with command-line options (CLI options take precedence)
    pub fn merge_with_cli(
        &self,
        inventory_path: Option<PathBuf>,
        rulebook_path: Option<PathBuf>,
        id_encoding: Option<IdEncoding>,
        verbosity: Option<u8>,
    ) -> Self {
        Self {
            inventory_path: inventory_path.or_else(|| self.inventory_path.clone()),
            rulebook_path: rulebook_path.or_else(|| self.rulebook_path.clone()),
            id_encoding: id_encoding.or(self.id_encoding),
            verbosity: verbosity.or(self.verbosity),
        }
    }

    /// The effective id encoding
    pub fn encoding(&self) -> IdEncoding {
        self.id_encoding.unwrap_or_default()
    }
}
