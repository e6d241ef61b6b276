//! Phoneme inventories.
//!
//! A [`PhonemeModel`] pairs a phoneme's identity (id, display symbol) with the
//! [`PhonemeDescriptor`] its feature vector is derived from.
//! [`standard_inventory`] is the built-in set of common consonants and
//! vowels; [`inventory_entries`] turns any model list into the
//! [`InventoryEntry`] snapshot the resolver searches.

use crate::features::{compute_feature_vector, FeatureVector, PhonemeDescriptor};
use crate::resolver::InventoryEntry;

/// A phoneme with its descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct PhonemeModel {
    /// Stable identifier.
    pub id: String,
    /// IPA symbol.
    pub symbol: String,
    /// Articulation, name and modifiers.
    #[cfg_attr(feature = "serialization", serde(flatten))]
    pub descriptor: PhonemeDescriptor,
}

impl PhonemeModel {
    /// Build a model; `id` doubles as the symbol.
    pub fn new(id: impl Into<String>, descriptor: PhonemeDescriptor) -> Self {
        let id = id.into();
        PhonemeModel {
            symbol: id.clone(),
            id,
            descriptor,
        }
    }

    /// Descriptive name, e.g. "Voiceless Bilabial Plosive".
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Derived feature vector.
    pub fn vector(&self) -> FeatureVector {
        compute_feature_vector(&self.descriptor)
    }

    /// Snapshot for the resolver.
    pub fn entry(&self) -> InventoryEntry {
        InventoryEntry::new(self.id.clone(), self.symbol.clone(), self.vector())
    }
}

/// Resolver snapshot of every model, in order.
pub fn inventory_entries(models: &[PhonemeModel]) -> Vec<InventoryEntry> {
    models.iter().map(PhonemeModel::entry).collect()
}

/// The model with the given id.
pub fn find<'m>(models: &'m [PhonemeModel], id: &str) -> Option<&'m PhonemeModel> {
    models.iter().find(|m| m.id == id)
}

/// The model with the given id, or failing that the given symbol.
pub fn find_by_id_or_symbol<'m>(models: &'m [PhonemeModel], key: &str) -> Option<&'m PhonemeModel> {
    find(models, key).or_else(|| models.iter().find(|m| m.symbol == key))
}

// (symbol, name, manner, place)
const CONSONANTS: &[(&str, &str, &str, &str)] = &[
    // Plosives
    ("p", "Voiceless Bilabial Plosive", "plosive", "bilabial"),
    ("b", "Voiced Bilabial Plosive", "plosive", "bilabial"),
    ("t", "Voiceless Alveolar Plosive", "plosive", "alveolar"),
    ("d", "Voiced Alveolar Plosive", "plosive", "alveolar"),
    ("k", "Voiceless Velar Plosive", "plosive", "velar"),
    ("g", "Voiced Velar Plosive", "plosive", "velar"),
    ("ʔ", "Glottal Stop", "plosive", "glottal"),
    // Nasals
    ("m", "Bilabial Nasal", "nasal", "bilabial"),
    ("n", "Alveolar Nasal", "nasal", "alveolar"),
    ("ɲ", "Palatal Nasal", "nasal", "palatal"),
    ("ŋ", "Velar Nasal", "nasal", "velar"),
    // Fricatives
    ("f", "Voiceless Labiodental Fricative", "fricative", "labiodental"),
    ("v", "Voiced Labiodental Fricative", "fricative", "labiodental"),
    ("s", "Voiceless Alveolar Fricative", "fricative", "alveolar"),
    ("z", "Voiced Alveolar Fricative", "fricative", "alveolar"),
    ("ʃ", "Voiceless Postalveolar Fricative", "fricative", "postalveolar"),
    ("ʒ", "Voiced Postalveolar Fricative", "fricative", "postalveolar"),
    ("x", "Voiceless Velar Fricative", "fricative", "velar"),
    ("ɣ", "Voiced Velar Fricative", "fricative", "velar"),
    ("h", "Voiceless Glottal Fricative", "fricative", "glottal"),
    // Approximants
    ("j", "Palatal Approximant", "approximant", "palatal"),
    ("w", "Velar Approximant", "approximant", "velar"),
    ("l", "Alveolar Lateral Approximant", "lateral-approximant", "alveolar"),
    // Trills and taps
    ("r", "Alveolar Trill", "trill", "alveolar"),
    ("ɾ", "Alveolar Tap", "tap", "alveolar"),
];

// (symbol, name, height, backness)
const VOWELS: &[(&str, &str, &str, &str)] = &[
    ("i", "Close Front Unrounded Vowel", "close", "front"),
    ("y", "Close Front Rounded Vowel", "close", "front"),
    ("ɨ", "Close Central Unrounded Vowel", "close", "central"),
    ("ʉ", "Close Central Rounded Vowel", "close", "central"),
    ("u", "Close Back Rounded Vowel", "close", "back"),
    ("ɯ", "Close Back Unrounded Vowel", "close", "back"),
    ("e", "Close-mid Front Unrounded Vowel", "close-mid", "front"),
    ("ø", "Close-mid Front Rounded Vowel", "close-mid", "front"),
    ("ə", "Mid Central Vowel", "mid", "central"),
    ("o", "Close-mid Back Rounded Vowel", "close-mid", "back"),
    ("ɔ", "Open-mid Back Rounded Vowel", "open-mid", "back"),
    ("ɛ", "Open-mid Front Unrounded Vowel", "open-mid", "front"),
    ("æ", "Near-open Front Unrounded Vowel", "near-open", "front"),
    ("a", "Open Front Unrounded Vowel", "open", "front"),
    ("ɑ", "Open Back Unrounded Vowel", "open", "back"),
    ("ɒ", "Open Back Rounded Vowel", "open", "back"),
];

/// The built-in inventory: 25 consonants followed by 16 vowels.
pub fn standard_inventory() -> Vec<PhonemeModel> {
    let consonants = CONSONANTS.iter().map(|&(symbol, name, manner, place)| {
        PhonemeModel::new(symbol, PhonemeDescriptor::consonant(manner, place).with_name(name))
    });
    let vowels = VOWELS.iter().map(|&(symbol, name, height, backness)| {
        PhonemeModel::new(symbol, PhonemeDescriptor::vowel(height, backness).with_name(name))
    });
    consonants.chain(vowels).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{Category, FeatureGroup, PhoneticFeature};
    use rustc_hash::FxHashMap;

    #[test]
    fn test_standard_inventory_shape() {
        let models = standard_inventory();
        assert_eq!(models.len(), 41);
        let vowels = models
            .iter()
            .filter(|m| m.descriptor.category() == Category::Vowel)
            .count();
        assert_eq!(vowels, 16);
    }

    #[test]
    fn test_standard_vectors_are_distinct() {
        let models = standard_inventory();
        let mut seen: FxHashMap<FeatureVector, &str> = FxHashMap::default();
        for model in &models {
            let v = model.vector();
            assert!(!v.is_empty(), "{} has an empty vector", model.id);
            if let Some(other) = seen.insert(v, &model.id) {
                panic!("{} and {} share vector {}", other, model.id, v);
            }
        }
    }

    #[test]
    fn test_group_invariants_hold_for_standard_inventory() {
        let vowel_bits = FeatureGroup::Vowel.mask();
        let place_bits = FeatureGroup::Place.mask();
        for model in standard_inventory() {
            let v = model.vector();
            match model.descriptor.category() {
                Category::Consonant => assert!((v & vowel_bits).is_empty(), "{}", model.id),
                Category::Vowel => assert!((v & place_bits).is_empty(), "{}", model.id),
            }
        }
    }

    #[test]
    fn test_voicing_pairs_differ_in_laryngeal_bits_only() {
        let models = standard_inventory();
        for (voiceless, voiced) in [("p", "b"), ("t", "d"), ("k", "g"), ("s", "z"), ("f", "v")] {
            let a = find(&models, voiceless).unwrap().vector();
            let b = find(&models, voiced).unwrap().vector();
            let expected = FeatureVector::from_features(&[
                PhoneticFeature::Voice,
                PhoneticFeature::SpreadGlottis,
            ]);
            assert_eq!(a ^ b, expected, "{voiceless}/{voiced}");
        }
    }

    #[test]
    fn test_entries_follow_model_order() {
        let models = standard_inventory();
        let entries = inventory_entries(&models);
        assert_eq!(entries.len(), models.len());
        assert_eq!(entries[0].id, "p");
        assert_eq!(entries[0].symbol, "p");
        assert_eq!(entries[0].vector, models[0].vector());
    }

    #[test]
    fn test_find_by_symbol() {
        let mut models = standard_inventory();
        models[0].id = "voiceless-bilabial-plosive".into();
        assert!(find(&models, "p").is_none());
        assert_eq!(find_by_id_or_symbol(&models, "p").map(|m| m.name()), Some("Voiceless Bilabial Plosive"));
    }
}
