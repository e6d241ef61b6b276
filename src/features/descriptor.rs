//! Phoneme descriptors and feature-vector derivation.

use super::tables::{self, Backness, Height, Manner, Place};
use super::vector::{FeatureVector, PhoneticFeature};
use crate::modifiers::ModificationFlags;

/// Broad phoneme category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Category {
    /// Described by manner and place.
    Consonant,
    /// Described by height and backness.
    Vowel,
}

/// The table coordinates of a phoneme, as free text.
///
/// Axis names are matched case-insensitively; unrecognized names select no
/// table cell and contribute the zero vector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "category", rename_all = "lowercase")
)]
pub enum Articulation {
    /// `manner × place`
    Consonant {
        /// e.g. `"plosive"`, `"lateral-approximant"`
        manner: String,
        /// e.g. `"alveolar"`
        place: String,
    },
    /// `height × backness`
    Vowel {
        /// e.g. `"close-mid"`
        height: String,
        /// `"front"`, `"central"` or `"back"`
        backness: String,
    },
}

impl Articulation {
    /// The category this articulation belongs to.
    pub fn category(&self) -> Category {
        match self {
            Articulation::Consonant { .. } => Category::Consonant,
            Articulation::Vowel { .. } => Category::Vowel,
        }
    }
}

/// Everything needed to derive a phoneme's [`FeatureVector`].
///
/// `name` is the raw symbol or descriptive name ("Voiceless Alveolar
/// Plosive"). It is only inspected for voicing (consonants) and rounding
/// (vowels).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct PhonemeDescriptor {
    /// Table coordinates.
    #[cfg_attr(feature = "serialization", serde(flatten))]
    pub articulation: Articulation,
    /// Modifier tokens, folded in order.
    #[cfg_attr(feature = "serialization", serde(default))]
    pub modifiers: Vec<String>,
    /// Raw symbol or name.
    #[cfg_attr(feature = "serialization", serde(default))]
    pub name: String,
}

impl PhonemeDescriptor {
    /// A consonant descriptor with no modifiers.
    pub fn consonant(manner: impl Into<String>, place: impl Into<String>) -> Self {
        PhonemeDescriptor {
            articulation: Articulation::Consonant {
                manner: manner.into(),
                place: place.into(),
            },
            modifiers: Vec::new(),
            name: String::new(),
        }
    }

    /// A vowel descriptor with no modifiers.
    pub fn vowel(height: impl Into<String>, backness: impl Into<String>) -> Self {
        PhonemeDescriptor {
            articulation: Articulation::Vowel {
                height: height.into(),
                backness: backness.into(),
            },
            modifiers: Vec::new(),
            name: String::new(),
        }
    }

    /// Set the raw symbol or name used for voicing/rounding inference.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Append one modifier token.
    pub fn with_modifier(mut self, token: impl Into<String>) -> Self {
        self.modifiers.push(token.into());
        self
    }

    /// Append the tokens set in `flags`, in bit order.
    pub fn with_flags(mut self, flags: ModificationFlags) -> Self {
        self.modifiers
            .extend(flags.tokens().map(|t| t.value().to_string()));
        self
    }

    /// Broad category.
    pub fn category(&self) -> Category {
        self.articulation.category()
    }
}

/// Table lookup only: no name inference, no modifiers.
pub fn base_vector(articulation: &Articulation) -> FeatureVector {
    match articulation {
        Articulation::Consonant { manner, place } => {
            match (Manner::parse(manner), Place::parse(place)) {
                (Some(m), Some(p)) => tables::consonant_base(m, p),
                _ => FeatureVector::EMPTY,
            }
        }
        Articulation::Vowel { height, backness } => {
            match (Height::parse(height), Backness::parse(backness)) {
                (Some(h), Some(b)) => tables::vowel_base(h, b),
                _ => FeatureVector::EMPTY,
            }
        }
    }
}

/// Derive the feature vector of a phoneme.
///
/// 1. Base vector from the consonant or vowel table.
/// 2. Consonants: a name containing "voiceless" clears Voice and sets
///    SpreadGlottis; otherwise one containing "voiced" sets Voice and clears
///    SpreadGlottis. Vowels: "unrounded" clears Round; otherwise "rounded"
///    sets it. Case-insensitive.
/// 3. Each modifier token in list order: `v = (v | add) & !remove`. Unknown
///    tokens are skipped.
///
/// # Example
///
/// ```
/// use liballophone::features::{compute_feature_vector, PhonemeDescriptor, PhoneticFeature};
///
/// let t = PhonemeDescriptor::consonant("plosive", "alveolar")
///     .with_name("Voiceless Alveolar Plosive");
/// let th = t.clone().with_modifier("aspirated");
///
/// let v = compute_feature_vector(&th);
/// assert!(v.contains(PhoneticFeature::SpreadGlottis));
/// assert!(!v.contains(PhoneticFeature::Voice));
/// ```
pub fn compute_feature_vector(descriptor: &PhonemeDescriptor) -> FeatureVector {
    let mut v = base_vector(&descriptor.articulation);

    let name = descriptor.name.to_lowercase();
    match descriptor.category() {
        Category::Consonant => {
            if name.contains("voiceless") {
                v = v
                    .without(PhoneticFeature::Voice)
                    .with(PhoneticFeature::SpreadGlottis);
            } else if name.contains("voiced") {
                v = v
                    .with(PhoneticFeature::Voice)
                    .without(PhoneticFeature::SpreadGlottis);
            }
        }
        Category::Vowel => {
            if name.contains("unrounded") {
                v = v.without(PhoneticFeature::Round);
            } else if name.contains("rounded") {
                v = v.with(PhoneticFeature::Round);
            }
        }
    }

    descriptor
        .modifiers
        .iter()
        .filter_map(|token| tables::modifier_for(token))
        .fold(v, |v, m| m.apply(v))
}
