//! Type definitions for allophony rules.
//!
//! A rule is written `X → Y / context` and stored as two mask/value pairs:
//!
//! ```text
//! input:  (input_mask,  input_values)    the triggering natural class
//! output: (output_mask, output_changes)  the feature change
//! ```
//!
//! # Invariants
//!
//! For every [`FeatureBundle`] and every [`Rule`] produced by the parser:
//!
//! - `values & !mask == 0`: a value bit is never set outside its mask
//! - Voice and SpreadGlottis are never both set in `values`

use std::fmt;

use crate::features::FeatureVector;

/// A parsed `[+f, -g, ...]` bundle.
///
/// `+f` puts `f` in both `mask` and `values`; `-f` puts it in `mask` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureBundle {
    /// Features the bundle mentions.
    pub mask: FeatureVector,
    /// Features the bundle requires present (`+`).
    pub values: FeatureVector,
}

impl FeatureBundle {
    /// A bundle mentioning nothing.
    pub const EMPTY: FeatureBundle = FeatureBundle {
        mask: FeatureVector::EMPTY,
        values: FeatureVector::EMPTY,
    };

    /// Whether the bundle mentions no feature.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    /// Whether `values` stays within `mask`.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        (self.values & !self.mask).is_empty()
    }
}

impl fmt::Display for FeatureBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, feature) in self.mask.features().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let sign = if self.values.contains(feature) { '+' } else { '-' };
            write!(f, "{sign}{}", feature.name())?;
        }
        f.write_str("]")
    }
}

/// A parsed allophony rule.
///
/// The `context` annotation is kept verbatim and never consulted by
/// [`matches_rule`](super::matches_rule) or [`apply_rule`](super::apply_rule).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    /// Caller-assigned identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Features tested on the input segment.
    pub input_mask: FeatureVector,
    /// Required values of the tested features.
    pub input_values: FeatureVector,
    /// Features overwritten on application.
    pub output_mask: FeatureVector,
    /// Values written into `output_mask`.
    pub output_changes: FeatureVector,
    /// Trimmed output side, e.g. `"[+continuant]"` or `"[ɾ]"`.
    pub output_text: String,
    /// Trimmed context annotation; empty when absent.
    pub context: String,
    /// The full rule text as given.
    pub raw_rule: String,
}

impl Rule {
    /// The input side as a bundle.
    #[inline]
    pub fn input(&self) -> FeatureBundle {
        FeatureBundle {
            mask: self.input_mask,
            values: self.input_values,
        }
    }

    /// The output side as a bundle.
    #[inline]
    pub fn output(&self) -> FeatureBundle {
        FeatureBundle {
            mask: self.output_mask,
            values: self.output_changes,
        }
    }

    /// Both bundles satisfy `values & !mask == 0`.
    pub fn is_well_formed(&self) -> bool {
        self.input().is_well_formed() && self.output().is_well_formed()
    }
}

/// Unparsed rule as stored in a rulebook.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleSource {
    /// Identifier.
    pub id: String,
    /// Name.
    #[cfg_attr(feature = "serialization", serde(default))]
    pub name: String,
    /// Rule text.
    pub rule: String,
}

impl RuleSource {
    /// Build a source record.
    pub fn new(id: impl Into<String>, name: impl Into<String>, rule: impl Into<String>) -> Self {
        RuleSource {
            id: id.into(),
            name: name.into(),
            rule: rule.into(),
        }
    }
}
