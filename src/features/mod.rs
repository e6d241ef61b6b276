//! Distinctive-feature vectors.
//!
//! A phoneme is modelled as a [`FeatureVector`]: 32 binary distinctive
//! features packed into one `u32`. Vectors are derived from a
//! [`PhonemeDescriptor`] by [`compute_feature_vector`], which combines a base
//! table lookup (consonant manner × place, vowel height × backness) with
//! name-based voicing/rounding inference and a fold over modifier tokens.
//!
//! # Bit layout
//!
//! | bits  | group          | features |
//! |-------|----------------|----------|
//! | 0-5   | major class    | consonantal, syllabic, sonorant, voice, continuant, nasal |
//! | 6-10  | place          | labial, coronal, dorsal, anterior, distributed |
//! | 11-14 | laryngeal      | spread glottis, constricted glottis, stiff/slack vocal cords |
//! | 15-18 | manner         | strident, lateral, delayed release, trill |
//! | 19-24 | vowel          | high, low, back, round, ATR, tense |
//! | 25-29 | tone           | high, low, rising, falling, contour |
//! | 30-31 | suprasegmental | stress, long |
//!
//! The layout is persisted in rulebooks and inventories; it must never be
//! renumbered.

mod descriptor;
pub mod tables;
mod vector;

pub use descriptor::{base_vector, compute_feature_vector, Articulation, Category, PhonemeDescriptor};
pub use tables::{Backness, Height, Manner, Modifier, Place};
pub use vector::{FeatureGroup, FeatureVector, PhoneticFeature};
