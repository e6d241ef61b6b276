//! # liballophone
//!
//! Phonological feature vectors and allophone rules.
//!
//! Phonemes are described by articulation (manner and place for consonants,
//! height and backness for vowels) plus modifiers, and compiled to 32-bit
//! distinctive-feature vectors. Allophony rules written in the usual
//! `X → Y / context` notation are parsed into mask/value pairs, matched
//! against vectors and applied, and the resulting vectors are resolved back
//! to surface symbols. Modified phonemes get deterministic, reversible
//! composite ids.
//!
//! ## Example
//!
//! ```rust
//! use liballophone::prelude::*;
//!
//! let inventory = standard_inventory();
//! let entries = inventory_entries(&inventory);
//! let rules = vec![parse_rule("r1", "Spirantization", "[-continuant] → [+continuant] / V_V").unwrap()];
//!
//! let b = find(&inventory, "b").unwrap();
//! let allophones = realize_allophones(&b.symbol, b.vector(), &rules, &entries);
//! assert_eq!(allophones.len(), 1);
//! assert_eq!(allophones[0].context, "V_V");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod features;
pub mod identity;
pub mod inventory;
pub mod modifiers;
pub mod resolver;
pub mod rules;

/// JSON rulebook and inventory files
#[cfg(feature = "serialization")]
pub mod serialization;

/// CLI interface and utilities
#[cfg(feature = "cli")]
pub mod cli;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::features::{
        compute_feature_vector, FeatureGroup, FeatureVector, PhonemeDescriptor, PhoneticFeature,
    };
    pub use crate::identity::{
        decode, decode_flags, display_name, display_symbol, encode, encode_with, CategorizedState,
        CompositeId, IdEncoding,
    };
    pub use crate::inventory::{find, inventory_entries, standard_inventory, PhonemeModel};
    pub use crate::modifiers::{ModificationFlags, ModificationToken};
    pub use crate::resolver::{
        realize_allophones, resolve_surface_symbol, Allophone, InventoryEntry, Resolution,
        ResolutionSource, ResolveRequest,
    };
    pub use crate::rules::{
        applicable_rules, apply_rule, matches_rule, parse_rule, parse_rules, FeatureBundle, Rule,
        RuleSource,
    };

    #[cfg(feature = "serialization")]
    pub use crate::serialization::{
        load_inventory, load_rulebook, save_inventory, save_rulebook, JsonSerializer,
        SerializationError,
    };
}
