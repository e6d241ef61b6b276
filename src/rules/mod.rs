//! Allophony rules: parsing, natural-class matching and application.
//!
//! A rule has exactly one shape: a single conditioned feature change with an
//! optional free-text context annotation.
//!
//! ```text
//! [+consonantal, -continuant, +coronal] → [+continuant] / V_V
//! └──────────── input bundle ─────────┘   └─ output ──┘   └ context
//! ```
//!
//! The input bundle selects a natural class, the output bundle overwrites
//! features, and the context is kept for display only. There is no rule
//! chaining, ordering, or cyclic application.
//!
//! # Usage
//!
//! ```
//! use liballophone::features::{compute_feature_vector, PhonemeDescriptor, PhoneticFeature};
//! use liballophone::rules::{apply_rule, matches_rule, parse_rule};
//!
//! let rule = parse_rule("r1", "spirantization",
//!     "[+consonantal,-continuant,+coronal] → [+continuant] / V_V").unwrap();
//!
//! let t = compute_feature_vector(&PhonemeDescriptor::consonant("plosive", "alveolar"));
//! assert!(matches_rule(t, &rule));
//! assert!(apply_rule(t, &rule).contains(PhoneticFeature::Continuant));
//! ```

pub mod application;
pub mod matching;
pub mod parser;
mod properties;
pub mod types;

pub use application::{applicable_rules, apply_rule, iter_applicable};
pub use matching::{matches_bundle, matches_rule};
pub use parser::{
    feature_by_name, parse_feature_bundle, parse_rule, parse_rule_strict, parse_rules,
    RuleParseError,
};
pub use types::{FeatureBundle, Rule, RuleSource};
