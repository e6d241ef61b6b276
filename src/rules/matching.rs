//! Natural-class membership.
//!
//! A vector belongs to a rule's triggering class when it agrees with the
//! rule's input values on every masked bit:
//!
//! ```text
//! matches(v, r)  ⇔  (v & r.input_mask) == r.input_values
//! ```
//!
//! Bits outside the mask are ignored. A vector missing one required feature,
//! or carrying one feature the rule requires absent, does not match.

use super::types::{FeatureBundle, Rule};
use crate::features::FeatureVector;

/// Whether `vector` agrees with `bundle` on every feature the bundle mentions.
#[inline]
pub fn matches_bundle(vector: FeatureVector, bundle: &FeatureBundle) -> bool {
    (vector & bundle.mask) == bundle.values
}

/// Whether `vector` belongs to the natural class that triggers `rule`.
///
/// A rule with an empty input mask matches every vector.
#[inline]
pub fn matches_rule(vector: FeatureVector, rule: &Rule) -> bool {
    (vector & rule.input_mask) == rule.input_values
}
