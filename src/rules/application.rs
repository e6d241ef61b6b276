//! Rule application and batch filtering.

use super::matching::matches_rule;
use super::types::Rule;
use crate::features::FeatureVector;

/// Apply a rule's feature change.
///
/// ```text
/// apply(v, r) = (v & !r.output_mask) | r.output_changes
/// ```
///
/// Bits outside `output_mask` pass through; bits inside are overwritten, so a
/// rule can switch a feature off as easily as on. Application does not check
/// [`matches_rule`]: callers decide whether the rule is applicable.
#[inline]
pub fn apply_rule(vector: FeatureVector, rule: &Rule) -> FeatureVector {
    (vector & !rule.output_mask) | rule.output_changes
}

/// The rules whose triggering class contains `vector`, in input order.
///
/// Every matching rule is returned; there is no priority or conflict
/// resolution between them.
pub fn applicable_rules<'r>(vector: FeatureVector, rules: &'r [Rule]) -> Vec<&'r Rule> {
    rules.iter().filter(|r| matches_rule(vector, r)).collect()
}

/// Lazy form of [`applicable_rules`].
pub fn iter_applicable<'r>(
    vector: FeatureVector,
    rules: &'r [Rule],
) -> impl Iterator<Item = &'r Rule> + 'r {
    rules.iter().filter(move |r| matches_rule(vector, r))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::PhoneticFeature::*;
    use crate::rules::parse_rule;

    fn fv(features: &[crate::features::PhoneticFeature]) -> FeatureVector {
        FeatureVector::from_features(features)
    }

    #[test]
    fn test_worked_example() {
        let rule = parse_rule(
            "r1",
            "spirantization",
            "[+consonantal,-continuant,+coronal] → [+continuant] / V_V",
        )
        .unwrap();
        let t = fv(&[Consonantal, Coronal, Anterior]);
        assert!(matches_rule(t, &rule));
        assert_eq!(apply_rule(t, &rule), fv(&[Consonantal, Coronal, Anterior, Continuant]));
    }

    #[test]
    fn test_apply_can_clear_bits() {
        let rule = parse_rule("r", "devoicing", "[+consonantal] → [-voice]").unwrap();
        let d = fv(&[Consonantal, Coronal, Voice]);
        assert_eq!(apply_rule(d, &rule), fv(&[Consonantal, Coronal, SpreadGlottis]));
    }

    #[test]
    fn test_literal_rule_application_is_identity() {
        let rule = parse_rule("r", "flap", "/t/ → [ɾ]").unwrap();
        let t = fv(&[Consonantal, Coronal]);
        assert_eq!(apply_rule(t, &rule), t);
    }

    #[test]
    fn test_applicable_rules_preserves_order() {
        let rules: Vec<Rule> = [
            ("a", "[+consonantal] → [+long]"),
            ("b", "[+syllabic] → [+long]"),
            ("c", "[+coronal] → [+continuant]"),
            ("d", "[-continuant] → [+voice]"),
        ]
        .iter()
        .filter_map(|(id, text)| parse_rule(id, id, text))
        .collect();

        let t = fv(&[Consonantal, Coronal]);
        let ids: Vec<&str> = applicable_rules(t, &rules).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "d"]);

        let lazy: Vec<&str> = iter_applicable(t, &rules).map(|r| r.id.as_str()).collect();
        assert_eq!(lazy, ids);
    }

    #[test]
    fn test_no_rules_no_hits() {
        assert!(applicable_rules(FeatureVector::EMPTY, &[]).is_empty());
    }
}
