//! Property-based tests for the rule engine.
//!
//! # Properties Tested
//!
//! 1. **Containment**: every parsed bundle satisfies `values & !mask == 0`
//! 2. **Laryngeal exclusivity**: Voice and SpreadGlottis are never both set
//!    in a parsed bundle's values
//! 3. **Application**: bits outside `output_mask` are preserved, bits inside
//!    equal `output_changes`; applying twice equals applying once
//! 4. **Filtering**: `applicable_rules` returns exactly the matching rules,
//!    in input order
//! 5. **Parsing**: output text and context are recovered from generated rule
//!    text

#[cfg(test)]
mod tests {
    use super::super::application::{applicable_rules, apply_rule};
    use super::super::matching::matches_rule;
    use super::super::parser::{parse_feature_bundle, parse_rule};
    use super::super::types::Rule;
    use crate::features::{FeatureVector, PhoneticFeature};
    use proptest::prelude::*;

    // ========================================================================
    // Proptest Generators
    // ========================================================================

    /// A feature name as a rule author might spell it.
    fn arb_feature_name() -> impl Strategy<Value = String> {
        prop_oneof![
            4 => (0usize..32).prop_map(|i| PhoneticFeature::ALL[i].name().to_string()),
            2 => (0usize..32).prop_map(|i| PhoneticFeature::ALL[i].name().to_uppercase()),
            1 => prop::sample::select(vec!["voiced", "aspirated", "stop", "atr"])
                .prop_map(str::to_string),
            1 => "[a-z]{3,10}",
        ]
    }

    /// A signed or unsigned token.
    fn arb_token() -> impl Strategy<Value = String> {
        (prop::sample::select(vec!["+", "-", ""]), arb_feature_name())
            .prop_map(|(sign, name)| format!("{sign}{name}"))
    }

    fn arb_bundle_text() -> impl Strategy<Value = String> {
        prop::collection::vec(arb_token(), 0..8).prop_map(|tokens| format!("[{}]", tokens.join(", ")))
    }

    fn arb_vector() -> impl Strategy<Value = FeatureVector> {
        any::<u32>().prop_map(FeatureVector::from_bits)
    }

    fn arb_rule() -> impl Strategy<Value = Rule> {
        (arb_bundle_text(), arb_bundle_text()).prop_filter_map("parsable", |(input, output)| {
            parse_rule("gen", "generated", &format!("{input} → {output}"))
        })
    }

    // ========================================================================
    // Property 1 & 2: Bundle invariants
    // ========================================================================

    proptest! {
        /// Property: values never leave the mask
        #[test]
        fn prop_bundle_values_within_mask(text in arb_bundle_text()) {
            let bundle = parse_feature_bundle(&text);
            prop_assert!(bundle.is_well_formed(), "{:?} from {:?}", bundle, text);
        }

        /// Property: +voice and +spread glottis never coexist
        #[test]
        fn prop_bundle_laryngeal_exclusive(text in arb_bundle_text()) {
            let bundle = parse_feature_bundle(&text);
            prop_assert!(
                !(bundle.values.contains(PhoneticFeature::Voice)
                    && bundle.values.contains(PhoneticFeature::SpreadGlottis))
            );
        }

        /// Property: mentioning either laryngeal pole masks both
        #[test]
        fn prop_bundle_laryngeal_paired(text in arb_bundle_text()) {
            let bundle = parse_feature_bundle(&text);
            prop_assert_eq!(
                bundle.mask.contains(PhoneticFeature::Voice),
                bundle.mask.contains(PhoneticFeature::SpreadGlottis)
            );
        }

        /// Property: parsed rules are well-formed on both sides
        #[test]
        fn prop_rules_well_formed(rule in arb_rule()) {
            prop_assert!(rule.is_well_formed());
        }
    }

    // ========================================================================
    // Property 3: Application
    // ========================================================================

    proptest! {
        /// Property: untouched bits pass through, masked bits are overwritten
        #[test]
        fn prop_apply_preserves_and_overwrites(v in arb_vector(), rule in arb_rule()) {
            let out = apply_rule(v, &rule);
            prop_assert_eq!(out & !rule.output_mask, v & !rule.output_mask);
            prop_assert_eq!(out & rule.output_mask, rule.output_changes);
        }

        /// Property: application is idempotent
        #[test]
        fn prop_apply_idempotent(v in arb_vector(), rule in arb_rule()) {
            let once = apply_rule(v, &rule);
            prop_assert_eq!(apply_rule(once, &rule), once);
        }

        /// Property: an applied vector matches the output bundle
        #[test]
        fn prop_applied_vector_matches_output(v in arb_vector(), rule in arb_rule()) {
            let out = apply_rule(v, &rule);
            prop_assert_eq!(out & rule.output_mask, rule.output_changes);
        }
    }

    // ========================================================================
    // Property 4: Filtering
    // ========================================================================

    proptest! {
        /// Property: exactly the matching rules, in input order
        #[test]
        fn prop_applicable_rules_is_ordered_filter(
            v in arb_vector(),
            rules in prop::collection::vec(arb_rule(), 0..12),
        ) {
            let hits = applicable_rules(v, &rules);
            let expected: Vec<&Rule> = rules.iter().filter(|r| matches_rule(v, r)).collect();
            prop_assert_eq!(hits.len(), expected.len());
            for (a, b) in hits.iter().zip(expected.iter()) {
                prop_assert!(std::ptr::eq(*a, *b));
            }
        }

        /// Property: a vector built from a rule's input values matches it
        #[test]
        fn prop_input_values_match(rule in arb_rule(), noise in arb_vector()) {
            let v = (noise & !rule.input_mask) | rule.input_values;
            prop_assert!(matches_rule(v, &rule));
        }
    }

    // ========================================================================
    // Property 5: Parsing
    // ========================================================================

    proptest! {
        /// Property: output text and context come back trimmed
        #[test]
        fn prop_parse_recovers_text(
            input in arb_bundle_text(),
            output in arb_bundle_text(),
            context in "[A-Za-z_#]{0,8}",
            ascii_arrow in any::<bool>(),
        ) {
            let arrow = if ascii_arrow { "->" } else { "→" };
            let text = if context.is_empty() {
                format!("{input} {arrow} {output}")
            } else {
                format!("{input} {arrow} {output} / {context}")
            };
            let rule = parse_rule("p", "prop", &text).unwrap();
            prop_assert_eq!(&rule.output_text, &output);
            prop_assert_eq!(&rule.context, &context);
            prop_assert_eq!(&rule.raw_rule, &text);
        }
    }
}
