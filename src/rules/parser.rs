//! Rule notation parser.
//!
//! Grammar:
//!
//! ```text
//! rule    := input ARROW output [ "/" context ]
//! ARROW   := "→" | "->"
//! bundle  := "[" token ("," token)* "]"
//! token   := ("+" | "-") feature-name
//! ```
//!
//! `output` may also be a literal symbol such as `[ɾ]`; it then contributes an
//! empty mask and is resolved by [`crate::resolver`] instead.
//!
//! Feature names are case-insensitive and whitespace-tolerant (`Spread
//! Glottis`, `spread-glottis` and `spread_glottis` are one name). Tokens
//! without a sign or with an unknown name are dropped.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use tracing::debug;

use super::types::{FeatureBundle, Rule, RuleSource};
use crate::features::{FeatureVector, PhoneticFeature};

/// Why a rule text could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleParseError {
    /// Neither `→` nor `->` occurs in the text.
    #[error("rule has no arrow (expected '→' or '->'): {0:?}")]
    MissingArrow(String),
    /// Nothing before the arrow.
    #[error("rule has an empty input side: {0:?}")]
    EmptyInput(String),
    /// Nothing between the arrow and the context slash.
    #[error("rule has an empty output side: {0:?}")]
    EmptyOutput(String),
}

// ============================================================================
// Feature names
// ============================================================================

/// Aliases accepted in addition to each feature's canonical name.
const ALIASES: &[(&str, PhoneticFeature)] = &[
    ("voiced", PhoneticFeature::Voice),
    ("aspirated", PhoneticFeature::SpreadGlottis),
    ("stop", PhoneticFeature::Consonantal),
    ("atr", PhoneticFeature::Atr),
];

/// Lower-case, treat `-`, `_` and `:` as separators, collapse whitespace.
fn normalize_name(name: &str) -> String {
    let lowered: String = name
        .chars()
        .map(|c| match c {
            '-' | '_' | ':' => ' ',
            c => c.to_ascii_lowercase(),
        })
        .collect();
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn name_table() -> &'static FxHashMap<String, PhoneticFeature> {
    static TABLE: OnceLock<FxHashMap<String, PhoneticFeature>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let canonical = PhoneticFeature::ALL
            .into_iter()
            .map(|f| (normalize_name(f.name()), f));
        let aliases = ALIASES.iter().map(|&(a, f)| (normalize_name(a), f));
        canonical.chain(aliases).collect()
    })
}

/// Look up a feature by any accepted spelling.
///
/// ```
/// use liballophone::features::PhoneticFeature;
/// use liballophone::rules::feature_by_name;
///
/// assert_eq!(feature_by_name("Spread  Glottis"), Some(PhoneticFeature::SpreadGlottis));
/// assert_eq!(feature_by_name("tone: high"), Some(PhoneticFeature::ToneHigh));
/// assert_eq!(feature_by_name("voiced"), Some(PhoneticFeature::Voice));
/// assert_eq!(feature_by_name("sibilant"), None);
/// ```
pub fn feature_by_name(name: &str) -> Option<PhoneticFeature> {
    name_table().get(&normalize_name(name)).copied()
}

// ============================================================================
// Bundles
// ============================================================================

/// Signed tokens of a bundle, e.g. `(true, "continuant")` for `+continuant`.
///
/// All brackets are removed first; tokens that do not start with `+` or `-`
/// are skipped.
pub(crate) fn signed_tokens(text: &str) -> Vec<(bool, String)> {
    let cleaned: String = text.chars().filter(|c| !matches!(c, '[' | ']')).collect();
    cleaned
        .split(',')
        .filter_map(|raw| {
            let token = raw.trim();
            let mut chars = token.chars();
            match chars.next() {
                Some('+') => Some((true, chars.as_str().trim().to_string())),
                Some('-') => Some((false, chars.as_str().trim().to_string())),
                _ => None,
            }
        })
        .collect()
}

/// Force Voice and SpreadGlottis into opposite poles.
///
/// `+voice` implies `-spread glottis`, `-voice` implies `+spread glottis`,
/// and symmetrically starting from SpreadGlottis. The Voice step runs first.
fn normalize_laryngeal(mut mask: FeatureVector, mut values: FeatureVector) -> FeatureBundle {
    use PhoneticFeature::{SpreadGlottis, Voice};

    if values.contains(Voice) {
        mask |= SpreadGlottis;
        values = values.without(SpreadGlottis);
    } else if mask.contains(Voice) {
        mask |= SpreadGlottis;
        values |= SpreadGlottis;
    }

    if values.contains(SpreadGlottis) {
        mask |= Voice;
        values = values.without(Voice);
    } else if mask.contains(SpreadGlottis) {
        mask |= Voice;
        values |= Voice;
    }

    FeatureBundle { mask, values }
}

/// Parse a `[+f, -g]` bundle into a mask/value pair.
///
/// Never fails: unsigned tokens and unknown names are skipped, and a text
/// with nothing recognizable yields [`FeatureBundle::EMPTY`].
///
/// ```
/// use liballophone::features::PhoneticFeature::*;
/// use liballophone::rules::parse_feature_bundle;
///
/// let b = parse_feature_bundle("[+consonantal, -continuant]");
/// assert!(b.mask.contains(Consonantal) && b.mask.contains(Continuant));
/// assert!(b.values.contains(Consonantal) && !b.values.contains(Continuant));
/// ```
pub fn parse_feature_bundle(text: &str) -> FeatureBundle {
    let mut mask = FeatureVector::EMPTY;
    let mut values = FeatureVector::EMPTY;

    for (positive, name) in signed_tokens(text) {
        match feature_by_name(&name) {
            Some(feature) => {
                mask |= feature;
                if positive {
                    values |= feature;
                }
            }
            None => debug!(token = %name, "dropping unknown feature name"),
        }
    }

    normalize_laryngeal(mask, values)
}

// ============================================================================
// Rules
// ============================================================================

/// Split at the first arrow, preferring whichever of `→`/`->` comes first.
fn split_arrow(text: &str) -> Option<(&str, &str)> {
    let unicode = text.find('→').map(|i| (i, '→'.len_utf8()));
    let ascii = text.find("->").map(|i| (i, 2));
    let (at, len) = match (unicode, ascii) {
        (Some(u), Some(a)) => u.min(a),
        (Some(u), None) => u,
        (None, Some(a)) => a,
        (None, None) => return None,
    };
    Some((&text[..at], &text[at + len..]))
}

/// Parse rule text, reporting why it was rejected.
///
/// The output side runs up to the first `/`; everything after it, trimmed,
/// is the context annotation.
pub fn parse_rule_strict(id: &str, name: &str, text: &str) -> Result<Rule, RuleParseError> {
    let (input_text, rest) =
        split_arrow(text).ok_or_else(|| RuleParseError::MissingArrow(text.to_string()))?;

    let (output_text, context) = match rest.split_once('/') {
        Some((output, context)) => (output.trim(), context.trim()),
        None => (rest.trim(), ""),
    };
    let input_text = input_text.trim();

    if input_text.is_empty() {
        return Err(RuleParseError::EmptyInput(text.to_string()));
    }
    if output_text.is_empty() {
        return Err(RuleParseError::EmptyOutput(text.to_string()));
    }

    let input = parse_feature_bundle(input_text);
    let output = parse_feature_bundle(output_text);

    Ok(Rule {
        id: id.to_string(),
        name: name.to_string(),
        input_mask: input.mask,
        input_values: input.values,
        output_mask: output.mask,
        output_changes: output.values,
        output_text: output_text.to_string(),
        context: context.to_string(),
        raw_rule: text.to_string(),
    })
}

/// Parse rule text; `None` when it is not a rule.
///
/// # Example
///
/// ```
/// use liballophone::rules::parse_rule;
///
/// let rule = parse_rule("r1", "spirantization", "[+consonantal,-continuant,+coronal] → [+continuant] / V_V")
///     .unwrap();
/// assert_eq!(rule.context, "V_V");
/// assert_eq!(rule.output_text, "[+continuant]");
///
/// assert!(parse_rule("r2", "broken", "t becomes d").is_none());
/// ```
pub fn parse_rule(id: &str, name: &str, text: &str) -> Option<Rule> {
    match parse_rule_strict(id, name, text) {
        Ok(rule) => Some(rule),
        Err(e) => {
            debug!(rule_id = id, error = %e, "excluding unparsable rule");
            None
        }
    }
}

/// Parse a batch of rule sources, dropping the unparsable ones.
pub fn parse_rules<'a, I>(sources: I) -> Vec<Rule>
where
    I: IntoIterator<Item = &'a RuleSource>,
{
    sources
        .into_iter()
        .filter_map(|s| parse_rule(&s.id, &s.name, &s.rule))
        .collect()
}
