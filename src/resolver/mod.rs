//! Surface symbol resolution.
//!
//! Turns a rule's output into a displayable symbol. Resolution walks a fixed
//! fallback chain and stops at the first step that produces an answer:
//!
//! 1. **Literal**: the output text holds a bracketed token with no `+`, `-`
//!    or `,` (e.g. `[ɾ]`); the token is the symbol.
//! 2. **Nearest neighbor**: given the base vector, the rule's output masks and
//!    a non-empty inventory, the transformed vector
//!    `(base & !output_mask) | output_changes` is compared against every
//!    entry by Hamming distance. The closest entry wins; ties go to the
//!    earlier entry.
//! 3. **Diacritics**: signed tokens of the output text are mapped through a
//!    small glyph table and appended to the base symbol.
//! 4. **Unchanged**: the base symbol.
//!
//! Resolution never fails.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::features::FeatureVector;
use crate::rules::{applicable_rules, apply_rule, Rule};

/// One phoneme available to nearest-neighbor resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryEntry {
    /// Phoneme identifier.
    pub id: String,
    /// Display symbol.
    pub symbol: String,
    /// Feature vector.
    pub vector: FeatureVector,
}

impl InventoryEntry {
    /// Build an entry.
    pub fn new(id: impl Into<String>, symbol: impl Into<String>, vector: FeatureVector) -> Self {
        InventoryEntry {
            id: id.into(),
            symbol: symbol.into(),
            vector,
        }
    }
}

/// Which step of the chain produced a [`Resolution`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "kebab-case")
)]
pub enum ResolutionSource {
    /// Step 1.
    Literal,
    /// Step 2: the chosen entry and its distance from the transformed vector.
    NearestNeighbor {
        /// Id of the chosen entry.
        id: String,
        /// Differing bits.
        distance: u32,
    },
    /// Step 3.
    Diacritics,
    /// Step 4.
    Unchanged,
}

/// A resolved symbol and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    /// The surface symbol.
    pub symbol: String,
    /// The step that produced it.
    pub source: ResolutionSource,
}

// ============================================================================
// Step 1: literal symbols
// ============================================================================

/// Content of the first innermost `[...]` group, if it names a symbol rather
/// than a feature bundle.
///
/// ```
/// use liballophone::resolver::literal_symbol;
///
/// assert_eq!(literal_symbol("[ɾ]"), Some("ɾ"));
/// assert_eq!(literal_symbol("[+voice]"), None);
/// assert_eq!(literal_symbol("ɾ"), None);
/// ```
pub fn literal_symbol(output_text: &str) -> Option<&str> {
    let mut start = None;
    for (i, c) in output_text.char_indices() {
        match c {
            '[' => start = Some(i + 1),
            ']' => {
                if let Some(s) = start {
                    let content = &output_text[s..i];
                    if content.is_empty() {
                        start = None;
                        continue;
                    }
                    if content.contains(['+', '-', ',']) {
                        return None;
                    }
                    let symbol = content.trim();
                    return (!symbol.is_empty()).then_some(symbol);
                }
            }
            _ => {}
        }
    }
    None
}

// ============================================================================
// Step 2: nearest neighbor
// ============================================================================

/// The inventory entry closest to `target` and its Hamming distance.
///
/// Ties go to the earliest entry. `None` only for an empty inventory.
pub fn nearest_entry(
    target: FeatureVector,
    inventory: &[InventoryEntry],
) -> Option<(&InventoryEntry, u32)> {
    let mut best: Option<(&InventoryEntry, u32)> = None;
    for entry in inventory {
        let distance = target.hamming_distance(entry.vector);
        trace!(candidate = %entry.symbol, distance, "scored inventory entry");
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((entry, distance));
            if distance == 0 {
                break;
            }
        }
    }
    best
}

// ============================================================================
// Step 3: diacritics
// ============================================================================

/// Lower-case and collapse whitespace.
fn normalize_token(token: &str) -> String {
    token
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn glyph_table() -> &'static FxHashMap<&'static str, &'static str> {
    static TABLE: OnceLock<FxHashMap<&'static str, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| {
        [
            ("+voiced", ""),
            ("-voiced", "\u{325}"),
            ("+voice", ""),
            ("-voice", "\u{325}"),
            ("+spread glottis", "ʰ"),
            ("+aspirated", "ʰ"),
            ("+nasal", "\u{303}"),
            ("+rounded", ""),
            ("-rounded", ""),
            ("+back", "ˠ"),
            ("-back", "\u{33A}"),
            ("+syllabic", "\u{329}"),
            ("-syllabic", "\u{32F}"),
            ("+labialized", "ʷ"),
            ("+velarized", "ˠ"),
            ("+long", "ː"),
            ("long", "ː"),
            ("short", ""),
        ]
        .into_iter()
        .collect()
    })
}

/// Glyph for one output token such as `+aspirated`; `None` when unmapped.
pub fn token_glyph(token: &str) -> Option<&'static str> {
    glyph_table().get(normalize_token(token).as_str()).copied()
}

/// Append the glyphs of every mapped token in `output_text` to `base_symbol`.
pub fn apply_diacritics(base_symbol: &str, output_text: &str) -> String {
    if base_symbol.is_empty() {
        return String::new();
    }
    let cleaned: String = output_text
        .chars()
        .filter(|c| !matches!(c, '[' | ']'))
        .collect();
    let mut symbol = base_symbol.to_string();
    for token in cleaned.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if let Some(glyph) = token_glyph(token) {
            symbol.push_str(glyph);
        }
    }
    symbol
}

// ============================================================================
// Resolution
// ============================================================================

/// Everything [`resolve_surface`] may use. Only `base_symbol` and
/// `output_text` are required.
#[derive(Debug, Clone, Copy)]
pub struct ResolveRequest<'a> {
    /// Symbol of the unmodified phoneme.
    pub base_symbol: &'a str,
    /// Output side of the rule.
    pub output_text: &'a str,
    /// Vector of the unmodified phoneme.
    pub base_vector: Option<FeatureVector>,
    /// Rule output mask.
    pub output_mask: Option<FeatureVector>,
    /// Rule output values.
    pub output_changes: Option<FeatureVector>,
    /// Candidates for nearest-neighbor search.
    pub inventory: Option<&'a [InventoryEntry]>,
}

impl<'a> ResolveRequest<'a> {
    /// A request with only the textual inputs.
    pub fn new(base_symbol: &'a str, output_text: &'a str) -> Self {
        ResolveRequest {
            base_symbol,
            output_text,
            base_vector: None,
            output_mask: None,
            output_changes: None,
            inventory: None,
        }
    }

    /// A request for applying `rule` to a phoneme.
    pub fn for_rule(base_symbol: &'a str, base_vector: FeatureVector, rule: &'a Rule) -> Self {
        ResolveRequest {
            base_vector: Some(base_vector),
            output_mask: Some(rule.output_mask),
            output_changes: Some(rule.output_changes),
            ..ResolveRequest::new(base_symbol, &rule.output_text)
        }
    }

    /// Supply the base vector.
    pub fn base_vector(mut self, vector: FeatureVector) -> Self {
        self.base_vector = Some(vector);
        self
    }

    /// Supply the output mask and changes.
    pub fn output(mut self, mask: FeatureVector, changes: FeatureVector) -> Self {
        self.output_mask = Some(mask);
        self.output_changes = Some(changes);
        self
    }

    /// Supply the inventory.
    pub fn inventory(mut self, inventory: &'a [InventoryEntry]) -> Self {
        self.inventory = Some(inventory);
        self
    }

    /// Run the fallback chain.
    pub fn resolve(&self) -> Resolution {
        resolve_surface(self)
    }
}

/// Resolve a surface symbol, reporting which step produced it.
pub fn resolve_surface(request: &ResolveRequest<'_>) -> Resolution {
    let base = request.base_symbol;
    let text = request.output_text;

    if text.is_empty() {
        return Resolution {
            symbol: base.to_string(),
            source: ResolutionSource::Unchanged,
        };
    }

    if let Some(symbol) = literal_symbol(text) {
        return Resolution {
            symbol: symbol.to_string(),
            source: ResolutionSource::Literal,
        };
    }

    if let (Some(vector), Some(mask), Some(changes), Some(inventory)) = (
        request.base_vector,
        request.output_mask,
        request.output_changes,
        request.inventory,
    ) {
        let transformed = (vector & !mask) | changes;
        if let Some((entry, distance)) = nearest_entry(transformed, inventory) {
            debug!(
                base,
                transformed = %transformed,
                chosen = %entry.symbol,
                distance,
                "nearest inventory entry"
            );
            let symbol = if entry.symbol.is_empty() {
                base.to_string()
            } else {
                entry.symbol.clone()
            };
            return Resolution {
                symbol,
                source: ResolutionSource::NearestNeighbor {
                    id: entry.id.clone(),
                    distance,
                },
            };
        }
    }

    if text.contains(['+', '-']) {
        return Resolution {
            symbol: apply_diacritics(base, text),
            source: ResolutionSource::Diacritics,
        };
    }

    Resolution {
        symbol: base.to_string(),
        source: ResolutionSource::Unchanged,
    }
}

/// Resolve a surface symbol.
///
/// See the [module documentation](self) for the fallback chain.
///
/// ```
/// use liballophone::resolver::resolve_surface_symbol;
///
/// assert_eq!(resolve_surface_symbol("t", "[ɾ]", None, None, None, None), "ɾ");
/// assert_eq!(resolve_surface_symbol("t", "[+aspirated]", None, None, None, None), "tʰ");
/// assert_eq!(resolve_surface_symbol("t", "V_V", None, None, None, None), "t");
/// ```
pub fn resolve_surface_symbol(
    base_symbol: &str,
    output_text: &str,
    base_vector: Option<FeatureVector>,
    output_mask: Option<FeatureVector>,
    output_changes: Option<FeatureVector>,
    inventory: Option<&[InventoryEntry]>,
) -> String {
    resolve_surface(&ResolveRequest {
        base_symbol,
        output_text,
        base_vector,
        output_mask,
        output_changes,
        inventory,
    })
    .symbol
}

// ============================================================================
// Allophones
// ============================================================================

/// One realization of a phoneme under one applicable rule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Allophone {
    /// Id of the rule that produced it.
    pub rule_id: String,
    /// Name of that rule.
    pub rule_name: String,
    /// Context annotation of that rule.
    pub context: String,
    /// The transformed vector.
    pub vector: FeatureVector,
    /// The resolved symbol.
    pub resolution: Resolution,
}

/// Every allophone of a phoneme: one per applicable rule, in rule order.
pub fn realize_allophones(
    base_symbol: &str,
    base_vector: FeatureVector,
    rules: &[Rule],
    inventory: &[InventoryEntry],
) -> Vec<Allophone> {
    applicable_rules(base_vector, rules)
        .into_iter()
        .map(|rule| Allophone {
            rule_id: rule.id.clone(),
            rule_name: rule.name.clone(),
            context: rule.context.clone(),
            vector: apply_rule(base_vector, rule),
            resolution: ResolveRequest::for_rule(base_symbol, base_vector, rule)
                .inventory(inventory)
                .resolve(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::PhoneticFeature::{self, *};
    use crate::rules::parse_rule;

    fn fv(features: &[PhoneticFeature]) -> FeatureVector {
        FeatureVector::from_features(features)
    }

    fn inventory() -> Vec<InventoryEntry> {
        vec![
            InventoryEntry::new("t", "t", fv(&[Consonantal, Coronal, Anterior, SpreadGlottis])),
            InventoryEntry::new("d", "d", fv(&[Consonantal, Coronal, Anterior, Voice])),
            InventoryEntry::new("s", "s", fv(&[Consonantal, Coronal, Anterior, Continuant, Strident, SpreadGlottis])),
            InventoryEntry::new("z", "z", fv(&[Consonantal, Coronal, Anterior, Continuant, Strident, Voice])),
        ]
    }

    #[test]
    fn test_literal_short_circuits_everything() {
        let inv = inventory();
        let r = ResolveRequest::new("t", "[ɾ]")
            .base_vector(inv[0].vector)
            .output(fv(&[Voice]), fv(&[Voice]))
            .inventory(&inv)
            .resolve();
        assert_eq!(r.symbol, "ɾ");
        assert_eq!(r.source, ResolutionSource::Literal);
    }

    #[test]
    fn test_literal_symbol_edge_cases() {
        assert_eq!(literal_symbol("[ ɾ ]"), Some("ɾ"));
        assert_eq!(literal_symbol("[] [ʔ]"), Some("ʔ"));
        assert_eq!(literal_symbol("[+voice, -nasal]"), None);
        assert_eq!(literal_symbol("[ ]"), None);
        assert_eq!(literal_symbol("[[x]]"), Some("x"));
    }

    #[test]
    fn test_nearest_neighbor_exact_match() {
        let inv = inventory();
        let rule = parse_rule("v", "voicing", "[+consonantal] → [+voice]").unwrap();
        let r = ResolveRequest::for_rule("t", inv[0].vector, &rule)
            .inventory(&inv)
            .resolve();
        assert_eq!(r.symbol, "d");
        assert_eq!(
            r.source,
            ResolutionSource::NearestNeighbor { id: "d".into(), distance: 0 }
        );
    }

    #[test]
    fn test_nearest_neighbor_ties_go_to_inventory_order() {
        let a = InventoryEntry::new("a", "A", fv(&[Labial]));
        let b = InventoryEntry::new("b", "B", fv(&[Dorsal]));
        let target = FeatureVector::EMPTY;
        let forward = vec![a.clone(), b.clone()];
        let backward = vec![b, a];
        assert_eq!(nearest_entry(target, &forward).map(|(e, d)| (e.id.as_str(), d)), Some(("a", 1)));
        assert_eq!(nearest_entry(target, &backward).map(|(e, d)| (e.id.as_str(), d)), Some(("b", 1)));
    }

    #[test]
    fn test_empty_inventory_falls_through_to_diacritics() {
        let rule = parse_rule("asp", "aspiration", "[+consonantal] → [+spread glottis]").unwrap();
        let r = ResolveRequest::for_rule("t", fv(&[Consonantal]), &rule)
            .inventory(&[])
            .resolve();
        assert_eq!(r.symbol, "tʰ");
        assert_eq!(r.source, ResolutionSource::Diacritics);
    }

    #[test]
    fn test_missing_vector_skips_nearest_neighbor() {
        let inv = inventory();
        let r = ResolveRequest::new("n", "[-voice]").inventory(&inv).resolve();
        assert_eq!(r.symbol, "n\u{325}");
        assert_eq!(r.source, ResolutionSource::Diacritics);
    }

    #[test]
    fn test_diacritics_are_concatenated_in_token_order() {
        assert_eq!(apply_diacritics("k", "[+aspirated, +labialized]"), "kʰʷ");
        assert_eq!(apply_diacritics("a", "[+Nasal, long]"), "a\u{303}ː");
        assert_eq!(apply_diacritics("a", "[+rounded]"), "a");
        assert_eq!(apply_diacritics("", "[+aspirated]"), "");
    }

    #[test]
    fn test_unchanged_fallback() {
        let r = ResolveRequest::new("t", "V_V").resolve();
        assert_eq!(r, Resolution { symbol: "t".into(), source: ResolutionSource::Unchanged });
        assert_eq!(resolve_surface_symbol("t", "", None, None, None, None), "t");
    }

    #[test]
    fn test_realize_allophones() {
        let inv = inventory();
        let rules: Vec<Rule> = [
            ("voicing", "[+consonantal, -voice] → [+voice] / V_V"),
            ("vowel-length", "[+syllabic] → [+long]"),
            ("flap", "[+coronal] → [ɾ] / V_V"),
        ]
        .iter()
        .filter_map(|(id, text)| parse_rule(id, id, text))
        .collect();

        let allophones = realize_allophones("t", inv[0].vector, &rules, &inv);
        let got: Vec<(&str, &str)> = allophones
            .iter()
            .map(|a| (a.rule_id.as_str(), a.resolution.symbol.as_str()))
            .collect();
        assert_eq!(got, vec![("voicing", "d"), ("flap", "ɾ")]);
        assert_eq!(allophones[0].vector, inv[1].vector);
        assert_eq!(allophones[1].context, "V_V");
    }
}
