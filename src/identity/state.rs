//! Categorized editor state for modification flags.
//!
//! An editor builds a [`ModificationFlags`] word from single-choice slots
//! (one per diacritic or suprasegmental category, plus one level tone and one
//! contour tone) and two freely combinable sets. [`decode_flags`] recovers
//! that structure; [`CategorizedState::to_flags`] rebuilds the word.
//!
//! # Ambiguous words
//!
//! A word built by hand may set two tokens of one slot. Decoding keeps it
//! total rather than rejecting it:
//!
//! - category slots keep the **last** token in bit order
//! - the tone level and tone contour slots keep the **first**
//!
//! [`has_conflicts`] reports such words; decoding them does not round-trip.

use smallvec::SmallVec;

use crate::modifiers::{
    DiacriticCategory, ModificationFlags, ModificationToken, SuprasegmentalCategory, TokenKind,
};

const DIACRITIC_SLOTS: usize = DiacriticCategory::ALL.len();
const SUPRASEGMENTAL_SLOTS: usize = SuprasegmentalCategory::ALL.len();

/// Structured selection decoded from a flags word.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct CategorizedState {
    diacritics: [Option<ModificationToken>; DIACRITIC_SLOTS],
    /// Freely combinable diacritics, in bit order.
    pub combinable_diacritics: SmallVec<[ModificationToken; 4]>,
    suprasegmentals: [Option<ModificationToken>; SUPRASEGMENTAL_SLOTS],
    /// Freely combinable suprasegmentals, in bit order.
    pub combinable_suprasegmentals: SmallVec<[ModificationToken; 1]>,
    /// Level tone.
    pub tone_level: Option<ModificationToken>,
    /// Contour tone.
    pub tone_contour: Option<ModificationToken>,
}

impl CategorizedState {
    /// Nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// The selection in a diacritic category.
    pub fn diacritic(&self, category: DiacriticCategory) -> Option<ModificationToken> {
        self.diacritics[category.slot()]
    }

    /// The selection in a suprasegmental category.
    pub fn suprasegmental(&self, category: SuprasegmentalCategory) -> Option<ModificationToken> {
        self.suprasegmentals[category.slot()]
    }

    /// Selected diacritic categories with their tokens, in category order.
    pub fn diacritic_selections(
        &self,
    ) -> impl Iterator<Item = (DiacriticCategory, ModificationToken)> + '_ {
        DiacriticCategory::ALL
            .into_iter()
            .filter_map(|c| self.diacritic(c).map(|t| (c, t)))
    }

    /// Selected suprasegmental categories with their tokens, in category order.
    pub fn suprasegmental_selections(
        &self,
    ) -> impl Iterator<Item = (SuprasegmentalCategory, ModificationToken)> + '_ {
        SuprasegmentalCategory::ALL
            .into_iter()
            .filter_map(|c| self.suprasegmental(c).map(|t| (c, t)))
    }

    /// Select `token` in the slot its kind belongs to.
    ///
    /// Single-choice slots are overwritten; combinable tokens are added once.
    pub fn select(&mut self, token: ModificationToken) {
        match token.kind() {
            TokenKind::Diacritic(c) => self.diacritics[c.slot()] = Some(token),
            TokenKind::Suprasegmental(c) => self.suprasegmentals[c.slot()] = Some(token),
            TokenKind::CombinableDiacritic => {
                if !self.combinable_diacritics.contains(&token) {
                    self.combinable_diacritics.push(token);
                }
            }
            TokenKind::CombinableSuprasegmental => {
                if !self.combinable_suprasegmentals.contains(&token) {
                    self.combinable_suprasegmentals.push(token);
                }
            }
            TokenKind::ToneLevel => self.tone_level = Some(token),
            TokenKind::ToneContour => self.tone_contour = Some(token),
        }
    }

    /// Remove `token` wherever it is selected.
    pub fn deselect(&mut self, token: ModificationToken) {
        for slot in self.diacritics.iter_mut().chain(self.suprasegmentals.iter_mut()) {
            if *slot == Some(token) {
                *slot = None;
            }
        }
        self.combinable_diacritics.retain(|t| *t != token);
        self.combinable_suprasegmentals.retain(|t| *t != token);
        if self.tone_level == Some(token) {
            self.tone_level = None;
        }
        if self.tone_contour == Some(token) {
            self.tone_contour = None;
        }
    }

    /// Every selected token, in label order: category diacritics, combinable
    /// diacritics, category suprasegmentals, combinable suprasegmentals, tone
    /// level, tone contour.
    pub fn tokens(&self) -> impl Iterator<Item = ModificationToken> + '_ {
        self.diacritic_selections()
            .map(|(_, t)| t)
            .chain(self.combinable_diacritics.iter().copied())
            .chain(self.suprasegmental_selections().map(|(_, t)| t))
            .chain(self.combinable_suprasegmentals.iter().copied())
            .chain(self.tone_level)
            .chain(self.tone_contour)
    }

    /// OR together the bits of every selected token.
    pub fn to_flags(&self) -> ModificationFlags {
        self.tokens().collect()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.tokens().next().is_none()
    }
}

/// Classify every token set in `flags` into its slot.
///
/// Bits that name no token are ignored.
///
/// ```
/// use liballophone::identity::decode_flags;
/// use liballophone::modifiers::{DiacriticCategory, ModificationFlags, ModificationToken};
///
/// let flags = ModificationFlags::EMPTY
///     | ModificationToken::Voiceless
///     | ModificationToken::Aspirated
///     | ModificationToken::ToneHigh;
/// let state = decode_flags(flags);
///
/// assert_eq!(state.diacritic(DiacriticCategory::Phonation), Some(ModificationToken::Voiceless));
/// assert_eq!(state.combinable_diacritics.as_slice(), &[ModificationToken::Aspirated]);
/// assert_eq!(state.tone_level, Some(ModificationToken::ToneHigh));
/// assert_eq!(state.to_flags(), flags);
/// ```
pub fn decode_flags(flags: ModificationFlags) -> CategorizedState {
    let mut state = CategorizedState::new();
    for token in flags.tokens() {
        match token.kind() {
            TokenKind::ToneLevel if state.tone_level.is_some() => {}
            TokenKind::ToneContour if state.tone_contour.is_some() => {}
            _ => state.select(token),
        }
    }
    state
}

/// Whether `flags` sets more than one token of any single-choice slot.
pub fn has_conflicts(flags: ModificationFlags) -> bool {
    let mut diacritics = [0u8; DIACRITIC_SLOTS];
    let mut suprasegmentals = [0u8; SUPRASEGMENTAL_SLOTS];
    let mut levels = 0u8;
    let mut contours = 0u8;

    for token in flags.tokens() {
        let counter = match token.kind() {
            TokenKind::Diacritic(c) => &mut diacritics[c.slot()],
            TokenKind::Suprasegmental(c) => &mut suprasegmentals[c.slot()],
            TokenKind::ToneLevel => &mut levels,
            TokenKind::ToneContour => &mut contours,
            TokenKind::CombinableDiacritic | TokenKind::CombinableSuprasegmental => continue,
        };
        *counter += 1;
        if *counter > 1 {
            return true;
        }
    }
    false
}

/// Base symbol followed by the glyph of every set token: diacritics,
/// suprasegmentals, level tone, contour tone, each group in canonical order.
///
/// ```
/// use liballophone::identity::display_symbol;
/// use liballophone::modifiers::{ModificationFlags, ModificationToken};
///
/// let flags = ModificationFlags::EMPTY | ModificationToken::Long | ModificationToken::Aspirated;
/// assert_eq!(display_symbol("t", flags), "tʰː");
/// ```
pub fn display_symbol(base_symbol: &str, flags: ModificationFlags) -> String {
    let ordered = ModificationToken::DIACRITIC_ORDER
        .iter()
        .chain(ModificationToken::SUPRASEGMENTAL_ORDER.iter())
        .chain(ModificationToken::TONE_LEVELS.iter())
        .chain(ModificationToken::TONE_CONTOURS.iter());

    let mut symbol = base_symbol.to_string();
    for token in ordered.filter(|t| flags.contains(**t)) {
        symbol.push_str(token.glyph());
    }
    symbol
}

/// `"base + Label + Label"`, or just `base` when nothing is selected.
pub fn display_name(base: &str, state: &CategorizedState) -> String {
    let mut name = base.to_string();
    for token in state.tokens() {
        name.push_str(" + ");
        name.push_str(token.label());
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use ModificationToken as T;

    fn flags(tokens: &[ModificationToken]) -> ModificationFlags {
        tokens.iter().copied().collect()
    }

    #[test]
    fn test_every_token_lands_in_its_slot() {
        for token in ModificationToken::ALL {
            let state = decode_flags(ModificationFlags::from(token));
            assert_eq!(state.tokens().collect::<Vec<_>>(), vec![token]);
            match token.kind() {
                TokenKind::Diacritic(c) => assert_eq!(state.diacritic(c), Some(token)),
                TokenKind::Suprasegmental(c) => assert_eq!(state.suprasegmental(c), Some(token)),
                TokenKind::CombinableDiacritic => {
                    assert!(state.combinable_diacritics.contains(&token))
                }
                TokenKind::CombinableSuprasegmental => {
                    assert!(state.combinable_suprasegmentals.contains(&token))
                }
                TokenKind::ToneLevel => assert_eq!(state.tone_level, Some(token)),
                TokenKind::ToneContour => assert_eq!(state.tone_contour, Some(token)),
            }
        }
    }

    #[test]
    fn test_editor_state_round_trips() {
        let f = flags(&[
            T::Dental,
            T::Labialized,
            T::BreathyVoiced,
            T::Glottalized,
            T::Nasalized,
            T::HalfLong,
            T::PrimaryStress,
            T::Linking,
            T::ToneMid,
            T::ToneLowRising,
        ]);
        assert!(!has_conflicts(f));
        assert_eq!(decode_flags(f).to_flags(), f);
    }

    #[test]
    fn test_category_conflict_keeps_last() {
        let f = flags(&[T::Voiceless, T::CreakyVoiced]);
        assert!(has_conflicts(f));
        let state = decode_flags(f);
        assert_eq!(state.diacritic(DiacriticCategory::Phonation), Some(T::CreakyVoiced));
    }

    #[test]
    fn test_tone_conflict_keeps_first() {
        let f = flags(&[T::ToneLow, T::ToneExtraHigh, T::ToneFalling, T::ToneRising]);
        assert!(has_conflicts(f));
        let state = decode_flags(f);
        assert_eq!(state.tone_level, Some(T::ToneExtraHigh));
        assert_eq!(state.tone_contour, Some(T::ToneRising));
    }

    #[test]
    fn test_combinables_never_conflict() {
        let f = flags(&[T::Linguolabial, T::Glottalized, T::Aspirated, T::Nasalized, T::Linking]);
        assert!(!has_conflicts(f));
        assert_eq!(decode_flags(f).combinable_diacritics.len(), 4);
    }

    #[test]
    fn test_unknown_bits_are_ignored() {
        let f = ModificationFlags::from_bits(1 << 63);
        assert!(decode_flags(f).is_empty());
        assert!(!has_conflicts(f));
    }

    #[test]
    fn test_select_and_deselect() {
        let mut state = CategorizedState::new();
        state.select(T::Long);
        state.select(T::ExtraShort);
        state.select(T::Linking);
        state.select(T::Linking);
        assert_eq!(state.suprasegmental(SuprasegmentalCategory::Length), Some(T::ExtraShort));
        assert_eq!(state.combinable_suprasegmentals.len(), 1);
        state.deselect(T::ExtraShort);
        state.deselect(T::Linking);
        assert!(state.is_empty());
    }

    #[test]
    fn test_display_symbol_order() {
        let f = flags(&[T::ToneRising, T::Nasalized, T::Long, T::Dental, T::ToneHigh]);
        assert_eq!(display_symbol("a", f), "a\u{32A}\u{303}ː˦˩˥");
        assert_eq!(display_symbol("a", ModificationFlags::EMPTY), "a");
    }

    #[test]
    fn test_display_name() {
        let state = decode_flags(flags(&[T::Aspirated, T::Voiceless, T::Long]));
        assert_eq!(display_name("t", &state), "t + Voiceless + Aspirated + Long");
        assert_eq!(display_name("t", &CategorizedState::new()), "t");
    }
}
