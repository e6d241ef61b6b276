//! Diacritic, suprasegmental and tone modification tokens.
//!
//! A phoneme inventory entry is a base phoneme plus a set of modifications
//! (diacritics such as `aspirated`, suprasegmentals such as `long`, tones such
//! as `high-falling`). Each [`ModificationToken`] owns one bit of a
//! [`ModificationFlags`] word.
//!
//! `ModificationFlags` is a different type from
//! [`FeatureVector`](crate::features::FeatureVector): the two are both flag
//! words, but over unrelated enumerations.
//!
//! # Bit assignment
//!
//! Token `i` in [`ModificationToken::ALL`] owns bit `i`. The order is persisted
//! inside composite identifiers and must only ever be appended to.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};
use std::str::FromStr;

/// Exclusive diacritic slots: at most one token per category is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum DiacriticCategory {
    /// dental, apical, laminal
    ArticulationPlace,
    /// labialized, palatalized, velarized, pharyngealized
    SecondaryArticulation,
    /// more/less rounded
    Roundness,
    /// advanced, retracted, centralized, mid-centralized
    TonguePosition,
    /// voiceless, voiced, breathy, creaky
    Phonation,
    /// raised, lowered
    TongueHeight,
    /// advanced/retracted tongue root
    TongueRoot,
    /// nasal, lateral, no audible release
    Release,
    /// syllabic, non-syllabic
    Syllabicity,
}

impl DiacriticCategory {
    /// All categories, in editor order.
    pub const ALL: [DiacriticCategory; 9] = [
        DiacriticCategory::ArticulationPlace,
        DiacriticCategory::SecondaryArticulation,
        DiacriticCategory::Roundness,
        DiacriticCategory::TonguePosition,
        DiacriticCategory::Phonation,
        DiacriticCategory::TongueHeight,
        DiacriticCategory::TongueRoot,
        DiacriticCategory::Release,
        DiacriticCategory::Syllabicity,
    ];

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            DiacriticCategory::ArticulationPlace => "Articulation Place",
            DiacriticCategory::SecondaryArticulation => "Secondary Articulation",
            DiacriticCategory::Roundness => "Roundness",
            DiacriticCategory::TonguePosition => "Tongue Position (Horizontal)",
            DiacriticCategory::Phonation => "Phonation",
            DiacriticCategory::TongueHeight => "Tongue Height",
            DiacriticCategory::TongueRoot => "Tongue Root",
            DiacriticCategory::Release => "Release",
            DiacriticCategory::Syllabicity => "Syllabicity",
        }
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        self as usize
    }
}

/// Exclusive suprasegmental slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum SuprasegmentalCategory {
    /// long, half-long, extra-short
    Length,
    /// primary, secondary
    Stress,
    /// foot group, intonation group, syllable break
    Breaks,
}

impl SuprasegmentalCategory {
    /// All categories, in editor order.
    pub const ALL: [SuprasegmentalCategory; 3] = [
        SuprasegmentalCategory::Length,
        SuprasegmentalCategory::Stress,
        SuprasegmentalCategory::Breaks,
    ];

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            SuprasegmentalCategory::Length => "Length",
            SuprasegmentalCategory::Stress => "Stress",
            SuprasegmentalCategory::Breaks => "Breaks",
        }
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        self as usize
    }
}

/// How a token participates in the editor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// One choice per diacritic category.
    Diacritic(DiacriticCategory),
    /// Freely combinable diacritic.
    CombinableDiacritic,
    /// One choice per suprasegmental category.
    Suprasegmental(SuprasegmentalCategory),
    /// Freely combinable suprasegmental.
    CombinableSuprasegmental,
    /// The single level-tone slot.
    ToneLevel,
    /// The single contour-tone slot.
    ToneContour,
}

/// A diacritic, suprasegmental or tone modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "&'static str")
)]
#[repr(u8)]
pub enum ModificationToken {
    Dental,
    Apical,
    Laminal,
    Linguolabial,
    Labialized,
    Palatalized,
    Velarized,
    Pharyngealized,
    Glottalized,
    MoreRounded,
    LessRounded,
    Advanced,
    Retracted,
    Centralized,
    MidCentralized,
    Voiceless,
    Voiced,
    BreathyVoiced,
    CreakyVoiced,
    Aspirated,
    Nasalized,
    NasalRelease,
    LateralRelease,
    NoAudibleRelease,
    AdvancedTongueRoot,
    RetractedTongueRoot,
    Raised,
    Lowered,
    Syllabic,
    NonSyllabic,
    PrimaryStress,
    SecondaryStress,
    Long,
    HalfLong,
    ExtraShort,
    Linking,
    MinorGroup,
    MajorGroup,
    SyllableBreak,
    ToneExtraHigh,
    ToneHigh,
    ToneMid,
    ToneLow,
    ToneExtraLow,
    ToneRising,
    ToneFalling,
    ToneHighFalling,
    ToneLowRising,
    ToneRisingFalling,
    ToneFallingRising,
}

/// Error returned when a string names no known modification token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown modification token: {0:?}")]
pub struct UnknownToken(pub String);

impl ModificationToken {
    /// Every token, in bit order.
    pub const ALL: [ModificationToken; 50] = [
        ModificationToken::Dental,
        ModificationToken::Apical,
        ModificationToken::Laminal,
        ModificationToken::Linguolabial,
        ModificationToken::Labialized,
        ModificationToken::Palatalized,
        ModificationToken::Velarized,
        ModificationToken::Pharyngealized,
        ModificationToken::Glottalized,
        ModificationToken::MoreRounded,
        ModificationToken::LessRounded,
        ModificationToken::Advanced,
        ModificationToken::Retracted,
        ModificationToken::Centralized,
        ModificationToken::MidCentralized,
        ModificationToken::Voiceless,
        ModificationToken::Voiced,
        ModificationToken::BreathyVoiced,
        ModificationToken::CreakyVoiced,
        ModificationToken::Aspirated,
        ModificationToken::Nasalized,
        ModificationToken::NasalRelease,
        ModificationToken::LateralRelease,
        ModificationToken::NoAudibleRelease,
        ModificationToken::AdvancedTongueRoot,
        ModificationToken::RetractedTongueRoot,
        ModificationToken::Raised,
        ModificationToken::Lowered,
        ModificationToken::Syllabic,
        ModificationToken::NonSyllabic,
        ModificationToken::PrimaryStress,
        ModificationToken::SecondaryStress,
        ModificationToken::Long,
        ModificationToken::HalfLong,
        ModificationToken::ExtraShort,
        ModificationToken::Linking,
        ModificationToken::MinorGroup,
        ModificationToken::MajorGroup,
        ModificationToken::SyllableBreak,
        ModificationToken::ToneExtraHigh,
        ModificationToken::ToneHigh,
        ModificationToken::ToneMid,
        ModificationToken::ToneLow,
        ModificationToken::ToneExtraLow,
        ModificationToken::ToneRising,
        ModificationToken::ToneFalling,
        ModificationToken::ToneHighFalling,
        ModificationToken::ToneLowRising,
        ModificationToken::ToneRisingFalling,
        ModificationToken::ToneFallingRising,
    ];

    /// Order in which diacritic glyphs are attached to a base symbol.
    pub const DIACRITIC_ORDER: [ModificationToken; 30] = [
        ModificationToken::Dental,
        ModificationToken::Apical,
        ModificationToken::Laminal,
        ModificationToken::Linguolabial,
        ModificationToken::Labialized,
        ModificationToken::Palatalized,
        ModificationToken::Velarized,
        ModificationToken::Pharyngealized,
        ModificationToken::Glottalized,
        ModificationToken::MoreRounded,
        ModificationToken::LessRounded,
        ModificationToken::Advanced,
        ModificationToken::Retracted,
        ModificationToken::Centralized,
        ModificationToken::MidCentralized,
        ModificationToken::Voiceless,
        ModificationToken::Voiced,
        ModificationToken::BreathyVoiced,
        ModificationToken::CreakyVoiced,
        ModificationToken::Raised,
        ModificationToken::Lowered,
        ModificationToken::AdvancedTongueRoot,
        ModificationToken::RetractedTongueRoot,
        ModificationToken::NasalRelease,
        ModificationToken::LateralRelease,
        ModificationToken::NoAudibleRelease,
        ModificationToken::Syllabic,
        ModificationToken::NonSyllabic,
        ModificationToken::Aspirated,
        ModificationToken::Nasalized,
    ];

    /// Order in which suprasegmental glyphs follow the diacritics.
    pub const SUPRASEGMENTAL_ORDER: [ModificationToken; 9] = [
        ModificationToken::Long,
        ModificationToken::HalfLong,
        ModificationToken::ExtraShort,
        ModificationToken::PrimaryStress,
        ModificationToken::SecondaryStress,
        ModificationToken::MinorGroup,
        ModificationToken::MajorGroup,
        ModificationToken::SyllableBreak,
        ModificationToken::Linking,
    ];

    /// Level tones, highest first.
    pub const TONE_LEVELS: [ModificationToken; 5] = [
        ModificationToken::ToneExtraHigh,
        ModificationToken::ToneHigh,
        ModificationToken::ToneMid,
        ModificationToken::ToneLow,
        ModificationToken::ToneExtraLow,
    ];

    /// Contour tones.
    pub const TONE_CONTOURS: [ModificationToken; 6] = [
        ModificationToken::ToneRising,
        ModificationToken::ToneFalling,
        ModificationToken::ToneHighFalling,
        ModificationToken::ToneLowRising,
        ModificationToken::ToneRisingFalling,
        ModificationToken::ToneFallingRising,
    ];

    /// Bit index inside [`ModificationFlags`].
    #[inline]
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// Single-bit mask inside [`ModificationFlags`].
    #[inline]
    pub const fn bit(self) -> u64 {
        1 << (self as u32)
    }

    /// Kebab-case identifier used in descriptors, files and the CLI.
    pub const fn value(self) -> &'static str {
        use ModificationToken::*;
        match self {
            Dental => "dental",
            Apical => "apical",
            Laminal => "laminal",
            Linguolabial => "linguolabial",
            Labialized => "labialized",
            Palatalized => "palatalized",
            Velarized => "velarized",
            Pharyngealized => "pharyngealized",
            Glottalized => "glottalized",
            MoreRounded => "more-rounded",
            LessRounded => "less-rounded",
            Advanced => "advanced",
            Retracted => "retracted",
            Centralized => "centralized",
            MidCentralized => "mid-centralized",
            Voiceless => "voiceless",
            Voiced => "voiced",
            BreathyVoiced => "breathy-voiced",
            CreakyVoiced => "creaky-voiced",
            Aspirated => "aspirated",
            Nasalized => "nasalized",
            NasalRelease => "nasal-release",
            LateralRelease => "lateral-release",
            NoAudibleRelease => "no-audible-release",
            AdvancedTongueRoot => "advanced-tongue-root",
            RetractedTongueRoot => "retracted-tongue-root",
            Raised => "raised",
            Lowered => "lowered",
            Syllabic => "syllabic",
            NonSyllabic => "non-syllabic",
            PrimaryStress => "primary-stress",
            SecondaryStress => "secondary-stress",
            Long => "long",
            HalfLong => "half-long",
            ExtraShort => "extra-short",
            Linking => "linking",
            MinorGroup => "minor-group",
            MajorGroup => "major-group",
            SyllableBreak => "syllable-break",
            ToneExtraHigh => "extra-high",
            ToneHigh => "high",
            ToneMid => "mid",
            ToneLow => "low",
            ToneExtraLow => "extra-low",
            ToneRising => "rising",
            ToneFalling => "falling",
            ToneHighFalling => "high-falling",
            ToneLowRising => "low-rising",
            ToneRisingFalling => "rising-falling",
            ToneFallingRising => "falling-rising",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        use ModificationToken::*;
        match self {
            Dental => "Dental",
            Apical => "Apical",
            Laminal => "Laminal",
            Linguolabial => "Linguolabial",
            Labialized => "Labialized",
            Palatalized => "Palatalized",
            Velarized => "Velarized",
            Pharyngealized => "Pharyngealized",
            Glottalized => "Glottalized",
            MoreRounded => "More rounded",
            LessRounded => "Less rounded",
            Advanced => "Advanced",
            Retracted => "Retracted",
            Centralized => "Centralized",
            MidCentralized => "Mid-centralized",
            Voiceless => "Voiceless",
            Voiced => "Voiced",
            BreathyVoiced => "Breathy voiced",
            CreakyVoiced => "Creaky voiced",
            Aspirated => "Aspirated",
            Nasalized => "Nasalized",
            NasalRelease => "Nasal release",
            LateralRelease => "Lateral release",
            NoAudibleRelease => "No audible release",
            AdvancedTongueRoot => "Advanced tongue root",
            RetractedTongueRoot => "Retracted tongue root",
            Raised => "Raised",
            Lowered => "Lowered",
            Syllabic => "Syllabic",
            NonSyllabic => "Non-syllabic",
            PrimaryStress => "Primary stress",
            SecondaryStress => "Secondary stress",
            Long => "Long",
            HalfLong => "Half-long",
            ExtraShort => "Extra-short",
            Linking => "Linking",
            MinorGroup => "Minor (foot) group",
            MajorGroup => "Major (intonation) group",
            SyllableBreak => "Syllable break",
            ToneExtraHigh => "Extra-high",
            ToneHigh => "High",
            ToneMid => "Mid",
            ToneLow => "Low",
            ToneExtraLow => "Extra-low",
            ToneRising => "Rising",
            ToneFalling => "Falling",
            ToneHighFalling => "High falling",
            ToneLowRising => "Low rising",
            ToneRisingFalling => "Rising-falling",
            ToneFallingRising => "Falling-rising",
        }
    }

    /// IPA glyph appended to the base symbol.
    pub const fn glyph(self) -> &'static str {
        use ModificationToken::*;
        match self {
            Dental => "\u{32A}",
            Apical => "\u{33A}",
            Laminal => "\u{33B}",
            Linguolabial => "\u{33C}",
            Labialized => "ʷ",
            Palatalized => "ʲ",
            Velarized => "ˠ",
            Pharyngealized => "ˤ",
            Glottalized => "ˀ",
            MoreRounded => "\u{339}",
            LessRounded => "\u{31C}",
            Advanced => "\u{31F}",
            Retracted => "\u{320}",
            Centralized => "\u{308}",
            MidCentralized => "\u{33D}",
            Voiceless => "\u{325}",
            Voiced => "\u{32C}",
            BreathyVoiced => "\u{324}",
            CreakyVoiced => "\u{330}",
            Aspirated => "ʰ",
            Nasalized => "\u{303}",
            NasalRelease => "ⁿ",
            LateralRelease => "ˡ",
            NoAudibleRelease => "\u{31A}",
            AdvancedTongueRoot => "\u{318}",
            RetractedTongueRoot => "\u{319}",
            Raised => "\u{31D}",
            Lowered => "\u{31E}",
            Syllabic => "\u{329}",
            NonSyllabic => "\u{32F}",
            PrimaryStress => "ˈ",
            SecondaryStress => "ˌ",
            Long => "ː",
            HalfLong => "ˑ",
            ExtraShort => "\u{306}",
            Linking => "‿",
            MinorGroup => "|",
            MajorGroup => "‖",
            SyllableBreak => ".",
            ToneExtraHigh => "˥",
            ToneHigh => "˦",
            ToneMid => "˧",
            ToneLow => "˨",
            ToneExtraLow => "˩",
            ToneRising => "˩˥",
            ToneFalling => "˥˩",
            ToneHighFalling => "˥˧˩",
            ToneLowRising => "˩˨˧",
            ToneRisingFalling => "˧˥˧",
            ToneFallingRising => "˥˩˦",
        }
    }

    /// Which editor slot this token belongs to.
    pub const fn kind(self) -> TokenKind {
        use DiacriticCategory as D;
        use ModificationToken::*;
        use SuprasegmentalCategory as S;
        match self {
            Dental | Apical | Laminal => TokenKind::Diacritic(D::ArticulationPlace),
            Labialized | Palatalized | Velarized | Pharyngealized => {
                TokenKind::Diacritic(D::SecondaryArticulation)
            }
            MoreRounded | LessRounded => TokenKind::Diacritic(D::Roundness),
            Advanced | Retracted | Centralized | MidCentralized => {
                TokenKind::Diacritic(D::TonguePosition)
            }
            Voiceless | Voiced | BreathyVoiced | CreakyVoiced => {
                TokenKind::Diacritic(D::Phonation)
            }
            Raised | Lowered => TokenKind::Diacritic(D::TongueHeight),
            AdvancedTongueRoot | RetractedTongueRoot => TokenKind::Diacritic(D::TongueRoot),
            NasalRelease | LateralRelease | NoAudibleRelease => TokenKind::Diacritic(D::Release),
            Syllabic | NonSyllabic => TokenKind::Diacritic(D::Syllabicity),
            Linguolabial | Glottalized | Aspirated | Nasalized => TokenKind::CombinableDiacritic,
            Long | HalfLong | ExtraShort => TokenKind::Suprasegmental(S::Length),
            PrimaryStress | SecondaryStress => TokenKind::Suprasegmental(S::Stress),
            MinorGroup | MajorGroup | SyllableBreak => TokenKind::Suprasegmental(S::Breaks),
            Linking => TokenKind::CombinableSuprasegmental,
            ToneExtraHigh | ToneHigh | ToneMid | ToneLow | ToneExtraLow => TokenKind::ToneLevel,
            ToneRising | ToneFalling | ToneHighFalling | ToneLowRising | ToneRisingFalling
            | ToneFallingRising => TokenKind::ToneContour,
        }
    }
}

const _: () = assert!(ModificationToken::ALL.len() <= u64::BITS as usize);

impl fmt::Display for ModificationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for ModificationToken {
    type Err = UnknownToken;

    /// Case-insensitive; spaces and underscores are accepted in place of
    /// hyphens.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '_' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        ModificationToken::ALL
            .into_iter()
            .find(|t| t.value() == normalized)
            .ok_or_else(|| UnknownToken(s.to_string()))
    }
}

impl TryFrom<String> for ModificationToken {
    type Error = UnknownToken;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ModificationToken> for &'static str {
    fn from(token: ModificationToken) -> Self {
        token.value()
    }
}

/// Bitset over [`ModificationToken`].
///
/// Bits above the last token are carried through untouched, so a word decoded
/// from a newer identifier survives a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[repr(transparent)]
pub struct ModificationFlags(u64);

impl ModificationFlags {
    /// No modification.
    pub const EMPTY: ModificationFlags = ModificationFlags(0);

    /// Wrap a raw word.
    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        ModificationFlags(bits)
    }

    /// The raw word.
    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Whether no bit is set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether `token` is set.
    #[inline]
    pub const fn contains(self, token: ModificationToken) -> bool {
        self.0 & token.bit() != 0
    }

    /// Copy with `token` set.
    #[inline]
    pub const fn with(self, token: ModificationToken) -> Self {
        ModificationFlags(self.0 | token.bit())
    }

    /// Copy with `token` cleared.
    #[inline]
    pub const fn without(self, token: ModificationToken) -> Self {
        ModificationFlags(self.0 & !token.bit())
    }

    /// Set tokens, in bit order.
    pub fn tokens(self) -> impl Iterator<Item = ModificationToken> {
        ModificationToken::ALL
            .into_iter()
            .filter(move |t| self.contains(*t))
    }
}

impl FromIterator<ModificationToken> for ModificationFlags {
    fn from_iter<I: IntoIterator<Item = ModificationToken>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ModificationFlags::EMPTY, |acc, t| acc.with(t))
    }
}

impl From<ModificationToken> for ModificationFlags {
    fn from(token: ModificationToken) -> Self {
        ModificationFlags(token.bit())
    }
}

impl BitOr for ModificationFlags {
    type Output = ModificationFlags;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        ModificationFlags(self.0 | rhs.0)
    }
}

impl BitOr<ModificationToken> for ModificationFlags {
    type Output = ModificationFlags;
    #[inline]
    fn bitor(self, rhs: ModificationToken) -> Self {
        self.with(rhs)
    }
}

impl BitOrAssign<ModificationToken> for ModificationFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: ModificationToken) {
        self.0 |= rhs.bit();
    }
}

impl BitAnd for ModificationFlags {
    type Output = ModificationFlags;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        ModificationFlags(self.0 & rhs.0)
    }
}

impl Not for ModificationFlags {
    type Output = ModificationFlags;
    #[inline]
    fn not(self) -> Self {
        ModificationFlags(!self.0)
    }
}

impl fmt::Display for ModificationFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_are_unique_and_ordered() {
        for (i, token) in ModificationToken::ALL.iter().enumerate() {
            assert_eq!(token.index(), i as u32);
        }
        let all: ModificationFlags = ModificationToken::ALL.into_iter().collect();
        assert_eq!(all.bits().count_ones() as usize, ModificationToken::ALL.len());
    }

    #[test]
    fn test_values_round_trip_through_from_str() {
        for token in ModificationToken::ALL {
            assert_eq!(token.value().parse::<ModificationToken>(), Ok(token));
        }
    }

    #[test]
    fn test_from_str_is_lenient() {
        assert_eq!(
            "Breathy Voiced".parse::<ModificationToken>(),
            Ok(ModificationToken::BreathyVoiced)
        );
        assert_eq!(
            "primary_stress".parse::<ModificationToken>(),
            Ok(ModificationToken::PrimaryStress)
        );
        assert!("whistled".parse::<ModificationToken>().is_err());
    }

    #[test]
    fn test_order_tables_cover_their_kinds() {
        let diacritics = ModificationToken::ALL.into_iter().filter(|t| {
            matches!(t.kind(), TokenKind::Diacritic(_) | TokenKind::CombinableDiacritic)
        });
        assert_eq!(diacritics.count(), ModificationToken::DIACRITIC_ORDER.len());

        let supras = ModificationToken::ALL.into_iter().filter(|t| {
            matches!(
                t.kind(),
                TokenKind::Suprasegmental(_) | TokenKind::CombinableSuprasegmental
            )
        });
        assert_eq!(supras.count(), ModificationToken::SUPRASEGMENTAL_ORDER.len());

        for t in ModificationToken::TONE_LEVELS {
            assert_eq!(t.kind(), TokenKind::ToneLevel);
        }
        for t in ModificationToken::TONE_CONTOURS {
            assert_eq!(t.kind(), TokenKind::ToneContour);
        }
    }

    #[test]
    fn test_flags_operations() {
        let flags = ModificationFlags::EMPTY | ModificationToken::Aspirated;
        assert!(flags.contains(ModificationToken::Aspirated));
        assert!(!flags.contains(ModificationToken::Long));
        assert_eq!(flags.without(ModificationToken::Aspirated), ModificationFlags::EMPTY);
        assert_eq!(
            flags.tokens().collect::<Vec<_>>(),
            vec![ModificationToken::Aspirated]
        );
    }
}
