//! Distinctive features and the 32-bit feature vector.
//!
//! Every phonological segment is described by 32 binary distinctive features
//! packed into a single `u32`. Bit `i` is set when the segment carries the
//! feature with index `i`, so natural classes, rule triggers and rule outputs
//! are all plain bitmask operations.
//!
//! The bit positions are part of the persisted format and must never be
//! renumbered.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, Not};

/// Conceptual grouping of the distinctive features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureGroup {
    /// consonantal, syllabic, sonorant, voice, continuant, nasal
    MajorClass,
    /// labial, coronal, dorsal, anterior, distributed
    Place,
    /// spread/constricted glottis, stiff/slack vocal cords
    Laryngeal,
    /// strident, lateral, delayed release, trill
    Manner,
    /// high, low, back, round, ATR, tense
    Vowel,
    /// level and contour tones
    Tone,
    /// stress, length
    Suprasegmental,
}

impl FeatureGroup {
    /// All features of this group as one mask.
    pub fn mask(self) -> FeatureVector {
        PhoneticFeature::ALL
            .into_iter()
            .filter(|f| f.group() == self)
            .fold(FeatureVector::EMPTY, |acc, f| acc | f)
    }
}

/// A binary distinctive feature.
///
/// The discriminant is the bit index inside a [`FeatureVector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
#[repr(u8)]
pub enum PhoneticFeature {
    /// Constriction in the oral cavity.
    Consonantal = 0,
    /// Forms a syllable nucleus.
    Syllabic = 1,
    /// Spontaneous voicing (vowels, nasals, liquids, glides).
    Sonorant = 2,
    /// Vocal fold vibration.
    Voice = 3,
    /// Continuous airflow through the oral cavity.
    Continuant = 4,
    /// Lowered velum.
    Nasal = 5,
    /// Articulated with the lips.
    Labial = 6,
    /// Articulated with the tongue tip or blade.
    Coronal = 7,
    /// Articulated with the tongue body.
    Dorsal = 8,
    /// In front of the palato-alveolar region.
    Anterior = 9,
    /// Extended constriction area.
    Distributed = 10,
    /// Open glottis (aspiration, voicelessness).
    SpreadGlottis = 11,
    /// Constricted glottis (ejectives, implosives, glottal stop).
    ConstrictedGlottis = 12,
    /// Tense phonation.
    StiffVocalCords = 13,
    /// Lax phonation, breathy voice.
    SlackVocalCords = 14,
    /// High-amplitude turbulent noise (sibilants).
    Strident = 15,
    /// Airflow around the side of the tongue.
    Lateral = 16,
    /// Slow release (affricates).
    DelayedRelease = 17,
    /// Rapid vibration.
    Trill = 18,
    /// Raised tongue body.
    High = 19,
    /// Lowered tongue body.
    Low = 20,
    /// Retracted tongue body.
    Back = 21,
    /// Rounded lips.
    Round = 22,
    /// Advanced tongue root.
    Atr = 23,
    /// Greater muscular effort, peripheral vowels.
    Tense = 24,
    /// High level tone.
    ToneHigh = 25,
    /// Low level tone.
    ToneLow = 26,
    /// Rising contour tone.
    ToneRising = 27,
    /// Falling contour tone.
    ToneFalling = 28,
    /// Complex contour tone (rising-falling, falling-rising).
    ToneContour = 29,
    /// Primary or secondary stress.
    Stress = 30,
    /// Lengthened duration.
    Long = 31,
}

impl PhoneticFeature {
    /// Every feature, in bit order.
    pub const ALL: [PhoneticFeature; 32] = [
        PhoneticFeature::Consonantal,
        PhoneticFeature::Syllabic,
        PhoneticFeature::Sonorant,
        PhoneticFeature::Voice,
        PhoneticFeature::Continuant,
        PhoneticFeature::Nasal,
        PhoneticFeature::Labial,
        PhoneticFeature::Coronal,
        PhoneticFeature::Dorsal,
        PhoneticFeature::Anterior,
        PhoneticFeature::Distributed,
        PhoneticFeature::SpreadGlottis,
        PhoneticFeature::ConstrictedGlottis,
        PhoneticFeature::StiffVocalCords,
        PhoneticFeature::SlackVocalCords,
        PhoneticFeature::Strident,
        PhoneticFeature::Lateral,
        PhoneticFeature::DelayedRelease,
        PhoneticFeature::Trill,
        PhoneticFeature::High,
        PhoneticFeature::Low,
        PhoneticFeature::Back,
        PhoneticFeature::Round,
        PhoneticFeature::Atr,
        PhoneticFeature::Tense,
        PhoneticFeature::ToneHigh,
        PhoneticFeature::ToneLow,
        PhoneticFeature::ToneRising,
        PhoneticFeature::ToneFalling,
        PhoneticFeature::ToneContour,
        PhoneticFeature::Stress,
        PhoneticFeature::Long,
    ];

    /// Bit index of this feature.
    #[inline]
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// Single-bit mask of this feature.
    #[inline]
    pub const fn bit(self) -> u32 {
        1 << (self as u32)
    }

    /// Canonical human-readable name, as written inside feature bundles.
    pub const fn name(self) -> &'static str {
        match self {
            PhoneticFeature::Consonantal => "consonantal",
            PhoneticFeature::Syllabic => "syllabic",
            PhoneticFeature::Sonorant => "sonorant",
            PhoneticFeature::Voice => "voice",
            PhoneticFeature::Continuant => "continuant",
            PhoneticFeature::Nasal => "nasal",
            PhoneticFeature::Labial => "labial",
            PhoneticFeature::Coronal => "coronal",
            PhoneticFeature::Dorsal => "dorsal",
            PhoneticFeature::Anterior => "anterior",
            PhoneticFeature::Distributed => "distributed",
            PhoneticFeature::SpreadGlottis => "spread glottis",
            PhoneticFeature::ConstrictedGlottis => "constricted glottis",
            PhoneticFeature::StiffVocalCords => "stiff vocal cords",
            PhoneticFeature::SlackVocalCords => "slack vocal cords",
            PhoneticFeature::Strident => "strident",
            PhoneticFeature::Lateral => "lateral",
            PhoneticFeature::DelayedRelease => "delayed release",
            PhoneticFeature::Trill => "trill",
            PhoneticFeature::High => "high",
            PhoneticFeature::Low => "low",
            PhoneticFeature::Back => "back",
            PhoneticFeature::Round => "round",
            PhoneticFeature::Atr => "ATR",
            PhoneticFeature::Tense => "tense",
            PhoneticFeature::ToneHigh => "tone: high",
            PhoneticFeature::ToneLow => "tone: low",
            PhoneticFeature::ToneRising => "tone: rising",
            PhoneticFeature::ToneFalling => "tone: falling",
            PhoneticFeature::ToneContour => "tone: contour",
            PhoneticFeature::Stress => "stress",
            PhoneticFeature::Long => "long",
        }
    }

    /// The group this feature belongs to.
    pub const fn group(self) -> FeatureGroup {
        match self as u8 {
            0..=5 => FeatureGroup::MajorClass,
            6..=10 => FeatureGroup::Place,
            11..=14 => FeatureGroup::Laryngeal,
            15..=18 => FeatureGroup::Manner,
            19..=24 => FeatureGroup::Vowel,
            25..=29 => FeatureGroup::Tone,
            _ => FeatureGroup::Suprasegmental,
        }
    }
}

impl fmt::Display for PhoneticFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A segment's distinctive features packed into 32 bits.
///
/// Kept distinct from [`ModificationFlags`](crate::modifiers::ModificationFlags)
/// so that a diacritic flag can never be tested against a feature mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[repr(transparent)]
pub struct FeatureVector(u32);

impl FeatureVector {
    /// The vector with no feature set.
    pub const EMPTY: FeatureVector = FeatureVector(0);

    /// Wrap a raw word.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        FeatureVector(bits)
    }

    /// The raw word.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Build a vector from a list of features.
    pub const fn from_features(features: &[PhoneticFeature]) -> Self {
        let mut bits = 0u32;
        let mut i = 0;
        while i < features.len() {
            bits |= features[i].bit();
            i += 1;
        }
        FeatureVector(bits)
    }

    /// Union of two vectors, usable in `const` contexts.
    #[inline]
    pub const fn union(self, other: FeatureVector) -> Self {
        FeatureVector(self.0 | other.0)
    }

    /// Whether no feature is set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether `feature` is set.
    #[inline]
    pub const fn contains(self, feature: PhoneticFeature) -> bool {
        self.0 & feature.bit() != 0
    }

    /// Whether every bit of `other` is also set in `self`.
    #[inline]
    pub const fn contains_all(self, other: FeatureVector) -> bool {
        self.0 & other.0 == other.0
    }

    /// Copy with `feature` set.
    #[inline]
    pub const fn with(self, feature: PhoneticFeature) -> Self {
        FeatureVector(self.0 | feature.bit())
    }

    /// Copy with `feature` cleared.
    #[inline]
    pub const fn without(self, feature: PhoneticFeature) -> Self {
        FeatureVector(self.0 & !feature.bit())
    }

    /// Set or clear `feature` depending on `present`.
    #[inline]
    pub const fn set(self, feature: PhoneticFeature, present: bool) -> Self {
        if present {
            self.with(feature)
        } else {
            self.without(feature)
        }
    }

    /// `(self | add) & !remove`
    #[inline]
    pub const fn modify(self, add: FeatureVector, remove: FeatureVector) -> Self {
        FeatureVector((self.0 | add.0) & !remove.0)
    }

    /// Number of features set.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Number of differing features between two vectors.
    #[inline]
    pub const fn hamming_distance(self, other: FeatureVector) -> u32 {
        (self.0 ^ other.0).count_ones()
    }

    /// Iterate the features set in this vector, in bit order.
    pub fn features(self) -> impl Iterator<Item = PhoneticFeature> {
        PhoneticFeature::ALL
            .into_iter()
            .filter(move |f| self.contains(*f))
    }
}

impl From<PhoneticFeature> for FeatureVector {
    #[inline]
    fn from(feature: PhoneticFeature) -> Self {
        FeatureVector(feature.bit())
    }
}

impl From<u32> for FeatureVector {
    #[inline]
    fn from(bits: u32) -> Self {
        FeatureVector(bits)
    }
}

impl From<FeatureVector> for u32 {
    #[inline]
    fn from(v: FeatureVector) -> Self {
        v.0
    }
}

impl BitOr for FeatureVector {
    type Output = FeatureVector;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        FeatureVector(self.0 | rhs.0)
    }
}

impl BitOr<PhoneticFeature> for FeatureVector {
    type Output = FeatureVector;
    #[inline]
    fn bitor(self, rhs: PhoneticFeature) -> Self {
        self.with(rhs)
    }
}

impl BitOr for PhoneticFeature {
    type Output = FeatureVector;
    #[inline]
    fn bitor(self, rhs: Self) -> FeatureVector {
        FeatureVector(self.bit() | rhs.bit())
    }
}

impl BitOr<FeatureVector> for PhoneticFeature {
    type Output = FeatureVector;
    #[inline]
    fn bitor(self, rhs: FeatureVector) -> FeatureVector {
        rhs.with(self)
    }
}

impl BitOrAssign for FeatureVector {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitOrAssign<PhoneticFeature> for FeatureVector {
    #[inline]
    fn bitor_assign(&mut self, rhs: PhoneticFeature) {
        self.0 |= rhs.bit();
    }
}

impl BitAnd for FeatureVector {
    type Output = FeatureVector;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        FeatureVector(self.0 & rhs.0)
    }
}

impl BitAndAssign for FeatureVector {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitXor for FeatureVector {
    type Output = FeatureVector;
    #[inline]
    fn bitxor(self, rhs: Self) -> Self {
        FeatureVector(self.0 ^ rhs.0)
    }
}

impl Not for FeatureVector {
    type Output = FeatureVector;
    #[inline]
    fn not(self) -> Self {
        FeatureVector(!self.0)
    }
}

impl Not for PhoneticFeature {
    type Output = FeatureVector;
    #[inline]
    fn not(self) -> FeatureVector {
        FeatureVector(!self.bit())
    }
}

/// Renders the vector as a bundle of its positive features,
/// e.g. `[+consonantal, +coronal]`.
impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, feature) in self.features().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "+{}", feature.name())?;
        }
        f.write_str("]")
    }
}

impl fmt::Binary for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032b}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_follow_declaration_order() {
        for (i, feature) in PhoneticFeature::ALL.iter().enumerate() {
            assert_eq!(feature.index(), i as u32);
            assert_eq!(feature.bit(), 1u32 << i);
        }
        assert_eq!(PhoneticFeature::Long.bit(), 1u32 << 31);
    }

    #[test]
    fn test_groups() {
        assert_eq!(PhoneticFeature::Nasal.group(), FeatureGroup::MajorClass);
        assert_eq!(PhoneticFeature::Labial.group(), FeatureGroup::Place);
        assert_eq!(PhoneticFeature::SpreadGlottis.group(), FeatureGroup::Laryngeal);
        assert_eq!(PhoneticFeature::Trill.group(), FeatureGroup::Manner);
        assert_eq!(PhoneticFeature::Tense.group(), FeatureGroup::Vowel);
        assert_eq!(PhoneticFeature::ToneContour.group(), FeatureGroup::Tone);
        assert_eq!(PhoneticFeature::Long.group(), FeatureGroup::Suprasegmental);

        assert_eq!(FeatureGroup::Place.mask().count(), 5);
        assert_eq!(FeatureGroup::Vowel.mask().count(), 6);
        assert_eq!(FeatureGroup::Tone.mask().count(), 5);
    }

    #[test]
    fn test_operators() {
        let v = PhoneticFeature::Consonantal | PhoneticFeature::Coronal;
        assert!(v.contains(PhoneticFeature::Coronal));
        assert!(!v.contains(PhoneticFeature::Voice));

        let w = v | PhoneticFeature::Voice;
        assert_eq!(w.count(), 3);
        assert_eq!((w & !PhoneticFeature::Voice), v);
        assert_eq!(v.hamming_distance(w), 1);
    }

    #[test]
    fn test_modify_removes_after_adding() {
        let v = FeatureVector::from(PhoneticFeature::Voice);
        let out = v.modify(
            PhoneticFeature::SpreadGlottis.into(),
            PhoneticFeature::Voice.into(),
        );
        assert_eq!(out, FeatureVector::from(PhoneticFeature::SpreadGlottis));

        // A bit in both add and remove ends up cleared.
        let both = FeatureVector::from(PhoneticFeature::Nasal);
        assert_eq!(FeatureVector::EMPTY.modify(both, both), FeatureVector::EMPTY);
    }

    #[test]
    fn test_display() {
        let v = PhoneticFeature::Consonantal | PhoneticFeature::SpreadGlottis;
        assert_eq!(v.to_string(), "[+consonantal, +spread glottis]");
        assert_eq!(FeatureVector::EMPTY.to_string(), "[]");
    }

    #[test]
    fn test_binary_is_zero_padded() {
        let v = FeatureVector::from(PhoneticFeature::Consonantal);
        let s = format!("{:b}", v);
        assert_eq!(s.len(), 32);
        assert!(s.ends_with('1'));
    }
}
