//! Static base-vector and modifier tables.
//!
//! Three tables feed [`compute_feature_vector`](super::compute_feature_vector):
//!
//! - consonant manner × place → base vector
//! - vowel height × backness → base vector
//! - modification token → `(add, remove)` masks
//!
//! Each is built once on first use and never mutated afterwards.
//!
//! # Invariants
//!
//! - Consonant cells carry no bit of the vowel group.
//! - Vowel cells carry no bit of the place group.
//! - Cells absent from a table (articulations judged impossible) resolve to
//!   [`FeatureVector::EMPTY`].

use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use super::vector::{FeatureVector, PhoneticFeature, PhoneticFeature::*};
use crate::modifiers::ModificationToken;

// ============================================================================
// Articulation axes
// ============================================================================

/// Lower-case, trim, and fold `' '`/`'_'` to `'-'` so that `"Lateral
/// approximant"`, `"lateral_approximant"` and `"lateral-approximant"` agree.
fn normalize_axis(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            ' ' | '_' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Consonant manner of articulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Manner {
    Plosive,
    Nasal,
    Trill,
    Tap,
    Fricative,
    LateralFricative,
    Approximant,
    LateralApproximant,
    Affricate,
}

impl Manner {
    /// Parse a manner name; `None` for anything unrecognized.
    pub fn parse(s: &str) -> Option<Self> {
        Some(match normalize_axis(s).as_str() {
            "plosive" | "stop" => Manner::Plosive,
            "nasal" => Manner::Nasal,
            "trill" => Manner::Trill,
            "tap" | "flap" | "tap-or-flap" => Manner::Tap,
            "fricative" => Manner::Fricative,
            "lateral-fricative" => Manner::LateralFricative,
            "approximant" => Manner::Approximant,
            "lateral-approximant" => Manner::LateralApproximant,
            "affricate" => Manner::Affricate,
            _ => return None,
        })
    }

    const fn base(self) -> FeatureVector {
        match self {
            Manner::Plosive => FeatureVector::from_features(&[Consonantal]),
            Manner::Nasal => FeatureVector::from_features(&[Consonantal, Sonorant, Voice, Nasal]),
            Manner::Trill => {
                FeatureVector::from_features(&[Consonantal, Sonorant, Voice, Continuant, Trill])
            }
            Manner::Tap => FeatureVector::from_features(&[Consonantal, Sonorant, Voice]),
            Manner::Fricative => FeatureVector::from_features(&[Consonantal, Continuant]),
            Manner::LateralFricative => {
                FeatureVector::from_features(&[Consonantal, Continuant, Lateral])
            }
            Manner::Approximant => FeatureVector::from_features(&[Sonorant, Voice, Continuant]),
            Manner::LateralApproximant => FeatureVector::from_features(&[
                Consonantal,
                Sonorant,
                Voice,
                Continuant,
                Lateral,
            ]),
            Manner::Affricate => FeatureVector::from_features(&[Consonantal, DelayedRelease]),
        }
    }
}

/// Consonant place of articulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Place {
    Bilabial,
    Labiodental,
    Dental,
    Alveolar,
    Postalveolar,
    Retroflex,
    Palatal,
    Velar,
    Uvular,
    Pharyngeal,
    Glottal,
    LabioVelar,
}

impl Place {
    /// Parse a place name; `None` for anything unrecognized.
    pub fn parse(s: &str) -> Option<Self> {
        Some(match normalize_axis(s).as_str() {
            "bilabial" => Place::Bilabial,
            "labiodental" | "labio-dental" => Place::Labiodental,
            "dental" => Place::Dental,
            "alveolar" => Place::Alveolar,
            "postalveolar" | "post-alveolar" | "palato-alveolar" => Place::Postalveolar,
            "retroflex" => Place::Retroflex,
            "palatal" => Place::Palatal,
            "velar" => Place::Velar,
            "uvular" => Place::Uvular,
            "pharyngeal" | "epiglottal" => Place::Pharyngeal,
            "glottal" => Place::Glottal,
            "labio-velar" | "labiovelar" | "labial-velar" => Place::LabioVelar,
            _ => return None,
        })
    }

    const fn base(self) -> FeatureVector {
        match self {
            Place::Bilabial => FeatureVector::from_features(&[Labial, Distributed]),
            Place::Labiodental => FeatureVector::from_features(&[Labial]),
            Place::Dental => FeatureVector::from_features(&[Coronal, Anterior, Distributed]),
            Place::Alveolar => FeatureVector::from_features(&[Coronal, Anterior]),
            Place::Postalveolar => FeatureVector::from_features(&[Coronal, Distributed]),
            Place::Retroflex => FeatureVector::from_features(&[Coronal]),
            Place::Palatal => FeatureVector::from_features(&[Coronal, Dorsal, Distributed]),
            Place::Velar => FeatureVector::from_features(&[Dorsal]),
            Place::Uvular => FeatureVector::from_features(&[Dorsal, Distributed]),
            // No oral articulator; the constriction is carried laryngeally.
            Place::Pharyngeal => FeatureVector::from_features(&[StiffVocalCords]),
            Place::Glottal => FeatureVector::EMPTY,
            Place::LabioVelar => FeatureVector::from_features(&[Labial, Dorsal]),
        }
    }

    /// Sibilant places: fricatives and affricates here are [+strident].
    const fn is_strident(self) -> bool {
        matches!(
            self,
            Place::Labiodental | Place::Alveolar | Place::Postalveolar | Place::Uvular
        )
    }
}

/// Vowel height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Height {
    Close,
    NearClose,
    CloseMid,
    Mid,
    OpenMid,
    NearOpen,
    Open,
}

impl Height {
    /// Parse a height name; `None` for anything unrecognized.
    pub fn parse(s: &str) -> Option<Self> {
        Some(match normalize_axis(s).as_str() {
            "close" | "high" => Height::Close,
            "near-close" | "near-high" => Height::NearClose,
            "close-mid" | "high-mid" => Height::CloseMid,
            "mid" => Height::Mid,
            "open-mid" | "low-mid" => Height::OpenMid,
            "near-open" | "near-low" => Height::NearOpen,
            "open" | "low" => Height::Open,
            _ => return None,
        })
    }

    // Mid has no feature of its own and shares close-mid's cell bits.
    const fn base(self) -> FeatureVector {
        match self {
            Height::Close => FeatureVector::from_features(&[High, Atr]),
            Height::NearClose => FeatureVector::from_features(&[High]),
            Height::CloseMid | Height::Mid => FeatureVector::from_features(&[Atr]),
            Height::OpenMid => FeatureVector::EMPTY,
            Height::NearOpen => FeatureVector::from_features(&[Low, Atr]),
            Height::Open => FeatureVector::from_features(&[Low]),
        }
    }
}

/// Vowel backness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backness {
    Front,
    Central,
    Back,
}

impl Backness {
    /// Parse a backness name; `None` for anything unrecognized.
    pub fn parse(s: &str) -> Option<Self> {
        Some(match normalize_axis(s).as_str() {
            "front" => Backness::Front,
            "central" | "centre" | "center" => Backness::Central,
            "back" => Backness::Back,
            _ => return None,
        })
    }

    // [+tense] marks the peripheral columns.
    const fn base(self) -> FeatureVector {
        match self {
            Backness::Front => FeatureVector::from_features(&[Tense]),
            Backness::Central => FeatureVector::EMPTY,
            Backness::Back => FeatureVector::from_features(&[Back, Tense]),
        }
    }
}

// ============================================================================
// Base tables
// ============================================================================

const VOWEL: FeatureVector = FeatureVector::from_features(&[Syllabic, Sonorant, Voice, Continuant]);

/// Attested consonant cells. Anything not listed is an impossible
/// articulation and maps to the zero vector.
const CONSONANT_CELLS: &[(Manner, &[Place])] = &[
    (
        Manner::Plosive,
        &[
            Place::Bilabial,
            Place::Dental,
            Place::Alveolar,
            Place::Retroflex,
            Place::Palatal,
            Place::Velar,
            Place::Uvular,
            Place::Glottal,
        ],
    ),
    (
        Manner::Nasal,
        &[
            Place::Bilabial,
            Place::Labiodental,
            Place::Dental,
            Place::Alveolar,
            Place::Retroflex,
            Place::Palatal,
            Place::Velar,
            Place::Uvular,
        ],
    ),
    (
        Manner::Trill,
        &[Place::Bilabial, Place::Dental, Place::Alveolar, Place::Uvular],
    ),
    (
        Manner::Tap,
        &[Place::Labiodental, Place::Alveolar, Place::Retroflex],
    ),
    (
        Manner::Fricative,
        &[
            Place::Bilabial,
            Place::Labiodental,
            Place::Dental,
            Place::Alveolar,
            Place::Postalveolar,
            Place::Retroflex,
            Place::Palatal,
            Place::Velar,
            Place::Uvular,
            Place::Pharyngeal,
            Place::Glottal,
            Place::LabioVelar,
        ],
    ),
    (Manner::LateralFricative, &[Place::Alveolar]),
    (
        Manner::Approximant,
        &[
            Place::Labiodental,
            Place::Alveolar,
            Place::Retroflex,
            Place::Palatal,
            Place::Velar,
            Place::LabioVelar,
        ],
    ),
    (
        Manner::LateralApproximant,
        &[
            Place::Alveolar,
            Place::Retroflex,
            Place::Palatal,
            Place::Velar,
        ],
    ),
    (
        Manner::Affricate,
        &[Place::Alveolar, Place::Postalveolar, Place::Retroflex],
    ),
];

fn consonant_cell(manner: Manner, place: Place) -> FeatureVector {
    match (manner, place) {
        // Glottals are [-consonantal].
        (Manner::Plosive, Place::Glottal) => FeatureVector::from_features(&[ConstrictedGlottis]),
        (Manner::Fricative, Place::Glottal) => FeatureVector::from_features(&[Continuant]),
        _ => {
            let mut v = manner.base() | place.base();
            if place.is_strident() && matches!(manner, Manner::Fricative | Manner::Affricate) {
                v |= Strident;
            }
            v
        }
    }
}

fn consonant_table() -> &'static FxHashMap<(Manner, Place), FeatureVector> {
    static TABLE: OnceLock<FxHashMap<(Manner, Place), FeatureVector>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = FxHashMap::default();
        for (manner, places) in CONSONANT_CELLS {
            for place in places.iter() {
                table.insert((*manner, *place), consonant_cell(*manner, *place));
            }
        }
        table
    })
}

fn vowel_table() -> &'static FxHashMap<(Height, Backness), FeatureVector> {
    const HEIGHTS: [Height; 7] = [
        Height::Close,
        Height::NearClose,
        Height::CloseMid,
        Height::Mid,
        Height::OpenMid,
        Height::NearOpen,
        Height::Open,
    ];
    const BACKNESS: [Backness; 3] = [Backness::Front, Backness::Central, Backness::Back];

    static TABLE: OnceLock<FxHashMap<(Height, Backness), FeatureVector>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = FxHashMap::default();
        for height in HEIGHTS {
            for backness in BACKNESS {
                table.insert((height, backness), VOWEL | height.base() | backness.base());
            }
        }
        table
    })
}

/// Base vector for a consonant cell; zero when the cell is absent.
pub fn consonant_base(manner: Manner, place: Place) -> FeatureVector {
    consonant_table()
        .get(&(manner, place))
        .copied()
        .unwrap_or(FeatureVector::EMPTY)
}

/// Base vector for a vowel cell; zero when the cell is absent.
pub fn vowel_base(height: Height, backness: Backness) -> FeatureVector {
    vowel_table()
        .get(&(height, backness))
        .copied()
        .unwrap_or(FeatureVector::EMPTY)
}

// ============================================================================
// Modifier table
// ============================================================================

/// Masks folded into a vector as `(v | add) & !remove`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifier {
    /// Bits to set.
    pub add: FeatureVector,
    /// Bits to clear. Applied after `add`.
    pub remove: FeatureVector,
}

impl Modifier {
    const fn new(add: &[PhoneticFeature], remove: &[PhoneticFeature]) -> Self {
        Modifier {
            add: FeatureVector::from_features(add),
            remove: FeatureVector::from_features(remove),
        }
    }

    /// Apply to a vector.
    #[inline]
    pub const fn apply(self, v: FeatureVector) -> FeatureVector {
        v.modify(self.add, self.remove)
    }
}

fn modifier_entry(token: ModificationToken) -> Option<Modifier> {
    use ModificationToken as T;
    let m = match token {
        T::Dental => Modifier::new(&[Coronal, Anterior, Distributed], &[]),
        T::Apical => Modifier::new(&[Coronal], &[Distributed]),
        T::Laminal => Modifier::new(&[Coronal, Distributed], &[]),
        T::Linguolabial => Modifier::new(&[Coronal, Labial], &[]),
        T::Labialized => Modifier::new(&[Labial, Round], &[]),
        T::Palatalized => Modifier::new(&[High], &[Back]),
        T::Velarized => Modifier::new(&[High, Back], &[]),
        T::Pharyngealized => Modifier::new(&[Low, Back], &[]),
        T::Glottalized => Modifier::new(&[ConstrictedGlottis], &[]),
        T::MoreRounded => Modifier::new(&[Round], &[]),
        T::LessRounded => Modifier::new(&[], &[Round]),
        T::Advanced => Modifier::new(&[], &[Back]),
        T::Retracted => Modifier::new(&[Back], &[]),
        T::Voiceless | T::Aspirated => Modifier::new(&[SpreadGlottis], &[Voice]),
        T::Voiced => Modifier::new(&[Voice], &[SpreadGlottis]),
        T::BreathyVoiced => {
            Modifier::new(&[Voice, SlackVocalCords], &[SpreadGlottis, StiffVocalCords])
        }
        T::CreakyVoiced => Modifier::new(
            &[Voice, ConstrictedGlottis, StiffVocalCords],
            &[SpreadGlottis],
        ),
        T::Nasalized | T::NasalRelease => Modifier::new(&[Nasal], &[]),
        T::LateralRelease => Modifier::new(&[Lateral], &[]),
        T::AdvancedTongueRoot => Modifier::new(&[Atr], &[]),
        T::RetractedTongueRoot => Modifier::new(&[], &[Atr]),
        T::Raised => Modifier::new(&[High], &[Low]),
        T::Lowered => Modifier::new(&[Low], &[High]),
        T::Syllabic => Modifier::new(&[Syllabic], &[]),
        T::NonSyllabic => Modifier::new(&[], &[Syllabic]),
        T::PrimaryStress | T::SecondaryStress => Modifier::new(&[Stress], &[]),
        T::Long | T::HalfLong => Modifier::new(&[Long], &[]),
        T::ExtraShort => Modifier::new(&[], &[Long]),
        T::ToneExtraHigh | T::ToneHigh => Modifier::new(&[ToneHigh], &[ToneLow]),
        T::ToneLow | T::ToneExtraLow => Modifier::new(&[ToneLow], &[ToneHigh]),
        T::ToneRising => Modifier::new(&[ToneRising], &[ToneFalling]),
        T::ToneFalling => Modifier::new(&[ToneFalling], &[ToneRising]),
        T::ToneHighFalling => Modifier::new(&[ToneContour, ToneFalling, ToneHigh], &[ToneRising]),
        T::ToneLowRising => Modifier::new(&[ToneContour, ToneRising, ToneLow], &[ToneFalling]),
        T::ToneRisingFalling | T::ToneFallingRising => {
            Modifier::new(&[ToneContour, ToneRising, ToneFalling], &[])
        }
        // Tokens with no featural correlate.
        T::Centralized
        | T::MidCentralized
        | T::NoAudibleRelease
        | T::ToneMid
        | T::Linking
        | T::MinorGroup
        | T::MajorGroup
        | T::SyllableBreak => return None,
    };
    Some(m)
}

fn modifier_table() -> &'static FxHashMap<ModificationToken, Modifier> {
    static TABLE: OnceLock<FxHashMap<ModificationToken, Modifier>> = OnceLock::new();
    TABLE.get_or_init(|| {
        ModificationToken::ALL
            .into_iter()
            .filter_map(|token| modifier_entry(token).map(|m| (token, m)))
            .collect()
    })
}

/// Modifier masks for a token, if the token has a featural correlate.
pub fn modifier(token: ModificationToken) -> Option<Modifier> {
    modifier_table().get(&token).copied()
}

/// Modifier masks for a token given by name. Unknown names yield `None`.
pub fn modifier_for(name: &str) -> Option<Modifier> {
    name.parse::<ModificationToken>().ok().and_then(modifier)
}
