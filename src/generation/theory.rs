// Copyright (c) 2024 Mike Tsao

//! Scale, chord, and harmonic-degree vocabulary. Everything here is a fixed
//! interval table; pitches come out when a caller supplies a tonic or root.

use crate::{error::EtudeError, types::MidiPitch};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, IntoStaticStr};

/// [ScaleKind] enumerates the scale flavors the trainer can build exercises
/// from, each as semitone intervals above the tonic.
#[derive(
    Clone, Copy, Debug, Default, EnumIter, Eq, Hash, IntoStaticStr, PartialEq, Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScaleKind {
    #[allow(missing_docs)]
    #[default]
    Major,
    #[allow(missing_docs)]
    NaturalMinor,
    #[allow(missing_docs)]
    HarmonicMinor,
    #[allow(missing_docs)]
    MelodicMinor,
}
impl ScaleKind {
    /// How many degrees every scale here has.
    pub const DEGREES: usize = 7;

    /// Semitone offsets from the tonic, one per degree.
    pub const fn intervals(&self) -> [u8; Self::DEGREES] {
        match self {
            ScaleKind::Major => [0, 2, 4, 5, 7, 9, 11],
            ScaleKind::NaturalMinor => [0, 2, 3, 5, 7, 8, 10],
            ScaleKind::HarmonicMinor => [0, 2, 3, 5, 7, 8, 11],
            ScaleKind::MelodicMinor => [0, 2, 3, 5, 7, 9, 11],
        }
    }

    /// The seven scale pitches starting at the given tonic, or None if any
    /// degree would leave the MIDI key space.
    pub fn pitches(&self, tonic: MidiPitch) -> Option<Vec<MidiPitch>> {
        self.intervals()
            .iter()
            .map(|interval| tonic.transpose(*interval as i16))
            .collect()
    }

    /// The identifier, e.g. "harmonic_minor".
    pub fn name(&self) -> &'static str {
        (*self).into()
    }
}
impl fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
impl FromStr for ScaleKind {
    type Err = EtudeError;

    // "minor" is accepted as shorthand for the natural minor.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(ScaleKind::Major),
            "minor" | "natural_minor" => Ok(ScaleKind::NaturalMinor),
            "harmonic_minor" => Ok(ScaleKind::HarmonicMinor),
            "melodic_minor" => Ok(ScaleKind::MelodicMinor),
            _ => Err(EtudeError::InvalidConfig(format!(
                "unrecognized scale {s:?}"
            ))),
        }
    }
}

/// [ChordQuality] enumerates the chord flavors the trainer can stack, each as
/// semitone intervals above the root.
#[derive(
    Clone, Copy, Debug, Default, EnumIter, Eq, Hash, IntoStaticStr, PartialEq, Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChordQuality {
    #[allow(missing_docs)]
    #[default]
    Major,
    #[allow(missing_docs)]
    Minor,
    #[allow(missing_docs)]
    Diminished,
    #[allow(missing_docs)]
    Augmented,
    #[allow(missing_docs)]
    MajorSeventh,
    #[allow(missing_docs)]
    MinorSeventh,
    #[allow(missing_docs)]
    DominantSeventh,
}
impl ChordQuality {
    /// Semitone offsets from the root, lowest first. Triads have three,
    /// sevenths four.
    pub const fn intervals(&self) -> &'static [u8] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Diminished => &[0, 3, 6],
            ChordQuality::Augmented => &[0, 4, 8],
            ChordQuality::MajorSeventh => &[0, 4, 7, 11],
            ChordQuality::MinorSeventh => &[0, 3, 7, 10],
            ChordQuality::DominantSeventh => &[0, 4, 7, 10],
        }
    }

    /// The chord tones built on the given root, or None if any tone would
    /// leave the MIDI key space.
    pub fn pitches(&self, root: MidiPitch) -> Option<Vec<MidiPitch>> {
        self.intervals()
            .iter()
            .map(|interval| root.transpose(*interval as i16))
            .collect()
    }

    /// The identifier, e.g. "dominant_seventh".
    pub fn name(&self) -> &'static str {
        (*self).into()
    }
}
impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
impl FromStr for ChordQuality {
    type Err = EtudeError;

    // Short jazz-chart spellings are accepted alongside the full names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" | "maj" => Ok(ChordQuality::Major),
            "minor" | "min" => Ok(ChordQuality::Minor),
            "diminished" | "dim" => Ok(ChordQuality::Diminished),
            "augmented" | "aug" => Ok(ChordQuality::Augmented),
            "major_seventh" | "maj7" => Ok(ChordQuality::MajorSeventh),
            "minor_seventh" | "min7" => Ok(ChordQuality::MinorSeventh),
            "dominant_seventh" | "dom7" | "7" => Ok(ChordQuality::DominantSeventh),
            _ => Err(EtudeError::InvalidConfig(format!(
                "unrecognized chord quality {s:?}"
            ))),
        }
    }
}

/// [RomanNumeral] is one step of a harmonic progression: a scale degree
/// (I through VII) whose case carries the triad quality, uppercase for major
/// and lowercase for minor. "I IV V I" and "i iv V i" are different music.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RomanNumeral {
    degree: u8,
    minor: bool,
}
impl RomanNumeral {
    const UPPER: [&'static str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];
    const LOWER: [&'static str; 7] = ["i", "ii", "iii", "iv", "v", "vi", "vii"];
    const OFFSETS: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

    /// Creates a numeral from a degree in 1..=7.
    pub fn new_with(degree: u8, minor: bool) -> Result<Self, EtudeError> {
        if (1..=7).contains(&degree) {
            Ok(Self { degree, minor })
        } else {
            Err(EtudeError::InvalidConfig(format!(
                "scale degree {degree} isn't within 1..=7"
            )))
        }
    }

    /// The scale degree, 1..=7.
    pub fn degree(&self) -> u8 {
        self.degree
    }

    /// True for lowercase numerals.
    pub fn is_minor(&self) -> bool {
        self.minor
    }

    /// The triad quality the numeral's case implies.
    pub fn quality(&self) -> ChordQuality {
        if self.minor {
            ChordQuality::Minor
        } else {
            ChordQuality::Major
        }
    }

    /// Semitone offset of this degree's root above the tonic.
    pub fn semitone_offset(&self) -> u8 {
        // Indexing is safe because every constructor validates 1..=7.
        Self::OFFSETS[(self.degree - 1) as usize]
    }
}
impl fmt::Display for RomanNumeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = if self.minor {
            &Self::LOWER
        } else {
            &Self::UPPER
        };
        f.write_str(table[(self.degree - 1) as usize])
    }
}
impl FromStr for RomanNumeral {
    type Err = EtudeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for degree in 1..=7u8 {
            let index = (degree - 1) as usize;
            if s == Self::UPPER[index] {
                return Ok(Self {
                    degree,
                    minor: false,
                });
            }
            if s == Self::LOWER[index] {
                return Ok(Self {
                    degree,
                    minor: true,
                });
            }
        }
        Err(EtudeError::InvalidConfig(format!(
            "unrecognized roman numeral {s:?}"
        )))
    }
}
impl TryFrom<String> for RomanNumeral {
    type Error = EtudeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
impl From<RomanNumeral> for String {
    fn from(value: RomanNumeral) -> Self {
        value.to_string()
    }
}
