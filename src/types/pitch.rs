// Copyright (c) 2024 Mike Tsao

//! Pitch vocabulary: chromatic pitch classes, note names, and MIDI key
//! numbers, all sharp-spelled and anchored at C4 = MIDI 60.

use crate::error::EtudeError;
use core::fmt;
use core::str::FromStr;
use derive_more::Display;
use midly::num::u7;
use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, FromRepr, IntoStaticStr};
use synonym::Synonym;

/// The twelve chromatic pitch classes. Accidentals are always spelled as
/// sharps; this crate has no notion of flat spellings or enharmonic keys.
#[derive(
    Clone, Copy, Debug, Default, EnumIter, Eq, FromRepr, Hash, IntoStaticStr, Ord, PartialEq,
    PartialOrd,
)]
pub enum PitchClass {
    #[allow(missing_docs)]
    #[default]
    #[strum(serialize = "C")]
    C = 0,
    #[allow(missing_docs)]
    #[strum(serialize = "C#")]
    Cs = 1,
    #[allow(missing_docs)]
    #[strum(serialize = "D")]
    D = 2,
    #[allow(missing_docs)]
    #[strum(serialize = "D#")]
    Ds = 3,
    #[allow(missing_docs)]
    #[strum(serialize = "E")]
    E = 4,
    #[allow(missing_docs)]
    #[strum(serialize = "F")]
    F = 5,
    #[allow(missing_docs)]
    #[strum(serialize = "F#")]
    Fs = 6,
    #[allow(missing_docs)]
    #[strum(serialize = "G")]
    G = 7,
    #[allow(missing_docs)]
    #[strum(serialize = "G#")]
    Gs = 8,
    #[allow(missing_docs)]
    #[strum(serialize = "A")]
    A = 9,
    #[allow(missing_docs)]
    #[strum(serialize = "A#")]
    As = 10,
    #[allow(missing_docs)]
    #[strum(serialize = "B")]
    B = 11,
}
impl PitchClass {
    /// The display name, e.g. "C#".
    pub fn name(&self) -> &'static str {
        (*self).into()
    }

    /// True for the seven white-key classes.
    pub const fn is_natural(&self) -> bool {
        !matches!(
            self,
            PitchClass::Cs | PitchClass::Ds | PitchClass::Fs | PitchClass::Gs | PitchClass::As
        )
    }

    /// The letter position within an octave (C=0, D=1 .. B=6). A sharp sits
    /// on the same letter as its natural, which is what makes staff placement
    /// diatonic: C#4 occupies C4's line.
    pub const fn letter_step(&self) -> usize {
        match self {
            PitchClass::C | PitchClass::Cs => 0,
            PitchClass::D | PitchClass::Ds => 1,
            PitchClass::E => 2,
            PitchClass::F | PitchClass::Fs => 3,
            PitchClass::G | PitchClass::Gs => 4,
            PitchClass::A | PitchClass::As => 5,
            PitchClass::B => 6,
        }
    }
}
impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A [PitchClass] plus an octave number, displaying as "C4" or "F#2".
/// Octaves follow scientific pitch notation with C4 = MIDI 60, so the piano
/// spans A0 through C8.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct NoteName {
    /// The chromatic class.
    pub class: PitchClass,
    /// The octave, which can be negative for sub-piano MIDI numbers.
    pub octave: i8,
}
impl NoteName {
    /// The MIDI key this name denotes, or an error if it lies outside MIDI's
    /// 0..=127 (for example "A9").
    pub fn to_pitch(&self) -> Result<MidiPitch, EtudeError> {
        let semitone = (self.octave as i16 + 1) * 12 + self.class as i16;
        if semitone >= MidiPitch::MIN.0 as i16 && semitone <= MidiPitch::MAX.0 as i16 {
            Ok(MidiPitch(semitone as u8))
        } else {
            Err(EtudeError::InvalidConfig(format!(
                "note {self} is outside the MIDI range"
            )))
        }
    }
}
impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class, self.octave)
    }
}
impl From<NoteName> for String {
    fn from(value: NoteName) -> Self {
        value.to_string()
    }
}
impl FromStr for NoteName {
    type Err = EtudeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || EtudeError::InvalidConfig(format!("unrecognized note name {s:?}"));
        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(bad)?;
        let rest = chars.as_str();
        let (sharp, octave_str) = match rest.strip_prefix('#') {
            Some(tail) => (true, tail),
            None => (false, rest),
        };
        let semitone = match (letter, sharp) {
            ('C', false) => 0,
            ('C', true) => 1,
            ('D', false) => 2,
            ('D', true) => 3,
            ('E', false) => 4,
            ('F', false) => 5,
            ('F', true) => 6,
            ('G', false) => 7,
            ('G', true) => 8,
            ('A', false) => 9,
            ('A', true) => 10,
            ('B', false) => 11,
            _ => return Err(bad()),
        };
        let octave = octave_str.parse::<i8>().map_err(|_| bad())?;
        Ok(Self {
            class: PitchClass::from_repr(semitone).unwrap_or_default(),
            octave,
        })
    }
}
impl TryFrom<String> for NoteName {
    type Error = EtudeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A MIDI key number. The full MIDI space is 0..=127, but the trainer cares
/// about the 88 piano keys, 21 (A0) through 108 (C8); operations that demand
/// a piano key say so and fail with [EtudeError::PitchOutOfRange] otherwise.
#[derive(Synonym, Serialize, Deserialize)]
#[synonym(skip(Display))]
pub struct MidiPitch(pub u8);
impl MidiPitch {
    /// The bottom of the MIDI key space.
    pub const MIN: MidiPitch = MidiPitch(0);
    /// The top of the MIDI key space.
    pub const MAX: MidiPitch = MidiPitch(127);
    /// The lowest piano key, A0.
    pub const PIANO_MIN: MidiPitch = MidiPitch(21);
    /// The highest piano key, C8.
    pub const PIANO_MAX: MidiPitch = MidiPitch(108);
    /// Middle C, the boundary between the bass and treble staves.
    pub const MIDDLE_C: MidiPitch = MidiPitch(60);

    /// Creates a [MidiPitch], insisting that it's one of the 88 piano keys.
    pub fn new_piano_key(value: u8) -> Result<Self, EtudeError> {
        let pitch = Self(value);
        if pitch.is_piano_key() {
            Ok(pitch)
        } else {
            Err(EtudeError::PitchOutOfRange(value))
        }
    }

    /// Whether this key exists on an 88-key piano.
    pub fn is_piano_key(&self) -> bool {
        (Self::PIANO_MIN..=Self::PIANO_MAX).contains(self)
    }

    /// The chromatic class of this key.
    pub fn pitch_class(&self) -> PitchClass {
        PitchClass::from_repr((self.0 % 12) as usize).unwrap_or_default()
    }

    /// The octave of this key, C4 = 60. MIDI 0..=11 land in octave -1.
    pub fn octave(&self) -> i8 {
        (self.0 / 12) as i8 - 1
    }

    /// Whether this key is a white key.
    pub fn is_natural(&self) -> bool {
        self.pitch_class().is_natural()
    }

    /// The sharp-spelled name of this key, e.g. "F#2".
    pub fn note_name(&self) -> NoteName {
        NoteName {
            class: self.pitch_class(),
            octave: self.octave(),
        }
    }

    /// The absolute letter position of this key (octave × 7 + letter step),
    /// the coordinate system that staff placement works in.
    pub fn letter_index(&self) -> i16 {
        self.octave() as i16 * 7 + self.pitch_class().letter_step() as i16
    }

    /// This key shifted by a signed number of semitones, or None if the
    /// result would leave MIDI's 0..=127.
    pub fn transpose(&self, semitones: i16) -> Option<MidiPitch> {
        let shifted = self.0 as i16 + semitones;
        if (Self::MIN.0 as i16..=Self::MAX.0 as i16).contains(&shifted) {
            Some(Self(shifted as u8))
        } else {
            None
        }
    }

    /// The equal-temperament frequency of this key, A4 (69) = 440 Hz.
    pub fn frequency(&self) -> FrequencyHz {
        FrequencyHz(440.0 * 2.0f64.powf((self.0 as f64 - 69.0) / 12.0))
    }
}
impl fmt::Display for MidiPitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.note_name())
    }
}
impl From<u7> for MidiPitch {
    fn from(value: u7) -> Self {
        Self(value.as_int())
    }
}
impl From<MidiPitch> for u7 {
    fn from(value: MidiPitch) -> Self {
        u7::from_int_lossy(value.0)
    }
}

/// A frequency in Hertz. [MidiPitch::frequency] produces one; audio layers
/// consume it.
#[derive(Clone, Copy, Debug, Default, Display, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FrequencyHz(pub f64);

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn note_names_are_sharp_spelled_with_c4_60() {
        assert_eq!(MidiPitch(60).note_name().to_string(), "C4");
        assert_eq!(MidiPitch(61).note_name().to_string(), "C#4");
        assert_eq!(MidiPitch(21).note_name().to_string(), "A0");
        assert_eq!(MidiPitch(108).note_name().to_string(), "C8");
        assert_eq!(MidiPitch(42).note_name().to_string(), "F#2");
        assert_eq!(MidiPitch(0).note_name().to_string(), "C-1");
    }

    #[test]
    fn note_names_parse_back() {
        for key in 0..=127u8 {
            let name = MidiPitch(key).note_name();
            assert_eq!(name.to_string().parse::<NoteName>().unwrap(), name);
            assert_eq!(name.to_pitch().unwrap(), MidiPitch(key));
        }
        assert!("H4".parse::<NoteName>().is_err());
        assert!("E#4".parse::<NoteName>().is_err());
        assert!("C".parse::<NoteName>().is_err());
        // A9 names a pitch beyond MIDI 127.
        assert!("A9".parse::<NoteName>().unwrap().to_pitch().is_err());
    }

    #[test]
    fn piano_key_bounds_are_enforced() {
        assert!(MidiPitch::new_piano_key(21).is_ok());
        assert!(MidiPitch::new_piano_key(108).is_ok());
        assert_eq!(
            MidiPitch::new_piano_key(20),
            Err(EtudeError::PitchOutOfRange(20))
        );
        assert_eq!(
            MidiPitch::new_piano_key(109),
            Err(EtudeError::PitchOutOfRange(109))
        );
    }

    #[test]
    fn seven_naturals_per_octave() {
        assert_eq!(PitchClass::iter().filter(|pc| pc.is_natural()).count(), 7);
        assert!(MidiPitch(60).is_natural()); // C4
        assert!(!MidiPitch(61).is_natural()); // C#4
    }

    #[test]
    fn letter_steps_are_diatonic() {
        // C#4 occupies the same letter as C4, one step below D4.
        assert_eq!(MidiPitch(60).letter_index(), MidiPitch(61).letter_index());
        assert_eq!(MidiPitch(62).letter_index(), MidiPitch(60).letter_index() + 1);
        // An octave spans seven letters.
        assert_eq!(MidiPitch(72).letter_index(), MidiPitch(60).letter_index() + 7);
    }

    #[test]
    fn transpose_respects_midi_bounds() {
        assert_eq!(MidiPitch(60).transpose(7), Some(MidiPitch(67)));
        assert_eq!(MidiPitch(60).transpose(-60), Some(MidiPitch(0)));
        assert_eq!(MidiPitch(60).transpose(-61), None);
        assert_eq!(MidiPitch(120).transpose(8), None);
    }

    #[test]
    fn note_to_frequency() {
        // https://www.colincrawley.com/midi-note-to-audio-frequency-calculator/
        assert!(approx_eq!(f64, MidiPitch(69).frequency().0, 440.0));
        assert!(approx_eq!(
            f64,
            MidiPitch(60).frequency().0,
            261.625_565_300_598_6,
            epsilon = 1e-9
        ));
        assert!(approx_eq!(
            f64,
            MidiPitch(21).frequency().0,
            27.5,
            epsilon = 1e-9
        ));
    }

    #[test]
    fn u7_round_trip() {
        let pitch = MidiPitch::from(u7::from_int_lossy(60));
        assert_eq!(pitch, MidiPitch::MIDDLE_C);
        assert_eq!(u7::from(pitch).as_int(), 60);
    }
}
