// Copyright (c) 2024 Mike Tsao

//! Difficulty configuration: the explicit knobs that shape a generated
//! exercise. Generators take a [DifficultyConfig] as a parameter; nothing in
//! the crate reads ambient difficulty state.

use crate::{
    error::EtudeError,
    types::{Duration, MidiPitch, Tempo, TimeSignature},
};
use core::fmt;
use core::ops::RangeInclusive;
use core::str::FromStr;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, IntoStaticStr};

/// A wrapper around `RangeInclusive<MidiPitch>`: the inclusive span of keys a
/// config draws pitches from. Defaults to the whole piano.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PitchRange(pub RangeInclusive<MidiPitch>);
impl Default for PitchRange {
    fn default() -> Self {
        Self(MidiPitch::PIANO_MIN..=MidiPitch::PIANO_MAX)
    }
}
impl PitchRange {
    #[allow(missing_docs)]
    pub fn start(&self) -> MidiPitch {
        *self.0.start()
    }

    #[allow(missing_docs)]
    pub fn end(&self) -> MidiPitch {
        *self.0.end()
    }

    /// Every key in the range, lowest first.
    pub fn iter(&self) -> impl Iterator<Item = MidiPitch> {
        (self.start().0..=self.end().0).map(MidiPitch)
    }
}

/// [DifficultyConfig] is the complete description of how hard an exercise
/// should be. Every knob is explicit; a config plus a seed determines an
/// exercise entirely.
///
/// The default configuration is the [Difficulty::Beginner] preset, and the
/// builder starts from there, so turning one knob is a one-liner:
///
/// ```
/// use etude::prelude::*;
///
/// let config = DifficultyConfigBuilder::default()
///     .accidentals(true)
///     .build()
///     .unwrap();
/// assert_eq!(config.durations, Difficulty::Beginner.config().durations);
/// ```
#[derive(Clone, Builder, Debug, PartialEq, Serialize, Deserialize)]
#[builder(default)]
#[serde(rename_all = "kebab-case")]
pub struct DifficultyConfig {
    /// The inclusive range pitches are drawn from. Must sit inside the
    /// piano's 88 keys.
    pub pitch_range: PitchRange,

    /// The durations the random strategy may draw. Must be non-empty.
    pub durations: Vec<Duration>,

    /// Whether black-key pitches may be drawn.
    pub accidentals: bool,

    /// Whether the random strategy may substitute rests for notes.
    pub rests: bool,

    /// Sets each measure's beat budget.
    pub time_signature: TimeSignature,

    /// Suggested performance tempo. Generation doesn't consult it, but it
    /// rides along so renderers and players read one document.
    pub tempo: Tempo,
}
impl Default for DifficultyConfig {
    fn default() -> Self {
        Difficulty::Beginner.config()
    }
}
impl DifficultyConfig {
    /// Checks every [EtudeError::InvalidConfig] condition a config can carry
    /// on its own. Generators call this before doing any work, so a bad
    /// config fails whole; no partial exercise is ever returned.
    pub fn validate(&self) -> Result<(), EtudeError> {
        let (low, high) = (self.pitch_range.start(), self.pitch_range.end());
        if low > high {
            return Err(EtudeError::InvalidConfig(format!(
                "pitch range {}..={} is empty (min exceeds max)",
                low.0, high.0
            )));
        }
        if !low.is_piano_key() || !high.is_piano_key() {
            return Err(EtudeError::InvalidConfig(format!(
                "pitch range {}..={} escapes the piano's {}..={}",
                low.0,
                high.0,
                MidiPitch::PIANO_MIN.0,
                MidiPitch::PIANO_MAX.0
            )));
        }
        if self.durations.is_empty() {
            return Err(EtudeError::InvalidConfig(
                "the allowed duration set is empty".to_string(),
            ));
        }
        if self.drawable_pitches().is_empty() {
            return Err(EtudeError::InvalidConfig(format!(
                "pitch range {}..={} contains no natural pitch and accidentals are disabled",
                low.0, high.0
            )));
        }
        if !Tempo::range().contains(&self.tempo.0) {
            return Err(EtudeError::InvalidConfig(format!(
                "{} is outside the supported {:.0}..={:.0} BPM window",
                self.tempo,
                Tempo::MIN_VALUE,
                Tempo::MAX_VALUE
            )));
        }
        // Re-run the time signature rules in case the struct was built
        // literally or deserialized rather than through new_with().
        TimeSignature::new_with(self.time_signature.top, self.time_signature.bottom)?;
        Ok(())
    }

    /// The pool of keys the random strategy can draw, restricted to the
    /// naturals when accidentals are off.
    pub fn drawable_pitches(&self) -> Vec<MidiPitch> {
        self.pitch_range
            .iter()
            .filter(|pitch| self.accidentals || pitch.is_natural())
            .collect()
    }
}

/// The trainer's named difficulty levels, each expanding to a full
/// [DifficultyConfig].
#[derive(
    Clone, Copy, Debug, Default, EnumIter, Eq, Hash, IntoStaticStr, PartialEq, Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Difficulty {
    #[allow(missing_docs)]
    #[default]
    Beginner,
    #[allow(missing_docs)]
    Intermediate,
    #[allow(missing_docs)]
    Advanced,
    #[allow(missing_docs)]
    Expert,
}
impl Difficulty {
    /// The preset's configuration. All presets allow rests and use common
    /// time; range, durations, and accidentals scale with the level.
    pub fn config(&self) -> DifficultyConfig {
        let (low, high, durations, accidentals) = match self {
            Difficulty::Beginner => (
                60,
                72,
                vec![Duration::Whole, Duration::Half, Duration::Quarter],
                false,
            ),
            Difficulty::Intermediate => (
                55,
                79,
                vec![Duration::Half, Duration::Quarter, Duration::Eighth],
                true,
            ),
            Difficulty::Advanced => (
                48,
                84,
                vec![Duration::Quarter, Duration::Eighth, Duration::Sixteenth],
                true,
            ),
            Difficulty::Expert => (
                36,
                96,
                vec![
                    Duration::Eighth,
                    Duration::Sixteenth,
                    Duration::DottedQuarter,
                ],
                true,
            ),
        };
        DifficultyConfig {
            pitch_range: PitchRange(MidiPitch(low)..=MidiPitch(high)),
            durations,
            accidentals,
            rests: true,
            time_signature: TimeSignature::COMMON_TIME,
            tempo: Tempo::default(),
        }
    }

    /// The identifier, e.g. "intermediate".
    pub fn name(&self) -> &'static str {
        (*self).into()
    }
}
impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
impl FromStr for Difficulty {
    type Err = EtudeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            "expert" => Ok(Difficulty::Expert),
            _ => Err(EtudeError::InvalidConfig(format!(
                "unrecognized difficulty {s:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn default_config_is_the_beginner_preset() {
        assert_eq!(DifficultyConfig::default(), Difficulty::Beginner.config());
    }

    #[test]
    fn presets_scale_with_level() {
        let beginner = Difficulty::Beginner.config();
        assert_eq!(beginner.pitch_range.start(), MidiPitch(60));
        assert_eq!(beginner.pitch_range.end(), MidiPitch(72));
        assert!(!beginner.accidentals);

        let expert = Difficulty::Expert.config();
        assert_eq!(expert.pitch_range.start(), MidiPitch(36));
        assert_eq!(expert.pitch_range.end(), MidiPitch(96));
        assert!(expert.durations.contains(&Duration::DottedQuarter));

        for difficulty in Difficulty::iter() {
            let config = difficulty.config();
            assert!(config.validate().is_ok(), "{difficulty} should be valid");
            assert!(config.rests);
            assert_eq!(config.time_signature, TimeSignature::COMMON_TIME);
        }
    }

    #[test]
    fn builder_starts_from_the_default() {
        let config = DifficultyConfigBuilder::default()
            .accidentals(true)
            .build()
            .unwrap();
        assert!(config.accidentals);
        assert_eq!(config.durations, Difficulty::Beginner.config().durations);
    }

    #[test]
    fn validation_rejects_inverted_range() {
        let mut config = DifficultyConfig::default();
        config.pitch_range = PitchRange(MidiPitch(72)..=MidiPitch(60));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("72..=60"), "got {err}");
    }

    #[test]
    fn validation_rejects_range_off_the_piano() {
        let mut config = DifficultyConfig::default();
        config.pitch_range = PitchRange(MidiPitch(10)..=MidiPitch(72));
        assert!(config.validate().is_err());

        config.pitch_range = PitchRange(MidiPitch(60)..=MidiPitch(120));
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_empty_duration_set() {
        let mut config = DifficultyConfig::default();
        config.durations.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duration set"), "got {err}");
    }

    #[test]
    fn validation_rejects_pool_with_nothing_to_draw() {
        // C#4 alone, accidentals off: there is no playable natural.
        let mut config = DifficultyConfig::default();
        config.pitch_range = PitchRange(MidiPitch(61)..=MidiPitch(61));
        assert!(config.validate().is_err());

        config.accidentals = true;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_rejects_out_of_window_tempo() {
        let mut config = DifficultyConfig::default();
        config.tempo = Tempo(30.0);
        assert!(config.validate().is_err());
        config.tempo = Tempo(250.0);
        assert!(config.validate().is_err());
        config.tempo = Tempo(40.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_rejects_hand_built_bad_time_signature() {
        let mut config = DifficultyConfig::default();
        config.time_signature = TimeSignature { top: 4, bottom: 5 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn drawable_pool_respects_accidentals() {
        let beginner = Difficulty::Beginner.config();
        let pool = beginner.drawable_pitches();
        // C4 through C5 holds eight naturals.
        assert_eq!(pool.len(), 8);
        assert!(pool.iter().all(|pitch| pitch.is_natural()));

        let intermediate = Difficulty::Intermediate.config();
        let pool = intermediate.drawable_pitches();
        // 55..=79 inclusive is every semitone.
        assert_eq!(pool.len(), 25);
    }

    #[test]
    fn configs_round_trip_through_json() {
        let config = Difficulty::Advanced.config();
        let json = serde_json::to_string(&config).unwrap();
        let back: DifficultyConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
        assert!(json.contains("\"pitch-range\""), "got {json}");
        assert!(json.contains("\"sixteenth\""), "got {json}");
    }
}
