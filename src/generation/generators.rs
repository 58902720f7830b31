// Copyright (c) 2024 Mike Tsao

//! Generation strategies. Each one builds a complete [Exercise] from explicit
//! inputs; the only randomness is the injected [Rng], so a seeded stream
//! reproduces an exercise exactly.

use crate::{
    error::EtudeError,
    generation::{
        config::DifficultyConfig,
        events::{EventKind, EventPosition, Exercise, NoteEvent},
        theory::{ChordQuality, RomanNumeral, ScaleKind},
    },
    types::{Beats, Duration, MidiPitch, TimeSignature},
    util::Rng,
};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Something that can generate a complete [Exercise] from a difficulty
/// configuration, a measure count, and a random stream.
pub trait GeneratesExercise {
    /// Generates an exercise of at least one measure. Fixed-form strategies
    /// (scale runs, progressions) derive their own length from their musical
    /// material; `measure_count` is still validated for them.
    fn generate(
        &self,
        config: &DifficultyConfig,
        measure_count: usize,
        rng: &mut Rng,
    ) -> Result<Exercise, EtudeError>;
}

// Validation shared by every strategy.
fn validate_request(config: &DifficultyConfig, measure_count: usize) -> Result<(), EtudeError> {
    config.validate()?;
    if measure_count < 1 {
        return Err(EtudeError::InvalidConfig(
            "an exercise needs at least one measure".to_string(),
        ));
    }
    Ok(())
}

// The longest allowed duration that fits the remaining budget.
fn largest_fitting(durations: &[Duration], remaining: Beats) -> Option<Duration> {
    durations
        .iter()
        .copied()
        .filter(|duration| duration.beats() <= remaining)
        .max_by_key(|duration| duration.beats())
}

// Greedy longest-first fill from the full duration table. Every remainder is
// a whole number of sixteenth-note ticks, so the fill always lands exactly.
fn rest_fill(remaining: Beats) -> Vec<Duration> {
    let mut fills = Vec::default();
    let mut left = remaining;
    for duration in Duration::iter() {
        while duration.beats() <= left {
            fills.push(duration);
            left -= duration.beats();
        }
    }
    debug_assert!(left.is_zero());
    fills
}

// Closes out a measure by appending rests from `from` up to `budget`.
fn push_rests(events: &mut Vec<NoteEvent>, measure: usize, from: Beats, budget: Beats) {
    let mut offset = from;
    for duration in rest_fill(budget - from) {
        events.push(NoteEvent {
            position: EventPosition { measure, offset },
            duration,
            kind: EventKind::Rest,
        });
        offset += duration.beats();
    }
}

// The single table duration spanning one measure, for the strategies that
// write one chord per measure.
fn whole_measure_duration(time_signature: TimeSignature) -> Result<Duration, EtudeError> {
    Duration::from_beats(time_signature.measure_beats()).ok_or_else(|| {
        EtudeError::InvalidConfig(format!(
            "no single duration spans a {time_signature} measure"
        ))
    })
}

// Spells out a chord and confirms every tone lands on the piano.
fn chord_tones(root: MidiPitch, quality: ChordQuality) -> Result<Vec<MidiPitch>, EtudeError> {
    let tones = quality.pitches(root).ok_or_else(|| {
        EtudeError::InvalidConfig(format!(
            "a {quality} chord on {root} leaves the MIDI range"
        ))
    })?;
    if let Some(stray) = tones.iter().find(|tone| !tone.is_piano_key()) {
        return Err(EtudeError::InvalidConfig(format!(
            "chord tone {stray} is outside the piano"
        )));
    }
    Ok(tones)
}

/// Draws notes at random within the difficulty's constraints: a duration
/// uniformly from the allowed set, a pitch uniformly from the drawable pool,
/// and a 1-in-10 chance of a rest when the config permits rests.
///
/// When a drawn duration overflows the measure's remaining budget, the
/// longest allowed duration that fits is substituted; when nothing allowed
/// fits, the remainder is filled exactly with rests and the measure closes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RandomMelodic;
impl RandomMelodic {
    /// The chance that any drawn event is a rest rather than a note.
    pub const REST_PROBABILITY: f64 = 0.1;
}
impl GeneratesExercise for RandomMelodic {
    fn generate(
        &self,
        config: &DifficultyConfig,
        measure_count: usize,
        rng: &mut Rng,
    ) -> Result<Exercise, EtudeError> {
        validate_request(config, measure_count)?;
        let pool = config.drawable_pitches();
        let budget = config.time_signature.measure_beats();
        let mut events = Vec::default();
        for measure in 0..measure_count {
            let mut used = Beats::ZERO;
            while used < budget {
                let remaining = budget - used;
                let drawn = *rng.choose(&config.durations);
                let duration = if drawn.beats() <= remaining {
                    drawn
                } else if let Some(fitting) = largest_fitting(&config.durations, remaining) {
                    fitting
                } else {
                    push_rests(&mut events, measure, used, budget);
                    break;
                };
                let kind = if config.rests && rng.chance(Self::REST_PROBABILITY) {
                    EventKind::Rest
                } else {
                    EventKind::Note(*rng.choose(&pool))
                };
                events.push(NoteEvent {
                    position: EventPosition {
                        measure,
                        offset: used,
                    },
                    duration,
                    kind,
                });
                used += duration.beats();
            }
        }
        Ok(Exercise::new_with(
            config.time_signature,
            measure_count,
            events,
        ))
    }
}

/// Plays the seven degrees of a scale up from the root and back down again as
/// quarter notes, 14 notes in all. The top degree repeats at the turn and the
/// root bookends the run. The run's length is set by its material, and the
/// final partial measure is padded with rests.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScaleRun {
    /// The key the run starts (and ends) on.
    pub root: MidiPitch,
    /// Which scale flavor to walk.
    pub kind: ScaleKind,
}
impl GeneratesExercise for ScaleRun {
    fn generate(
        &self,
        config: &DifficultyConfig,
        measure_count: usize,
        _rng: &mut Rng,
    ) -> Result<Exercise, EtudeError> {
        validate_request(config, measure_count)?;
        let degrees = self.kind.pitches(self.root).ok_or_else(|| {
            EtudeError::InvalidConfig(format!(
                "a {} scale on {} leaves the MIDI range",
                self.kind, self.root
            ))
        })?;
        if let Some(stray) = degrees.iter().find(|degree| !degree.is_piano_key()) {
            return Err(EtudeError::InvalidConfig(format!(
                "scale degree {stray} is outside the piano"
            )));
        }
        let budget = config.time_signature.measure_beats();
        if Duration::Quarter.beats() > budget {
            return Err(EtudeError::InvalidConfig(format!(
                "a quarter note doesn't fit a {} measure",
                config.time_signature
            )));
        }

        let mut events = Vec::with_capacity(degrees.len() * 2);
        let mut measure = 0;
        let mut used = Beats::ZERO;
        for pitch in degrees.iter().chain(degrees.iter().rev()).copied() {
            if budget - used < Duration::Quarter.beats() {
                push_rests(&mut events, measure, used, budget);
                measure += 1;
                used = Beats::ZERO;
            }
            events.push(NoteEvent {
                position: EventPosition {
                    measure,
                    offset: used,
                },
                duration: Duration::Quarter,
                kind: EventKind::Note(pitch),
            });
            used += Duration::Quarter.beats();
        }
        if !used.is_zero() && used < budget {
            push_rests(&mut events, measure, used, budget);
        }
        Ok(Exercise::new_with(config.time_signature, measure + 1, events))
    }
}

/// Repeats one block chord, a whole measure at a time, for `measure_count`
/// measures. The time signature must map to a single table duration (4/4 to
/// a whole note, 3/4 to a dotted half, 2/4 to a half).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChordBlocks {
    /// The chord's root key.
    pub root: MidiPitch,
    /// The chord's flavor.
    pub quality: ChordQuality,
}
impl GeneratesExercise for ChordBlocks {
    fn generate(
        &self,
        config: &DifficultyConfig,
        measure_count: usize,
        _rng: &mut Rng,
    ) -> Result<Exercise, EtudeError> {
        validate_request(config, measure_count)?;
        let duration = whole_measure_duration(config.time_signature)?;
        let kind = EventKind::chord(chord_tones(self.root, self.quality)?)?;
        let events = (0..measure_count)
            .map(|measure| NoteEvent {
                position: EventPosition {
                    measure,
                    offset: Beats::ZERO,
                },
                duration,
                kind: kind.clone(),
            })
            .collect();
        Ok(Exercise::new_with(
            config.time_signature,
            measure_count,
            events,
        ))
    }
}

/// Walks a harmonic progression, one whole-measure chord per roman numeral.
/// The exercise is as long as the numeral list, one measure each.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DegreeProgression {
    /// The key the numerals are figured from.
    pub tonic: MidiPitch,
    /// The progression, e.g. I, IV, V, I.
    pub numerals: Vec<RomanNumeral>,
}
impl GeneratesExercise for DegreeProgression {
    fn generate(
        &self,
        config: &DifficultyConfig,
        measure_count: usize,
        _rng: &mut Rng,
    ) -> Result<Exercise, EtudeError> {
        validate_request(config, measure_count)?;
        if self.numerals.is_empty() {
            return Err(EtudeError::InvalidConfig(
                "a progression needs at least one numeral".to_string(),
            ));
        }
        let duration = whole_measure_duration(config.time_signature)?;
        let mut events = Vec::with_capacity(self.numerals.len());
        for (measure, numeral) in self.numerals.iter().enumerate() {
            let root = self
                .tonic
                .transpose(numeral.semitone_offset() as i16)
                .ok_or_else(|| {
                    EtudeError::InvalidConfig(format!(
                        "degree {numeral} on tonic {} leaves the MIDI range",
                        self.tonic
                    ))
                })?;
            events.push(NoteEvent {
                position: EventPosition {
                    measure,
                    offset: Beats::ZERO,
                },
                duration,
                kind: EventKind::chord(chord_tones(root, numeral.quality())?)?,
            });
        }
        Ok(Exercise::new_with(
            config.time_signature,
            self.numerals.len(),
            events,
        ))
    }
}

/// A config-carried choice of strategy, so one deserialized value can drive
/// the whole pipeline.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseStyle {
    /// Free melody within the difficulty's constraints.
    #[default]
    RandomMelodic,
    /// An up-and-back scale run.
    Scale(ScaleRun),
    /// One block chord repeated each measure.
    Chords(ChordBlocks),
    /// One chord per roman numeral.
    Progression(DegreeProgression),
}
impl GeneratesExercise for ExerciseStyle {
    fn generate(
        &self,
        config: &DifficultyConfig,
        measure_count: usize,
        rng: &mut Rng,
    ) -> Result<Exercise, EtudeError> {
        match self {
            ExerciseStyle::RandomMelodic => RandomMelodic.generate(config, measure_count, rng),
            ExerciseStyle::Scale(strategy) => strategy.generate(config, measure_count, rng),
            ExerciseStyle::Chords(strategy) => strategy.generate(config, measure_count, rng),
            ExerciseStyle::Progression(strategy) => strategy.generate(config, measure_count, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::config::DifficultyConfigBuilder;

    fn assert_measure_sums(exercise: &Exercise) {
        let budget = exercise.time_signature().measure_beats();
        for (index, measure) in exercise.measures().iter().enumerate() {
            let total = measure
                .iter()
                .fold(Beats::ZERO, |sum, event| sum + event.beats());
            assert_eq!(total, budget, "measure {index} doesn't sum to {budget}");
        }
    }

    #[test]
    fn random_measures_sum_to_the_budget() {
        let config = DifficultyConfig::default();
        for seed in 0..8 {
            let exercise = RandomMelodic
                .generate(&config, 4, &mut Rng::new_with_seed(seed))
                .unwrap();
            assert_eq!(exercise.measure_count(), 4);
            assert_measure_sums(&exercise);
        }
    }

    #[test]
    fn random_draws_only_from_the_allowed_sets() {
        let config = crate::generation::config::Difficulty::Intermediate.config();
        for seed in 0..8 {
            let exercise = RandomMelodic
                .generate(&config, 4, &mut Rng::new_with_seed(seed))
                .unwrap();
            for event in exercise.events() {
                assert!(config.durations.contains(&event.duration));
                if let EventKind::Note(pitch) = event.kind {
                    assert!(config.pitch_range.0.contains(&pitch));
                }
            }
        }
    }

    #[test]
    fn dotted_quarters_close_with_an_exact_rest() {
        let config = DifficultyConfigBuilder::default()
            .durations(vec![Duration::DottedQuarter])
            .rests(false)
            .build()
            .unwrap();
        let exercise = RandomMelodic
            .generate(&config, 3, &mut Rng::new_with_seed(3))
            .unwrap();
        assert_measure_sums(&exercise);
        for measure in exercise.measures() {
            let durations: Vec<Duration> = measure.iter().map(|event| event.duration).collect();
            assert_eq!(
                durations,
                vec![
                    Duration::DottedQuarter,
                    Duration::DottedQuarter,
                    Duration::Quarter
                ]
            );
            assert!(!measure[0].kind.is_rest());
            assert!(!measure[1].kind.is_rest());
            assert!(measure[2].kind.is_rest());
        }
    }

    #[test]
    fn oversized_sets_fall_back_to_rest_measures() {
        let config = DifficultyConfigBuilder::default()
            .durations(vec![Duration::Whole])
            .time_signature(TimeSignature::WALTZ_TIME)
            .build()
            .unwrap();
        let exercise = RandomMelodic
            .generate(&config, 2, &mut Rng::new_with_seed(1))
            .unwrap();
        assert_measure_sums(&exercise);
        for measure in exercise.measures() {
            assert_eq!(measure.len(), 1);
            assert_eq!(measure[0].duration, Duration::DottedHalf);
            assert!(measure[0].kind.is_rest());
        }
    }

    #[test]
    fn rest_gate_respects_the_config() {
        let no_rests = DifficultyConfigBuilder::default()
            .durations(vec![Duration::Quarter])
            .rests(false)
            .build()
            .unwrap();
        for seed in 0..8 {
            let exercise = RandomMelodic
                .generate(&no_rests, 4, &mut Rng::new_with_seed(seed))
                .unwrap();
            assert!(exercise.events().iter().all(|event| !event.kind.is_rest()));
        }

        let with_rests = DifficultyConfigBuilder::default()
            .durations(vec![Duration::Quarter])
            .build()
            .unwrap();
        assert!((0..20).any(|seed| {
            let exercise = RandomMelodic
                .generate(&with_rests, 4, &mut Rng::new_with_seed(seed))
                .unwrap();
            exercise.events().iter().any(|event| event.kind.is_rest())
        }));
    }

    #[test]
    fn accidentals_gate_the_pitch_pool() {
        // The beginner preset draws naturals only.
        let config = DifficultyConfig::default();
        for seed in 0..8 {
            let exercise = RandomMelodic
                .generate(&config, 4, &mut Rng::new_with_seed(seed))
                .unwrap();
            for event in exercise.events() {
                if let EventKind::Note(pitch) = event.kind {
                    assert!(pitch.is_natural(), "{pitch} is not a natural");
                }
            }
        }
    }

    #[test]
    fn seeded_generation_reproduces() {
        let config = DifficultyConfig::default();
        let first = RandomMelodic
            .generate(&config, 4, &mut Rng::new_with_seed(99))
            .unwrap();
        let again = RandomMelodic
            .generate(&config, 4, &mut Rng::new_with_seed(99))
            .unwrap();
        assert_eq!(first, again);

        let other = RandomMelodic
            .generate(&config, 4, &mut Rng::new_with_seed(100))
            .unwrap();
        assert_ne!(first, other);
    }

    #[test]
    fn rest_fill_is_exact_for_every_remainder() {
        for ticks in (4..=64).step_by(4) {
            let remainder = Beats::new_with_ticks(ticks);
            let total = rest_fill(remainder)
                .iter()
                .fold(Beats::ZERO, |sum, duration| sum + duration.beats());
            assert_eq!(total, remainder, "fill missed for {ticks} ticks");
        }
        assert!(rest_fill(Beats::ZERO).is_empty());
    }

    #[test]
    fn scale_runs_up_and_back() {
        let config = DifficultyConfig::default();
        let run = ScaleRun {
            root: MidiPitch(60),
            kind: ScaleKind::Major,
        };
        let exercise = run
            .generate(&config, 1, &mut Rng::new_with_seed(0))
            .unwrap();

        let pitches: Vec<u8> = exercise
            .events()
            .iter()
            .filter_map(|event| match event.kind {
                EventKind::Note(pitch) => Some(pitch.0),
                _ => None,
            })
            .collect();
        assert_eq!(
            pitches,
            vec![60, 62, 64, 65, 67, 69, 71, 71, 69, 67, 65, 64, 62, 60]
        );
        assert!(exercise
            .events()
            .iter()
            .all(|event| event.kind.is_rest() || event.duration == Duration::Quarter));

        // 14 quarters in 4/4: three full measures, then two notes and a
        // half rest. The requested count of 1 doesn't constrain the run.
        assert_eq!(exercise.measure_count(), 4);
        assert_measure_sums(&exercise);
        let measures = exercise.measures();
        assert_eq!(measures[3].len(), 3);
        assert_eq!(measures[3][2].duration, Duration::Half);
        assert!(measures[3][2].kind.is_rest());
    }

    #[test]
    fn scale_rejects_roots_that_leave_the_piano() {
        let config = DifficultyConfig::default();
        let high = ScaleRun {
            root: MidiPitch(105),
            kind: ScaleKind::Major,
        };
        assert!(matches!(
            high.generate(&config, 1, &mut Rng::new_with_seed(0)),
            Err(EtudeError::InvalidConfig(_))
        ));

        let off_midi = ScaleRun {
            root: MidiPitch(125),
            kind: ScaleKind::Major,
        };
        assert!(matches!(
            off_midi.generate(&config, 1, &mut Rng::new_with_seed(0)),
            Err(EtudeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn chords_fill_whole_measures() {
        let config = DifficultyConfig::default();
        let chords = ChordBlocks {
            root: MidiPitch(60),
            quality: ChordQuality::Major,
        };
        let exercise = chords
            .generate(&config, 2, &mut Rng::new_with_seed(0))
            .unwrap();
        assert_eq!(exercise.measure_count(), 2);
        assert_measure_sums(&exercise);
        for measure in exercise.measures() {
            assert_eq!(measure.len(), 1);
            assert_eq!(measure[0].duration, Duration::Whole);
            assert!(measure[0].position.offset.is_zero());
            assert_eq!(
                measure[0].kind,
                EventKind::Chord(vec![MidiPitch(60), MidiPitch(64), MidiPitch(67)])
            );
        }

        let waltz = DifficultyConfigBuilder::default()
            .time_signature(TimeSignature::WALTZ_TIME)
            .build()
            .unwrap();
        let exercise = chords
            .generate(&waltz, 1, &mut Rng::new_with_seed(0))
            .unwrap();
        assert_eq!(exercise.events()[0].duration, Duration::DottedHalf);
    }

    #[test]
    fn chords_need_a_single_measure_duration() {
        let odd = DifficultyConfigBuilder::default()
            .time_signature(TimeSignature::new_with(7, 8).unwrap())
            .build()
            .unwrap();
        let chords = ChordBlocks {
            root: MidiPitch(60),
            quality: ChordQuality::Major,
        };
        assert!(matches!(
            chords.generate(&odd, 1, &mut Rng::new_with_seed(0)),
            Err(EtudeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn chord_tones_must_stay_on_the_piano() {
        let config = DifficultyConfig::default();
        let chords = ChordBlocks {
            root: MidiPitch(106),
            quality: ChordQuality::Major,
        };
        assert!(matches!(
            chords.generate(&config, 1, &mut Rng::new_with_seed(0)),
            Err(EtudeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn progressions_follow_the_numerals() {
        let config = DifficultyConfig::default();
        let numerals: Vec<RomanNumeral> = ["I", "IV", "V", "I"]
            .iter()
            .map(|numeral| numeral.parse().unwrap())
            .collect();
        let progression = DegreeProgression {
            tonic: MidiPitch(60),
            numerals,
        };
        let exercise = progression
            .generate(&config, 1, &mut Rng::new_with_seed(0))
            .unwrap();
        assert_eq!(exercise.measure_count(), 4);
        assert_measure_sums(&exercise);

        let roots: Vec<u8> = exercise
            .events()
            .iter()
            .map(|event| match &event.kind {
                EventKind::Chord(tones) => tones[0].0,
                other => panic!("expected a chord, got {other:?}"),
            })
            .collect();
        assert_eq!(roots, vec![60, 65, 67, 60]);
        for event in exercise.events() {
            if let EventKind::Chord(tones) = &event.kind {
                assert_eq!(tones[1].0 - tones[0].0, 4, "uppercase numerals are major");
                assert_eq!(tones[2].0 - tones[0].0, 7);
            }
        }
    }

    #[test]
    fn lowercase_numerals_build_minor_chords() {
        let config = DifficultyConfig::default();
        let progression = DegreeProgression {
            tonic: MidiPitch(60),
            numerals: vec!["ii".parse().unwrap()],
        };
        let exercise = progression
            .generate(&config, 1, &mut Rng::new_with_seed(0))
            .unwrap();
        assert_eq!(
            exercise.events()[0].kind,
            EventKind::Chord(vec![MidiPitch(62), MidiPitch(65), MidiPitch(69)])
        );
    }

    #[test]
    fn progressions_need_numerals() {
        let config = DifficultyConfig::default();
        let empty = DegreeProgression {
            tonic: MidiPitch(60),
            numerals: vec![],
        };
        assert!(matches!(
            empty.generate(&config, 1, &mut Rng::new_with_seed(0)),
            Err(EtudeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_measures_is_refused() {
        let config = DifficultyConfig::default();
        assert!(matches!(
            RandomMelodic.generate(&config, 0, &mut Rng::new_with_seed(0)),
            Err(EtudeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn style_dispatches_to_the_strategies() {
        let config = DifficultyConfig::default();
        let run = ScaleRun {
            root: MidiPitch(60),
            kind: ScaleKind::Major,
        };
        let style = ExerciseStyle::Scale(run);
        let via_style = style
            .generate(&config, 1, &mut Rng::new_with_seed(1))
            .unwrap();
        let direct = run.generate(&config, 1, &mut Rng::new_with_seed(1)).unwrap();
        assert_eq!(via_style, direct);
        assert_eq!(ExerciseStyle::default(), ExerciseStyle::RandomMelodic);
    }

    #[test]
    fn styles_round_trip_through_json() {
        assert_eq!(
            serde_json::to_string(&ExerciseStyle::RandomMelodic).unwrap(),
            "\"random-melodic\""
        );
        let style = ExerciseStyle::Progression(DegreeProgression {
            tonic: MidiPitch(60),
            numerals: vec!["I".parse().unwrap(), "vi".parse().unwrap()],
        });
        let json = serde_json::to_string(&style).unwrap();
        assert!(json.contains("\"progression\""), "got {json}");
        assert!(json.contains("\"vi\""), "got {json}");
        let back: ExerciseStyle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, style);
    }
}
