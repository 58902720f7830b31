// Copyright (c) 2024 Mike Tsao

//! A wait-mode cursor over a generated exercise.

use crate::{
    generation::{EventKind, Exercise, NoteEvent},
    types::MidiPitch,
};
use delegate::delegate;
use serde::{Deserialize, Serialize};

/// What the session concluded about one played pitch.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Judgment {
    /// The pitch completed the current event and the cursor advanced.
    Correct,
    /// The pitch is a chord member the session hadn't heard yet, but the
    /// chord still needs more members before the cursor moves.
    Partial,
    /// The pitch doesn't belong to the current event. The cursor stays, and
    /// any partially collected chord starts over.
    Incorrect,
    /// Every playable event has already been matched.
    Finished,
}

/// Running tally of wait-mode scoring.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SessionStats {
    /// Correct pitches played.
    pub hits: usize,
    /// Wrong pitches played.
    pub misses: usize,
    /// Consecutive correct pitches since the last miss.
    pub streak: usize,
    /// The longest streak so far.
    pub best_streak: usize,
}
impl SessionStats {
    /// hits / (hits + misses), or 1.0 before anything has been played.
    pub fn accuracy(&self) -> f64 {
        if self.hits + self.misses == 0 {
            1.0
        } else {
            self.hits as f64 / (self.hits + self.misses) as f64
        }
    }

    fn record_hit(&mut self) {
        self.hits += 1;
        self.streak += 1;
        self.best_streak = self.best_streak.max(self.streak);
    }

    fn record_miss(&mut self) {
        self.misses += 1;
        self.streak = 0;
    }
}

/// [PracticeSession] walks an exercise in wait mode: it holds at each event
/// until the expected pitch (or every member of the expected chord) arrives,
/// scoring along the way. Rests are displayed, not played, so the cursor
/// steps over them on its own. The session never mutates the exercise, and it
/// keeps no timers; pacing belongs to the caller.
#[derive(Debug)]
pub struct PracticeSession {
    exercise: Exercise,
    cursor: usize,
    collected: Vec<MidiPitch>,
    stats: SessionStats,
}
impl PracticeSession {
    #[allow(missing_docs)]
    pub fn new_with(exercise: Exercise) -> Self {
        let mut session = Self {
            exercise,
            cursor: 0,
            collected: Vec::default(),
            stats: SessionStats::default(),
        };
        session.skip_rests();
        session
    }

    delegate! {
        to self.stats {
            /// hits / (hits + misses), or 1.0 before anything has been played.
            pub fn accuracy(&self) -> f64;
        }
    }

    #[allow(missing_docs)]
    pub fn exercise(&self) -> &Exercise {
        &self.exercise
    }

    #[allow(missing_docs)]
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// The event the session is waiting on, or None once the exercise is
    /// done.
    pub fn current(&self) -> Option<&NoteEvent> {
        self.exercise.events().get(self.cursor)
    }

    /// True once every playable event has been matched.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.exercise.event_count()
    }

    /// Judges one played pitch against the current expected event and moves
    /// the cursor when the event completes.
    pub fn handle_pitch(&mut self, played: MidiPitch) -> Judgment {
        let kind = match self.exercise.events().get(self.cursor) {
            Some(event) => event.kind.clone(),
            None => return Judgment::Finished,
        };
        match kind {
            EventKind::Note(expected) => {
                if played == expected {
                    self.stats.record_hit();
                    self.advance();
                    Judgment::Correct
                } else {
                    self.stats.record_miss();
                    Judgment::Incorrect
                }
            }
            EventKind::Chord(tones) => {
                if !tones.contains(&played) {
                    self.stats.record_miss();
                    self.collected.clear();
                    Judgment::Incorrect
                } else if self.collected.contains(&played) {
                    // An already-heard member held or struck again neither
                    // scores nor resets.
                    Judgment::Partial
                } else {
                    self.collected.push(played);
                    self.stats.record_hit();
                    if self.collected.len() == tones.len() {
                        self.collected.clear();
                        self.advance();
                        Judgment::Correct
                    } else {
                        Judgment::Partial
                    }
                }
            }
            // The cursor never holds on a rest, but if one slips through,
            // step over it and judge against what follows.
            EventKind::Rest => {
                self.advance();
                self.handle_pitch(played)
            }
        }
    }

    fn advance(&mut self) {
        self.cursor += 1;
        self.skip_rests();
    }

    fn skip_rests(&mut self) {
        while let Some(event) = self.exercise.events().get(self.cursor) {
            if event.kind.is_rest() {
                self.cursor += 1;
            } else {
                break;
            }
        }
    }
}
