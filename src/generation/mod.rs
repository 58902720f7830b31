// Copyright (c) 2024 Mike Tsao

//! Creation of sight-reading exercises: difficulty configuration, musical
//! vocabulary, and the generation strategies themselves.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{
        ChordBlocks, ChordQuality, DegreeProgression, Difficulty, DifficultyConfig,
        DifficultyConfigBuilder, EventKind, EventPosition, Exercise, ExerciseStyle,
        GeneratesExercise, NoteEvent, PitchRange, RandomMelodic, RomanNumeral, ScaleKind,
        ScaleRun,
    };
}

pub use {
    config::{Difficulty, DifficultyConfig, DifficultyConfigBuilder, PitchRange},
    events::{EventKind, EventPosition, Exercise, NoteEvent},
    generators::{
        ChordBlocks, DegreeProgression, ExerciseStyle, GeneratesExercise, RandomMelodic, ScaleRun,
    },
    theory::{ChordQuality, RomanNumeral, ScaleKind},
};

mod config;
mod events;
mod generators;
mod theory;
