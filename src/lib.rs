// Copyright (c) 2024 Mike Tsao

#![deny(missing_docs, unused_imports, unused_variables)]

//! Etude generates and scores piano sight-reading exercises.
//!
//! There are several ways to use this crate, depending on how much control
//! you need.
//!
//! * *Easiest*: pick a [Difficulty](generation::Difficulty) preset, call
//! [generate()](generation::GeneratesExercise::generate) on an
//! [ExerciseStyle](generation::ExerciseStyle), and hand the resulting
//! [Exercise] to your renderer, mapping each pitch through [PitchPosition]
//! to place it on a staff.
//! * *More control*: build a custom [DifficultyConfig] with
//! [DifficultyConfigBuilder](generation::DifficultyConfigBuilder), then
//! drive one of the strategy values
//! ([RandomMelodic](generation::RandomMelodic),
//! [ScaleRun](generation::ScaleRun),
//! [ChordBlocks](generation::ChordBlocks),
//! [DegreeProgression](generation::DegreeProgression)) directly.
//! * *Scoring*: feed played pitches into a
//! [PracticeSession](practice::PracticeSession) to judge them against the
//! exercise and accumulate hit/miss statistics.

/// A collection of imports that are useful to users of this crate. `use
/// etude::prelude::*;` for easier onboarding.
pub mod prelude {
    pub use super::{
        generation::prelude::*, notation::prelude::*, practice::prelude::*, types::prelude::*,
        util::prelude::*,
    };
}

// Fundamental structures that are important enough to re-export at top level.
pub use {
    error::EtudeError,
    generation::{DifficultyConfig, Exercise},
    notation::PitchPosition,
};

pub mod error;
pub mod generation;
pub mod notation;
pub mod practice;
pub mod types;
pub mod util;
