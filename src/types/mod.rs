// Copyright (c) 2024 Mike Tsao

//! Common data types used throughout the system.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{
        Beats, Duration, FrequencyHz, MidiPitch, NoteName, PitchClass, Seconds, Tempo,
        TimeSignature,
    };
}

pub use {
    duration::Duration,
    pitch::{FrequencyHz, MidiPitch, NoteName, PitchClass},
    time::{Beats, Seconds, Tempo, TimeSignature},
};

mod duration;
mod pitch;
mod time;
