// Copyright (c) 2024 Mike Tsao

//! The error vocabulary shared by the whole crate.

use thiserror::Error;

/// All the ways this crate's operations can fail. Errors surface immediately;
/// no operation returns a partial result alongside one.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EtudeError {
    /// A pitch fell outside the 88-key piano range. The trainer never clamps
    /// or substitutes a nearby pitch; the caller supplied something a piano
    /// can't play, and should hear about it.
    #[error("MIDI pitch {0} is outside the piano range of {min} (A0) through {max} (C8)",
        min = crate::types::MidiPitch::PIANO_MIN.0,
        max = crate::types::MidiPitch::PIANO_MAX.0)]
    PitchOutOfRange(u8),

    /// An exercise configuration failed validation. The message names the
    /// offending value.
    #[error("invalid exercise configuration: {0}")]
    InvalidConfig(String),

    /// A duration name wasn't in the rhythm table. Unknown names are never
    /// silently coerced to some default length.
    #[error("unknown duration name {0:?}")]
    UnknownDuration(String),
}
