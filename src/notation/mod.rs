// Copyright (c) 2024 Mike Tsao

//! Placement of pitches on the grand staff, which is the part of the system
//! that turns a MIDI key number into something a renderer can draw.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{PitchPosition, Staff};
}

pub use staff::{PitchPosition, Staff};

mod staff;
