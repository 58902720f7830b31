// Copyright (c) 2024 Mike Tsao

//! Wait-mode practice over generated exercises.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{Judgment, PracticeSession, SessionStats};
}

pub use session::{Judgment, PracticeSession, SessionStats};

mod session;
