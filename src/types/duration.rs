// Copyright (c) 2024 Mike Tsao

//! The rhythm table: the closed vocabulary of notated durations.

use crate::{error::EtudeError, types::Beats};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, FromRepr, IntoStaticStr};

/// [Duration] enumerates the notated lengths an exercise can contain, each
/// with an exact length in quarter-note beats. Variants are declared longest
/// first, so iteration runs from whole note down to sixteenth, which is the
/// order greedy rest-filling wants.
///
/// Name lookup is strict: a name that isn't in this table is
/// [EtudeError::UnknownDuration], never silently some default length.
#[derive(
    Clone, Copy, Debug, Default, EnumIter, Eq, FromRepr, Hash, IntoStaticStr, PartialEq,
    Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Duration {
    /// Four beats.
    #[strum(serialize = "whole")]
    Whole,
    /// Three beats.
    #[strum(serialize = "dotted_half")]
    DottedHalf,
    /// Two beats.
    #[strum(serialize = "half")]
    Half,
    /// One and a half beats.
    #[strum(serialize = "dotted_quarter")]
    DottedQuarter,
    /// One beat.
    #[default]
    #[strum(serialize = "quarter")]
    Quarter,
    /// Three quarters of a beat.
    #[strum(serialize = "dotted_eighth")]
    DottedEighth,
    /// Half a beat.
    #[strum(serialize = "eighth")]
    Eighth,
    /// A quarter of a beat.
    #[strum(serialize = "sixteenth")]
    Sixteenth,
}
impl Duration {
    /// The table name, e.g. "dotted_half".
    pub fn name(&self) -> &'static str {
        (*self).into()
    }

    /// The exact length in beats.
    pub const fn beats(&self) -> Beats {
        match self {
            Duration::Whole => Beats::new_with_beats(4),
            Duration::DottedHalf => Beats::new_with_beats(3),
            Duration::Half => Beats::new_with_beats(2),
            Duration::DottedQuarter => Beats::new_with_ticks(24),
            Duration::Quarter => Beats::new_with_beats(1),
            Duration::DottedEighth => Beats::new_with_ticks(12),
            Duration::Eighth => Beats::new_with_ticks(8),
            Duration::Sixteenth => Beats::new_with_ticks(4),
        }
    }

    /// The table entry of exactly this length, if there is one. Chord
    /// strategies use this to pick a whole-measure duration.
    pub fn from_beats(beats: Beats) -> Option<Duration> {
        use strum::IntoEnumIterator;
        Self::iter().find(|duration| duration.beats() == beats)
    }
}
impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
impl FromStr for Duration {
    type Err = EtudeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "whole" => Ok(Duration::Whole),
            "dotted_half" => Ok(Duration::DottedHalf),
            "half" => Ok(Duration::Half),
            "dotted_quarter" => Ok(Duration::DottedQuarter),
            "quarter" => Ok(Duration::Quarter),
            "dotted_eighth" => Ok(Duration::DottedEighth),
            "eighth" => Ok(Duration::Eighth),
            "sixteenth" => Ok(Duration::Sixteenth),
            _ => Err(EtudeError::UnknownDuration(s.to_string())),
        }
    }
}
