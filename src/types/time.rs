// Copyright (c) 2024 Mike Tsao

//! Handles musical and wall-clock time.

use crate::error::EtudeError;
use core::{
    fmt,
    ops::{Mul, RangeInclusive},
};
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use synonym::Synonym;

/// Beats per minute.
#[derive(Clone, Copy, Debug, Derivative, PartialEq, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(rename_all = "kebab-case")]
pub struct Tempo(#[derivative(Default(value = "100.0"))] pub f64);
impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{:0.2} BPM", self.0))
    }
}
impl From<u16> for Tempo {
    fn from(value: u16) -> Self {
        Self(value as f64)
    }
}
impl Tempo {
    /// The fastest practice tempo we'll allow.
    pub const MAX_VALUE: f64 = 200.0;

    /// The slowest practice tempo we'll allow. Anything below this is less a
    /// slow practice session than a stopped one.
    pub const MIN_VALUE: f64 = 40.0;

    /// Beats per second.
    pub fn bps(&self) -> f64 {
        self.0 / 60.0
    }

    /// MIN..=MAX
    pub const fn range() -> RangeInclusive<f64> {
        Self::MIN_VALUE..=Self::MAX_VALUE
    }
}

/// [Beats] is the universal unit of musical time, expressed in quarter-note
/// beats. A "tick" is a sixteenth of a beat, so the shortest notated duration
/// (a sixteenth note, a quarter of a beat) is four ticks. Every notated
/// duration is a whole number of ticks, which keeps measure arithmetic exact;
/// there is no floating-point drift to push a note over a barline.
#[derive(Synonym, Serialize, Deserialize)]
#[synonym(skip(Display))]
pub struct Beats(usize);
#[allow(missing_docs)]
impl Beats {
    /// A tick is a sixteenth of a beat.
    pub const TICKS_PER_BEAT: usize = 16;

    pub const ZERO: Beats = Beats::new_with_ticks(0);
    pub const ONE: Beats = Beats::new_with_beats(1);

    pub const fn new_with_beats(beats: usize) -> Self {
        Self::new_with_ticks(beats * Self::TICKS_PER_BEAT)
    }

    pub const fn new_with_ticks(ticks: usize) -> Self {
        Self(ticks)
    }

    // The entire quantity expressed in ticks.
    pub const fn total_ticks(&self) -> usize {
        self.0
    }

    // The entire quantity expressed in whole beats, rounded down.
    pub const fn total_beats(&self) -> usize {
        self.0 / Self::TICKS_PER_BEAT
    }

    /// The tick remainder after [Self::total_beats()] whole beats.
    pub const fn ticks(&self) -> usize {
        self.0 % Self::TICKS_PER_BEAT
    }

    /// The quantity as a floating-point beat count. Quarters of a beat are
    /// exact in binary, so this is lossless for every notated duration.
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / Self::TICKS_PER_BEAT as f64
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Wall-clock time taken to perform this many beats at the given tempo.
    pub fn as_seconds(&self, tempo: Tempo) -> Seconds {
        Seconds(self.to_f64() / tempo.bps())
    }
}
impl fmt::Display for Beats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}
impl Mul<usize> for Beats {
    type Output = Self;

    fn mul(self, rhs: usize) -> Self::Output {
        Self(self.0 * rhs)
    }
}

/// [TimeSignature] represents a music [time
/// signature](https://en.wikipedia.org/wiki/Time_signature).
///
/// The top number tells how many beats are in a measure, counted in the note
/// value named by the bottom number. The bottom number is expressed as a
/// reciprocal; if it's 4, a beat is a quarter-note. An exercise generated in
/// 3/4 therefore has a measure budget of three quarter-note [Beats], and in
/// 6/8 a budget of three as well (six eighth-notes).
#[derive(Clone, Copy, Debug, Derivative, Eq, PartialEq, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(rename_all = "kebab-case")]
pub struct TimeSignature {
    /// The number of beats in a measure.
    #[derivative(Default(value = "4"))]
    pub top: usize,

    /// The value of a beat. Expressed as a reciprocal; for example, if it's 4,
    /// then the beat value is 1/4 or a quarter note.
    #[derivative(Default(value = "4"))]
    pub bottom: usize,
}
impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{}/{}", self.top, self.bottom))
    }
}
#[allow(missing_docs)]
impl TimeSignature {
    /// C time = common time = 4/4
    /// <https://en.wikipedia.org/wiki/Time_signature>
    pub const COMMON_TIME: Self = TimeSignature { top: 4, bottom: 4 };

    /// 3/4, the signature of every waltz-flavored exercise.
    pub const WALTZ_TIME: Self = TimeSignature { top: 3, bottom: 4 };

    /// The shortest beat value we accept as a bottom number.
    pub const LARGEST_BOTTOM: usize = 16;

    pub fn new_with(top: usize, bottom: usize) -> Result<Self, EtudeError> {
        if top == 0 {
            Err(EtudeError::InvalidConfig(
                "time signature top can't be zero".to_string(),
            ))
        } else if bottom.is_power_of_two() && bottom <= Self::LARGEST_BOTTOM {
            Ok(Self { top, bottom })
        } else {
            Err(EtudeError::InvalidConfig(format!(
                "time signature bottom {} isn't a power of two within 1..={}",
                bottom,
                Self::LARGEST_BOTTOM
            )))
        }
    }

    /// Returns the duration, in quarter-note [Beats], of a single measure of
    /// music having this time signature. This is the budget that a measure's
    /// events must total exactly.
    pub const fn measure_beats(&self) -> Beats {
        Beats::new_with_ticks(self.top * 4 * Beats::TICKS_PER_BEAT / self.bottom)
    }

    /// The top value.
    pub fn top(&self) -> usize {
        self.top
    }

    /// The bottom value.
    pub fn bottom(&self) -> usize {
        self.bottom
    }
}

/// Represents the [seconds](https://en.wikipedia.org/wiki/Second) unit of time.
#[derive(Synonym, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Seconds(pub f64);
impl Seconds {
    /// Zero seconds.
    pub const fn zero() -> Seconds {
        Seconds(0.0)
    }
}
