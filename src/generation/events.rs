// Copyright (c) 2024 Mike Tsao

//! The exercise data model: notated events and the [Exercise] that holds
//! them.

use crate::{
    error::EtudeError,
    types::{Beats, Duration, MidiPitch, TimeSignature},
};
use core::fmt;
use delegate::delegate;
use serde::{Deserialize, Serialize};

/// What sounds (or doesn't) at a position. Every variant is explicit; nothing
/// downstream should sniff fields to guess what an event is.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    /// A single pitch.
    Note(MidiPitch),
    /// Two or more pitches struck together. Sorted ascending, deduplicated,
    /// never empty; build one with [EventKind::chord].
    Chord(Vec<MidiPitch>),
    /// Silence. Displayed, not played.
    Rest,
}
impl EventKind {
    /// Builds a chord from the given pitches, sorting and deduplicating.
    /// An empty pitch set is refused.
    pub fn chord(mut pitches: Vec<MidiPitch>) -> Result<EventKind, EtudeError> {
        if pitches.is_empty() {
            return Err(EtudeError::InvalidConfig(
                "a chord needs at least one pitch".to_string(),
            ));
        }
        pitches.sort_unstable();
        pitches.dedup();
        Ok(EventKind::Chord(pitches))
    }

    /// True for [EventKind::Rest].
    pub const fn is_rest(&self) -> bool {
        matches!(self, EventKind::Rest)
    }
}

/// Where an event sits in an exercise: a 0-based measure index plus the beat
/// offset from that measure's start. Offsets stay within the measure's
/// budget; an event never straddles a barline.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EventPosition {
    /// The measure, starting at 0.
    pub measure: usize,
    /// Beats from the start of the measure.
    pub offset: Beats,
}
impl fmt::Display for EventPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.measure, self.offset)
    }
}

/// One notated event: a position, a duration from the rhythm table, and a
/// kind. Durations are always table entries, never raw beat counts.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NoteEvent {
    #[allow(missing_docs)]
    pub position: EventPosition,
    #[allow(missing_docs)]
    pub duration: Duration,
    #[allow(missing_docs)]
    pub kind: EventKind,
}
impl NoteEvent {
    /// The event's length in beats.
    pub fn beats(&self) -> Beats {
        self.duration.beats()
    }
}

/// [Exercise] is the immutable product of generation: an ordered run of
/// events across a known number of measures, in a known time signature.
/// Within every measure the event durations sum exactly to the signature's
/// beat budget.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Exercise {
    time_signature: TimeSignature,
    measure_count: usize,
    events: Vec<NoteEvent>,
}
impl Exercise {
    /// Events must already be in playing order with positions grouped by
    /// ascending measure; the generators guarantee this.
    pub(crate) fn new_with(
        time_signature: TimeSignature,
        measure_count: usize,
        events: Vec<NoteEvent>,
    ) -> Self {
        Self {
            time_signature,
            measure_count,
            events,
        }
    }

    delegate! {
        to self.events {
            /// How many events the exercise holds, rests included.
            #[call(len)]
            pub fn event_count(&self) -> usize;
        }
    }

    #[allow(missing_docs)]
    pub fn time_signature(&self) -> TimeSignature {
        self.time_signature
    }

    #[allow(missing_docs)]
    pub fn measure_count(&self) -> usize {
        self.measure_count
    }

    /// The events in playing order.
    pub fn events(&self) -> &[NoteEvent] {
        &self.events
    }

    /// The events grouped by measure, in order. Renderers draw a measure at
    /// a time, and the measure-sum invariant is checked against this view.
    pub fn measures(&self) -> Vec<&[NoteEvent]> {
        let mut measures = Vec::with_capacity(self.measure_count);
        let mut start = 0;
        for measure in 0..self.measure_count {
            let length = self.events[start..]
                .iter()
                .take_while(|event| event.position.measure == measure)
                .count();
            measures.push(&self.events[start..start + length]);
            start += length;
        }
        measures
    }

    /// Total notated length.
    pub fn duration(&self) -> Beats {
        self.time_signature.measure_beats() * self.measure_count
    }
}
