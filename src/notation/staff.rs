// Copyright (c) 2024 Mike Tsao

//! Maps pitches onto the grand staff.

use crate::{
    error::EtudeError,
    types::{MidiPitch, NoteName},
};
use core::fmt;
use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, IntoStaticStr};

/// [Staff] names which staff of the grand staff governs a note's placement.
/// Middle C is a special case: it sits on the single ledger line between the
/// staves and belongs to both, so the trainer can draw it on either.
#[derive(
    Clone, Copy, Debug, EnumIter, Eq, Hash, IntoStaticStr, PartialEq, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "snake_case")]
pub enum Staff {
    /// The G clef, governing everything above middle C.
    Treble,
    /// The F clef, governing everything below middle C.
    Bass,
    /// Middle C only. Placement is computed relative to the treble staff.
    Both,
}
impl Staff {
    // The diatonic letter index of each staff's bottom line. E4 for treble,
    // G2 for bass. One letter index per half-line step.
    const TREBLE_BOTTOM_LINE: i16 = 30;
    const BASS_BOTTOM_LINE: i16 = 18;

    /// The line offset of a staff's top line. Lines sit at even offsets 0, 2,
    /// 4, 6, 8 and spaces at the odd offsets between them.
    pub const TOP_LINE_OFFSET: i8 = 8;

    /// Which staff governs the given pitch.
    pub fn for_pitch(pitch: MidiPitch) -> Staff {
        if pitch < MidiPitch::MIDDLE_C {
            Staff::Bass
        } else if pitch == MidiPitch::MIDDLE_C {
            Staff::Both
        } else {
            Staff::Treble
        }
    }

    /// The lowercase name, e.g. "treble".
    pub fn name(&self) -> &'static str {
        (*self).into()
    }

    const fn bottom_line_letter_index(&self) -> i16 {
        match self {
            Staff::Treble | Staff::Both => Self::TREBLE_BOTTOM_LINE,
            Staff::Bass => Self::BASS_BOTTOM_LINE,
        }
    }
}
impl fmt::Display for Staff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// [PitchPosition] is where a pitch sits on the grand staff: the governing
/// [Staff], the vertical placement on it, how many ledger lines it needs, and
/// the spelled note name. Positions are derived from a [MidiPitch] on demand
/// and never stored with exercise events.
///
/// `line_offset` counts half-line steps above the staff's bottom line, one
/// step per letter name. Even offsets are lines, odd offsets are spaces, and
/// negative offsets hang below the staff. A sharp sits at the same offset as
/// its natural; the accidental is carried by `note_name`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PitchPosition {
    /// The staff this note belongs on.
    pub staff: Staff,
    /// Half-line steps above the governing staff's bottom line.
    pub line_offset: i8,
    /// Ledger lines needed to reach the note from the staff.
    pub ledger_lines: u8,
    /// The spelled name, e.g. "C#4".
    pub note_name: NoteName,
}
impl PitchPosition {
    /// Computes the staff position of the given pitch. Anything outside the
    /// 88-key piano range is refused; callers that want clamping must do it
    /// themselves, loudly.
    pub fn new_with(pitch: MidiPitch) -> Result<Self, EtudeError> {
        if !pitch.is_piano_key() {
            return Err(EtudeError::PitchOutOfRange(pitch.0));
        }
        let staff = Staff::for_pitch(pitch);
        let line_offset = (pitch.letter_index() - staff.bottom_line_letter_index()) as i8;
        Ok(Self {
            staff,
            line_offset,
            ledger_lines: Self::ledger_lines_for_offset(line_offset),
            note_name: pitch.note_name(),
        })
    }

    /// True if the note sits on a line (possibly a ledger line), false if it
    /// sits in a space.
    pub const fn is_on_line(&self) -> bool {
        self.line_offset % 2 == 0
    }

    // Notes just beyond the staff (first space above or below) need no ledger
    // line yet. Each two half-line steps past that add one. The count rounds
    // toward the staff.
    const fn ledger_lines_for_offset(line_offset: i8) -> u8 {
        if line_offset > Staff::TOP_LINE_OFFSET {
            ((line_offset - Staff::TOP_LINE_OFFSET) / 2) as u8
        } else if line_offset < 0 {
            (-line_offset / 2) as u8
        } else {
            0
        }
    }
}
impl fmt::Display for PitchPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} staff, offset {})",
            self.note_name, self.staff, self.line_offset
        )
    }
}
