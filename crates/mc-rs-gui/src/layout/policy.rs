//! Placement policies for single-grid layouts.

use crate::grid::{CENTER_COLUMN, ROW_WIDTH};

/// How a single-grid layout picks the next slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Left to right, top to bottom.
    Flow,
    /// Rows fill outward from the center column and stay symmetric.
    Centered,
}

impl Policy {
    pub fn first_slot(self) -> usize {
        match self {
            Policy::Flow => 0,
            Policy::Centered => CENTER_COLUMN,
        }
    }
}

/// Row vacancy (`true` = empty) of a symmetric row holding `n` buttons, indexed by `n`.
pub(super) const CENTERED_STATES: [[bool; ROW_WIDTH]; ROW_WIDTH] = {
    const E: bool = true;
    const B: bool = false;
    [
        [E, E, E, E, E, E, E, E, E],
        [E, E, E, E, B, E, E, E, E],
        [E, E, E, B, E, B, E, E, E],
        [E, E, E, B, B, B, E, E, E],
        [E, E, B, B, E, B, B, E, E],
        [E, E, B, B, B, B, B, E, E],
        [E, B, B, B, E, B, B, B, E],
        [E, B, B, B, B, B, B, B, E],
        [B, B, B, B, E, B, B, B, B],
    ]
};

/// Column the next button goes to once a row in state `n` has been compacted.
pub(super) const CENTERED_NEXT_COLUMN: [usize; ROW_WIDTH] = [4, 5, 5, 6, 6, 7, 7, 8, 8];

/// What the centered policy does with a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum CenteredStep {
    /// Shift the right half (columns after the center) one slot left, then place at `column`.
    CompactRight { column: usize },
    /// Shift the left half (columns 1..=center) one slot left, then place at `column`.
    CompactLeft { column: usize },
    /// Row is full; continue at the next row's center.
    NextRow,
    /// Row is in no known state; take the next free column after the cursor.
    Fallback,
}

pub(super) fn centered_step(vacancy: &[bool; ROW_WIDTH]) -> CenteredStep {
    if vacancy.iter().all(|empty| !empty) {
        return CenteredStep::NextRow;
    }
    match CENTERED_STATES.iter().position(|state| state == vacancy) {
        Some(count) if vacancy[CENTER_COLUMN] => CenteredStep::CompactRight {
            column: CENTERED_NEXT_COLUMN[count],
        },
        Some(count) => CenteredStep::CompactLeft {
            column: CENTERED_NEXT_COLUMN[count],
        },
        None => CenteredStep::Fallback,
    }
}
