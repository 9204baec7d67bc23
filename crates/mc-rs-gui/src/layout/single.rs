use tracing::debug;

use super::policy::{centered_step, CenteredStep, Policy};
use super::InventoryLayout;
use crate::button::Button;
use crate::cursor::Cursor;
use crate::error::GuiError;
use crate::grid::{SlotGrid, CENTER_COLUMN, ROW_WIDTH};

/// One grid plus a cursor driven by a [`Policy`].
#[derive(Clone)]
pub struct SingleLayout {
    grid: SlotGrid,
    cursor: Cursor,
    policy: Policy,
}

impl SingleLayout {
    pub fn new(size: usize, policy: Policy) -> Result<Self, GuiError> {
        let grid = SlotGrid::new(size)?;
        Ok(Self {
            grid,
            cursor: Cursor::at(policy.first_slot()),
            policy,
        })
    }

    pub fn flow(size: usize) -> Result<Self, GuiError> {
        Self::new(size, Policy::Flow)
    }

    pub fn centered(size: usize) -> Result<Self, GuiError> {
        Self::new(size, Policy::Centered)
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    fn centered_next(&mut self, slot: usize) -> usize {
        let row = slot / ROW_WIDTH;
        let row_start = row * ROW_WIDTH;
        let center = row_start + CENTER_COLUMN;
        let row_end = row_start + ROW_WIDTH;
        match centered_step(&self.grid.row_vacancy(row)) {
            CenteredStep::CompactRight { column } => {
                self.shift_relatively_if(&mut |s| s > center && s < row_end, -1);
                row_start + column
            }
            CenteredStep::CompactLeft { column } => {
                self.shift_relatively_if(&mut |s| s > row_start && s <= center, -1);
                row_start + column
            }
            CenteredStep::NextRow => center + ROW_WIDTH,
            CenteredStep::Fallback => {
                debug!("Row {row} is not symmetric, falling back to the next free slot");
                (slot + 1..row_end)
                    .find(|s| self.grid.is_free(*s))
                    .unwrap_or(center + ROW_WIDTH)
            }
        }
    }
}

impl InventoryLayout for SingleLayout {
    fn size(&self) -> usize {
        self.grid.len()
    }

    fn page(&self, page: usize) -> Option<&SlotGrid> {
        (page == 0).then_some(&self.grid)
    }

    fn page_mut(&mut self, page: usize) -> Option<&mut SlotGrid> {
        (page == 0).then_some(&mut self.grid)
    }

    fn first_slot(&self) -> usize {
        self.policy.first_slot()
    }

    fn current_slot(&self) -> Option<usize> {
        self.cursor.slot()
    }

    fn next_slot(&mut self) -> Option<usize> {
        let slot = self.cursor.slot()?;
        let next = match self.policy {
            Policy::Flow => slot + 1,
            Policy::Centered => self.centered_next(slot),
        };
        let size = self.grid.len();
        self.cursor.move_to(next, size)
    }

    fn current(&self) -> Option<&Button> {
        self.grid.get(self.cursor.slot()?)
    }

    fn set_to_current(&mut self, button: Button) -> bool {
        match self.cursor.slot() {
            Some(slot) => self.grid.set(slot, button),
            None => false,
        }
    }

    fn clear(&mut self) {
        self.grid.clear();
        self.cursor = Cursor::at(self.first_slot());
    }
}
