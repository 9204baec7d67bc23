//! Fixed-size slot grid backing one chest page.
//!
//! A grid holds `rows * 9` slots, each empty or holding one [`Button`].
//! The length is fixed at construction; every accessor is bounds checked.

use crate::button::Button;
use crate::error::GuiError;

/// Number of slots in one chest row.
pub const ROW_WIDTH: usize = 9;

/// Column of the center slot in every row.
pub const CENTER_COLUMN: usize = 4;

/// Fixed-length sequence of slots.
#[derive(Clone, Default)]
pub struct SlotGrid {
    slots: Vec<Option<Button>>,
}

impl SlotGrid {
    /// Create an empty grid. `size` must be a positive multiple of [`ROW_WIDTH`].
    pub fn new(size: usize) -> Result<Self, GuiError> {
        validate_size(size)?;
        Ok(Self::empty(size))
    }

    /// Empty grid of an already validated size.
    pub(crate) fn empty(size: usize) -> Self {
        Self {
            slots: (0..size).map(|_| None).collect(),
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.slots.len() / ROW_WIDTH
    }

    /// Button in `slot`, `None` if the slot is empty or out of range.
    pub fn get(&self, slot: usize) -> Option<&Button> {
        self.slots.get(slot).and_then(|s| s.as_ref())
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Button> {
        self.slots.get_mut(slot).and_then(|s| s.as_mut())
    }

    /// Whether `slot` is in range and empty.
    pub fn is_free(&self, slot: usize) -> bool {
        matches!(self.slots.get(slot), Some(None))
    }

    /// Place a button, overwriting the slot. Returns false if out of range.
    pub fn set(&mut self, slot: usize, button: Button) -> bool {
        match self.slots.get_mut(slot) {
            Some(s) => {
                *s = Some(button);
                true
            }
            None => false,
        }
    }

    /// Empty `slot` and return what was there.
    pub fn take(&mut self, slot: usize) -> Option<Button> {
        self.slots.get_mut(slot).and_then(|s| s.take())
    }

    /// Move the button in `source` to `target`.
    ///
    /// The move is atomic: the button only leaves `source` when `target` is in
    /// range and empty. Returns false (and changes nothing) otherwise, including
    /// when `source` is empty.
    pub fn shift(&mut self, source: usize, target: usize) -> bool {
        if source == target || self.get(source).is_none() || !self.is_free(target) {
            return false;
        }
        let button = self.slots[source].take();
        self.slots[target] = button;
        true
    }

    /// Clear the first slot holding a button equal to `button`.
    pub fn remove(&mut self, button: &Button) -> bool {
        match self.slots.iter().position(|s| s.as_ref() == Some(button)) {
            Some(i) => {
                self.slots[i] = None;
                true
            }
            None => false,
        }
    }

    /// Clear every slot whose button satisfies `predicate`, in slot order.
    /// Returns the number of cleared slots.
    pub fn remove_if(&mut self, predicate: &mut dyn FnMut(&Button) -> bool) -> usize {
        let mut removed = 0;
        for slot in &mut self.slots {
            if slot.as_ref().is_some_and(|b| predicate(b)) {
                *slot = None;
                removed += 1;
            }
        }
        removed
    }

    /// Empty every slot.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    /// Emptiness flags of one row (`true` = empty).
    pub fn row_vacancy(&self, row: usize) -> [bool; ROW_WIDTH] {
        let mut vacancy = [true; ROW_WIDTH];
        let start = row * ROW_WIDTH;
        for (column, flag) in vacancy.iter_mut().enumerate() {
            *flag = self.get(start + column).is_none();
        }
        vacancy
    }

    /// Iterate over all slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = Option<&Button>> {
        self.slots.iter().map(|s| s.as_ref())
    }

    /// Iterate over occupied slots as `(slot, button)`.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &Button)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|b| (i, b)))
    }

    /// Number of occupied slots.
    pub fn count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

pub(crate) fn validate_size(size: usize) -> Result<(), GuiError> {
    if size == 0 || size % ROW_WIDTH != 0 {
        return Err(GuiError::InvalidSize(size));
    }
    Ok(())
}
