//! Placement cursor shared by all layouts.

/// Slot where the next button will be inserted, or exhausted when no space is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor(Option<usize>);

impl Cursor {
    pub fn at(slot: usize) -> Self {
        Self(Some(slot))
    }

    pub fn exhausted() -> Self {
        Self(None)
    }

    /// Current slot, `None` once exhausted.
    pub fn slot(self) -> Option<usize> {
        self.0
    }

    pub fn is_exhausted(self) -> bool {
        self.0.is_none()
    }

    /// Move to `slot`, or exhaust the cursor if `slot >= size`.
    pub fn move_to(&mut self, slot: usize, size: usize) -> Option<usize> {
        self.0 = (slot < size).then_some(slot);
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_past_end_exhausts() {
        let mut cursor = Cursor::at(7);
        assert_eq!(cursor.move_to(8, 9), Some(8));
        assert_eq!(cursor.move_to(9, 9), None);
        assert!(cursor.is_exhausted());
        assert_eq!(Cursor::exhausted().slot(), None);
    }
}
