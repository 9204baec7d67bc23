//! Component placement: where buttons go, how they move, and how pages grow.
//!
//! [`InventoryLayout`] addresses slots globally: slot `s` of a layout with
//! per-page size `N` lives on page `s / N` at page-local slot `s % N`.
//! Single-grid layouts simply have one page.

mod paginated;
mod policy;
mod single;

pub use paginated::{
    page_turn_button, placeholder_button, NavigationPosition, NavigationStyle, Page,
    PaginatedLayout, NAVIGATION_SOUND, NEXT_PAGE_TITLE, PLACEHOLDER_ICON, PREVIOUS_PAGE_TITLE,
};
pub use policy::Policy;
pub use single::SingleLayout;

use crate::button::{Button, ItemView};
use crate::grid::SlotGrid;
use crate::host::Viewer;

/// Placement operations shared by every layout.
pub trait InventoryLayout {
    /// Slots per page.
    fn size(&self) -> usize;

    fn page_count(&self) -> usize {
        1
    }

    /// Grid of one page.
    fn page(&self, page: usize) -> Option<&SlotGrid>;

    fn page_mut(&mut self, page: usize) -> Option<&mut SlotGrid>;

    /// Slot the cursor starts on after creation or `clear`.
    fn first_slot(&self) -> usize {
        0
    }

    /// Cursor slot on the active page, `None` when no space is left.
    fn current_slot(&self) -> Option<usize>;

    /// Advance the cursor according to the layout's policy.
    fn next_slot(&mut self) -> Option<usize>;

    /// Button under the cursor.
    fn current(&self) -> Option<&Button>;

    /// Place a button at the cursor, overwriting. False if the cursor is exhausted.
    fn set_to_current(&mut self, button: Button) -> bool;

    /// Empty every slot and reset the cursor to [`first_slot`](Self::first_slot).
    fn clear(&mut self);

    /// Total addressable slots across all pages.
    fn slot_count(&self) -> usize {
        self.size() * self.page_count()
    }

    fn has_space_left(&self) -> bool {
        self.current_slot().is_some()
    }

    /// Insert at the cursor, advancing past occupied slots. False once no slot is left.
    fn add(&mut self, button: Button) -> bool {
        loop {
            if self.current_slot().is_none() {
                return false;
            }
            if self.current().is_none() {
                return self.set_to_current(button);
            }
            self.next_slot();
        }
    }

    fn button(&self, slot: usize) -> Option<&Button> {
        let (page, slot) = locate(self.size(), slot);
        self.button_on_page(page, slot)
    }

    fn button_on_page(&self, page: usize, slot: usize) -> Option<&Button> {
        self.page(page)?.get(slot)
    }

    /// Explicit placement, overwriting whatever is there. False if out of range.
    fn set(&mut self, slot: usize, button: Button) -> bool {
        let (page, slot) = locate(self.size(), slot);
        self.set_on_page(page, slot, button)
    }

    fn set_on_page(&mut self, page: usize, slot: usize, button: Button) -> bool {
        self.page_mut(page).is_some_and(|grid| grid.set(slot, button))
    }

    /// Atomic move: the button leaves `source` only if `target` is in range and empty.
    fn shift(&mut self, source: usize, target: usize) -> bool {
        let size = self.size();
        let (source_page, source_slot) = locate(size, source);
        let (target_page, target_slot) = locate(size, target);
        if source_page == target_page {
            return self
                .page_mut(source_page)
                .is_some_and(|grid| grid.shift(source_slot, target_slot));
        }
        let target_free = self
            .page(target_page)
            .is_some_and(|grid| grid.is_free(target_slot));
        if !target_free {
            return false;
        }
        match self.page_mut(source_page).and_then(|grid| grid.take(source_slot)) {
            Some(button) => self.set_on_page(target_page, target_slot, button),
            None => false,
        }
    }

    fn shift_relatively(&mut self, source: usize, delta: isize) -> bool {
        source
            .checked_add_signed(delta)
            .is_some_and(|target| self.shift(source, target))
    }

    /// Shift every slot accepted by `filter` by `delta`, in ascending slot order.
    fn shift_relatively_if(&mut self, filter: &mut dyn FnMut(usize) -> bool, delta: isize) -> bool {
        let mut moved = false;
        for slot in 0..self.slot_count() {
            if filter(slot) && self.shift_relatively(slot, delta) {
                moved = true;
            }
        }
        moved
    }

    /// Clear the first slot (page order, then slot order) holding `button`.
    fn remove(&mut self, button: &Button) -> bool {
        for page in 0..self.page_count() {
            if self.page_mut(page).is_some_and(|grid| grid.remove(button)) {
                return true;
            }
        }
        false
    }

    fn remove_if(&mut self, predicate: &mut dyn FnMut(&Button) -> bool) -> usize {
        let mut removed = 0;
        for page in 0..self.page_count() {
            if let Some(grid) = self.page_mut(page) {
                removed += grid.remove_if(predicate);
            }
        }
        removed
    }

    /// Place copies of `button` in every page-local slot accepted by `filter`, on every page.
    fn fill_if(&mut self, button: &Button, filter: &mut dyn FnMut(usize) -> bool) -> bool {
        let size = self.size();
        let mut filled = false;
        for page in 0..self.page_count() {
            let Some(grid) = self.page_mut(page) else {
                continue;
            };
            for slot in 0..size {
                if filter(slot) && grid.set(slot, button.clone()) {
                    filled = true;
                }
            }
        }
        filled
    }

    /// First button rendering as `item`, also trying each button's form for `viewer`.
    fn button_matching(&self, item: &ItemView, viewer: Option<&Viewer>) -> Option<&Button> {
        (0..self.page_count())
            .filter_map(|page| self.page(page))
            .flat_map(|grid| grid.occupied().map(|(_, button)| button))
            .find(|button| button.renders_as(item, viewer))
    }
}

fn locate(size: usize, slot: usize) -> (usize, usize) {
    (slot / size, slot % size)
}

/// Which family of layout a menu uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuKind {
    Single,
    Paginated,
}

/// The layout a menu owns.
#[derive(Clone)]
pub enum Layout {
    Single(SingleLayout),
    Paginated(PaginatedLayout),
}

macro_rules! dispatch {
    ($layout:expr, $inner:ident => $body:expr) => {
        match $layout {
            Layout::Single($inner) => $body,
            Layout::Paginated($inner) => $body,
        }
    };
}

impl Layout {
    pub fn kind(&self) -> MenuKind {
        match self {
            Layout::Single(_) => MenuKind::Single,
            Layout::Paginated(_) => MenuKind::Paginated,
        }
    }

    pub fn as_paginated(&self) -> Option<&PaginatedLayout> {
        match self {
            Layout::Paginated(layout) => Some(layout),
            Layout::Single(_) => None,
        }
    }

    pub fn as_paginated_mut(&mut self) -> Option<&mut PaginatedLayout> {
        match self {
            Layout::Paginated(layout) => Some(layout),
            Layout::Single(_) => None,
        }
    }
}

impl InventoryLayout for Layout {
    fn size(&self) -> usize {
        dispatch!(self, l => l.size())
    }

    fn page_count(&self) -> usize {
        dispatch!(self, l => l.page_count())
    }

    fn page(&self, page: usize) -> Option<&SlotGrid> {
        dispatch!(self, l => l.page(page))
    }

    fn page_mut(&mut self, page: usize) -> Option<&mut SlotGrid> {
        dispatch!(self, l => l.page_mut(page))
    }

    fn first_slot(&self) -> usize {
        dispatch!(self, l => l.first_slot())
    }

    fn current_slot(&self) -> Option<usize> {
        dispatch!(self, l => l.current_slot())
    }

    fn next_slot(&mut self) -> Option<usize> {
        dispatch!(self, l => l.next_slot())
    }

    fn current(&self) -> Option<&Button> {
        dispatch!(self, l => l.current())
    }

    fn set_to_current(&mut self, button: Button) -> bool {
        dispatch!(self, l => l.set_to_current(button))
    }

    fn clear(&mut self) {
        dispatch!(self, l => l.clear())
    }

    fn add(&mut self, button: Button) -> bool {
        dispatch!(self, l => l.add(button))
    }
}

impl From<SingleLayout> for Layout {
    fn from(layout: SingleLayout) -> Self {
        Layout::Single(layout)
    }
}

impl From<PaginatedLayout> for Layout {
    fn from(layout: PaginatedLayout) -> Self {
        Layout::Paginated(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginated(size: usize) -> Layout {
        PaginatedLayout::new(size, NavigationStyle::default()).unwrap().into()
    }

    #[test]
    fn shift_across_pages_is_atomic() {
        let mut layout = paginated(18);
        layout.as_paginated_mut().unwrap().new_page();
        let a = Button::new("a");
        assert!(layout.set(0, a.clone()));
        // Page 1, slot 9 is the previous-page button (bottom row).
        assert!(!layout.shift(0, 18 + 9));
        assert_eq!(layout.button(0), Some(&a));
        assert!(layout.shift(0, 18 + 2));
        assert!(layout.button(0).is_none());
        assert_eq!(layout.button_on_page(1, 2), Some(&a));
    }

    #[test]
    fn shift_relatively_rejects_negative_underflow() {
        let mut layout: Layout = SingleLayout::flow(9).unwrap().into();
        layout.set(0, Button::new("edge"));
        assert!(!layout.shift_relatively(0, -1));
        assert!(layout.shift_relatively(0, 3));
        assert_eq!(layout.button(3).unwrap().title(), "edge");
    }

    #[test]
    fn shift_relatively_if_moves_matching_slots() {
        let mut layout: Layout = SingleLayout::flow(9).unwrap().into();
        for slot in [2, 3, 4] {
            layout.set(slot, Button::new(format!("B{slot}")));
        }
        // 3 cannot move onto 2; 4 then cannot move onto the still occupied 3.
        assert!(!layout.shift_relatively_if(&mut |s| s >= 3, -1));
        assert_eq!(layout.button(2).unwrap().title(), "B2");
        assert_eq!(layout.button(3).unwrap().title(), "B3");

        let mut layout: Layout = SingleLayout::flow(9).unwrap().into();
        layout.set(5, Button::new("x"));
        layout.set(6, Button::new("y"));
        assert!(layout.shift_relatively_if(&mut |s| s >= 5, -1));
        assert_eq!(layout.button(4).unwrap().title(), "x");
        assert_eq!(layout.button(5).unwrap().title(), "y");
        assert!(layout.button(6).is_none());
    }

    #[test]
    fn fill_if_applies_to_every_page() {
        let mut layout = paginated(18);
        layout.as_paginated_mut().unwrap().new_page();
        let filler = Button::new("filler");
        assert!(layout.fill_if(&filler, &mut |slot| slot == 4));
        assert_eq!(layout.button_on_page(0, 4), Some(&filler));
        assert_eq!(layout.button_on_page(1, 4), Some(&filler));
        assert!(!layout.fill_if(&filler, &mut |_| false));
    }

    #[test]
    fn remove_searches_all_pages() {
        let mut layout = paginated(9);
        let target = Button::new("target");
        layout.as_paginated_mut().unwrap().new_page();
        assert!(layout.set_on_page(1, 3, target.clone()));
        assert!(layout.remove(&target));
        assert!(layout.button_on_page(1, 3).is_none());
        assert!(!layout.remove(&target));
    }

    #[test]
    fn button_matching_uses_rendering() {
        let mut layout: Layout = SingleLayout::flow(9).unwrap().into();
        let plain = Button::new("plain");
        let personal = Button::builder()
            .title("?")
            .context_modifier(|b, v| b.set_title(format!("Hi {}", v.name)))
            .build();
        layout.add(plain.clone());
        layout.add(personal.clone());

        assert_eq!(layout.button_matching(&plain.render(), None), Some(&plain));
        let steve = Viewer::new(7, "Steve");
        let rendered = personal.render_for(&steve);
        assert!(layout.button_matching(&rendered, None).is_none());
        assert_eq!(layout.button_matching(&rendered, Some(&steve)), Some(&personal));
    }

    #[test]
    fn kind_and_copy() {
        let mut layout: Layout = SingleLayout::centered(9).unwrap().into();
        assert_eq!(layout.kind(), MenuKind::Single);
        layout.add(Button::new("one"));
        let copy = layout.clone();
        assert_eq!(copy.current_slot(), layout.current_slot());
        assert_eq!(copy.button(4), layout.button(4));
        assert_eq!(paginated(9).kind(), MenuKind::Paginated);
    }
}
