//! Multi-page layout with previous/next navigation buttons.
//!
//! Pages are append-only: adding past the last slot of the active page opens a
//! fresh page, and only `clear` discards them. Every page carries the
//! navigation row described by its [`NavigationStyle`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::InventoryLayout;
use crate::button::{Button, ButtonSound};
use crate::cursor::Cursor;
use crate::error::GuiError;
use crate::grid::{validate_size, SlotGrid, ROW_WIDTH};

pub const PREVIOUS_PAGE_TITLE: &str = "§6PREVIOUS PAGE";
pub const NEXT_PAGE_TITLE: &str = "§6NEXT PAGE";
pub const NAVIGATION_SOUND: &str = "ui.button.click";
pub const PLACEHOLDER_ICON: &str = "minecraft:white_stained_glass_pane";

/// Row holding the navigation buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationPosition {
    Top,
    Center,
    #[default]
    Bottom,
}

impl NavigationPosition {
    /// First slot of the navigation row in a page of `size` slots.
    pub fn row_start(self, size: usize) -> usize {
        match self {
            NavigationPosition::Top => 0,
            NavigationPosition::Center => ROW_WIDTH * (size / ROW_WIDTH / 2),
            NavigationPosition::Bottom => size - ROW_WIDTH,
        }
    }

    /// Slot of the previous (`next == false`) or next page button.
    pub fn slot(self, size: usize, next: bool) -> usize {
        let start = self.row_start(size);
        if next {
            start + ROW_WIDTH - 1
        } else {
            start
        }
    }
}

/// Buttons and placement of the navigation row.
#[derive(Clone)]
pub struct NavigationStyle {
    pub position: NavigationPosition,
    /// Fill the rest of the navigation row with placeholders.
    pub placeholders: bool,
    pub previous: Button,
    pub next: Button,
    pub placeholder: Button,
}

impl NavigationStyle {
    pub fn with_position(position: NavigationPosition) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

impl Default for NavigationStyle {
    fn default() -> Self {
        Self {
            position: NavigationPosition::default(),
            placeholders: false,
            previous: page_turn_button(PREVIOUS_PAGE_TITLE, Some(NAVIGATION_SOUND), -1),
            next: page_turn_button(NEXT_PAGE_TITLE, Some(NAVIGATION_SOUND), 1),
            placeholder: placeholder_button(PLACEHOLDER_ICON),
        }
    }
}

/// A button that reopens the menu `delta` pages away from the viewer's current page.
pub fn page_turn_button(title: impl Into<String>, sound: Option<&str>, delta: isize) -> Button {
    let mut button = Button::builder()
        .title(title)
        .on_interact(move |event| {
            event.open_relative(delta);
            Ok(())
        })
        .build();
    button.set_sound(sound.map(ButtonSound::new));
    button
}

/// An inert, untitled filler.
pub fn placeholder_button(icon: impl Into<String>) -> Button {
    Button::with_icon(icon, "")
}

/// One page: a grid and an optional title override.
#[derive(Clone)]
pub struct Page {
    grid: SlotGrid,
    title: Option<String>,
}

impl Page {
    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

/// Flow placement over a growing list of pages.
#[derive(Clone)]
pub struct PaginatedLayout {
    size: usize,
    pages: Vec<Page>,
    page: usize,
    cursor: Cursor,
    style: NavigationStyle,
}

impl PaginatedLayout {
    /// Create a layout with one page of `size` slots.
    pub fn new(size: usize, style: NavigationStyle) -> Result<Self, GuiError> {
        validate_size(size)?;
        let mut layout = Self {
            size,
            pages: Vec::new(),
            page: 0,
            cursor: Cursor::at(0),
            style,
        };
        layout.new_page();
        Ok(layout)
    }

    pub fn with_position(size: usize, position: NavigationPosition) -> Result<Self, GuiError> {
        Self::new(size, NavigationStyle::with_position(position))
    }

    /// Append an empty page with its navigation row and make it the insertion page.
    pub fn new_page(&mut self) {
        let mut grid = SlotGrid::empty(self.size);
        let position = self.style.position;
        grid.set(position.slot(self.size, false), self.style.previous.clone());
        grid.set(position.slot(self.size, true), self.style.next.clone());
        self.pages.push(Page { grid, title: None });
        self.page = self.pages.len() - 1;
        if self.style.placeholders {
            self.place_placeholders(self.page);
        }
        self.cursor = Cursor::at(0);
        debug!(page = self.page, "created page");
    }

    /// Page receiving added buttons.
    pub fn active_page(&self) -> usize {
        self.page
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn style(&self) -> &NavigationStyle {
        &self.style
    }

    /// Slots of the previous and next buttons on every page.
    pub fn navigation_slots(&self) -> (usize, usize) {
        let position = self.style.position;
        (position.slot(self.size, false), position.slot(self.size, true))
    }

    /// Slots a fresh page leaves for content.
    pub fn content_capacity(&self) -> usize {
        let reserved = if self.style.placeholders {
            ROW_WIDTH
        } else {
            2
        };
        self.size - reserved
    }

    pub fn placeholders(&self) -> bool {
        self.style.placeholders
    }

    /// Add placeholders to every page, or remove them all.
    pub fn set_placeholders(&mut self, enabled: bool) {
        self.style.placeholders = enabled;
        if enabled {
            for page in 0..self.pages.len() {
                self.place_placeholders(page);
            }
        } else {
            let placeholder = self.style.placeholder.clone();
            self.remove_if(&mut |button| *button == placeholder);
        }
    }

    fn place_placeholders(&mut self, page: usize) {
        let start = self.style.position.row_start(self.size);
        let placeholder = &self.style.placeholder;
        if let Some(page) = self.pages.get_mut(page) {
            for slot in start + 1..start + ROW_WIDTH - 1 {
                page.grid.set(slot, placeholder.clone());
            }
        }
    }

    /// Title override of `page`, if any.
    pub fn page_title(&self, page: usize) -> Option<&str> {
        self.pages.get(page).and_then(Page::title)
    }

    pub fn set_page_title(&mut self, page: usize, title: impl Into<String>) -> Result<(), GuiError> {
        let pages = self.pages.len();
        let entry = self
            .pages
            .get_mut(page)
            .ok_or(GuiError::PageOutOfRange { page, pages })?;
        entry.title = Some(title.into());
        Ok(())
    }

    pub fn clear_page_title(&mut self, page: usize) -> Option<String> {
        self.pages.get_mut(page).and_then(|p| p.title.take())
    }
}

impl InventoryLayout for PaginatedLayout {
    fn size(&self) -> usize {
        self.size
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, page: usize) -> Option<&SlotGrid> {
        self.pages.get(page).map(|p| &p.grid)
    }

    fn page_mut(&mut self, page: usize) -> Option<&mut SlotGrid> {
        self.pages.get_mut(page).map(|p| &mut p.grid)
    }

    fn current_slot(&self) -> Option<usize> {
        self.cursor.slot()
    }

    fn next_slot(&mut self) -> Option<usize> {
        let slot = self.cursor.slot()?;
        if slot + 1 >= self.size {
            self.new_page();
            return self.cursor.slot();
        }
        self.cursor.move_to(slot + 1, self.size)
    }

    fn current(&self) -> Option<&Button> {
        self.page(self.page)?.get(self.cursor.slot()?)
    }

    fn set_to_current(&mut self, button: Button) -> bool {
        let Some(slot) = self.cursor.slot() else {
            return false;
        };
        let page = self.page;
        self.set_on_page(page, slot, button)
    }

    fn clear(&mut self) {
        self.pages.clear();
        self.new_page();
    }

    fn add(&mut self, button: Button) -> bool {
        if self.content_capacity() == 0 {
            return false;
        }
        loop {
            if self.current().is_none() {
                return self.set_to_current(button);
            }
            self.next_slot();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(layout: &PaginatedLayout, page: usize) -> usize {
        layout.page(page).map(SlotGrid::count).unwrap_or(0)
    }

    #[test]
    fn navigation_slots_per_position() {
        assert_eq!(NavigationPosition::Top.slot(27, false), 0);
        assert_eq!(NavigationPosition::Top.slot(27, true), 8);
        assert_eq!(NavigationPosition::Center.slot(27, false), 9);
        assert_eq!(NavigationPosition::Center.slot(54, true), 35);
        assert_eq!(NavigationPosition::Bottom.slot(27, false), 18);
        assert_eq!(NavigationPosition::Bottom.slot(27, true), 26);
        assert_eq!(NavigationPosition::Center.slot(9, false), 0);
    }

    #[test]
    fn new_layout_has_one_page_with_navigation() {
        let layout = PaginatedLayout::new(27, NavigationStyle::default()).unwrap();
        assert_eq!(layout.page_count(), 1);
        assert_eq!(layout.navigation_slots(), (18, 26));
        let previous = layout.button_on_page(0, 18).unwrap();
        let next = layout.button_on_page(0, 26).unwrap();
        assert_eq!(previous.title(), PREVIOUS_PAGE_TITLE);
        assert_eq!(next.title(), NEXT_PAGE_TITLE);
        assert_eq!(next.sound().unwrap().name, NAVIGATION_SOUND);
        assert!(next.interaction_listener().is_some());
        assert_eq!(layout.current_slot(), Some(0));
    }

    #[test]
    fn filling_a_page_opens_the_next() {
        let mut layout = PaginatedLayout::new(9, NavigationStyle::default()).unwrap();
        assert_eq!(layout.content_capacity(), 7);
        for i in 0..7 {
            assert!(layout.add(Button::new(format!("B{i}"))));
        }
        assert_eq!(layout.page_count(), 1);
        assert!(layout.add(Button::new("overflow")));
        assert_eq!(layout.page_count(), 2);
        assert_eq!(layout.active_page(), 1);
        // Slot 0 of the new page holds the previous-page button.
        assert_eq!(layout.button_on_page(1, 1).unwrap().title(), "overflow");
        assert_eq!(filled(&layout, 1), 3);
    }

    #[test]
    fn navigation_buttons_share_identity_across_pages() {
        let mut layout = PaginatedLayout::new(9, NavigationStyle::default()).unwrap();
        layout.new_page();
        assert_eq!(layout.button_on_page(0, 0), layout.button_on_page(1, 0));
        assert_eq!(layout.button_on_page(0, 8), layout.button_on_page(1, 8));
    }

    #[test]
    fn placeholders_toggle() {
        let mut layout = PaginatedLayout::new(18, NavigationStyle::default()).unwrap();
        layout.new_page();
        layout.set_placeholders(true);
        assert_eq!(filled(&layout, 0), 9);
        assert_eq!(filled(&layout, 1), 9);
        assert_eq!(layout.content_capacity(), 9);
        layout.new_page();
        assert_eq!(filled(&layout, 2), 9);

        layout.set_placeholders(false);
        for page in 0..3 {
            assert_eq!(filled(&layout, page), 2);
        }
    }

    #[test]
    fn single_row_with_placeholders_rejects_add() {
        let mut style = NavigationStyle::default();
        style.placeholders = true;
        let mut layout = PaginatedLayout::new(9, style).unwrap();
        assert_eq!(layout.content_capacity(), 0);
        assert!(!layout.add(Button::new("nowhere")));
        assert_eq!(layout.page_count(), 1);
    }

    #[test]
    fn global_slots_address_pages() {
        let mut layout = PaginatedLayout::with_position(9, NavigationPosition::Top).unwrap();
        layout.new_page();
        assert!(layout.set(9 + 4, Button::new("p1")));
        assert_eq!(layout.button_on_page(1, 4).unwrap().title(), "p1");
        assert_eq!(layout.button(13).unwrap().title(), "p1");
        assert!(!layout.set(18, Button::new("beyond")));
        assert!(!layout.set_on_page(0, 9, Button::new("beyond")));
    }

    #[test]
    fn page_titles_and_clear() {
        let mut layout = PaginatedLayout::new(9, NavigationStyle::default()).unwrap();
        layout.new_page();
        layout.set_page_title(0, "First").unwrap();
        layout.set_page_title(1, "Second").unwrap();
        assert_eq!(layout.page_title(0), Some("First"));
        assert_eq!(
            layout.set_page_title(2, "Third"),
            Err(GuiError::PageOutOfRange { page: 2, pages: 2 })
        );
        assert_eq!(layout.clear_page_title(1), Some("Second".to_string()));
        assert_eq!(layout.page_title(1), None);

        layout.add(Button::new("content"));
        layout.clear();
        assert_eq!(layout.page_count(), 1);
        assert_eq!(layout.page_title(0), None);
        assert_eq!(filled(&layout, 0), 2);
        assert_eq!(layout.active_page(), 0);
    }

    #[test]
    fn copy_is_deep() {
        let mut layout = PaginatedLayout::new(9, NavigationStyle::default()).unwrap();
        layout.add(Button::new("a"));
        let mut copy = layout.clone();
        copy.add(Button::new("b"));
        assert_eq!(filled(&layout, 0), 3);
        assert_eq!(filled(&copy, 0), 4);
        assert_eq!(copy.current_slot(), Some(2));
    }
}
