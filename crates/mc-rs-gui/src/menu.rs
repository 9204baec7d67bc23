//! Menus: a titled layout plus listeners, modifiers and viewer sessions.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::action::{CloseEvent, CloseListener, ListenerResult, MoveEvent, MoveListener};
use crate::button::{Button, ItemView};
use crate::context::{ContextModifiers, Contextualized, StatusModifiers};
use crate::error::GuiError;
use crate::host::{ViewHandle, Viewer, ViewerId};
use crate::layout::{
    InventoryLayout, Layout, MenuKind, NavigationStyle, PaginatedLayout, SingleLayout,
};

/// What a viewer currently has open of a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerSession {
    pub page: usize,
    pub handle: ViewHandle,
}

/// A chest menu. Always owns exactly one layout.
pub struct Menu {
    title: String,
    layout: Layout,
    transient: bool,
    close_listener: Option<CloseListener>,
    move_listener: Option<MoveListener>,
    context: ContextModifiers<Menu>,
    status: StatusModifiers,
    sessions: BTreeMap<ViewerId, ViewerSession>,
}

impl Menu {
    pub fn new(title: impl Into<String>, layout: impl Into<Layout>) -> Self {
        Self {
            title: title.into(),
            layout: layout.into(),
            transient: false,
            close_listener: None,
            move_listener: None,
            context: ContextModifiers::new(),
            status: StatusModifiers::default(),
            sessions: BTreeMap::new(),
        }
    }

    /// Single grid filled left to right.
    pub fn flow(title: impl Into<String>, size: usize) -> Result<Self, GuiError> {
        Ok(Self::new(title, SingleLayout::flow(size)?))
    }

    /// Single grid filled symmetrically from the center column.
    pub fn centered(title: impl Into<String>, size: usize) -> Result<Self, GuiError> {
        Ok(Self::new(title, SingleLayout::centered(size)?))
    }

    pub fn paginated(
        title: impl Into<String>,
        size: usize,
        style: NavigationStyle,
    ) -> Result<Self, GuiError> {
        Ok(Self::new(title, PaginatedLayout::new(size, style)?))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    /// Replace the layout. Viewers on a page the new layout lacks move to page 0.
    pub fn set_layout(&mut self, layout: impl Into<Layout>) {
        self.layout = layout.into();
        self.reset_stale_sessions();
    }

    pub fn kind(&self) -> MenuKind {
        self.layout.kind()
    }

    /// Slots per page.
    pub fn size(&self) -> usize {
        self.layout.size()
    }

    pub fn page_count(&self) -> usize {
        self.layout.page_count()
    }

    pub fn add(&mut self, button: Button) -> bool {
        self.layout.add(button)
    }

    pub fn set(&mut self, slot: usize, button: Button) -> bool {
        self.layout.set(slot, button)
    }

    pub fn remove(&mut self, button: &Button) -> bool {
        self.layout.remove(button)
    }

    pub fn remove_if<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Button) -> bool,
    {
        self.layout.remove_if(&mut predicate)
    }

    /// Empty the layout. Every viewer's session is reset to page 0; use
    /// [`MenuManager::clear`](crate::MenuManager::clear) to also re-show it.
    pub fn clear(&mut self) {
        self.layout.clear();
        self.reset_stale_sessions();
    }

    pub fn has_space_left(&self) -> bool {
        self.layout.has_space_left()
    }

    pub fn button_matching(&self, item: &ItemView, viewer: Option<&Viewer>) -> Option<&Button> {
        self.layout.button_matching(item, viewer)
    }

    /// Title shown for `page`: the page override if set, else the menu title.
    pub fn page_title(&self, page: usize) -> &str {
        self.layout
            .as_paginated()
            .and_then(|layout| layout.page_title(page))
            .unwrap_or(self.title.as_str())
    }

    pub fn set_page_title(&mut self, page: usize, title: impl Into<String>) -> Result<(), GuiError> {
        self.layout
            .as_paginated_mut()
            .ok_or(GuiError::NotPaginated)?
            .set_page_title(page, title)
    }

    /// Transient menus are unregistered once their last viewer closes them.
    pub fn is_transient(&self) -> bool {
        self.transient
    }

    pub fn set_transient(&mut self, transient: bool) {
        self.transient = transient;
    }

    pub fn close_listener(&self) -> Option<&CloseListener> {
        self.close_listener.as_ref()
    }

    pub fn set_close_listener<F>(&mut self, listener: F)
    where
        F: Fn(&mut CloseEvent<'_>) -> ListenerResult + 'static,
    {
        self.close_listener = Some(Rc::new(listener));
    }

    pub fn clear_close_listener(&mut self) {
        self.close_listener = None;
    }

    pub fn move_listener(&self) -> Option<&MoveListener> {
        self.move_listener.as_ref()
    }

    pub fn set_move_listener<F>(&mut self, listener: F)
    where
        F: Fn(&mut MoveEvent<'_>) -> ListenerResult + 'static,
    {
        self.move_listener = Some(Rc::new(listener));
    }

    pub fn clear_move_listener(&mut self) {
        self.move_listener = None;
    }

    pub fn viewers(&self) -> impl Iterator<Item = ViewerId> + '_ {
        self.sessions.keys().copied()
    }

    pub fn is_viewing(&self, viewer: ViewerId) -> bool {
        self.sessions.contains_key(&viewer)
    }

    /// Page `viewer` has open, `None` if they are not viewing this menu.
    pub fn opened_page(&self, viewer: ViewerId) -> Option<usize> {
        self.sessions.get(&viewer).map(|s| s.page)
    }

    pub fn session(&self, viewer: ViewerId) -> Option<ViewerSession> {
        self.sessions.get(&viewer).copied()
    }

    pub(crate) fn insert_session(&mut self, viewer: ViewerId, session: ViewerSession) {
        self.sessions.insert(viewer, session);
    }

    pub(crate) fn remove_session(&mut self, viewer: ViewerId) -> Option<ViewerSession> {
        self.sessions.remove(&viewer)
    }

    pub(crate) fn clear_sessions(&mut self) {
        self.sessions.clear();
    }

    fn reset_stale_sessions(&mut self) {
        let pages = self.page_count();
        for session in self.sessions.values_mut() {
            if session.page >= pages {
                session.page = 0;
            }
        }
    }

    /// The menu as `viewer` should see it.
    ///
    /// Without context modifiers this is the menu itself. Otherwise it is a
    /// transient copy with every modifier applied.
    pub fn contextualized_copy(&self, viewer: &Viewer) -> Cow<'_, Menu> {
        if self.context.is_empty() {
            return Cow::Borrowed(self);
        }
        let mut copy = self.clone();
        copy.transient = true;
        copy.apply_context_modifiers(viewer);
        Cow::Owned(copy)
    }
}

// Copies never inherit viewer sessions.
impl Clone for Menu {
    fn clone(&self) -> Self {
        Self {
            title: self.title.clone(),
            layout: self.layout.clone(),
            transient: self.transient,
            close_listener: self.close_listener.clone(),
            move_listener: self.move_listener.clone(),
            context: self.context.clone(),
            status: self.status.clone(),
            sessions: BTreeMap::new(),
        }
    }
}

impl fmt::Debug for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Menu")
            .field("title", &self.title)
            .field("kind", &self.kind())
            .field("size", &self.size())
            .field("pages", &self.page_count())
            .field("transient", &self.transient)
            .field("viewers", &self.sessions.len())
            .finish()
    }
}

impl Contextualized for Menu {
    fn context_modifiers(&self) -> &ContextModifiers<Self> {
        &self.context
    }

    fn context_modifiers_mut(&mut self) -> &mut ContextModifiers<Self> {
        &mut self.context
    }

    fn status_modifiers(&self) -> &StatusModifiers {
        &self.status
    }

    fn status_modifiers_mut(&mut self) -> &mut StatusModifiers {
        &mut self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::StatusModifier;

    #[test]
    fn contextualized_copy_without_modifiers_borrows() {
        let menu = Menu::flow("Plain", 9).unwrap();
        let viewer = Viewer::new(1, "Steve");
        let copy = menu.contextualized_copy(&viewer);
        assert!(matches!(copy, Cow::Borrowed(_)));
        assert!(std::ptr::eq(copy.as_ref(), &menu));
    }

    #[test]
    fn contextualized_copy_applies_modifiers() {
        let mut menu = Menu::flow("Base", 9).unwrap();
        menu.add(Button::new("keep"));
        menu.add_context_modifier(|m, v| {
            let title = format!("{}'s menu", v.name);
            m.set_title(title);
        });
        let viewer = Viewer::new(1, "Alex");
        let copy = menu.contextualized_copy(&viewer).into_owned();
        assert_eq!(copy.title(), "Alex's menu");
        assert!(copy.is_transient());
        assert_eq!(menu.title(), "Base");
        assert!(!menu.is_transient());
        assert_eq!(copy.layout().button(0), menu.layout().button(0));
    }

    #[test]
    fn clone_drops_sessions_and_deep_copies_modifiers() {
        let mut menu = Menu::flow("Menu", 9).unwrap();
        menu.insert_session(
            ViewerId(1),
            ViewerSession {
                page: 0,
                handle: ViewHandle(1),
            },
        );
        menu.set_status(StatusModifier::flag("locked"));
        let mut copy = menu.clone();
        assert!(menu.is_viewing(ViewerId(1)));
        assert!(!copy.is_viewing(ViewerId(1)));

        copy.add_context_modifier(|_, _| {});
        copy.remove_status("locked");
        assert!(menu.context_modifiers().is_empty());
        assert!(menu.has_status("locked"));
    }

    #[test]
    fn page_titles_fall_back_to_menu_title() {
        let mut menu = Menu::paginated("Shop", 9, NavigationStyle::default()).unwrap();
        for i in 0..8 {
            menu.add(Button::new(format!("item {i}")));
        }
        assert_eq!(menu.page_count(), 2);
        menu.set_page_title(0, "Shop (front)").unwrap();
        assert_eq!(menu.page_title(0), "Shop (front)");
        assert_eq!(menu.page_title(1), "Shop");
        assert_eq!(menu.page_title(7), "Shop");

        let mut single = Menu::flow("Single", 9).unwrap();
        assert_eq!(single.set_page_title(0, "x"), Err(GuiError::NotPaginated));
        assert_eq!(single.page_title(0), "Single");
    }

    #[test]
    fn clear_moves_sessions_back_to_existing_pages() {
        let mut menu = Menu::paginated("Shop", 9, NavigationStyle::default()).unwrap();
        for i in 0..20 {
            menu.add(Button::new(format!("item {i}")));
        }
        assert_eq!(menu.page_count(), 3);
        let session = ViewerSession {
            page: 2,
            handle: ViewHandle(4),
        };
        menu.insert_session(ViewerId(1), session);

        menu.clear();
        assert_eq!(menu.page_count(), 1);
        assert_eq!(menu.opened_page(ViewerId(1)), Some(0));
        assert_eq!(menu.session(ViewerId(1)).unwrap().handle, ViewHandle(4));

        menu.insert_session(ViewerId(2), session);
        menu.set_layout(SingleLayout::flow(9).unwrap());
        assert_eq!(menu.opened_page(ViewerId(2)), Some(0));
    }

    #[test]
    fn remove_if_closure() {
        let mut menu = Menu::flow("Menu", 9).unwrap();
        for i in 0..4 {
            menu.add(Button::new(format!("B{i}")));
        }
        assert_eq!(menu.remove_if(|b| b.title().ends_with('1')), 1);
        assert!(menu.layout().button(1).is_none());
        assert!(menu.has_space_left());
    }
}
