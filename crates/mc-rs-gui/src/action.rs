//! Click taxonomy, listener types, and the events handed to listeners.
//!
//! Listeners never touch the registry directly. Side effects that need the
//! manager (opening pages, closing, messaging) are recorded as [`MenuAction`]s
//! and applied after the listener returns.

use std::error::Error;
use std::rc::Rc;

use crate::button::{Button, ButtonId, ItemView};
use crate::host::Viewer;
use crate::layout::InventoryLayout;
use crate::manager::MenuId;
use crate::menu::Menu;

/// Result returned by every listener. Errors are logged by the dispatcher.
pub type ListenerResult = Result<(), Box<dyn Error>>;

pub type InteractionListener = Rc<dyn Fn(&mut InteractionEvent<'_>) -> ListenerResult>;
pub type CloseListener = Rc<dyn Fn(&mut CloseEvent<'_>) -> ListenerResult>;
pub type MoveListener = Rc<dyn Fn(&mut MoveEvent<'_>) -> ListenerResult>;

// ─── Actions ─────────────────────────────────────────────────────────────────

/// Abstract interaction kinds delivered to button listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Click,
    LeftClick,
    RightClick,
    WheelClick,
    Hover,
}

impl Action {
    /// Whether `self` counts as `other`. Left, right and wheel clicks are all clicks.
    pub fn is_subsumable(self, other: Action) -> bool {
        self == other || self.parent() == Some(other)
    }

    fn parent(self) -> Option<Action> {
        match self {
            Action::LeftClick | Action::RightClick | Action::WheelClick => Some(Action::Click),
            Action::Click | Action::Hover => None,
        }
    }
}

/// Inventory action kinds as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawAction {
    Nothing,
    PickupAll,
    PickupSome,
    PickupHalf,
    PickupOne,
    PlaceAll,
    PlaceSome,
    PlaceOne,
    SwapWithCursor,
    DropAllCursor,
    DropOneCursor,
    DropAllSlot,
    DropOneSlot,
    MoveToOtherInventory,
    HotbarMoveAndReadd,
    HotbarSwap,
    CloneStack,
    CollectToCursor,
    Unknown,
}

impl RawAction {
    /// Map to the abstract taxonomy.
    pub fn action(self) -> Action {
        match self {
            RawAction::PlaceAll | RawAction::PickupAll | RawAction::MoveToOtherInventory => {
                Action::LeftClick
            }
            RawAction::PickupHalf | RawAction::PlaceOne => Action::RightClick,
            RawAction::CloneStack => Action::WheelClick,
            _ => Action::Click,
        }
    }

    /// Actions that move an item into or out of a menu slot.
    pub fn is_move(self) -> bool {
        matches!(
            self,
            RawAction::PlaceAll
                | RawAction::PlaceOne
                | RawAction::PlaceSome
                | RawAction::PickupAll
                | RawAction::PickupHalf
                | RawAction::PickupOne
                | RawAction::PickupSome
                | RawAction::CollectToCursor
                | RawAction::MoveToOtherInventory
                | RawAction::SwapWithCursor
        )
    }

    /// Actions that take an item out of the slot (nothing to confirm afterwards).
    pub fn is_removal(self) -> bool {
        matches!(
            self,
            RawAction::CollectToCursor
                | RawAction::HotbarMoveAndReadd
                | RawAction::HotbarSwap
                | RawAction::MoveToOtherInventory
                | RawAction::PickupAll
                | RawAction::PickupHalf
                | RawAction::PickupOne
                | RawAction::PickupSome
        )
    }
}

/// A click signal from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Click {
    /// Slot on the page the viewer has open.
    pub slot: usize,
    pub raw: RawAction,
    /// True when the click hit the viewer's own inventory rather than the menu.
    pub own_inventory: bool,
}

impl Click {
    pub fn new(slot: usize, raw: RawAction) -> Self {
        Self {
            slot,
            raw,
            own_inventory: false,
        }
    }
}

/// What the host should do with its raw click event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickOutcome {
    pub cancelled: bool,
}

/// Side effect requested by a listener, applied by the manager afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Open a page of the event's menu (normalized like any open).
    OpenPage(isize),
    /// Open the page `delta` away from the viewer's current page.
    OpenRelative(isize),
    /// Open another registered menu.
    OpenMenu(MenuId),
    /// Close the event's menu for the viewer.
    Close,
    SendMessage(String),
}

/// Requests shared by all event types.
#[derive(Default)]
pub(crate) struct Requests {
    actions: Vec<MenuAction>,
}

impl Requests {
    fn push(&mut self, action: MenuAction) {
        self.actions.push(action);
    }
}

// ─── Events ──────────────────────────────────────────────────────────────────

/// Passed to a button's interaction listener.
pub struct InteractionEvent<'a> {
    menu_id: MenuId,
    menu: &'a mut Menu,
    viewer: &'a Viewer,
    button: &'a Button,
    action: Action,
    slot: usize,
    page: usize,
    click_cancelled: bool,
    requests: Requests,
}

impl<'a> InteractionEvent<'a> {
    pub(crate) fn new(
        menu_id: MenuId,
        menu: &'a mut Menu,
        viewer: &'a Viewer,
        button: &'a Button,
        action: Action,
        slot: usize,
        page: usize,
    ) -> Self {
        Self {
            menu_id,
            menu,
            viewer,
            button,
            action,
            slot,
            page,
            click_cancelled: false,
            requests: Requests::default(),
        }
    }

    pub fn menu_id(&self) -> MenuId {
        self.menu_id
    }

    pub fn menu(&self) -> &Menu {
        self.menu
    }

    pub fn menu_mut(&mut self) -> &mut Menu {
        self.menu
    }

    pub fn viewer(&self) -> &Viewer {
        self.viewer
    }

    /// Snapshot of the clicked button.
    pub fn button(&self) -> &Button {
        self.button
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Page the viewer had open when clicking.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Stop further handling of this click (no move confirmation is scheduled).
    pub fn cancel_click(&mut self) {
        self.click_cancelled = true;
    }

    pub fn is_click_cancelled(&self) -> bool {
        self.click_cancelled
    }

    pub fn open_page(&mut self, page: isize) {
        self.requests.push(MenuAction::OpenPage(page));
    }

    pub fn open_relative(&mut self, delta: isize) {
        self.requests.push(MenuAction::OpenRelative(delta));
    }

    pub fn open_menu(&mut self, menu: MenuId) {
        self.requests.push(MenuAction::OpenMenu(menu));
    }

    pub fn close(&mut self) {
        self.requests.push(MenuAction::Close);
    }

    pub fn send_message(&mut self, message: impl Into<String>) {
        self.requests.push(MenuAction::SendMessage(message.into()));
    }

    pub(crate) fn into_actions(self) -> Vec<MenuAction> {
        self.requests.actions
    }
}

/// Passed to a menu's close listener.
pub struct CloseEvent<'a> {
    menu_id: MenuId,
    menu: &'a mut Menu,
    viewer: &'a Viewer,
    requests: Requests,
}

impl<'a> CloseEvent<'a> {
    pub(crate) fn new(menu_id: MenuId, menu: &'a mut Menu, viewer: &'a Viewer) -> Self {
        Self {
            menu_id,
            menu,
            viewer,
            requests: Requests::default(),
        }
    }

    pub fn menu_id(&self) -> MenuId {
        self.menu_id
    }

    pub fn menu(&self) -> &Menu {
        self.menu
    }

    pub fn menu_mut(&mut self) -> &mut Menu {
        self.menu
    }

    pub fn viewer(&self) -> &Viewer {
        self.viewer
    }

    pub fn open_menu(&mut self, menu: MenuId) {
        self.requests.push(MenuAction::OpenMenu(menu));
    }

    pub fn send_message(&mut self, message: impl Into<String>) {
        self.requests.push(MenuAction::SendMessage(message.into()));
    }

    pub(crate) fn into_actions(self) -> Vec<MenuAction> {
        self.requests.actions
    }
}

/// Passed to a menu's move listener one dispatch cycle after a viewer moved an
/// item into or out of a free menu slot.
pub struct MoveEvent<'a> {
    menu_id: MenuId,
    menu: &'a mut Menu,
    viewer: &'a Viewer,
    raw: RawAction,
    item: Option<ItemView>,
    page: usize,
    slot: usize,
    requests: Requests,
}

impl<'a> MoveEvent<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        menu_id: MenuId,
        menu: &'a mut Menu,
        viewer: &'a Viewer,
        raw: RawAction,
        item: Option<ItemView>,
        page: usize,
        slot: usize,
    ) -> Self {
        Self {
            menu_id,
            menu,
            viewer,
            raw,
            item,
            page,
            slot,
            requests: Requests::default(),
        }
    }

    pub fn menu_id(&self) -> MenuId {
        self.menu_id
    }

    pub fn menu(&self) -> &Menu {
        self.menu
    }

    pub fn menu_mut(&mut self) -> &mut Menu {
        self.menu
    }

    pub fn viewer(&self) -> &Viewer {
        self.viewer
    }

    pub fn raw_action(&self) -> RawAction {
        self.raw
    }

    /// Item the host shows in the slot now, after the move settled.
    pub fn item(&self) -> Option<&ItemView> {
        self.item.as_ref()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Adopt the item now in the slot as a (locked) button of the menu.
    ///
    /// Returns `None` for removals, empty slots, or a slot the layout rejects.
    pub fn confirm_as_button(&mut self) -> Option<ButtonId> {
        if self.raw.is_removal() {
            return None;
        }
        let item = self.item.clone()?;
        let button = Button::from_item(item);
        let id = button.id();
        self.menu
            .layout_mut()
            .set_on_page(self.page, self.slot, button)
            .then_some(id)
    }

    pub fn send_message(&mut self, message: impl Into<String>) {
        self.requests.push(MenuAction::SendMessage(message.into()));
    }

    pub(crate) fn into_actions(self) -> Vec<MenuAction> {
        self.requests.actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_subsumes_mouse_buttons() {
        assert!(Action::LeftClick.is_subsumable(Action::Click));
        assert!(Action::RightClick.is_subsumable(Action::Click));
        assert!(Action::WheelClick.is_subsumable(Action::Click));
        assert!(Action::Click.is_subsumable(Action::Click));
        assert!(!Action::Click.is_subsumable(Action::LeftClick));
        assert!(!Action::Hover.is_subsumable(Action::Click));
        assert!(!Action::LeftClick.is_subsumable(Action::RightClick));
    }

    #[test]
    fn raw_actions_map_to_taxonomy() {
        assert_eq!(RawAction::PickupAll.action(), Action::LeftClick);
        assert_eq!(RawAction::MoveToOtherInventory.action(), Action::LeftClick);
        assert_eq!(RawAction::PickupHalf.action(), Action::RightClick);
        assert_eq!(RawAction::PlaceOne.action(), Action::RightClick);
        assert_eq!(RawAction::CloneStack.action(), Action::WheelClick);
        assert_eq!(RawAction::HotbarSwap.action(), Action::Click);
    }

    #[test]
    fn move_and_removal_sets() {
        assert!(RawAction::PlaceAll.is_move());
        assert!(!RawAction::PlaceAll.is_removal());
        assert!(RawAction::PickupAll.is_move() && RawAction::PickupAll.is_removal());
        assert!(RawAction::HotbarSwap.is_removal());
        assert!(!RawAction::HotbarSwap.is_move());
        assert!(!RawAction::Nothing.is_move());
    }
}
