//! Chest-menu toolkit: buttons placed into paginated slot grids, shown to
//! viewers through a host server.
//!
//! Build a [`Menu`] from a layout, [`register`](MenuManager::register) it, and
//! feed the host's click/close signals into the [`MenuManager`].

pub mod action;
pub mod button;
pub mod config;
pub mod context;
pub mod cursor;
pub mod error;
pub mod grid;
pub mod host;
pub mod layout;
pub mod manager;
pub mod menu;

pub use action::{
    Action, Click, ClickOutcome, CloseEvent, InteractionEvent, ListenerResult, MenuAction,
    MoveEvent, RawAction,
};
pub use button::{Button, ButtonBuilder, ButtonId, ButtonSound, ItemView};
pub use config::GuiConfig;
pub use context::{Contextualized, StatusModifier};
pub use error::GuiError;
pub use grid::SlotGrid;
pub use host::{MenuHost, MenuView, ViewHandle, Viewer, ViewerId};
pub use layout::{
    InventoryLayout, Layout, MenuKind, NavigationPosition, NavigationStyle, PaginatedLayout,
    Policy, SingleLayout,
};
pub use manager::{MenuId, MenuManager};
pub use menu::Menu;
