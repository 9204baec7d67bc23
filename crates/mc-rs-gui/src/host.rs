//! Host-facing types: viewer identity, rendered views, and the host trait.
//!
//! The toolkit never talks to the network or the world directly. Everything
//! visible goes through [`MenuHost`], implemented by the server (or a test mock).

use std::fmt;

use serde::Serialize;

use crate::button::{ButtonSound, ItemView};

/// Opaque, comparable viewer identity (a player's runtime id on the host).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ViewerId(pub u64);

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "viewer#{}", self.0)
    }
}

/// A player a menu can be shown to.
#[derive(Debug, Clone)]
pub struct Viewer {
    pub id: ViewerId,
    pub name: String,
    /// Server operator flag, commonly read by context modifiers.
    pub operator: bool,
}

impl Viewer {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: ViewerId(id),
            name: name.into(),
            operator: false,
        }
    }
}

/// Identity of one displayed container, allocated by the manager per open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ViewHandle(pub u64);

/// A rendered page, ready for the host to display.
#[derive(Debug, Clone, Serialize)]
pub struct MenuView {
    pub handle: ViewHandle,
    pub title: String,
    pub size: usize,
    pub page: usize,
    pub slots: Vec<Option<ItemView>>,
}

/// Operations the toolkit needs from the game server.
pub trait MenuHost {
    /// Create a container from `view` and show it to `viewer`, replacing
    /// whatever container the viewer had open.
    fn show(&mut self, viewer: &Viewer, view: MenuView);

    /// Close the container identified by `handle` for `viewer`.
    fn close_view(&mut self, viewer: ViewerId, handle: ViewHandle);

    fn play_sound(&mut self, viewer: ViewerId, sound: &ButtonSound);

    fn send_message(&mut self, viewer: ViewerId, message: &str);

    /// Current contents of a displayed slot, as the host sees them.
    fn item_at(&self, handle: ViewHandle, slot: usize) -> Option<ItemView>;

    /// Whether the viewer can currently receive a container.
    fn is_online(&self, viewer: ViewerId) -> bool {
        let _ = viewer;
        true
    }
}
