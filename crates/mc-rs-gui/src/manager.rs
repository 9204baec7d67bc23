//! Menu registry and viewer session manager.
//!
//! [`MenuManager`] owns every registered menu and translates host signals
//! (clicks, drags, closes, quits) into listener calls. Listener side effects
//! are applied after each listener returns, and item moves are confirmed one
//! dispatch cycle later through [`MenuManager::flush_deferred`].

use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error, info, warn};

use crate::action::{
    Action, Click, ClickOutcome, CloseEvent, InteractionEvent, ListenerResult, MenuAction,
    MoveEvent, RawAction,
};
use crate::context::Contextualized;
use crate::error::GuiError;
use crate::host::{MenuHost, MenuView, ViewHandle, Viewer, ViewerId};
use crate::layout::{InventoryLayout, MenuKind};
use crate::menu::{Menu, ViewerSession};

/// Registry key of a menu. Never reused within one manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MenuId(u64);

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "menu#{}", self.0)
    }
}

/// A move confirmation waiting for the next flush.
struct DeferredMove {
    menu: MenuId,
    viewer: Viewer,
    raw: RawAction,
    page: usize,
    slot: usize,
    handle: ViewHandle,
}

/// Why a viewer session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEnd {
    /// The view was closed by the viewer or programmatically.
    Closed,
    /// The viewer opened another menu.
    Replaced,
    /// The viewer left the server.
    Quit,
}

/// Map any page request onto an existing page: past the end wraps to the
/// first page, negative wraps to the last.
pub fn normalize_page(page: isize, pages: usize) -> usize {
    match usize::try_from(page) {
        Ok(page) if page < pages => page,
        Ok(_) => 0,
        Err(_) => pages.saturating_sub(1),
    }
}

#[derive(Default)]
pub struct MenuManager {
    menus: BTreeMap<MenuId, Menu>,
    next_menu: u64,
    next_handle: u64,
    deferred: VecDeque<DeferredMove>,
    /// Last known identity of every viewer with an open menu.
    viewers: BTreeMap<ViewerId, Viewer>,
}

impl MenuManager {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Registry ────────────────────────────────────────────────────────────

    pub fn register(&mut self, menu: Menu) -> MenuId {
        self.next_menu += 1;
        let id = MenuId(self.next_menu);
        info!("Registered {id}: {}", menu.title());
        self.menus.insert(id, menu);
        id
    }

    /// Remove a menu. Its sessions and pending move confirmations are dropped.
    pub fn unregister(&mut self, id: MenuId) -> Option<Menu> {
        let mut menu = self.menus.remove(&id)?;
        let viewers: Vec<ViewerId> = menu.viewers().collect();
        menu.clear_sessions();
        for viewer in viewers {
            if self.viewing(viewer).is_none() {
                self.viewers.remove(&viewer);
            }
        }
        self.deferred.retain(|job| job.menu != id);
        info!("Unregistered {id}: {}", menu.title());
        Some(menu)
    }

    pub fn is_registered(&self, id: MenuId) -> bool {
        self.menus.contains_key(&id)
    }

    pub fn get(&self, id: MenuId) -> Option<&Menu> {
        self.menus.get(&id)
    }

    pub fn get_mut(&mut self, id: MenuId) -> Option<&mut Menu> {
        self.menus.get_mut(&id)
    }

    /// Registered ids, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = MenuId> + '_ {
        self.menus.keys().copied()
    }

    /// Registered menus of one kind.
    pub fn list(&self, kind: MenuKind) -> Vec<MenuId> {
        self.menus
            .iter()
            .filter(|(_, menu)| menu.kind() == kind)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    /// Menu `viewer` currently has open.
    pub fn viewing(&self, viewer: ViewerId) -> Option<MenuId> {
        self.menus
            .iter()
            .find(|(_, menu)| menu.is_viewing(viewer))
            .map(|(id, _)| *id)
    }

    /// Viewers of `id` the host reports online.
    pub fn online_viewers(&self, id: MenuId, host: &dyn MenuHost) -> Vec<ViewerId> {
        self.menus
            .get(&id)
            .map(|menu| menu.viewers().filter(|v| host.is_online(*v)).collect())
            .unwrap_or_default()
    }

    pub fn pending_moves(&self) -> usize {
        self.deferred.len()
    }

    // ─── Sessions ────────────────────────────────────────────────────────────

    /// Open the first page of `id`. See [`open_page`](Self::open_page).
    pub fn open(
        &mut self,
        host: &mut dyn MenuHost,
        id: MenuId,
        viewer: &Viewer,
    ) -> Result<MenuId, GuiError> {
        self.open_page(host, id, 0, viewer)
    }

    /// Show `page` of `id` to `viewer` and return the id of the menu they now view.
    ///
    /// The page is normalized with [`normalize_page`]. A viewer already viewing
    /// the menu switches page in place. Otherwise a menu with context modifiers
    /// is opened as a registered transient copy contextualized for the viewer,
    /// and whatever menu the viewer had open is closed first.
    pub fn open_page(
        &mut self,
        host: &mut dyn MenuHost,
        id: MenuId,
        page: isize,
        viewer: &Viewer,
    ) -> Result<MenuId, GuiError> {
        let menu = self.menus.get(&id).ok_or(GuiError::NotRegistered(id))?;
        let page = normalize_page(page, menu.page_count());
        if menu.is_viewing(viewer.id) {
            self.show_page(host, id, page, viewer);
            debug!("{} switched {id} to page {page}", viewer.id);
            return Ok(id);
        }

        let copy = (!menu.context_modifiers().is_empty())
            .then(|| menu.contextualized_copy(viewer).into_owned());
        if let Some(current) = self.viewing(viewer.id) {
            self.end_session(host, current, viewer, SessionEnd::Replaced);
        }
        let target = match copy {
            Some(copy) => self.register(copy),
            None => id,
        };
        if !self.show_page(host, target, page, viewer) {
            return Err(GuiError::NotRegistered(target));
        }
        debug!("{} opened {target} at page {page}", viewer.id);
        Ok(target)
    }

    /// Close `id` for `viewer`. False if they were not viewing it.
    pub fn close(&mut self, host: &mut dyn MenuHost, id: MenuId, viewer: &Viewer) -> bool {
        let Some(session) = self.menus.get(&id).and_then(|m| m.session(viewer.id)) else {
            return false;
        };
        host.close_view(viewer.id, session.handle);
        self.end_session(host, id, viewer, SessionEnd::Closed);
        true
    }

    fn show_page(
        &mut self,
        host: &mut dyn MenuHost,
        id: MenuId,
        page: usize,
        viewer: &Viewer,
    ) -> bool {
        self.next_handle += 1;
        let handle = ViewHandle(self.next_handle);
        let Some(menu) = self.menus.get_mut(&id) else {
            return false;
        };
        let page = if page < menu.page_count() { page } else { 0 };
        menu.insert_session(viewer.id, ViewerSession { page, handle });
        host.show(viewer, render(menu, page, viewer, handle));
        self.viewers.insert(viewer.id, viewer.clone());
        true
    }

    /// Clear `id` and show its first page again to everyone viewing it.
    pub fn clear(&mut self, host: &mut dyn MenuHost, id: MenuId) -> Result<usize, GuiError> {
        self.menus
            .get_mut(&id)
            .ok_or(GuiError::NotRegistered(id))?
            .clear();
        self.refresh(host, id)
    }

    /// Re-render the page every viewer of `id` has open. Returns how many views were shown.
    pub fn refresh(&mut self, host: &mut dyn MenuHost, id: MenuId) -> Result<usize, GuiError> {
        let menu = self.menus.get(&id).ok_or(GuiError::NotRegistered(id))?;
        let sessions: Vec<(ViewerId, usize)> = menu
            .viewers()
            .filter_map(|viewer| menu.opened_page(viewer).map(|page| (viewer, page)))
            .collect();
        let mut shown = 0;
        for (viewer, page) in sessions {
            let Some(viewer) = self.viewers.get(&viewer).cloned() else {
                continue;
            };
            if self.show_page(host, id, page, &viewer) {
                shown += 1;
            }
        }
        debug!("Refreshed {id} for {shown} viewer(s)");
        Ok(shown)
    }

    fn end_session(
        &mut self,
        host: &mut dyn MenuHost,
        id: MenuId,
        viewer: &Viewer,
        end: SessionEnd,
    ) {
        let Some(menu) = self.menus.get_mut(&id) else {
            return;
        };
        if !menu.is_viewing(viewer.id) {
            return;
        }
        let mut actions = Vec::new();
        if let Some(listener) = menu.close_listener().cloned() {
            let mut event = CloseEvent::new(id, menu, viewer);
            isolate("close", id, || listener(&mut event));
            actions = event.into_actions();
        }
        menu.remove_session(viewer.id);
        if self.viewing(viewer.id).is_none() {
            self.viewers.remove(&viewer.id);
        }
        debug!("{} left {id} ({end:?})", viewer.id);

        let unused = self
            .menus
            .get(&id)
            .is_some_and(|m| m.is_transient() && m.viewers().next().is_none());
        if unused {
            self.unregister(id);
        }

        if end != SessionEnd::Closed {
            actions.retain(|action| match action {
                MenuAction::SendMessage(_) => end == SessionEnd::Replaced,
                other => {
                    debug!("Dropping {other:?} requested while {} left {id}", viewer.id);
                    false
                }
            });
        }
        self.apply_actions(host, id, viewer, actions);
    }

    // ─── Host signals ────────────────────────────────────────────────────────

    /// A viewer clicked while a container was open.
    pub fn handle_click(
        &mut self,
        host: &mut dyn MenuHost,
        viewer: &Viewer,
        click: Click,
    ) -> ClickOutcome {
        let Some(id) = self.viewing(viewer.id) else {
            return ClickOutcome::default();
        };
        if click.own_inventory {
            return ClickOutcome {
                cancelled: click.raw == RawAction::MoveToOtherInventory,
            };
        }
        let Some(menu) = self.menus.get_mut(&id) else {
            return ClickOutcome::default();
        };
        let Some(session) = menu.session(viewer.id) else {
            return ClickOutcome::default();
        };
        if session.page >= menu.page_count() {
            debug!("{} clicked {id} on missing page {}", viewer.id, session.page);
            return ClickOutcome { cancelled: true };
        }
        let Some(button) = menu
            .layout()
            .button_on_page(session.page, click.slot)
            .cloned()
        else {
            if click.raw.is_move() {
                self.defer_move(id, viewer, click, session);
            }
            return ClickOutcome::default();
        };

        let action = click.raw.action();
        let cancelled = match action {
            Action::LeftClick => button.is_left_locked(),
            Action::RightClick => button.is_right_locked(),
            _ => true,
        };
        if let Some(sound) = button.sound() {
            host.play_sound(viewer.id, sound);
        }
        if let Some(listener) = button.interaction_listener().cloned() {
            let mut event =
                InteractionEvent::new(id, menu, viewer, &button, action, click.slot, session.page);
            isolate("interaction", id, || listener(&mut event));
            let click_cancelled = event.is_click_cancelled();
            let actions = event.into_actions();
            self.apply_actions(host, id, viewer, actions);
            if click_cancelled {
                return ClickOutcome { cancelled };
            }
        }
        if !cancelled && click.raw.is_move() {
            self.defer_move(id, viewer, click, session);
        }
        ClickOutcome { cancelled }
    }

    /// Drags are never allowed while a menu is open.
    pub fn handle_drag(&self, viewer: ViewerId) -> ClickOutcome {
        ClickOutcome {
            cancelled: self.viewing(viewer).is_some(),
        }
    }

    /// The host closed the view identified by `handle`. Stale handles are ignored.
    pub fn handle_close(
        &mut self,
        host: &mut dyn MenuHost,
        viewer: &Viewer,
        handle: ViewHandle,
    ) -> bool {
        let found = self
            .menus
            .iter()
            .find(|(_, menu)| {
                menu.session(viewer.id)
                    .is_some_and(|session| session.handle == handle)
            })
            .map(|(id, _)| *id);
        match found {
            Some(id) => {
                self.end_session(host, id, viewer, SessionEnd::Closed);
                true
            }
            None => {
                debug!("Ignoring close of stale view {handle:?} for {}", viewer.id);
                false
            }
        }
    }

    /// Drop every session of a viewer who left. Returns how many were dropped.
    pub fn handle_quit(&mut self, host: &mut dyn MenuHost, viewer: &Viewer) -> usize {
        let viewing: Vec<MenuId> = self
            .menus
            .iter()
            .filter(|(_, menu)| menu.is_viewing(viewer.id))
            .map(|(id, _)| *id)
            .collect();
        for id in &viewing {
            self.end_session(host, *id, viewer, SessionEnd::Quit);
        }
        viewing.len()
    }

    // ─── Deferred moves ──────────────────────────────────────────────────────

    fn defer_move(&mut self, menu: MenuId, viewer: &Viewer, click: Click, session: ViewerSession) {
        debug!(
            "Deferring {:?} on {menu} slot {} for {}",
            click.raw, click.slot, viewer.id
        );
        self.deferred.push_back(DeferredMove {
            menu,
            viewer: viewer.clone(),
            raw: click.raw,
            page: session.page,
            slot: click.slot,
            handle: session.handle,
        });
    }

    /// Run queued move confirmations. Returns how many listeners ran.
    pub fn flush_deferred(&mut self, host: &mut dyn MenuHost) -> usize {
        let pending: Vec<DeferredMove> = self.deferred.drain(..).collect();
        let mut ran = 0;
        for job in pending {
            let Some(menu) = self.menus.get_mut(&job.menu) else {
                debug!("Dropping move for unregistered {}", job.menu);
                continue;
            };
            let Some(listener) = menu.move_listener().cloned() else {
                continue;
            };
            let item = host.item_at(job.handle, job.slot);
            let mut event =
                MoveEvent::new(job.menu, menu, &job.viewer, job.raw, item, job.page, job.slot);
            isolate("move", job.menu, || listener(&mut event));
            let actions = event.into_actions();
            self.apply_actions(host, job.menu, &job.viewer, actions);
            ran += 1;
        }
        ran
    }

    // ─── Listener side effects ───────────────────────────────────────────────

    fn apply_actions(
        &mut self,
        host: &mut dyn MenuHost,
        id: MenuId,
        viewer: &Viewer,
        actions: Vec<MenuAction>,
    ) {
        for action in actions {
            match action {
                MenuAction::OpenPage(page) => self.open_or_warn(host, id, page, viewer),
                MenuAction::OpenRelative(delta) => {
                    let current = self
                        .menus
                        .get(&id)
                        .and_then(|menu| menu.opened_page(viewer.id))
                        .unwrap_or(0);
                    self.open_or_warn(host, id, current as isize + delta, viewer);
                }
                MenuAction::OpenMenu(target) => self.open_or_warn(host, target, 0, viewer),
                MenuAction::Close => {
                    self.close(host, id, viewer);
                }
                MenuAction::SendMessage(message) => host.send_message(viewer.id, &message),
            }
        }
    }

    fn open_or_warn(&mut self, host: &mut dyn MenuHost, id: MenuId, page: isize, viewer: &Viewer) {
        if let Err(e) = self.open_page(host, id, page, viewer) {
            warn!("Failed to open {id} for {}: {e}", viewer.id);
        }
    }
}

/// Render one page of `menu` for `viewer`.
fn render(menu: &Menu, page: usize, viewer: &Viewer, handle: ViewHandle) -> MenuView {
    let slots = match menu.layout().page(page) {
        Some(grid) => grid
            .iter()
            .map(|button| button.map(|b| b.render_for(viewer)))
            .collect(),
        None => vec![None; menu.size()],
    };
    MenuView {
        handle,
        title: menu.page_title(page).to_string(),
        size: menu.size(),
        page,
        slots,
    }
}

/// Run a listener so that neither its error nor its panic escapes.
fn isolate<F>(kind: &str, menu: MenuId, listener: F)
where
    F: FnOnce() -> ListenerResult,
{
    match panic::catch_unwind(AssertUnwindSafe(listener)) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!("{kind} listener of {menu} failed: {e}"),
        Err(_) => error!("{kind} listener of {menu} panicked"),
    }
}
