//! Buttons: the placeable, clickable unit of a menu.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::action::{InteractionEvent, InteractionListener, ListenerResult};
use crate::context::{ContextModifier, ContextModifiers, Contextualized, StatusModifiers};
use crate::host::Viewer;

/// Item used when a button is created without an icon.
pub const DEFAULT_ICON: &str = "minecraft:paper";

/// Global counter for assigning button identities.
static NEXT_BUTTON_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a button. Copies keep the identity of their source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonId(u64);

impl ButtonId {
    fn next() -> Self {
        Self(NEXT_BUTTON_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Sound played to the viewer when a button is clicked.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonSound {
    pub name: String,
    pub volume: f32,
    pub pitch: f32,
}

impl ButtonSound {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            volume: 1.0,
            pitch: 1.0,
        }
    }
}

/// Host-facing rendering of a button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    pub icon: String,
    pub amount: u8,
    pub title: String,
    pub lines: Vec<String>,
}

impl ItemView {
    pub fn new(icon: impl Into<String>, amount: u8) -> Self {
        Self {
            icon: icon.into(),
            amount,
            title: String::new(),
            lines: Vec::new(),
        }
    }
}

/// A clickable menu element.
///
/// Both extraction locks are set by default, so viewers cannot take the item.
#[derive(Clone)]
pub struct Button {
    id: ButtonId,
    icon: String,
    amount: u8,
    title: String,
    lines: Vec<String>,
    sound: Option<ButtonSound>,
    left_locked: bool,
    right_locked: bool,
    listener: Option<InteractionListener>,
    context: ContextModifiers<Button>,
    status: StatusModifiers,
}

impl Button {
    /// A paper button with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_icon(DEFAULT_ICON, title)
    }

    pub fn with_icon(icon: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: ButtonId::next(),
            icon: icon.into(),
            amount: 1,
            title: title.into(),
            lines: Vec::new(),
            sound: None,
            left_locked: true,
            right_locked: true,
            listener: None,
            context: ContextModifiers::new(),
            status: StatusModifiers::default(),
        }
    }

    /// Wrap an item a viewer placed into a menu.
    pub fn from_item(item: ItemView) -> Self {
        let mut button = Self::with_icon(item.icon, item.title);
        button.amount = item.amount;
        button.lines = item.lines;
        button
    }

    pub fn builder() -> ButtonBuilder {
        ButtonBuilder::default()
    }

    pub fn id(&self) -> ButtonId {
        self.id
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn set_icon(&mut self, icon: impl Into<String>) {
        self.icon = icon.into();
    }

    pub fn amount(&self) -> u8 {
        self.amount
    }

    pub fn set_amount(&mut self, amount: u8) {
        self.amount = amount;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn set_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
    }

    pub fn add_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
    }

    /// Remove every lore line equal to one of `lines`.
    pub fn remove_lines(&mut self, lines: &[&str]) {
        self.lines.retain(|l| !lines.contains(&l.as_str()));
    }

    pub fn sound(&self) -> Option<&ButtonSound> {
        self.sound.as_ref()
    }

    pub fn set_sound(&mut self, sound: Option<ButtonSound>) {
        self.sound = sound;
    }

    pub fn is_left_locked(&self) -> bool {
        self.left_locked
    }

    pub fn set_left_locked(&mut self, locked: bool) {
        self.left_locked = locked;
    }

    pub fn is_right_locked(&self) -> bool {
        self.right_locked
    }

    pub fn set_right_locked(&mut self, locked: bool) {
        self.right_locked = locked;
    }

    /// Whether a viewer may take the item with at least one mouse button.
    pub fn is_stealable(&self) -> bool {
        !(self.left_locked && self.right_locked)
    }

    pub fn set_stealable(&mut self, stealable: bool) {
        self.left_locked = !stealable;
        self.right_locked = !stealable;
    }

    pub fn interaction_listener(&self) -> Option<&InteractionListener> {
        self.listener.as_ref()
    }

    pub fn set_interaction_listener<F>(&mut self, listener: F)
    where
        F: Fn(&mut InteractionEvent<'_>) -> ListenerResult + 'static,
    {
        self.listener = Some(Rc::new(listener));
    }

    pub fn clear_interaction_listener(&mut self) {
        self.listener = None;
    }

    /// Render the button as the host sees it.
    pub fn render(&self) -> ItemView {
        ItemView {
            icon: self.icon.clone(),
            amount: self.amount,
            title: self.title.clone(),
            lines: self.lines.clone(),
        }
    }

    /// Render the button for a specific viewer, running context modifiers on a copy.
    pub fn render_for(&self, viewer: &Viewer) -> ItemView {
        if self.context.is_empty() {
            return self.render();
        }
        let mut copy = self.clone();
        copy.apply_context_modifiers(viewer);
        copy.render()
    }

    /// Whether this button renders as `item`, optionally also for `viewer`'s
    /// contextualized form.
    pub fn renders_as(&self, item: &ItemView, viewer: Option<&Viewer>) -> bool {
        if self.render() == *item {
            return true;
        }
        match viewer {
            Some(viewer) if !self.context.is_empty() => self.render_for(viewer) == *item,
            _ => false,
        }
    }
}

impl PartialEq for Button {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Button {}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("id", &self.id)
            .field("icon", &self.icon)
            .field("title", &self.title)
            .field("left_locked", &self.left_locked)
            .field("right_locked", &self.right_locked)
            .field("context", &self.context)
            .finish()
    }
}

impl Contextualized for Button {
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

/// Fluent constructor for [`Button`].
pub struct ButtonBuilder {
    icon: String,
    amount: u8,
    title: String,
    lines: Vec<String>,
    sound: Option<ButtonSound>,
    stealable: bool,
    listener: Option<InteractionListener>,
    context: Vec<ContextModifier<Button>>,
}

impl Default for ButtonBuilder {
    fn default() -> Self {
        Self {
            icon: DEFAULT_ICON.to_string(),
            amount: 1,
            title: String::new(),
            lines: Vec::new(),
            sound: None,
            stealable: false,
            listener: None,
            context: Vec::new(),
        }
    }
}

impl ButtonBuilder {
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn amount(mut self, amount: u8) -> Self {
        self.amount = amount;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn sound(mut self, name: impl Into<String>) -> Self {
        self.sound = Some(ButtonSound::new(name));
        self
    }

    pub fn stealable(mut self, stealable: bool) -> Self {
        self.stealable = stealable;
        self
    }

    pub fn on_interact<F>(mut self, listener: F) -> Self
    where
        F: Fn(&mut InteractionEvent<'_>) -> ListenerResult + 'static,
    {
        self.listener = Some(Rc::new(listener));
        self
    }

    pub fn context_modifier<F>(mut self, modifier: F) -> Self
    where
        F: Fn(&mut Button, &Viewer) + 'static,
    {
        self.context.push(Rc::new(modifier));
        self
    }

    pub fn build(self) -> Button {
        let mut button = Button::with_icon(self.icon, self.title);
        button.amount = self.amount;
        button.lines = self.lines;
        button.sound = self.sound;
        button.set_stealable(self.stealable);
        button.listener = self.listener;
        for modifier in self.context {
            button.context.push(modifier);
        }
        button
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buttons_are_locked_and_unique() {
        let a = Button::new("A");
        let b = Button::new("A");
        assert!(a.is_left_locked() && a.is_right_locked());
        assert!(!a.is_stealable());
        assert_ne!(a, b);
        assert_eq!(a.icon(), DEFAULT_ICON);
    }

    #[test]
    fn copy_is_equal_but_independent() {
        let mut original = Button::builder()
            .title("Original")
            .context_modifier(|b, _| b.set_title("ctx"))
            .build();
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.set_title("Changed");
        copy.add_context_modifier(|b, _| b.set_amount(2));
        assert_eq!(original.title(), "Original");
        assert_eq!(original.context_modifiers().len(), 1);
        assert_eq!(copy.context_modifiers().len(), 2);

        original.set_stealable(true);
        assert!(!copy.is_stealable());
    }

    #[test]
    fn builder_sets_everything() {
        let button = Button::builder()
            .icon("minecraft:red_mushroom")
            .amount(3)
            .title("Shroom")
            .lines(["Lore1", "Lore2"])
            .sound("ui.button.click")
            .stealable(true)
            .on_interact(|_| Ok(()))
            .build();
        assert_eq!(button.icon(), "minecraft:red_mushroom");
        assert_eq!(button.amount(), 3);
        assert_eq!(button.lines(), ["Lore1", "Lore2"]);
        assert_eq!(button.sound().unwrap().name, "ui.button.click");
        assert_eq!(button.sound().unwrap().volume, 1.0);
        assert!(!button.is_left_locked() && !button.is_right_locked());
        assert!(button.interaction_listener().is_some());
    }

    #[test]
    fn render_for_viewer_leaves_original_untouched() {
        let button = Button::builder()
            .title("?")
            .context_modifier(|b, v| {
                let title = if v.operator { "You are OP" } else { "You are NOT OP" };
                b.set_title(title);
            })
            .build();
        let mut op = Viewer::new(1, "Admin");
        op.operator = true;
        assert_eq!(button.render_for(&op).title, "You are OP");
        assert_eq!(button.render_for(&Viewer::new(2, "Guest")).title, "You are NOT OP");
        assert_eq!(button.title(), "?");
    }

    #[test]
    fn renders_as_checks_contextualized_form() {
        let button = Button::builder()
            .title("plain")
            .context_modifier(|b, v| b.set_title(v.name.clone()))
            .build();
        let steve = Viewer::new(1, "Steve");
        let rendered = button.render_for(&steve);
        assert!(!button.renders_as(&rendered, None));
        assert!(button.renders_as(&rendered, Some(&steve)));
        assert!(button.renders_as(&button.render(), None));
    }

    #[test]
    fn lines_edit() {
        let mut button = Button::new("Lore");
        button.add_lines(["a", "b", "c"]);
        button.remove_lines(&["b"]);
        assert_eq!(button.lines(), ["a", "c"]);
    }

    #[test]
    fn from_item_keeps_rendering() {
        let mut item = ItemView::new("minecraft:diamond", 5);
        item.title = "Loot".into();
        let button = Button::from_item(item.clone());
        assert_eq!(button.render(), item);
        assert!(button.is_left_locked());
    }
}
