//! Per-viewer context modifiers and keyed status modifiers.
//!
//! Context modifiers are closures run against a target (a button or a whole
//! menu) right before it is shown to a viewer. They mutate the target in
//! place, so callers run them on a disposable copy. Status modifiers are plain
//! keyed markers collaborators use to tag state.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::host::Viewer;

/// A per-viewer transformation of `T`.
pub type ContextModifier<T> = Rc<dyn Fn(&mut T, &Viewer)>;

/// Ordered list of context modifiers, applied lowest index first.
pub struct ContextModifiers<T> {
    modifiers: Vec<ContextModifier<T>>,
}

impl<T> ContextModifiers<T> {
    pub fn new() -> Self {
        Self {
            modifiers: Vec::new(),
        }
    }

    pub fn push(&mut self, modifier: ContextModifier<T>) {
        self.modifiers.push(modifier);
    }

    /// Remove a modifier by reference identity. Returns false if absent.
    pub fn remove(&mut self, modifier: &ContextModifier<T>) -> bool {
        match self.modifiers.iter().position(|m| Rc::ptr_eq(m, modifier)) {
            Some(i) => {
                self.modifiers.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.modifiers.clear();
    }

    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContextModifier<T>> {
        self.modifiers.iter()
    }

    /// Run every modifier, in order, against `target`.
    pub fn apply(&self, target: &mut T, viewer: &Viewer) {
        for modifier in &self.modifiers {
            modifier(target, viewer);
        }
    }
}

impl<T> Default for ContextModifiers<T> {
    fn default() -> Self {
        Self::new()
    }
}

// A new list holding the same closures; the copy never aliases the source list.
impl<T> Clone for ContextModifiers<T> {
    fn clone(&self) -> Self {
        Self {
            modifiers: self.modifiers.clone(),
        }
    }
}

impl<T> fmt::Debug for ContextModifiers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextModifiers")
            .field("len", &self.modifiers.len())
            .finish()
    }
}

/// A keyed marker with an optional typed value.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusModifier {
    pub key: String,
    pub value: Option<serde_json::Value>,
}

impl StatusModifier {
    /// A marker without a value.
    pub fn flag(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    pub fn with_value(key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }
}

/// Status modifiers keyed by their unique key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusModifiers {
    entries: HashMap<String, StatusModifier>,
}

impl StatusModifiers {
    /// Insert `status`, replacing (and returning) any entry with the same key.
    pub fn insert(&mut self, status: StatusModifier) -> Option<StatusModifier> {
        self.entries.insert(status.key.clone(), status)
    }

    pub fn get(&self, key: &str) -> Option<&StatusModifier> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<StatusModifier> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusModifier> {
        self.entries.values()
    }
}

/// Something that carries context and status modifiers.
pub trait Contextualized: Sized {
    fn context_modifiers(&self) -> &ContextModifiers<Self>;
    fn context_modifiers_mut(&mut self) -> &mut ContextModifiers<Self>;
    fn status_modifiers(&self) -> &StatusModifiers;
    fn status_modifiers_mut(&mut self) -> &mut StatusModifiers;

    /// Append a context modifier and return its handle (for later removal).
    fn add_context_modifier<F>(&mut self, modifier: F) -> ContextModifier<Self>
    where
        F: Fn(&mut Self, &Viewer) + 'static,
    {
        let modifier: ContextModifier<Self> = Rc::new(modifier);
        self.context_modifiers_mut().push(Rc::clone(&modifier));
        modifier
    }

    /// Apply every context modifier to `self`, in list order.
    ///
    /// This mutates `self`; contextualize a copy when the original must stay intact.
    fn apply_context_modifiers(&mut self, viewer: &Viewer) {
        // The list lives inside `self`, so run a snapshot of it.
        let modifiers = self.context_modifiers().clone();
        modifiers.apply(self, viewer);
    }

    fn has_status(&self, key: &str) -> bool {
        self.status_modifiers().contains(key)
    }

    fn status(&self, key: &str) -> Option<&StatusModifier> {
        self.status_modifiers().get(key)
    }

    fn set_status(&mut self, status: StatusModifier) -> Option<StatusModifier> {
        self.status_modifiers_mut().insert(status)
    }

    fn remove_status(&mut self, key: &str) -> Option<StatusModifier> {
        self.status_modifiers_mut().remove(key)
    }
}
