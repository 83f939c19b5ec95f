//! Theme registry with change notification and persisted selection

use std::rc::Rc;

use anyhow::Result;

use super::Theme;
use crate::consts::THEME_KEY;
use crate::storage::{KeyValueStore, load_json, save_json};

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Theme)>;

/// Registry of named themes
///
/// One instance is shared by every game on the page (typically as
/// `Rc<RefCell<ThemeManager>>`). Listeners must not call back into the
/// manager; they receive the new theme by reference instead.
pub struct ThemeManager {
    /// Registered themes in menu order
    themes: Vec<Theme>,
    /// Index into `themes`
    current: usize,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    store: Option<Rc<dyn KeyValueStore>>,
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeManager {
    /// Built-in themes, default selected, nothing persisted
    pub fn new() -> Self {
        Self {
            themes: Theme::builtin(),
            current: 0,
            listeners: Vec::new(),
            next_subscription: 1,
            store: None,
        }
    }

    /// Built-in themes with the selection restored from (and saved to) `store`
    pub fn with_store(store: Rc<dyn KeyValueStore>) -> Self {
        let mut manager = Self::new();
        if let Some(name) = load_json::<String>(store.as_ref(), THEME_KEY) {
            match manager.index_of(&name) {
                Some(idx) => {
                    manager.current = idx;
                    log::info!("Restored theme '{}'", name);
                }
                None => log::warn!("Persisted theme '{}' is not registered, using default", name),
            }
        }
        manager.store = Some(store);
        manager
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.themes.iter().position(|t| t.name == name)
    }

    /// Add a theme, replacing any theme with the same name
    pub fn register(&mut self, theme: Theme) {
        match self.index_of(&theme.name) {
            Some(idx) => {
                log::info!("Replacing theme '{}'", theme.name);
                self.themes[idx] = theme;
                if idx == self.current {
                    self.notify();
                }
            }
            None => {
                log::info!("Registered theme '{}'", theme.name);
                self.themes.push(theme);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.iter().map(|t| t.name.as_str())
    }

    pub fn current(&self) -> &Theme {
        &self.themes[self.current]
    }

    /// Select a theme by name
    ///
    /// Re-selecting the current theme does nothing. Otherwise the choice is
    /// persisted and every listener runs once, in subscription order.
    pub fn set_theme(&mut self, name: &str) -> Result<()> {
        let Some(idx) = self.index_of(name) else {
            anyhow::bail!("unknown theme '{name}'");
        };
        if idx == self.current {
            return Ok(());
        }
        self.select(idx);
        Ok(())
    }

    /// Advance to the next registered theme, wrapping around
    pub fn next_theme(&mut self) -> &Theme {
        let idx = (self.current + 1) % self.themes.len();
        if idx != self.current {
            self.select(idx);
        }
        self.current()
    }

    fn select(&mut self, idx: usize) {
        self.current = idx;
        log::info!("Theme changed to '{}'", self.themes[idx].name);
        self.persist();
        self.notify();
    }

    fn persist(&self) {
        let Some(store) = &self.store else { return };
        if let Err(e) = save_json(store.as_ref(), THEME_KEY, &self.current().name) {
            log::warn!("Failed to persist theme: {:#}", e);
        }
    }

    fn notify(&mut self) {
        let theme = &self.themes[self.current];
        for (_, listener) in self.listeners.iter_mut() {
            listener(theme);
        }
    }

    /// Register a change listener
    pub fn subscribe(&mut self, listener: impl FnMut(&Theme) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; false if it was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}
