//! Engine preferences and a small publish/subscribe store for them.
//!
//! Settings changes are published to explicit subscribers per topic instead
//! of being broadcast as ambient window events.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layout::DEFAULT_COLUMNS;

/// Preferences the engines read on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnginePreferences {
    /// Dashboard grid width.
    pub grid_columns: u32,
    /// Navigation items whose children are hidden in the tree view.
    pub collapsed_nav: Vec<String>,
}

impl Default for EnginePreferences {
    fn default() -> Self {
        Self { grid_columns: DEFAULT_COLUMNS, collapsed_nav: Vec::new() }
    }
}

impl EnginePreferences {
    pub fn columns(&self) -> u32 {
        self.grid_columns.max(1)
    }

    pub fn collapsed(&self) -> HashSet<String> {
        self.collapsed_nav.iter().cloned().collect()
    }
}

/// What kind of change is being announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsTopic {
    /// Tenant-wide settings, e.g. the grid width.
    SiteSettings,
    /// Per-user view state, e.g. collapsed folders.
    UiPreferences,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Box<dyn Fn(&T)>;

/// Holds the current value and notifies subscribers of the published topic,
/// in subscription order.
pub struct SettingsStore<T> {
    value: T,
    next_id: u64,
    subscribers: Vec<(SubscriptionId, SettingsTopic, Callback<T>)>,
}

impl<T> SettingsStore<T> {
    pub fn new(value: T) -> Self {
        Self { value, next_id: 0, subscribers: Vec::new() }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn subscribe(&mut self, topic: SettingsTopic, callback: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, topic, Box::new(callback)));
        id
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Replace the value and notify `topic` subscribers.
    pub fn publish(&mut self, topic: SettingsTopic, value: T) {
        self.value = value;
        self.notify(topic);
    }

    /// Modify the value in place and notify `topic` subscribers.
    pub fn update(&mut self, topic: SettingsTopic, f: impl FnOnce(&mut T)) {
        f(&mut self.value);
        self.notify(topic);
    }

    fn notify(&self, topic: SettingsTopic) {
        for (_, t, callback) in &self.subscribers {
            if *t == topic {
                callback(&self.value);
            }
        }
    }
}

impl<T: Default> Default for SettingsStore<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for SettingsStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsStore")
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
