//! The browser state tree
//!
//! [`BrowserState`] is replaced wholesale on every reduction. Lookups go
//! through the selector methods on the snapshot at hand; there is no global
//! registry of tabs or sessions.

mod content;
mod engine;
mod partition;
mod recoverable;
mod tab;

pub use content::{ContentState, TrackingProtectionState, WebExtensionState};
pub use engine::EngineState;
pub use partition::{ContainerColor, ContainerIcon, ContainerState, TabGroup, TabPartition};
pub use recoverable::{RecoverableTab, RestoreLocation};
pub use tab::{
    create_custom_tab, create_tab, CustomTabConfig, CustomTabSessionState, SessionSource,
    SessionState, TabSessionState,
};

use lib_state::{State, StoreError};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BrowserState {
    /// Normal and private tabs, in display order
    pub tabs: Vec<TabSessionState>,
    pub custom_tabs: Vec<CustomTabSessionState>,
    pub selected_tab_id: Option<String>,
    pub tab_partitions: HashMap<String, TabPartition>,
    /// Keyed by context id
    pub containers: HashMap<String, ContainerState>,
}

impl BrowserState {
    pub fn with_tabs(tabs: Vec<TabSessionState>, selected_tab_id: Option<&str>) -> Self {
        Self {
            tabs,
            selected_tab_id: selected_tab_id.map(str::to_string),
            ..Default::default()
        }
    }

    pub fn find_tab(&self, tab_id: &str) -> Option<&TabSessionState> {
        self.tabs.iter().find(|tab| tab.id == tab_id)
    }

    pub fn find_custom_tab(&self, tab_id: &str) -> Option<&CustomTabSessionState> {
        self.custom_tabs.iter().find(|tab| tab.id == tab_id)
    }

    pub fn find_tab_or_custom_tab(&self, tab_id: &str) -> Option<&dyn SessionState> {
        match self.find_tab(tab_id) {
            Some(tab) => Some(tab as &dyn SessionState),
            None => self
                .find_custom_tab(tab_id)
                .map(|tab| tab as &dyn SessionState),
        }
    }

    pub fn selected_tab(&self) -> Option<&TabSessionState> {
        self.selected_tab_id
            .as_deref()
            .and_then(|id| self.find_tab(id))
    }

    /// The tab with `tab_id`, or the selected tab when no id is given
    pub fn find_tab_or_selected_tab(&self, tab_id: Option<&str>) -> Option<&TabSessionState> {
        match tab_id {
            Some(id) => self.find_tab(id),
            None => self.selected_tab(),
        }
    }

    pub fn normal_tabs(&self) -> impl Iterator<Item = &TabSessionState> {
        self.tabs.iter().filter(|tab| !tab.content.private)
    }

    pub fn private_tabs(&self) -> impl Iterator<Item = &TabSessionState> {
        self.tabs.iter().filter(|tab| tab.content.private)
    }

    pub fn tab_index(&self, tab_id: &str) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id == tab_id)
    }

    pub(crate) fn contains_session(&self, id: &str) -> bool {
        self.find_tab_or_custom_tab(id).is_some()
    }

    pub(crate) fn session_mut(&mut self, id: &str) -> Option<&mut dyn SessionState> {
        if let Some(tab) = self.tabs.iter_mut().find(|tab| tab.id == id) {
            return Some(tab as &mut dyn SessionState);
        }
        self.custom_tabs
            .iter_mut()
            .find(|tab| tab.id == id)
            .map(|tab| tab as &mut dyn SessionState)
    }

    /// Apply `update` to the tab or custom tab with `id`; unknown ids are ignored
    pub(crate) fn update_session<F>(&mut self, id: &str, update: F)
    where
        F: FnOnce(&mut dyn SessionState),
    {
        match self.session_mut(id) {
            Some(session) => update(session),
            None => log::debug!("No session with id {}, ignoring update", id),
        }
    }

    pub(crate) fn update_tab<F>(&mut self, id: &str, update: F)
    where
        F: FnOnce(&mut TabSessionState),
    {
        match self.tabs.iter_mut().find(|tab| tab.id == id) {
            Some(tab) => update(tab),
            None => log::debug!("No tab with id {}, ignoring update", id),
        }
    }
}

impl State for BrowserState {
    fn validate(&self) -> Result<(), StoreError> {
        let mut ids = HashSet::new();
        let all_ids = self
            .tabs
            .iter()
            .map(|tab| tab.id.as_str())
            .chain(self.custom_tabs.iter().map(|tab| tab.id.as_str()));
        for id in all_ids {
            if !ids.insert(id) {
                return Err(StoreError::InvalidState(format!("duplicate tab id {}", id)));
            }
        }

        if let Some(selected) = &self.selected_tab_id {
            if self.find_tab(selected).is_none() {
                return Err(StoreError::InvalidState(format!(
                    "selected tab {} does not exist",
                    selected
                )));
            }
        }

        for tab in &self.tabs {
            if let Some(parent) = &tab.parent_id {
                if self.find_tab(parent).is_none() {
                    return Err(StoreError::InvalidState(format!(
                        "parent {} of tab {} does not exist",
                        parent, tab.id
                    )));
                }
            }
        }

        for partition in self.tab_partitions.values() {
            for group in &partition.tab_groups {
                if let Some(missing) = group.tab_ids.iter().find(|id| self.find_tab(id).is_none()) {
                    return Err(StoreError::InvalidState(format!(
                        "group {} in partition {} references unknown tab {}",
                        group.id, partition.id, missing
                    )));
                }
            }
        }

        Ok(())
    }
}
