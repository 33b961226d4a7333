//! Tab list actions

use crate::state::{RecoverableTab, RestoreLocation, TabSessionState};

#[derive(Debug, Clone)]
pub enum TabListAction {
    /// Add a tab; it becomes selected if `select` is set or nothing was selected
    AddTab { tab: TabSessionState, select: bool },
    /// Add tabs without parents in one go
    AddMultipleTabs { tabs: Vec<TabSessionState> },
    SelectTab { tab_id: String },
    RemoveTab {
        tab_id: String,
        select_parent_if_exists: bool,
    },
    RemoveTabs { tab_ids: Vec<String> },
    RemoveAllTabs,
    RemoveAllNormalTabs,
    RemoveAllPrivateTabs,
    /// Bring back previously closed tabs
    Restore {
        tabs: Vec<RecoverableTab>,
        selected_tab_id: Option<String>,
        restore_location: RestoreLocation,
    },
}

impl TabListAction {
    pub fn add(tab: TabSessionState) -> Self {
        TabListAction::AddTab { tab, select: false }
    }

    pub fn add_selected(tab: TabSessionState) -> Self {
        TabListAction::AddTab { tab, select: true }
    }

    pub fn remove(tab_id: impl Into<String>) -> Self {
        TabListAction::RemoveTab {
            tab_id: tab_id.into(),
            select_parent_if_exists: true,
        }
    }

    pub fn select(tab_id: impl Into<String>) -> Self {
        TabListAction::SelectTab {
            tab_id: tab_id.into(),
        }
    }

    /// Whether this action takes tabs out of the list
    pub fn is_removal(&self) -> bool {
        matches!(
            self,
            TabListAction::RemoveTab { .. }
                | TabListAction::RemoveTabs { .. }
                | TabListAction::RemoveAllTabs
                | TabListAction::RemoveAllNormalTabs
                | TabListAction::RemoveAllPrivateTabs
        )
    }
}
