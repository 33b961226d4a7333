//! Serializable snapshot of a tab, used to bring closed tabs back

use super::{ContentState, EngineState, SessionSource, TabSessionState};
use crate::engine::EngineSessionState;
use serde::{Deserialize, Serialize};

/// Where restored tabs go in the tab list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestoreLocation {
    Beginning,
    #[default]
    End,
    /// Each tab goes back to its recorded index
    AtIndex,
}

/// Everything needed to recreate a tab without a live engine session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoverableTab {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub context_id: Option<String>,
    #[serde(default)]
    pub last_access: i64,
    #[serde(default)]
    pub created_at: i64,
    /// Position in the tab list when the tab was closed
    #[serde(default)]
    pub index: Option<usize>,
    #[serde(default)]
    pub state: Option<EngineSessionState>,
}

impl RecoverableTab {
    /// Capture `tab`, which was at `index` in the tab list
    pub fn from_tab(tab: &TabSessionState, index: Option<usize>) -> Self {
        Self {
            id: tab.id.clone(),
            url: tab.content.url.clone(),
            title: tab.content.title.clone(),
            private: tab.content.private,
            parent_id: tab.parent_id.clone(),
            context_id: tab.context_id.clone(),
            last_access: tab.last_access,
            created_at: tab.created_at,
            index,
            state: tab.engine_state.engine_session_state.clone(),
        }
    }

    pub fn to_tab(&self) -> TabSessionState {
        TabSessionState {
            id: self.id.clone(),
            content: ContentState {
                title: self.title.clone(),
                ..ContentState::new(self.url.clone(), self.private)
            },
            engine_state: EngineState {
                engine_session_state: self.state.clone(),
                ..Default::default()
            },
            parent_id: self.parent_id.clone(),
            context_id: self.context_id.clone(),
            last_access: self.last_access,
            created_at: self.created_at,
            source: SessionSource::Restored,
            restored: true,
            ..Default::default()
        }
    }
}
