use serde::{Deserialize, Serialize};

/// What a tab displays
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentState {
    pub url: String,
    pub private: bool,
    pub title: String,
    pub progress: u8,
    pub loading: bool,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub search_terms: String,
    /// Message of the last failed load, cleared by the next url update
    pub error: Option<String>,
}

impl ContentState {
    pub fn new(url: impl Into<String>, private: bool) -> Self {
        Self {
            url: url.into(),
            private,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackingProtectionState {
    pub enabled: bool,
    pub blocked_trackers: Vec<String>,
    pub loaded_trackers: Vec<String>,
}

/// Per-tab state of one installed web extension
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WebExtensionState {
    pub id: String,
    pub enabled: bool,
    pub browser_action_badge: Option<String>,
    pub page_action_visible: bool,
}

impl WebExtensionState {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            enabled: true,
            ..Default::default()
        }
    }
}
