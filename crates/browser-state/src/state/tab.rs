use super::{ContentState, EngineState, TrackingProtectionState, WebExtensionState};
use std::collections::HashMap;

/// How a session came into existence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionSource {
    #[default]
    Internal,
    UserEntered,
    NewTab,
    Menu,
    /// Opened for another app
    ActionView,
    CustomTab,
    Restored,
}

/// Fields shared by normal tabs and custom tabs
pub trait SessionState {
    fn id(&self) -> &str;

    fn content(&self) -> &ContentState;

    fn content_mut(&mut self) -> &mut ContentState;

    fn engine_state(&self) -> &EngineState;

    fn engine_state_mut(&mut self) -> &mut EngineState;

    fn tracking_protection(&self) -> &TrackingProtectionState;

    fn tracking_protection_mut(&mut self) -> &mut TrackingProtectionState;

    fn extension_state_mut(&mut self) -> &mut HashMap<String, WebExtensionState>;

    fn context_id(&self) -> Option<&str>;

    /// Only normal tabs have parents
    fn parent_id(&self) -> Option<&str> {
        None
    }
}

/// One tab in the tab list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabSessionState {
    pub id: String,
    pub content: ContentState,
    pub tracking_protection: TrackingProtectionState,
    pub engine_state: EngineState,
    pub extension_state: HashMap<String, WebExtensionState>,
    /// Lookup key of the tab that opened this one; the parent may be gone
    pub parent_id: Option<String>,
    pub context_id: Option<String>,
    /// Milliseconds; 0 if the tab was never selected
    pub last_access: i64,
    pub created_at: i64,
    pub source: SessionSource,
    pub restored: bool,
}

/// Create a tab for `url` with a fresh id
pub fn create_tab(url: impl Into<String>) -> TabSessionState {
    TabSessionState {
        id: uuid::Uuid::new_v4().to_string(),
        content: ContentState::new(url, false),
        created_at: chrono::Utc::now().timestamp_millis(),
        ..Default::default()
    }
}

impl TabSessionState {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_private(mut self, private: bool) -> Self {
        self.content.private = private;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.content.title = title.into();
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_context_id(mut self, context_id: impl Into<String>) -> Self {
        self.context_id = Some(context_id.into());
        self
    }

    pub fn with_last_access(mut self, last_access: i64) -> Self {
        self.last_access = last_access;
        self
    }

    pub fn with_source(mut self, source: SessionSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_engine_session(mut self, session: crate::engine::EngineSessionRef) -> Self {
        self.engine_state.engine_session = Some(session);
        self
    }
}

impl SessionState for TabSessionState {
    fn id(&self) -> &str {
        &self.id
    }

    fn content(&self) -> &ContentState {
        &self.content
    }

    fn content_mut(&mut self) -> &mut ContentState {
        &mut self.content
    }

    fn engine_state(&self) -> &EngineState {
        &self.engine_state
    }

    fn engine_state_mut(&mut self) -> &mut EngineState {
        &mut self.engine_state
    }

    fn tracking_protection(&self) -> &TrackingProtectionState {
        &self.tracking_protection
    }

    fn tracking_protection_mut(&mut self) -> &mut TrackingProtectionState {
        &mut self.tracking_protection
    }

    fn extension_state_mut(&mut self) -> &mut HashMap<String, WebExtensionState> {
        &mut self.extension_state
    }

    fn context_id(&self) -> Option<&str> {
        self.context_id.as_deref()
    }

    fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }
}

/// Chrome customisation requested by the app that opened a custom tab
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomTabConfig {
    pub toolbar_color: Option<u32>,
    pub close_button_visible: bool,
    pub show_share_menu_item: bool,
    /// Package name of the app that opened the tab
    pub origin: Option<String>,
}

/// A tab hosted for an external app, kept outside the normal tab list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomTabSessionState {
    pub id: String,
    pub content: ContentState,
    pub tracking_protection: TrackingProtectionState,
    pub engine_state: EngineState,
    pub extension_state: HashMap<String, WebExtensionState>,
    pub context_id: Option<String>,
    pub config: CustomTabConfig,
    pub source: SessionSource,
}

pub fn create_custom_tab(url: impl Into<String>) -> CustomTabSessionState {
    CustomTabSessionState {
        id: uuid::Uuid::new_v4().to_string(),
        content: ContentState::new(url, false),
        source: SessionSource::CustomTab,
        ..Default::default()
    }
}

impl CustomTabSessionState {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_config(mut self, config: CustomTabConfig) -> Self {
        self.config = config;
        self
    }

    /// Turn this custom tab into a regular tab, keeping its engine link
    pub fn into_tab(self) -> TabSessionState {
        TabSessionState {
            id: self.id,
            content: self.content,
            tracking_protection: self.tracking_protection,
            engine_state: self.engine_state,
            extension_state: self.extension_state,
            context_id: self.context_id,
            created_at: chrono::Utc::now().timestamp_millis(),
            source: self.source,
            ..Default::default()
        }
    }
}

impl SessionState for CustomTabSessionState {
    fn id(&self) -> &str {
        &self.id
    }

    fn content(&self) -> &ContentState {
        &self.content
    }

    fn content_mut(&mut self) -> &mut ContentState {
        &mut self.content
    }

    fn engine_state(&self) -> &EngineState {
        &self.engine_state
    }

    fn engine_state_mut(&mut self) -> &mut EngineState {
        &mut self.engine_state
    }

    fn tracking_protection(&self) -> &TrackingProtectionState {
        &self.tracking_protection
    }

    fn tracking_protection_mut(&mut self) -> &mut TrackingProtectionState {
        &mut self.tracking_protection
    }

    fn extension_state_mut(&mut self) -> &mut HashMap<String, WebExtensionState> {
        &mut self.extension_state
    }

    fn context_id(&self) -> Option<&str> {
        self.context_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tab_generates_unique_ids() {
        let first = create_tab("https://mozilla.org");
        let second = create_tab("https://mozilla.org");

        assert_ne!(first.id, second.id);
        assert_eq!(first.content.url, "https://mozilla.org");
        assert!(!first.content.private);
        assert!(first.created_at > 0);
    }

    #[test]
    fn test_custom_tab_into_tab_keeps_content() {
        let custom = create_custom_tab("https://example.com")
            .with_id("custom")
            .with_config(CustomTabConfig {
                origin: Some("org.example.app".to_string()),
                ..Default::default()
            });

        let tab = custom.into_tab();
        assert_eq!(tab.id, "custom");
        assert_eq!(tab.content.url, "https://example.com");
        assert_eq!(tab.source, SessionSource::CustomTab);
        assert_eq!(tab.parent_id, None);
    }
}
