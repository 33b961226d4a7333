//! Engine session actions
//!
//! The navigation variants (`LoadUrl`, `Reload`, `GoBack`, `GoForward`) and
//! `CreateEngineSession` leave the state alone. They exist for the engine
//! middleware, which performs the engine call in the background.

use crate::engine::{EngineSessionRef, EngineSessionState, LoadUrlFlags, ObserverRef};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub enum EngineAction {
    CreateEngineSession {
        tab_id: String,
        skip_loading: bool,
        include_parent: bool,
    },
    /// Attach `engine_session` to the tab; the linking middleware registers the observer
    LinkEngineSession {
        tab_id: String,
        engine_session: EngineSessionRef,
        timestamp: i64,
        skip_loading: bool,
        include_parent: bool,
    },
    UnlinkEngineSession { tab_id: String },
    UpdateEngineSessionObserver {
        tab_id: String,
        observer: ObserverRef,
    },
    UpdateEngineSessionState {
        tab_id: String,
        state: EngineSessionState,
    },
    /// Close the session but keep its saved state for later
    SuspendEngineSession { tab_id: String },
    LoadUrl {
        tab_id: String,
        url: String,
        flags: LoadUrlFlags,
        additional_headers: Option<HashMap<String, String>>,
    },
    Reload { tab_id: String, flags: LoadUrlFlags },
    GoBack { tab_id: String },
    GoForward { tab_id: String },
    LoadFailed { tab_id: String, message: String },
}

impl EngineAction {
    pub fn load_url(tab_id: impl Into<String>, url: impl Into<String>) -> Self {
        EngineAction::LoadUrl {
            tab_id: tab_id.into(),
            url: url.into(),
            flags: LoadUrlFlags::empty(),
            additional_headers: None,
        }
    }

    pub fn link(tab_id: impl Into<String>, engine_session: EngineSessionRef, timestamp: i64) -> Self {
        EngineAction::LinkEngineSession {
            tab_id: tab_id.into(),
            engine_session,
            timestamp,
            skip_loading: false,
            include_parent: false,
        }
    }

    pub fn unlink(tab_id: impl Into<String>) -> Self {
        EngineAction::UnlinkEngineSession {
            tab_id: tab_id.into(),
        }
    }
}
