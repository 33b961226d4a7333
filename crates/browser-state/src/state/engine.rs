use crate::engine::{EngineSessionRef, EngineSessionState, LoadUrlFlags, ObserverRef};
use std::collections::HashMap;

/// A tab's link to the browser engine
///
/// `engine_session` and `engine_observer` are set and cleared only by the
/// engine reducers, driven by the linking middleware.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineState {
    pub engine_session: Option<EngineSessionRef>,
    pub engine_observer: Option<ObserverRef>,
    /// Saved content of a suspended or restored tab
    pub engine_session_state: Option<EngineSessionState>,
    pub crashed: bool,
    /// When the current session was linked, in milliseconds
    pub timestamp: Option<i64>,
    /// Used for the first load once a session gets created
    pub initial_load_flags: LoadUrlFlags,
    pub initial_additional_headers: Option<HashMap<String, String>>,
}

impl EngineState {
    pub fn is_linked(&self) -> bool {
        self.engine_session.is_some() && self.engine_observer.is_some()
    }
}
