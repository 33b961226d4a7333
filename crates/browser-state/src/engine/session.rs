use super::ObserverRef;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

bitflags::bitflags! {
    /// Flags passed along with a page load
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LoadUrlFlags: u32 {
        const BYPASS_CACHE = 1 << 0;
        const BYPASS_PROXY = 1 << 1;
        /// The load was requested by another app
        const EXTERNAL = 1 << 2;
        const ALLOW_POPUPS = 1 << 3;
        const BYPASS_CLASSIFIER = 1 << 4;
        const ALLOW_ADDITIONAL_HEADERS = 1 << 5;
        const REPLACE_HISTORY = 1 << 6;
        const ALLOW_JAVASCRIPT_URL = 1 << 7;
    }
}

/// Opaque, engine-specific snapshot of a session (history, scroll position, form data)
///
/// Kept in the tab's engine state so that a suspended or restored tab can get
/// its content back when a new session is created for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineSessionState(serde_json::Value);

impl EngineSessionState {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json).map(Self)
    }

    pub fn to_json_string(&self) -> String {
        self.0.to_string()
    }
}

/// One live browsing context inside the engine
///
/// Implementations must be thread-safe themselves; the store guarantees only
/// that at most one tab links a given session at a time.
#[async_trait]
pub trait EngineSession: Send + Sync {
    fn register(&self, observer: ObserverRef);

    fn unregister(&self, observer: &ObserverRef);

    /// Restore a previously saved state; returns whether anything was restored
    fn restore_state(&self, _state: &EngineSessionState) -> bool {
        false
    }

    /// Load `url`, using `parent` as referrer when given
    async fn load_url(
        &self,
        url: &str,
        parent: Option<EngineSessionRef>,
        flags: LoadUrlFlags,
        additional_headers: Option<HashMap<String, String>>,
    ) -> anyhow::Result<()>;

    async fn reload(&self, flags: LoadUrlFlags) -> anyhow::Result<()>;

    async fn go_back(&self) -> anyhow::Result<()>;

    async fn go_forward(&self) -> anyhow::Result<()>;

    /// Release the session; it must not be used afterwards
    async fn close(&self);
}

/// Creates engine sessions
pub trait Engine: Send + Sync {
    fn create_session(&self, private: bool, context_id: Option<&str>) -> EngineSessionRef;
}

/// Shared handle to an engine session
///
/// Two handles are equal when they point at the same session.
#[derive(Clone)]
pub struct EngineSessionRef(Arc<dyn EngineSession>);

impl EngineSessionRef {
    pub fn new<T: EngineSession + 'static>(session: T) -> Self {
        Self(Arc::new(session))
    }

    pub fn from_arc(session: Arc<dyn EngineSession>) -> Self {
        Self(session)
    }

    fn address(&self) -> *const () {
        Arc::as_ptr(&self.0) as *const ()
    }
}

impl Deref for EngineSessionRef {
    type Target = dyn EngineSession;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for EngineSessionRef {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl Eq for EngineSessionRef {}

impl fmt::Debug for EngineSessionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EngineSession({:p})", self.address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeEngineSession;

    #[test]
    fn test_refs_compare_by_identity() {
        let session = Arc::new(FakeEngineSession::default());
        let first = EngineSessionRef::from_arc(session.clone());
        let second = EngineSessionRef::from_arc(session);
        let other = EngineSessionRef::new(FakeEngineSession::default());

        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn test_session_state_json() {
        let state = EngineSessionState::from_json_str(r#"{"history":["a","b"],"index":1}"#).unwrap();
        assert_eq!(state.as_json()["index"], 1);

        let again = EngineSessionState::from_json_str(&state.to_json_string()).unwrap();
        assert_eq!(again, state);
    }
}
