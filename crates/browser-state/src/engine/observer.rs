use super::EngineSessionState;
use crate::actions::{BrowserAction, ContentAction, CrashAction, EngineAction};
use lib_state::WeakDispatcher;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Callbacks an engine session makes while it loads and renders content
///
/// Every method has an empty default so observers only implement what they
/// care about.
pub trait EngineSessionObserver: Send + Sync {
    fn on_location_change(&self, _url: &str) {}

    fn on_title_change(&self, _title: &str) {}

    fn on_progress(&self, _progress: u8) {}

    fn on_loading_state_change(&self, _loading: bool) {}

    fn on_navigation_state_change(&self, _can_go_back: Option<bool>, _can_go_forward: Option<bool>) {}

    fn on_crash(&self) {}

    fn on_state_updated(&self, _state: EngineSessionState) {}
}

/// Shared handle to an observer; equal when pointing at the same observer
#[derive(Clone)]
pub struct ObserverRef(Arc<dyn EngineSessionObserver>);

impl ObserverRef {
    pub fn new<T: EngineSessionObserver + 'static>(observer: T) -> Self {
        Self(Arc::new(observer))
    }

    fn address(&self) -> *const () {
        Arc::as_ptr(&self.0) as *const ()
    }
}

impl Deref for ObserverRef {
    type Target = dyn EngineSessionObserver;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for ObserverRef {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl Eq for ObserverRef {}

impl fmt::Debug for ObserverRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EngineSessionObserver({:p})", self.address())
    }
}

/// Bridges engine callbacks for one tab back into the store
///
/// Created when a session gets linked to the tab and unregistered when it is
/// unlinked. Holds only a weak dispatcher: a session that outlives the store
/// reports into the void instead of keeping the store alive.
pub struct TabEngineObserver {
    tab_id: String,
    dispatcher: WeakDispatcher<BrowserAction>,
}

impl TabEngineObserver {
    pub fn new(tab_id: impl Into<String>, dispatcher: WeakDispatcher<BrowserAction>) -> Self {
        Self {
            tab_id: tab_id.into(),
            dispatcher,
        }
    }

    fn dispatch(&self, action: BrowserAction) {
        // fire and forget, the engine thread must not wait for the store
        drop(self.dispatcher.dispatch(action));
    }
}

impl EngineSessionObserver for TabEngineObserver {
    fn on_location_change(&self, url: &str) {
        self.dispatch(BrowserAction::Content(ContentAction::UpdateUrl {
            session_id: self.tab_id.clone(),
            url: url.to_string(),
        }));
    }

    fn on_title_change(&self, title: &str) {
        self.dispatch(BrowserAction::Content(ContentAction::UpdateTitle {
            session_id: self.tab_id.clone(),
            title: title.to_string(),
        }));
    }

    fn on_progress(&self, progress: u8) {
        self.dispatch(BrowserAction::Content(ContentAction::UpdateProgress {
            session_id: self.tab_id.clone(),
            progress,
        }));
    }

    fn on_loading_state_change(&self, loading: bool) {
        self.dispatch(BrowserAction::Content(ContentAction::UpdateLoadingState {
            session_id: self.tab_id.clone(),
            loading,
        }));
    }

    fn on_navigation_state_change(&self, can_go_back: Option<bool>, can_go_forward: Option<bool>) {
        if let Some(can_go_back) = can_go_back {
            self.dispatch(BrowserAction::Content(
                ContentAction::UpdateBackNavigationState {
                    session_id: self.tab_id.clone(),
                    can_go_back,
                },
            ));
        }
        if let Some(can_go_forward) = can_go_forward {
            self.dispatch(BrowserAction::Content(
                ContentAction::UpdateForwardNavigationState {
                    session_id: self.tab_id.clone(),
                    can_go_forward,
                },
            ));
        }
    }

    fn on_crash(&self) {
        log::warn!("Engine session of tab {} crashed", self.tab_id);
        self.dispatch(BrowserAction::Crash(CrashAction::SessionCrashed {
            tab_id: self.tab_id.clone(),
        }));
    }

    fn on_state_updated(&self, state: EngineSessionState) {
        self.dispatch(BrowserAction::Engine(
            EngineAction::UpdateEngineSessionState {
                tab_id: self.tab_id.clone(),
                state,
            },
        ));
    }
}
