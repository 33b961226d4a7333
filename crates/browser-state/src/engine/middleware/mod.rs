//! Engine middleware
//!
//! Keeps tabs and engine sessions linked: creates sessions on demand, binds
//! an observer per linked session, forwards navigation to the engine and
//! closes sessions of removed or suspended tabs. Engine calls never run on
//! the dispatch loop, they are submitted to the store's background scope.

mod create_engine_session_middleware;
mod engine_delegate_middleware;
mod linking_middleware;
mod suspend_middleware;
mod tabs_removed_middleware;

pub use create_engine_session_middleware::CreateEngineSessionMiddleware;
pub use engine_delegate_middleware::EngineDelegateMiddleware;
pub use linking_middleware::LinkingMiddleware;
pub use suspend_middleware::SuspendMiddleware;
pub use tabs_removed_middleware::TabsRemovedMiddleware;

use super::{Engine, EngineSessionRef};
use crate::actions::{BrowserAction, EngineAction};
use crate::clock::Clock;
use crate::middleware::BrowserMiddleware;
use crate::state::BrowserState;
use browser_config::EngineConfig;
use lib_state::{BackgroundScope, WeakDispatcher};
use std::sync::Arc;
use std::time::Duration;

pub struct EngineMiddleware;

impl EngineMiddleware {
    /// The engine middleware, in the order the store must run them
    pub fn create(
        engine: Arc<dyn Engine>,
        clock: Arc<dyn Clock>,
        config: &EngineConfig,
    ) -> Vec<BrowserMiddleware> {
        vec![
            Arc::new(EngineDelegateMiddleware::new(
                config.include_parent_by_default,
            )),
            Arc::new(CreateEngineSessionMiddleware::new(engine, clock)),
            Arc::new(LinkingMiddleware::new()),
            Arc::new(TabsRemovedMiddleware::new(config.close_timeout())),
            Arc::new(SuspendMiddleware::new(config.close_timeout())),
        ]
    }
}

/// Close `session` in the background, giving up after `timeout`
pub(crate) fn close_in_background(
    scope: &BackgroundScope,
    tab_id: String,
    session: EngineSessionRef,
    timeout: Duration,
) {
    scope.spawn("close-engine-session", async move {
        match tokio::time::timeout(timeout, session.close()).await {
            Ok(()) => log::debug!("Closed engine session of {}", tab_id),
            Err(_) => log::warn!(
                "Closing engine session of {} timed out after {:?}",
                tab_id,
                timeout
            ),
        }
    });
}

/// The engine session linked to the tab or custom tab `tab_id`
pub(crate) fn session_of(state: &BrowserState, tab_id: &str) -> Option<EngineSessionRef> {
    state
        .find_tab_or_custom_tab(tab_id)
        .and_then(|session| session.engine_state().engine_session.clone())
}

/// Queue a `LoadFailed` for `tab_id`; nothing happens if the store is gone
pub(crate) fn report_load_failure(
    dispatcher: &WeakDispatcher<BrowserAction>,
    tab_id: String,
    error: anyhow::Error,
) {
    log::warn!("Engine load for tab {} failed: {:#}", tab_id, error);
    drop(dispatcher.dispatch(BrowserAction::Engine(EngineAction::LoadFailed {
        tab_id,
        message: error.to_string(),
    })));
}
