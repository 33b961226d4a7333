//! The browser store
//!
//! A [`Store`] over [`BrowserState`] with the browser reducers wired in.

use crate::actions::BrowserAction;
use crate::clock::Clock;
use crate::engine::{Engine, EngineMiddleware};
use crate::middleware::{BrowserMiddleware, LastAccessMiddleware, ThumbnailsMiddleware};
use crate::reducers;
use crate::state::BrowserState;
use crate::thumbnails::ThumbnailStorage;
use browser_config::BrowserConfig;
use lib_state::middleware::LoggingMiddleware;
use lib_state::{
    BackgroundScope, DispatchHandle, Dispatcher, Lifecycle, StateStream, Store, StoreError,
    Subscription,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct BrowserStore {
    store: Store<BrowserState, BrowserAction>,
}

impl BrowserStore {
    /// Create the store and dispatch [`BrowserAction::Init`]
    ///
    /// Fails with [`StoreError::InvalidState`] if `initial_state` has
    /// duplicate ids, a dangling selection, dangling parents or groups with
    /// unknown tabs. Must be called within a tokio runtime.
    pub fn new(
        initial_state: BrowserState,
        middleware: Vec<BrowserMiddleware>,
    ) -> Result<Self, StoreError> {
        let store = Store::new(initial_state, reducers::reduce, middleware)?;
        // processed before anything dispatched later, nobody waits for it
        drop(store.dispatch(BrowserAction::Init));
        Ok(Self { store })
    }

    pub fn dispatch(&self, action: impl Into<BrowserAction>) -> DispatchHandle {
        self.store.dispatch(action.into())
    }

    pub fn state(&self) -> Arc<BrowserState> {
        self.store.state()
    }

    pub fn dispatcher(&self) -> Dispatcher<BrowserAction> {
        self.store.dispatcher()
    }

    pub fn scope(&self) -> &BackgroundScope {
        self.store.scope()
    }

    pub fn subscribe(&self, lifecycle: Option<&Lifecycle>) -> StateStream<BrowserState> {
        self.store.subscribe(lifecycle)
    }

    pub fn observe<F>(&self, lifecycle: Option<&Lifecycle>, callback: F) -> Subscription<BrowserState>
    where
        F: Fn(&BrowserState) + Send + 'static,
    {
        self.store.observe(lifecycle, callback)
    }
}

/// The full middleware stack for a browser
///
/// Logging first, then the engine middleware, last access tracking and the
/// thumbnail cache.
pub fn default_middleware(
    engine: Arc<dyn Engine>,
    clock: Arc<dyn Clock>,
    thumbnails: Arc<dyn ThumbnailStorage>,
    config: &BrowserConfig,
) -> Vec<BrowserMiddleware> {
    let mut middleware: Vec<BrowserMiddleware> = vec![Arc::new(LoggingMiddleware::new())];
    middleware.extend(EngineMiddleware::create(engine, Arc::clone(&clock), &config.engine));
    middleware.push(Arc::new(LastAccessMiddleware::new(clock)));
    middleware.push(Arc::new(ThumbnailsMiddleware::new(thumbnails)));
    middleware
}
