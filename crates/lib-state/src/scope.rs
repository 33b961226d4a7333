//! Background scope for fire-and-forget side effects
//!
//! Middleware must never block the dispatch loop on engine or storage work.
//! Instead it submits that work to the store's [`BackgroundScope`] and reports
//! results back through further dispatches. The scope lives as long as the
//! store: it is cancelled when the dispatch loop stops, not when observers
//! go away.

use crate::StoreError;
use std::future::Future;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

#[derive(Debug, Clone)]
pub struct BackgroundScope {
    runtime: Handle,
    token: CancellationToken,
    tracker: TaskTracker,
}

impl BackgroundScope {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            token: CancellationToken::new(),
            tracker: TaskTracker::new(),
        }
    }

    /// Create a scope on the runtime of the calling task
    pub fn current() -> Result<Self, StoreError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| StoreError::NoRuntime)
    }

    /// Run `future` in the background until it completes or the scope is cancelled
    ///
    /// The future must handle its own failures; nothing is reported back to
    /// the caller.
    pub fn spawn<F>(&self, name: &'static str, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.token.is_cancelled() {
            log::warn!("BackgroundScope: scope cancelled, not starting '{}'", name);
            return;
        }

        let token = self.token.clone();
        self.tracker.spawn_on(
            async move {
                tokio::select! {
                    _ = token.cancelled() => {
                        log::debug!("BackgroundScope: '{}' cancelled", name);
                    }
                    _ = future => {
                        log::trace!("BackgroundScope: '{}' finished", name);
                    }
                }
            },
            &self.runtime,
        );
    }

    /// Cancel all running work and refuse new work
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait until every task spawned on this scope so far has finished
    pub async fn settle(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }

    pub(crate) fn runtime(&self) -> &Handle {
        &self.runtime
    }
}
