use super::{BoxFuture, Middleware, MiddlewareContext, Next};
use crate::{Action, State, StoreError};
use std::sync::{Mutex, PoisonError};

/// Records every action that reaches it, then continues the chain
///
/// Meant for tests that assert which actions were dispatched and in which
/// order, including nested dispatches made by other middleware.
#[derive(Debug)]
pub struct CaptureActionsMiddleware<A> {
    captured: Mutex<Vec<A>>,
}

impl<A> Default for CaptureActionsMiddleware<A> {
    fn default() -> Self {
        Self {
            captured: Mutex::new(Vec::new()),
        }
    }
}

impl<A: Action> CaptureActionsMiddleware<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// All actions captured so far, in the order they reached this middleware
    pub fn actions(&self) -> Vec<A> {
        self.captured
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn find_first<P>(&self, predicate: P) -> Option<A>
    where
        P: Fn(&A) -> bool,
    {
        self.captured
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|action| predicate(action))
            .cloned()
    }

    /// Index of the first captured action matching `predicate`
    pub fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: Fn(&A) -> bool,
    {
        self.captured
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .position(predicate)
    }

    pub fn reset(&self) {
        self.captured
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl<S: State, A: Action> Middleware<S, A> for CaptureActionsMiddleware<A> {
    fn invoke<'a>(
        &'a self,
        _ctx: &'a MiddlewareContext<S, A>,
        next: Next<'a, S, A>,
        action: A,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            self.captured
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(action.clone());
            next.run(action).await
        })
    }
}
