use super::{BoxFuture, Middleware};
use crate::dispatcher::WeakDispatcher;
use crate::scope::BackgroundScope;
use crate::store::Shared;
use crate::{Action, State, StoreError};
use std::sync::Arc;

/// What a middleware can see and do while processing an action
pub struct MiddlewareContext<S, A> {
    shared: Arc<Shared<S, A>>,
    dispatcher: WeakDispatcher<A>,
}

impl<S: State, A: Action> MiddlewareContext<S, A> {
    pub(crate) fn new(shared: Arc<Shared<S, A>>, dispatcher: WeakDispatcher<A>) -> Self {
        Self { shared, dispatcher }
    }

    /// The currently committed state
    ///
    /// Read it again after `next.run(..)` to observe the reduced state.
    pub fn state(&self) -> Arc<S> {
        self.shared.current_state()
    }

    /// Process `action` through the full chain from the front, right now
    ///
    /// Resolves after the action was reduced and observers were notified,
    /// before the action currently being handled continues.
    pub fn dispatch(&self, action: A) -> BoxFuture<'_, Result<(), StoreError>> {
        Next {
            remaining: &self.shared.middleware,
            context: self,
        }
        .run(action)
    }

    /// Queued dispatch for work that outlives this invocation
    pub fn dispatcher(&self) -> WeakDispatcher<A> {
        self.dispatcher.clone()
    }

    /// The store's background scope
    pub fn scope(&self) -> &BackgroundScope {
        &self.shared.scope
    }
}

/// The rest of the chain after the current middleware
pub struct Next<'a, S, A> {
    remaining: &'a [Arc<dyn Middleware<S, A>>],
    context: &'a MiddlewareContext<S, A>,
}

impl<'a, S: State, A: Action> Next<'a, S, A> {
    /// Continue the chain with `action`, which may differ from the one received
    pub fn run(self, action: A) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            match self.remaining.split_first() {
                Some((middleware, rest)) => {
                    let next = Next {
                        remaining: rest,
                        context: self.context,
                    };
                    middleware.invoke(self.context, next, action).await
                }
                None => self.context.shared.reduce(&action),
            }
        })
    }
}
