//! LoggingMiddleware - logs all actions for debugging

use super::{BoxFuture, Middleware, MiddlewareContext, Next};
use crate::{Action, State, StoreError};

/// LoggingMiddleware - logs every action that passes through the chain
#[derive(Debug, Default)]
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl<S: State, A: Action> Middleware<S, A> for LoggingMiddleware {
    fn invoke<'a>(
        &'a self,
        _ctx: &'a MiddlewareContext<S, A>,
        next: Next<'a, S, A>,
        action: A,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            log::debug!("Action: {:?}", action);
            next.run(action).await
        })
    }
}
