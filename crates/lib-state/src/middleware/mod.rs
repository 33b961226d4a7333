//! Middleware system for the store
//!
//! Middleware sits between action dispatch and reducer execution, allowing
//! side effects, async operations, logging, and other cross-cutting concerns
//! to be handled in a composable way.
//!
//! ## Design
//!
//! ```text
//! dispatch → queue → Middleware₁ → … → Middlewareₙ → Reducer → observers
//! ```
//!
//! Each middleware can:
//! - Inspect actions and the current state
//! - Rewrite the action it hands to `next`
//! - Dispatch further actions (they re-enter the chain from the front)
//! - Submit background work to the store's scope
//! - Drop an action by not calling `next`
//!
//! ## Example
//!
//! ```rust,ignore
//! struct AuditMiddleware;
//!
//! impl Middleware<AppState, AppAction> for AuditMiddleware {
//!     fn invoke<'a>(
//!         &'a self,
//!         ctx: &'a MiddlewareContext<AppState, AppAction>,
//!         next: Next<'a, AppState, AppAction>,
//!         action: AppAction,
//!     ) -> BoxFuture<'a, Result<(), StoreError>> {
//!         Box::pin(async move {
//!             let before = ctx.state();
//!             next.run(action).await?;
//!             log::debug!("{:?} -> {:?}", before, ctx.state());
//!             Ok(())
//!         })
//!     }
//! }
//! ```

use crate::StoreError;
use std::future::Future;
use std::pin::Pin;

mod capture;
mod chain;
mod logging;

pub use capture::CaptureActionsMiddleware;
pub use chain::{MiddlewareContext, Next};
pub use logging::LoggingMiddleware;

/// BoxFuture type alias for async middleware handlers
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Middleware trait - intercepts actions before they reach the reducer
///
/// Middleware runs in the order it was handed to the store, for every action.
/// Calling `next.run(action)` continues the chain and resolves once the rest
/// of the chain, the reducer and observer notification are done, so
/// `ctx.state()` afterwards reflects the reduced state.
///
/// Never await a [`Dispatcher`](crate::Dispatcher) handle from inside
/// `invoke`: the dispatch loop is busy with the current action. Use
/// `ctx.dispatch` for nested dispatch instead.
pub trait Middleware<S, A>: Send + Sync {
    fn invoke<'a>(
        &'a self,
        ctx: &'a MiddlewareContext<S, A>,
        next: Next<'a, S, A>,
        action: A,
    ) -> BoxFuture<'a, Result<(), StoreError>>;
}
