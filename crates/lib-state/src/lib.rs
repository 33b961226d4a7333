//! Redux-style state container
//!
//! A [`Store`] owns one immutable [`State`] snapshot and is the single entry
//! point for changing it. Actions are queued from any thread, run one at a
//! time through an ordered [`Middleware`](middleware::Middleware) chain and a
//! pure [`Reducer`], and every resulting state is delivered to observers in
//! dispatch order.

mod dispatcher;
mod error;
mod lifecycle;
pub mod middleware;
mod reducer;
mod scope;
mod state;
mod store;
mod subscription;

pub use dispatcher::{DispatchHandle, Dispatcher, WeakDispatcher};
pub use error::StoreError;
pub use lifecycle::Lifecycle;
pub use reducer::Reducer;
pub use scope::BackgroundScope;
pub use state::{Action, State};
pub use store::Store;
pub use subscription::{StateStream, Subscription};
