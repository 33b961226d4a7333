//! Browser state on top of `lib-state`
//!
//! [`BrowserState`] tracks tabs, custom tabs, the selected tab, tab groups
//! and containers. [`BrowserStore`] runs every [`BrowserAction`] through the
//! middleware chain and the browser reducers. The engine middleware keeps
//! each tab linked to at most one engine session; other middleware stamps
//! last access times and maintains the thumbnail cache.
//!
//! ```rust,ignore
//! let config = BrowserConfig::load();
//! let storage = Arc::new(DiskThumbnailStorage::from_config(&config.thumbnails)?);
//! let middleware = default_middleware(engine, Arc::new(SystemClock::new()), storage, &config);
//! let store = BrowserStore::new(BrowserState::default(), middleware)?;
//!
//! store.dispatch(TabListAction::add_selected(create_tab("https://mozilla.org"))).await?;
//! ```

pub mod actions;
pub mod clock;
pub mod engine;
pub mod middleware;
pub mod reducers;
pub mod state;
mod store;
pub mod thumbnails;

#[cfg(test)]
mod test_support;

pub use actions::BrowserAction;
pub use lib_state::{DispatchHandle, Lifecycle, StoreError};
pub use state::BrowserState;
pub use store::{default_middleware, BrowserStore};
