//! Reducers module
//!
//! Pure functions from `(BrowserState, action)` to the next `BrowserState`.
//! A reducer returns [`StoreError::Rejected`] when an action would break an
//! invariant of the state tree; the committed state then stays as it was.

pub mod container_reducer;
pub mod content_reducer;
pub mod crash_reducer;
pub mod custom_tab_list_reducer;
pub mod engine_reducer;
pub mod last_access_reducer;
pub mod tab_group_reducer;
pub mod tab_list_reducer;
pub mod tracking_protection_reducer;
pub mod web_extension_reducer;

use crate::actions::BrowserAction;
use crate::state::BrowserState;
use lib_state::StoreError;

/// Root reducer - routes each action group to its reducer
///
/// Handed to the store as its [`Reducer`](lib_state::Reducer).
pub fn reduce(state: BrowserState, action: &BrowserAction) -> Result<BrowserState, StoreError> {
    match action {
        BrowserAction::Init => Ok(state),
        BrowserAction::TabList(action) => tab_list_reducer::reduce_tab_list(state, action),
        BrowserAction::CustomTabList(action) => {
            custom_tab_list_reducer::reduce_custom_tab_list(state, action)
        }
        BrowserAction::Engine(action) => Ok(engine_reducer::reduce_engine(state, action)),
        BrowserAction::Content(action) => Ok(content_reducer::reduce_content(state, action)),
        BrowserAction::TrackingProtection(action) => Ok(
            tracking_protection_reducer::reduce_tracking_protection(state, action),
        ),
        BrowserAction::LastAccess(action) => {
            Ok(last_access_reducer::reduce_last_access(state, action))
        }
        BrowserAction::Crash(action) => Ok(crash_reducer::reduce_crash(state, action)),
        BrowserAction::TabGroup(action) => tab_group_reducer::reduce_tab_group(state, action),
        BrowserAction::Container(action) => Ok(container_reducer::reduce_container(state, action)),
        BrowserAction::WebExtension(action) => {
            Ok(web_extension_reducer::reduce_web_extension(state, action))
        }
    }
}

