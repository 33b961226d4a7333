//! Browser middleware
//!
//! Side effects of browser actions live here: stamping last access times and
//! keeping the thumbnail cache in sync with the tab list. Engine related
//! middleware lives in [`crate::engine::middleware`].

pub mod last_access_middleware;
pub mod thumbnails_middleware;

pub use last_access_middleware::LastAccessMiddleware;
pub use thumbnails_middleware::ThumbnailsMiddleware;

use crate::actions::{BrowserAction, CustomTabListAction, TabListAction};
use crate::state::{BrowserState, TabSessionState};
use lib_state::middleware::{Middleware, MiddlewareContext, Next};
use std::sync::Arc;

/// Middleware as handed to the browser store
pub type BrowserMiddleware = Arc<dyn Middleware<BrowserState, BrowserAction>>;

pub type BrowserContext = MiddlewareContext<BrowserState, BrowserAction>;

pub type BrowserNext<'a> = Next<'a, BrowserState, BrowserAction>;

/// Ids of the tabs and custom tabs `action` is about to remove from `state`
pub(crate) fn removed_session_ids(state: &BrowserState, action: &BrowserAction) -> Vec<String> {
    match action {
        BrowserAction::TabList(action) => removed_tab_ids(state, action),
        BrowserAction::CustomTabList(CustomTabListAction::RemoveCustomTab { tab_id }) => state
            .find_custom_tab(tab_id)
            .map(|tab| vec![tab.id.clone()])
            .unwrap_or_default(),
        BrowserAction::CustomTabList(CustomTabListAction::RemoveAllCustomTabs) => {
            state.custom_tabs.iter().map(|tab| tab.id.clone()).collect()
        }
        _ => Vec::new(),
    }
}

/// Ids of the tabs a tab list action is about to remove from `state`
pub(crate) fn removed_tab_ids(state: &BrowserState, action: &TabListAction) -> Vec<String> {
    match action {
        TabListAction::RemoveTab { tab_id, .. } => {
            collect_ids(state.tabs.iter().filter(|tab| &tab.id == tab_id))
        }
        TabListAction::RemoveTabs { tab_ids } => {
            collect_ids(state.tabs.iter().filter(|tab| tab_ids.contains(&tab.id)))
        }
        TabListAction::RemoveAllTabs => collect_ids(state.tabs.iter()),
        TabListAction::RemoveAllNormalTabs => collect_ids(state.normal_tabs()),
        TabListAction::RemoveAllPrivateTabs => collect_ids(state.private_tabs()),
        TabListAction::AddTab { .. }
        | TabListAction::AddMultipleTabs { .. }
        | TabListAction::SelectTab { .. }
        | TabListAction::Restore { .. } => Vec::new(),
    }
}

fn collect_ids<'a>(tabs: impl Iterator<Item = &'a TabSessionState>) -> Vec<String> {
    tabs.map(|tab| tab.id.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{create_custom_tab, create_tab};
    use pretty_assertions::assert_eq;

    fn state() -> BrowserState {
        BrowserState {
            tabs: vec![
                create_tab("https://a.org").with_id("a"),
                create_tab("https://b.org").with_id("b").with_private(true),
                create_tab("https://c.org").with_id("c"),
            ],
            custom_tabs: vec![create_custom_tab("https://d.org").with_id("d")],
            selected_tab_id: Some("a".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_removed_ids() {
        let state = state();
        let removed = |action: TabListAction| removed_session_ids(&state, &action.into());

        assert_eq!(removed(TabListAction::remove("b")), vec!["b"]);
        assert_eq!(removed(TabListAction::remove("zzz")), Vec::<String>::new());
        assert_eq!(
            removed(TabListAction::RemoveTabs {
                tab_ids: vec!["c".into(), "a".into(), "zzz".into()]
            }),
            vec!["a", "c"]
        );
        assert_eq!(removed(TabListAction::RemoveAllTabs), vec!["a", "b", "c"]);
        assert_eq!(removed(TabListAction::RemoveAllNormalTabs), vec!["a", "c"]);
        assert_eq!(removed(TabListAction::RemoveAllPrivateTabs), vec!["b"]);
        assert_eq!(removed(TabListAction::select("a")), Vec::<String>::new());
    }

    #[test]
    fn test_removed_custom_tab_ids() {
        let state = state();

        assert_eq!(
            removed_session_ids(
                &state,
                &CustomTabListAction::RemoveCustomTab { tab_id: "d".into() }.into()
            ),
            vec!["d"]
        );
        assert_eq!(
            removed_session_ids(&state, &CustomTabListAction::RemoveAllCustomTabs.into()),
            vec!["d"]
        );
    }
}
