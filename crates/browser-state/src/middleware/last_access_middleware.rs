//! LastAccessMiddleware - stamps tabs when they become the selected tab

use super::{BrowserContext, BrowserNext};
use crate::actions::{BrowserAction, ContentAction, LastAccessAction, TabListAction};
use crate::clock::Clock;
use crate::state::BrowserState;
use lib_state::middleware::{BoxFuture, Middleware};
use lib_state::StoreError;
use std::sync::Arc;

/// Updates `last_access` of a tab whenever it becomes selected
///
/// That covers explicit selection, adding tabs one of which ends up selected,
/// restoring with a selection, url changes of the selected tab, and the tab
/// that takes over the selection when the selected tab is removed.
pub struct LastAccessMiddleware {
    clock: Arc<dyn Clock>,
}

impl LastAccessMiddleware {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    async fn stamp(&self, ctx: &BrowserContext, tab_id: String) -> Result<(), StoreError> {
        let last_access = self.clock.now_millis();
        log::trace!("LastAccessMiddleware: tab {} accessed at {}", tab_id, last_access);
        ctx.dispatch(BrowserAction::LastAccess(LastAccessAction::UpdateLastAccess {
            tab_id,
            last_access,
        }))
        .await
    }
}

fn selected_tab_id(ctx: &BrowserContext) -> Option<String> {
    ctx.state().selected_tab_id.clone()
}

/// The tab to stamp once `action` has been reduced, if any
fn accessed_tab(action: &BrowserAction, state: &BrowserState) -> Option<String> {
    let selected = state.selected_tab_id.as_deref()?;
    let accessed = match action {
        BrowserAction::TabList(TabListAction::SelectTab { tab_id }) => tab_id == selected,
        BrowserAction::TabList(TabListAction::AddTab { tab, .. }) => tab.id == selected,
        BrowserAction::TabList(TabListAction::AddMultipleTabs { tabs }) => {
            tabs.iter().any(|tab| tab.id == selected)
        }
        BrowserAction::TabList(TabListAction::Restore {
            selected_tab_id: Some(tab_id),
            ..
        }) => tab_id == selected,
        BrowserAction::Content(ContentAction::UpdateUrl { session_id, .. }) => session_id == selected,
        _ => false,
    };
    accessed.then(|| selected.to_string())
}

impl Middleware<BrowserState, BrowserAction> for LastAccessMiddleware {
    fn invoke<'a>(
        &'a self,
        ctx: &'a BrowserContext,
        next: BrowserNext<'a>,
        action: BrowserAction,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            if let BrowserAction::TabList(tab_list_action) = &action {
                if tab_list_action.is_removal() {
                    let before = selected_tab_id(ctx);
                    next.run(action).await?;
                    let after = selected_tab_id(ctx);

                    return match after {
                        Some(tab_id) if before.as_ref() != Some(&tab_id) => {
                            self.stamp(ctx, tab_id).await
                        }
                        _ => Ok(()),
                    };
                }
            }

            let applied = action.clone();
            next.run(action).await?;

            let accessed = accessed_tab(&applied, &ctx.state());
            match accessed {
                Some(tab_id) => self.stamp(ctx, tab_id).await,
                None => Ok(()),
            }
        })
    }
}
