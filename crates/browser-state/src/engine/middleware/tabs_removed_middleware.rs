use super::{close_in_background, session_of};
use crate::actions::{BrowserAction, EngineAction};
use crate::middleware::{removed_session_ids, BrowserContext, BrowserNext};
use crate::state::BrowserState;
use lib_state::middleware::{BoxFuture, Middleware};
use lib_state::StoreError;
use std::time::Duration;

/// Unlinks and closes the engine sessions of removed tabs and custom tabs
///
/// Every affected tab is unlinked through its own action before the removal
/// is reduced. Closing happens afterwards in the background and does not
/// hold up the removal.
pub struct TabsRemovedMiddleware {
    close_timeout: Duration,
}

impl TabsRemovedMiddleware {
    pub fn new(close_timeout: Duration) -> Self {
        Self { close_timeout }
    }
}

impl Middleware<BrowserState, BrowserAction> for TabsRemovedMiddleware {
    fn invoke<'a>(
        &'a self,
        ctx: &'a BrowserContext,
        next: BrowserNext<'a>,
        action: BrowserAction,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            let sessions: Vec<_> = {
                let state = ctx.state();
                removed_session_ids(&state, &action)
                    .into_iter()
                    .filter_map(|id| session_of(&state, &id).map(|session| (id, session)))
                    .collect()
            };
            if sessions.is_empty() {
                return next.run(action).await;
            }

            for (tab_id, _) in &sessions {
                ctx.dispatch(BrowserAction::Engine(EngineAction::UnlinkEngineSession {
                    tab_id: tab_id.clone(),
                }))
                .await?;
            }

            next.run(action).await?;

            log::debug!("Closing {} engine sessions of removed tabs", sessions.len());
            for (tab_id, session) in sessions {
                close_in_background(ctx.scope(), tab_id, session, self.close_timeout);
            }
            Ok(())
        })
    }
}
