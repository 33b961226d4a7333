use super::{close_in_background, session_of};
use crate::actions::{BrowserAction, EngineAction};
use crate::middleware::{BrowserContext, BrowserNext};
use crate::state::BrowserState;
use lib_state::middleware::{BoxFuture, Middleware};
use lib_state::StoreError;
use std::time::Duration;

/// Releases the engine session of a tab while keeping the tab
///
/// The session's last reported state stays in the tab's engine state, so a
/// later `CreateEngineSession` can restore it. Consumes
/// `SuspendEngineSession`.
pub struct SuspendMiddleware {
    close_timeout: Duration,
}

impl SuspendMiddleware {
    pub fn new(close_timeout: Duration) -> Self {
        Self { close_timeout }
    }
}

impl Middleware<BrowserState, BrowserAction> for SuspendMiddleware {
    fn invoke<'a>(
        &'a self,
        ctx: &'a BrowserContext,
        next: BrowserNext<'a>,
        action: BrowserAction,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            let tab_id = match action {
                BrowserAction::Engine(EngineAction::SuspendEngineSession { tab_id }) => tab_id,
                other => return next.run(other).await,
            };

            let Some(session) = session_of(&ctx.state(), &tab_id) else {
                log::debug!("Tab {} has no engine session to suspend", tab_id);
                return Ok(());
            };

            ctx.dispatch(BrowserAction::Engine(EngineAction::UnlinkEngineSession {
                tab_id: tab_id.clone(),
            }))
            .await?;
            log::info!("Suspended engine session of tab {}", tab_id);
            close_in_background(ctx.scope(), tab_id, session, self.close_timeout);
            Ok(())
        })
    }
}
