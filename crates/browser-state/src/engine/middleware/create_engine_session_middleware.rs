use crate::actions::{BrowserAction, EngineAction};
use crate::clock::Clock;
use crate::engine::{Engine, EngineSessionState};
use crate::middleware::{BrowserContext, BrowserNext};
use crate::state::BrowserState;
use lib_state::middleware::{BoxFuture, Middleware};
use lib_state::StoreError;
use std::sync::Arc;

/// Creates an engine session for a tab that has none and links it
///
/// A saved engine session state is restored into the new session; a tab
/// restored that way does not need its url loaded again.
pub struct CreateEngineSessionMiddleware {
    engine: Arc<dyn Engine>,
    clock: Arc<dyn Clock>,
}

struct SessionRequest {
    private: bool,
    context_id: Option<String>,
    saved_state: Option<EngineSessionState>,
}

impl CreateEngineSessionMiddleware {
    pub fn new(engine: Arc<dyn Engine>, clock: Arc<dyn Clock>) -> Self {
        Self { engine, clock }
    }

    async fn create(
        &self,
        ctx: &BrowserContext,
        tab_id: &str,
        skip_loading: bool,
        include_parent: bool,
    ) -> Result<(), StoreError> {
        let request = {
            let state = ctx.state();
            let Some(session) = state.find_tab_or_custom_tab(tab_id) else {
                log::warn!("CreateEngineSessionMiddleware: no tab {}", tab_id);
                return Ok(());
            };
            if session.engine_state().engine_session.is_some() {
                log::debug!("Tab {} already has an engine session", tab_id);
                return Ok(());
            }
            SessionRequest {
                private: session.content().private,
                context_id: session.context_id().map(str::to_string),
                saved_state: session.engine_state().engine_session_state.clone(),
            }
        };

        let engine_session = self
            .engine
            .create_session(request.private, request.context_id.as_deref());
        let restored = request
            .saved_state
            .as_ref()
            .is_some_and(|saved| engine_session.restore_state(saved));
        log::info!(
            "Created engine session for tab {} (restored: {})",
            tab_id,
            restored
        );

        ctx.dispatch(BrowserAction::Engine(EngineAction::LinkEngineSession {
            tab_id: tab_id.to_string(),
            engine_session,
            timestamp: self.clock.now_millis(),
            skip_loading: skip_loading || restored,
            include_parent,
        }))
        .await
    }
}

impl Middleware<BrowserState, BrowserAction> for CreateEngineSessionMiddleware {
    fn invoke<'a>(
        &'a self,
        ctx: &'a BrowserContext,
        next: BrowserNext<'a>,
        action: BrowserAction,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            if let BrowserAction::Engine(EngineAction::CreateEngineSession {
                tab_id,
                skip_loading,
                include_parent,
            }) = &action
            {
                self.create(ctx, tab_id, *skip_loading, *include_parent)
                    .await?;
            }
            next.run(action).await
        })
    }
}
