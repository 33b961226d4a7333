use super::{report_load_failure, session_of};
use crate::actions::{BrowserAction, EngineAction};
use crate::engine::{is_extension_url, EngineSessionRef};
use crate::middleware::{BrowserContext, BrowserNext};
use crate::state::BrowserState;
use lib_state::middleware::{BoxFuture, Middleware};
use lib_state::StoreError;

/// Forwards navigation actions to the tab's engine session
///
/// `LoadUrl` creates and links a session first when the tab has none.
/// The engine call itself runs in the background; a failure comes back as
/// `EngineAction::LoadFailed`.
pub struct EngineDelegateMiddleware {
    include_parent: bool,
}

impl EngineDelegateMiddleware {
    pub fn new(include_parent: bool) -> Self {
        Self { include_parent }
    }

    async fn get_or_create_session(
        &self,
        ctx: &BrowserContext,
        tab_id: &str,
    ) -> Result<Option<EngineSessionRef>, StoreError> {
        if let Some(session) = session_of(&ctx.state(), tab_id) {
            return Ok(Some(session));
        }
        if !ctx.state().contains_session(tab_id) {
            log::warn!("EngineDelegateMiddleware: no tab {} to load into", tab_id);
            return Ok(None);
        }

        ctx.dispatch(BrowserAction::Engine(EngineAction::CreateEngineSession {
            tab_id: tab_id.to_string(),
            skip_loading: true,
            include_parent: self.include_parent,
        }))
        .await?;
        Ok(session_of(&ctx.state(), tab_id))
    }

    async fn handle(&self, ctx: &BrowserContext, action: &EngineAction) -> Result<(), StoreError> {
        match action {
            EngineAction::LoadUrl {
                tab_id,
                url,
                flags,
                additional_headers,
            } => {
                if let Some(session) = self.get_or_create_session(ctx, tab_id).await? {
                    let parent = self.parent_session(&ctx.state(), tab_id, url);
                    let dispatcher = ctx.dispatcher();
                    let tab_id = tab_id.clone();
                    let url = url.clone();
                    let flags = *flags;
                    let headers = additional_headers.clone();
                    ctx.scope().spawn("load-url", async move {
                        if let Err(e) = session.load_url(&url, parent, flags, headers).await {
                            report_load_failure(&dispatcher, tab_id, e);
                        }
                    });
                }
            }
            EngineAction::Reload { tab_id, flags } => {
                if let Some(session) = session_of(&ctx.state(), tab_id) {
                    let dispatcher = ctx.dispatcher();
                    let tab_id = tab_id.clone();
                    let flags = *flags;
                    ctx.scope().spawn("reload", async move {
                        if let Err(e) = session.reload(flags).await {
                            report_load_failure(&dispatcher, tab_id, e);
                        }
                    });
                }
            }
            EngineAction::GoBack { tab_id } => {
                if let Some(session) = session_of(&ctx.state(), tab_id) {
                    let dispatcher = ctx.dispatcher();
                    let tab_id = tab_id.clone();
                    ctx.scope().spawn("go-back", async move {
                        if let Err(e) = session.go_back().await {
                            report_load_failure(&dispatcher, tab_id, e);
                        }
                    });
                }
            }
            EngineAction::GoForward { tab_id } => {
                if let Some(session) = session_of(&ctx.state(), tab_id) {
                    let dispatcher = ctx.dispatcher();
                    let tab_id = tab_id.clone();
                    ctx.scope().spawn("go-forward", async move {
                        if let Err(e) = session.go_forward().await {
                            report_load_failure(&dispatcher, tab_id, e);
                        }
                    });
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn parent_session(&self, state: &BrowserState, tab_id: &str, url: &str) -> Option<EngineSessionRef> {
        if !self.include_parent || is_extension_url(url) {
            return None;
        }
        let parent_id = state.find_tab(tab_id)?.parent_id.as_deref()?;
        session_of(state, parent_id)
    }
}

impl Middleware<BrowserState, BrowserAction> for EngineDelegateMiddleware {
    fn invoke<'a>(
        &'a self,
        ctx: &'a BrowserContext,
        next: BrowserNext<'a>,
        action: BrowserAction,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            if let BrowserAction::Engine(engine_action) = &action {
                self.handle(ctx, engine_action).await?;
            }
            next.run(action).await
        })
    }
}
