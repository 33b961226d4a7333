use super::{report_load_failure, session_of};
use crate::actions::{BrowserAction, CustomTabListAction, EngineAction, TabListAction};
use crate::engine::{is_extension_url, EngineSessionRef, LoadUrlFlags, ObserverRef, TabEngineObserver};
use crate::middleware::{BrowserContext, BrowserNext};
use crate::state::BrowserState;
use lib_state::middleware::{BoxFuture, Middleware};
use lib_state::StoreError;
use std::collections::HashMap;

/// Binds engine sessions to tabs
///
/// Per tab: `Unlinked -> Linking -> Linked -> Unlinked`. Linking registers a
/// [`TabEngineObserver`] on the session, records it in the tab's engine
/// state and, unless told to skip it, starts loading the tab's url.
/// Unlinking unregisters the observer but leaves the session open; closing
/// it is up to whoever unlinked.
#[derive(Debug, Default)]
pub struct LinkingMiddleware;

/// What the first load of a freshly linked session needs
struct InitialLoad {
    url: String,
    parent: Option<EngineSessionRef>,
    flags: LoadUrlFlags,
    headers: Option<HashMap<String, String>>,
}

impl LinkingMiddleware {
    pub fn new() -> Self {
        Self
    }

    async fn link(
        &self,
        ctx: &BrowserContext,
        tab_id: &str,
        skip_loading: bool,
        include_parent: bool,
    ) -> Result<(), StoreError> {
        let (session, load) = {
            let state = ctx.state();
            let Some(session) = session_of(&state, tab_id) else {
                return Ok(());
            };
            let load = (!skip_loading).then(|| initial_load(&state, tab_id, include_parent));
            (session, load.flatten())
        };

        let observer = ObserverRef::new(TabEngineObserver::new(tab_id, ctx.dispatcher()));
        session.register(observer.clone());
        ctx.dispatch(BrowserAction::Engine(
            EngineAction::UpdateEngineSessionObserver {
                tab_id: tab_id.to_string(),
                observer,
            },
        ))
        .await?;
        log::info!("Linked engine session to tab {}", tab_id);

        if let Some(load) = load {
            let dispatcher = ctx.dispatcher();
            let tab_id = tab_id.to_string();
            ctx.scope().spawn("initial-load", async move {
                let result = session
                    .load_url(&load.url, load.parent, load.flags, load.headers)
                    .await;
                if let Err(e) = result {
                    report_load_failure(&dispatcher, tab_id, e);
                }
            });
        }
        Ok(())
    }

    /// Unregister the tab's observer from its session, if both exist
    fn unlink(&self, state: &BrowserState, tab_id: &str) {
        let Some(session) = state.find_tab_or_custom_tab(tab_id) else {
            return;
        };
        let engine_state = session.engine_state();
        if let (Some(session), Some(observer)) =
            (&engine_state.engine_session, &engine_state.engine_observer)
        {
            session.unregister(observer);
            log::info!("Unlinked engine session from tab {}", tab_id);
        }
    }
}

fn initial_load(state: &BrowserState, tab_id: &str, include_parent: bool) -> Option<InitialLoad> {
    let session = state.find_tab_or_custom_tab(tab_id)?;
    let url = session.content().url.clone();
    let engine_state = session.engine_state();

    // extension pages have no referrer tab and get no extra headers
    if is_extension_url(&url) {
        return Some(InitialLoad {
            url,
            parent: None,
            flags: engine_state.initial_load_flags,
            headers: None,
        });
    }

    let parent = if include_parent {
        session
            .parent_id()
            .and_then(|parent_id| session_of(state, parent_id))
    } else {
        None
    };

    Some(InitialLoad {
        parent,
        flags: engine_state.initial_load_flags,
        headers: engine_state.initial_additional_headers.clone(),
        url,
    })
}

impl Middleware<BrowserState, BrowserAction> for LinkingMiddleware {
    fn invoke<'a>(
        &'a self,
        ctx: &'a BrowserContext,
        next: BrowserNext<'a>,
        action: BrowserAction,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            match &action {
                BrowserAction::TabList(TabListAction::AddMultipleTabs { tabs }) => {
                    if let Some(tab) = tabs
                        .iter()
                        .find(|tab| tab.engine_state.engine_session.is_some())
                    {
                        return Err(StoreError::Rejected(format!(
                            "tab {} already has an engine session, add it on its own",
                            tab.id
                        )));
                    }
                }
                BrowserAction::Engine(EngineAction::UnlinkEngineSession { tab_id }) => {
                    self.unlink(&ctx.state(), tab_id);
                }
                BrowserAction::Engine(EngineAction::LinkEngineSession { tab_id, .. }) => {
                    // one observer per tab, even when the same session is linked again
                    self.unlink(&ctx.state(), tab_id);
                }
                _ => {}
            }

            // what to link once the action is reduced
            let pending = match &action {
                BrowserAction::TabList(TabListAction::AddTab { tab, .. })
                    if tab.engine_state.engine_session.is_some()
                        && tab.engine_state.engine_observer.is_none() =>
                {
                    Some((tab.id.clone(), true, false))
                }
                BrowserAction::CustomTabList(CustomTabListAction::AddCustomTab { tab })
                    if tab.engine_state.engine_session.is_some()
                        && tab.engine_state.engine_observer.is_none() =>
                {
                    Some((tab.id.clone(), true, false))
                }
                BrowserAction::Engine(EngineAction::LinkEngineSession {
                    tab_id,
                    skip_loading,
                    include_parent,
                    ..
                }) => Some((tab_id.clone(), *skip_loading, *include_parent)),
                _ => None,
            };

            next.run(action).await?;

            match pending {
                Some((tab_id, skip_loading, include_parent)) => {
                    self.link(ctx, &tab_id, skip_loading, include_parent).await
                }
                None => Ok(()),
            }
        })
    }
}
