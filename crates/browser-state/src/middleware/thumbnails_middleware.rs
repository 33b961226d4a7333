//! ThumbnailsMiddleware - keeps the thumbnail cache in line with the tab list
//!
//! Storage I/O runs on the store's background scope. Failures are logged;
//! there is no failure state in the browser state to report them into.

use super::{removed_tab_ids, BrowserContext, BrowserNext};
use crate::actions::{BrowserAction, ContentAction, TabListAction};
use crate::state::BrowserState;
use crate::thumbnails::ThumbnailStorage;
use lib_state::middleware::{BoxFuture, Middleware};
use lib_state::StoreError;
use std::sync::Arc;

pub struct ThumbnailsMiddleware {
    storage: Arc<dyn ThumbnailStorage>,
}

impl ThumbnailsMiddleware {
    pub fn new(storage: Arc<dyn ThumbnailStorage>) -> Self {
        Self { storage }
    }

    fn delete(&self, ctx: &BrowserContext, ids: Vec<String>) {
        if ids.is_empty() {
            return;
        }
        let storage = Arc::clone(&self.storage);
        ctx.scope().spawn("delete-thumbnails", async move {
            for id in ids {
                if let Err(e) = storage.delete_thumbnail(&id).await {
                    log::warn!("Failed to delete thumbnail of {}: {}", id, e);
                }
            }
        });
    }
}

impl Middleware<BrowserState, BrowserAction> for ThumbnailsMiddleware {
    fn invoke<'a>(
        &'a self,
        ctx: &'a BrowserContext,
        next: BrowserNext<'a>,
        action: BrowserAction,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            match &action {
                BrowserAction::Content(ContentAction::UpdateThumbnail {
                    session_id,
                    thumbnail,
                }) => {
                    let storage = Arc::clone(&self.storage);
                    let id = session_id.clone();
                    let thumbnail = thumbnail.clone();
                    ctx.scope().spawn("save-thumbnail", async move {
                        if let Err(e) = storage.save_thumbnail(&id, thumbnail).await {
                            log::warn!("Failed to save thumbnail of {}: {}", id, e);
                        }
                    });
                    // consumed, thumbnails are not part of the state
                    return Ok(());
                }
                BrowserAction::Content(ContentAction::RemoveThumbnail { session_id }) => {
                    self.delete(ctx, vec![session_id.clone()]);
                    return Ok(());
                }
                BrowserAction::TabList(TabListAction::RemoveAllTabs) => {
                    let storage = Arc::clone(&self.storage);
                    ctx.scope().spawn("clear-thumbnails", async move {
                        if let Err(e) = storage.clear_thumbnails().await {
                            log::warn!("Failed to clear thumbnails: {}", e);
                        }
                    });
                }
                BrowserAction::TabList(tab_list_action) if tab_list_action.is_removal() => {
                    // ids must be taken before the reducer drops the tabs
                    let ids = removed_tab_ids(&ctx.state(), tab_list_action);
                    self.delete(ctx, ids);
                }
                _ => {}
            }
            next.run(action).await
        })
    }
}
