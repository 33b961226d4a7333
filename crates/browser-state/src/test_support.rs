//! Fakes shared by the unit tests

use crate::engine::{EngineSession, EngineSessionObserver, EngineSessionRef, LoadUrlFlags, ObserverRef};
use async_trait::async_trait;
use std::collections::HashMap;

/// Engine session that accepts everything and does nothing
#[derive(Default)]
pub struct FakeEngineSession;

#[async_trait]
impl EngineSession for FakeEngineSession {
    fn register(&self, _observer: ObserverRef) {}

    fn unregister(&self, _observer: &ObserverRef) {}

    async fn load_url(
        &self,
        _url: &str,
        _parent: Option<EngineSessionRef>,
        _flags: LoadUrlFlags,
        _additional_headers: Option<HashMap<String, String>>,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    async fn reload(&self, _flags: LoadUrlFlags) -> anyhow::Result<()> {
        Ok(())
    }

    async fn go_back(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn go_forward(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn close(&self) {}
}

pub struct NoopObserver;

impl EngineSessionObserver for NoopObserver {}
