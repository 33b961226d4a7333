//! Recording fakes for the engine, the thumbnail cache and the clock

#![allow(dead_code)]

use async_trait::async_trait;
use browser_state::clock::Clock;
use browser_state::engine::{
    Engine, EngineSession, EngineSessionRef, EngineSessionState, LoadUrlFlags, ObserverRef,
};
use browser_state::thumbnails::{Thumbnail, ThumbnailError, ThumbnailStorage};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Poll `condition` until it holds, failing the test after two seconds
pub async fn eventually<F>(condition: F)
where
    F: Fn() -> bool,
{
    tokio::time::timeout(Duration::from_secs(2), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not met within two seconds");
}

#[derive(Debug, Clone)]
pub struct RecordedLoad {
    pub url: String,
    pub parent: Option<EngineSessionRef>,
    pub flags: LoadUrlFlags,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Default)]
pub struct FakeEngineSession {
    observers: Mutex<Vec<ObserverRef>>,
    registered: AtomicUsize,
    unregistered: AtomicUsize,
    loads: Mutex<Vec<RecordedLoad>>,
    reloads: AtomicUsize,
    closed: AtomicUsize,
    fail_loads: AtomicBool,
    restores: AtomicBool,
}

impl FakeEngineSession {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn handle(self: &Arc<Self>) -> EngineSessionRef {
        EngineSessionRef::from_arc(self.clone())
    }

    /// The most recently registered observer that is still registered
    pub fn observer(&self) -> Option<ObserverRef> {
        self.observers.lock().unwrap().last().cloned()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.lock().unwrap().len()
    }

    pub fn register_count(&self) -> usize {
        self.registered.load(Ordering::SeqCst)
    }

    pub fn unregister_count(&self) -> usize {
        self.unregistered.load(Ordering::SeqCst)
    }

    pub fn loads(&self) -> Vec<RecordedLoad> {
        self.loads.lock().unwrap().clone()
    }

    pub fn reload_count(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }

    pub fn close_count(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn fail_loads(&self) {
        self.fail_loads.store(true, Ordering::SeqCst);
    }

    pub fn restore_successfully(&self) {
        self.restores.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl EngineSession for FakeEngineSession {
    fn register(&self, observer: ObserverRef) {
        self.registered.fetch_add(1, Ordering::SeqCst);
        self.observers.lock().unwrap().push(observer);
    }

    fn unregister(&self, observer: &ObserverRef) {
        self.unregistered.fetch_add(1, Ordering::SeqCst);
        self.observers.lock().unwrap().retain(|o| o != observer);
    }

    fn restore_state(&self, _state: &EngineSessionState) -> bool {
        self.restores.load(Ordering::SeqCst)
    }

    async fn load_url(
        &self,
        url: &str,
        parent: Option<EngineSessionRef>,
        flags: LoadUrlFlags,
        additional_headers: Option<HashMap<String, String>>,
    ) -> anyhow::Result<()> {
        self.loads.lock().unwrap().push(RecordedLoad {
            url: url.to_string(),
            parent,
            flags,
            headers: additional_headers,
        });
        if self.fail_loads.load(Ordering::SeqCst) {
            anyhow::bail!("network unreachable");
        }
        Ok(())
    }

    async fn reload(&self, _flags: LoadUrlFlags) -> anyhow::Result<()> {
        self.reloads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn go_back(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn go_forward(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn close(&self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Hands out recording sessions and remembers them
#[derive(Default)]
pub struct FakeEngine {
    sessions: Mutex<Vec<(bool, Option<String>, Arc<FakeEngineSession>)>>,
    restore_sessions: AtomicBool,
}

impl FakeEngine {
    pub fn sessions(&self) -> Vec<Arc<FakeEngineSession>> {
        self.sessions
            .lock()
            .unwrap()
            .iter()
            .map(|(_, _, session)| session.clone())
            .collect()
    }

    /// `(private, context_id)` of every created session
    pub fn requests(&self) -> Vec<(bool, Option<String>)> {
        self.sessions
            .lock()
            .unwrap()
            .iter()
            .map(|(private, context_id, _)| (*private, context_id.clone()))
            .collect()
    }

    pub fn restore_sessions(&self) {
        self.restore_sessions.store(true, Ordering::SeqCst);
    }
}

impl Engine for FakeEngine {
    fn create_session(&self, private: bool, context_id: Option<&str>) -> EngineSessionRef {
        let session = FakeEngineSession::new();
        if self.restore_sessions.load(Ordering::SeqCst) {
            session.restore_successfully();
        }
        self.sessions
            .lock()
            .unwrap()
            .push((private, context_id.map(str::to_string), session.clone()));
        session.handle()
    }
}

#[derive(Default)]
pub struct InMemoryThumbnailStorage {
    thumbnails: Mutex<HashMap<String, Thumbnail>>,
    deleted: Mutex<Vec<String>>,
    clears: AtomicUsize,
}

impl InMemoryThumbnailStorage {
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.thumbnails.lock().unwrap().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn deleted(&self) -> Vec<String> {
        let mut deleted = self.deleted.lock().unwrap().clone();
        deleted.sort();
        deleted
    }

    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ThumbnailStorage for InMemoryThumbnailStorage {
    async fn save_thumbnail(&self, id: &str, thumbnail: Thumbnail) -> Result<(), ThumbnailError> {
        self.thumbnails.lock().unwrap().insert(id.to_string(), thumbnail);
        Ok(())
    }

    async fn load_thumbnail(&self, id: &str) -> Result<Option<Thumbnail>, ThumbnailError> {
        Ok(self.thumbnails.lock().unwrap().get(id).cloned())
    }

    async fn delete_thumbnail(&self, id: &str) -> Result<(), ThumbnailError> {
        self.thumbnails.lock().unwrap().remove(id);
        self.deleted.lock().unwrap().push(id.to_string());
        Ok(())
    }

    async fn clear_thumbnails(&self) -> Result<(), ThumbnailError> {
        self.thumbnails.lock().unwrap().clear();
        self.clears.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Advances by one millisecond on every reading
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(start: i64) -> Self {
        Self {
            now: AtomicI64::new(start),
        }
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.fetch_add(1, Ordering::SeqCst) + 1
    }
}
