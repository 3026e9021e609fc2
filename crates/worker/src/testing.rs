//! Scripted fetcher shared by the engine's tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::watch;

use std::sync::Arc;

use airgap_core::{Cache, CacheKey, CacheMode, CacheStorage, Error, MatchOptions, Request, Response, Result, StoredResponse};

use crate::fetch::Fetcher;

/// A fetcher whose responses are scripted per URL.
///
/// Unscripted URLs fail the fetch, so a test that forgets a route notices.
/// Queued responses are consumed in order; the last one sticks.
pub(crate) struct StubFetcher {
    routes: Mutex<HashMap<String, VecDeque<(u16, String)>>>,
    offline: AtomicBool,
    stalled_tx: watch::Sender<bool>,
    calls: Mutex<Vec<(String, CacheMode)>>,
}

impl StubFetcher {
    pub(crate) fn new() -> Self {
        let (stalled_tx, _) = watch::channel(false);
        Self {
            routes: Mutex::new(HashMap::new()),
            offline: AtomicBool::new(false),
            stalled_tx,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue a response for a URL.
    pub(crate) fn respond(&self, url: &str, status: u16, body: &str) {
        let mut routes = self.routes.lock().unwrap();
        routes.entry(url.to_string()).or_default().push_back((status, body.to_string()));
    }

    /// Make every subsequent fetch fail with a network error.
    pub(crate) fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Park every subsequent fetch until [`release`](Self::release) is
    /// called. Simulates unbounded network latency.
    pub(crate) fn stall(&self) {
        self.stalled_tx.send_replace(true);
    }

    pub(crate) fn release(&self) {
        self.stalled_tx.send_replace(false);
    }

    /// URLs fetched so far, with the cache mode used.
    pub(crate) fn calls(&self) -> Vec<(String, CacheMode)> {
        self.calls.lock().unwrap().clone()
    }
}

/// A cache generation whose writes always fail, as a host backend out of
/// quota would. Reads behave like an empty cache.
pub(crate) struct FailingPutCache;

#[async_trait]
impl Cache for FailingPutCache {
    async fn put(&self, _key: CacheKey, _entry: StoredResponse) -> Result<()> {
        Err(Error::Store("quota exceeded".into()))
    }

    async fn lookup(&self, _key: &CacheKey, _options: MatchOptions) -> Result<Option<StoredResponse>> {
        Ok(None)
    }

    async fn delete_entry(&self, _key: &CacheKey) -> Result<bool> {
        Ok(false)
    }

    async fn keys(&self) -> Result<Vec<CacheKey>> {
        Ok(Vec::new())
    }
}

/// Storage whose every generation is a [`FailingPutCache`].
pub(crate) struct FailingPutStorage;

#[async_trait]
impl CacheStorage for FailingPutStorage {
    async fn open(&self, _name: &str) -> Result<Arc<dyn Cache>> {
        Ok(Arc::new(FailingPutCache))
    }

    async fn names(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn delete(&self, _name: &str) -> Result<bool> {
        Ok(false)
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, request: &Request, mode: CacheMode) -> Result<Response> {
        self.calls.lock().unwrap().push((request.url.to_string(), mode));

        let mut stalled = self.stalled_tx.subscribe();
        while *stalled.borrow() {
            if stalled.changed().await.is_err() {
                break;
            }
        }

        if self.offline.load(Ordering::SeqCst) {
            return Err(Error::Network("offline".into()));
        }

        let (status, body) = {
            let mut routes = self.routes.lock().unwrap();
            let queue = routes
                .get_mut(request.url.as_str())
                .ok_or_else(|| Error::Network(format!("unscripted URL: {}", request.url)))?;
            if queue.len() > 1 {
                queue.pop_front().ok_or_else(|| Error::Network("exhausted".into()))?
            } else {
                queue.front().cloned().ok_or_else(|| Error::Network("exhausted".into()))?
            }
        };

        Ok(Response::new(request.url.clone(), status).with_body(body))
    }
}
