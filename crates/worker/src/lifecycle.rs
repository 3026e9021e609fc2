//! Cache generation lifecycle: install and activate.
//!
//! Install runs once when a new version first loads: it precaches the core
//! asset set into the generation named by the configured version, failing
//! the whole install if any asset cannot be fetched. Activate runs once
//! that version is cleared to take over: it garbage-collects every other
//! generation and then claims the open pages.
//!
//! Install is fail-fast, not atomic: assets stored before a failing fetch
//! stay in the (never-activated) generation. A rollback does not exist.

use std::sync::Arc;

use async_trait::async_trait;

use airgap_core::{CacheKey, CacheMode, CacheStorage, Error, Request, Result, StoredResponse, WorkerConfig};

use crate::fetch::Fetcher;

/// Host hooks for controlling open pages.
#[async_trait]
pub trait Clients: Send + Sync {
    /// Ask the host to let this version activate without waiting for all
    /// pages under the old version to close.
    fn skip_waiting(&self);

    /// Take control of all currently open pages, so they are served by
    /// this version without a reload.
    async fn claim(&self) -> Result<()>;
}

/// No-op hooks for embeddings without a page registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopClients;

#[async_trait]
impl Clients for NoopClients {
    fn skip_waiting(&self) {}

    async fn claim(&self) -> Result<()> {
        Ok(())
    }
}

/// Owns the current cache generation across version transitions.
pub struct LifecycleManager {
    config: Arc<WorkerConfig>,
    storage: Arc<dyn CacheStorage>,
    fetcher: Arc<dyn Fetcher>,
    clients: Arc<dyn Clients>,
}

impl LifecycleManager {
    pub fn new(
        config: Arc<WorkerConfig>,
        storage: Arc<dyn CacheStorage>,
        fetcher: Arc<dyn Fetcher>,
        clients: Arc<dyn Clients>,
    ) -> Self {
        Self { config, storage, fetcher, clients }
    }

    /// Populate the current generation with the core asset set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InstallFailed`] naming the first asset that could
    /// not be fetched with a success status. The caller must treat this as
    /// fatal for the version: do not activate, leave the previous version
    /// in control.
    pub async fn install(&self) -> Result<()> {
        self.clients.skip_waiting();

        let cache = self.storage.open(&self.config.cache_version).await?;

        for asset in &self.config.core_assets {
            let url = self
                .config
                .resolve(asset)
                .map_err(|e| Error::InstallFailed { asset: asset.clone(), reason: e.to_string() })?;
            let request = Request::get(url);

            let response = self
                .fetcher
                .fetch(&request, CacheMode::Default)
                .await
                .map_err(|e| Error::InstallFailed { asset: asset.clone(), reason: e.to_string() })?;

            if !response.is_success() {
                return Err(Error::InstallFailed {
                    asset: asset.clone(),
                    reason: format!("status {}", response.status),
                });
            }

            cache.put(CacheKey::from_request(&request), StoredResponse::from_response(&response)).await?;
        }

        tracing::info!(
            generation = %self.config.cache_version,
            assets = self.config.core_assets.len(),
            "install complete"
        );

        Ok(())
    }

    /// Delete every generation except the current one, then claim pages.
    ///
    /// Deletion strictly precedes claiming: a claimed page must never see
    /// a fetch handler match an about-to-die generation.
    pub async fn activate(&self) -> Result<()> {
        let mut deleted = 0usize;
        for name in self.storage.names().await? {
            if name != self.config.cache_version {
                self.storage.delete(&name).await?;
                deleted += 1;
            }
        }

        self.clients.claim().await?;

        tracing::info!(generation = %self.config.cache_version, deleted, "activate complete");

        Ok(())
    }
}
