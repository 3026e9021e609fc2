//! Offline caching engine for a single-page app.
//!
//! The engine intercepts same-origin GET requests and serves them through
//! one of two strategies: network-first for navigations (freshness, with
//! the cached app shell as the offline fallback) and stale-while-revalidate
//! for static assets (latency, with background self-healing). A lifecycle
//! manager precaches the core asset set at install and garbage-collects
//! superseded cache generations at activate.
//!
//! The host environment supplies three collaborators: a
//! [`airgap_core::CacheStorage`] backend (or the in-memory one from
//! `airgap-core`), a [`Fetcher`] for the network, and [`Clients`] hooks
//! for page takeover.
//!
//! ```no_run
//! use std::sync::Arc;
//! use airgap_core::{MemoryCacheStorage, Request, WorkerConfig};
//! use airgap_worker::{FetcherConfig, HttpFetcher, LifecycleManager, NoopClients, Router};
//!
//! # async fn example() -> airgap_core::Result<()> {
//! let config = Arc::new(WorkerConfig::default());
//! let storage = Arc::new(MemoryCacheStorage::new());
//! let fetcher = Arc::new(HttpFetcher::new(FetcherConfig::default())?);
//!
//! let lifecycle = LifecycleManager::new(
//!     Arc::clone(&config),
//!     storage.clone(),
//!     fetcher.clone(),
//!     Arc::new(NoopClients),
//! );
//! lifecycle.install().await?;
//! lifecycle.activate().await?;
//!
//! let router = Router::new(config, storage, fetcher)?;
//! let request = Request::get("https://localhost/app.js".parse().unwrap());
//! if let Some(served) = router.handle(&request).await? {
//!     let response = served.settle().await;
//!     println!("{}", response.status);
//! }
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod fetch;
pub mod lifecycle;
pub mod router;
pub mod strategy;

#[cfg(test)]
pub(crate) mod testing;

pub use classify::{RequestClass, classify};
pub use fetch::{Fetcher, FetcherConfig, HttpFetcher};
pub use lifecycle::{Clients, LifecycleManager, NoopClients};
pub use router::Router;
pub use strategy::{Served, Strategy, StrategyEngine};
