//! Core types and shared functionality for the airgap offline engine.
//!
//! This crate provides:
//! - Request/response types and cache keys
//! - The cache store abstraction with an in-memory reference backend
//! - Unified error types
//! - Worker configuration with layered loading

pub mod cache;
pub mod config;
pub mod error;
pub mod http;

pub use cache::{Cache, CacheKey, CacheStorage, MemoryCache, MemoryCacheStorage, StoredResponse};
pub use config::{ConfigError, WorkerConfig};
pub use error::{Error, Result};
pub use http::{CacheMode, MatchOptions, Method, Request, Response, ResponseKind};
