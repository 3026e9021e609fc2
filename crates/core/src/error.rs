//! Unified error types for the airgap engine.

/// Unified error type shared by the cache store, fetcher, and strategies.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network fetch failed (connection refused, DNS, offline, ...).
    #[error("network error: {0}")]
    Network(String),

    /// A core asset could not be fetched or stored during install.
    ///
    /// Fatal for that version's rollout; the previous version stays active.
    #[error("install failed on core asset {asset}: {reason}")]
    InstallFailed { asset: String, reason: String },

    /// Invalid or unresolvable URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Cache store backend failure.
    #[error("cache store error: {0}")]
    Store(String),
}

/// A specialized `Result` for airgap operations.
pub type Result<T> = std::result::Result<T, Error>;
