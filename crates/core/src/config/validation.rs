//! Configuration validation rules.
//!
//! Applied to `WorkerConfig` values after they have been loaded from
//! environment, files, or defaults.

use thiserror::Error;
use url::Url;

use crate::config::WorkerConfig;

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl WorkerConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `cache_version` is empty
    /// - `scope_origin` is not a bare http(s) origin
    /// - `shell_path` is not an absolute path
    /// - `core_assets` is empty or contains a non-relative entry
    /// - `static_extensions` is empty or an entry carries a dot or uppercase
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_version.is_empty() {
            return Err(ConfigError::Invalid { field: "cache_version".into(), reason: "must not be empty".into() });
        }

        let scope = Url::parse(&self.scope_origin)
            .map_err(|e| ConfigError::Invalid { field: "scope_origin".into(), reason: e.to_string() })?;
        match scope.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ConfigError::Invalid {
                    field: "scope_origin".into(),
                    reason: format!("unsupported scheme: {other}"),
                });
            }
        }
        if scope.path() != "/" || scope.query().is_some() || scope.fragment().is_some() {
            return Err(ConfigError::Invalid {
                field: "scope_origin".into(),
                reason: "must be a bare origin without path, query, or fragment".into(),
            });
        }

        if !self.shell_path.starts_with('/') {
            return Err(ConfigError::Invalid { field: "shell_path".into(), reason: "must be an absolute path".into() });
        }

        if self.core_assets.is_empty() {
            return Err(ConfigError::Invalid { field: "core_assets".into(), reason: "must not be empty".into() });
        }
        for asset in &self.core_assets {
            if asset.is_empty() || asset.contains("://") {
                return Err(ConfigError::Invalid {
                    field: "core_assets".into(),
                    reason: format!("entry must be a relative path: {asset:?}"),
                });
            }
        }

        if self.static_extensions.is_empty() {
            return Err(ConfigError::Invalid { field: "static_extensions".into(), reason: "must not be empty".into() });
        }
        for ext in &self.static_extensions {
            if ext.is_empty() || ext.contains('.') || ext.chars().any(|c| c.is_ascii_uppercase()) {
                return Err(ConfigError::Invalid {
                    field: "static_extensions".into(),
                    reason: format!("entry must be a lowercase extension without dot: {ext:?}"),
                });
            }
        }

        if !self.core_assets.iter().any(|a| a == &self.shell_path) {
            tracing::warn!(
                shell_path = %self.shell_path,
                "shell_path is not in core_assets; the offline navigation \
                 fallback stays empty until a navigation succeeds online"
            );
        }

        Ok(())
    }
}
