//! Worker configuration with layered loading.
//!
//! Loading precedence (highest wins):
//! 1. Environment variables (AIRGAP_*)
//! 2. TOML config file (if AIRGAP_CONFIG_FILE set)
//! 3. Built-in defaults
//!
//! The cache generation name is configuration, not a hardcoded literal, so
//! tests can run with distinct generations and deployments roll the version
//! by shipping new config.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use url::Url;

mod validation;

pub use validation::ConfigError;

/// Configuration for one worker version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Name of the current cache generation. Changing it is what rolls a
    /// new version: the next activate deletes every other generation.
    ///
    /// Set via AIRGAP_CACHE_VERSION environment variable.
    #[serde(default = "default_cache_version")]
    pub cache_version: String,

    /// Origin this worker serves. Requests from any other origin are
    /// never intercepted.
    ///
    /// Set via AIRGAP_SCOPE_ORIGIN environment variable.
    #[serde(default = "default_scope_origin")]
    pub scope_origin: String,

    /// Path of the app-shell document used as the offline navigation
    /// fallback.
    ///
    /// Set via AIRGAP_SHELL_PATH environment variable.
    #[serde(default = "default_shell_path")]
    pub shell_path: String,

    /// Relative URLs precached at install. Install fails if any of them
    /// cannot be fetched.
    ///
    /// Set via AIRGAP_CORE_ASSETS environment variable (comma-separated).
    #[serde(default = "default_core_assets")]
    pub core_assets: Vec<String>,

    /// Path extensions routed to the stale-while-revalidate strategy.
    ///
    /// Set via AIRGAP_STATIC_EXTENSIONS environment variable (comma-separated).
    #[serde(default = "default_static_extensions")]
    pub static_extensions: Vec<String>,

    /// Ignore query strings when matching cache keys.
    ///
    /// Set via AIRGAP_IGNORE_SEARCH environment variable.
    #[serde(default = "default_true")]
    pub ignore_search: bool,
}

fn default_cache_version() -> String {
    "shell-v1".into()
}

fn default_scope_origin() -> String {
    "https://localhost".into()
}

fn default_shell_path() -> String {
    "/index.html".into()
}

fn default_core_assets() -> Vec<String> {
    vec!["/".into(), "/index.html".into(), "/manifest.json".into(), "/assets/icon.png".into()]
}

fn default_static_extensions() -> Vec<String> {
    ["js", "css", "png", "jpg", "jpeg", "svg", "webp", "json", "ico"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_true() -> bool {
    true
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            cache_version: default_cache_version(),
            scope_origin: default_scope_origin(),
            shell_path: default_shell_path(),
            core_assets: default_core_assets(),
            static_extensions: default_static_extensions(),
            ignore_search: true,
        }
    }
}

impl WorkerConfig {
    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be read or parsed, or if
    /// validation fails after loading.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("AIRGAP_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("AIRGAP_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// The scope origin parsed as a URL. Validation guarantees this parses,
    /// but the accessor still reports failure rather than panicking.
    pub fn scope_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.scope_origin)
            .map_err(|e| ConfigError::Invalid { field: "scope_origin".into(), reason: e.to_string() })
    }

    /// Resolve a core-asset (or shell) path against the scope origin.
    pub fn resolve(&self, path: &str) -> Result<Url, ConfigError> {
        self.scope_url()?
            .join(path)
            .map_err(|e| ConfigError::Invalid { field: "core_assets".into(), reason: format!("{path}: {e}") })
    }
}
