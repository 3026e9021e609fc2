//! Network fetch seam.
//!
//! The engine talks to the network through the [`Fetcher`] trait so that
//! strategies and lifecycle code can run against a scripted fetcher in
//! tests. [`HttpFetcher`] is the real implementation on top of reqwest.
//!
//! No timeout is imposed at the trait level: a hung fetch stalls that one
//! request indefinitely. `HttpFetcher` carries a transport timeout of its
//! own, but hosts substituting another fetcher inherit the gap.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use airgap_core::{CacheMode, Error, Request, Response, Result};

/// Dispatches a request to the network.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Perform the fetch. `CacheMode::NoStore` asks intermediaries to
    /// revalidate rather than serve a cached copy.
    async fn fetch(&self, request: &Request, mode: CacheMode) -> Result<Response>;
}

/// Configuration for the HTTP fetcher.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// User agent string (default: "airgap/0.1")
    pub user_agent: String,

    /// Transport-level request timeout (default: 20s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self { user_agent: "airgap/0.1".to_string(), timeout: Duration::from_millis(20_000), max_redirects: 5 }
    }
}

/// Real network fetcher backed by reqwest.
pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the given configuration.
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http })
    }

    /// Translate an engine request into a transport request: every stored
    /// header is forwarded, with the no-store pair layered on top.
    fn build_request(&self, request: &Request, mode: CacheMode) -> Result<reqwest::Request> {
        let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|e| Error::Network(e.to_string()))?;

        let mut builder = self.http.request(method, request.url.clone());
        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }
        if mode == CacheMode::NoStore {
            for (name, value) in no_store_headers() {
                builder = builder.header(name, value);
            }
        }

        builder.build().map_err(|e| Error::Network(e.to_string()))
    }
}

/// Headers added to force revalidation when bypassing intermediate caches.
fn no_store_headers() -> [(&'static str, &'static str); 2] {
    [("Cache-Control", "no-cache"), ("Pragma", "no-cache")]
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &Request, mode: CacheMode) -> Result<Response> {
        let transport_request = self.build_request(request, mode)?;

        let response = self.http.execute(transport_request).await.map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let final_url = url::Url::parse(response.url().as_str()).map_err(|e| Error::InvalidUrl(e.to_string()))?;

        let mut converted = Response::new(final_url, status);
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                converted = converted.with_header(name.as_str(), value);
            }
        }

        let body = response.bytes().await.map_err(|e| Error::Network(e.to_string()))?;

        tracing::debug!(url = %request.url, status, bytes = body.len(), "fetched");

        Ok(converted.with_body(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn test_fetcher_config_default() {
        let config = FetcherConfig::default();
        assert_eq!(config.user_agent, "airgap/0.1");
        assert_eq!(config.timeout, Duration::from_millis(20_000));
        assert_eq!(config.max_redirects, 5);
    }

    #[test]
    fn test_http_fetcher_new() {
        let fetcher = HttpFetcher::new(FetcherConfig::default());
        assert!(fetcher.is_ok());
    }

    #[test]
    fn test_no_store_headers() {
        let headers = no_store_headers();
        assert!(headers.contains(&("Cache-Control", "no-cache")));
        assert!(headers.contains(&("Pragma", "no-cache")));
    }

    #[test]
    fn test_build_request_forwards_all_headers() {
        let fetcher = HttpFetcher::new(FetcherConfig::default()).unwrap();
        let request = Request::get(Url::parse("https://app.test/data.json").unwrap())
            .header("Accept", "application/json")
            .header("X-Requested-With", "airgap");

        let built = fetcher.build_request(&request, CacheMode::Default).unwrap();
        let headers = built.headers();
        assert_eq!(headers.get("accept").unwrap().to_str().unwrap(), "application/json");
        assert_eq!(headers.get("x-requested-with").unwrap().to_str().unwrap(), "airgap");
        assert!(headers.get("cache-control").is_none());
    }

    #[test]
    fn test_build_request_no_store_layers_revalidation_headers() {
        let fetcher = HttpFetcher::new(FetcherConfig::default()).unwrap();
        let request = Request::get(Url::parse("https://app.test/").unwrap()).header("Accept", "text/html");

        let built = fetcher.build_request(&request, CacheMode::NoStore).unwrap();
        let headers = built.headers();
        assert_eq!(headers.get("accept").unwrap().to_str().unwrap(), "text/html");
        assert_eq!(headers.get("cache-control").unwrap().to_str().unwrap(), "no-cache");
        assert_eq!(headers.get("pragma").unwrap().to_str().unwrap(), "no-cache");
    }
}
