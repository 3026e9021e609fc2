//! Request and response types exchanged between the router, strategies,
//! and the cache store.
//!
//! These are deliberately decoupled from any HTTP client: the engine only
//! needs method, URL, a handful of headers, and the body bytes. The worker
//! crate converts to and from its transport's native types at the edge.

use std::collections::HashMap;

use bytes::Bytes;
use url::Url;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Options,
    Patch,
}

impl Method {
    /// Only GET requests are ever intercepted or cached.
    pub fn is_get(&self) -> bool {
        matches!(self, Method::Get)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
            Method::Patch => "PATCH",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cache mode for an outgoing fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    /// Normal transport behavior.
    Default,
    /// Bypass intermediate HTTP caches; force revalidation at the origin.
    NoStore,
}

/// Options for cache lookups.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchOptions {
    /// Ignore the query string when matching keys.
    pub ignore_search: bool,
}

/// An intercepted request.
///
/// Header names are stored lowercased so lookups are case-insensitive.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    headers: HashMap<String, String>,
    /// Set by the host when this request loads a full HTML document.
    pub is_navigation: bool,
}

impl Request {
    pub fn new(method: Method, url: Url) -> Self {
        Self { method, url, headers: HashMap::new(), is_navigation: false }
    }

    /// Shorthand for a plain GET request.
    pub fn get(url: Url) -> Self {
        Self::new(Method::Get, url)
    }

    /// Mark this request as a document navigation.
    pub fn navigation(mut self) -> Self {
        self.is_navigation = true;
        self
    }

    /// Attach a header (builder style).
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_lowercase(), value.to_string());
        self
    }

    /// Look up a header value, case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// The `Accept` header, if present.
    pub fn accept(&self) -> Option<&str> {
        self.header_value("accept")
    }

    /// All headers, lowercase names, in no particular order.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// ASCII serialization of the request URL's origin.
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }
}

/// How much of a response is visible to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// Same-origin response; status and body are inspectable.
    Basic,
    /// Cross-origin response whose status and body are hidden but which
    /// can still be stored and replayed verbatim.
    Opaque,
}

/// A response as seen by the engine, either live from the network or
/// replayed from the cache.
#[derive(Debug, Clone)]
pub struct Response {
    pub url: Url,
    pub status: u16,
    headers: HashMap<String, String>,
    pub body: Bytes,
    pub kind: ResponseKind,
}

impl Response {
    pub fn new(url: Url, status: u16) -> Self {
        Self { url, status, headers: HashMap::new(), body: Bytes::new(), kind: ResponseKind::Basic }
    }

    /// An opaque response carries no inspectable status (reported as 0).
    pub fn opaque(url: Url) -> Self {
        Self { url, status: 0, headers: HashMap::new(), body: Bytes::new(), kind: ResponseKind::Opaque }
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_lowercase(), value.to_string());
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    pub(crate) fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub(crate) fn from_parts(url: Url, status: u16, headers: HashMap<String, String>, body: Bytes, kind: ResponseKind) -> Self {
        Self { url, status, headers, body, kind }
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self.kind, ResponseKind::Opaque)
    }

    /// A normal success (status 200).
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// Whether this response may be committed to the cache: a normal
    /// success, or an opaque response replayed verbatim.
    pub fn is_storable(&self) -> bool {
        self.is_success() || self.is_opaque()
    }
}
