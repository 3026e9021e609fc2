//! Request classification.
//!
//! A pure function from request shape to class; recomputed per request,
//! never persisted. The router combines the class with its interception
//! gates (GET-only, same-origin) before any strategy runs.

use airgap_core::Request;

/// What kind of request this is, for strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestClass {
    /// Loads a full HTML document.
    Navigation,
    /// Path extension is on the static-asset allowlist.
    StaticAsset,
    /// Everything else (API calls, unknown extensions, ...).
    Other,
}

/// Classify a request. Navigation takes precedence: `/docs/index.html` is
/// a navigation even though `html` could sit on an asset allowlist.
pub fn classify(request: &Request, static_extensions: &[String]) -> RequestClass {
    if is_navigation(request) {
        return RequestClass::Navigation;
    }

    if let Some(ext) = path_extension(request.url.path()) {
        let ext = ext.to_ascii_lowercase();
        if static_extensions.iter().any(|allowed| *allowed == ext) {
            return RequestClass::StaticAsset;
        }
    }

    RequestClass::Other
}

/// A request is a navigation if the host flagged it as one, if it accepts
/// HTML (covers prefetches and manual fetches that are still page loads),
/// or if its path is a directory root or an explicit index document.
fn is_navigation(request: &Request) -> bool {
    if request.is_navigation {
        return true;
    }
    if request.accept().is_some_and(|accept| accept.contains("text/html")) {
        return true;
    }
    let path = request.url.path();
    path.ends_with('/') || path.ends_with("/index.html")
}

/// Extension of the last path segment, if any.
fn path_extension(path: &str) -> Option<&str> {
    let segment = path.rsplit('/').next()?;
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() { None } else { Some(ext) }
}
