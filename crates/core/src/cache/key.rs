//! Request identity used as the cache key.

use url::Url;

use crate::http::{MatchOptions, Method, Request};

/// Identity of a stored entry: method plus URL with the fragment stripped.
///
/// Fragments never reach the server, so `/page#a` and `/page#b` are the
/// same entry. Query strings are kept; whether they participate in
/// matching is decided per lookup via [`MatchOptions::ignore_search`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    method: Method,
    url: Url,
}

impl CacheKey {
    pub fn new(method: Method, mut url: Url) -> Self {
        url.set_fragment(None);
        Self { method, url }
    }

    pub fn from_request(request: &Request) -> Self {
        Self::new(request.method, request.url.clone())
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Whether `other` matches this key under the given options.
    pub fn matches(&self, other: &CacheKey, options: MatchOptions) -> bool {
        if self.method != other.method {
            return false;
        }
        if options.ignore_search {
            self.url.origin() == other.url.origin() && self.url.path() == other.url.path()
        } else {
            self.url == other.url
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(url: &str) -> CacheKey {
        CacheKey::new(Method::Get, Url::parse(url).unwrap())
    }

    #[test]
    fn test_fragment_stripped() {
        assert_eq!(key("https://app.test/page#top"), key("https://app.test/page"));
    }

    #[test]
    fn test_exact_match_keeps_query() {
        let a = key("https://app.test/page?v=1");
        let b = key("https://app.test/page?v=2");
        assert!(!a.matches(&b, MatchOptions::default()));
        assert!(a.matches(&a.clone(), MatchOptions::default()));
    }

    #[test]
    fn test_ignore_search_match() {
        let a = key("https://app.test/page?v=1");
        let b = key("https://app.test/page?v=2");
        let c = key("https://app.test/other?v=1");
        let opts = MatchOptions { ignore_search: true };
        assert!(a.matches(&b, opts));
        assert!(!a.matches(&c, opts));
    }

    #[test]
    fn test_method_part_of_identity() {
        let get = CacheKey::new(Method::Get, Url::parse("https://app.test/page").unwrap());
        let head = CacheKey::new(Method::Head, Url::parse("https://app.test/page").unwrap());
        assert!(!get.matches(&head, MatchOptions { ignore_search: true }));
    }

    #[test]
    fn test_cross_origin_never_matches() {
        let a = key("https://app.test/page");
        let b = key("https://other.test/page");
        assert!(!a.matches(&b, MatchOptions { ignore_search: true }));
    }
}
