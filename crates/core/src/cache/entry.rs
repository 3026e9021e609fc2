//! Stored response snapshots.

use std::collections::HashMap;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use url::Url;

use crate::http::{Response, ResponseKind};

/// An immutable snapshot of a response at the time it was cached.
///
/// Entries are written whole and overwritten whole on refresh; partial
/// updates do not exist.
#[derive(Debug, Clone)]
pub struct StoredResponse {
    pub url: Url,
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
    pub opaque: bool,
    pub stored_at: DateTime<Utc>,
}

impl StoredResponse {
    /// Snapshot a live response. The response itself is untouched; this is
    /// the engine's equivalent of caching a clone.
    pub fn from_response(response: &Response) -> Self {
        Self {
            url: response.url.clone(),
            status: response.status,
            headers: response.headers().clone(),
            body: response.body.clone(),
            opaque: response.is_opaque(),
            stored_at: Utc::now(),
        }
    }

    /// Replay this snapshot as a response.
    pub fn to_response(&self) -> Response {
        let kind = if self.opaque { ResponseKind::Opaque } else { ResponseKind::Basic };
        Response::from_parts(self.url.clone(), self.status, self.headers.clone(), self.body.clone(), kind)
    }
}
