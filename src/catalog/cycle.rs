// Per-render-cycle fetch memoization.
// One cycle shares in-flight and completed fetches by URL; nothing outlives it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, WikiError};
use crate::remote::CatalogClient;

/// Outcome of fetching a remote document.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    /// The document was fetched and decoded.
    Ready(T),
    /// The host answered 404.
    Missing,
    /// Network error, unexpected status, or undecodable body.
    Failed(String),
}

impl<T> Fetched<T> {
    /// Decode the ready value. A decode error turns it into `Failed`.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Result<U>) -> Fetched<U> {
        match self {
            Fetched::Ready(value) => match f(value) {
                Ok(decoded) => Fetched::Ready(decoded),
                Err(e) => Fetched::Failed(e.to_string()),
            },
            Fetched::Missing => Fetched::Missing,
            Fetched::Failed(reason) => Fetched::Failed(reason),
        }
    }

    /// The ready value, if any.
    pub fn ready(self) -> Option<T> {
        match self {
            Fetched::Ready(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: Default> Fetched<T> {
    /// Collapse missing and failed documents to an empty value.
    pub fn or_empty(self) -> T {
        self.ready().unwrap_or_default()
    }
}

type SharedFetch = Shared<BoxFuture<'static, Fetched<Arc<Value>>>>;

/// Fetch scope for one logical request.
///
/// Build a new cycle for every view load. Within a cycle, concurrent or
/// repeated requests for the same URL await a single underlying fetch.
pub struct RenderCycle {
    client: Arc<CatalogClient>,
    inflight: Mutex<HashMap<String, SharedFetch>>,
}

impl RenderCycle {
    pub fn new(client: Arc<CatalogClient>) -> Self {
        Self {
            client,
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// The transport this cycle fetches through.
    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    /// Fetch a URL as JSON, sharing the result with every other caller in
    /// this cycle. Failures are logged and returned as values.
    pub async fn fetch_json(&self, url: &str) -> Fetched<Arc<Value>> {
        let shared = {
            let mut inflight = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
            match inflight.get(url) {
                Some(existing) => {
                    debug!(url, "reusing fetch from this cycle");
                    existing.clone()
                }
                None => {
                    let fetch = fetch_once(Arc::clone(&self.client), url.to_string())
                        .boxed()
                        .shared();
                    inflight.insert(url.to_string(), fetch.clone());
                    fetch
                }
            }
        };
        shared.await
    }

    /// Number of distinct URLs requested so far in this cycle.
    pub fn distinct_requests(&self) -> usize {
        self.inflight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

async fn fetch_once(client: Arc<CatalogClient>, url: String) -> Fetched<Arc<Value>> {
    match client.get_json(&url).await {
        Ok(value) => Fetched::Ready(Arc::new(value)),
        Err(WikiError::NotFound(_)) => {
            warn!(url = %url, "document not found");
            Fetched::Missing
        }
        Err(e) => {
            warn!(url = %url, error = %e, "error fetching document");
            Fetched::Failed(e.to_string())
        }
    }
}
