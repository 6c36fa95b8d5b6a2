// Catalog HTTP client.
// Handles requests, status checking, and the on-disk revalidation window.

use std::time::Duration;

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::ResponseStore;
use crate::config::Config;
use crate::error::{Result, WikiError};

/// HTTP transport for the static catalog host.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
    store: Option<ResponseStore>,
}

impl CatalogClient {
    /// Create a client for the given base URL.
    /// Without a store every call goes to the network.
    pub fn new(base_url: &str, timeout: Duration, store: Option<ResponseStore>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("sitewiki-tui"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(WikiError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
        })
    }

    /// Create a client from application configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = if config.disk_cache {
            ResponseStore::in_cache_dir(config.revalidate_after())
        } else {
            None
        };
        Self::new(&config.base_url, config.request_timeout(), store)
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a URL as JSON, reusing a stored response inside the window.
    ///
    /// When the network fetch fails for any reason other than a 404 and an
    /// older stored response exists, that response is served instead.
    pub async fn get_json(&self, url: &str) -> Result<Value> {
        if let Some(store) = &self.store {
            match store.load_fresh::<Value>(url) {
                Ok(Some(value)) => {
                    debug!(url, "serving stored response inside revalidation window");
                    return Ok(value);
                }
                Ok(None) => {}
                Err(e) => warn!(url, error = %e, "ignoring unreadable stored response"),
            }
        }

        match self.fetch(url).await {
            Ok(value) => {
                if let Some(store) = &self.store {
                    if let Err(e) = store.save(url, &value) {
                        warn!(url, error = %e, "failed to store response");
                    }
                }
                Ok(value)
            }
            Err(WikiError::NotFound(missing)) => Err(WikiError::NotFound(missing)),
            Err(err) => match self.stale(url) {
                Some(value) => {
                    warn!(url, error = %err, "revalidation failed, serving stale response");
                    Ok(value)
                }
                None => Err(err),
            },
        }
    }

    /// Stored response of any age.
    fn stale(&self, url: &str) -> Option<Value> {
        let store = self.store.as_ref()?;
        store.load::<Value>(url).ok().flatten().map(|cached| cached.data)
    }

    /// Make a GET request and decode the body.
    async fn fetch(&self, url: &str) -> Result<Value> {
        debug!(url, "fetching");
        let response = self.client.get(url).send().await.map_err(WikiError::Http)?;
        let response = check_response(response)?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Check response status and convert errors.
fn check_response(response: Response) -> Result<Response> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::NOT_FOUND => Err(WikiError::NotFound(response.url().to_string())),
        status => Err(WikiError::Status {
            status,
            url: response.url().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::REVALIDATE_AFTER;
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn client(server: &MockServer, store: Option<ResponseStore>) -> CatalogClient {
        CatalogClient::new(&server.uri(), Duration::from_secs(5), store).unwrap()
    }

    #[tokio::test]
    async fn test_get_json_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categories.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "a"}])))
            .mount(&server)
            .await;

        let client = client(&server, None);
        let url = format!("{}/categories.json", client.base_url());
        let value = client.get_json(&url).await.unwrap();
        assert_eq!(value, json!([{"id": "a"}]));
    }

    #[tokio::test]
    async fn test_status_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/broken.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client(&server, None);

        let err = client
            .get_json(&format!("{}/gone.json", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, WikiError::NotFound(_)));

        let err = client
            .get_json(&format!("{}/broken.json", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            WikiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bad.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client(&server, None);
        let err = client
            .get_json(&format!("{}/bad.json", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, WikiError::Json(_)));
    }

    #[tokio::test]
    async fn test_fresh_stored_response_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categories.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let store = ResponseStore::new(temp_dir.path(), REVALIDATE_AFTER);
        let client = client(&server, Some(store));
        let url = format!("{}/categories.json", server.uri());

        client.get_json(&url).await.unwrap();
        client.get_json(&url).await.unwrap();
    }

    #[tokio::test]
    async fn test_stale_response_served_when_revalidation_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ai-tools.json"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        // Zero window: every stored entry is stale.
        let store = ResponseStore::new(temp_dir.path(), Duration::ZERO);
        let url = format!("{}/ai-tools.json", server.uri());
        store.save(&url, &json!([{"id": "old"}])).unwrap();

        let client = client(&server, Some(store));
        let value = client.get_json(&url).await.unwrap();
        assert_eq!(value, json!([{"id": "old"}]));
    }

    #[tokio::test]
    async fn test_not_found_is_not_masked_by_stale_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/retired.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let store = ResponseStore::new(temp_dir.path(), Duration::ZERO);
        let url = format!("{}/retired.json", server.uri());
        store.save(&url, &json!([{"id": "old"}])).unwrap();

        let client = client(&server, Some(store));
        let result = client.get_json(&url).await;
        assert!(matches!(result, Err(WikiError::NotFound(_))));
    }
}
