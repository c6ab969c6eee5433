//! Notion database client.
//!
//! Each database page is one record. Archiving a page is the store's
//! soft-delete; archived pages stay retrievable by ID.

mod wire;

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::record::{Patch, Properties, Query, QueryPage, Record, RecordId};
use crate::store::RecordStore;
use wire::{CreatePageRequest, ErrorResponse, Parent};

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1/";

/// API version sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a single Notion database.
#[derive(Clone)]
pub struct NotionClient {
    api_key: String,
    database_id: String,
    base_url: Url,
    timeout: Duration,
    http_client: Client,
}

impl NotionClient {
    /// Creates a client for the given integration token and database.
    ///
    /// # Errors
    ///
    /// Returns an error if either value is empty.
    pub fn new(api_key: impl Into<String>, database_id: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        let database_id = database_id.into();

        if api_key.trim().is_empty() {
            return Err(Error::InvalidConfig("API key is empty".into()));
        }
        if database_id.trim().is_empty() {
            return Err(Error::InvalidConfig("database ID is empty".into()));
        }

        Ok(Self {
            api_key,
            database_id,
            base_url: Url::parse(DEFAULT_BASE_URL)?,
            timeout: DEFAULT_TIMEOUT,
            http_client: Client::new(),
        })
    }

    /// Sets the API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or cannot hold a path.
    pub fn with_base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        let mut base_url = Url::parse(url.as_ref())?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidConfig(format!(
                "base URL cannot hold a path: {base_url}"
            )));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        self.base_url = base_url;
        Ok(self)
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the database ID this client writes to.
    #[must_use]
    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds an endpoint URL from path segments, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidConfig(format!("invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a request and decodes a successful JSON response.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(ErrorResponse::into_error(status.as_u16(), &body));
        }

        let body = response.bytes().await?;
        wire::decode(&body)
    }
}

impl std::fmt::Debug for NotionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionClient")
            .field("api_key", &"<redacted>")
            .field("database_id", &self.database_id)
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl RecordStore for NotionClient {
    async fn create(&self, properties: Properties) -> Result<RecordId> {
        let url = self.endpoint(&["pages"])?;
        debug!("POST {url}");

        let body = CreatePageRequest {
            parent: Parent {
                database_id: &self.database_id,
            },
            properties: &properties,
        };

        let page: Record = self
            .execute(self.http_client.post(url).json(&body))
            .await?;
        Ok(page.id)
    }

    async fn query(&self, query: &Query) -> Result<QueryPage> {
        let url = self.endpoint(&["databases", &self.database_id, "query"])?;
        debug!(cursor = ?query.start_cursor, "POST {url}");

        self.execute(self.http_client.post(url).json(&wire::query_body(query)))
            .await
    }

    async fn retrieve(&self, id: &RecordId) -> Result<Record> {
        let url = self.endpoint(&["pages", id.as_str()])?;
        debug!("GET {url}");

        self.execute(self.http_client.get(url)).await
    }

    async fn update(&self, id: &RecordId, patch: Patch) -> Result<Record> {
        let url = self.endpoint(&["pages", id.as_str()])?;
        debug!("PATCH {url}");

        self.execute(self.http_client.patch(url).json(&patch.to_json()))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = NotionClient::new("secret_abc", "db123").unwrap();
        assert_eq!(client.database_id(), "db123");
        assert_eq!(client.base_url().as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_client_rejects_empty_config() {
        assert!(matches!(
            NotionClient::new("", "db123"),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            NotionClient::new("secret_abc", "  "),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_endpoint_building() {
        let client = NotionClient::new("secret_abc", "db123").unwrap();
        assert_eq!(
            client.endpoint(&["databases", "db123", "query"]).unwrap().as_str(),
            "https://api.notion.com/v1/databases/db123/query"
        );
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let client = NotionClient::new("secret_abc", "db123").unwrap();
        let url = client.endpoint(&["pages", "../users"]).unwrap();
        assert_eq!(url.as_str(), "https://api.notion.com/v1/pages/..%2Fusers");
    }

    #[test]
    fn test_custom_base_url_gets_trailing_slash() {
        let client = NotionClient::new("secret_abc", "db123")
            .unwrap()
            .with_base_url("http://localhost:8080/v1")
            .unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/v1/");
        assert_eq!(
            client.endpoint(&["pages"]).unwrap().as_str(),
            "http://localhost:8080/v1/pages"
        );
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = NotionClient::new("secret_abc", "db123").unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret_abc"));
        assert!(debug.contains("<redacted>"));
    }
}
