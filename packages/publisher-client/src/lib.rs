//! Pure API publisher REST API client.
//!
//! A minimal client for the publisher REST API. Supports reading an API,
//! its lifecycle state and its deployed revisions, and changing its
//! lifecycle state.
//!
//! # Example
//!
//! ```rust,ignore
//! use publisher_client::PublisherClient;
//!
//! let client = PublisherClient::new("access-token")
//!     .with_base_url("https://localhost:9443/api/am/publisher/v2");
//!
//! let lc = client.get_lifecycle_state("api-1").await?;
//! if lc.state != "Published" {
//!     client.change_lifecycle_state("api-1", "Publish").await?;
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{PublisherError, Result};
pub use types::{
    ApiDto, DeploymentInfoDto, LifecycleStateDto, LifecycleTransitionDto, RevisionDto,
    RevisionListDto, WorkflowResponseDto,
};

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use types::ErrorDto;

pub const DEFAULT_BASE_URL: &str = "https://localhost:9443/api/am/publisher/v2";

/// Pure publisher API client.
#[derive(Clone)]
pub struct PublisherClient {
    http_client: Client,
    access_token: String,
    base_url: String,
}

impl PublisherClient {
    /// Create a new client authenticating with the given bearer token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            access_token: access_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Rebuild the underlying HTTP client with a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PublisherError::Config(e.to_string()))?;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a single API.
    pub async fn get_api(&self, api_id: &str) -> Result<ApiDto> {
        let url = format!("{}/apis/{}", self.base_url, api_id);
        self.send(self.http_client.get(&url)).await
    }

    /// Fetch the current lifecycle state of an API.
    pub async fn get_lifecycle_state(&self, api_id: &str) -> Result<LifecycleStateDto> {
        let url = format!("{}/apis/{}/lifecycle-state", self.base_url, api_id);
        self.send(self.http_client.get(&url)).await
    }

    /// List the revisions of an API that are deployed to at least one gateway
    /// environment.
    pub async fn get_deployed_revisions(&self, api_id: &str) -> Result<RevisionListDto> {
        let url = format!("{}/apis/{}/revisions", self.base_url, api_id);
        self.send(
            self.http_client
                .get(&url)
                .query(&[("query", "deployed:true")]),
        )
        .await
    }

    /// Trigger a lifecycle transition (`action` is the event name, e.g. `Publish`).
    pub async fn change_lifecycle_state(
        &self,
        api_id: &str,
        action: &str,
    ) -> Result<WorkflowResponseDto> {
        let url = format!("{}/apis/change-lifecycle", self.base_url);
        debug!(api_id, action, "Requesting lifecycle transition");
        self.send(
            self.http_client
                .post(&url)
                .query(&[("apiId", api_id), ("action", action)]),
        )
        .await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Publisher request failed");
                PublisherError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "Publisher API error");
            return Err(api_error(status.as_u16(), &body));
        }

        response
            .json()
            .await
            .map_err(|e| PublisherError::Parse(e.to_string()))
    }
}

/// Build an API error from a non-2xx body, preferring the structured error
/// payload when the body is one.
fn api_error(status: u16, body: &str) -> PublisherError {
    match serde_json::from_str::<ErrorDto>(body) {
        Ok(dto) => PublisherError::Api {
            status,
            message: dto.message,
            description: dto.description,
        },
        Err(_) => PublisherError::Api {
            status,
            message: body.to_string(),
            description: None,
        },
    }
}
