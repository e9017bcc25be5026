//! HTTP client for the copyright-registry backend.
//!
//! Every request carries the bearer token the client was built with; nothing is
//! read from ambient storage. Domain methods (settings, records, publish
//! notification) live in [`api`], wire types and their validation in [`dto`].

pub mod api;
pub mod dto;

use anyhow::{Context, Result};
use copyreg_core::{BackendError, PublishConfig};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

/// Errors returned by [`ApiClient`] requests.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or its body could not be read.
    #[error("Failed to send request: {0}")]
    Transport(#[source] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not the expected JSON shape.
    #[error("Failed to parse response as JSON: {0}")]
    Decode(String),

    /// The body parsed but failed validation.
    #[error("Invalid response: {0}")]
    Invalid(String),
}

impl From<ApiError> for BackendError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport(e) => BackendError::Network(e.to_string()),
            ApiError::Status { status, body } => BackendError::Rejected {
                status,
                message: body,
            },
            ApiError::Decode(msg) | ApiError::Invalid(msg) => BackendError::Rejected {
                status: 200,
                message: format!("unusable response body: {}", msg),
            },
        }
    }
}

/// HTTP client for the registry API with bearer auth.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    prefix: String,
    token: String,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("prefix", &self.prefix)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl ApiClient {
    pub fn new(base_url: String, prefix: String, token: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            prefix: prefix.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &PublishConfig) -> Result<Self> {
        Self::new(
            config.api_url.clone(),
            config.api_prefix.clone(),
            config.api_token.clone(),
            config.http_timeout(),
        )
    }

    /// Full URL for a path below the API prefix (e.g. "/licenses").
    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.prefix, path)
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.token)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self
            .apply_auth(request)
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let bytes = response.bytes().await.map_err(ApiError::Transport)?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// GET request with optional query parameters. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.build_url(path);
        tracing::debug!(url = %url, "GET");
        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        self.send_json(request).await
    }

    /// PUT JSON body and deserialize response.
    pub async fn put_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.build_url(path);
        tracing::debug!(url = %url, "PUT");
        self.send_json(self.client.put(&url).json(body)).await
    }
}

// Re-export domain types for convenience.
pub use api::PublishRequest;
pub use copyreg_core::models::{PublishableRecord, RecordKind, RecordStatus, SystemSetting};
