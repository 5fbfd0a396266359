//! Agent API client
//!
//! `AgentRepository` is the seam the view-model fetches through;
//! `HttpAgentRepository` implements it against the public REST endpoint.
//! Each call issues a fresh request: no retries, no caching.

use crate::config::Config;
use crate::error::BrowserError;
use crate::models::{Agent, ApiResponse};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// Source of agent records
#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Fetch every agent, in API order
    ///
    /// # Errors
    /// * `BrowserError::Network` on transport failure or a non-2xx status
    /// * `BrowserError::Decode` if the body does not match the schema
    async fn fetch_all(&self) -> Result<Vec<Agent>, BrowserError>;

    /// Fetch a single agent by identifier
    ///
    /// The identifier is opaque; implementations must not assume a format.
    ///
    /// # Errors
    /// * `BrowserError::NotFound` if no agent has this identifier
    /// * `BrowserError::Network` / `BrowserError::Decode` as for `fetch_all`
    async fn fetch_by_id(&self, id: &str) -> Result<Agent, BrowserError>;
}

/// HTTP implementation of [`AgentRepository`]
#[derive(Debug, Clone)]
pub struct HttpAgentRepository {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAgentRepository {
    /// Create a repository over a shared client (connection pooling)
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Create a repository from application configuration
    pub fn from_config(config: &Config) -> Result<Self, BrowserError> {
        let client = config.http_client()?;
        Ok(Self::new(client, config.api.base_url.clone()))
    }

    /// Collection endpoint this repository reads from
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a single agent; `id` is percent-encoded as one path segment
    fn agent_url(&self, id: &str) -> Result<String, BrowserError> {
        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            BrowserError::Network(format!("Invalid agent API URL {}: {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                BrowserError::Network(format!("Agent API URL {} cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .push(id);
        Ok(url.to_string())
    }

    /// GET `url` and decode the `{ "data": ... }` envelope
    ///
    /// Returns `Ok(None)` when `data` is `null`, or when the endpoint answers
    /// 404 and `allow_missing` is set.
    async fn get_data<T: DeserializeOwned>(
        &self,
        url: &str,
        allow_missing: bool,
    ) -> Result<Option<T>, BrowserError> {
        tracing::debug!(url = %url, "Requesting agent API");

        let response = self.client.get(url).send().await.map_err(|e| {
            BrowserError::Network(format!("Failed to send HTTP request to {}: {}", url, e))
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND && allow_missing {
            tracing::debug!(url = %url, "Agent API returned 404");
            return Ok(None);
        }
        if !status.is_success() {
            let status_code = status.as_u16();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());

            tracing::error!(
                url = %url,
                status_code = status_code,
                error_body = %error_body,
                "Agent API returned error status"
            );

            return Err(BrowserError::Network(format!(
                "Agent API returned error status {}: {}",
                status_code, error_body
            )));
        }

        let response_body = response.text().await.map_err(|e| {
            BrowserError::Network(format!("Failed to read response body from {}: {}", url, e))
        })?;

        let parsed: ApiResponse<T> = serde_json::from_str(&response_body).map_err(|e| {
            BrowserError::Decode(format!(
                "Failed to parse JSON response from agent API: {}",
                e
            ))
        })?;

        Ok(parsed.data)
    }
}

#[async_trait]
impl AgentRepository for HttpAgentRepository {
    async fn fetch_all(&self) -> Result<Vec<Agent>, BrowserError> {
        let agents: Vec<Agent> = self.get_data(&self.base_url, false).await?.ok_or_else(|| {
            BrowserError::Decode("Agent API response contains no data".to_string())
        })?;

        tracing::debug!(count = agents.len(), "Received agents from API");
        Ok(agents)
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Agent, BrowserError> {
        // An empty segment would address the collection itself
        if id.is_empty() {
            return Err(BrowserError::NotFound("empty agent identifier".to_string()));
        }

        let url = self.agent_url(id)?;
        let agent: Agent = self
            .get_data(&url, true)
            .await?
            .ok_or_else(|| BrowserError::NotFound(id.to_string()))?;

        tracing::debug!(id = %agent.id, name = %agent.display_name, "Received agent from API");
        Ok(agent)
    }
}
