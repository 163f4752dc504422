//! GraphQL client for the knowledge-graph search endpoint.
//!
//! One POST per search, no retry and no caching. Non-2xx responses are
//! reported as errors rather than parsed as data.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::GraphqlConfig;
use crate::error::GraphqlError;
use crate::query::GraphqlRequest;

const USER_AGENT: &str = concat!("songinfo/", env!("CARGO_PKG_VERSION"));

/// Error bodies are cut to this many characters before being kept.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Anything that can run the search document for a query string.
#[async_trait]
pub trait GraphqlExecutor: Send + Sync {
    /// Send the search for `query` and return the parsed response body.
    async fn execute(&self, query: &str) -> Result<Value, GraphqlError>;
}

/// `reqwest`-backed executor.
pub struct GraphqlClient {
    http: reqwest::Client,
    config: GraphqlConfig,
}

impl GraphqlClient {
    pub fn new(config: GraphqlConfig) -> Result<Self, GraphqlError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(GraphqlError::Client)?;
        Ok(Self { http, config })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

#[async_trait]
impl GraphqlExecutor for GraphqlClient {
    async fn execute(&self, query: &str) -> Result<Value, GraphqlError> {
        debug!(endpoint = %self.config.endpoint, query, "sending GraphQL search");

        let resp = self
            .http
            .post(&self.config.endpoint)
            .header(AUTHORIZATION, self.config.credential.as_str())
            .json(&GraphqlRequest::new(query))
            .send()
            .await
            .map_err(GraphqlError::from_request)?;

        let status = resp.status();
        if !status.is_success() {
            let body: String = resp
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(MAX_ERROR_BODY_CHARS)
                .collect();
            warn!(%status, "GraphQL endpoint returned error status");
            return Err(GraphqlError::Status { status, body });
        }

        let bytes = resp.bytes().await.map_err(GraphqlError::from_request)?;
        let body: Value = serde_json::from_slice(&bytes)?;
        Ok(body)
    }
}
