//! Upstream query error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphqlError {
    #[error("HTTP client error: {0}")]
    Client(reqwest::Error),

    #[error("GraphQL request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("GraphQL request timed out")]
    Timeout,

    #[error("GraphQL endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("invalid GraphQL response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GraphqlError {
    /// Classify a request error, separating timeouts from other transport failures.
    pub(crate) fn from_request(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}
