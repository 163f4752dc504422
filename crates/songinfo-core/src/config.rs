use std::env;
use std::time::Duration;

/// Default upstream request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the upstream GraphQL endpoint.
///
/// Presence of the endpoint and credential is not validated here; a bad
/// value surfaces as a request failure.
#[derive(Clone)]
pub struct GraphqlConfig {
    pub endpoint: String,
    /// Sent verbatim as the `Authorization` header.
    pub credential: String,
    pub timeout: Duration,
}

impl GraphqlConfig {
    pub fn new(endpoint: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            credential: credential.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let timeout_secs = var("GRAPHQL_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            endpoint: var("STEPZEN_ENDPOINT").unwrap_or_default(),
            credential: var("STEPZEN_API_KEY").unwrap_or_default(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Returns `true` when either the endpoint or the credential is blank.
    pub fn is_incomplete(&self) -> bool {
        self.endpoint.trim().is_empty() || self.credential.trim().is_empty()
    }
}

// Keeps the credential out of logs.
impl std::fmt::Debug for GraphqlConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphqlConfig")
            .field("endpoint", &self.endpoint)
            .field("credential", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
