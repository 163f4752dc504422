use tracing::{debug, info};

use crate::client::GraphqlExecutor;
use crate::error::GraphqlError;
use crate::normalize::{normalize, SearchOutcome};
use crate::query::SearchQuery;

/// Run one search: a single upstream call, then normalization of its body.
pub async fn search(
    executor: &dyn GraphqlExecutor,
    query: &SearchQuery,
) -> Result<SearchOutcome, GraphqlError> {
    info!(query = %query, "searching knowledge graph");

    let raw = executor.execute(query.as_str()).await?;
    let outcome = normalize(&raw);

    debug!(query = %query, found = outcome.is_populated(), "search normalized");
    Ok(outcome)
}
