//! songinfo-core — knowledge-graph song search.
//!
//! Builds a single parameterized GraphQL query from a free-text search,
//! sends it to an authenticated upstream endpoint and reduces the sparse
//! response into one display record per entity (track, artist, album).

pub mod client;
pub mod config;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod query;

pub use client::{GraphqlClient, GraphqlExecutor};
pub use config::GraphqlConfig;
pub use error::GraphqlError;
pub use normalize::{
    first_non_empty, normalize, DisplayRecord, EntityDisplay, RawSearchResult, SearchOutcome,
};
pub use pipeline::search;
pub use query::{GraphqlRequest, SearchQuery, DEFAULT_SEARCH, ROOT_FIELD, SEARCH_DOCUMENT};
