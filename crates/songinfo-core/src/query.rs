//! Search query value and the fixed GraphQL request built from it.

use serde::Serialize;
use std::fmt;

/// Search used when the caller supplies none.
pub const DEFAULT_SEARCH: &str = "Beatles Norwegian Wood";

/// Root field of the search document; the normalizer reads it back from `data`.
pub const ROOT_FIELD: &str = "spotify_Search_With_Token";

/// GraphQL document sent for every search. `$query` is the only variable.
pub const SEARCH_DOCUMENT: &str = r#"
query MyQuery($query: String!) {
  spotify_Search_With_Token(q: $query) {
    id
    album
    albumInfo {
      name
      description
      detailedDescription {
        articleBody
      }
    }
    artistsInfo {
      name
      description
      detailedDescription {
        articleBody
      }
    }
    track
    trackInfo {
      name
      description
      detailedDescription {
        articleBody
      }
    }
    artists
  }
}"#;

/// The free-text search token for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Resolve the inbound `search` parameter: a non-empty value is kept
    /// verbatim, anything else becomes [`DEFAULT_SEARCH`].
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some(s) if !s.is_empty() => Self(s.to_string()),
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self(DEFAULT_SEARCH.to_string())
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// JSON body of the upstream POST.
#[derive(Debug, Serialize)]
pub struct GraphqlRequest<'a> {
    pub query: &'static str,
    pub variables: SearchVariables<'a>,
}

#[derive(Debug, Serialize)]
pub struct SearchVariables<'a> {
    pub query: &'a str,
}

impl<'a> GraphqlRequest<'a> {
    pub fn new(query: &'a str) -> Self {
        Self {
            query: SEARCH_DOCUMENT,
            variables: SearchVariables { query },
        }
    }
}
