//! Reduce a raw search response to one display record.
//!
//! The upstream payload is sparse at every level: the entity may be null,
//! info collections may be empty and nested descriptions may be missing.
//! None of that is an error; every gap degrades to an empty string.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::query::ROOT_FIELD;

/// Parsed upstream response body. Its shape is owned by the upstream
/// schema and only read through optional access.
pub type RawSearchResult = Value;

/// Return the first source that is present and non-empty, or `""`.
pub fn first_non_empty<'a, I>(sources: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    sources
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}

// ── Upstream entity shape ───────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchEntity {
    #[serde(default, deserialize_with = "lenient_string")]
    track: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    artists: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    album: Option<String>,
    #[serde(default, deserialize_with = "first_entry")]
    track_info: Option<InfoEntry>,
    #[serde(default, deserialize_with = "first_entry")]
    artists_info: Option<InfoEntry>,
    #[serde(default, deserialize_with = "first_entry")]
    album_info: Option<InfoEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InfoEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient_detailed")]
    detailed_description: Option<DetailedDescription>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetailedDescription {
    #[serde(default, deserialize_with = "lenient_string")]
    article_body: Option<String>,
}

/// Accept any JSON value; only strings are kept.
fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_detailed<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<DetailedDescription>, D::Error> {
    Ok(serde_json::from_value(Value::deserialize(d)?).ok())
}

/// Keep element 0 of an info collection; anything else is treated as empty.
fn first_entry<'de, D: Deserializer<'de>>(d: D) -> Result<Option<InfoEntry>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(mut entries) if !entries.is_empty() => {
            serde_json::from_value(entries.swap_remove(0)).ok()
        }
        _ => None,
    })
}

/// Name and description of one entity, ready to render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntityDisplay {
    pub label: String,
    pub body: String,
}

impl EntityDisplay {
    fn new(label: Option<&str>, info: Option<&InfoEntry>) -> Self {
        let body = first_non_empty([
            info.and_then(|e| e.detailed_description.as_ref())
                .and_then(|d| d.article_body.as_deref()),
            info.and_then(|e| e.description.as_deref()),
        ]);

        Self {
            label: first_non_empty([label]),
            body,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayRecord {
    pub track: EntityDisplay,
    pub artist: EntityDisplay,
    pub album: EntityDisplay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// No entity matched; rendered as "No Results".
    Empty,
    Populated(DisplayRecord),
}

impl SearchOutcome {
    pub fn is_populated(&self) -> bool {
        matches!(self, SearchOutcome::Populated(_))
    }
}

/// Reduce `raw` to a [`SearchOutcome`].
pub fn normalize(raw: &RawSearchResult) -> SearchOutcome {
    if let Some(errors) = raw.get("errors").and_then(Value::as_array) {
        for err in errors {
            let error = err.get("message").and_then(Value::as_str).unwrap_or("unknown");
            warn!(error, "GraphQL response carried an error");
        }
    }

    let Some(entity) = raw
        .get("data")
        .and_then(|data| data.get(ROOT_FIELD))
        .filter(|entity| entity.is_object())
    else {
        return SearchOutcome::Empty;
    };

    // Every field is lenient, so any object deserializes.
    let entity = SearchEntity::deserialize(entity).unwrap_or_default();

    SearchOutcome::Populated(DisplayRecord {
        track: EntityDisplay::new(entity.track.as_deref(), entity.track_info.as_ref()),
        artist: EntityDisplay::new(entity.artists.as_deref(), entity.artists_info.as_ref()),
        album: EntityDisplay::new(entity.album.as_deref(), entity.album_info.as_ref()),
    })
}
