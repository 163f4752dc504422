use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use songinfo_core::{DisplayRecord, SearchOutcome, SearchQuery};
use std::sync::Arc;

use super::AppState;

const NO_RESULTS: &str = "No Results";

#[derive(Debug)]
pub struct SearchParams {
    pub search: Option<String>,
}

impl SearchParams {
    /// Build from raw query pairs, keeping the first `search` value when repeated.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            search: pairs
                .into_iter()
                .find(|(key, _)| key == "search")
                .map(|(_, value)| value),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchResponse {
    Found {
        query: String,
        record: DisplayRecord,
    },
    NoResults {
        query: String,
        message: &'static str,
    },
}

/// GET /api/search?search=...
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<SearchResponse>, (StatusCode, Json<serde_json::Value>)> {
    let params = SearchParams::from_pairs(pairs);
    let query = SearchQuery::from_param(params.search.as_deref());

    let outcome = songinfo_core::search(state.graphql.as_ref(), &query)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, query = %query, "knowledge graph search failed");
            let status = if e.is_timeout() {
                StatusCode::GATEWAY_TIMEOUT
            } else {
                StatusCode::BAD_GATEWAY
            };
            (
                status,
                Json(serde_json::json!({ "error": "Search failed, please try again later" })),
            )
        })?;

    let query = query.to_string();
    Ok(Json(match outcome {
        SearchOutcome::Populated(record) => SearchResponse::Found { query, record },
        SearchOutcome::Empty => SearchResponse::NoResults {
            query,
            message: NO_RESULTS,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::router;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;
    use serde_json::{json, Value};
    use songinfo_core::{GraphqlClient, GraphqlConfig, GraphqlError, GraphqlExecutor};
    use std::sync::Mutex;
    use tower::ServiceExt;
    use wiremock::matchers::{body_partial_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    enum Reply {
        Body(Value),
        Timeout,
        Status(u16),
    }

    struct FakeExecutor {
        reply: Reply,
        seen: Mutex<Vec<String>>,
    }

    impl FakeExecutor {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl GraphqlExecutor for FakeExecutor {
        async fn execute(&self, query: &str) -> Result<Value, GraphqlError> {
            self.seen.lock().unwrap().push(query.to_string());
            match &self.reply {
                Reply::Body(body) => Ok(body.clone()),
                Reply::Timeout => Err(GraphqlError::Timeout),
                Reply::Status(code) => Err(GraphqlError::Status {
                    status: axum::http::StatusCode::from_u16(*code).unwrap(),
                    body: String::new(),
                }),
            }
        }
    }

    fn app_with(executor: Arc<dyn GraphqlExecutor>) -> axum::Router {
        router(Arc::new(AppState { graphql: executor }))
    }

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let req = HttpRequest::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn hey_jude() -> Value {
        json!({
            "data": { "spotify_Search_With_Token": {
                "id": "0aym2LBJBk9DAYuHHutrIl",
                "track": "Hey Jude",
                "artists": "The Beatles",
                "album": "Hey Jude",
                "trackInfo": [{ "description": "A song" }],
                "artistsInfo": [{
                    "description": "English rock band",
                    "detailedDescription": { "articleBody": "The Beatles were an English rock band formed in Liverpool in 1960." }
                }],
                "albumInfo": []
            }}
        })
    }

    #[test]
    fn test_search_params_from_pairs_keeps_first() {
        let params = SearchParams::from_pairs(vec![
            ("page".into(), "2".into()),
            ("search".into(), "a".into()),
            ("search".into(), "b".into()),
        ]);
        assert_eq!(params.search.as_deref(), Some("a"));

        let params = SearchParams::from_pairs(vec![("q".into(), "x".into())]);
        assert!(params.search.is_none());
    }

    #[test]
    fn test_no_results_serialization() {
        let resp = SearchResponse::NoResults {
            query: "zzz".into(),
            message: NO_RESULTS,
        };
        let val = serde_json::to_value(&resp).unwrap();
        assert_eq!(val["status"], "no_results");
        assert_eq!(val["query"], "zzz");
        assert_eq!(val["message"], "No Results");
    }

    #[tokio::test]
    async fn test_search_found() {
        let fake = FakeExecutor::new(Reply::Body(hey_jude()));
        let (status, body) = get_json(app_with(fake.clone()), "/api/search?search=Hey%20Jude").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(*fake.seen.lock().unwrap(), vec!["Hey Jude".to_string()]);
        assert_eq!(body["status"], "found");
        assert_eq!(body["query"], "Hey Jude");
        assert_eq!(body["record"]["track"]["label"], "Hey Jude");
        assert_eq!(body["record"]["track"]["body"], "A song");
        assert_eq!(body["record"]["artist"]["label"], "The Beatles");
        assert_eq!(
            body["record"]["artist"]["body"],
            "The Beatles were an English rock band formed in Liverpool in 1960."
        );
        assert_eq!(body["record"]["album"]["label"], "Hey Jude");
        assert_eq!(body["record"]["album"]["body"], "");
    }

    #[tokio::test]
    async fn test_search_absent_param_uses_default() {
        let fake = FakeExecutor::new(Reply::Body(hey_jude()));
        let (status, body) = get_json(app_with(fake.clone()), "/api/search").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            *fake.seen.lock().unwrap(),
            vec![songinfo_core::DEFAULT_SEARCH.to_string()]
        );
        assert_eq!(body["query"], "Beatles Norwegian Wood");
    }

    #[tokio::test]
    async fn test_search_empty_param_uses_default() {
        let fake = FakeExecutor::new(Reply::Body(hey_jude()));
        get_json(app_with(fake.clone()), "/api/search?search=").await;

        assert_eq!(
            *fake.seen.lock().unwrap(),
            vec![songinfo_core::DEFAULT_SEARCH.to_string()]
        );
    }

    #[tokio::test]
    async fn test_search_repeated_param_uses_first_value() {
        let fake = FakeExecutor::new(Reply::Body(hey_jude()));
        let (status, body) = get_json(app_with(fake.clone()), "/api/search?search=a&search=b").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(*fake.seen.lock().unwrap(), vec!["a".to_string()]);
        assert_eq!(body["query"], "a");
    }

    #[tokio::test]
    async fn test_search_unrelated_params_ignored() {
        let fake = FakeExecutor::new(Reply::Body(hey_jude()));
        let (status, _) = get_json(app_with(fake.clone()), "/api/search?foo=1&search=Yesterday").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(*fake.seen.lock().unwrap(), vec!["Yesterday".to_string()]);
    }

    #[tokio::test]
    async fn test_search_no_results() {
        let fake = FakeExecutor::new(Reply::Body(json!({
            "data": { "spotify_Search_With_Token": null }
        })));
        let (status, body) = get_json(app_with(fake), "/api/search?search=qwertyuiop").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "no_results");
        assert_eq!(body["message"], "No Results");
        assert!(body.get("record").is_none());
    }

    #[tokio::test]
    async fn test_search_upstream_error_is_bad_gateway() {
        let fake = FakeExecutor::new(Reply::Status(500));
        let (status, body) = get_json(app_with(fake), "/api/search?search=x").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_search_upstream_timeout_is_gateway_timeout() {
        let fake = FakeExecutor::new(Reply::Timeout);
        let (status, _) = get_json(app_with(fake), "/api/search?search=x").await;

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test]
    async fn test_healthz() {
        let fake = FakeExecutor::new(Reply::Body(Value::Null));
        let (status, body) = get_json(app_with(fake), "/healthz").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    // ── End to end against a mock upstream ───────────────────────────

    #[tokio::test]
    async fn test_search_end_to_end_with_mock_upstream() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(header("authorization", "apikey e2e"))
            .and(body_partial_json(json!({ "variables": { "query": "X" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "spotify_Search_With_Token": {
                    "track": "X",
                    "trackInfo": [],
                    "artistsInfo": [],
                    "albumInfo": []
                }}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GraphqlClient::new(GraphqlConfig::new(server.uri(), "apikey e2e")).unwrap();
        let (status, body) = get_json(app_with(Arc::new(client)), "/api/search?search=X").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["record"]["track"]["label"], "X");
        assert_eq!(body["record"]["track"]["body"], "");
    }

    #[tokio::test]
    async fn test_search_end_to_end_unauthorized_upstream() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .expect(1)
            .mount(&server)
            .await;

        let client = GraphqlClient::new(GraphqlConfig::new(server.uri(), "wrong")).unwrap();
        let (status, body) = get_json(app_with(Arc::new(client)), "/api/search?search=X").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].is_string());
    }
}
