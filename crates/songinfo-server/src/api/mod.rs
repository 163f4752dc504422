pub mod search;

use axum::{routing::get, Json, Router};
use serde::Serialize;
use songinfo_core::GraphqlExecutor;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub graphql: Arc<dyn GraphqlExecutor>,
}

#[derive(Serialize)]
struct ApiStatus {
    status: &'static str,
    version: &'static str,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/search", get(search::search))
        .with_state(state)
}

async fn healthz() -> Json<ApiStatus> {
    Json(ApiStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
