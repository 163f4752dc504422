use axum::http::HeaderValue;
use songinfo_core::{GraphqlClient, GraphqlConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod api;

use api::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = GraphqlConfig::from_env();
    if config.is_incomplete() {
        tracing::warn!(
            "STEPZEN_ENDPOINT or STEPZEN_API_KEY is empty; upstream searches will fail until both are set."
        );
    }
    let timeout = config.timeout;
    let client = GraphqlClient::new(config).expect("failed to build HTTP client");
    tracing::info!(endpoint = %client.endpoint(), ?timeout, "GraphQL upstream configured");

    let state = Arc::new(AppState {
        graphql: Arc::new(client),
    });

    let app = api::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ));

    let port = std::env::var("SONGINFO_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "server started");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app).await.expect("server error");
}
