#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use framerate_api::config::{ServerConfig, StoreBackend};
use framerate_api::router::build_app_router;
use framerate_api::state::AppState;

/// Test configuration with the dev CORS origin. The pool is handed in
/// directly, so the database URL is never read.
pub fn test_config(store: StoreBackend) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store,
        db_max_connections: 5,
        run_migrations: false,
    }
}

/// The full application over the given (migrated) database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config(StoreBackend::Postgres {
        database_url: String::new(),
    });
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

/// The full application over a fresh in-memory reference store.
pub fn build_memory_app() -> Router {
    let config = test_config(StoreBackend::Memory);
    build_app_router(AppState::in_memory(config.clone()), &config)
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    post_raw(app, uri, "application/json", body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, content_type: &str, body: String) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
