#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, header};
use axum::response::Response;
use bookmarks::db::Database;
use bookmarks::handler::AppState;
use bookmarks::routes::app;
use bookmarks::store::{BookmarkStore, MemoryStore};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const TEST_TOKEN: &str = "test-api-token";

pub fn memory_store() -> Arc<dyn BookmarkStore> {
    Arc::new(MemoryStore::new())
}

pub async fn libsql_store() -> Arc<dyn BookmarkStore> {
    Arc::new(Database::in_memory().await.expect("in-memory libsql database"))
}

pub fn test_app(store: Arc<dyn BookmarkStore>) -> Router {
    app(AppState::new(store), TEST_TOKEN)
}

pub fn request(method: Method, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", TEST_TOKEN));

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

pub async fn parse_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap_or_else(|e| panic!("Expected valid JSON body: {e}"))
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}
