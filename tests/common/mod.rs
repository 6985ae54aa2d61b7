//! Shared helpers for router-level tests

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use libcat_server::{
    api, config::StorageBackend, repository::Repository, AppConfig, AppState,
};

/// Router over a fresh in-memory store
pub fn test_app() -> Router {
    let mut config = AppConfig::default();
    config.database.backend = StorageBackend::Memory;
    api::router(AppState::new(config, Repository::in_memory()))
}

pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body)),
        None => builder.body(Body::empty()),
    }
    .expect("build request");

    let response = app.clone().oneshot(request).await.expect("route request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON response body")
    };
    (status, value)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    send_raw(app, method, uri, body.map(|b| b.to_string())).await
}

pub async fn create_author(app: &Router, name: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/authors/create/",
        Some(json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["id"].as_i64().expect("author id")
}

pub async fn create_book(app: &Router, title: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/books/create/",
        Some(json!({ "title": title })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["id"].as_i64().expect("book id")
}

pub async fn link(app: &Router, author_id: i64, book_id: i64, pct: Value) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/author-books/create/",
        Some(json!({
            "author_id": author_id,
            "book_id": book_id,
            "contribution_percentage": pct
        })),
    )
    .await
}
