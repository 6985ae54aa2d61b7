//! API handlers for the catalog REST endpoints

pub mod author_books;
pub mod authors;
pub mod books;
pub mod health;
pub mod openapi;

use axum::{
    extract::{rejection::QueryRejection, FromRequest, FromRequestParts, OriginalUri},
    http::Method,
    routing::{any, delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// JSON body extractor reporting rejections as [`AppError`]
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path extractor reporting rejections as [`AppError`]
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Query string extractor reporting rejections as [`AppError`]
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::MalformedInput(rejection.body_text())
    }
}

/// Fallback for a known path hit with the wrong verb
pub async fn method_not_allowed(method: Method, uri: OriginalUri) -> AppError {
    AppError::MethodNotAllowed(format!(
        "Method {} is not allowed on {}.",
        method,
        uri.0.path()
    ))
}

/// Fallback for unknown paths
pub async fn not_found(uri: OriginalUri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.0.path()))
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Liveness check answers every verb
        .route("/test.json", any(health::liveness))
        .route(
            "/health",
            get(health::health_check).fallback(method_not_allowed),
        )
        // Authors
        .route(
            "/authors/",
            get(authors::list_authors).fallback(method_not_allowed),
        )
        .route(
            "/authors/create/",
            post(authors::create_author).fallback(method_not_allowed),
        )
        .route(
            "/authors/:id/",
            get(authors::get_author).fallback(method_not_allowed),
        )
        .route(
            "/authors/:id/update/",
            put(authors::update_author).fallback(method_not_allowed),
        )
        .route(
            "/authors/:id/delete/",
            delete(authors::delete_author).fallback(method_not_allowed),
        )
        // Books
        .route("/books/", get(books::list_books).fallback(method_not_allowed))
        .route(
            "/books/create/",
            post(books::create_book).fallback(method_not_allowed),
        )
        .route(
            "/books/:id/",
            get(books::get_book).fallback(method_not_allowed),
        )
        .route(
            "/books/:id/update/",
            put(books::update_book).fallback(method_not_allowed),
        )
        .route(
            "/books/:id/delete/",
            delete(books::delete_book).fallback(method_not_allowed),
        )
        // Author-book associations
        .route(
            "/author-books/",
            get(author_books::list_author_books).fallback(method_not_allowed),
        )
        .route(
            "/author-books/create/",
            post(author_books::create_author_book).fallback(method_not_allowed),
        )
        .route(
            "/author-books/:id/",
            get(author_books::get_author_book).fallback(method_not_allowed),
        )
        .route(
            "/author-books/:id/update/",
            put(author_books::update_author_book).fallback(method_not_allowed),
        )
        .route(
            "/author-books/:id/delete/",
            delete(author_books::delete_author_book).fallback(method_not_allowed),
        )
        .fallback(not_found)
        .with_state(state);

    api.merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
