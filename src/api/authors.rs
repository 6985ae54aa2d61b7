//! Author endpoints

use axum::{extract::State, Json};

use super::{ApiJson, ApiPath, ApiQuery};
use crate::{
    error::AppResult,
    models::{
        author::{Author, AuthorList, AuthorQuery, CreateAuthor, UpdateAuthor},
        MessageResponse,
    },
    AppState,
};

/// List authors with their books
#[utoipa::path(
    get,
    path = "/authors/",
    tag = "authors",
    params(AuthorQuery),
    responses(
        (status = 200, description = "Authors with nested books", body = AuthorList)
    )
)]
pub async fn list_authors(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AuthorQuery>,
) -> AppResult<Json<AuthorList>> {
    let authors = state.services.authors.list(&query).await?;
    Ok(Json(AuthorList { authors }))
}

/// Create an author
#[utoipa::path(
    post,
    path = "/authors/create/",
    tag = "authors",
    request_body = CreateAuthor,
    responses(
        (status = 200, description = "Author created", body = Author),
        (status = 400, description = "Invalid payload", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    ApiJson(data): ApiJson<CreateAuthor>,
) -> AppResult<Json<Author>> {
    let author = state.services.authors.create(data).await?;
    Ok(Json(author))
}

/// Get author by ID
#[utoipa::path(
    get,
    path = "/authors/{id}/",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = Author),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<Author>> {
    let author = state.services.authors.get_by_id(id).await?;
    Ok(Json(author))
}

/// Update an author; omitted fields are left unchanged
#[utoipa::path(
    put,
    path = "/authors/{id}/update/",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    request_body = UpdateAuthor,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(data): ApiJson<UpdateAuthor>,
) -> AppResult<Json<Author>> {
    let author = state.services.authors.update(id, data).await?;
    Ok(Json(author))
}

/// Delete an author and its book associations
#[utoipa::path(
    delete,
    path = "/authors/{id}/delete/",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author deleted", body = MessageResponse),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.authors.delete(id).await?;
    Ok(Json(MessageResponse::new("Author deleted successfully")))
}
