//! Author-book association endpoints

use axum::{extract::State, http::StatusCode, Json};

use super::{ApiJson, ApiPath, ApiQuery};
use crate::{
    error::AppResult,
    models::{
        author_book::{
            AuthorBook, AuthorBookDetails, AuthorBookList, AuthorBookQuery, CreateAuthorBook,
            UpdateAuthorBook,
        },
        MessageResponse,
    },
    AppState,
};

/// List associations with author names and book titles
#[utoipa::path(
    get,
    path = "/author-books/",
    tag = "author-books",
    params(AuthorBookQuery),
    responses(
        (status = 200, description = "List of associations", body = AuthorBookList)
    )
)]
pub async fn list_author_books(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AuthorBookQuery>,
) -> AppResult<Json<AuthorBookList>> {
    let author_books = state.services.author_books.list(&query).await?;
    Ok(Json(AuthorBookList { author_books }))
}

/// Link an author to a book
#[utoipa::path(
    post,
    path = "/author-books/create/",
    tag = "author-books",
    request_body = CreateAuthorBook,
    responses(
        (status = 201, description = "Association created", body = AuthorBookDetails),
        (status = 400, description = "Missing field, malformed JSON or invalid percentage", body = crate::error::ErrorResponse),
        (status = 404, description = "Author or book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Relationship already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_author_book(
    State(state): State<AppState>,
    ApiJson(data): ApiJson<CreateAuthorBook>,
) -> AppResult<(StatusCode, Json<AuthorBookDetails>)> {
    let created = state.services.author_books.create(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get association by ID
#[utoipa::path(
    get,
    path = "/author-books/{id}/",
    tag = "author-books",
    params(("id" = i32, Path, description = "Association ID")),
    responses(
        (status = 200, description = "Association details", body = AuthorBook),
        (status = 404, description = "Association not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author_book(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<AuthorBook>> {
    let author_book = state.services.author_books.get_by_id(id).await?;
    Ok(Json(author_book))
}

/// Update an association's author, book and/or percentage
#[utoipa::path(
    put,
    path = "/author-books/{id}/update/",
    tag = "author-books",
    params(("id" = i32, Path, description = "Association ID")),
    request_body = UpdateAuthorBook,
    responses(
        (status = 200, description = "Association updated", body = AuthorBookDetails),
        (status = 400, description = "Malformed JSON or invalid percentage", body = crate::error::ErrorResponse),
        (status = 404, description = "Association, author or book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Relationship already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_author_book(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(data): ApiJson<UpdateAuthorBook>,
) -> AppResult<Json<AuthorBookDetails>> {
    let updated = state.services.author_books.update(id, data).await?;
    Ok(Json(updated))
}

/// Delete an association
#[utoipa::path(
    delete,
    path = "/author-books/{id}/delete/",
    tag = "author-books",
    params(("id" = i32, Path, description = "Association ID")),
    responses(
        (status = 200, description = "Association deleted", body = MessageResponse),
        (status = 404, description = "Association not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_author_book(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.author_books.delete(id).await?;
    Ok(Json(MessageResponse::new("AuthorBook deleted successfully")))
}
