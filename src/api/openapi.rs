//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    api::{author_books, authors, books, health},
    config::StorageBackend,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Catalog API",
        version = "0.1.0",
        description = "Authors, books and author contributions",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::liveness,
        health::health_check,
        // Authors
        authors::list_authors,
        authors::create_author,
        authors::get_author,
        authors::update_author,
        authors::delete_author,
        // Books
        books::list_books,
        books::create_book,
        books::get_book,
        books::update_book,
        books::delete_book,
        // Author-books
        author_books::list_author_books,
        author_books::create_author_book,
        author_books::get_author_book,
        author_books::update_author_book,
        author_books::delete_author_book,
    ),
    components(
        schemas(
            // Authors
            crate::models::author::Author,
            crate::models::author::AuthorWithBooks,
            crate::models::author::BookRef,
            crate::models::author::AuthorList,
            crate::models::author::CreateAuthor,
            crate::models::author::UpdateAuthor,
            // Books
            crate::models::book::Book,
            crate::models::book::BookList,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Author-books
            crate::models::author_book::AuthorBook,
            crate::models::author_book::AuthorBookDetails,
            crate::models::author_book::AuthorBookList,
            crate::models::author_book::CreateAuthorBook,
            crate::models::author_book::UpdateAuthorBook,
            // Common
            crate::models::MessageResponse,
            health::HealthResponse,
            StorageBackend,
            crate::error::ErrorResponse,
            crate::error::ErrorKind,
        )
    ),
    tags(
        (name = "health", description = "Liveness and health endpoints"),
        (name = "authors", description = "Author management"),
        (name = "books", description = "Book management"),
        (name = "author-books", description = "Author contributions to books")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
