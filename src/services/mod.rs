//! Business logic services

pub mod author_books;
pub mod authors;
pub mod books;

use crate::{
    error::{AppError, AppResult},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub author_books: author_books::AuthorBooksService,
}

impl Services {
    /// Create all services over the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            author_books: author_books::AuthorBooksService::new(repository),
        }
    }
}

/// Strip surrounding whitespace before any length rule sees the value
fn trim_text(value: &mut Option<String>) {
    *value = value.take().map(|text| text.trim().to_string());
}

/// Take a field the validator already required
fn required_text(value: Option<String>, field: &str) -> AppResult<String> {
    value.ok_or_else(|| AppError::MissingField(format!("Missing required field: {}.", field)))
}
