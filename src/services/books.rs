//! Books service

use validator::Validate;

use super::{required_text, trim_text};
use crate::{
    error::AppResult,
    models::book::{Book, BookQuery, CreateBook, NewBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        self.repository.books.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    pub async fn create(&self, mut data: CreateBook) -> AppResult<Book> {
        trim_text(&mut data.title);
        data.validate()?;
        let title = required_text(data.title, "title")?;

        let book = self
            .repository
            .books
            .create(&NewBook {
                title,
                published_date: data.published_date,
                description: data.description,
                is_available: data.is_available.unwrap_or(true),
            })
            .await?;

        tracing::info!(book_id = book.id, "Book created");
        Ok(book)
    }

    /// Partial update: omitted fields keep their current value
    pub async fn update(&self, id: i32, mut data: UpdateBook) -> AppResult<Book> {
        trim_text(&mut data.title);
        data.validate()?;

        let mut book = self.repository.books.get_by_id(id).await?;
        data.apply(&mut book);
        self.repository.books.update(&book).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!(book_id = id, "Book deleted with its author associations");
        Ok(())
    }
}
