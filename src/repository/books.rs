//! Books repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::contains_pattern;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, NewBook},
};

const BOOK_COLUMNS: &str = "id, title, published_date, description, is_available";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BooksRepository: Send + Sync {
    async fn list(&self, query: &BookQuery) -> AppResult<Vec<Book>>;

    async fn get_by_id(&self, id: i32) -> AppResult<Book>;

    async fn create(&self, data: &NewBook) -> AppResult<Book>;

    /// Overwrite every column of an existing book
    async fn update(&self, book: &Book) -> AppResult<Book>;

    /// Delete a book; its associations go with it
    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub(crate) fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}

#[derive(Clone)]
pub struct PgBooksRepository {
    pool: Pool<Postgres>,
}

impl PgBooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BooksRepository for PgBooksRepository {
    async fn list(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let pattern = query.search.as_deref().map(contains_pattern);

        let sql = format!(
            r#"
            SELECT {BOOK_COLUMNS} FROM books
            WHERE ($1::text IS NULL OR title ILIKE $1 OR description ILIKE $1)
              AND ($2::bool IS NULL OR is_available = $2)
              AND ($3::date IS NULL OR published_date >= $3)
              AND ($4::date IS NULL OR published_date <= $4)
            ORDER BY id
            "#
        );

        let rows = sqlx::query_as::<_, Book>(&sql)
            .bind(pattern)
            .bind(query.is_available)
            .bind(query.published_from)
            .bind(query.published_to)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, data: &NewBook) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (title, published_date, description, is_available)
            VALUES ($1, $2, $3, $4)
            RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(&data.title)
        .bind(data.published_date)
        .bind(&data.description)
        .bind(data.is_available)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, book: &Book) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            r#"
            UPDATE books
            SET title = $1, published_date = $2, description = $3, is_available = $4
            WHERE id = $5
            RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(&book.title)
        .bind(book.published_date)
        .bind(&book.description)
        .bind(book.is_available)
        .bind(book.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(book.id))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
