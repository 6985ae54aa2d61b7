//! Authors repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::contains_pattern;
use crate::{
    error::{AppError, AppResult},
    models::author::{Author, AuthorBookJoinRow, AuthorQuery, AuthorWithBooks, NewAuthor},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorsRepository: Send + Sync {
    /// List authors with their books, in a single round trip
    async fn list_with_books(&self, query: &AuthorQuery) -> AppResult<Vec<AuthorWithBooks>>;

    async fn get_by_id(&self, id: i32) -> AppResult<Author>;

    async fn create(&self, data: &NewAuthor) -> AppResult<Author>;

    /// Overwrite every column of an existing author
    async fn update(&self, author: &Author) -> AppResult<Author>;

    /// Delete an author; its associations go with it
    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub(crate) fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Author {} not found", id))
}

#[derive(Clone)]
pub struct PgAuthorsRepository {
    pool: Pool<Postgres>,
}

impl PgAuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorsRepository for PgAuthorsRepository {
    async fn list_with_books(&self, query: &AuthorQuery) -> AppResult<Vec<AuthorWithBooks>> {
        let pattern = query.search.as_deref().map(contains_pattern);

        let rows = sqlx::query_as::<_, AuthorBookJoinRow>(
            r#"
            SELECT a.id, a.name, a.bio, b.id AS book_id, b.title AS book_title
            FROM authors a
            LEFT JOIN author_books ab ON ab.author_id = a.id
            LEFT JOIN books b ON b.id = ab.book_id
            WHERE $1::text IS NULL OR a.name ILIKE $1
            ORDER BY a.id, ab.id
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(AuthorWithBooks::group(rows))
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        sqlx::query_as::<_, Author>("SELECT id, name, bio FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, data: &NewAuthor) -> AppResult<Author> {
        let row = sqlx::query_as::<_, Author>(
            "INSERT INTO authors (name, bio) VALUES ($1, $2) RETURNING id, name, bio",
        )
        .bind(&data.name)
        .bind(&data.bio)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, author: &Author) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            "UPDATE authors SET name = $1, bio = $2 WHERE id = $3 RETURNING id, name, bio",
        )
        .bind(&author.name)
        .bind(&author.bio)
        .bind(author.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(author.id))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        // author_books rows are removed by ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
