//! Author-Book associations repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::contains_pattern;
use crate::{
    error::{AppError, AppResult},
    models::author_book::{
        AuthorBook, AuthorBookDetails, AuthorBookQuery, NewAuthorBook, DUPLICATE_RELATIONSHIP,
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorBooksRepository: Send + Sync {
    /// List associations with author name and book title
    async fn list(&self, query: &AuthorBookQuery) -> AppResult<Vec<AuthorBookDetails>>;

    async fn get_by_id(&self, id: i32) -> AppResult<AuthorBook>;

    /// Whether an association links this pair, ignoring `exclude_id`
    async fn pair_exists(
        &self,
        author_id: i32,
        book_id: i32,
        exclude_id: Option<i32>,
    ) -> AppResult<bool>;

    /// Insert an association. A concurrent duplicate surfaces as `DuplicateRelationship`.
    async fn create(&self, data: &NewAuthorBook) -> AppResult<AuthorBook>;

    async fn update(&self, id: i32, data: &NewAuthorBook) -> AppResult<AuthorBook>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub(crate) fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("AuthorBook {} not found", id))
}

/// Translate constraint violations raised by PostgreSQL into domain errors
fn map_write_error(error: sqlx::Error, data: &NewAuthorBook) -> AppError {
    if let sqlx::Error::Database(ref db) = error {
        if db.is_unique_violation() {
            return AppError::DuplicateRelationship(DUPLICATE_RELATIONSHIP.to_string());
        }
        if db.is_foreign_key_violation() {
            return AppError::NotFound(format!(
                "Author {} or book {} no longer exists",
                data.author_id, data.book_id
            ));
        }
    }
    AppError::Database(error)
}

#[derive(Clone)]
pub struct PgAuthorBooksRepository {
    pool: Pool<Postgres>,
}

impl PgAuthorBooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorBooksRepository for PgAuthorBooksRepository {
    async fn list(&self, query: &AuthorBookQuery) -> AppResult<Vec<AuthorBookDetails>> {
        let pattern = query.search.as_deref().map(contains_pattern);

        let rows = sqlx::query_as::<_, AuthorBookDetails>(
            r#"
            SELECT ab.id, ab.author_id, a.name AS author_name,
                   ab.book_id, b.title AS book_title, ab.contribution_percentage
            FROM author_books ab
            JOIN authors a ON a.id = ab.author_id
            JOIN books b ON b.id = ab.book_id
            WHERE ($1::text IS NULL OR a.name ILIKE $1 OR b.title ILIKE $1)
              AND ($2::int IS NULL OR ab.author_id = $2)
              AND ($3::int IS NULL OR ab.book_id = $3)
              AND ($4::int IS NULL OR ab.contribution_percentage = $4)
            ORDER BY ab.id
            "#,
        )
        .bind(pattern)
        .bind(query.author_id)
        .bind(query.book_id)
        .bind(query.contribution_percentage)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<AuthorBook> {
        sqlx::query_as::<_, AuthorBook>(
            "SELECT id, author_id, book_id, contribution_percentage FROM author_books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(id))
    }

    async fn pair_exists(
        &self,
        author_id: i32,
        book_id: i32,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM author_books
                WHERE author_id = $1 AND book_id = $2
                  AND ($3::int IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(author_id)
        .bind(book_id)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn create(&self, data: &NewAuthorBook) -> AppResult<AuthorBook> {
        sqlx::query_as::<_, AuthorBook>(
            r#"
            INSERT INTO author_books (author_id, book_id, contribution_percentage)
            VALUES ($1, $2, $3)
            RETURNING id, author_id, book_id, contribution_percentage
            "#,
        )
        .bind(data.author_id)
        .bind(data.book_id)
        .bind(data.contribution_percentage)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, data))
    }

    async fn update(&self, id: i32, data: &NewAuthorBook) -> AppResult<AuthorBook> {
        sqlx::query_as::<_, AuthorBook>(
            r#"
            UPDATE author_books
            SET author_id = $1, book_id = $2, contribution_percentage = $3
            WHERE id = $4
            RETURNING id, author_id, book_id, contribution_percentage
            "#,
        )
        .bind(data.author_id)
        .bind(data.book_id)
        .bind(data.contribution_percentage)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, data))?
        .ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM author_books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
