//! Author-Book associations service
//!
//! Holds the association rules: both endpoints must exist, the percentage is
//! an integer in `0..=100`, and an (author, book) pair is linked at most once.
//! The duplicate pre-check only produces a friendly error for the common case;
//! the store enforces the pair constraint itself.

use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        author_book::{
            parse_percentage, present_id, AuthorBook, AuthorBookDetails, AuthorBookQuery, CreateAuthorBook,
            NewAuthorBook, UpdateAuthorBook, DUPLICATE_RELATIONSHIP,
        },
        book::Book,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorBooksService {
    repository: Repository,
}

fn details(row: AuthorBook, author: &Author, book: &Book) -> AuthorBookDetails {
    AuthorBookDetails {
        id: row.id,
        author_id: author.id,
        author_name: author.name.clone(),
        book_id: book.id,
        book_title: book.title.clone(),
        contribution_percentage: row.contribution_percentage,
    }
}

impl AuthorBooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &AuthorBookQuery) -> AppResult<Vec<AuthorBookDetails>> {
        self.repository.author_books.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<AuthorBook> {
        self.repository.author_books.get_by_id(id).await
    }

    /// Link an author to a book
    pub async fn create(&self, data: CreateAuthorBook) -> AppResult<AuthorBookDetails> {
        let (author_id, book_id) = match (data.author_id, data.book_id) {
            (Some(author_id), Some(book_id)) => (author_id, book_id),
            (author_id, book_id) => {
                let missing: Vec<&str> = [
                    ("author_id", author_id.is_none()),
                    ("book_id", book_id.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, absent)| absent.then_some(field))
                .collect();
                return Err(AppError::MissingField(format!(
                    "Missing required fields: {}.",
                    missing.join(" and ")
                )));
            }
        };
        let author_id = present_id(author_id, "Author")?;
        let book_id = present_id(book_id, "Book")?;

        let author = self.repository.authors.get_by_id(author_id).await?;
        let book = self.repository.books.get_by_id(book_id).await?;
        let contribution_percentage = parse_percentage(data.contribution_percentage.as_ref())?;

        self.ensure_pair_free(&author, &book, None).await?;

        let row = self
            .repository
            .author_books
            .create(&NewAuthorBook {
                author_id: author.id,
                book_id: book.id,
                contribution_percentage,
            })
            .await?;

        tracing::info!(
            author_book_id = row.id,
            author_id = author.id,
            book_id = book.id,
            "Author-book relationship created"
        );
        Ok(details(row, &author, &book))
    }

    /// Re-point and/or re-weight an association. Endpoints not named in the
    /// payload stay as they are, a `null` endpoint is NotFound, and the pair check always runs on the
    /// resulting (author, book).
    pub async fn update(&self, id: i32, data: UpdateAuthorBook) -> AppResult<AuthorBookDetails> {
        let current = self.repository.author_books.get_by_id(id).await?;

        let author = self
            .repository
            .authors
            .get_by_id(match data.author_id {
                Some(author_id) => present_id(author_id, "Author")?,
                None => current.author_id,
            })
            .await?;
        let book = self
            .repository
            .books
            .get_by_id(match data.book_id {
                Some(book_id) => present_id(book_id, "Book")?,
                None => current.book_id,
            })
            .await?;
        let contribution_percentage = parse_percentage(data.contribution_percentage.as_ref())?
            .or(current.contribution_percentage);

        self.ensure_pair_free(&author, &book, Some(id)).await?;

        let row = self
            .repository
            .author_books
            .update(
                id,
                &NewAuthorBook {
                    author_id: author.id,
                    book_id: book.id,
                    contribution_percentage,
                },
            )
            .await?;

        tracing::info!(author_book_id = id, "Author-book relationship updated");
        Ok(details(row, &author, &book))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.author_books.delete(id).await?;
        tracing::info!(author_book_id = id, "Author-book relationship deleted");
        Ok(())
    }

    async fn ensure_pair_free(
        &self,
        author: &Author,
        book: &Book,
        exclude_id: Option<i32>,
    ) -> AppResult<()> {
        if self
            .repository
            .author_books
            .pair_exists(author.id, book.id, exclude_id)
            .await?
        {
            tracing::warn!(
                author_id = author.id,
                book_id = book.id,
                "Rejected duplicate author-book relationship"
            );
            return Err(AppError::DuplicateRelationship(
                DUPLICATE_RELATIONSHIP.to_string(),
            ));
        }
        Ok(())
    }
}
