//! In-memory catalog store
//!
//! Mirrors the PostgreSQL schema: per-table id sequences starting at 1,
//! cascading deletes and a unique (author, book) pair. Every write holds the
//! lock for its whole check-then-write sequence, so the pair invariant holds
//! under concurrent requests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{
    author_books::{self, AuthorBooksRepository},
    authors::{self, AuthorsRepository},
    books::{self, BooksRepository},
    contains_ci,
};
use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorBookJoinRow, AuthorQuery, AuthorWithBooks, NewAuthor},
        author_book::{
            AuthorBook, AuthorBookDetails, AuthorBookQuery, NewAuthorBook, DUPLICATE_RELATIONSHIP,
        },
        book::{Book, BookQuery, NewBook},
    },
};

#[derive(Debug, Default)]
struct MemoryState {
    authors: BTreeMap<i32, Author>,
    books: BTreeMap<i32, Book>,
    author_books: BTreeMap<i32, AuthorBook>,
    author_seq: i32,
    book_seq: i32,
    author_book_seq: i32,
}

impl MemoryState {
    fn pair_taken(&self, author_id: i32, book_id: i32, exclude_id: Option<i32>) -> bool {
        self.author_books.values().any(|ab| {
            ab.author_id == author_id && ab.book_id == book_id && Some(ab.id) != exclude_id
        })
    }

    /// Foreign key and uniqueness checks shared by insert and update
    fn check_association(&self, data: &NewAuthorBook, exclude_id: Option<i32>) -> AppResult<()> {
        if !self.authors.contains_key(&data.author_id) {
            return Err(authors::not_found(data.author_id));
        }
        if !self.books.contains_key(&data.book_id) {
            return Err(books::not_found(data.book_id));
        }
        if self.pair_taken(data.author_id, data.book_id, exclude_id) {
            return Err(AppError::DuplicateRelationship(
                DUPLICATE_RELATIONSHIP.to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthorsRepository for MemoryStore {
    async fn list_with_books(&self, query: &AuthorQuery) -> AppResult<Vec<AuthorWithBooks>> {
        let state = self.state.read().await;
        let mut rows = Vec::new();

        for author in state.authors.values() {
            if let Some(ref term) = query.search {
                if !contains_ci(&author.name, term) {
                    continue;
                }
            }

            let mut linked = state
                .author_books
                .values()
                .filter(|ab| ab.author_id == author.id)
                .filter_map(|ab| state.books.get(&ab.book_id))
                .peekable();

            if linked.peek().is_none() {
                rows.push(AuthorBookJoinRow {
                    id: author.id,
                    name: author.name.clone(),
                    bio: author.bio.clone(),
                    book_id: None,
                    book_title: None,
                });
                continue;
            }

            for book in linked {
                rows.push(AuthorBookJoinRow {
                    id: author.id,
                    name: author.name.clone(),
                    bio: author.bio.clone(),
                    book_id: Some(book.id),
                    book_title: Some(book.title.clone()),
                });
            }
        }

        Ok(AuthorWithBooks::group(rows))
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        let state = self.state.read().await;
        state.authors.get(&id).cloned().ok_or_else(|| authors::not_found(id))
    }

    async fn create(&self, data: &NewAuthor) -> AppResult<Author> {
        let mut state = self.state.write().await;
        state.author_seq += 1;
        let author = Author {
            id: state.author_seq,
            name: data.name.clone(),
            bio: data.bio.clone(),
        };
        state.authors.insert(author.id, author.clone());
        Ok(author)
    }

    async fn update(&self, author: &Author) -> AppResult<Author> {
        let mut state = self.state.write().await;
        let slot = state
            .authors
            .get_mut(&author.id)
            .ok_or_else(|| authors::not_found(author.id))?;
        *slot = author.clone();
        Ok(author.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.authors.remove(&id).is_none() {
            return Err(authors::not_found(id));
        }
        state.author_books.retain(|_, ab| ab.author_id != id);
        Ok(())
    }
}

#[async_trait]
impl BooksRepository for MemoryStore {
    async fn list(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let state = self.state.read().await;
        let books = state
            .books
            .values()
            .filter(|b| match query.search {
                Some(ref term) => {
                    contains_ci(&b.title, term)
                        || b.description.as_deref().is_some_and(|d| contains_ci(d, term))
                }
                None => true,
            })
            .filter(|b| query.is_available.map_or(true, |flag| b.is_available == flag))
            // Undated books never match a date bound
            .filter(|b| match (query.published_from, query.published_to) {
                (None, None) => true,
                (from, to) => b.published_date.is_some_and(|date| {
                    from.map_or(true, |from| date >= from) && to.map_or(true, |to| date <= to)
                }),
            })
            .cloned()
            .collect();
        Ok(books)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        let state = self.state.read().await;
        state.books.get(&id).cloned().ok_or_else(|| books::not_found(id))
    }

    async fn create(&self, data: &NewBook) -> AppResult<Book> {
        let mut state = self.state.write().await;
        state.book_seq += 1;
        let book = Book {
            id: state.book_seq,
            title: data.title.clone(),
            published_date: data.published_date,
            description: data.description.clone(),
            is_available: data.is_available,
        };
        state.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn update(&self, book: &Book) -> AppResult<Book> {
        let mut state = self.state.write().await;
        let slot = state
            .books
            .get_mut(&book.id)
            .ok_or_else(|| books::not_found(book.id))?;
        *slot = book.clone();
        Ok(book.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.books.remove(&id).is_none() {
            return Err(books::not_found(id));
        }
        state.author_books.retain(|_, ab| ab.book_id != id);
        Ok(())
    }
}

#[async_trait]
impl AuthorBooksRepository for MemoryStore {
    async fn list(&self, query: &AuthorBookQuery) -> AppResult<Vec<AuthorBookDetails>> {
        let state = self.state.read().await;
        let mut rows = Vec::new();

        for ab in state.author_books.values() {
            if query.author_id.is_some_and(|id| id != ab.author_id)
                || query.book_id.is_some_and(|id| id != ab.book_id)
                || query
                    .contribution_percentage
                    .is_some_and(|pct| ab.contribution_percentage != Some(pct))
            {
                continue;
            }
            let (Some(author), Some(book)) =
                (state.authors.get(&ab.author_id), state.books.get(&ab.book_id))
            else {
                continue;
            };
            if let Some(ref term) = query.search {
                if !contains_ci(&author.name, term) && !contains_ci(&book.title, term) {
                    continue;
                }
            }
            rows.push(AuthorBookDetails {
                id: ab.id,
                author_id: author.id,
                author_name: author.name.clone(),
                book_id: book.id,
                book_title: book.title.clone(),
                contribution_percentage: ab.contribution_percentage,
            });
        }

        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<AuthorBook> {
        let state = self.state.read().await;
        state
            .author_books
            .get(&id)
            .cloned()
            .ok_or_else(|| author_books::not_found(id))
    }

    async fn pair_exists(
        &self,
        author_id: i32,
        book_id: i32,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        let state = self.state.read().await;
        Ok(state.pair_taken(author_id, book_id, exclude_id))
    }

    async fn create(&self, data: &NewAuthorBook) -> AppResult<AuthorBook> {
        let mut state = self.state.write().await;
        state.check_association(data, None)?;

        state.author_book_seq += 1;
        let row = AuthorBook {
            id: state.author_book_seq,
            author_id: data.author_id,
            book_id: data.book_id,
            contribution_percentage: data.contribution_percentage,
        };
        state.author_books.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, data: &NewAuthorBook) -> AppResult<AuthorBook> {
        let mut state = self.state.write().await;
        if !state.author_books.contains_key(&id) {
            return Err(author_books::not_found(id));
        }
        state.check_association(data, Some(id))?;

        let row = AuthorBook {
            id,
            author_id: data.author_id,
            book_id: data.book_id,
            contribution_percentage: data.contribution_percentage,
        };
        state.author_books.insert(id, row.clone());
        Ok(row)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut state = self.state.write().await;
        state
            .author_books
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| author_books::not_found(id))
    }
}
