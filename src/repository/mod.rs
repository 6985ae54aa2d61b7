//! Repository layer for catalog persistence
//!
//! Each entity has a data-access trait with a PostgreSQL implementation. The
//! [`memory::MemoryStore`] implements all three with the same semantics.

pub mod author_books;
pub mod authors;
pub mod books;
pub mod memory;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

pub use author_books::AuthorBooksRepository;
pub use authors::AuthorsRepository;
pub use books::BooksRepository;

/// Data-access handle threaded through the services
#[derive(Clone)]
pub struct Repository {
    pub authors: Arc<dyn AuthorsRepository>,
    pub books: Arc<dyn BooksRepository>,
    pub author_books: Arc<dyn AuthorBooksRepository>,
}

impl Repository {
    /// Create a PostgreSQL-backed repository with the given pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: Arc::new(authors::PgAuthorsRepository::new(pool.clone())),
            books: Arc::new(books::PgBooksRepository::new(pool.clone())),
            author_books: Arc::new(author_books::PgAuthorBooksRepository::new(pool)),
        }
    }

    /// Create a repository over a fresh in-memory store
    pub fn in_memory() -> Self {
        let store = Arc::new(memory::MemoryStore::new());
        Self {
            authors: store.clone(),
            books: store.clone(),
            author_books: store,
        }
    }

    pub fn from_parts(
        authors: Arc<dyn AuthorsRepository>,
        books: Arc<dyn BooksRepository>,
        author_books: Arc<dyn AuthorBooksRepository>,
    ) -> Self {
        Self {
            authors,
            books,
            author_books,
        }
    }
}

/// Build an ILIKE pattern matching `term` anywhere, with wildcards escaped
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Case-insensitive substring match, the in-memory counterpart of `ILIKE '%term%'`
pub(crate) fn contains_ci(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(&term.to_lowercase())
}
