//! Data models for the catalog

pub mod author;
pub mod author_book;
pub mod book;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Re-export commonly used types
pub use author::{Author, AuthorWithBooks, BookRef};
pub use author_book::{AuthorBook, AuthorBookDetails, ContributionPercentage};
pub use book::Book;

/// Plain acknowledgement body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
