//! Book model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Full book model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    /// Publication date (YYYY-MM-DD)
    pub published_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub is_available: bool,
}

/// Validated book data ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub published_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub is_available: bool,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateBook {
    #[validate(
        required,
        length(min = 1, max = 200, message = "Title must be between 1 and 200 characters")
    )]
    pub title: Option<String>,
    pub published_date: Option<NaiveDate>,
    pub description: Option<String>,
    /// Defaults to true
    pub is_available: Option<bool>,
}

/// Update book request. Omitted fields keep their value; `null` clears nullable fields.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<NaiveDate>, nullable)]
    pub published_date: Option<Option<NaiveDate>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub description: Option<Option<String>>,
    pub is_available: Option<bool>,
}

impl UpdateBook {
    pub fn apply(&self, book: &mut Book) {
        if let Some(ref title) = self.title {
            book.title = title.clone();
        }
        if let Some(published_date) = self.published_date {
            book.published_date = published_date;
        }
        if let Some(ref description) = self.description {
            book.description = description.clone();
        }
        if let Some(is_available) = self.is_available {
            book.is_available = is_available;
        }
    }
}

/// Book list query parameters
#[derive(Debug, Default, Clone, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Case-insensitive match on title or description
    pub search: Option<String>,
    pub is_available: Option<bool>,
    /// Earliest publication date, inclusive (`YYYY-MM-DD`)
    pub published_from: Option<NaiveDate>,
    /// Latest publication date, inclusive (`YYYY-MM-DD`)
    pub published_to: Option<NaiveDate>,
}

/// Book list envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookList {
    pub books: Vec<Book>,
}
