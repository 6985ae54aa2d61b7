//! Author-Book association model (N:M relationship carrying a contribution share)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult};

/// Message returned when an (author, book) pair is already linked
pub const DUPLICATE_RELATIONSHIP: &str = "This author-book relationship already exists.";

/// Association row as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuthorBook {
    pub id: i32,
    pub author_id: i32,
    pub book_id: i32,
    pub contribution_percentage: Option<i32>,
}

/// Association with the author name and book title copied in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuthorBookDetails {
    pub id: i32,
    pub author_id: i32,
    pub author_name: String,
    pub book_id: i32,
    pub book_title: String,
    pub contribution_percentage: Option<i32>,
}

/// Share of a book attributed to an author, in `0..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ContributionPercentage(i32);

impl ContributionPercentage {
    pub const MIN: i32 = 0;
    pub const MAX: i32 = 100;

    pub fn new(value: i64) -> AppResult<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as i32))
        } else {
            Err(Self::range_error())
        }
    }

    /// Accepts JSON integers only; floats, strings and booleans are rejected.
    pub fn from_json(value: &Value) -> AppResult<Self> {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(v) => Self::new(v),
                None => Err(Self::range_error()),
            },
            _ => Err(Self::range_error()),
        }
    }

    pub fn get(self) -> i32 {
        self.0
    }

    fn range_error() -> AppError {
        AppError::InvalidRange(
            "Contribution percentage must be an integer between 0 and 100.".to_string(),
        )
    }
}

/// Validated association ready to be written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewAuthorBook {
    pub author_id: i32,
    pub book_id: i32,
    pub contribution_percentage: Option<i32>,
}

/// Create association request. Both ids are required; an explicit `null` id
/// names no row and resolves to NotFound.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateAuthorBook {
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = i32)]
    pub author_id: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = i32)]
    pub book_id: Option<Option<i32>>,
    /// Integer in 0..=100
    #[schema(value_type = Option<i32>)]
    pub contribution_percentage: Option<Value>,
}

/// Update association request. Omitted fields keep their value; a `null` id
/// resolves to NotFound.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateAuthorBook {
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub author_id: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub book_id: Option<Option<i32>>,
    /// Integer in 0..=100; `null` keeps the current value
    #[schema(value_type = Option<i32>)]
    pub contribution_percentage: Option<Value>,
}

/// Unwrap an id that was present in a payload; `null` cannot match any row
pub fn present_id(raw: Option<i32>, entity: &str) -> AppResult<i32> {
    raw.ok_or_else(|| AppError::NotFound(format!("{} id must not be null", entity)))
}

/// Parse an optional raw percentage from a request payload
pub fn parse_percentage(raw: Option<&Value>) -> AppResult<Option<i32>> {
    raw.map(ContributionPercentage::from_json)
        .transpose()
        .map(|p| p.map(ContributionPercentage::get))
}

/// Association list query parameters
#[derive(Debug, Default, Clone, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct AuthorBookQuery {
    /// Case-insensitive match on author name or book title
    pub search: Option<String>,
    pub author_id: Option<i32>,
    pub book_id: Option<i32>,
    /// Exact contribution percentage
    pub contribution_percentage: Option<i32>,
}

/// Association list envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthorBookList {
    pub author_books: Vec<AuthorBookDetails>,
}
