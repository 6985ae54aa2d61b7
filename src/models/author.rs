//! Author model and related types

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Full author model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub name: String,
    pub bio: Option<String>,
}

/// Minimal book reference nested in author listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookRef {
    pub id: i32,
    pub title: String,
}

/// Author together with the books it contributed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthorWithBooks {
    pub id: i32,
    pub name: String,
    pub bio: Option<String>,
    /// Ordered by association creation
    pub books: Vec<BookRef>,
}

/// One row of the author/book left join used to build listings
#[derive(Debug, Clone, FromRow)]
pub struct AuthorBookJoinRow {
    pub id: i32,
    pub name: String,
    pub bio: Option<String>,
    pub book_id: Option<i32>,
    pub book_title: Option<String>,
}

impl AuthorWithBooks {
    /// Fold joined rows (ordered by author, then association) into nested authors.
    /// Authors without books appear once with an empty list.
    pub fn group(rows: Vec<AuthorBookJoinRow>) -> Vec<AuthorWithBooks> {
        let mut authors: IndexMap<i32, AuthorWithBooks> = IndexMap::new();

        for row in rows {
            let entry = authors.entry(row.id).or_insert_with(|| AuthorWithBooks {
                id: row.id,
                name: row.name.clone(),
                bio: row.bio.clone(),
                books: Vec::new(),
            });

            if let (Some(id), Some(title)) = (row.book_id, row.book_title) {
                entry.books.push(BookRef { id, title });
            }
        }

        authors.into_values().collect()
    }
}

/// Validated author data ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub name: String,
    pub bio: Option<String>,
}

/// Create author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateAuthor {
    #[validate(
        required,
        length(min = 1, max = 100, message = "Name must be between 1 and 100 characters")
    )]
    pub name: Option<String>,
    pub bio: Option<String>,
}

/// Update author request. Omitted fields keep their value; `bio: null` clears it.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateAuthor {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub bio: Option<Option<String>>,
}

impl UpdateAuthor {
    pub fn apply(&self, author: &mut Author) {
        if let Some(ref name) = self.name {
            author.name = name.clone();
        }
        if let Some(ref bio) = self.bio {
            author.bio = bio.clone();
        }
    }
}

/// Author list query parameters
#[derive(Debug, Default, Clone, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct AuthorQuery {
    /// Case-insensitive match on the author name
    pub search: Option<String>,
}

/// Author list envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthorList {
    pub authors: Vec<AuthorWithBooks>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i32, name: &str, book: Option<(i32, &str)>) -> AuthorBookJoinRow {
        AuthorBookJoinRow {
            id,
            name: name.to_string(),
            bio: None,
            book_id: book.map(|(id, _)| id),
            book_title: book.map(|(_, t)| t.to_string()),
        }
    }

    #[test]
    fn group_nests_books_in_row_order() {
        let authors = AuthorWithBooks::group(vec![
            row(1, "Ursula", Some((7, "The Dispossessed"))),
            row(1, "Ursula", Some((3, "Lathe of Heaven"))),
            row(2, "Stanislaw", None),
            row(4, "Octavia", Some((3, "Lathe of Heaven"))),
        ]);

        assert_eq!(authors.len(), 3);
        assert_eq!(
            authors[0].books.iter().map(|b| b.id).collect::<Vec<_>>(),
            vec![7, 3]
        );
        assert!(authors[1].books.is_empty());
        assert_eq!(authors[2].name, "Octavia");
    }

    #[test]
    fn update_distinguishes_absent_and_null_bio() {
        let mut author = Author {
            id: 1,
            name: "Ursula".into(),
            bio: Some("Wrote Earthsea".into()),
        };

        let keep: UpdateAuthor = serde_json::from_str(r#"{"name": "Ursula K."}"#).unwrap();
        keep.apply(&mut author);
        assert_eq!(author.name, "Ursula K.");
        assert_eq!(author.bio.as_deref(), Some("Wrote Earthsea"));

        let clear: UpdateAuthor = serde_json::from_str(r#"{"bio": null}"#).unwrap();
        clear.apply(&mut author);
        assert_eq!(author.name, "Ursula K.");
        assert_eq!(author.bio, None);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed = serde_json::from_str::<CreateAuthor>(r#"{"name": "A", "age": 3}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn missing_name_fails_validation() {
        let data: CreateAuthor = serde_json::from_str(r#"{"bio": "x"}"#).unwrap();
        assert!(data.validate().is_err());
    }
}
