//! Authors service

use validator::Validate;

use super::{required_text, trim_text};
use crate::{
    error::AppResult,
    models::author::{Author, AuthorQuery, AuthorWithBooks, CreateAuthor, NewAuthor, UpdateAuthor},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List authors with their books
    pub async fn list(&self, query: &AuthorQuery) -> AppResult<Vec<AuthorWithBooks>> {
        self.repository.authors.list_with_books(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    pub async fn create(&self, mut data: CreateAuthor) -> AppResult<Author> {
        trim_text(&mut data.name);
        data.validate()?;
        let name = required_text(data.name, "name")?;

        let author = self
            .repository
            .authors
            .create(&NewAuthor { name, bio: data.bio })
            .await?;

        tracing::info!(author_id = author.id, "Author created");
        Ok(author)
    }

    /// Partial update: omitted fields keep their current value
    pub async fn update(&self, id: i32, mut data: UpdateAuthor) -> AppResult<Author> {
        trim_text(&mut data.name);
        data.validate()?;

        let mut author = self.repository.authors.get_by_id(id).await?;
        data.apply(&mut author);
        self.repository.authors.update(&author).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await?;
        tracing::info!(author_id = id, "Author deleted with its book associations");
        Ok(())
    }
}
