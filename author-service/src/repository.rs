//! Author repository
//!
//! Storage operations for author management.

use std::sync::RwLock;

use anyhow::Result;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Author;

/// Repository errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Duplicate author id: {0}")]
    Duplicate(Uuid),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Author repository trait for storage operations
#[allow(async_fn_in_trait)]
pub trait AuthorRepository: Send + Sync {
    /// Find an author by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Author>>;

    /// Find all authors whose id is in `ids`, in the order of `ids`
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Author>>;

    /// Store a new author
    async fn create(&self, author: &Author) -> Result<Author>;
}

/// In-memory repository for testing and development
#[derive(Default)]
pub struct InMemoryRepository {
    authors: RwLock<Vec<Author>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> RepositoryError {
    RepositoryError::Storage("author store lock poisoned".to_string())
}

impl AuthorRepository for InMemoryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Author>> {
        let authors = self.authors.read().map_err(poisoned)?;
        Ok(authors.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Author>> {
        let authors = self.authors.read().map_err(poisoned)?;
        Ok(ids
            .iter()
            .filter_map(|id| authors.iter().find(|a| a.id == *id))
            .cloned()
            .collect())
    }

    async fn create(&self, author: &Author) -> Result<Author> {
        let mut authors = self.authors.write().map_err(poisoned)?;
        if authors.iter().any(|a| a.id == author.id) {
            return Err(RepositoryError::Duplicate(author.id).into());
        }
        authors.push(author.clone());
        Ok(author.clone())
    }
}
