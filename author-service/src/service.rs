//! Author service
//!
//! Business logic for author management. Ids arrive as strings from callers
//! and are parsed here, so a malformed id is a validation failure rather
//! than a lookup miss.

use thiserror::Error;
use uuid::Uuid;

use crate::models::{Author, NewAuthor};
use crate::repository::{AuthorRepository, InMemoryRepository};
use crate::AuthorConfig;

/// Service errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Author not found: {0}")]
    NotFound(String),

    #[error("Invalid author id: {0}")]
    InvalidId(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Author service for business operations
pub struct AuthorService {
    config: AuthorConfig,
    repository: InMemoryRepository,
}

impl AuthorService {
    /// Create a new author service with in-memory repository
    pub fn new() -> Self {
        Self::with_config(AuthorConfig::default())
    }

    pub fn with_config(config: AuthorConfig) -> Self {
        Self {
            config,
            repository: InMemoryRepository::new(),
        }
    }

    /// Get a single author
    pub async fn get_author(&self, id: &str) -> Result<Author, ServiceError> {
        let parsed = parse_id(id)?;

        self.repository
            .find_by_id(parsed)
            .await
            .map_err(|e| ServiceError::RepositoryError(e.to_string()))?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    /// Get every known author among `ids`; unknown ids are skipped
    pub async fn get_authors(&self, ids: &[String]) -> Result<Vec<Author>, ServiceError> {
        let parsed = ids
            .iter()
            .map(|id| parse_id(id))
            .collect::<Result<Vec<_>, _>>()?;

        self.repository
            .find_by_ids(&parsed)
            .await
            .map_err(|e| ServiceError::RepositoryError(e.to_string()))
    }

    /// Register a new author
    pub async fn create_author(&self, new: NewAuthor) -> Result<Author, ServiceError> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation("name must not be empty".to_string()));
        }
        if name.chars().count() > self.config.max_name_length {
            return Err(ServiceError::Validation(format!(
                "name must be at most {} characters",
                self.config.max_name_length
            )));
        }

        let author = Author::new(NewAuthor {
            name: name.to_string(),
            bio: new.bio.filter(|bio| !bio.trim().is_empty()),
        });

        let created = self
            .repository
            .create(&author)
            .await
            .map_err(|e| ServiceError::RepositoryError(e.to_string()))?;
        tracing::debug!(author_id = %created.id, "author created");
        Ok(created)
    }
}

impl Default for AuthorService {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_id(id: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(id).map_err(|_| ServiceError::InvalidId(id.to_string()))
}
