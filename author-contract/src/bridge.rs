//! The author capability as seen by consumers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AuthorError;

/// Author as exposed to other services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub name: String,
    pub bio: Option<String>,
}

/// Request to register an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAuthor {
    pub name: String,
    pub bio: Option<String>,
}

impl CreateAuthor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bio: None,
        }
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }
}

/// Operations other services may invoke on the author service.
///
/// Consumers hold this as `Arc<dyn AuthorBridge>`; which adapter sits behind
/// it is decided once, when the process is wired.
#[async_trait]
pub trait AuthorBridge: Send + Sync {
    /// Fetch one author. Unknown ids yield [`AuthorError::NotFound`].
    async fn get_author(&self, id: &str) -> Result<Author, AuthorError>;

    /// Fetch every known author among `ids`, in request order. Unknown ids
    /// are skipped; a malformed id fails the whole call.
    async fn get_authors(&self, ids: &[String]) -> Result<Vec<Author>, AuthorError>;

    /// Register a new author.
    async fn create_author(&self, request: &CreateAuthor) -> Result<Author, AuthorError>;
}
