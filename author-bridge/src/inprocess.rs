//! In-process adapter pair
//!
//! Direct function calls into the author service with no serialization and
//! no network round trip.

use std::sync::Arc;

use async_trait::async_trait;
use author_service::{AuthorService, NewAuthor, ServiceError};

use author_contract::{Author, AuthorBridge, AuthorError, CreateAuthor};

/// Longest piece of caller input echoed back in an error detail, in chars.
pub const MAX_ECHOED_INPUT: usize = 64;

/// Provider side of the bridge.
///
/// Wraps the author service's handlers and translates its errors into
/// [`AuthorError`]. The gRPC server delegates to the same instance, so both
/// transports share one translation. Error details are bounded in size
/// whatever the caller sent.
pub struct AuthorServer {
    service: Arc<AuthorService>,
}

impl AuthorServer {
    pub fn new(service: Arc<AuthorService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl AuthorBridge for AuthorServer {
    async fn get_author(&self, id: &str) -> Result<Author, AuthorError> {
        let author = self.service.get_author(id).await.map_err(translate)?;
        Ok(from_model(author))
    }

    async fn get_authors(&self, ids: &[String]) -> Result<Vec<Author>, AuthorError> {
        let authors = self.service.get_authors(ids).await.map_err(translate)?;
        Ok(authors.into_iter().map(from_model).collect())
    }

    async fn create_author(&self, request: &CreateAuthor) -> Result<Author, AuthorError> {
        let new = NewAuthor {
            name: request.name.clone(),
            bio: request.bio.clone(),
        };
        let author = self.service.create_author(new).await.map_err(translate)?;
        Ok(from_model(author))
    }
}

/// Consumer side of the in-process pair: forwards every call to one server.
#[derive(Clone)]
pub struct InProcessClient {
    server: Arc<AuthorServer>,
}

impl InProcessClient {
    pub fn new(server: Arc<AuthorServer>) -> Self {
        Self { server }
    }
}

#[async_trait]
impl AuthorBridge for InProcessClient {
    async fn get_author(&self, id: &str) -> Result<Author, AuthorError> {
        self.server.get_author(id).await
    }

    async fn get_authors(&self, ids: &[String]) -> Result<Vec<Author>, AuthorError> {
        self.server.get_authors(ids).await
    }

    async fn create_author(&self, request: &CreateAuthor) -> Result<Author, AuthorError> {
        self.server.create_author(request).await
    }
}

fn from_model(author: author_service::Author) -> Author {
    Author {
        id: author.id.to_string(),
        name: author.name,
        bio: author.bio,
    }
}

fn translate(err: ServiceError) -> AuthorError {
    match err {
        ServiceError::NotFound(id) => AuthorError::NotFound(echo(&id)),
        ServiceError::InvalidId(id) => {
            AuthorError::InvalidInput(format!("malformed author id `{}`", echo(&id)))
        }
        ServiceError::Validation(reason) => AuthorError::InvalidInput(reason),
        ServiceError::RepositoryError(reason) => {
            tracing::error!(error = %reason, "author repository failure");
            AuthorError::Internal("author storage failure".to_string())
        }
    }
}

/// Caller input as quoted in an error detail, cut to [`MAX_ECHOED_INPUT`] chars.
fn echo(input: &str) -> String {
    match input.char_indices().nth(MAX_ECHOED_INPUT) {
        Some((cut, _)) => format!("{}... ({} chars)", &input[..cut], input.chars().count()),
        None => input.to_string(),
    }
}
