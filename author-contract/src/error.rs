use ::error::ErrorKind;
use thiserror::Error;

/// Failure of an [`crate::AuthorBridge`] call.
///
/// This is the whole vocabulary a consumer has to handle, whichever adapter
/// is in use. Values compare by kind and detail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorError {
    #[error("author not found: {0}")]
    NotFound(String),

    #[error("invalid author request: {0}")]
    InvalidInput(String),

    #[error("author service unavailable: {0}")]
    Unavailable(String),

    #[error("author service failed: {0}")]
    Internal(String),
}

impl AuthorError {
    pub fn from_kind(kind: ErrorKind, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        match kind {
            ErrorKind::NotFound => AuthorError::NotFound(detail),
            ErrorKind::InvalidInput => AuthorError::InvalidInput(detail),
            ErrorKind::Unavailable => AuthorError::Unavailable(detail),
            ErrorKind::Internal => AuthorError::Internal(detail),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthorError::NotFound(_) => ErrorKind::NotFound,
            AuthorError::InvalidInput(_) => ErrorKind::InvalidInput,
            AuthorError::Unavailable(_) => ErrorKind::Unavailable,
            AuthorError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// The detail message without the kind prefix.
    pub fn detail(&self) -> &str {
        match self {
            AuthorError::NotFound(detail)
            | AuthorError::InvalidInput(detail)
            | AuthorError::Unavailable(detail)
            | AuthorError::Internal(detail) => detail,
        }
    }
}
