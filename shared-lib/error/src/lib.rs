//! Common error vocabulary for inter-service calls.
//!
//! Every bridge interface maps its failures onto [`ErrorKind`], a closed set
//! that is compared by value. The same codes travel over the wire and into
//! HTTP error bodies, so a caller never depends on a provider's internal
//! error types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Provider-agnostic error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// The requested entity does not exist.
    NotFound,
    /// The request was rejected by the provider's validation.
    InvalidInput,
    /// The provider could not be reached or did not answer in time.
    Unavailable,
    /// The provider failed while handling a valid request.
    Internal,
}

impl ErrorKind {
    /// All kinds, in declaration order.
    pub const ALL: [ErrorKind; 4] = [
        ErrorKind::NotFound,
        ErrorKind::InvalidInput,
        ErrorKind::Unavailable,
        ErrorKind::Internal,
    ];

    /// Stable code used on the wire and in API error bodies.
    pub const fn code(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::InvalidInput => "INVALID_INPUT",
            ErrorKind::Unavailable => "UNAVAILABLE",
            ErrorKind::Internal => "INTERNAL",
        }
    }

    /// Parse a code produced by [`ErrorKind::code`].
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error response for API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Add details to the error response.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl From<ErrorKind> for ErrorResponse {
    fn from(kind: ErrorKind) -> Self {
        let message = match kind {
            ErrorKind::NotFound => "Resource not found",
            ErrorKind::InvalidInput => "Invalid input",
            ErrorKind::Unavailable => "Dependency unavailable",
            ErrorKind::Internal => "Internal error",
        };
        Self::new(kind.code(), message)
    }
}
