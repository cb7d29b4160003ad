//! Author Service
//!
//! This crate provides author management functionality.
//! Other services reach it through `author-bridge`, never directly.

pub mod models;
pub mod repository;
pub mod service;

pub use models::{Author, NewAuthor};
pub use repository::{AuthorRepository, InMemoryRepository, RepositoryError};
pub use service::{AuthorService, ServiceError};

/// Service configuration
#[derive(Debug, Clone)]
pub struct AuthorConfig {
    /// Longest accepted author name, in characters
    pub max_name_length: usize,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            max_name_length: 100,
        }
    }
}
