//! Book Service
//!
//! Book catalogue. Author details come from the author service through
//! [`author_contract::AuthorBridge`]; when that call fails, reads degrade to
//! books without author details instead of failing.

pub mod models;
pub mod repository;
pub mod service;

pub use models::{Book, BookView, NewBook};
pub use repository::{BookRepository, InMemoryRepository};
pub use service::{BookError, BookService};

/// Service configuration
#[derive(Debug, Clone)]
pub struct BookConfig {
    /// Longest accepted title, in characters
    pub max_title_length: usize,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            max_title_length: 200,
        }
    }
}
