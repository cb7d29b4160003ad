//! Book service
//!
//! Business logic for the catalogue. Author lookups are optional enrichment
//! on reads and a precondition on writes.

use std::collections::HashMap;
use std::sync::Arc;

use ::error::ErrorKind;
use author_contract::{Author, AuthorBridge, AuthorError};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Book, BookView, NewBook};
use crate::repository::{BookRepository, InMemoryRepository};
use crate::BookConfig;

/// Service errors
#[derive(Error, Debug)]
pub enum BookError {
    #[error("Book not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown author: {0}")]
    UnknownAuthor(String),

    #[error("Author lookup unavailable: {0}")]
    AuthorUnavailable(#[source] AuthorError),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl BookError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookError::NotFound(_) => ErrorKind::NotFound,
            BookError::InvalidInput(_) | BookError::UnknownAuthor(_) => ErrorKind::InvalidInput,
            BookError::AuthorUnavailable(_) => ErrorKind::Unavailable,
            BookError::RepositoryError(_) => ErrorKind::Internal,
        }
    }
}

/// Book service for business operations
pub struct BookService {
    config: BookConfig,
    repository: InMemoryRepository,
    authors: Arc<dyn AuthorBridge>,
}

impl BookService {
    pub fn new(authors: Arc<dyn AuthorBridge>) -> Self {
        Self::with_config(BookConfig::default(), authors)
    }

    pub fn with_config(config: BookConfig, authors: Arc<dyn AuthorBridge>) -> Self {
        Self {
            config,
            repository: InMemoryRepository::new(),
            authors,
        }
    }

    /// Get one book with its author, if the author service can provide it
    pub async fn get_book(&self, id: &str) -> Result<BookView, BookError> {
        let parsed = Uuid::parse_str(id).map_err(|_| BookError::NotFound(id.to_string()))?;

        let book = self
            .repository
            .find_by_id(parsed)
            .await
            .map_err(|e| BookError::RepositoryError(e.to_string()))?
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;

        let author = match self.authors.get_author(&book.author_id).await {
            Ok(author) => Some(author),
            Err(err) => {
                tracing::warn!(
                    book_id = %book.id,
                    error = %err,
                    "serving book without author details"
                );
                None
            }
        };

        Ok(BookView::new(book, author))
    }

    /// List every book, enriching them with a single batched author lookup
    pub async fn list_books(&self) -> Result<Vec<BookView>, BookError> {
        let books = self
            .repository
            .list()
            .await
            .map_err(|e| BookError::RepositoryError(e.to_string()))?;
        if books.is_empty() {
            return Ok(Vec::new());
        }

        let mut ids: Vec<String> = books.iter().map(|b| b.author_id.clone()).collect();
        ids.sort();
        ids.dedup();

        let by_id: HashMap<String, Author> = match self.authors.get_authors(&ids).await {
            Ok(authors) => authors.into_iter().map(|a| (a.id.clone(), a)).collect(),
            Err(err) => {
                tracing::warn!(error = %err, "listing books without author details");
                HashMap::new()
            }
        };

        Ok(books
            .into_iter()
            .map(|book| {
                let author = by_id.get(&book.author_id).cloned();
                BookView::new(book, author)
            })
            .collect())
    }

    /// Catalogue a new book; its author must exist
    pub async fn create_book(&self, new: NewBook) -> Result<BookView, BookError> {
        let title = new.title.trim();
        if title.is_empty() {
            return Err(BookError::InvalidInput("title must not be empty".to_string()));
        }
        if title.chars().count() > self.config.max_title_length {
            return Err(BookError::InvalidInput(format!(
                "title must be at most {} characters",
                self.config.max_title_length
            )));
        }

        let author = self
            .authors
            .get_author(&new.author_id)
            .await
            .map_err(|err| match err {
                AuthorError::NotFound(_) | AuthorError::InvalidInput(_) => {
                    BookError::UnknownAuthor(new.author_id.clone())
                }
                AuthorError::Unavailable(_) | AuthorError::Internal(_) => {
                    BookError::AuthorUnavailable(err)
                }
            })?;

        let book = Book {
            id: Uuid::new_v4(),
            title: title.to_string(),
            author_id: author.id.clone(),
        };
        let created = self
            .repository
            .create(&book)
            .await
            .map_err(|e| BookError::RepositoryError(e.to_string()))?;

        tracing::info!(book_id = %created.id, author_id = %created.author_id, "book created");
        Ok(BookView::new(created, Some(author)))
    }
}
