//! Book repository

use std::sync::RwLock;

use anyhow::{anyhow, Result};
use uuid::Uuid;

use crate::models::Book;

/// Book repository trait for storage operations
#[allow(async_fn_in_trait)]
pub trait BookRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>>;

    /// All books in insertion order
    async fn list(&self) -> Result<Vec<Book>>;

    async fn create(&self, book: &Book) -> Result<Book>;
}

/// In-memory repository for testing and development
#[derive(Default)]
pub struct InMemoryRepository {
    books: RwLock<Vec<Book>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookRepository for InMemoryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>> {
        let books = self.books.read().map_err(|_| anyhow!("book store lock poisoned"))?;
        Ok(books.iter().find(|b| b.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Book>> {
        let books = self.books.read().map_err(|_| anyhow!("book store lock poisoned"))?;
        Ok(books.clone())
    }

    async fn create(&self, book: &Book) -> Result<Book> {
        let mut books = self.books.write().map_err(|_| anyhow!("book store lock poisoned"))?;
        books.push(book.clone());
        Ok(book.clone())
    }
}
