//! Book models

use author_contract::Author;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalogued book. Only the author's id is stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author_id: String,
}

/// Input for cataloguing a book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author_id: String,
}

/// A book together with whatever author details could be fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookView {
    pub id: Uuid,
    pub title: String,
    pub author_id: String,
    /// `None` when the author service could not provide the details.
    pub author: Option<Author>,
}

impl BookView {
    pub fn new(book: Book, author: Option<Author>) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author_id: book.author_id,
            author,
        }
    }
}
