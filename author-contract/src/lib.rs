//! Author contract
//!
//! What a consuming service may know about the author service: the
//! [`AuthorBridge`] operations, their plain data types and the closed
//! [`AuthorError`] vocabulary. Adapters live in `author-bridge` and are only
//! built by the composition root.

pub mod bridge;
pub mod error;

pub use bridge::{Author, AuthorBridge, CreateAuthor};
pub use error::AuthorError;
