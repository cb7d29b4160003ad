//! Author bridge
//!
//! Adapter pairs for [`AuthorBridge`], the contract defined in
//! `author-contract`:
//!
//! - [`inprocess`]: [`AuthorServer`] wraps the provider's handlers and
//!   [`InProcessClient`] forwards to it directly.
//! - [`remote`]: [`GrpcAuthorServer`] exposes the same [`AuthorServer`] over
//!   gRPC (`author.v1`) and [`RemoteClient`] calls it over the network.
//!
//! Both pairs return the same values and the same [`AuthorError`]s for the
//! same input. Transport failures of the remote pair surface only as
//! [`AuthorError::Unavailable`].

pub mod inprocess;
pub mod remote;

pub use author_contract::{Author, AuthorBridge, AuthorError, CreateAuthor};
pub use inprocess::{AuthorServer, InProcessClient};
pub use remote::{GrpcAuthorServer, RemoteClient, DEFAULT_TIMEOUT};
