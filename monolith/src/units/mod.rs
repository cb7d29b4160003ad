//! Service units hosted by the monolith.

mod author_grpc;
mod book_http;

pub use author_grpc::AuthorGrpcUnit;
pub use book_http::BookHttpUnit;
