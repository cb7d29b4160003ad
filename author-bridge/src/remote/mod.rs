//! Remote adapter pair over gRPC (`author.v1.AuthorService`).

mod client;
mod server;
mod status;

pub use client::{RemoteClient, DEFAULT_TIMEOUT};
pub use server::GrpcAuthorServer;
pub use status::{from_status, to_status};

use author_contract::Author;
use proto::author::v1 as pb;

fn from_wire(author: pb::Author) -> Author {
    Author {
        id: author.id,
        name: author.name,
        bio: author.bio,
    }
}

fn to_wire(author: Author) -> pb::Author {
    pb::Author {
        id: author.id,
        name: author.name,
        bio: author.bio,
    }
}
