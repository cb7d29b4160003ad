//! Generates the tonic client and server stubs for `author.v1.AuthorService`.
//!
//! Message types are declared with prost derives in `src/author.rs`, so only
//! the service plumbing is generated here and no `protoc` is needed.

use tonic_build::manual::{Builder, Method, Service};

const CODEC: &str = "tonic::codec::ProstCodec";

fn unary(name: &str, route_name: &str, input: &str, output: &str) -> Method {
    Method::builder()
        .name(name)
        .route_name(route_name)
        .input_type(format!("crate::author::v1::{input}"))
        .output_type(format!("crate::author::v1::{output}"))
        .codec_path(CODEC)
        .build()
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let author_service = Service::builder()
        .name("AuthorService")
        .package("author.v1")
        .comment("Author lookups and registration exposed to other services.")
        .method(unary("get_author", "GetAuthor", "GetAuthorRequest", "AuthorReply"))
        .method(unary("get_authors", "GetAuthors", "GetAuthorsRequest", "AuthorsReply"))
        .method(unary(
            "create_author",
            "CreateAuthor",
            "CreateAuthorRequest",
            "AuthorReply",
        ))
        .build();

    Builder::new()
        .build_client(true)
        .build_server(true)
        .compile(&[author_service]);
}
