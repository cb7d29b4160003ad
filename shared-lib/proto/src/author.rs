//! `author.v1` messages and service stubs.

pub mod v1 {
    /// Author as it travels over the wire.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Author {
        #[prost(string, tag = "1")]
        pub id: String,
        #[prost(string, tag = "2")]
        pub name: String,
        #[prost(string, optional, tag = "3")]
        pub bio: Option<String>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct GetAuthorRequest {
        #[prost(string, tag = "1")]
        pub id: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct GetAuthorsRequest {
        #[prost(string, repeated, tag = "1")]
        pub ids: Vec<String>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct CreateAuthorRequest {
        #[prost(string, tag = "1")]
        pub name: String,
        #[prost(string, optional, tag = "2")]
        pub bio: Option<String>,
    }

    /// Single-author reply. `author` is always set on success.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct AuthorReply {
        #[prost(message, optional, tag = "1")]
        pub author: Option<Author>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct AuthorsReply {
        #[prost(message, repeated, tag = "1")]
        pub authors: Vec<Author>,
    }

    include!(concat!(env!("OUT_DIR"), "/author.v1.AuthorService.rs"));
}
