//! gRPC server side of the remote pair.

use std::future::Future;
use std::sync::Arc;

use proto::author::v1::author_service_server::{
    AuthorService as AuthorServiceRpc, AuthorServiceServer,
};
use proto::author::v1::{
    AuthorReply, AuthorsReply, CreateAuthorRequest, GetAuthorRequest, GetAuthorsRequest,
};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

use author_contract::{AuthorBridge, CreateAuthor};

use super::status::to_status;
use super::to_wire;
use crate::inprocess::AuthorServer;

/// Exposes an [`AuthorServer`] as `author.v1.AuthorService`.
///
/// Every RPC delegates to the in-process server, so success values and
/// error translation are shared with the in-process pair.
#[derive(Clone)]
pub struct GrpcAuthorServer {
    inner: Arc<AuthorServer>,
}

impl GrpcAuthorServer {
    pub fn new(inner: Arc<AuthorServer>) -> Self {
        Self { inner }
    }

    pub fn into_service(self) -> AuthorServiceServer<Self> {
        AuthorServiceServer::new(self)
    }

    /// Serve on `listener` until `shutdown` resolves, then drain in-flight calls.
    pub async fn serve<F>(
        self,
        listener: TcpListener,
        shutdown: F,
    ) -> Result<(), tonic::transport::Error>
    where
        F: Future<Output = ()> + Send,
    {
        Server::builder()
            .add_service(self.into_service())
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
            .await
    }
}

#[tonic::async_trait]
impl AuthorServiceRpc for GrpcAuthorServer {
    async fn get_author(
        &self,
        request: Request<GetAuthorRequest>,
    ) -> Result<Response<AuthorReply>, Status> {
        let req = request.into_inner();

        let author = self
            .inner
            .get_author(&req.id)
            .await
            .map_err(|e| to_status(&e))?;

        Ok(Response::new(AuthorReply {
            author: Some(to_wire(author)),
        }))
    }

    async fn get_authors(
        &self,
        request: Request<GetAuthorsRequest>,
    ) -> Result<Response<AuthorsReply>, Status> {
        let req = request.into_inner();

        let authors = self
            .inner
            .get_authors(&req.ids)
            .await
            .map_err(|e| to_status(&e))?;

        Ok(Response::new(AuthorsReply {
            authors: authors.into_iter().map(to_wire).collect(),
        }))
    }

    async fn create_author(
        &self,
        request: Request<CreateAuthorRequest>,
    ) -> Result<Response<AuthorReply>, Status> {
        let req = request.into_inner();
        tracing::info!("CreateAuthor requested for {:?}", req.name);

        let author = self
            .inner
            .create_author(&CreateAuthor {
                name: req.name,
                bio: req.bio,
            })
            .await
            .map_err(|e| to_status(&e))?;

        Ok(Response::new(AuthorReply {
            author: Some(to_wire(author)),
        }))
    }
}
