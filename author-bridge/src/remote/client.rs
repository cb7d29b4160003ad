//! gRPC client side of the remote pair.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use proto::author::v1::author_service_client::AuthorServiceClient;
use proto::author::v1::{CreateAuthorRequest, GetAuthorRequest, GetAuthorsRequest};
use tonic::transport::{Channel, Endpoint};
use tonic::{Request, Response, Status};

use author_contract::{Author, AuthorBridge, AuthorError, CreateAuthor};

use super::from_wire;
use super::status::from_status;

/// Per-call deadline used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Calls a remote author service over gRPC.
///
/// The channel has its own lifecycle: it connects on first use, reconnects
/// on its own, and does not depend on any server in this process. Calls are
/// never retried here.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: AuthorServiceClient<Channel>,
    timeout: Duration,
}

impl RemoteClient {
    pub fn new(channel: Channel, timeout: Duration) -> Self {
        Self {
            client: AuthorServiceClient::new(channel),
            timeout,
        }
    }

    /// Build a client whose channel connects lazily to `endpoint`.
    ///
    /// Fails only if `endpoint` is not a valid URI; an unreachable provider
    /// shows up later as [`AuthorError::Unavailable`] on each call.
    pub fn connect_lazy(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, tonic::transport::Error> {
        let channel = Endpoint::from_shared(endpoint.into())?
            .connect_timeout(timeout)
            .timeout(timeout)
            .connect_lazy();
        Ok(Self::new(channel, timeout))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn request<T>(&self, message: T) -> Request<T> {
        let mut request = Request::new(message);
        request.set_timeout(self.timeout);
        request
    }

    /// Run one RPC under the client deadline and map every failure onto the
    /// bridge vocabulary.
    async fn call<T, F, Fut>(&self, operation: &'static str, rpc: F) -> Result<T, AuthorError>
    where
        F: FnOnce(AuthorServiceClient<Channel>) -> Fut,
        Fut: Future<Output = Result<Response<T>, Status>>,
    {
        match tokio::time::timeout(self.timeout, rpc(self.client.clone())).await {
            Ok(Ok(response)) => Ok(response.into_inner()),
            Ok(Err(status)) => Err(from_status(operation, &status)),
            Err(_) => {
                tracing::warn!(
                    operation = %operation,
                    timeout = ?self.timeout,
                    "author call timed out"
                );
                Err(AuthorError::Unavailable(format!(
                    "{operation} timed out after {:?}",
                    self.timeout
                )))
            }
        }
    }
}

fn malformed(operation: &str) -> AuthorError {
    AuthorError::Unavailable(format!("{operation} returned a reply without an author"))
}

#[async_trait]
impl AuthorBridge for RemoteClient {
    async fn get_author(&self, id: &str) -> Result<Author, AuthorError> {
        let request = self.request(GetAuthorRequest { id: id.to_string() });

        let reply = self
            .call("GetAuthor", |mut client| async move { client.get_author(request).await })
            .await?;

        reply.author.map(from_wire).ok_or_else(|| malformed("GetAuthor"))
    }

    async fn get_authors(&self, ids: &[String]) -> Result<Vec<Author>, AuthorError> {
        let request = self.request(GetAuthorsRequest { ids: ids.to_vec() });

        let reply = self
            .call("GetAuthors", |mut client| async move { client.get_authors(request).await })
            .await?;

        Ok(reply.authors.into_iter().map(from_wire).collect())
    }

    async fn create_author(&self, request: &CreateAuthor) -> Result<Author, AuthorError> {
        let request = self.request(CreateAuthorRequest {
            name: request.name.clone(),
            bio: request.bio.clone(),
        });

        let reply = self
            .call("CreateAuthor", |mut client| async move { client.create_author(request).await })
            .await?;

        reply.author.map(from_wire).ok_or_else(|| malformed("CreateAuthor"))
    }
}
