//! Transport failures of the remote client never leak past the bridge.

mod common;

use std::time::Duration;

use author_bridge::{remote::to_status, AuthorBridge, AuthorError, RemoteClient};
use proto::author::v1::author_service_server::AuthorService as AuthorServiceRpc;
use proto::author::v1::{
    AuthorReply, AuthorsReply, CreateAuthorRequest, GetAuthorRequest, GetAuthorsRequest,
};
use tokio::net::TcpListener;
use tonic::{Request, Response, Status};

/// Replies with structurally broken or bare transport errors.
struct Misbehaving;

#[tonic::async_trait]
impl AuthorServiceRpc for Misbehaving {
    async fn get_author(
        &self,
        _request: Request<GetAuthorRequest>,
    ) -> Result<Response<AuthorReply>, Status> {
        Ok(Response::new(AuthorReply { author: None }))
    }

    async fn get_authors(
        &self,
        _request: Request<GetAuthorsRequest>,
    ) -> Result<Response<AuthorsReply>, Status> {
        Err(Status::internal("panic in handler"))
    }

    async fn create_author(
        &self,
        _request: Request<CreateAuthorRequest>,
    ) -> Result<Response<AuthorReply>, Status> {
        Err(to_status(&AuthorError::Internal("storage offline".to_string())))
    }
}

#[tokio::test]
async fn test_connection_refused_is_unavailable() {
    // Bind then drop, so nothing listens on the port.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client =
        RemoteClient::connect_lazy(format!("http://{addr}"), Duration::from_secs(1)).unwrap();

    let result = client.get_author("6f1c2a4e-8d1b-4c55-9a0e-3b7f2d9c1e80").await;
    assert!(matches!(result, Err(AuthorError::Unavailable(_))), "{result:?}");
    let result = client.get_authors(&[]).await;
    assert!(matches!(result, Err(AuthorError::Unavailable(_))), "{result:?}");
}

#[tokio::test]
async fn test_silent_peer_times_out_as_unavailable() {
    // Accepts TCP connections but never speaks HTTP/2.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let client =
        RemoteClient::connect_lazy(format!("http://{addr}"), Duration::from_millis(200)).unwrap();

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        client.get_author("6f1c2a4e-8d1b-4c55-9a0e-3b7f2d9c1e80"),
    )
    .await
    .expect("client deadline must bound the call");
    assert!(matches!(result, Err(AuthorError::Unavailable(_))), "{result:?}");
}

#[tokio::test]
async fn test_misbehaving_provider_maps_to_bridge_errors() {
    let addr = common::spawn_rpc(Misbehaving).await;
    let client = RemoteClient::connect_lazy(format!("http://{addr}"), common::TIMEOUT).unwrap();

    let missing_author = client.get_author("anything").await;
    assert!(matches!(missing_author, Err(AuthorError::Unavailable(_))), "{missing_author:?}");

    let bare_status = client.get_authors(&[]).await;
    assert!(matches!(bare_status, Err(AuthorError::Unavailable(_))), "{bare_status:?}");

    let tagged = client
        .create_author(&author_bridge::CreateAuthor::new("Anyone"))
        .await;
    assert_eq!(tagged, Err(AuthorError::Internal("storage offline".to_string())));
}

#[tokio::test]
async fn test_invalid_endpoint_fails_at_wiring() {
    assert!(RemoteClient::connect_lazy("not a uri", common::TIMEOUT).is_err());
}
