#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use author_bridge::{AuthorServer, CreateAuthor, GrpcAuthorServer, InProcessClient, RemoteClient};
use author_service::AuthorService;
use proto::author::v1::author_service_server::{
    AuthorService as AuthorServiceRpc, AuthorServiceServer,
};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;

pub const TIMEOUT: Duration = Duration::from_secs(2);

/// Both clients of one provider, plus the ids it was seeded with.
#[derive(Clone)]
pub struct Pair {
    pub in_process: InProcessClient,
    pub remote: RemoteClient,
    pub seeded: Vec<String>,
}

/// Seeds a provider, serves it over gRPC and builds a client of each kind.
pub async fn pair() -> Pair {
    let service = Arc::new(AuthorService::new());
    let server = Arc::new(AuthorServer::new(service));

    let in_process = InProcessClient::new(server.clone());
    let mut seeded = Vec::new();
    for (name, bio) in [("Ursula K. Le Guin", Some("Earthsea")), ("Stanisław Lem", None)] {
        let mut request = CreateAuthor::new(name);
        request.bio = bio.map(str::to_string);
        let author = author_bridge::AuthorBridge::create_author(&in_process, &request)
            .await
            .unwrap();
        seeded.push(author.id);
    }

    let addr = spawn_rpc(GrpcAuthorServer::new(server)).await;
    let remote = RemoteClient::connect_lazy(format!("http://{addr}"), TIMEOUT).unwrap();

    Pair {
        in_process,
        remote,
        seeded,
    }
}

/// Serves any `author.v1` implementation on an ephemeral local port.
pub async fn spawn_rpc<S: AuthorServiceRpc>(service: S) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(
        Server::builder()
            .add_service(AuthorServiceServer::new(service))
            .serve_with_incoming(TcpListenerStream::new(listener)),
    );
    addr
}
