use anyhow::Context;
use async_trait::async_trait;
use author_bridge::GrpcAuthorServer;
use supervisor::{ServiceUnit, Shutdown};
use tokio::net::TcpListener;

/// Serves the author bridge over gRPC for consumers in other processes.
pub struct AuthorGrpcUnit {
    addr: String,
    server: GrpcAuthorServer,
}

impl AuthorGrpcUnit {
    pub fn new(addr: impl Into<String>, server: GrpcAuthorServer) -> Self {
        Self {
            addr: addr.into(),
            server,
        }
    }
}

#[async_trait]
impl ServiceUnit for AuthorGrpcUnit {
    fn name(&self) -> &str {
        "author-grpc"
    }

    async fn run(self: Box<Self>, shutdown: Shutdown) -> anyhow::Result<()> {
        let listener = TcpListener::bind(&self.addr)
            .await
            .with_context(|| format!("failed to bind author gRPC listener on {}", self.addr))?;
        tracing::info!(addr = %listener.local_addr()?, "author gRPC server listening");

        let serve = self.server.serve(listener, shutdown.clone().cancelled_owned());

        match shutdown.drain(serve).await {
            Some(result) => {
                result.context("author gRPC server failed")?;
                tracing::info!("author gRPC server stopped");
            }
            None => tracing::warn!(
                grace = ?shutdown.grace(),
                "author gRPC server did not drain in time; dropping open connections"
            ),
        }
        Ok(())
    }
}
