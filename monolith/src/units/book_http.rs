use anyhow::Context;
use async_trait::async_trait;
use axum::Router;
use supervisor::{ServiceUnit, Shutdown};
use tokio::net::TcpListener;

/// Serves the book HTTP API.
pub struct BookHttpUnit {
    addr: String,
    router: Router,
}

impl BookHttpUnit {
    pub fn new(addr: impl Into<String>, router: Router) -> Self {
        Self {
            addr: addr.into(),
            router,
        }
    }
}

#[async_trait]
impl ServiceUnit for BookHttpUnit {
    fn name(&self) -> &str {
        "book-http"
    }

    async fn run(self: Box<Self>, shutdown: Shutdown) -> anyhow::Result<()> {
        let listener = TcpListener::bind(&self.addr)
            .await
            .with_context(|| format!("failed to bind book HTTP listener on {}", self.addr))?;
        tracing::info!(addr = %listener.local_addr()?, "book HTTP server listening");

        let serve = axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.clone().cancelled_owned());

        match shutdown.drain(serve).await {
            Some(result) => {
                result.context("book HTTP server failed")?;
                tracing::info!("book HTTP server stopped");
            }
            None => tracing::warn!(
                grace = ?shutdown.grace(),
                "book HTTP server did not drain in time; dropping open connections"
            ),
        }
        Ok(())
    }
}
