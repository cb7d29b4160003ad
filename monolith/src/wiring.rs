//! Composition root
//!
//! The only place that names concrete adapters. Construction runs in
//! dependency order: author internals, then the author server, then the
//! client book will use, then book internals. Book sees the client only as
//! `Arc<dyn AuthorBridge>`.

use std::sync::Arc;

use author_bridge::{AuthorBridge, AuthorServer, GrpcAuthorServer, InProcessClient, RemoteClient};
use author_service::AuthorService;
use book_service::BookService;
use supervisor::ServiceUnit;
use thiserror::Error;

use crate::config::{BridgeMode, MonolithConfig, UnitKind};
use crate::http::{build_router, AppState};
use crate::units::{AuthorGrpcUnit, BookHttpUnit};

/// Wiring errors
#[derive(Error, Debug)]
pub enum WiringError {
    #[error("AUTHOR_BRIDGE=remote requires AUTHOR_ENDPOINT")]
    MissingEndpoint,

    #[error("in-process author bridge selected but no author provider was built")]
    NoLocalProvider,

    #[error("invalid AUTHOR_ENDPOINT `{endpoint}`")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: tonic::transport::Error,
    },
}

/// Services built for this process, before any unit runs.
pub struct Services {
    /// Present when the author service lives in this process.
    pub authors: Option<Arc<AuthorServer>>,
    /// Present when the book unit is hosted.
    pub books: Option<Arc<BookService>>,
}

/// Build the service graph for `config`.
pub fn build_services(config: &MonolithConfig) -> Result<Services, WiringError> {
    let needs_local_authors = config.hosts(UnitKind::Author)
        || (config.hosts(UnitKind::Book) && config.author_bridge == BridgeMode::InProcess);

    let authors = needs_local_authors.then(|| {
        let service = Arc::new(AuthorService::new());
        Arc::new(AuthorServer::new(service))
    });

    let books = if config.hosts(UnitKind::Book) {
        let client = author_client(config, authors.as_ref())?;
        Some(Arc::new(BookService::new(client)))
    } else {
        None
    };

    Ok(Services { authors, books })
}

/// Pick the adapter book uses to reach author.
fn author_client(
    config: &MonolithConfig,
    local: Option<&Arc<AuthorServer>>,
) -> Result<Arc<dyn AuthorBridge>, WiringError> {
    match (config.author_bridge, local) {
        (BridgeMode::InProcess, Some(server)) => {
            tracing::info!("book -> author: in-process");
            Ok(Arc::new(InProcessClient::new(server.clone())))
        }
        (BridgeMode::InProcess, None) => Err(WiringError::NoLocalProvider),
        (BridgeMode::Remote, _) => {
            let endpoint = config
                .author_endpoint
                .clone()
                .ok_or(WiringError::MissingEndpoint)?;
            let client = RemoteClient::connect_lazy(endpoint.clone(), config.author_timeout())
                .map_err(|source| WiringError::InvalidEndpoint {
                    endpoint: endpoint.clone(),
                    source,
                })?;
            tracing::info!(
                endpoint = %endpoint,
                timeout = ?config.author_timeout(),
                "book -> author: remote"
            );
            Ok(Arc::new(client))
        }
    }
}

/// Build every unit this process hosts, in dependency order.
pub fn compose(config: &MonolithConfig) -> anyhow::Result<Vec<Box<dyn ServiceUnit>>> {
    let services = build_services(config)?;
    let mut units: Vec<Box<dyn ServiceUnit>> = Vec::new();

    if config.hosts(UnitKind::Author) {
        if let Some(authors) = &services.authors {
            let server = GrpcAuthorServer::new(authors.clone());
            units.push(Box::new(AuthorGrpcUnit::new(&config.author_grpc_addr, server)));
        }
    }

    if let Some(books) = services.books {
        let router = build_router(AppState {
            books,
            version: config.version.clone(),
        });
        units.push(Box::new(BookHttpUnit::new(&config.http_addr, router)));
    }

    tracing::info!(units = units.len(), "service graph wired");
    Ok(units)
}
