//! Monolith main entry point
//!
//! Hosts the author and book services in one process (or a subset of them,
//! per `MONOLITH_UNITS`) and runs them under shared-fate supervision.

use std::process::ExitCode;

use supervisor::{wait_for_shutdown_signal, CancellationToken, Supervisor};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use monolith::{compose, MonolithConfig};

async fn run_server() -> anyhow::Result<()> {
    // Load configuration
    let config = MonolithConfig::from_env()?;
    tracing::info!("Starting Monolith v{}", config.version);
    tracing::info!(units = ?config.units, bridge = ?config.author_bridge, "configuration loaded");

    let units = compose(&config)?;

    // OS signals stop the whole group
    let root = CancellationToken::new();
    let signal_token = root.clone();
    tokio::spawn(async move {
        match wait_for_shutdown_signal().await {
            Ok(signal) => tracing::info!(%signal, "stopping all units"),
            Err(e) => tracing::error!(error = %e, "failed to listen for shutdown signals"),
        }
        signal_token.cancel();
    });

    Supervisor::new(config.grace_period())
        .supervise(units, &root)
        .await?;

    tracing::info!("Monolith stopped");
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--help" | "-h" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_help();
                return ExitCode::FAILURE;
            }
        }
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "monolith=info,supervisor=info,author_bridge=info,book_service=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run_server()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Monolith failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    println!("Monolith - author and book services under one supervisor");
    println!();
    println!("Usage:");
    println!("  monolith                 Run the configured units until a signal or a failure");
    println!("  monolith --help          Show this message");
    println!();
    println!("Environment Variables:");
    println!("  MONOLITH_UNITS           Units to host: author,book (default: both)");
    println!("  HTTP_ADDR                Book HTTP listen address (default: 127.0.0.1:8080)");
    println!("  AUTHOR_GRPC_ADDR         Author gRPC listen address (default: 127.0.0.1:50061)");
    println!("  AUTHOR_BRIDGE            inprocess | remote (default: inprocess)");
    println!("  AUTHOR_ENDPOINT          Remote author endpoint, e.g. http://127.0.0.1:50061");
    println!("  AUTHOR_TIMEOUT_MS        Deadline per remote author call (default: 3000)");
    println!("  GRACE_PERIOD_SECS        Time units get to stop after cancellation (default: 5)");
    println!("  RUST_LOG                 Log filter (default: monolith=info,supervisor=info,...)");
}
