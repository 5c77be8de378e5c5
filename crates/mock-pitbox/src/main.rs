//! Mock Pit Box backend for local development.
//!
//! Serves the same `/`, `/health` and `/chat` surface as the real
//! assistant service, answering with canned race-engineer replies.

mod error;
mod routes;

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use crate::routes::MockState;

/// Mock Pit Box AI backend.
#[derive(Parser, Debug)]
#[command(name = "mock-pitbox", about = "Mock Pit Box AI backend")]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "MOCK_PITBOX_PORT", default_value_t = 8765)]
    port: u16,

    /// Artificial delay before each chat reply, in milliseconds.
    #[arg(long, default_value_t = 0)]
    latency_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging (controlled via RUST_LOG env var).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let app = routes::router(MockState {
        latency: Duration::from_millis(args.latency_ms),
    });

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(address = %addr, latency_ms = args.latency_ms, "mock backend listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
