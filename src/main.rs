//! Serves one tutorial lesson.
//!
//! Run with:
//!   RUST_LOG=info cargo run -- --lesson social
//!
//! Try:
//!   curl -X POST http://localhost:8000/posts \
//!        -H 'content-type: application/json' \
//!        -d '{"body":"hello"}'
//!   curl http://localhost:8000/posts/1

use clap::Parser;
use showcase::{Config, Server};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), showcase::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    info!(lesson = ?config.lesson, addr = %config.addr, "starting");

    Server::bind(config.addr).serve(config.lesson.router()).await
}
