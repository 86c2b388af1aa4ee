//! Multi-room Chat Server - Entry Point
//!
//! Parses the command line, binds the listener and serves forever.

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use room_chat::logger::setup_logger;
use room_chat::{serve, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Use RUST_LOG env var to override, e.g. RUST_LOG=room_chat=debug
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = ServerConfig::parse();
    let addr = config.bind_addr();

    // Start TCP listener
    let listener = TcpListener::bind(&addr).await?;
    info!("Chat server listening on {} ({:?})", addr, config.transport);

    serve(listener, config.transport).await;

    Ok(())
}
