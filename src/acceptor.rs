//! Connection acceptor
//!
//! Starts the ChatServer actor and accepts connections forever, giving
//! each one its own handler task.

use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::handler::handle_connection;
use crate::server::{ChatServer, ServerCommand};
use crate::transport::{tcp_lines, websocket_lines, TransportKind};

/// Channel buffer size for server commands
pub const COMMAND_BUFFER_SIZE: usize = 256;

/// Serve chat sessions on `listener` until the process exits
///
/// A failing connection only ends its own task.
pub async fn serve(listener: TcpListener, transport: TransportKind) {
    let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_BUFFER_SIZE);
    tokio::spawn(ChatServer::new(cmd_rx).run());

    info!("ChatServer actor started");

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                info!("New connection from {}", addr);
                let cmd_tx = cmd_tx.clone();

                tokio::spawn(async move {
                    if let Err(e) = serve_connection(stream, addr, transport, cmd_tx).await {
                        warn!("Connection from {} ended: {}", addr, e);
                    }
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}

async fn serve_connection(
    stream: TcpStream,
    addr: SocketAddr,
    transport: TransportKind,
    cmd_tx: mpsc::Sender<ServerCommand>,
) -> Result<(), AppError> {
    match transport {
        TransportKind::Tcp => handle_connection(tcp_lines(stream), cmd_tx).await,
        TransportKind::WebSocket => {
            let lines = websocket_lines(stream).await?;
            info!("WebSocket handshake completed for {}", addr);
            handle_connection(lines, cmd_tx).await
        }
    }
}
