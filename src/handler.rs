//! Per-connection session handler
//!
//! Runs the nickname handshake, registers the session with the
//! ChatServer, then pumps lines in both directions until either side
//! ends. Exactly one `Disconnect` is sent per registered session.

use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::command::parse_input;
use crate::error::AppError;
use crate::message::{self, MAX_LINE_LENGTH, NICK_REQUEST};
use crate::server::ServerCommand;
use crate::session::OUTBOUND_BUFFER_SIZE;
use crate::types::SessionId;

/// Handle a framed connection
///
/// `transport` yields inbound text units and accepts outbound ones.
/// Read failures, over-long units and peer close all end the session
/// the same way.
pub async fn handle_connection<T, E>(
    mut transport: T,
    cmd_tx: mpsc::Sender<ServerCommand>,
) -> Result<(), AppError>
where
    T: Stream<Item = Result<String, E>> + Sink<String, Error = E> + Send + Unpin + 'static,
    E: std::fmt::Display + Send + 'static,
    AppError: From<E>,
{
    // Nickname handshake
    transport.send(NICK_REQUEST.to_string()).await?;
    let reply = match transport.next().await {
        Some(Ok(reply)) => reply,
        Some(Err(e)) => return Err(e.into()),
        None => return Err(AppError::HandshakeAborted),
    };
    if reply.len() > MAX_LINE_LENGTH {
        let _ = transport.close().await;
        return Err(AppError::OversizedNickname);
    }
    let Some(nickname) = message::sanitize_nickname(&reply) else {
        let _ = transport.close().await;
        return Err(AppError::EmptyNickname);
    };

    let session_id = SessionId::new();

    // Create channel for server -> client lines
    let (msg_tx, mut msg_rx) = mpsc::channel::<String>(OUTBOUND_BUFFER_SIZE);

    // Register with ChatServer
    if cmd_tx
        .send(ServerCommand::Connect {
            session_id,
            nickname: nickname.clone(),
            sender: msg_tx,
        })
        .await
        .is_err()
    {
        error!("Failed to register session {} - server closed", session_id);
        let _ = transport.close().await;
        return Err(AppError::ChannelSend);
    }

    info!("Session {} registered as '{}'", session_id, nickname);

    let (mut sink, mut stream) = transport.split();
    let cmd_tx_read = cmd_tx.clone();

    // Spawn read task (transport -> ServerCommand)
    let mut read_task = tokio::spawn(async move {
        while let Some(result) = stream.next().await {
            match result {
                Ok(line) => {
                    if line.len() > MAX_LINE_LENGTH {
                        warn!("Session {} sent an over-long line", session_id);
                        break;
                    }
                    let Some(input) = parse_input(&line) else {
                        continue;
                    };
                    if cmd_tx_read
                        .send(ServerCommand::Input { session_id, input })
                        .await
                        .is_err()
                    {
                        debug!("Server closed, ending read task for {}", session_id);
                        break;
                    }
                }
                Err(e) => {
                    warn!("Read error for {}: {}", session_id, e);
                    break;
                }
            }
        }
        debug!("Read task ended for {}", session_id);
    });

    // Spawn write task (queued lines -> transport)
    //
    // The queue closes when the ChatServer drops the session.
    let mut write_task = tokio::spawn(async move {
        while let Some(line) = msg_rx.recv().await {
            if let Err(e) = sink.send(line).await {
                debug!("Send failed for {}: {}", session_id, e);
                break;
            }
        }
        let _ = sink.close().await;
        debug!("Write task ended for {}", session_id);
    });

    // Whichever side finishes first takes the other down with it
    tokio::select! {
        _ = &mut read_task => {
            write_task.abort();
        }
        _ = &mut write_task => {
            read_task.abort();
        }
    }

    let _ = cmd_tx.send(ServerCommand::Disconnect { session_id }).await;

    info!("Session {} disconnected", session_id);

    Ok(())
}
