//! Error types for the chat server
//!
//! Defines connection-level errors and outbound delivery errors.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Application-level errors
///
/// Every variant is fatal for the connection it occurred on and for
/// nothing else. Usage errors live in `command::CommandError`.
#[derive(Debug, Error)]
pub enum AppError {
    /// WebSocket protocol error
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Line framing error (I/O failure or over-long line)
    #[error("Line codec error: {0}")]
    Lines(#[from] tokio_util::codec::LinesCodecError),

    /// Channel send error (internal channel broken)
    #[error("Channel send error")]
    ChannelSend,

    /// Peer closed the connection before sending a nickname
    #[error("Connection closed during handshake")]
    HandshakeAborted,

    /// Handshake reply longer than the line limit
    #[error("Nickname reply exceeds the line limit")]
    OversizedNickname,

    /// Peer sent an empty nickname
    #[error("Empty nickname")]
    EmptyNickname,
}

/// Message delivery errors
///
/// Occurs when a session's outbound queue cannot accept a message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SendError {
    /// The writer side of the connection is gone
    #[error("Channel closed")]
    ChannelClosed,

    /// The client is not draining its queue
    #[error("Channel full")]
    ChannelFull,
}
