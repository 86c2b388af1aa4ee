//! Session struct definition
//!
//! Represents one connected client: identity, current room and the
//! queue feeding its connection's writer task.

use tokio::sync::mpsc::{self, error::TrySendError};

use crate::error::SendError;
use crate::types::{RoomName, SessionId};

/// Capacity of each session's outbound queue
pub const OUTBOUND_BUFFER_SIZE: usize = 256;

/// Connected session information
///
/// Owned by the `ChatServer` actor. Dropping a session drops the only
/// sender of its outbound queue, which makes the writer task close
/// the transport.
#[derive(Debug)]
pub struct Session {
    /// Unique identifier for this session
    pub id: SessionId,
    /// Nickname chosen at handshake (not unique)
    pub nickname: String,
    /// Room this session is currently in
    pub room: RoomName,
    /// Server → Client line channel
    sender: mpsc::Sender<String>,
}

impl Session {
    /// Create a new session in the default room
    pub fn new(id: SessionId, nickname: String, sender: mpsc::Sender<String>) -> Self {
        Self {
            id,
            nickname,
            room: RoomName::default_room(),
            sender,
        }
    }

    /// Queue a line for this session without waiting
    ///
    /// A full queue is reported like a closed one; the caller treats
    /// both as a broken transport.
    pub fn deliver(&self, line: String) -> Result<(), SendError> {
        self.sender.try_send(line).map_err(|e| match e {
            TrySendError::Closed(_) => SendError::ChannelClosed,
            TrySendError::Full(_) => SendError::ChannelFull,
        })
    }
}
