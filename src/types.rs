//! Basic type definitions for the chat server
//!
//! Provides newtype wrappers for type safety:
//! - `SessionId`: process-unique, connection-ordered session identifier
//! - `RoomName`: name of a chat room

use std::sync::atomic::{AtomicU64, Ordering};

/// Name of the room every session starts in
pub const DEFAULT_ROOM: &str = "general";

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Unique session identifier (newtype pattern)
///
/// Ids are handed out in increasing order, so ordering by `SessionId`
/// is ordering by connection time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(pub u64);

impl SessionId {
    /// Allocate the next session ID
    pub fn new() -> Self {
        Self(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Room name
///
/// Names are taken verbatim from `/join` and compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoomName(pub String);

impl RoomName {
    /// The default room
    pub fn default_room() -> Self {
        Self(DEFAULT_ROOM.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoomName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl std::fmt::Display for RoomName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
