//! Multi-room Text Chat Server Library
//!
//! A line-oriented chat server built on tokio using the Actor pattern
//! for state management.
//!
//! # Features
//! - Nickname handshake on connect
//! - Default `general` room plus rooms created on first `/join`
//! - Room-wide chat with timestamped delivery
//! - Commands: `/help`, `/private`, `/list`, `/join`, `/rooms`
//! - Newline-delimited TCP or WebSocket transport
//!
//! # Architecture
//! Uses the Actor pattern with `mpsc` channels:
//! - `ChatServer` is the central actor owning sessions and rooms
//! - Each connection has a `handler` task communicating with the server
//! - No locks needed - all state access goes through message passing
//!
//! # Example
//! ```ignore
//! use tokio::net::TcpListener;
//! use room_chat::{serve, TransportKind};
//!
//! #[tokio::main]
//! async fn main() {
//!     let listener = TcpListener::bind("127.0.0.1:55555").await.unwrap();
//!     serve(listener, TransportKind::Tcp).await;
//! }
//! ```

pub mod acceptor;
pub mod command;
pub mod config;
pub mod error;
pub mod handler;
pub mod logger;
pub mod message;
pub mod room;
pub mod server;
pub mod session;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use acceptor::serve;
pub use command::{Command, CommandError, Input};
pub use config::ServerConfig;
pub use error::{AppError, SendError};
pub use handler::handle_connection;
pub use room::{Room, RoomDirectory};
pub use server::{ChatServer, ServerCommand};
pub use session::Session;
pub use transport::TransportKind;
pub use types::{RoomName, SessionId};
