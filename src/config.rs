//! Server configuration
//!
//! Everything comes from the command line; `RUST_LOG` controls logging.

use clap::Parser;

use crate::transport::TransportKind;

/// Default listening port
pub const DEFAULT_PORT: u16 = 55555;

#[derive(Parser, Debug, Clone)]
#[command(name = "chat_server")]
#[command(about = "Multi-room text chat server", long_about = None)]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Wire framing for client connections
    #[arg(short = 't', long, value_enum, default_value_t = TransportKind::Tcp)]
    pub transport: TransportKind,
}

impl ServerConfig {
    /// `host:port` string to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
