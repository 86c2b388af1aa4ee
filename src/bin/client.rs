//! Terminal chat client
//!
//! Answers the server's nickname request, prints whatever the server
//! sends and forwards stdin lines. `/quit` closes the connection
//! without involving the server.

use std::io::Write;

use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tracing::debug;

use room_chat::config::DEFAULT_PORT;
use room_chat::logger::setup_logger;
use room_chat::message::{sanitize_nickname, NICK_REQUEST};
use room_chat::transport::tcp_lines;

#[derive(Parser, Debug)]
#[command(name = "chat_client")]
#[command(about = "Terminal client for the chat server", long_about = None)]
struct Args {
    /// Server host
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Nickname (prompted for when omitted)
    #[arg(short, long)]
    nickname: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    let args = Args::parse();
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();

    let raw_nickname = match args.nickname {
        Some(nickname) => nickname,
        None => {
            print!("Choose a nickname: ");
            std::io::stdout().flush()?;
            stdin.next_line().await?.unwrap_or_default()
        }
    };
    let nickname = sanitize_nickname(&raw_nickname).ok_or("nickname must not be empty")?;

    let stream = TcpStream::connect((args.host.as_str(), args.port)).await?;
    let mut server = tcp_lines(stream);
    println!("Connected to server! Type /help for available commands.");

    loop {
        tokio::select! {
            incoming = server.next() => match incoming {
                Some(Ok(line)) if line == NICK_REQUEST => {
                    server.send(nickname.clone()).await?;
                }
                Some(Ok(line)) => println!("{line}"),
                Some(Err(e)) => {
                    debug!("Read error: {}", e);
                    println!("Lost connection to server");
                    break;
                }
                None => {
                    println!("Lost connection to server");
                    break;
                }
            },
            input = stdin.next_line() => match input? {
                Some(line) if line.trim().eq_ignore_ascii_case("/quit") => {
                    SinkExt::<String>::close(&mut server).await?;
                    break;
                }
                Some(line) => server.send(line).await?,
                // stdin closed
                None => break,
            },
        }
    }

    Ok(())
}
