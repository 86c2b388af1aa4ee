//! Transport framing
//!
//! Turns an accepted TCP stream into a stream + sink of text units.
//! Plain TCP is newline delimited; WebSocket uses one text frame per unit.

use futures_util::{future, Sink, SinkExt, Stream, TryStreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_util::codec::{Framed, LinesCodec};

use crate::error::AppError;
use crate::message::MAX_LINE_LENGTH;

/// Wire framing used by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TransportKind {
    /// Newline-delimited UTF-8 over raw TCP
    Tcp,
    /// One WebSocket text frame per unit
    #[value(name = "websocket")]
    WebSocket,
}

/// Frame a TCP stream as `\n`-terminated lines
///
/// Lines longer than `MAX_LINE_LENGTH` surface as a read error.
pub fn tcp_lines(stream: TcpStream) -> Framed<TcpStream, LinesCodec> {
    Framed::new(stream, LinesCodec::new_with_max_length(MAX_LINE_LENGTH))
}

/// Perform the WebSocket upgrade and expose text frames as lines
///
/// Binary, ping and pong frames are skipped.
pub async fn websocket_lines(
    stream: TcpStream,
) -> Result<
    impl Stream<Item = Result<String, WsError>> + Sink<String, Error = WsError> + Send + Unpin,
    AppError,
> {
    let ws_stream = tokio_tungstenite::accept_async(stream).await?;

    Ok(ws_stream
        .with(|line: String| future::ready(Ok::<_, WsError>(Message::Text(line.into()))))
        .try_filter_map(|msg| future::ready(Ok(text_payload(msg)))))
}

fn text_payload(msg: Message) -> Option<String> {
    match msg {
        Message::Text(text) => Some(text.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use tokio::net::TcpListener;

    #[test]
    fn test_text_payload_filters_control_frames() {
        assert_eq!(
            text_payload(Message::Text("hi".into())),
            Some("hi".to_string())
        );
        assert_eq!(text_payload(Message::Binary(vec![1, 2].into())), None);
        assert_eq!(text_payload(Message::Ping(Vec::new().into())), None);
    }

    #[tokio::test]
    async fn test_tcp_lines_framing() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let client = tokio::spawn(async move {
            let stream = TcpStream::connect(addr).await.unwrap();
            let mut lines = tcp_lines(stream);
            lines.send("hello\r".to_string()).await.unwrap();
            lines.send("x".repeat(MAX_LINE_LENGTH + 1)).await.unwrap();
        });

        let (stream, _) = listener.accept().await.unwrap();
        let mut lines = tcp_lines(stream);

        assert_eq!(lines.next().await.unwrap().unwrap(), "hello");
        assert!(lines.next().await.unwrap().is_err());
        client.await.unwrap();
    }

    #[tokio::test]
    async fn test_websocket_lines_framing() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let client = tokio::spawn(async move {
            let (mut ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
                .await
                .unwrap();
            ws.send(Message::Binary(vec![0].into())).await.unwrap();
            ws.send(Message::Text("hello".into())).await.unwrap();
            let reply = ws.next().await.unwrap().unwrap();
            assert_eq!(reply, Message::Text("welcome".into()));
        });

        let (stream, _) = listener.accept().await.unwrap();
        let mut lines = websocket_lines(stream).await.unwrap();

        assert_eq!(lines.next().await.unwrap().unwrap(), "hello");
        lines.send("welcome".to_string()).await.unwrap();
        client.await.unwrap();
    }
}
