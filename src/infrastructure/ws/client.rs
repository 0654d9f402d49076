use crate::core::session::transport::{Connector, FrameSink, FrameStream};
use crate::domain::error::{ShadeComError, ShadeComResult};
use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};

type WsTransport = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket implementation of the session transport seam.
pub struct WsConnector {
    connect_timeout: Duration,
}

impl WsConnector {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

#[async_trait]
impl Connector for WsConnector {
    async fn connect(
        &self,
        endpoint: &str,
    ) -> ShadeComResult<(Box<dyn FrameSink>, Box<dyn FrameStream>)> {
        let (ws_stream, response) =
            tokio::time::timeout(self.connect_timeout, connect_async(endpoint))
                .await
                .map_err(|_| ShadeComError::ConnectTimeout {
                    endpoint: endpoint.to_string(),
                })?
                .map_err(|e| ShadeComError::WebSocket(e.to_string()))?;

        debug!("WebSocket handshake completed: HTTP {}", response.status());

        let (write, read) = ws_stream.split();
        Ok((Box::new(WsSink { write }), Box::new(WsReader { read })))
    }
}

struct WsSink {
    write: SplitSink<WsTransport, Message>,
}

#[async_trait]
impl FrameSink for WsSink {
    async fn send(&mut self, frame: String) -> ShadeComResult<()> {
        self.write
            .send(Message::Text(frame))
            .await
            .map_err(|e| ShadeComError::WebSocket(e.to_string()))
    }
}

struct WsReader {
    read: SplitStream<WsTransport>,
}

#[async_trait]
impl FrameStream for WsReader {
    async fn next(&mut self) -> Option<String> {
        // Control frames (ping/pong) and binary frames are consumed here;
        // only text frames carry status messages.
        loop {
            match self.read.next().await? {
                Ok(Message::Text(text)) => return Some(text),
                Ok(Message::Close(_)) => {
                    debug!("Received close frame");
                    return None;
                }
                Ok(other) => {
                    debug!("Ignoring non-text frame ({} bytes)", other.len());
                }
                Err(e) => {
                    // Errors and closure take the same path: end of stream.
                    warn!("WebSocket receive error: {e}");
                    return None;
                }
            }
        }
    }
}
