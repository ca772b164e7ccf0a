use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use momentum_ipc::chat_messages::{ClientEvent, ServerEvent};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, instrument, warn};

use crate::errors::{ChatError, ChatResult};

/// Inbound item from a chat transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Message(ServerEvent),
    /// The channel is gone. Nothing follows.
    Closed,
}

/// A message-oriented, bidirectional channel to the chat namespace.
///
/// Events of one reply must be delivered in the order the server sent them.
#[async_trait]
pub trait ChatTransport: Send {
    async fn send(&mut self, event: &ClientEvent) -> ChatResult<()>;

    /// Waits for the next inbound event. Returns `Closed` once the channel ends.
    async fn recv(&mut self) -> TransportEvent;

    async fn close(&mut self) -> ChatResult<()> {
        Ok(())
    }
}

/// Opens transports to the chat namespace.
#[async_trait]
pub trait Connector: Send + Sync {
    type Transport: ChatTransport;

    async fn connect(&self) -> ChatResult<Self::Transport>;
}

/// Connects to the chat namespace over WebSocket, one JSON event per text frame.
#[derive(Debug, Clone)]
pub struct WsConnector {
    url: String,
}

impl WsConnector {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Connector for WsConnector {
    type Transport = WsTransport;

    #[instrument(skip(self), fields(url = %self.url))]
    async fn connect(&self) -> ChatResult<WsTransport> {
        debug!("Connecting to chat server...");
        let (stream, _response) = tokio_tungstenite::connect_async(self.url.as_str())
            .await
            .map_err(|e| ChatError::ConnectionError(format!("{}: {}", self.url, e)))?;
        info!("WebSocket open to {}", self.url);
        Ok(WsTransport { stream })
    }
}

/// WebSocket transport carrying `{"event", "data"}` JSON frames
pub struct WsTransport {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl ChatTransport for WsTransport {
    async fn send(&mut self, event: &ClientEvent) -> ChatResult<()> {
        let frame = serde_json::to_string(event)?;
        self.stream.send(WsMessage::Text(frame)).await?;
        Ok(())
    }

    async fn recv(&mut self) -> TransportEvent {
        loop {
            match self.stream.next().await {
                None => return TransportEvent::Closed,
                Some(Err(e)) => {
                    warn!("Chat transport failed: {}", e);
                    return TransportEvent::Closed;
                }
                Some(Ok(WsMessage::Text(text))) => match serde_json::from_str::<ServerEvent>(&text) {
                    Ok(event) => return TransportEvent::Message(event),
                    Err(e) => warn!("Skipping unrecognized chat frame: {}", e),
                },
                Some(Ok(WsMessage::Close(frame))) => {
                    debug!("Chat server closed the channel: {:?}", frame);
                    return TransportEvent::Closed;
                }
                // Pings are answered by tungstenite itself
                Some(Ok(_)) => {}
            }
        }
    }

    async fn close(&mut self) -> ChatResult<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}
