use anyhow::{Context, Result};
use chrono::Utc;
use futures::{Sink, SinkExt, StreamExt};
use momentum_ipc::chat_messages::{CHAT_NAMESPACE, ClientEvent, ServerEvent};
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::http::StatusCode;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

const DEFAULT_ADDR: &str = "127.0.0.1:5000";

/// Delay between streamed chunks, so clients see a real stream
const CHUNK_DELAY: Duration = Duration::from_millis(60);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ADDR.to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Stub chat server listening on ws://{}{}", addr, CHAT_NAMESPACE);

    loop {
        let (stream, peer) = listener.accept().await?;
        tokio::spawn(async move {
            if let Err(e) = serve(stream).await {
                error!("Connection from {} failed: {:#}", peer, e);
            }
        });
    }
}

async fn serve(stream: TcpStream) -> Result<()> {
    let ws = tokio_tungstenite::accept_hdr_async(stream, check_namespace)
        .await
        .context("WebSocket handshake failed")?;
    let (mut tx, mut rx) = ws.split();

    let session_id = Uuid::new_v4().to_string();
    info!("Session {} connected", session_id);
    send(
        &mut tx,
        &ServerEvent::Connected {
            session_id: session_id.clone(),
            message: Some("Connected to AI chat assistant!".to_string()),
        },
    )
    .await?;

    while let Some(frame) = rx.next().await {
        let text = match frame? {
            WsMessage::Text(text) => text,
            WsMessage::Close(_) => break,
            _ => continue,
        };

        let event = match serde_json::from_str::<ClientEvent>(&text) {
            Ok(event) => event,
            Err(e) => {
                warn!("Bad client frame: {}", e);
                send(
                    &mut tx,
                    &ServerEvent::Error {
                        message: Some("Malformed event".to_string()),
                    },
                )
                .await?;
                continue;
            }
        };

        match event {
            ClientEvent::SendMessage { message, .. } => {
                debug!("Session {} says: {}", session_id, message);
                reply(&mut tx, &session_id, &message).await?;
            }
            ClientEvent::ClearHistory { .. } => {
                send(
                    &mut tx,
                    &ServerEvent::HistoryCleared {
                        message: Some("Chat history cleared".to_string()),
                    },
                )
                .await?;
            }
        }
    }

    info!("Session {} disconnected", session_id);
    Ok(())
}

/// Only the chat namespace accepts connections
fn check_namespace(request: &Request, response: Response) -> Result<Response, ErrorResponse> {
    if request.uri().path() == CHAT_NAMESPACE {
        return Ok(response);
    }
    warn!("Refusing connection to {}", request.uri().path());
    let mut refusal = ErrorResponse::new(Some(format!("Unknown namespace {}", request.uri().path())));
    *refusal.status_mut() = StatusCode::NOT_FOUND;
    Err(refusal)
}

/// Echoes the message back word by word, framed like a real streamed reply
async fn reply<S>(tx: &mut S, session_id: &str, message: &str) -> Result<()>
where
    S: Sink<WsMessage> + Unpin,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    if message.trim().is_empty() {
        return send(
            tx,
            &ServerEvent::Error {
                message: Some("Message cannot be empty".to_string()),
            },
        )
        .await;
    }

    let timestamp = Some(Utc::now().to_rfc3339());
    send(
        tx,
        &ServerEvent::UserMessage {
            message: message.to_string(),
            timestamp: timestamp.clone(),
        },
    )
    .await?;
    send(tx, &ServerEvent::AiTyping { typing: true }).await?;

    let answer = format!("You said: {}", message);
    for (i, word) in answer.split(' ').enumerate() {
        let chunk = if i == 0 {
            word.to_string()
        } else {
            format!(" {}", word)
        };
        tokio::time::sleep(CHUNK_DELAY).await;
        send(
            tx,
            &ServerEvent::AiResponseChunk {
                chunk,
                session_id: Some(session_id.to_string()),
            },
        )
        .await?;
    }

    send(tx, &ServerEvent::AiTyping { typing: false }).await?;
    send(
        tx,
        &ServerEvent::AiResponseComplete {
            message: Some(answer),
            timestamp,
        },
    )
    .await
}

async fn send<S>(tx: &mut S, event: &ServerEvent) -> Result<()>
where
    S: Sink<WsMessage> + Unpin,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    let frame = serde_json::to_string(event)?;
    tx.send(WsMessage::Text(frame)).await?;
    Ok(())
}
