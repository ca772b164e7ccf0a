use thiserror::Error;

/// Chat channel errors
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Connection Error: {0}")]
    ConnectionError(String),

    #[error("Chat channel is not connected")]
    NotConnected,

    #[error(transparent)]
    WebSocketError(#[from] tokio_tungstenite::tungstenite::Error),

    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
}

/// Result type for chat operations
pub type ChatResult<T> = Result<T, ChatError>;
