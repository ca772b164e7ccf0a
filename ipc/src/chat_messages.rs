use serde::{Deserialize, Serialize};

/// Namespace path of the chat channel on the site.
pub const CHAT_NAMESPACE: &str = "/chat";

/// Represents an event sent from the client to the chat namespace.
///
/// On the wire every event is a JSON object `{"event": <name>, "data": {...}}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Submit one user message to the assistant.
    SendMessage { session_id: String, message: String },
    /// Ask the server to forget the conversation so far.
    ClearHistory { session_id: String },
}

/// Represents an event pushed by the chat namespace to the client.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// The server assigned a session identifier to this connection.
    Connected {
        session_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// Typing indicator toggle, independent of the chunk stream.
    AiTyping { typing: bool },
    /// Echo of the message the user sent.
    UserMessage {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
    },
    /// One fragment of the assistant's streamed reply.
    AiResponseChunk {
        chunk: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        session_id: Option<String>,
    },
    /// The streamed reply is complete.
    AiResponseComplete {
        /// Full reply text, when the server includes it.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
    },
    /// Conversation history was cleared on the server.
    HistoryCleared {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// Something went wrong handling a request. The connection stays open.
    Error {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl ServerEvent {
    /// Wire name of the event, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connected { .. } => "connected",
            Self::AiTyping { .. } => "ai_typing",
            Self::UserMessage { .. } => "user_message",
            Self::AiResponseChunk { .. } => "ai_response_chunk",
            Self::AiResponseComplete { .. } => "ai_response_complete",
            Self::HistoryCleared { .. } => "history_cleared",
            Self::Error { .. } => "error",
        }
    }
}

// Helper constructors for events the client emits.
impl ClientEvent {
    pub fn send_message(session_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SendMessage {
            session_id: session_id.into(),
            message: message.into(),
        }
    }

    pub fn clear_history(session_id: impl Into<String>) -> Self {
        Self::ClearHistory {
            session_id: session_id.into(),
        }
    }
}
