//! Streaming chat session
//!
//! [`ChatSession`] is a synchronous state machine over one logical
//! conversation: it tracks the server-assigned session id, the connection
//! state, the typing indicator and the single in-progress assistant message.
//! [`ChatController`] owns a session together with a [`ChatTransport`] and
//! feeds transport events to it in order.

pub mod controller;
pub mod errors;
pub mod session;
pub mod state;
pub mod transport;
pub mod view;

pub use controller::ChatController;
pub use errors::{ChatError, ChatResult};
pub use session::ChatSession;
pub use state::ConnectionState;
pub use transport::{ChatTransport, Connector, TransportEvent, WsConnector, WsTransport};
pub use view::{ChatView, EntryKind, NoticeLevel, TranscriptEntry, TranscriptView};
