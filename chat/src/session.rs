use momentum_ipc::chat_messages::{ClientEvent, ServerEvent};
use tracing::{debug, info, warn};

use crate::state::ConnectionState;
use crate::view::{ChatView, NoticeLevel};

/// First assistant message shown in an empty transcript
pub const GREETING: &str = "Hi! I'm your AI assistant. How can I help you today?";
pub const DISCONNECTED_NOTICE: &str = "Disconnected from chat. Please reconnect to continue.";
pub const DEFAULT_ERROR_NOTICE: &str = "An error occurred";

/// One logical conversation over the chat channel.
///
/// The session owns at most one in-progress assistant message. It is
/// created lazily by the first chunk of a reply and released when the reply
/// completes, fails, or the transport drops.
pub struct ChatSession<V: ChatView> {
    view: V,
    state: ConnectionState,
    session_id: Option<String>,
    pending: Option<V::Placeholder>,
    typing: bool,
}

impl<V: ChatView> ChatSession<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            state: ConnectionState::Idle,
            session_id: None,
            pending: None,
            typing: false,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    pub fn has_pending_message(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Moves to `Connecting` if no connection exists yet.
    ///
    /// Returns true when the caller should open a transport.
    pub fn begin_connect(&mut self) -> bool {
        if !self.state.can_connect() {
            return false;
        }
        debug!("Chat session {} -> connecting", self.state);
        self.state = ConnectionState::Connecting;
        self.session_id = None;
        true
    }

    /// The transport is open; the session id is still pending.
    pub fn on_transport_open(&mut self) {
        info!("Connected to chat server");
    }

    pub fn on_connect_failed(&mut self, reason: &str) {
        warn!("Could not connect to chat server: {}", reason);
        self.state = ConnectionState::Disconnected;
        self.view.append_notice(
            NoticeLevel::Error,
            "Could not connect to chat. Please try again later.",
        );
        self.view.scroll_to_bottom();
    }

    /// The transport dropped. No automatic retry.
    pub fn on_transport_closed(&mut self) {
        if !matches!(
            self.state,
            ConnectionState::Connecting | ConnectionState::Ready | ConnectionState::Receiving
        ) {
            return;
        }
        info!("Disconnected from chat server");
        self.state = ConnectionState::Disconnected;
        self.release_pending();
        self.hide_typing();
        self.view.append_notice(NoticeLevel::Warning, DISCONNECTED_NOTICE);
        self.view.scroll_to_bottom();
    }

    /// Applies one server event, in arrival order.
    pub fn handle(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::Connected { session_id, .. } => self.on_connected(session_id),
            ServerEvent::AiTyping { typing } => {
                if !self.guard_connected("ai_typing") {
                    return;
                }
                if typing {
                    self.show_typing();
                } else {
                    self.hide_typing();
                }
            }
            ServerEvent::UserMessage { .. } => {
                // Already rendered optimistically on submit
                debug!("Server echoed user message");
            }
            ServerEvent::AiResponseChunk { chunk, .. } => self.on_chunk(&chunk),
            ServerEvent::AiResponseComplete { .. } => {
                if !self.guard_connected("ai_response_complete") {
                    return;
                }
                self.release_pending();
                self.hide_typing();
                self.state = ConnectionState::Ready;
                self.view.scroll_to_bottom();
            }
            ServerEvent::HistoryCleared { .. } => {
                debug!("Server cleared the conversation history");
            }
            ServerEvent::Error { message } => {
                let message = message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_ERROR_NOTICE.to_string());
                warn!("Chat server reported an error: {}", message);
                self.hide_typing();
                // A failed reply never resumes; the next chunk starts a new message
                self.release_pending();
                if self.state == ConnectionState::Receiving {
                    self.state = ConnectionState::Ready;
                }
                self.view.append_notice(NoticeLevel::Error, &message);
                self.view.scroll_to_bottom();
            }
        }
    }

    /// Renders the user's message and returns the event to send.
    ///
    /// Returns `None` (and renders nothing) when the trimmed message is empty
    /// or the session is not connected.
    pub fn submit(&mut self, raw: &str) -> Option<ClientEvent> {
        let message = raw.trim();
        if message.is_empty() || !self.state.is_connected() {
            return None;
        }
        let session_id = self.session_id.clone()?;

        self.view.append_user_message(message);
        self.view.scroll_to_bottom();
        Some(ClientEvent::send_message(session_id, message))
    }

    /// Resets the transcript and returns the `clear_history` event to send.
    pub fn clear_history(&mut self) -> Option<ClientEvent> {
        if !self.state.is_connected() {
            return None;
        }
        let session_id = self.session_id.clone()?;

        self.release_pending();
        self.typing = false;
        self.state = ConnectionState::Ready;
        self.view.reset(GREETING);
        Some(ClientEvent::clear_history(session_id))
    }

    fn on_connected(&mut self, session_id: String) {
        match self.state {
            ConnectionState::Connecting => {
                info!("Chat session ID: {}", session_id);
                self.session_id = Some(session_id);
                self.state = ConnectionState::Ready;
            }
            ConnectionState::Ready | ConnectionState::Receiving => {
                info!("Chat session ID reassigned: {}", session_id);
                self.session_id = Some(session_id);
            }
            ConnectionState::Idle | ConnectionState::Disconnected => {
                warn!("Ignoring session assignment while {}", self.state);
            }
        }
    }

    fn on_chunk(&mut self, chunk: &str) {
        if !self.guard_connected("ai_response_chunk") {
            return;
        }
        if self.pending.is_none() {
            self.state = ConnectionState::Receiving;
            self.pending = Some(self.view.open_assistant_message());
        }
        if let Some(placeholder) = self.pending.as_mut() {
            self.view.append_chunk(placeholder, chunk);
        }
        self.view.scroll_to_bottom();
    }

    fn guard_connected(&self, event: &str) -> bool {
        if self.state.is_connected() {
            return true;
        }
        warn!("Ignoring {} while {}", event, self.state);
        false
    }

    fn release_pending(&mut self) {
        if let Some(placeholder) = self.pending.take() {
            self.view.finish_assistant_message(placeholder);
        }
    }

    fn show_typing(&mut self) {
        if self.typing {
            return;
        }
        self.typing = true;
        self.view.show_typing();
        self.view.scroll_to_bottom();
    }

    fn hide_typing(&mut self) {
        if self.typing {
            self.view.hide_typing();
        }
        self.typing = false;
    }
}
