use momentum_ipc::chat_messages::ClientEvent;
use tracing::{debug, warn};

use crate::errors::{ChatError, ChatResult};
use crate::session::ChatSession;
use crate::transport::{ChatTransport, Connector, TransportEvent};
use crate::view::ChatView;

/// Owns one chat session and the transport it talks over.
///
/// Transport events are applied to the session one at a time, in arrival
/// order. Nothing here retries: a dropped transport leaves the session
/// disconnected until [`ChatController::open`] is called again.
pub struct ChatController<V: ChatView, C: Connector> {
    session: ChatSession<V>,
    connector: C,
    transport: Option<C::Transport>,
}

impl<V: ChatView, C: Connector> ChatController<V, C> {
    pub fn new(view: V, connector: C) -> Self {
        Self {
            session: ChatSession::new(view),
            connector,
            transport: None,
        }
    }

    pub fn session(&self) -> &ChatSession<V> {
        &self.session
    }

    pub fn has_transport(&self) -> bool {
        self.transport.is_some()
    }

    /// Opening the widget: connects unless a connection already exists.
    pub async fn open(&mut self) -> ChatResult<()> {
        if !self.session.begin_connect() {
            debug!("Chat already {}, not reconnecting", self.session.state());
            return Ok(());
        }

        match self.connector.connect().await {
            Ok(transport) => {
                self.transport = Some(transport);
                self.session.on_transport_open();
                Ok(())
            }
            Err(e) => {
                self.session.on_connect_failed(&e.to_string());
                Err(e)
            }
        }
    }

    /// Submits user text. Returns false when the session dropped it.
    pub async fn submit(&mut self, text: &str) -> ChatResult<bool> {
        match self.session.submit(text) {
            Some(event) => {
                self.emit(&event).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn clear_history(&mut self) -> ChatResult<bool> {
        match self.session.clear_history() {
            Some(event) => {
                self.emit(&event).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Waits for one transport event and applies it.
    ///
    /// Returns false when there is no transport or it just closed.
    pub async fn pump(&mut self) -> bool {
        let Some(transport) = self.transport.as_mut() else {
            return false;
        };

        match transport.recv().await {
            TransportEvent::Message(event) => {
                debug!("Chat event: {}", event.name());
                self.session.handle(event);
                true
            }
            TransportEvent::Closed => {
                self.transport = None;
                self.session.on_transport_closed();
                false
            }
        }
    }

    /// Closes the transport on shutdown. Closing the widget does not call this.
    pub async fn shutdown(&mut self) -> ChatResult<()> {
        if let Some(mut transport) = self.transport.take() {
            transport.close().await?;
        }
        Ok(())
    }

    async fn emit(&mut self, event: &ClientEvent) -> ChatResult<()> {
        let Some(transport) = self.transport.as_mut() else {
            return Err(ChatError::NotConnected);
        };

        if let Err(e) = transport.send(event).await {
            warn!("Failed to send chat event: {}", e);
            self.transport = None;
            self.session.on_transport_closed();
            return Err(e);
        }
        Ok(())
    }
}
