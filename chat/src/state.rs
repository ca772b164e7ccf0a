use std::fmt;

/// Lifecycle of the chat connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionState {
    /// Widget never opened
    #[default]
    Idle,
    /// Channel opening, no session id yet
    Connecting,
    Ready,
    /// A streamed reply is arriving
    Receiving,
    /// Transport dropped; stays here until an explicit reconnect
    Disconnected,
}

impl ConnectionState {
    /// True once the server has assigned a session and the channel is up.
    pub fn is_connected(self) -> bool {
        matches!(self, Self::Ready | Self::Receiving)
    }

    /// States from which opening the widget starts a new connection.
    pub fn can_connect(self) -> bool {
        matches!(self, Self::Idle | Self::Disconnected)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::Ready => "ready",
            Self::Receiving => "receiving",
            Self::Disconnected => "disconnected",
        };
        f.write_str(name)
    }
}
