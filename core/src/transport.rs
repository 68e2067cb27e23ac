use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("channel is not open")]
    NotOpen,
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// Duplex text channel to the game server.
///
/// Sending never blocks; inbound traffic and lifecycle changes arrive as [`TransportEvent`]s through whatever
/// callback mechanism the runtime provides.
pub trait Transport {
    fn is_open(&self) -> bool;

    fn send(&mut self, frame: &str) -> Result<(), TransportError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportEvent {
    Opened,
    Closed(String),
    Errored(String),
    Received(String),
}
