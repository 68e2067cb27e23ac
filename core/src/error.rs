use memtile_protocol::CodecError;
use thiserror::Error;

use crate::{SessionStatus, TransportError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Transport unavailable: {0}")]
    TransportUnavailable(#[from] TransportError),
    #[error("Malformed message: {0}")]
    MalformedMessage(String),
    #[error("Unknown message type: {}", .0.as_deref().unwrap_or("<missing>"))]
    UnknownMessageType(Option<String>),
    #[error("Cannot {action} while {status}")]
    InvalidStateTransition {
        action: &'static str,
        status: SessionStatus,
    },
    #[error("Tile {index} is outside a board of {size} tiles")]
    TileOutOfRange { index: usize, size: usize },
    #[error("Tile {index} cannot be flipped right now")]
    TileLocked { index: usize },
    #[error("Game index {index} does not fit the wire format")]
    InvalidGameIndex { index: usize },
    #[error("A board of {size} tiles cannot be played, expected an even size between 2 and {max}")]
    InvalidBoardSize { size: u32, max: u32 },
    #[error("A player name is required to start or join a game")]
    EmptyPlayerName,
}

impl ClientError {
    /// Whether the error has to be shown to the player: client and server no longer agree, or the request would be
    /// rejected by the server.
    ///
    /// Everything else is an expected refusal (a double click, a late click) and is only logged.
    pub const fn is_surfaced(&self) -> bool {
        matches!(
            self,
            Self::MalformedMessage(_)
                | Self::UnknownMessageType(_)
                | Self::TileOutOfRange { .. }
                | Self::InvalidBoardSize { .. }
                | Self::EmptyPlayerName
        )
    }
}

impl From<CodecError> for ClientError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Malformed(reason) => Self::MalformedMessage(reason),
            CodecError::UnknownType(kind) => Self::UnknownMessageType(kind),
        }
    }
}

pub type Result<T> = core::result::Result<T, ClientError>;
