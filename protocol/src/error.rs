use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Malformed message: {0}")]
    Malformed(String),
    #[error("Unknown message type: {}", .0.as_deref().unwrap_or("<missing>"))]
    UnknownType(Option<String>),
}

pub type Result<T> = core::result::Result<T, CodecError>;
