//! Client-side state for the networked memory game: the tile board the player sees, the session state machine
//! that reconciles it with the server, and an offline single-player variant.

pub use memtile_protocol as protocol;

pub use board::*;
pub use error::*;
pub use lobby::*;
pub use session::*;
pub use solo::*;
pub use transport::*;

mod board;
mod error;
mod lobby;
mod session;
mod solo;
mod transport;
