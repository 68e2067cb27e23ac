use serde::{Deserialize, Deserializer, Serialize};

use crate::scalar;

/// Slot status as reported in the server's game table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GameStatus {
    Open,
    Waiting,
    InProgress,
}

impl TryFrom<u8> for GameStatus {
    type Error = String;

    fn try_from(value: u8) -> core::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Open),
            1 => Ok(Self::Waiting),
            2 => Ok(Self::InProgress),
            other => Err(format!("unknown game status {}", other)),
        }
    }
}

impl From<GameStatus> for u8 {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::Open => 0,
            GameStatus::Waiting => 1,
            GameStatus::InProgress => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Position in the server's game table, filled in on decode.
    #[serde(skip)]
    pub index: usize,
    #[serde(rename = "Status")]
    pub status: GameStatus,
    #[serde(rename = "Tmax", default, deserialize_with = "scalar::optional_size")]
    pub board_size: Option<u32>,
    #[serde(rename = "P1", default, deserialize_with = "named_player")]
    pub player1: Option<PlayerSummary>,
    #[serde(rename = "P2", default, deserialize_with = "named_player")]
    pub player2: Option<PlayerSummary>,
    #[serde(rename = "P1won", default)]
    pub player1_wins: u32,
    #[serde(rename = "P2won", default)]
    pub player2_wins: u32,
}

impl GameSummary {
    pub fn player1_name(&self) -> Option<&str> {
        self.player1.as_ref().map(|player| player.name.as_str())
    }

    pub fn player2_name(&self) -> Option<&str> {
        self.player2.as_ref().map(|player| player.name.as_str())
    }
}

/// The server always writes both player records; an empty name marks an unoccupied seat.
fn named_player<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> core::result::Result<Option<PlayerSummary>, D::Error> {
    Ok(Option::<PlayerSummary>::deserialize(deserializer)?.filter(|player| !player.name.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn go_shaped_empty_slot_has_no_players() {
        let game: GameSummary = serde_json::from_str(
            r#"{"Status":0,"Tmax":0,"P1":{"Name":"","Num":0,"IsBot":false},"P2":{"Name":"","Num":0,"IsBot":false},"P1won":0,"P2won":0,"GameCounter":0}"#,
        )
        .unwrap();
        assert_eq!(game.status, GameStatus::Open);
        assert_eq!(game.board_size, None);
        assert_eq!(game.player1, None);
        assert_eq!(game.player2, None);
    }

    #[test]
    fn waiting_slot_keeps_host_and_size() {
        let game: GameSummary = serde_json::from_str(
            r#"{"Status":1,"Tmax":16,"P1":{"Name":"Neil"},"P2":null,"P1won":2,"P2won":1}"#,
        )
        .unwrap();
        assert_eq!(game.status, GameStatus::Waiting);
        assert_eq!(game.board_size, Some(16));
        assert_eq!(game.player1_name(), Some("Neil"));
        assert_eq!(game.player2_name(), None);
        assert_eq!((game.player1_wins, game.player2_wins), (2, 1));
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(serde_json::from_str::<GameSummary>(r#"{"Status":7}"#).is_err());
    }
}
