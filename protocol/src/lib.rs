//! Wire messages exchanged with the game server.
//!
//! Outbound commands are framed as a bare command name immediately followed by a JSON object, e.g.
//! `FlipTile{"Idx":7}`. Inbound messages are a single JSON object carrying a `Type` discriminator.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use error::*;
pub use lobby::*;

mod error;
mod lobby;
mod scalar;

/// Field carrying the discriminator of every inbound message.
pub const TYPE_FIELD: &str = "Type";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameParams {
    #[serde(rename = "Idx")]
    pub index: u32,
    #[serde(rename = "Tmax")]
    pub board_size: u32,
    #[serde(
        rename = "OppBot",
        serialize_with = "scalar::serialize_flag",
        deserialize_with = "scalar::flag"
    )]
    pub opponent_is_bot: bool,
    #[serde(rename = "Name")]
    pub player_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinGameParams {
    #[serde(rename = "Idx")]
    pub index: u32,
    #[serde(rename = "Name")]
    pub player_name: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipTileParams {
    #[serde(rename = "Idx")]
    pub tile: u32,
}

/// Client to server commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    NewGame(NewGameParams),
    JoinGame(JoinGameParams),
    FlipTile(FlipTileParams),
}

impl Command {
    const NAMES: [&'static str; 3] = ["NewGame", "JoinGame", "FlipTile"];

    pub const fn name(&self) -> &'static str {
        use Command::*;
        match self {
            NewGame(_) => Self::NAMES[0],
            JoinGame(_) => Self::NAMES[1],
            FlipTile(_) => Self::NAMES[2],
        }
    }

    /// Produces the exact text frame the server expects: `<Name><JSON>` with no separator.
    pub fn encode(&self) -> Result<String> {
        use Command::*;
        let payload = match self {
            NewGame(params) => serde_json::to_string(params),
            JoinGame(params) => serde_json::to_string(params),
            FlipTile(params) => serde_json::to_string(params),
        }
        .map_err(|err| CodecError::Malformed(err.to_string()))?;
        Ok(format!("{}{}", self.name(), payload))
    }

    /// Parses a frame produced by [`Command::encode`].
    pub fn decode(frame: &str) -> Result<Self> {
        let malformed = |err: serde_json::Error| CodecError::Malformed(err.to_string());

        for name in Self::NAMES {
            let Some(payload) = frame.strip_prefix(name) else {
                continue;
            };
            return match name {
                "NewGame" => serde_json::from_str(payload).map(Command::NewGame),
                "JoinGame" => serde_json::from_str(payload).map(Command::JoinGame),
                _ => serde_json::from_str(payload).map(Command::FlipTile),
            }
            .map_err(malformed);
        }

        let name = frame.split('{').next().unwrap_or_default();
        Err(CodecError::UnknownType(Some(name.to_string())))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flipped {
    #[serde(rename = "Tile", deserialize_with = "scalar::index")]
    pub tile: usize,
    #[serde(rename = "MyTile", deserialize_with = "scalar::flag")]
    pub my_tile: bool,
    #[serde(rename = "Display")]
    pub display: String,
}

/// The two slots a hide, remove or finish message refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePair {
    #[serde(rename = "Tile1", deserialize_with = "scalar::index")]
    pub tile1: usize,
    #[serde(rename = "Tile2", deserialize_with = "scalar::index")]
    pub tile2: usize,
}

#[derive(Deserialize)]
struct GamesPayload {
    #[serde(rename = "Games")]
    games: Vec<GameSummary>,
}

/// Server to client messages.
#[derive(Clone, Debug, PartialEq)]
pub enum ServerMsg {
    GamesInProgress(Vec<GameSummary>),
    Flipped(Flipped),
    Hidden(TilePair),
    Removed(TilePair),
    Finished(TilePair),
}

impl ServerMsg {
    pub const fn kind(&self) -> &'static str {
        use ServerMsg::*;
        match self {
            GamesInProgress(_) => "GamesInProgress",
            Flipped(_) => "Flipped",
            Hidden(_) => "Hidden",
            Removed(_) => "Removed",
            Finished(_) => "Finished",
        }
    }

    pub fn decode(text: &str) -> Result<Self> {
        let malformed = |err: serde_json::Error| CodecError::Malformed(err.to_string());

        let value: Value = serde_json::from_str(text).map_err(malformed)?;
        let Value::Object(fields) = &value else {
            return Err(CodecError::Malformed("expected a JSON object".to_string()));
        };
        let Some(Value::String(kind)) = fields.get(TYPE_FIELD) else {
            return Err(CodecError::UnknownType(None));
        };

        let msg = match kind.as_str() {
            "GamesInProgress" => {
                let GamesPayload { mut games } =
                    GamesPayload::deserialize(&value).map_err(malformed)?;
                for (index, game) in games.iter_mut().enumerate() {
                    game.index = index;
                }
                ServerMsg::GamesInProgress(games)
            }
            "Flipped" => ServerMsg::Flipped(Flipped::deserialize(&value).map_err(malformed)?),
            "Hidden" => ServerMsg::Hidden(TilePair::deserialize(&value).map_err(malformed)?),
            "Removed" => ServerMsg::Removed(TilePair::deserialize(&value).map_err(malformed)?),
            "Finished" => ServerMsg::Finished(TilePair::deserialize(&value).map_err(malformed)?),
            other => return Err(CodecError::UnknownType(Some(other.to_string()))),
        };
        log::trace!("decoded {} message", msg.kind());
        Ok(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_game(index: u32) -> Command {
        Command::NewGame(NewGameParams {
            index,
            board_size: 20,
            opponent_is_bot: true,
            player_name: "Neil".to_string(),
        })
    }

    #[test]
    fn flip_tile_frame_is_name_glued_to_json() {
        let frame = Command::FlipTile(FlipTileParams { tile: 7 }).encode().unwrap();
        assert_eq!(frame, r#"FlipTile{"Idx":7}"#);
    }

    #[test]
    fn new_game_frame_uses_server_field_names() {
        assert_eq!(
            new_game(0).encode().unwrap(),
            r#"NewGame{"Idx":0,"Tmax":20,"OppBot":1,"Name":"Neil"}"#
        );
    }

    #[test]
    fn join_game_frame_uses_server_field_names() {
        let frame = Command::JoinGame(JoinGameParams {
            index: 1,
            player_name: "Ada".to_string(),
        })
        .encode()
        .unwrap();
        assert_eq!(frame, r#"JoinGame{"Idx":1,"Name":"Ada"}"#);
    }

    #[test]
    fn command_decode_reads_back_human_opponent() {
        let frame = r#"NewGame{"Idx":3,"Tmax":16,"OppBot":0,"Name":"Bo"}"#;
        let Command::NewGame(params) = Command::decode(frame).unwrap() else {
            panic!("expected NewGame");
        };
        assert_eq!(params.index, 3);
        assert_eq!(params.board_size, 16);
        assert!(!params.opponent_is_bot);
    }

    #[test]
    fn command_decode_rejects_unknown_name() {
        assert_eq!(
            Command::decode(r#"End{"Idx":1}"#),
            Err(CodecError::UnknownType(Some("End".to_string())))
        );
    }

    #[test]
    fn flipped_accepts_typed_scalars() {
        let msg = ServerMsg::decode(
            r#"{"Type":"Flipped","Tile":4,"MyTile":true,"Display":"/static/Mao150.png"}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            ServerMsg::Flipped(Flipped {
                tile: 4,
                my_tile: true,
                display: "/static/Mao150.png".to_string(),
            })
        );
    }

    #[test]
    fn flipped_accepts_stringly_scalars_from_server() {
        let msg = ServerMsg::decode(
            r#"{"Display":"/static/Gandhi150.png","MyTile":"false","Tile":"12","Type":"Flipped"}"#,
        )
        .unwrap();
        let ServerMsg::Flipped(flipped) = msg else {
            panic!("expected Flipped");
        };
        assert_eq!(flipped.tile, 12);
        assert!(!flipped.my_tile);
    }

    #[test]
    fn removed_and_finished_share_pair_shape() {
        let removed = ServerMsg::decode(r#"{"Type":"Removed","Tile1":"3","Tile2":"9"}"#).unwrap();
        let finished = ServerMsg::decode(r#"{"Type":"Finished","Tile1":3,"Tile2":9}"#).unwrap();
        let pair = TilePair { tile1: 3, tile2: 9 };
        assert_eq!(removed, ServerMsg::Removed(pair));
        assert_eq!(finished, ServerMsg::Finished(pair));
    }

    #[test]
    fn missing_type_is_unknown_type() {
        assert_eq!(
            ServerMsg::decode(r#"{"Tile1":1,"Tile2":2}"#),
            Err(CodecError::UnknownType(None))
        );
    }

    #[test]
    fn unrecognized_type_is_unknown_type() {
        assert_eq!(
            ServerMsg::decode(r#"{"Type":"Scored","Points":3}"#),
            Err(CodecError::UnknownType(Some("Scored".to_string())))
        );
    }

    #[test]
    fn non_json_is_malformed() {
        assert!(matches!(
            ServerMsg::decode("Flipped 3"),
            Err(CodecError::Malformed(_))
        ));
        assert!(matches!(
            ServerMsg::decode("[1,2]"),
            Err(CodecError::Malformed(_))
        ));
    }

    #[test]
    fn known_type_with_bad_payload_is_malformed() {
        assert!(matches!(
            ServerMsg::decode(r#"{"Type":"Hidden","Tile1":"x","Tile2":2}"#),
            Err(CodecError::Malformed(_))
        ));
        assert!(matches!(
            ServerMsg::decode(r#"{"Type":"Hidden","Tile1":-1,"Tile2":2}"#),
            Err(CodecError::Malformed(_))
        ));
    }

    #[test]
    fn games_in_progress_indexes_entries() {
        let msg = ServerMsg::decode(
            r#"{"Type":"GamesInProgress","Games":[{"Status":2,"P1":{"Name":"Neil"},"P2":{"Name":"MEMBOT"}},{"Status":0}]}"#,
        )
        .unwrap();
        let ServerMsg::GamesInProgress(games) = msg else {
            panic!("expected GamesInProgress");
        };
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].index, 0);
        assert_eq!(games[0].status, GameStatus::InProgress);
        assert_eq!(games[0].player1_name(), Some("Neil"));
        assert_eq!(games[1].index, 1);
        assert_eq!(games[1].status, GameStatus::Open);
        assert_eq!(games[1].player1, None);
    }
}
