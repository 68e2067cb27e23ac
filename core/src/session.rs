use core::fmt;

use memtile_protocol::{Command, FlipTileParams, JoinGameParams, NewGameParams, ServerMsg};
use serde::{Deserialize, Serialize};

use crate::*;

/// Connection-level status of the client.
///
/// Valid transitions:
/// - Unconnected -> Connected (transport opened)
/// - any -> Unconnected (transport closed or errored)
/// - Connected | Waiting | Finished -> Playing (new or joined game sent)
/// - Playing -> Finished (server reports the game is over)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    #[default]
    Unconnected,
    Connected,
    Waiting,
    Playing,
    Finished,
}

impl SessionStatus {
    /// Whether a new game may be started or an existing one joined.
    pub const fn can_start_game(self) -> bool {
        matches!(self, Self::Connected | Self::Waiting | Self::Finished)
    }

    pub const fn is_connected(self) -> bool {
        !matches!(self, Self::Unconnected)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use SessionStatus::*;
        f.write_str(match self {
            Unconnected => "unconnected",
            Connected => "connected",
            Waiting => "waiting",
            Playing => "playing",
            Finished => "finished",
        })
    }
}

/// Player preferences used when asking the server for a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub board_size: u32,
    pub opponent_is_bot: bool,
    pub player_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board_size: 20,
            opponent_is_bot: true,
            player_name: "Player".to_string(),
        }
    }
}

/// Parameters of a new game request, alive only for the duration of the request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingNewGameParams {
    pub board_size: u32,
    pub opponent_is_bot: bool,
    pub player_name: String,
}

impl PendingNewGameParams {
    fn into_command(self, index: u32) -> Command {
        Command::NewGame(NewGameParams {
            index,
            board_size: self.board_size,
            opponent_is_bot: self.opponent_is_bot,
            player_name: self.player_name,
        })
    }
}

impl From<&SessionConfig> for PendingNewGameParams {
    fn from(config: &SessionConfig) -> Self {
        Self {
            board_size: config.board_size,
            opponent_is_bot: config.opponent_is_bot,
            player_name: config.player_name.clone(),
        }
    }
}

/// What the runtime has to do after the session handled an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionUpdate {
    NoChange,
    Redraw,
    /// Redraw now and hand the token back to [`Session::resolve`] once its delay has passed.
    Schedule(Deferred),
}

impl SessionUpdate {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Interprets server messages and player actions against the local session state.
///
/// Every inbound event goes through [`Session::handle_transport`], which processes it completely before returning.
#[derive(Debug)]
pub struct Session<T> {
    transport: T,
    config: SessionConfig,
    status: SessionStatus,
    board: Option<TileBoard>,
    lobby: Vec<LobbyEntry>,
}

impl<T: Transport> Session<T> {
    pub fn new(transport: T, config: SessionConfig) -> Self {
        Self {
            transport,
            config,
            status: SessionStatus::default(),
            board: None,
            lobby: Vec::new(),
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn board(&self) -> Option<&TileBoard> {
        self.board.as_ref()
    }

    pub fn lobby(&self) -> &[LobbyEntry] {
        &self.lobby
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn handle_transport(&mut self, event: TransportEvent) -> Result<SessionUpdate> {
        use SessionStatus::*;
        use TransportEvent::*;

        match event {
            Opened if self.status == Unconnected => {
                log::info!("connected to game server");
                self.status = Connected;
                Ok(SessionUpdate::Redraw)
            }
            Opened => Err(self.refuse("open the connection")),
            Closed(reason) | Errored(reason) => {
                log::info!("lost game server ({}) while {}", reason, self.status);
                self.status = Unconnected;
                Ok(SessionUpdate::Redraw)
            }
            Received(text) => self.handle_text(&text),
        }
    }

    /// Decodes one inbound frame and applies it; nothing changes when decoding fails.
    pub fn handle_text(&mut self, text: &str) -> Result<SessionUpdate> {
        log::debug!("message from server: {}", text);
        let msg = ServerMsg::decode(text)?;
        self.handle_msg(msg)
    }

    pub fn handle_msg(&mut self, msg: ServerMsg) -> Result<SessionUpdate> {
        use ServerMsg::*;

        match msg {
            GamesInProgress(games) => {
                if self.status != SessionStatus::Connected {
                    return Err(self.refuse("show the game selector"));
                }
                self.lobby = derive_entries(&games);
                log::debug!("{} games listed", self.lobby.len());
                Ok(SessionUpdate::Redraw)
            }
            Flipped(flipped) => {
                self.playing_board("flip a tile")?
                    .apply_flip(flipped.tile, &flipped.display, flipped.my_tile)?;
                Ok(SessionUpdate::Redraw)
            }
            Hidden(pair) => {
                let deferred = self
                    .playing_board("hide tiles")?
                    .apply_hide(pair.tile1, pair.tile2)?;
                Ok(SessionUpdate::Schedule(deferred))
            }
            Removed(pair) => {
                let deferred = self
                    .playing_board("remove tiles")?
                    .apply_remove(pair.tile1, pair.tile2)?;
                Ok(SessionUpdate::Schedule(deferred))
            }
            Finished(pair) => {
                let deferred = self
                    .playing_board("finish the game")?
                    .apply_finished(pair.tile1, pair.tile2)?;
                log::info!("game finished");
                self.status = SessionStatus::Finished;
                Ok(SessionUpdate::Schedule(deferred))
            }
        }
    }

    /// Applies a deferred pair resolution, returns whether the board changed.
    pub fn resolve(&mut self, deferred: Deferred) -> bool {
        self.board
            .as_mut()
            .is_some_and(|board| board.resolve(deferred))
    }

    /// Asks the server to start game `index` with the configured preferences.
    ///
    /// The session moves to [`SessionStatus::Playing`] with a fresh board as soon as the command is sent, without
    /// waiting for the server.
    pub fn request_new_game(&mut self, index: usize) -> Result<()> {
        self.check_can_start("start a new game")?;
        let wire_index = wire_game_index(index)?;
        let board_size = TileBoard::validate_size(self.config.board_size)?;
        self.check_player_name()?;

        let params = PendingNewGameParams::from(&self.config);
        self.send(params.into_command(wire_index))?;

        self.start_board(board_size);
        Ok(())
    }

    /// Asks the server to seat this player in waiting game `index`.
    pub fn request_join_game(&mut self, index: usize) -> Result<()> {
        self.check_can_start("join a game")?;
        let wire_index = wire_game_index(index)?;

        let board_size = self
            .lobby
            .iter()
            .find(|entry| entry.index == index)
            .and_then(|entry| entry.board_size)
            .unwrap_or(self.config.board_size);
        let board_size = TileBoard::validate_size(board_size)?;
        self.check_player_name()?;
        self.send(Command::JoinGame(JoinGameParams {
            index: wire_index,
            player_name: self.config.player_name.clone(),
        }))?;

        self.start_board(board_size);
        Ok(())
    }

    /// Forwards a tile click to the server; the board only changes once the server answers.
    pub fn request_flip(&mut self, tile: usize) -> Result<()> {
        let board = self.playing_board("flip a tile")?;
        let tile = board.validate_index(tile)?;
        if !board.is_clickable(tile) {
            return Err(ClientError::TileLocked { index: tile });
        }
        let wire_tile = u32::try_from(tile).map_err(|_| ClientError::TileOutOfRange {
            index: tile,
            size: board.len(),
        })?;

        self.send(Command::FlipTile(FlipTileParams { tile: wire_tile }))
    }

    fn check_can_start(&self, action: &'static str) -> Result<()> {
        if self.status.can_start_game() {
            Ok(())
        } else {
            Err(self.refuse(action))
        }
    }

    fn check_player_name(&self) -> Result<()> {
        if self.config.player_name.trim().is_empty() {
            Err(ClientError::EmptyPlayerName)
        } else {
            Ok(())
        }
    }

    fn start_board(&mut self, board_size: u32) {
        let board_size = board_size as usize;
        match self.board.as_mut() {
            Some(board) => board.reset(board_size),
            None => self.board = Some(TileBoard::new(board_size)),
        }
        self.status = SessionStatus::Playing;
        log::debug!("playing on {} tiles", board_size);
    }

    fn playing_board(&mut self, action: &'static str) -> Result<&mut TileBoard> {
        let status = self.status;
        match (status, self.board.as_mut()) {
            (SessionStatus::Playing, Some(board)) => Ok(board),
            _ => Err(ClientError::InvalidStateTransition { action, status }),
        }
    }

    /// Encodes and sends; the transport's open state is checked before anything is committed.
    fn send(&mut self, command: Command) -> Result<()> {
        if !self.transport.is_open() {
            return Err(TransportError::NotOpen.into());
        }
        let frame = command.encode()?;
        log::debug!("sending {}", frame);
        self.transport.send(&frame)?;
        Ok(())
    }

    fn refuse(&self, action: &'static str) -> ClientError {
        ClientError::InvalidStateTransition {
            action,
            status: self.status,
        }
    }
}

fn wire_game_index(index: usize) -> Result<u32> {
    u32::try_from(index).map_err(|_| ClientError::InvalidGameIndex { index })
}
