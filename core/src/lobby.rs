use memtile_protocol::{GameStatus, GameSummary};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LobbyAction {
    NewGame,
    Join,
}

/// One line of the game selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LobbyEntry {
    pub index: usize,
    pub status: GameStatus,
    pub player1: Option<String>,
    pub player2: Option<String>,
    pub board_size: Option<u32>,
}

impl LobbyEntry {
    fn from_summary(game: &GameSummary) -> Self {
        Self {
            index: game.index,
            status: game.status,
            player1: game.player1_name().map(str::to_string),
            player2: game.player2_name().map(str::to_string),
            board_size: game.board_size,
        }
    }

    pub const fn action(&self) -> Option<LobbyAction> {
        match self.status {
            GameStatus::Open => Some(LobbyAction::NewGame),
            GameStatus::Waiting => Some(LobbyAction::Join),
            GameStatus::InProgress => None,
        }
    }

    pub const fn status_label(&self) -> &'static str {
        match self.status {
            GameStatus::Open => "New Game",
            GameStatus::Waiting => "Waiting",
            GameStatus::InProgress => "In Progress",
        }
    }
}

/// Lists every game up to the last occupied one, followed by a single open slot when there is one left.
pub fn derive_entries(games: &[GameSummary]) -> Vec<LobbyEntry> {
    let occupied = games
        .iter()
        .rposition(|game| game.status != GameStatus::Open)
        .map_or(0, |last| last + 1);
    let shown = if occupied < games.len() {
        occupied + 1
    } else {
        occupied
    };

    games[..shown].iter().map(LobbyEntry::from_summary).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(index: usize, status: GameStatus) -> GameSummary {
        GameSummary {
            index,
            status,
            board_size: None,
            player1: None,
            player2: None,
            player1_wins: 0,
            player2_wins: 0,
        }
    }

    #[test]
    fn single_open_game_yields_one_entry() {
        let entries = derive_entries(&[game(0, GameStatus::Open)]);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action(), Some(LobbyAction::NewGame));
    }

    #[test]
    fn trailing_open_games_collapse_to_one() {
        let games = [
            game(0, GameStatus::InProgress),
            game(1, GameStatus::Open),
            game(2, GameStatus::Waiting),
            game(3, GameStatus::Open),
            game(4, GameStatus::Open),
        ];

        let entries = derive_entries(&games);

        let indices: Vec<_> = entries.iter().map(|entry| entry.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(entries[0].action(), None);
        assert_eq!(entries[2].action(), Some(LobbyAction::Join));
    }

    #[test]
    fn full_table_has_no_spare_slot() {
        let games = [game(0, GameStatus::Waiting), game(1, GameStatus::InProgress)];

        assert_eq!(derive_entries(&games).len(), 2);
    }

    #[test]
    fn empty_table_yields_nothing() {
        assert!(derive_entries(&[]).is_empty());
    }
}
