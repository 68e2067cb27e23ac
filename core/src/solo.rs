//! Offline single-player variant: the deck is shuffled and matched locally, no server involved.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::HIDDEN_FACE;

/// Image shown where a won pair used to be.
pub const EMPTY_FACE: &str = "static/Empty150.png";

/// How long a revealed pair stays visible before it is checked.
pub const CHECK_DELAY_MS: u32 = 500;

pub const FACES: [(&str, &str); 10] = [
    ("Bhutto", "static/Bhutto150.png"),
    ("Churchill", "static/Churchill150.png"),
    ("DeGaulle", "static/DeGaulle150.png"),
    ("Elizabeth", "static/Elizabeth150.png"),
    ("Gandhi", "static/Gandhi150.png"),
    ("JohnPaul", "static/JohnPaul150.png"),
    ("Mao", "static/Mao150.png"),
    ("Marley", "static/Marley150.png"),
    ("Monroe", "static/Monroe150.png"),
    ("YokoOno", "static/YokoOno150.png"),
];

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoloTile {
    #[default]
    Hidden,
    Shown,
    Won,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoloState {
    Playing,
    Won,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SoloOutcome {
    NoChange,
    Revealed,
    /// Second tile of a pair revealed, call [`SoloGame::check_match`] after [`CHECK_DELAY_MS`].
    CheckPending,
}

impl SoloOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    Match,
    NoMatch,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoloGame {
    /// Index into [`FACES`] for every tile.
    faces: Vec<usize>,
    tiles: Vec<SoloTile>,
    chosen: SmallVec<[usize; 2]>,
    pairs_won: usize,
}

impl SoloGame {
    /// Deals every face twice in a random order.
    pub fn new(seed: u64) -> Self {
        use rand::prelude::*;

        let mut faces: Vec<usize> = (0..FACES.len()).chain(0..FACES.len()).collect();
        let mut rng = SmallRng::seed_from_u64(seed);
        for i in (1..faces.len()).rev() {
            let j = rng.random_range(0..=i);
            faces.swap(i, j);
        }
        Self::with_faces(faces)
    }

    pub fn with_faces(faces: Vec<usize>) -> Self {
        let tiles = vec![SoloTile::Hidden; faces.len()];
        Self {
            faces,
            tiles,
            chosen: SmallVec::new(),
            pairs_won: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tile_at(&self, index: usize) -> Option<SoloTile> {
        self.tiles.get(index).copied()
    }

    pub fn pairs_won(&self) -> usize {
        self.pairs_won
    }

    pub fn state(&self) -> SoloState {
        if self.pairs_won * 2 >= self.tiles.len() {
            SoloState::Won
        } else {
            SoloState::Playing
        }
    }

    pub fn is_check_pending(&self) -> bool {
        self.chosen.len() == 2
    }

    pub fn display_at(&self, index: usize) -> Option<&'static str> {
        Some(match self.tile_at(index)? {
            SoloTile::Hidden => HIDDEN_FACE,
            SoloTile::Shown => FACES[self.faces[index]].1,
            SoloTile::Won => EMPTY_FACE,
        })
    }

    pub fn flip(&mut self, index: usize) -> SoloOutcome {
        if self.is_check_pending() || self.tiles.get(index) != Some(&SoloTile::Hidden) {
            return SoloOutcome::NoChange;
        }

        self.tiles[index] = SoloTile::Shown;
        self.chosen.push(index);
        log::debug!("solo flip {} shows {}", index, FACES[self.faces[index]].0);

        if self.is_check_pending() {
            SoloOutcome::CheckPending
        } else {
            SoloOutcome::Revealed
        }
    }

    /// Settles the pending pair, returns `None` when no pair is waiting.
    pub fn check_match(&mut self) -> Option<MatchOutcome> {
        let &[first, second] = self.chosen.as_slice() else {
            return None;
        };
        self.chosen.clear();

        if self.faces[first] == self.faces[second] {
            self.tiles[first] = SoloTile::Won;
            self.tiles[second] = SoloTile::Won;
            self.pairs_won += 1;
            Some(MatchOutcome::Match)
        } else {
            self.tiles[first] = SoloTile::Hidden;
            self.tiles[second] = SoloTile::Hidden;
            Some(MatchOutcome::NoMatch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> SoloGame {
        SoloGame::with_faces(vec![0, 1, 0, 1])
    }

    #[test]
    fn deal_contains_every_face_twice() {
        let game = SoloGame::new(42);
        let mut counts = [0; FACES.len()];
        for face in &game.faces {
            counts[*face] += 1;
        }

        assert_eq!(game.len(), 20);
        assert!(counts.iter().all(|&count| count == 2));
    }

    #[test]
    fn same_seed_same_deal() {
        assert_eq!(SoloGame::new(7), SoloGame::new(7));
    }

    #[test]
    fn matching_pair_is_won() {
        let mut game = game();

        assert_eq!(game.flip(0), SoloOutcome::Revealed);
        assert_eq!(game.display_at(0), Some(FACES[0].1));
        assert_eq!(game.flip(2), SoloOutcome::CheckPending);
        assert_eq!(game.check_match(), Some(MatchOutcome::Match));

        assert_eq!(game.tile_at(0), Some(SoloTile::Won));
        assert_eq!(game.display_at(2), Some(EMPTY_FACE));
        assert_eq!(game.pairs_won(), 1);
        assert_eq!(game.state(), SoloState::Playing);
    }

    #[test]
    fn mismatch_turns_back() {
        let mut game = game();
        game.flip(0);
        game.flip(1);

        assert_eq!(game.check_match(), Some(MatchOutcome::NoMatch));
        assert_eq!(game.tile_at(0), Some(SoloTile::Hidden));
        assert_eq!(game.display_at(1), Some(HIDDEN_FACE));
    }

    #[test]
    fn third_pick_and_repeat_pick_are_refused() {
        let mut game = game();

        game.flip(0);
        assert_eq!(game.flip(0), SoloOutcome::NoChange);
        game.flip(1);
        assert_eq!(game.flip(2), SoloOutcome::NoChange);
        assert_eq!(game.tile_at(2), Some(SoloTile::Hidden));
    }

    #[test]
    fn all_pairs_wins() {
        let mut game = game();
        for (a, b) in [(0, 2), (1, 3)] {
            game.flip(a);
            game.flip(b);
            game.check_match();
        }

        assert_eq!(game.state(), SoloState::Won);
        assert_eq!(game.check_match(), None);
    }

    #[test]
    fn out_of_range_tile_has_no_face() {
        let mut game = game();

        assert_eq!(game.tile_at(4), None);
        assert_eq!(game.display_at(4), None);
        assert_eq!(game.flip(4), SoloOutcome::NoChange);
    }
}
