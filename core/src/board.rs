use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Image shown on a face-down tile.
pub const HIDDEN_FACE: &str = "static/Tile1_150.png";

/// Image left behind once a pair leaves play.
pub const BLANK_FACE: &str = "static/Blank150.png";

/// Largest board a game may be played on.
pub const MAX_TILES: u32 = 200;

/// Player-visible state of one slot, as last dictated by the server.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotState {
    #[default]
    FaceDown,
    FaceUpSelf,
    FaceUpOpponent,
    Removed,
}

impl SlotState {
    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::FaceUpSelf | Self::FaceUpOpponent)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSlot {
    state: SlotState,
    display: String,
    /// Set between a removal cue and its resolution.
    fading: bool,
    /// Board-wide counter value of the last message that touched this slot.
    stamp: u64,
}

impl TileSlot {
    fn face_down() -> Self {
        Self {
            state: SlotState::FaceDown,
            display: HIDDEN_FACE.to_string(),
            fading: false,
            stamp: 0,
        }
    }

    pub fn state(&self) -> SlotState {
        self.state
    }

    pub fn display_ref(&self) -> &str {
        &self.display
    }

    pub fn is_fading(&self) -> bool {
        self.fading
    }
}

/// How a revealed pair is resolved once its visual delay has elapsed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// No match, both tiles turn back over.
    Hide,
    /// Match, both tiles leave play.
    Remove,
}

impl Resolution {
    pub const fn delay_ms(self) -> u32 {
        match self {
            Self::Hide => 400,
            Self::Remove => 800,
        }
    }
}

/// A pending pair resolution, to be handed back to [`TileBoard::resolve`] after [`Deferred::delay_ms`].
///
/// The token is tied to the board generation it was created for and to the slot stamps at that time, so it can
/// never touch a board that has since been reset, nor a slot that a later message already changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Deferred {
    generation: u64,
    resolution: Resolution,
    tiles: [usize; 2],
    stamps: [u64; 2],
}

impl Deferred {
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub const fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub const fn tiles(&self) -> [usize; 2] {
        self.tiles
    }

    pub const fn delay_ms(&self) -> u32 {
        self.resolution.delay_ms()
    }
}

/// Client-side view of the tile slots of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileBoard {
    slots: Vec<TileSlot>,
    generation: u64,
    next_stamp: u64,
}

impl TileBoard {
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![TileSlot::face_down(); size],
            generation: 0,
            next_stamp: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn slots(&self) -> &[TileSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&TileSlot> {
        self.slots.get(index)
    }

    /// Boards hold whole pairs, between one and [`MAX_TILES`] / 2 of them.
    pub fn validate_size(size: u32) -> Result<u32> {
        if size >= 2 && size % 2 == 0 && size <= MAX_TILES {
            Ok(size)
        } else {
            Err(ClientError::InvalidBoardSize {
                size,
                max: MAX_TILES,
            })
        }
    }

    pub fn validate_index(&self, index: usize) -> Result<usize> {
        if index < self.slots.len() {
            Ok(index)
        } else {
            Err(ClientError::TileOutOfRange {
                index,
                size: self.slots.len(),
            })
        }
    }

    /// Discards every slot and starts a new generation of `size` face-down slots.
    pub fn reset(&mut self, size: usize) {
        self.slots = vec![TileSlot::face_down(); size];
        self.generation += 1;
        self.next_stamp = 0;
        log::debug!("board reset to {} slots, generation {}", size, self.generation);
    }

    /// Reveals a tile exactly as the server says, whatever the slot held before.
    pub fn apply_flip(&mut self, index: usize, display: &str, is_own_tile: bool) -> Result<()> {
        let index = self.validate_index(index)?;
        let stamp = self.bump_stamp();
        let slot = &mut self.slots[index];
        slot.state = if is_own_tile {
            SlotState::FaceUpSelf
        } else {
            SlotState::FaceUpOpponent
        };
        slot.display = display.to_string();
        slot.fading = false;
        slot.stamp = stamp;
        Ok(())
    }

    /// No match: both tiles stay visible until the returned token is resolved.
    pub fn apply_hide(&mut self, index1: usize, index2: usize) -> Result<Deferred> {
        self.defer(Resolution::Hide, index1, index2)
    }

    /// Match: both tiles start fading now and leave play once the returned token is resolved.
    pub fn apply_remove(&mut self, index1: usize, index2: usize) -> Result<Deferred> {
        let deferred = self.defer(Resolution::Remove, index1, index2)?;
        for index in deferred.tiles {
            self.slots[index].fading = true;
        }
        Ok(deferred)
    }

    /// The final pair of a game is removed like any other matched pair.
    pub fn apply_finished(&mut self, index1: usize, index2: usize) -> Result<Deferred> {
        self.apply_remove(index1, index2)
    }

    /// Applies a deferred resolution, returns whether anything changed.
    pub fn resolve(&mut self, deferred: Deferred) -> bool {
        if deferred.generation != self.generation {
            log::debug!(
                "dropping {:?} of generation {}, board is at {}",
                deferred.resolution,
                deferred.generation,
                self.generation
            );
            return false;
        }

        let (state, display) = match deferred.resolution {
            Resolution::Hide => (SlotState::FaceDown, HIDDEN_FACE),
            Resolution::Remove => (SlotState::Removed, BLANK_FACE),
        };

        let mut updated = false;
        for (index, stamp) in deferred.tiles.into_iter().zip(deferred.stamps) {
            let Some(slot) = self.slots.get_mut(index) else {
                continue;
            };
            if slot.stamp != stamp {
                log::trace!("slot {} changed since {:?} was scheduled", index, deferred.resolution);
                continue;
            }
            slot.state = state;
            slot.display = display.to_string();
            slot.fading = false;
            updated = true;
        }
        updated
    }

    /// Whether a click on this slot may be forwarded to the server.
    pub fn is_clickable(&self, index: usize) -> bool {
        self.slots
            .get(index)
            .is_some_and(|slot| slot.state == SlotState::FaceDown && !slot.fading)
    }

    /// Slots currently face up and awaiting resolution by the server.
    pub fn pending_pair(&self) -> SmallVec<[usize; 2]> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.state.is_face_up() && !slot.fading)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn face_up_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.state.is_face_up()).count()
    }

    pub fn removed_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.state == SlotState::Removed)
            .count()
    }

    fn bump_stamp(&mut self) -> u64 {
        self.next_stamp += 1;
        self.next_stamp
    }

    fn defer(&self, resolution: Resolution, index1: usize, index2: usize) -> Result<Deferred> {
        let tiles = [self.validate_index(index1)?, self.validate_index(index2)?];
        Ok(Deferred {
            generation: self.generation,
            resolution,
            tiles,
            stamps: tiles.map(|index| self.slots[index].stamp),
        })
    }
}
