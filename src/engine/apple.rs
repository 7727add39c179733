use fxhash::FxHashSet;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::surface::{Block, CellIndex, Geometry, Surface};
use crate::types::Position;

use super::board::{Board, Occupant};

/// Draws one candidate apple block from `seed`.
///
/// The generator is reseeded on every call, so the same seed always gives the same block. The
/// returned seed is the linear index of the block's origin, which chains one draw into the next.
/// The origin is kept one cell away from the right and bottom edges so the block always fits.
pub fn place(geometry: Geometry, seed: u64) -> (u64, Block) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let x = rng.gen_range(0..geometry.width() - 1);
    let y = rng.gen_range(0..geometry.height() - 1);
    let next_seed = y as u64 * geometry.width() as u64 + x as u64;
    (next_seed, Block::new(Position::new(x as i32, y as i32)))
}

/// The apple and the seed chain that places it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Apple {
    block: Option<Block>,
    seed: u64,
    max_attempts: u32,
}

impl Apple {
    /// an apple that is not on the board yet
    pub fn new(seed: u64, max_attempts: u32) -> Self {
        Apple {
            block: None,
            seed,
            max_attempts,
        }
    }

    /// where the apple is, if it has been placed
    pub fn block(&self) -> Option<Block> {
        self.block
    }

    /// the seed the next draw will use
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Chains draws until one lands on a free block that does not overlap `reserved`.
    ///
    /// The chain can only ever visit `width * height` seeds, so it is cut short as soon as a seed
    /// repeats or `max_attempts` draws were made. The board is then swept in index order from
    /// the last draw, and only a board with no free block at all gives `PlacementExhausted`.
    fn find_free<S: Surface>(&mut self, board: &Board<S>, reserved: Option<Block>) -> Result<Block> {
        let geometry = board.geometry();
        let fits = |candidate: &Block| {
            !reserved.map_or(false, |r| r.overlaps(candidate)) && board.is_free_block(candidate)
        };

        let mut seen: FxHashSet<u64> = FxHashSet::default();
        let mut attempts = 0;
        let mut last_draw = None;
        while attempts < self.max_attempts && seen.insert(self.seed) {
            let (next_seed, candidate) = place(geometry, self.seed);
            self.seed = next_seed;
            attempts += 1;
            if fits(&candidate) {
                return Ok(candidate);
            }
            last_draw = Some(next_seed as usize);
        }

        let cell_count = geometry.cell_count();
        let start = last_draw.unwrap_or(0);
        let swept = (0..cell_count)
            .map(|offset| geometry.position_of(CellIndex((start + offset) % cell_count)))
            .filter(|origin| geometry.contains_block(*origin))
            .map(Block::new)
            .find(|candidate| fits(candidate));
        match swept {
            Some(block) => {
                debug!(attempts, origin = %block.origin(), "apple seed chain stalled, swept the board");
                Ok(block)
            }
            None => {
                warn!(attempts, "no free block for the apple");
                Err(Error::PlacementExhausted { attempts })
            }
        }
    }

    /// first placement of a session
    pub fn spawn<S: Surface>(&mut self, board: &mut Board<S>) -> Result<Block> {
        let block = self.find_free(board, None)?;
        board.fill_block(&block, Occupant::Apple)?;
        self.block = Some(block);
        debug!(origin = %block.origin(), "spawned apple");
        Ok(block)
    }

    /// Puts the apple on a block of the caller's choosing, which has to be free. The current
    /// apple, if any, is erased first.
    pub fn place_at<S: Surface>(&mut self, board: &mut Board<S>, block: Block) -> Result<Block> {
        board.geometry().check_block(&block)?;
        if let Some(old) = self.block.take() {
            board.vacate_block(&old, Occupant::Apple)?;
        }
        if let Some(taken) = block
            .cells()
            .iter()
            .find(|c| board.occupant(**c) != Ok(Occupant::Empty))
        {
            return Err(Error::Occupied { position: *taken });
        }
        board.fill_block(&block, Occupant::Apple)?;
        self.block = Some(block);
        Ok(block)
    }

    /// Erases the apple and places it somewhere free. `reserved` is kept clear as well, it is the
    /// block the head is about to move into. On failure the apple stays off the board.
    pub fn relocate<S: Surface>(
        &mut self,
        board: &mut Board<S>,
        reserved: Option<Block>,
    ) -> Result<Block> {
        if let Some(old) = self.block.take() {
            board.vacate_block(&old, Occupant::Apple)?;
        }
        let block = self.find_free(board, reserved)?;
        board.fill_block(&block, Occupant::Apple)?;
        self.block = Some(block);
        debug!(origin = %block.origin(), seed = self.seed, "relocated apple");
        Ok(block)
    }

    /// takes the apple out of play, returning where it was
    pub fn release(self) -> Option<Block> {
        self.block
    }
}
