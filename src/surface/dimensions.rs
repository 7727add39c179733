//! The size of the matrix and conversions between positions and linear cell indices
//!
//! Every register on the LED matrix is addressed as `row * width + column`. [CellIndex] is that
//! linear index, [Geometry] knows the width needed to convert to and from [Position]s.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Position;

use super::Block;

/// wrapper type for an index in to the matrix
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct CellIndex(pub usize);

impl CellIndex {
    /// get a usize from a CellIndex
    pub fn as_usize(&self) -> usize {
        self.0
    }

    /// converts a cellindex to a position
    pub fn into_position(self, width: u32) -> Position {
        let y = (self.0 / width as usize) as i32;
        let x = (self.0 % width as usize) as i32;
        Position { x, y }
    }
}

/// Width and height of the matrix, both at least 2 so one block always fits
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Geometry {
    width: u32,
    height: u32,
}

impl Geometry {
    /// validates the dimensions
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width < 2 || height < 2 {
            return Err(Error::InvalidGeometry { width, height });
        }
        Ok(Geometry { width, height })
    }

    #[allow(missing_docs)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[allow(missing_docs)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// number of cells on the matrix
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// the most disjoint 2x2 blocks the matrix can hold
    pub fn max_blocks(&self) -> usize {
        self.cell_count() / 4
    }

    /// is this position on the matrix
    pub fn contains(&self, pos: Position) -> bool {
        !self.off_board(pos)
    }

    #[allow(missing_docs)]
    pub fn off_board(&self, pos: Position) -> bool {
        pos.x < 0 || pos.x >= self.width as i32 || pos.y < 0 || pos.y >= self.height as i32
    }

    /// does the whole 2x2 block whose top left corner is `origin` fit on the matrix
    pub fn contains_block(&self, origin: Position) -> bool {
        self.contains(origin) && self.contains(Position::new(origin.x + 1, origin.y + 1))
    }

    /// linear index of `pos`, or `OutOfBounds`
    pub fn index_of(&self, pos: Position) -> Result<CellIndex> {
        if self.off_board(pos) {
            return Err(Error::OutOfBounds { position: pos });
        }
        Ok(CellIndex(pos.y as usize * self.width as usize + pos.x as usize))
    }

    /// `OutOfBounds` for the first cell of `block` that is off the matrix
    pub fn check_block(&self, block: &Block) -> Result<()> {
        for cell in block.cells() {
            self.index_of(cell)?;
        }
        Ok(())
    }

    /// position of a linear index
    pub fn position_of(&self, idx: CellIndex) -> Position {
        idx.into_position(self.width)
    }
}
