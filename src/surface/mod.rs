//! The LED matrix as seen by the engine: a grid of color registers.
//!
//! On hardware every write is immediately visible, there is no double buffering. [Framebuffer]
//! is an in-memory stand in with the same semantics, and [RecordingSurface] wraps any surface to
//! log the writes it receives.

mod block;
mod dimensions;
mod recording;

use std::fmt;

use crate::error::Result;
use crate::types::{Color, Position};

pub use block::{Block, BLOCK_STEP};
pub use dimensions::{CellIndex, Geometry};
pub use recording::{CellWrite, RecordingSurface};

/// An addressable grid of color cells
pub trait Surface {
    /// size of the grid
    fn geometry(&self) -> Geometry;

    /// the color currently stored at `pos`
    fn read_cell(&self, pos: Position) -> Result<Color>;

    /// store `color` at `pos`
    fn write_cell(&mut self, pos: Position, color: Color) -> Result<()>;

    /// sets every cell to the background color
    fn clear(&mut self) -> Result<()> {
        let geometry = self.geometry();
        for y in 0..geometry.height() as i32 {
            for x in 0..geometry.width() as i32 {
                self.write_cell(Position::new(x, y), Color::BACKGROUND)?;
            }
        }
        Ok(())
    }

    /// writes `color` to the four cells of `block` in order. A failure leaves earlier cells written
    fn paint_block(&mut self, block: &Block, color: Color) -> Result<()> {
        for cell in block.cells() {
            self.write_cell(cell, color)?;
        }
        Ok(())
    }
}

/// A surface backed by plain memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    geometry: Geometry,
    cells: Vec<Color>,
}

impl Framebuffer {
    /// a fully cleared framebuffer
    pub fn new(geometry: Geometry) -> Self {
        Framebuffer {
            geometry,
            cells: vec![Color::BACKGROUND; geometry.cell_count()],
        }
    }

    /// all cells in linear index order
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// how many cells hold `color`
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|c| **c == color).count()
    }
}

impl Surface for Framebuffer {
    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn read_cell(&self, pos: Position) -> Result<Color> {
        let idx = self.geometry.index_of(pos)?;
        Ok(self.cells[idx.as_usize()])
    }

    fn write_cell(&mut self, pos: Position, color: Color) -> Result<()> {
        let idx = self.geometry.index_of(pos)?;
        self.cells[idx.as_usize()] = color;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.cells.fill(Color::BACKGROUND);
        Ok(())
    }
}

impl fmt::Display for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for row in self.cells.chunks(self.geometry.width() as usize) {
            for color in row {
                match *color {
                    Color::SNAKE => write!(f, "s")?,
                    Color::APPLE => write!(f, "a")?,
                    Color::BACKGROUND => write!(f, ".")?,
                    _ => write!(f, "?")?,
                }
                write!(f, " ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
