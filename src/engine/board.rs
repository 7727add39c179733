use itertools::Itertools;

use crate::error::Result;
use crate::surface::{Block, CellIndex, Geometry, Surface};
use crate::types::{Color, Position};

/// What logically sits on a cell
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Occupant {
    #[allow(missing_docs)]
    Empty = 0x00,
    #[allow(missing_docs)]
    Snake = 0x01,
    #[allow(missing_docs)]
    Apple = 0x02,
}

impl Occupant {
    /// the color this occupant is rendered with
    pub fn color(&self) -> Color {
        match self {
            Occupant::Empty => Color::BACKGROUND,
            Occupant::Snake => Color::SNAKE,
            Occupant::Apple => Color::APPLE,
        }
    }
}

/// The surface together with the logical occupancy of every cell.
///
/// The occupancy map is the source of truth for collisions. The surface only ever receives the
/// colors that follow from it, so the two cannot drift apart as long as all painting goes
/// through `fill_block`.
#[derive(Debug)]
pub struct Board<S: Surface> {
    surface: S,
    geometry: Geometry,
    cells: Vec<Occupant>,
}

impl<S: Surface> Board<S> {
    /// wraps `surface`, clearing it
    pub fn new(mut surface: S) -> Result<Self> {
        let geometry = surface.geometry();
        surface.clear()?;
        Ok(Board {
            surface,
            geometry,
            cells: vec![Occupant::Empty; geometry.cell_count()],
        })
    }

    #[allow(missing_docs)]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    #[allow(missing_docs)]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[allow(missing_docs)]
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[allow(missing_docs)]
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// resets every cell to empty and clears the surface
    pub fn clear(&mut self) -> Result<()> {
        self.cells.fill(Occupant::Empty);
        self.surface.clear()
    }

    /// who sits on `pos`
    pub fn occupant(&self, pos: Position) -> Result<Occupant> {
        let idx = self.geometry.index_of(pos)?;
        Ok(self.cells[idx.as_usize()])
    }

    /// Marks all four cells of `block` as `occupant` and paints them. The whole block is checked
    /// against the matrix before anything is written.
    pub fn fill_block(&mut self, block: &Block, occupant: Occupant) -> Result<()> {
        let indices = block
            .cells()
            .iter()
            .map(|c| self.geometry.index_of(*c))
            .collect::<Result<Vec<_>>>()?;
        for idx in indices {
            self.cells[idx.as_usize()] = occupant;
        }
        self.surface.paint_block(block, occupant.color())
    }

    /// Empties the cells of `block` that still hold `occupant`, leaving cells that something else
    /// has since painted over alone
    pub fn vacate_block(&mut self, block: &Block, occupant: Occupant) -> Result<()> {
        self.geometry.check_block(block)?;
        for cell in block.cells() {
            let idx = self.geometry.index_of(cell)?;
            if self.cells[idx.as_usize()] == occupant {
                self.cells[idx.as_usize()] = Occupant::Empty;
                self.surface.write_cell(cell, Color::BACKGROUND)?;
            }
        }
        Ok(())
    }

    /// are all four cells of `block` on the matrix and empty
    pub fn is_free_block(&self, block: &Block) -> bool {
        block
            .cells()
            .iter()
            .all(|c| matches!(self.occupant(*c), Ok(Occupant::Empty)))
    }

    /// how many cells hold `occupant`
    pub fn count(&self, occupant: Occupant) -> usize {
        self.cells.iter().filter(|c| **c == occupant).count()
    }

    /// Checks that every cell on the surface shows the color of its occupant
    pub fn assert_consistency(&self) -> bool {
        self.cells.iter().enumerate().all(|(idx, occupant)| {
            let pos = self.geometry.position_of(CellIndex(idx));
            self.surface.read_cell(pos) == Ok(occupant.color())
        })
    }

    /// one line per row, `s` snake `a` apple `.` empty
    pub fn render_occupancy(&self) -> String {
        self.cells
            .chunks(self.geometry.width() as usize)
            .map(|row| {
                row.iter()
                    .map(|o| match o {
                        Occupant::Empty => '.',
                        Occupant::Snake => 's',
                        Occupant::Apple => 'a',
                    })
                    .join(" ")
            })
            .join("\n")
    }
}
