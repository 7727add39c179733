use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{Color, Position};

use super::{Geometry, Surface};

/// a single register write
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellWrite {
    #[allow(missing_docs)]
    pub position: Position,
    #[allow(missing_docs)]
    pub color: Color,
}

/// Wraps a surface and keeps every successful write, in order
#[derive(Debug, Clone)]
pub struct RecordingSurface<S: Surface> {
    inner: S,
    writes: Vec<CellWrite>,
}

impl<S: Surface> RecordingSurface<S> {
    #[allow(missing_docs)]
    pub fn new(inner: S) -> Self {
        RecordingSurface {
            inner,
            writes: vec![],
        }
    }

    /// writes seen since the last call
    pub fn take_writes(&mut self) -> Vec<CellWrite> {
        std::mem::take(&mut self.writes)
    }

    /// writes seen since the last `take_writes`
    pub fn writes(&self) -> &[CellWrite] {
        &self.writes
    }

    #[allow(missing_docs)]
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Surface> Surface for RecordingSurface<S> {
    fn geometry(&self) -> Geometry {
        self.inner.geometry()
    }

    fn read_cell(&self, pos: Position) -> Result<Color> {
        self.inner.read_cell(pos)
    }

    fn write_cell(&mut self, pos: Position, color: Color) -> Result<()> {
        self.inner.write_cell(pos, color)?;
        self.writes.push(CellWrite {
            position: pos,
            color,
        });
        Ok(())
    }
}
