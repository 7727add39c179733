//! errors surfaced by the engine. Collisions are not errors, they come back as `StepResult`s
use std::fmt::{self, Display, Formatter};

use crate::session::SessionState;
use crate::types::Position;

/// Everything that can go wrong driving the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// the matrix cannot hold a single 2x2 block
    InvalidGeometry {
        #[allow(missing_docs)]
        width: u32,
        #[allow(missing_docs)]
        height: u32,
    },
    /// a cell outside the matrix was read or written
    OutOfBounds {
        #[allow(missing_docs)]
        position: Position,
    },
    /// the cell is already taken
    Occupied {
        #[allow(missing_docs)]
        position: Position,
    },
    /// no free block was found for the apple
    PlacementExhausted {
        #[allow(missing_docs)]
        attempts: u32,
    },
    /// every segment slot is already in use
    SnakeFull {
        #[allow(missing_docs)]
        capacity: usize,
    },
    /// the session already ended
    SessionOver {
        #[allow(missing_docs)]
        state: SessionState,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidGeometry { width, height } => write!(
                f,
                "a {}x{} matrix is too small, both sides must be at least 2",
                width, height
            ),
            Error::OutOfBounds { position } => write!(f, "cell {} is off the matrix", position),
            Error::Occupied { position } => write!(f, "cell {} is already occupied", position),
            Error::PlacementExhausted { attempts } => {
                write!(f, "no free block for the apple after {} attempts", attempts)
            }
            Error::SnakeFull { capacity } => {
                write!(f, "snake already holds all {} segments", capacity)
            }
            Error::SessionOver { state } => write!(f, "session is over ({:?})", state),
        }
    }
}

impl std::error::Error for Error {}

#[allow(missing_docs)]
pub type Result<T> = std::result::Result<T, Error>;
