//! various types that are useful for working with the snake engine
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::time::Duration;

/// A vector with which to do positional math
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector {
    /// x offset (columns)
    pub x: i32,
    /// y offset (rows)
    pub y: i32,
}

impl Vector {
    /// scales this vector by `factor`
    pub fn scale(self, factor: i32) -> Vector {
        Vector {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

/// A cell coordinate on the matrix. `x` is the column, `y` is the row, row 0 is the top row.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    /// column
    pub x: i32,
    /// row
    pub y: i32,
}

impl Position {
    #[allow(missing_docs)]
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// offsets this position by the given vector
    pub fn add_vec(&self, v: Vector) -> Position {
        Position {
            x: self.x + v.x,
            y: self.y + v.y,
        }
    }

    /// the vector from the origin to this position
    pub fn to_vector(&self) -> Vector {
        Vector {
            x: self.x,
            y: self.y,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Represents a direction of travel
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[allow(missing_docs)]
    Up,
    #[allow(missing_docs)]
    Down,
    #[allow(missing_docs)]
    Left,
    #[allow(missing_docs)]
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

impl Direction {
    /// convert this direction to a unit vector. Rows grow downwards, so Up is negative y
    pub fn to_vector(self) -> Vector {
        match self {
            Direction::Left => Vector { x: -1, y: 0 },
            Direction::Right => Vector { x: 1, y: 0 },
            Direction::Up => Vector { x: 0, y: -1 },
            Direction::Down => Vector { x: 0, y: 1 },
        }
    }

    /// returns all directions, in input priority order
    pub const fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }

    /// the direction pointing the other way
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// checks if a given direction is not opposite this direction. e.g. Up is not opposite to Left, but is opposite to Down
    pub fn is_not_opposite(&self, other: &Direction) -> bool {
        self.opposite() != *other
    }
}

/// A packed `0xRRGGBB` color as stored in one LED register
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Color(pub u32);

impl Color {
    /// unlit LED
    pub const BACKGROUND: Color = Color(0x000000);
    /// snake body
    pub const SNAKE: Color = Color(0xFF0000);
    /// apple
    pub const APPLE: Color = Color(0x00E100);
    /// corner LED while waiting for a restart
    pub const BLINK: Color = Color(0xFF8000);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// What the head is about to run into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionOutcome {
    /// free cells
    None,
    /// the snake's own body
    SelfHit,
    /// the apple
    Apple,
}

/// Result of one simulated step
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepResult {
    /// the snake moved or grew, keep stepping
    Continue,
    /// the next block would leave the matrix
    BoundaryCollided,
    /// the next block overlaps the snake
    SelfCollided,
}

impl StepResult {
    /// true for both collision results
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StepResult::Continue)
    }
}

/// One sample of the four d-pad lines
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionInputs {
    #[allow(missing_docs)]
    pub up: bool,
    #[allow(missing_docs)]
    pub down: bool,
    #[allow(missing_docs)]
    pub left: bool,
    #[allow(missing_docs)]
    pub right: bool,
}

impl DirectionInputs {
    /// no lines asserted
    pub fn none() -> Self {
        Self::default()
    }

    /// only the line for `direction` asserted
    pub fn pressed(direction: Direction) -> Self {
        let mut inputs = Self::none();
        match direction {
            Direction::Up => inputs.up = true,
            Direction::Down => inputs.down = true,
            Direction::Left => inputs.left = true,
            Direction::Right => inputs.right = true,
        }
        inputs
    }

    /// builds inputs from raw register values, a line is asserted when it reads 1
    pub fn from_lines(up: u32, down: u32, left: u32, right: u32) -> Self {
        DirectionInputs {
            up: up == 1,
            down: down == 1,
            left: left == 1,
            right: right == 1,
        }
    }

    /// is the line for `direction` asserted
    pub fn is_pressed(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Picks the next direction of travel. The first asserted line in `Direction::all()` order
    /// that does not reverse `current` wins; with no such line the snake keeps going.
    pub fn resolve(&self, current: Direction) -> Direction {
        IntoIterator::into_iter(Direction::all())
            .find(|d| self.is_pressed(*d) && current.is_not_opposite(d))
            .unwrap_or(current)
    }
}

/// Instruments to be used with session stepping
pub trait SessionInstruments: Debug {
    #[allow(missing_docs)]
    fn observe_step(&self, duration: Duration, result: StepResult);
}

/// Instruments that drop every observation
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInstruments;

impl SessionInstruments for NoopInstruments {
    fn observe_step(&self, _duration: Duration, _result: StepResult) {}
}
