//! The game state engine: the board with its occupancy map, the snake, the apple and the
//! collision probes that decide between them.

mod apple;
mod board;
mod collision;
mod snake;

pub use apple::{place, Apple};
pub use board::{Board, Occupant};
pub use collision::{classify_block, classify_colors, CollisionMode};
pub use snake::Snake;
