//! Classifies what the head is about to run into.
//!
//! Two probes are available. [classify_block] checks every cell of the block the head would move
//! into against the occupancy map, and is exact. [classify_colors] reads the two leading cells off
//! the rendered surface, which is how the LED hardware version did it: cheap, but it only sees
//! half of the next block and relies on the three colors staying distinct.
//!
//! Both give self collisions priority over apples.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::surface::{Block, Surface};
use crate::types::{Color, CollisionOutcome, Position};

use super::board::{Board, Occupant};

/// Which probe the session uses
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollisionMode {
    /// all four cells of the next block, from the occupancy map
    #[default]
    Exact,
    /// the two leading cells, from surface colors
    LeadingCells,
}

/// exact check of `block` against the occupancy map. Cells off the matrix are ignored, bounds are
/// the caller's concern
pub fn classify_block<S: Surface>(board: &Board<S>, block: &Block) -> CollisionOutcome {
    let occupants = block
        .cells()
        .iter()
        .filter_map(|c| board.occupant(*c).ok())
        .collect::<Vec<_>>();
    if occupants.contains(&Occupant::Snake) {
        CollisionOutcome::SelfHit
    } else if occupants.contains(&Occupant::Apple) {
        CollisionOutcome::Apple
    } else {
        CollisionOutcome::None
    }
}

/// reads the colors at the two leading cells
pub fn classify_colors<S: Surface>(
    surface: &S,
    leading: [Position; 2],
) -> Result<CollisionOutcome> {
    let first = surface.read_cell(leading[0])?;
    let second = surface.read_cell(leading[1])?;
    let outcome = if first == Color::SNAKE || second == Color::SNAKE {
        CollisionOutcome::SelfHit
    } else if first == Color::APPLE || second == Color::APPLE {
        CollisionOutcome::Apple
    } else {
        CollisionOutcome::None
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::surface::{Framebuffer, Geometry};
    use crate::types::Direction;

    fn board() -> Board<Framebuffer> {
        Board::new(Framebuffer::new(Geometry::new(8, 8).unwrap())).unwrap()
    }

    #[test]
    fn test_colors() {
        let mut fb = Framebuffer::new(Geometry::new(4, 4).unwrap());
        let leading = [Position::new(2, 0), Position::new(2, 1)];
        assert_eq!(classify_colors(&fb, leading), Ok(CollisionOutcome::None));

        fb.write_cell(Position::new(2, 1), Color::APPLE).unwrap();
        assert_eq!(classify_colors(&fb, leading), Ok(CollisionOutcome::Apple));

        fb.write_cell(Position::new(2, 0), Color::SNAKE).unwrap();
        assert_eq!(classify_colors(&fb, leading), Ok(CollisionOutcome::SelfHit));
    }

    #[test]
    fn test_colors_off_matrix() {
        let fb = Framebuffer::new(Geometry::new(4, 4).unwrap());
        let leading = [Position::new(4, 0), Position::new(4, 1)];
        assert_eq!(
            classify_colors(&fb, leading),
            Err(Error::OutOfBounds {
                position: Position::new(4, 0)
            })
        );
    }

    #[test]
    fn test_unknown_colors_are_free() {
        let mut fb = Framebuffer::new(Geometry::new(4, 4).unwrap());
        fb.write_cell(Position::new(0, 0), Color::BLINK).unwrap();
        let leading = [Position::new(0, 0), Position::new(1, 0)];
        assert_eq!(classify_colors(&fb, leading), Ok(CollisionOutcome::None));
    }

    #[test]
    fn test_block_self_beats_apple() {
        let mut b = board();
        b.fill_block(&Block::new(Position::new(2, 2)), Occupant::Apple)
            .unwrap();
        b.fill_block(&Block::new(Position::new(4, 2)), Occupant::Snake)
            .unwrap();
        assert_eq!(
            classify_block(&b, &Block::new(Position::new(3, 2))),
            CollisionOutcome::SelfHit
        );
        assert_eq!(
            classify_block(&b, &Block::new(Position::new(1, 1))),
            CollisionOutcome::Apple
        );
        assert_eq!(
            classify_block(&b, &Block::new(Position::new(6, 6))),
            CollisionOutcome::None
        );
    }

    #[test]
    fn test_block_sees_what_leading_cells_miss() {
        // apple straddling the far column of the next block
        let mut b = board();
        b.fill_block(&Block::new(Position::new(3, 0)), Occupant::Apple)
            .unwrap();
        let head = Block::new(Position::new(0, 0));
        let next = head.in_direction(Direction::Right);
        let leading = head.leading_cells(Direction::Right);
        assert_eq!(
            classify_colors(b.surface(), leading),
            Ok(CollisionOutcome::None)
        );
        assert_eq!(classify_block(&b, &next), CollisionOutcome::Apple);
    }
}
