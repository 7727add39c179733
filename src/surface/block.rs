use serde::{Deserialize, Serialize};

use crate::types::{Direction, Position};

/// cells a block moves per step, a block is two cells wide
pub const BLOCK_STEP: i32 = 2;

/// A 2x2 group of cells, identified by its top left corner
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Block {
    origin: Position,
}

impl Block {
    #[allow(missing_docs)]
    pub fn new(origin: Position) -> Self {
        Block { origin }
    }

    /// the top left cell
    pub fn origin(&self) -> Position {
        self.origin
    }

    /// origin, one column right, one row down, one row down and one column right
    pub fn cells(&self) -> [Position; 4] {
        let Position { x, y } = self.origin;
        [
            Position::new(x, y),
            Position::new(x + 1, y),
            Position::new(x, y + 1),
            Position::new(x + 1, y + 1),
        ]
    }

    /// the block one full block step away in `direction`
    pub fn in_direction(&self, direction: Direction) -> Block {
        Block::new(
            self.origin
                .add_vec(direction.to_vector().scale(BLOCK_STEP)),
        )
    }

    /// The two cells directly ahead of this block's leading edge. They belong to the block
    /// returned by `in_direction`, on the edge nearest this one.
    pub fn leading_cells(&self, direction: Direction) -> [Position; 2] {
        let Position { x, y } = self.origin;
        match direction {
            Direction::Up => [Position::new(x, y - 1), Position::new(x + 1, y - 1)],
            Direction::Down => [Position::new(x, y + 2), Position::new(x + 1, y + 2)],
            Direction::Left => [Position::new(x - 1, y), Position::new(x - 1, y + 1)],
            Direction::Right => [Position::new(x + 2, y), Position::new(x + 2, y + 1)],
        }
    }

    /// do the two blocks share any cell
    pub fn overlaps(&self, other: &Block) -> bool {
        (self.origin.x - other.origin.x).abs() < 2 && (self.origin.y - other.origin.y).abs() < 2
    }

    /// is `other` exactly one block step away along a single axis
    pub fn is_adjacent(&self, other: &Block) -> bool {
        let dx = (self.origin.x - other.origin.x).abs();
        let dy = (self.origin.y - other.origin.y).abs();
        (dx == BLOCK_STEP && dy == 0) || (dx == 0 && dy == BLOCK_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells() {
        let b = Block::new(Position::new(4, 6));
        assert_eq!(
            b.cells(),
            [
                Position::new(4, 6),
                Position::new(5, 6),
                Position::new(4, 7),
                Position::new(5, 7)
            ]
        );
    }

    #[test]
    fn test_leading_cells_are_inside_next_block() {
        let b = Block::new(Position::new(4, 4));
        for d in Direction::all() {
            let next = b.in_direction(d).cells();
            for cell in b.leading_cells(d) {
                assert!(next.contains(&cell), "{} {:?}", d, cell);
            }
        }
        assert_eq!(
            b.leading_cells(Direction::Up),
            [Position::new(4, 3), Position::new(5, 3)]
        );
        assert_eq!(
            b.leading_cells(Direction::Right),
            [Position::new(6, 4), Position::new(6, 5)]
        );
    }

    #[test]
    fn test_overlap_and_adjacency() {
        let b = Block::new(Position::new(2, 2));
        assert!(b.overlaps(&b));
        assert!(b.overlaps(&Block::new(Position::new(3, 1))));
        assert!(!b.overlaps(&Block::new(Position::new(4, 2))));
        assert!(b.is_adjacent(&Block::new(Position::new(4, 2))));
        assert!(b.is_adjacent(&Block::new(Position::new(2, 0))));
        assert!(!b.is_adjacent(&Block::new(Position::new(4, 4))));
        assert!(!b.is_adjacent(&Block::new(Position::new(3, 2))));
    }
}
