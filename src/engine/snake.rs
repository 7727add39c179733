use itertools::Itertools;
use tracing::debug;

use crate::error::{Error, Result};
use crate::surface::{Block, Surface};
use crate::types::{Direction, Position};

use super::board::{Board, Occupant};

/// The snake's body: a chain of 2x2 segments from head to tail.
///
/// Segments live in a ring with one slot per block the matrix could ever hold, allocated once
/// when the snake is created. `head` and `tail` index into the ring, and walking from the head
/// towards the tail means stepping backwards through it. Moving without growing reuses the tail
/// slot for the new head, so only `grow` ever claims a new slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    ring: Box<[Block]>,
    head: usize,
    tail: usize,
    length: usize,
}

impl Snake {
    /// a single segment at `origin`, painted
    pub fn new<S: Surface>(board: &mut Board<S>, origin: Position) -> Result<Self> {
        let block = Block::new(origin);
        board.fill_block(&block, Occupant::Snake)?;
        let capacity = board.geometry().max_blocks();
        debug!(%origin, capacity, "created snake");
        Ok(Snake {
            ring: vec![block; capacity].into_boxed_slice(),
            head: 0,
            tail: 0,
            length: 1,
        })
    }

    /// number of live segments
    pub fn length(&self) -> usize {
        self.length
    }

    /// how many segments the snake can ever hold
    pub fn capacity(&self) -> usize {
        self.ring.len()
    }

    #[allow(missing_docs)]
    pub fn head_block(&self) -> Block {
        self.ring[self.head]
    }

    #[allow(missing_docs)]
    pub fn tail_block(&self) -> Block {
        self.ring[self.tail]
    }

    fn toward_head(&self, slot: usize) -> usize {
        (slot + 1) % self.capacity()
    }

    fn toward_tail(&self, slot: usize) -> usize {
        (slot + self.capacity() - 1) % self.capacity()
    }

    /// segments in order from head to tail
    pub fn iter(&self) -> impl Iterator<Item = Block> + '_ {
        let mut slot = self.head;
        (0..self.length).map(move |_| {
            let block = self.ring[slot];
            slot = self.toward_tail(slot);
            block
        })
    }

    /// the two cells just ahead of the head when moving in `direction`
    pub fn head_leading_cells(&self, direction: Direction) -> [Position; 2] {
        self.head_block().leading_cells(direction)
    }

    /// The block the head would occupy after one step in `direction`. It may be off the matrix.
    pub fn next_head(&self, direction: Direction) -> Block {
        self.head_block().in_direction(direction)
    }

    /// Moves one block in `direction` without growing: the tail is erased and its slot becomes
    /// the new head. Fails with `OutOfBounds` and leaves everything untouched if the new head
    /// would leave the matrix.
    pub fn advance<S: Surface>(&mut self, board: &mut Board<S>, direction: Direction) -> Result<()> {
        let new_head = self.next_head(direction);
        board.geometry().check_block(&new_head)?;

        board.fill_block(&self.tail_block(), Occupant::Empty)?;
        // with a single segment head and tail share a slot and both land on it again
        self.tail = self.toward_head(self.tail);
        self.head = self.toward_head(self.head);
        self.ring[self.head] = new_head;
        board.fill_block(&new_head, Occupant::Snake)
    }

    /// Adds a new head one block in `direction`, leaving the tail where it is
    pub fn grow<S: Surface>(&mut self, board: &mut Board<S>, direction: Direction) -> Result<()> {
        if self.length == self.capacity() {
            return Err(Error::SnakeFull {
                capacity: self.capacity(),
            });
        }
        let new_head = self.next_head(direction);
        board.fill_block(&new_head, Occupant::Snake)?;
        self.head = self.toward_head(self.head);
        self.ring[self.head] = new_head;
        self.length += 1;
        debug!(length = self.length, head = %new_head.origin(), "snake grew");
        Ok(())
    }

    /// Ends the snake's life, returning how many segments were released. The board is left as
    /// is, sessions clear it before the next round.
    pub fn release(self) -> usize {
        let released = self.iter().count();
        debug!(released, "released snake");
        released
    }

    /// Walks the chain and checks it against the board: the walk from head ends at the tail after
    /// exactly `length` segments, every segment is one block step from the next, and every
    /// segment cell is marked as snake.
    pub fn assert_consistency<S: Surface>(&self, board: &Board<S>) -> bool {
        if self.length == 0 || self.length > self.capacity() {
            return false;
        }
        if (self.head == self.tail) != (self.length == 1) {
            return false;
        }
        let mut slot = self.head;
        for _ in 1..self.length {
            slot = self.toward_tail(slot);
        }
        if slot != self.tail {
            return false;
        }
        if !self.iter().tuple_windows().all(|(a, b)| a.is_adjacent(&b)) {
            return false;
        }
        self.iter().all(|block| {
            block
                .cells()
                .iter()
                .all(|c| board.occupant(*c) == Ok(Occupant::Snake))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Framebuffer, Geometry};
    use crate::types::Color;

    fn board(width: u32, height: u32) -> Board<Framebuffer> {
        Board::new(Framebuffer::new(Geometry::new(width, height).unwrap())).unwrap()
    }

    fn origins(snake: &Snake) -> Vec<Position> {
        snake.iter().map(|b| b.origin()).collect()
    }

    #[test]
    fn test_new_paints_one_segment() {
        let mut b = board(10, 10);
        let snake = Snake::new(&mut b, Position::new(0, 0)).unwrap();
        assert_eq!(snake.length(), 1);
        assert_eq!(snake.head_block(), snake.tail_block());
        assert_eq!(snake.capacity(), 25);
        assert_eq!(b.surface().count(Color::SNAKE), 4);
        assert!(snake.assert_consistency(&b));
    }

    #[test]
    fn test_new_off_matrix() {
        let mut b = board(10, 10);
        assert_eq!(
            Snake::new(&mut b, Position::new(9, 0)),
            Err(Error::OutOfBounds {
                position: Position::new(10, 0)
            })
        );
    }

    #[test]
    fn test_single_segment_advance() {
        let mut b = board(10, 10);
        let mut snake = Snake::new(&mut b, Position::new(0, 0)).unwrap();
        snake.advance(&mut b, Direction::Down).unwrap();
        assert_eq!(origins(&snake), vec![Position::new(0, 2)]);
        assert_eq!(b.occupant(Position::new(0, 0)), Ok(Occupant::Empty));
        assert_eq!(b.surface().count(Color::SNAKE), 4);
        assert!(snake.assert_consistency(&b));
        assert!(b.assert_consistency());
    }

    #[test]
    fn test_advance_keeps_length() {
        let mut b = board(10, 10);
        let mut snake = Snake::new(&mut b, Position::new(0, 0)).unwrap();
        snake.grow(&mut b, Direction::Right).unwrap();
        snake.grow(&mut b, Direction::Right).unwrap();
        assert_eq!(snake.length(), 3);

        snake.advance(&mut b, Direction::Down).unwrap();
        assert_eq!(snake.length(), 3);
        assert_eq!(
            origins(&snake),
            vec![Position::new(4, 2), Position::new(4, 0), Position::new(2, 0)]
        );
        assert_eq!(b.count(Occupant::Snake), 12);
        assert!(snake.assert_consistency(&b));
        assert!(b.assert_consistency());
    }

    #[test]
    fn test_grow_keeps_tail() {
        let mut b = board(10, 10);
        let mut snake = Snake::new(&mut b, Position::new(0, 0)).unwrap();
        let tail = snake.tail_block();
        for d in [Direction::Down, Direction::Right, Direction::Right] {
            snake.grow(&mut b, d).unwrap();
            assert_eq!(snake.tail_block(), tail);
        }
        assert_eq!(snake.length(), 4);
        assert_eq!(snake.head_block().origin(), Position::new(4, 2));
        assert!(snake.assert_consistency(&b));
    }

    #[test]
    fn test_advance_off_matrix_changes_nothing() {
        let mut b = board(4, 4);
        let mut snake = Snake::new(&mut b, Position::new(2, 2)).unwrap();
        let before = snake.clone();
        assert!(snake.advance(&mut b, Direction::Right).is_err());
        assert_eq!(snake, before);
        assert_eq!(b.count(Occupant::Snake), 4);
    }

    #[test]
    fn test_ring_wraps_around() {
        // 4x4 holds four blocks, walk a square loop many times
        let mut b = board(4, 4);
        let mut snake = Snake::new(&mut b, Position::new(0, 0)).unwrap();
        snake.grow(&mut b, Direction::Right).unwrap();
        snake.grow(&mut b, Direction::Down).unwrap();
        let loop_moves = [
            Direction::Left,
            Direction::Up,
            Direction::Right,
            Direction::Down,
        ];
        for d in loop_moves.iter().cycle().take(17) {
            snake.advance(&mut b, *d).unwrap();
            assert!(snake.assert_consistency(&b));
        }
        assert_eq!(snake.length(), 3);
        assert_eq!(b.count(Occupant::Snake), 12);
    }

    #[test]
    fn test_grow_until_full() {
        let mut b = board(4, 4);
        let mut snake = Snake::new(&mut b, Position::new(0, 0)).unwrap();
        snake.grow(&mut b, Direction::Right).unwrap();
        snake.grow(&mut b, Direction::Down).unwrap();
        snake.grow(&mut b, Direction::Left).unwrap();
        assert_eq!(snake.length(), snake.capacity());
        assert_eq!(
            snake.grow(&mut b, Direction::Up),
            Err(Error::SnakeFull { capacity: 4 })
        );
        assert!(snake.assert_consistency(&b));
    }

    #[test]
    fn test_leading_cells() {
        let mut b = board(10, 10);
        let snake = Snake::new(&mut b, Position::new(4, 4)).unwrap();
        assert_eq!(
            snake.head_leading_cells(Direction::Down),
            [Position::new(4, 6), Position::new(5, 6)]
        );
        assert_eq!(
            snake.head_leading_cells(Direction::Left),
            [Position::new(3, 4), Position::new(3, 5)]
        );
    }

    #[test]
    fn test_release_returns_every_segment() {
        let mut b = board(10, 10);
        let mut snake = Snake::new(&mut b, Position::new(0, 0)).unwrap();
        assert_eq!(snake.clone().release(), 1);
        snake.grow(&mut b, Direction::Down).unwrap();
        snake.grow(&mut b, Direction::Down).unwrap();
        snake.advance(&mut b, Direction::Right).unwrap();
        assert_eq!(snake.release(), 3);
    }

    #[test]
    fn test_detects_broken_chain() {
        let mut b = board(10, 10);
        let mut snake = Snake::new(&mut b, Position::new(0, 0)).unwrap();
        snake.grow(&mut b, Direction::Down).unwrap();
        // paint over a body cell behind the snake's back
        b.fill_block(&Block::new(Position::new(0, 0)), Occupant::Empty)
            .unwrap();
        assert!(!snake.assert_consistency(&b));
    }
}
