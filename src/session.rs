//! One playthrough, from an empty matrix to a collision.
//!
//! A [Session] owns the board, the snake and the apple. Every call to [Session::step] samples the
//! d-pad once, moves the snake one block and reports whether the game goes on.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::config::SessionConfig;
use crate::engine::{classify_block, classify_colors, Apple, Board, CollisionMode, Occupant, Snake};
use crate::error::{Error, Result};
use crate::platform::{Delay, DirectionPad};
use crate::surface::{Block, Surface};
use crate::types::{CollisionOutcome, Direction, DirectionInputs, SessionInstruments, StepResult};

/// Where a session is in its life
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// steps are accepted
    Running,
    /// the head ran into the body
    SelfCollided,
    /// the head would have left the matrix
    BoundaryCollided,
    /// snake and apple were released
    Terminated,
}

/// What is left after a session is torn down
#[derive(Debug)]
pub struct Teardown<S: Surface> {
    /// the matrix, as the session left it
    pub surface: S,
    /// segments released with the snake
    pub segments_released: usize,
    /// where the apple was when it was released
    pub apple: Option<Block>,
    /// the state the session ended in
    pub final_state: SessionState,
    /// steps that moved the snake
    pub steps: u64,
}

/// A running game
#[derive(Debug)]
pub struct Session<S: Surface> {
    board: Board<S>,
    snake: Snake,
    apple: Apple,
    direction: Direction,
    state: SessionState,
    config: SessionConfig,
    steps: u64,
}

impl<S: Surface> Session<S> {
    /// Clears `surface`, puts the snake at `config.origin` and places the first apple
    pub fn new(surface: S, config: SessionConfig) -> Result<Self> {
        let mut board = Board::new(surface)?;
        let snake = Snake::new(&mut board, config.origin)?;
        let mut apple = Apple::new(config.seed, config.max_placement_attempts);
        apple.spawn(&mut board)?;
        let geometry = board.geometry();
        info!(
            width = geometry.width(),
            height = geometry.height(),
            seed = config.seed,
            "started session"
        );
        Ok(Session {
            board,
            snake,
            apple,
            direction: config.initial_direction,
            state: SessionState::Running,
            config,
            steps: 0,
        })
    }

    #[allow(missing_docs)]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// current direction of travel
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[allow(missing_docs)]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[allow(missing_docs)]
    pub fn apple(&self) -> &Apple {
        &self.apple
    }

    #[allow(missing_docs)]
    pub fn board(&self) -> &Board<S> {
        &self.board
    }

    #[allow(missing_docs)]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// steps that moved the snake so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Moves the apple onto `block`, which has to be free
    pub fn move_apple_to(&mut self, block: Block) -> Result<()> {
        self.apple.place_at(&mut self.board, block)?;
        Ok(())
    }

    /// Runs one step with `inputs` sampled from the d-pad. Collisions come back as terminal
    /// `StepResult`s; stepping a session that already collided is an error. Any other error ends
    /// the session as `Terminated`, e.g. `PlacementExhausted` once the snake has eaten the last
    /// apple the matrix can hold.
    #[instrument(level = "trace", skip_all, fields(step = self.steps))]
    pub fn step<I: SessionInstruments>(
        &mut self,
        inputs: DirectionInputs,
        instruments: &I,
    ) -> Result<StepResult> {
        if self.state != SessionState::Running {
            return Err(Error::SessionOver { state: self.state });
        }
        let start = Instant::now();
        let result = match self.simulate_step(inputs) {
            Ok(result) => result,
            Err(e) => {
                self.state = SessionState::Terminated;
                warn!(
                    error = %e,
                    length = self.snake.length(),
                    steps = self.steps,
                    "session aborted"
                );
                return Err(e);
            }
        };
        instruments.observe_step(start.elapsed(), result);
        Ok(result)
    }

    fn simulate_step(&mut self, inputs: DirectionInputs) -> Result<StepResult> {
        self.direction = inputs.resolve(self.direction);
        let next = self.snake.next_head(self.direction);

        if !self.board.geometry().contains_block(next.origin()) {
            return Ok(self.finish(SessionState::BoundaryCollided));
        }

        let moved = match self.probe(&next)? {
            CollisionOutcome::SelfHit => return Ok(self.finish(SessionState::SelfCollided)),
            CollisionOutcome::Apple => {
                // the apple is eaten even when no block is left for the next one
                let relocated = self.apple.relocate(&mut self.board, Some(next));
                self.snake.grow(&mut self.board, self.direction)?;
                relocated.map(|_| ())
            }
            CollisionOutcome::None => self.snake.advance(&mut self.board, self.direction),
        };
        self.steps += 1;
        moved?;
        Ok(StepResult::Continue)
    }

    fn probe(&self, next: &Block) -> Result<CollisionOutcome> {
        match self.config.collision_mode {
            CollisionMode::Exact => Ok(classify_block(&self.board, next)),
            CollisionMode::LeadingCells => classify_colors(
                self.board.surface(),
                self.snake.head_leading_cells(self.direction),
            ),
        }
    }

    fn finish(&mut self, state: SessionState) -> StepResult {
        self.state = state;
        info!(
            ?state,
            length = self.snake.length(),
            steps = self.steps,
            "session over"
        );
        match state {
            SessionState::SelfCollided => StepResult::SelfCollided,
            _ => StepResult::BoundaryCollided,
        }
    }

    /// Steps until a collision, reading `pad` once per step and waiting `step_delay_ms` between
    /// steps
    pub fn run<P: DirectionPad, D: Delay, I: SessionInstruments>(
        &mut self,
        pad: &mut P,
        delay: &mut D,
        instruments: &I,
    ) -> Result<StepResult> {
        loop {
            let result = self.step(pad.read(), instruments)?;
            if result.is_terminal() {
                return Ok(result);
            }
            delay.delay_ms(self.config.step_delay_ms);
        }
    }

    /// Checks the board, the snake chain and the apple against each other. With the leading cell
    /// probe the snake can cover part of the apple, so the apple is only checked in exact mode.
    pub fn assert_consistency(&self) -> bool {
        if !self.board.assert_consistency() || !self.snake.assert_consistency(&self.board) {
            return false;
        }
        if self.config.collision_mode != CollisionMode::Exact {
            return true;
        }
        match self.apple.block() {
            Some(apple) => {
                !self.snake.iter().any(|segment| segment.overlaps(&apple))
                    && apple
                        .cells()
                        .iter()
                        .all(|c| self.board.occupant(*c) == Ok(Occupant::Apple))
            }
            None => true,
        }
    }

    /// Releases the snake and the apple and hands the surface back
    pub fn teardown(self) -> Teardown<S> {
        let final_state = match self.state {
            SessionState::Running => SessionState::Terminated,
            state => state,
        };
        let segments_released = self.snake.release();
        let apple = self.apple.release();
        info!(segments_released, ?final_state, "tore down session");
        Teardown {
            surface: self.board.into_surface(),
            segments_released,
            apple,
            final_state,
            steps: self.steps,
        }
    }
}
