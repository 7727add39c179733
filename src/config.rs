//! Session parameters
use serde::{Deserialize, Serialize};
use std::error::Error;

use crate::engine::CollisionMode;
use crate::types::{Direction, Position};

/// Everything a session needs besides the matrix itself. Missing fields in JSON fall back to the
/// defaults, which match the LED matrix game: first apple drawn from seed 60, snake in the top
/// left corner heading down.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    /// seed for the first apple draw
    pub seed: u64,
    /// top left cell of the snake's first segment
    pub origin: Position,
    #[allow(missing_docs)]
    pub initial_direction: Direction,
    /// pause between steps
    pub step_delay_ms: u32,
    /// length of each half of the corner blink while waiting for a restart
    pub blink_delay_ms: u32,
    /// chained apple draws before falling back to sweeping the board
    pub max_placement_attempts: u32,
    #[allow(missing_docs)]
    pub collision_mode: CollisionMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            seed: 60,
            origin: Position::new(0, 0),
            initial_direction: Direction::Down,
            step_delay_ms: 1,
            blink_delay_ms: 2,
            max_placement_attempts: 4096,
            collision_mode: CollisionMode::Exact,
        }
    }
}

impl SessionConfig {
    /// parses a config from JSON
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: SessionConfig = serde_json::from_str(json)?;
        Ok(config)
    }

    /// this config with a different seed
    pub fn with_seed(self, seed: u64) -> Self {
        SessionConfig { seed, ..self }
    }

    /// this config with a different collision probe
    pub fn with_collision_mode(self, collision_mode: CollisionMode) -> Self {
        SessionConfig {
            collision_mode,
            ..self
        }
    }
}
