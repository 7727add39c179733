#![deny(missing_debug_implementations, missing_docs)]
//! Game engine for snake on a memory-mapped LED matrix, driven by a d-pad and a reset switch.
//!
//! The snake and the apple are 2x2 blocks of LEDs. A [session::Session] owns one game: every
//! step it samples the d-pad, refuses to reverse into the snake's own neck, and moves the head
//! one block. What the head runs into is decided by an occupancy map kept next to the
//! framebuffer, so colors only matter for display.
//!
//! ```
//! use matrix_snake::config::SessionConfig;
//! use matrix_snake::session::Session;
//! use matrix_snake::surface::{Framebuffer, Geometry};
//! use matrix_snake::types::{Direction, DirectionInputs, NoopInstruments, StepResult};
//!
//! let surface = Framebuffer::new(Geometry::new(35, 25).unwrap());
//! let mut session = Session::new(surface, SessionConfig::default()).unwrap();
//! let result = session
//!     .step(DirectionInputs::pressed(Direction::Right), &NoopInstruments)
//!     .unwrap();
//! assert_eq!(result, StepResult::Continue);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod platform;
pub mod session;
pub mod surface;
pub mod types;

pub use error::{Error, Result};
