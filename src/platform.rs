//! The hardware the engine talks to, and the outer loop that restarts the game.
//!
//! The d-pad, the reset switch and the delay are traits so the same loop runs against registers,
//! a terminal or a test script. [Console] is the loop itself: play a round, then blink the corner
//! LED until the switch is pressed, then start over.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::session::{Session, Teardown};
use crate::surface::Surface;
use crate::types::{Color, DirectionInputs, Position, SessionInstruments};

/// bit of the switch register wired to the reset switch
pub const SWITCH_0: u32 = 0x01;

/// is the reset switch set in a raw switch register value
pub fn switch_0_pressed(register: u32) -> bool {
    register & SWITCH_0 != 0
}

/// Source of d-pad samples
pub trait DirectionPad {
    /// samples all four lines at once
    fn read(&mut self) -> DirectionInputs;
}

impl<F: FnMut() -> DirectionInputs> DirectionPad for F {
    fn read(&mut self) -> DirectionInputs {
        self()
    }
}

/// The switch that restarts the game
pub trait ResetSwitch {
    #[allow(missing_docs)]
    fn is_pressed(&mut self) -> bool;
}

/// A reset switch read from the raw switch register, `read` returns the register value
#[derive(Debug, Clone, Copy)]
pub struct RegisterSwitch<F: FnMut() -> u32> {
    read: F,
}

impl<F: FnMut() -> u32> RegisterSwitch<F> {
    #[allow(missing_docs)]
    pub fn new(read: F) -> Self {
        RegisterSwitch { read }
    }
}

impl<F: FnMut() -> u32> ResetSwitch for RegisterSwitch<F> {
    fn is_pressed(&mut self) -> bool {
        switch_0_pressed((self.read)())
    }
}

/// A blocking pause
pub trait Delay {
    #[allow(missing_docs)]
    fn delay_ms(&mut self, ms: u32);
}

/// Busy waits, the thread never yields
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinDelay;

impl Delay for SpinDelay {
    fn delay_ms(&mut self, ms: u32) {
        let until = Instant::now() + Duration::from_millis(ms as u64);
        while Instant::now() < until {
            std::hint::spin_loop();
        }
    }
}

/// Returns immediately, remembering how long it was asked to wait
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay {
    /// number of calls
    pub calls: u64,
    /// sum of all requested delays
    pub total_ms: u64,
}

impl Delay for NoDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.calls += 1;
        self.total_ms += ms as u64;
    }
}

/// Plays back a fixed list of samples, then reports no lines pressed
#[derive(Debug, Clone, Default)]
pub struct ScriptedPad {
    samples: VecDeque<DirectionInputs>,
}

impl ScriptedPad {
    #[allow(missing_docs)]
    pub fn new(samples: impl IntoIterator<Item = DirectionInputs>) -> Self {
        ScriptedPad {
            samples: samples.into_iter().collect(),
        }
    }

    /// samples not yet read
    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl DirectionPad for ScriptedPad {
    fn read(&mut self) -> DirectionInputs {
        self.samples.pop_front().unwrap_or_default()
    }
}

/// A switch that reports pressed after a fixed number of polls
#[derive(Debug, Clone, Copy)]
pub struct PressAfter {
    polls_left: u32,
}

impl PressAfter {
    #[allow(missing_docs)]
    pub fn new(polls: u32) -> Self {
        PressAfter { polls_left: polls }
    }
}

impl ResetSwitch for PressAfter {
    fn is_pressed(&mut self) -> bool {
        if self.polls_left == 0 {
            return true;
        }
        self.polls_left -= 1;
        false
    }
}

/// The outer game loop around sessions
#[derive(Debug)]
pub struct Console<P: DirectionPad, W: ResetSwitch, D: Delay> {
    pad: P,
    switch: W,
    delay: D,
    config: SessionConfig,
}

impl<P: DirectionPad, W: ResetSwitch, D: Delay> Console<P, W, D> {
    #[allow(missing_docs)]
    pub fn new(pad: P, switch: W, delay: D, config: SessionConfig) -> Self {
        Console {
            pad,
            switch,
            delay,
            config,
        }
    }

    #[allow(missing_docs)]
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Plays one session on `surface` until a collision and tears it down
    pub fn play_round<S: Surface, I: SessionInstruments>(
        &mut self,
        surface: S,
        instruments: &I,
    ) -> Result<Teardown<S>> {
        let mut session = Session::new(surface, self.config)?;
        let result = session.run(&mut self.pad, &mut self.delay, instruments)?;
        info!(?result, length = session.snake().length(), "round over");
        Ok(session.teardown())
    }

    /// Blinks the top left LED until the reset switch is pressed, returning the number of blinks
    pub fn wait_for_restart<S: Surface>(&mut self, surface: &mut S) -> Result<u32> {
        let corner = Position::new(0, 0);
        let mut blinks = 0;
        while !self.switch.is_pressed() {
            surface.write_cell(corner, Color::BLINK)?;
            self.delay.delay_ms(self.config.blink_delay_ms);
            surface.write_cell(corner, Color::BACKGROUND)?;
            self.delay.delay_ms(self.config.blink_delay_ms);
            blinks += 1;
        }
        debug!(blinks, "restart requested");
        Ok(blinks)
    }

    /// Plays rounds back to back. Only returns when something fails
    pub fn run_forever<S: Surface, I: SessionInstruments>(
        &mut self,
        mut surface: S,
        instruments: &I,
    ) -> Error {
        loop {
            let round = self
                .play_round(surface, instruments)
                .and_then(|teardown| {
                    let mut surface = teardown.surface;
                    self.wait_for_restart(&mut surface)?;
                    Ok(surface)
                });
            match round {
                Ok(next) => surface = next,
                Err(e) => return e,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;
    use crate::surface::{Framebuffer, Geometry, RecordingSurface};
    use crate::types::{Direction, NoopInstruments};

    fn framebuffer() -> Framebuffer {
        Framebuffer::new(Geometry::new(10, 10).unwrap())
    }

    #[test]
    fn test_switch_register() {
        assert!(switch_0_pressed(0x01));
        assert!(switch_0_pressed(0xff));
        assert!(!switch_0_pressed(0x02));
    }

    #[test]
    fn test_register_switch_restarts_the_console() {
        let mut registers = vec![0x00, 0x02, 0x03].into_iter();
        let switch = RegisterSwitch::new(move || registers.next().unwrap_or(0));
        let mut console = Console::new(
            ScriptedPad::default(),
            switch,
            NoDelay::default(),
            SessionConfig::default(),
        );
        let mut surface = framebuffer();
        assert_eq!(console.wait_for_restart(&mut surface), Ok(2));
    }

    #[test]
    fn test_scripted_pad_runs_dry() {
        let mut pad = ScriptedPad::new(vec![DirectionInputs::pressed(Direction::Left)]);
        assert!(pad.read().left);
        assert_eq!(pad.remaining(), 0);
        assert_eq!(pad.read(), DirectionInputs::none());
    }

    #[test]
    fn test_closure_pad() {
        let mut pad = || DirectionInputs::pressed(Direction::Up);
        assert!(DirectionPad::read(&mut pad).up);
    }

    #[test]
    fn test_spin_delay_waits() {
        let start = Instant::now();
        SpinDelay.delay_ms(2);
        assert!(start.elapsed() >= Duration::from_millis(2));
    }

    #[test]
    fn test_play_round_straight_down() {
        // heading down from the top left corner with no input hits the bottom edge
        let mut console = Console::new(
            ScriptedPad::default(),
            PressAfter::new(0),
            NoDelay::default(),
            SessionConfig::default(),
        );
        let teardown = console.play_round(framebuffer(), &NoopInstruments).unwrap();
        assert_eq!(teardown.final_state, SessionState::BoundaryCollided);
        assert_eq!(teardown.steps, 4);
        assert_eq!(console.delay().calls, 4);
    }

    #[test]
    fn test_wait_for_restart_blinks_the_corner() {
        let mut console = Console::new(
            ScriptedPad::default(),
            PressAfter::new(3),
            NoDelay::default(),
            SessionConfig::default(),
        );
        let mut surface = RecordingSurface::new(framebuffer());
        assert_eq!(console.wait_for_restart(&mut surface), Ok(3));
        let writes = surface.take_writes();
        assert_eq!(writes.len(), 6);
        assert!(writes
            .iter()
            .all(|w| w.position == Position::new(0, 0)));
        assert_eq!(writes[0].color, Color::BLINK);
        assert_eq!(writes[5].color, Color::BACKGROUND);
        assert_eq!(console.delay().total_ms, 12);
    }

    #[derive(Debug)]
    struct BrokenSurface;

    impl Surface for BrokenSurface {
        fn geometry(&self) -> Geometry {
            Geometry::new(10, 10).unwrap()
        }

        fn read_cell(&self, pos: Position) -> Result<Color> {
            Err(Error::OutOfBounds { position: pos })
        }

        fn write_cell(&mut self, pos: Position, _color: Color) -> Result<()> {
            Err(Error::OutOfBounds { position: pos })
        }
    }

    #[test]
    fn test_run_forever_stops_on_errors() {
        let mut console = Console::new(
            ScriptedPad::default(),
            PressAfter::new(0),
            NoDelay::default(),
            SessionConfig::default(),
        );
        let error = console.run_forever(BrokenSurface, &NoopInstruments);
        assert!(matches!(error, Error::OutOfBounds { .. }));
    }
}
