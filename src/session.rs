//! Fixed-cadence session driver
//!
//! Wraps a `GameState` behind an accumulator so any scheduler (a
//! requestAnimationFrame loop, a timer, or a test calling it directly) can
//! feed elapsed wall time while the simulation itself only ever advances in
//! whole ticks of the configured interval (100 ms by default). One tick
//! fully completes before the next; input lands between ticks via
//! `set_direction`.

use crate::consts::MAX_TICKS_PER_FRAME;
use crate::sim::{Direction, GameState, Grid, Snapshot, TickOutcome, tick};

/// Largest elapsed span accepted per frame; anything longer (tab hidden,
/// debugger pause) is clamped instead of replayed.
const MAX_FRAME_MS: f64 = 1000.0;

/// One real-time play session
#[derive(Debug)]
pub struct GameSession {
    state: GameState,
    /// Tick interval in milliseconds, from the player's settings
    tick_ms: f64,
    accumulator_ms: f64,
    pending_result: Option<u32>,
}

impl GameSession {
    pub fn new(grid: Grid, seed: u64, tick_ms: u32) -> Self {
        Self {
            state: GameState::new(grid, seed),
            tick_ms: tick_ms as f64,
            accumulator_ms: 0.0,
            pending_result: None,
        }
    }

    /// Start (or restart) a run
    pub fn start(&mut self) {
        self.accumulator_ms = 0.0;
        self.pending_result = None;
        self.state.start();
    }

    /// Halt the run; no tick executes after this
    pub fn stop(&mut self) {
        self.accumulator_ms = 0.0;
        self.state.stop();
    }

    pub fn set_direction(&mut self, dir: Direction) {
        self.state.set_direction(dir);
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Feed elapsed wall time and run however many fixed ticks fit,
    /// bounded per call to prevent the spiral of death.
    pub fn advance(&mut self, elapsed_ms: f64) {
        if !self.state.is_running() {
            self.accumulator_ms = 0.0;
            return;
        }
        self.accumulator_ms += elapsed_ms.clamp(0.0, MAX_FRAME_MS);

        let mut steps = 0;
        while self.accumulator_ms >= self.tick_ms && steps < MAX_TICKS_PER_FRAME {
            self.accumulator_ms -= self.tick_ms;
            steps += 1;

            if let TickOutcome::GameOver { final_score } = tick(&mut self.state) {
                self.pending_result = Some(final_score);
                self.accumulator_ms = 0.0;
                return;
            }
        }
    }

    /// The final score of a just-ended run, surfaced exactly once per
    /// session. Settlement hangs off this, keeping the ledger write off
    /// the tick path.
    pub fn take_result(&mut self) -> Option<u32> {
        self.pending_result.take()
    }
}
