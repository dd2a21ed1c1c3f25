//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one `tick` call = one grid step)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod grid;
pub mod state;
pub mod tick;

pub use grid::{Direction, Grid, GridError, GridPos};
pub use state::{GamePhase, GameState, Snapshot};
pub use tick::{TickOutcome, tick};
