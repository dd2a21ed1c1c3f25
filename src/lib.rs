//! PlayPoints Neon Snake - a points-reward arcade game
//!
//! Core modules:
//! - `sim`: Deterministic grid simulation (snake movement, collisions, score)
//! - `session`: Fixed-cadence driver wrapping the sim for real-time play
//! - `ledger`: Persistent per-user points store and play history
//! - `rewards`: Score-to-points settlement after a game ends
//! - `leaderboard`: Ranked view over the ledger
//! - `renderer`: Canvas 2D drawing (wasm only)
//! - `platform`: Browser/native time and storage abstraction

pub mod leaderboard;
pub mod ledger;
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod rewards;
pub mod session;
pub mod settings;
pub mod sim;

pub use ledger::{LedgerError, RewardLedger};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation tick interval (the classic cadence: 10 Hz)
    pub const TICK_MS: u32 = 100;
    /// Maximum ticks processed per frame to prevent spiral of death
    pub const MAX_TICKS_PER_FRAME: u32 = 4;

    /// Grid cell edge length in pixels
    pub const CELL_SIZE: u32 = 20;
    /// Default play field dimensions (pixels)
    pub const CANVAS_WIDTH: u32 = 400;
    pub const CANVAS_HEIGHT: u32 = 400;

    /// Points added to the score per food eaten
    pub const FOOD_SCORE: u32 = 10;
    /// Game name recorded in history entries
    pub const GAME_NAME: &str = "Neon Snake";
}
