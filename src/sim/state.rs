//! Game state and core simulation types

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Direction, Grid, GridPos};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No game in progress, waiting for start
    Idle,
    /// Active gameplay
    Running,
    /// Run ended on a wall or self collision
    GameOver,
}

/// Read-only view of the state for renderers and HUDs.
///
/// The engine stays renderer-agnostic: drawing code consumes this and
/// never touches the live state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub grid: Grid,
    /// Snake cells, head first
    pub snake: Vec<GridPos>,
    pub food: GridPos,
    pub score: u32,
    pub phase: GamePhase,
}

/// Complete simulation state for one play session.
///
/// One instance per game; nothing here outlives a session. Deterministic
/// given the seed and the input sequence.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub grid: Grid,
    /// Snake cells, head first. Insertion order defines body order.
    pub snake: VecDeque<GridPos>,
    /// Direction the snake last moved in (or will move in on the first tick)
    pub direction: Direction,
    /// Most recent valid direction request, applied at the next tick
    pub pending_direction: Option<Direction>,
    pub food: GridPos,
    pub score: u32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    rng: Pcg32,
}

impl GameState {
    /// Create a new idle state on the given grid
    pub fn new(grid: Grid, seed: u64) -> Self {
        let mut state = Self {
            seed,
            grid,
            snake: VecDeque::new(),
            direction: Direction::Right,
            pending_direction: None,
            food: GridPos::ZERO,
            score: 0,
            phase: GamePhase::Idle,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset_board();
        state
    }

    /// Reset all session state and begin a run.
    ///
    /// Always succeeds: the grid was validated at construction, so a single
    /// head cell at center plus at least one free food cell always fit.
    pub fn start(&mut self) {
        self.reset_board();
        self.phase = GamePhase::Running;
        log::info!(
            "game started: {}x{} grid, seed {}",
            self.grid.cols,
            self.grid.rows,
            self.seed
        );
    }

    /// Halt the session without a collision. Idempotent; after this no
    /// scheduler may deliver further ticks.
    pub fn stop(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Idle;
        }
    }

    /// Request a direction change for the next tick.
    ///
    /// Dropped silently while not running, and dropped when it would
    /// reverse the snake into its own neck. Last write wins within a tick.
    pub fn set_direction(&mut self, requested: Direction) {
        if self.phase != GamePhase::Running {
            return;
        }
        if requested == self.direction.opposite() {
            return;
        }
        self.pending_direction = Some(requested);
    }

    /// The head cell. Only meaningful while the snake is non-empty, which
    /// holds from construction onward.
    pub fn head(&self) -> GridPos {
        *self.snake.front().unwrap_or(&GridPos::ZERO)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid,
            snake: self.snake.iter().copied().collect(),
            food: self.food,
            score: self.score,
            phase: self.phase,
        }
    }

    /// Place food uniformly at random on a cell not occupied by the snake.
    ///
    /// Returns false only when the snake covers the whole grid, in which
    /// case `food` is left untouched.
    pub fn spawn_food(&mut self) -> bool {
        let occupied: std::collections::HashSet<GridPos> = self.snake.iter().copied().collect();
        let free: Vec<GridPos> = (0..self.grid.cols)
            .flat_map(|x| (0..self.grid.rows).map(move |y| GridPos::new(x, y)))
            .filter(|p| !occupied.contains(p))
            .collect();
        match free.len() {
            0 => false,
            n => {
                self.food = free[self.rng.random_range(0..n)];
                true
            }
        }
    }

    fn reset_board(&mut self) {
        self.snake.clear();
        self.snake.push_front(self.grid.center());
        self.direction = Direction::Right;
        self.pending_direction = None;
        self.score = 0;
        self.time_ticks = 0;
        self.spawn_food();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> GameState {
        let grid = Grid::new(400, 400, 20).unwrap();
        GameState::new(grid, 42)
    }

    #[test]
    fn test_start_resets_session() {
        let mut state = test_state();
        assert_eq!(state.phase, GamePhase::Idle);

        state.start();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.head(), GridPos::new(10, 10));
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.score, 0);
        assert_ne!(state.food, state.head());
    }

    #[test]
    fn test_direction_requests_ignored_while_idle() {
        let mut state = test_state();
        state.set_direction(Direction::Up);
        assert_eq!(state.pending_direction, None);
    }

    #[test]
    fn test_reversal_is_rejected() {
        let mut state = test_state();
        state.start();
        // Moving Right; Left is the exact opposite
        state.set_direction(Direction::Left);
        assert_eq!(state.pending_direction, None);

        state.set_direction(Direction::Up);
        assert_eq!(state.pending_direction, Some(Direction::Up));
    }

    #[test]
    fn test_last_valid_request_wins() {
        let mut state = test_state();
        state.start();
        state.set_direction(Direction::Up);
        state.set_direction(Direction::Down);
        assert_eq!(state.pending_direction, Some(Direction::Down));
    }

    #[test]
    fn test_food_never_on_snake() {
        let mut state = test_state();
        state.start();
        for _ in 0..100 {
            assert!(state.spawn_food());
            assert!(!state.snake.contains(&state.food));
            assert!(state.grid.contains(state.food));
        }
    }

    #[test]
    fn test_spawn_food_on_full_grid_reports_no_space() {
        let grid = Grid::new(60, 60, 20).unwrap();
        let mut state = GameState::new(grid, 7);
        state.snake = (0..3)
            .flat_map(|x| (0..3).map(move |y| GridPos::new(x, y)))
            .collect();
        assert!(!state.spawn_food());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut state = test_state();
        state.start();
        state.stop();
        assert_eq!(state.phase, GamePhase::Idle);
        state.stop();
        assert_eq!(state.phase, GamePhase::Idle);
    }
}
