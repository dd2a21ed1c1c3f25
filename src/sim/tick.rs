//! Fixed timestep simulation tick
//!
//! One call advances the snake exactly one cell. Collision checks run
//! against the prospective head before it is committed, so a colliding
//! position never enters the body.

use crate::consts::FOOD_SCORE;

use super::state::{GamePhase, GameState};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No game in progress, nothing happened
    Idle,
    /// Snake advanced one cell
    Moved,
    /// Snake advanced onto food and grew
    Ate,
    /// Run ended this tick; `final_score` is the settled result
    GameOver { final_score: u32 },
}

/// Advance the game by one grid step.
///
/// Order per step: apply the buffered direction, compute the prospective
/// head, check walls, check self, then commit the move (with growth on a
/// food cell). Total for every reachable state; the only terminal outcome
/// is the designed collision, not an error.
pub fn tick(state: &mut GameState) -> TickOutcome {
    if state.phase != GamePhase::Running {
        return TickOutcome::Idle;
    }

    if let Some(dir) = state.pending_direction.take() {
        state.direction = dir;
    }
    state.time_ticks += 1;

    let new_head = state.head() + state.direction.delta();

    // Wall collision: prospective head left the play field
    if !state.grid.contains(new_head) {
        state.phase = GamePhase::GameOver;
        log::info!("wall collision at {new_head}, final score {}", state.score);
        return TickOutcome::GameOver {
            final_score: state.score,
        };
    }

    // Self collision: prospective head overlaps the body
    if state.snake.contains(&new_head) {
        state.phase = GamePhase::GameOver;
        log::info!("self collision at {new_head}, final score {}", state.score);
        return TickOutcome::GameOver {
            final_score: state.score,
        };
    }

    if new_head == state.food {
        // Grow: head in, tail retained
        state.score += FOOD_SCORE;
        state.snake.push_front(new_head);
        if !state.spawn_food() {
            // Snake fills the grid; no cell left to place food on
            state.phase = GamePhase::GameOver;
            log::info!("grid filled, final score {}", state.score);
            return TickOutcome::GameOver {
                final_score: state.score,
            };
        }
        TickOutcome::Ate
    } else {
        // Plain move: head in, tail out
        state.snake.pop_back();
        state.snake.push_front(new_head);
        TickOutcome::Moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::{Direction, Grid, GridPos};

    fn running_state(seed: u64) -> GameState {
        let grid = Grid::new(400, 400, 20).unwrap();
        let mut state = GameState::new(grid, seed);
        state.start();
        state
    }

    #[test]
    fn test_tick_while_idle_is_a_noop() {
        let grid = Grid::new(400, 400, 20).unwrap();
        let mut state = GameState::new(grid, 1);
        assert_eq!(tick(&mut state), TickOutcome::Idle);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_three_ticks_move_head_right() {
        let mut state = running_state(42);
        // Keep the default food away from the path we assert on
        state.food = GridPos::new(0, 0);

        for _ in 0..3 {
            assert_eq!(tick(&mut state), TickOutcome::Moved);
        }
        assert_eq!(state.head(), GridPos::new(13, 10));
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut state = running_state(42);
        state.food = GridPos::new(11, 10);

        assert_eq!(tick(&mut state), TickOutcome::Ate);
        assert_eq!(state.score, 10);
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.head(), GridPos::new(11, 10));
        assert!(!state.snake.contains(&state.food));
    }

    #[test]
    fn test_wall_collision_ends_run() {
        let mut state = running_state(42);
        state.food = GridPos::new(0, 0);
        state.snake.clear();
        state.snake.push_front(GridPos::new(19, 10));

        let before = state.snake.clone();
        assert_eq!(
            tick(&mut state),
            TickOutcome::GameOver { final_score: 0 }
        );
        assert_eq!(state.phase, GamePhase::GameOver);
        // The colliding head is never committed
        assert_eq!(state.snake, before);
    }

    #[test]
    fn test_self_collision_ends_run() {
        let mut state = running_state(42);
        state.food = GridPos::new(0, 0);
        state.score = 30;
        state.snake.clear();
        for cell in [
            GridPos::new(10, 10),
            GridPos::new(9, 10),
            GridPos::new(8, 10),
        ] {
            state.snake.push_back(cell);
        }
        state.direction = Direction::Left;

        assert_eq!(
            tick(&mut state),
            TickOutcome::GameOver { final_score: 30 }
        );
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 30);
        assert_eq!(state.snake.len(), 3);
    }

    #[test]
    fn test_no_tick_after_game_over() {
        let mut state = running_state(42);
        state.snake.clear();
        state.snake.push_front(GridPos::new(19, 10));
        state.food = GridPos::new(0, 0);
        tick(&mut state);

        let ticks = state.time_ticks;
        assert_eq!(tick(&mut state), TickOutcome::Idle);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = running_state(42);
        state.snake.clear();
        state.snake.push_front(GridPos::new(19, 10));
        state.food = GridPos::new(0, 0);
        state.score = 50;
        tick(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);

        state.start();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.head(), GridPos::new(10, 10));
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_buffered_direction_applies_on_tick() {
        let mut state = running_state(42);
        state.food = GridPos::new(0, 0);
        state.set_direction(Direction::Up);

        tick(&mut state);
        assert_eq!(state.head(), GridPos::new(10, 9));
        assert_eq!(state.direction, Direction::Up);
        assert_eq!(state.pending_direction, None);
    }

    #[test]
    fn test_determinism() {
        // Two states with the same seed and inputs stay identical
        let mut a = running_state(99999);
        let mut b = running_state(99999);

        let moves = [
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Right,
        ];
        for dir in moves {
            a.set_direction(dir);
            b.set_direction(dir);
            assert_eq!(tick(&mut a), tick(&mut b));
            assert_eq!(a.snake, b.snake);
            assert_eq!(a.food, b.food);
            assert_eq!(a.score, b.score);
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn direction_strategy() -> impl Strategy<Value = Direction> {
            prop_oneof![
                Just(Direction::Up),
                Just(Direction::Down),
                Just(Direction::Left),
                Just(Direction::Right),
            ]
        }

        proptest! {
            #[test]
            fn invariants_hold_over_any_input_sequence(
                seed in any::<u64>(),
                inputs in prop::collection::vec(direction_strategy(), 0..200),
            ) {
                let mut state = running_state(seed);
                let mut last_score = 0u32;

                for dir in inputs {
                    state.set_direction(dir);
                    let len_before = state.snake.len();
                    let outcome = tick(&mut state);

                    // Score: non-negative multiple of 10, monotone
                    prop_assert_eq!(state.score % 10, 0);
                    prop_assert!(state.score >= last_score);
                    last_score = state.score;

                    match outcome {
                        TickOutcome::Ate => {
                            prop_assert_eq!(state.snake.len(), len_before + 1)
                        }
                        TickOutcome::Moved => {
                            prop_assert_eq!(state.snake.len(), len_before)
                        }
                        TickOutcome::GameOver { final_score } => {
                            prop_assert_eq!(final_score, state.score);
                            prop_assert_eq!(state.snake.len(), len_before);
                            break;
                        }
                        TickOutcome::Idle => prop_assert!(false, "tick on running state"),
                    }

                    // No duplicate cell ever committed
                    let unique: std::collections::HashSet<_> =
                        state.snake.iter().collect();
                    prop_assert_eq!(unique.len(), state.snake.len());

                    // Food on a free in-bounds cell
                    prop_assert!(state.grid.contains(state.food));
                    prop_assert!(!state.snake.contains(&state.food));

                    // Whole body in bounds
                    for cell in &state.snake {
                        prop_assert!(state.grid.contains(*cell));
                    }
                }
            }

            #[test]
            fn reversal_never_changes_direction(seed in any::<u64>()) {
                let mut state = running_state(seed);
                state.food = GridPos::new(0, 0);
                state.set_direction(state.direction.opposite());
                let before = state.direction;
                tick(&mut state);
                prop_assert_eq!(state.direction, before);
            }
        }
    }
}
