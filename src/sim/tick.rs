//! Simulation step and state transitions
//!
//! `tick` advances the snake by one cell. The other operations are the input
//! side of the state machine and may be called at any time between ticks.

use glam::IVec2;

use super::food::place_food;
use super::speed::compute_interval;
use super::state::{Direction, GameEvent, GameOverReason, GamePhase, GameState};

/// What a tick did, so the owner knows whether a redraw is needed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or over: nothing happened, nothing to draw
    Skipped,
    /// No direction yet; board unchanged but still drawn
    Waiting,
    /// Snake moved one cell
    Moved,
    /// Snake moved onto food and grew
    Ate,
    /// The run ended on this tick
    Ended,
}

/// Advance the game state by one step
pub fn tick(state: &mut GameState) -> TickOutcome {
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return TickOutcome::Skipped,
        GamePhase::Idle | GamePhase::Running => {}
    }

    let Some(direction) = state.direction else {
        return TickOutcome::Waiting;
    };

    let candidate = (state.head() + direction.delta()).rem_euclid(IVec2::splat(state.grid));

    // Checked against the whole body, including the tail cell that would be
    // vacated this step.
    if state.occupies(candidate) {
        end_run(state, GameOverReason::SelfCollision);
        return TickOutcome::Ended;
    }

    state.time_ticks += 1;
    state.snake.push_front(candidate);

    if candidate != state.food {
        state.snake.pop_back();
        return TickOutcome::Moved;
    }

    state.score += 1;
    state.emit(GameEvent::Ate {
        score: state.score,
        at: candidate,
    });
    update_interval(state);

    match place_food(&mut state.rng, state.grid, &state.snake) {
        Some(food) => {
            log::debug!("Food placed at ({}, {})", food.x, food.y);
            state.food = food;
            TickOutcome::Ate
        }
        None => {
            end_run(state, GameOverReason::BoardFilled);
            TickOutcome::Ended
        }
    }
}

/// Request a new direction.
///
/// The exact reverse of the current direction is rejected. Accepted even
/// while idle or paused so the player can aim before the snake moves.
/// While paused, turns are also judged against the head's position when the
/// pause began, so a chain of turns can't steer back into the neck.
/// Returns whether the request was accepted.
pub fn set_direction(state: &mut GameState, direction: Direction) -> bool {
    if state.is_over() {
        return false;
    }

    match state.direction {
        Some(current) if current == direction.opposite() => return false,
        Some(current) if current == direction => return true,
        _ => {}
    }

    if state.phase == GamePhase::Paused {
        let candidate = (state.head() + direction.delta()).rem_euclid(IVec2::splat(state.grid));
        if state.snake.get(1) == Some(&candidate) {
            return false;
        }
    }

    state.direction = Some(direction);
    if state.phase == GamePhase::Idle {
        state.phase = GamePhase::Running;
    }
    state.emit(GameEvent::Turn { direction });
    true
}

/// Pause or resume. Has no effect once the run is over.
pub fn toggle_pause(state: &mut GameState) -> GamePhase {
    let paused = match state.phase {
        GamePhase::Idle | GamePhase::Running => {
            state.phase = GamePhase::Paused;
            true
        }
        GamePhase::Paused => {
            state.phase = if state.direction.is_some() {
                GamePhase::Running
            } else {
                GamePhase::Idle
            };
            false
        }
        GamePhase::GameOver => return state.phase,
    };
    state.emit(GameEvent::PauseChanged { paused });
    state.phase
}

/// Start a fresh run with the current base interval
pub fn restart(state: &mut GameState) {
    state.reset_board();
    state.emit(GameEvent::Restarted);
    log::info!(
        "Restarted: base {}ms, food at ({}, {})",
        state.base_interval_ms,
        state.food.x,
        state.food.y
    );
}

/// Replace the base interval (difficulty preset or slider override)
pub fn set_base_interval(state: &mut GameState, base_ms: u32) {
    state.base_interval_ms = base_ms;
    update_interval(state);
}

fn update_interval(state: &mut GameState) {
    let interval_ms = compute_interval(state.base_interval_ms, state.score);
    if interval_ms != state.tick_interval_ms {
        log::debug!("Tick interval {}ms -> {}ms", state.tick_interval_ms, interval_ms);
        state.tick_interval_ms = interval_ms;
        state.emit(GameEvent::SpeedChanged { interval_ms });
    }
}

fn end_run(state: &mut GameState, reason: GameOverReason) {
    state.phase = GamePhase::GameOver;
    log::info!("Game over ({:?}), score {}", reason, state.score);
    state.emit(GameEvent::GameOver {
        score: state.score,
        reason,
    });
}
