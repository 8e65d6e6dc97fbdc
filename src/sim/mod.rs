//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per tick, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod food;
pub mod speed;
pub mod state;
pub mod tick;

pub use food::place_food;
pub use speed::compute_interval;
pub use state::{
    BoardView, Cell, Direction, GameEvent, GameOverReason, GamePhase, GameState, center_cell,
};
pub use tick::{TickOutcome, restart, set_base_interval, set_direction, tick, toggle_pause};
