//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in `GameState`.

use std::collections::VecDeque;

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::food::place_food;
use super::speed::compute_interval;
use crate::consts::GRID;

/// A grid cell, `0 <= x, y < grid`. Compared by value.
pub type Cell = IVec2;

/// Cell at the middle of a `grid` x `grid` board
pub fn center_cell(grid: i32) -> Cell {
    Cell::splat(grid / 2)
}

/// Movement direction (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step for this direction
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Direction for a `(dx, dy)` unit delta. `(0, 0)` and diagonals have none.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Board frozen until the first direction is chosen
    Idle,
    /// Snake advances every tick
    Running,
    /// Ticks suspended, state retained
    Paused,
    /// Run ended; only a restart leaves this phase
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Head moved onto the snake's own body
    SelfCollision,
    /// Snake covers every cell, nowhere left to put food
    BoardFilled,
}

/// Discrete events for collaborators (sound, HUD, scheduler)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Direction actually changed
    Turn { direction: Direction },
    /// Food eaten at `at`, score is the new total
    Ate { score: u32, at: Cell },
    /// Tick interval changed; the timer must be re-armed
    SpeedChanged { interval_ms: u32 },
    /// Run ended with the final score
    GameOver { score: u32, reason: GameOverReason },
    PauseChanged { paused: bool },
    Restarted,
}

/// Read-only view handed to renderers
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BoardView<'a> {
    pub snake: &'a VecDeque<Cell>,
    pub food: Cell,
    pub grid: i32,
    pub score: u32,
    pub phase: GamePhase,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Cells per row/column
    pub grid: i32,
    /// Snake body, head first
    pub snake: VecDeque<Cell>,
    /// `None` until the player picks a direction
    pub direction: Option<Direction>,
    pub food: Cell,
    pub score: u32,
    /// Base interval from the difficulty preset or slider override
    pub base_interval_ms: u32,
    /// Interval currently in force
    pub tick_interval_ms: u32,
    pub phase: GamePhase,
    /// Number of ticks that moved the snake
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game on the standard grid
    pub fn new(seed: u64, base_interval_ms: u32) -> Self {
        Self::with_grid(GRID, seed, base_interval_ms)
    }

    /// Create a new game on a `grid` x `grid` board
    pub fn with_grid(grid: i32, seed: u64, base_interval_ms: u32) -> Self {
        assert!(grid > 1, "grid needs a free cell for food beside the snake");

        let mut state = Self {
            seed,
            grid,
            snake: VecDeque::new(),
            direction: None,
            food: Cell::ZERO,
            score: 0,
            base_interval_ms,
            tick_interval_ms: base_interval_ms,
            phase: GamePhase::Idle,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };
        state.reset_board();
        state
    }

    /// Put the snake back at the center and re-place food; RNG continues.
    pub(crate) fn reset_board(&mut self) {
        self.snake.clear();
        self.snake.push_back(center_cell(self.grid));
        self.direction = None;
        self.score = 0;
        self.time_ticks = 0;
        self.phase = GamePhase::Idle;
        self.tick_interval_ms = compute_interval(self.base_interval_ms, 0);
        // grid > 1, so a single-cell snake always leaves a free cell
        if let Some(food) = place_food(&mut self.rng, self.grid, &self.snake) {
            self.food = food;
        }
    }

    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    /// Not paused and not over: ticks and input move the game
    pub fn is_running(&self) -> bool {
        matches!(self.phase, GamePhase::Idle | GamePhase::Running)
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.snake.contains(&cell)
    }

    pub fn board(&self) -> BoardView<'_> {
        BoardView {
            snake: &self.snake,
            food: self.food,
            grid: self.grid,
            score: self.score,
            phase: self.phase,
        }
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events emitted since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events in emission order
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_at_center() {
        let state = GameState::new(7, 120);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.snake, VecDeque::from([Cell::new(10, 10)]));
        assert_eq!(state.direction, None);
        assert_eq!(state.score, 0);
        assert_eq!(state.tick_interval_ms, 120);
        assert!(state.is_running());
        assert!(!state.occupies(state.food));
    }

    #[test]
    fn test_same_seed_places_same_food() {
        let a = GameState::new(42, 100);
        let b = GameState::new(42, 100);
        assert_eq!(a.food, b.food);
    }

    #[test]
    fn test_direction_deltas() {
        for dir in Direction::ALL {
            let d = dir.delta();
            assert_eq!(Direction::from_delta(d.x, d.y), Some(dir));
            assert_eq!(dir.opposite().delta(), -d);
        }
        assert_eq!(Direction::from_delta(0, 0), None);
        assert_eq!(Direction::from_delta(1, 1), None);
    }

    #[test]
    fn test_smallest_grid_places_food_off_snake() {
        let state = GameState::with_grid(2, 11, 100);
        assert_eq!(state.head(), Cell::new(1, 1));
        assert!(!state.occupies(state.food));
    }

    #[test]
    #[should_panic(expected = "free cell")]
    fn test_single_cell_grid_rejected() {
        GameState::with_grid(1, 1, 100);
    }

    #[test]
    fn test_center_of_odd_grid_floors() {
        assert_eq!(center_cell(5), Cell::new(2, 2));
        assert_eq!(center_cell(20), Cell::new(10, 10));
    }
}
