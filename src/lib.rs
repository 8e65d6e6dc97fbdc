//! Grid Snake - classic Snake on a wrap-around grid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (snake movement, food, speed policy)
//! - `game`: Single owner of the simulation, its tick timer and collaborators
//! - `renderer`: Board drawing (Canvas2D on the web)
//! - `platform`: Input decoding and tick scheduling
//! - `audio`: Procedural sound effects
//! - `settings`: Difficulty presets and configuration

pub mod audio;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{EventListener, Game};
pub use settings::{Difficulty, Settings};

/// Game configuration constants
pub mod consts {
    /// Cells per row/column
    pub const GRID: i32 = 20;

    /// Fastest allowed tick interval (ms)
    pub const MIN_INTERVAL_MS: u32 = 40;
    /// Interval reduction applied per speed-up step (ms)
    pub const SPEEDUP_STEP_MS: u32 = 8;
    /// Points needed for each speed-up step
    pub const SPEEDUP_EVERY: u32 = 5;

    /// Speed slider bounds (ms per step)
    pub const SLIDER_MIN_MS: u32 = MIN_INTERVAL_MS;
    pub const SLIDER_MAX_MS: u32 = 300;

    /// Minimum swipe distance before a touch counts as a turn (px)
    pub const SWIPE_THRESHOLD_PX: f64 = 30.0;

    /// Random draws before food placement scans for free cells
    pub const MAX_REJECTION_DRAWS: u32 = 4096;
}

/// Seed for a fresh run
#[cfg(target_arch = "wasm32")]
pub fn fresh_seed() -> u64 {
    js_sys::Date::now() as u64
}

/// Seed for a fresh run
#[cfg(not(target_arch = "wasm32"))]
pub fn fresh_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}
