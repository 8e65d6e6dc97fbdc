//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard, swipes, on-screen buttons)
//! - Tick timing (`setInterval` on web, manual stepping elsewhere)

pub mod input;
pub mod scheduler;

pub use input::{InputCommand, SwipeTracker, direction_for_button, key_command};
#[cfg(target_arch = "wasm32")]
pub use scheduler::IntervalScheduler;
pub use scheduler::{ManualScheduler, Scheduler};
