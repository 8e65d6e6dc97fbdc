//! Periodic tick scheduling
//!
//! A scheduler owns at most one live timer. `reschedule` cancels the old
//! timer before arming the new one, so two timers never fire for one game.

/// Periodic tick trigger owned by the game
pub trait Scheduler {
    /// Arm the timer. Replaces any timer already running.
    fn start(&mut self, interval_ms: u32);

    /// Cancel then re-arm at a new interval
    fn reschedule(&mut self, interval_ms: u32) {
        self.stop();
        self.start(interval_ms);
    }

    /// Cancel the timer; no-op if nothing is armed
    fn stop(&mut self);

    /// Interval of the armed timer, `None` when stopped
    fn interval_ms(&self) -> Option<u32>;

    fn is_active(&self) -> bool {
        self.interval_ms().is_some()
    }
}

/// Scheduler that never fires by itself; the caller drives ticks.
///
/// Used by the native demo and by tests, which record what was armed.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    interval_ms: Option<u32>,
    /// Number of times a timer was armed
    pub arms: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for ManualScheduler {
    fn start(&mut self, interval_ms: u32) {
        self.interval_ms = Some(interval_ms);
        self.arms += 1;
    }

    fn stop(&mut self) {
        self.interval_ms = None;
    }

    fn interval_ms(&self) -> Option<u32> {
        self.interval_ms
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::IntervalScheduler;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use super::Scheduler;

    /// `setInterval`-backed scheduler
    pub struct IntervalScheduler {
        callback: Closure<dyn FnMut()>,
        handle: Option<i32>,
        interval_ms: Option<u32>,
    }

    impl IntervalScheduler {
        pub fn new(callback: Closure<dyn FnMut()>) -> Self {
            Self {
                callback,
                handle: None,
                interval_ms: None,
            }
        }
    }

    impl Scheduler for IntervalScheduler {
        fn start(&mut self, interval_ms: u32) {
            self.stop();
            let Some(window) = web_sys::window() else {
                log::warn!("No window, tick timer not started");
                return;
            };
            match window.set_interval_with_callback_and_timeout_and_arguments_0(
                self.callback.as_ref().unchecked_ref(),
                interval_ms as i32,
            ) {
                Ok(handle) => {
                    self.handle = Some(handle);
                    self.interval_ms = Some(interval_ms);
                }
                Err(e) => log::warn!("setInterval failed: {:?}", e),
            }
        }

        fn stop(&mut self) {
            if let Some(handle) = self.handle.take() {
                if let Some(window) = web_sys::window() {
                    window.clear_interval_with_handle(handle);
                }
            }
            self.interval_ms = None;
        }

        fn interval_ms(&self) -> Option<u32> {
            self.interval_ms
        }
    }

    impl Drop for IntervalScheduler {
        fn drop(&mut self) {
            self.stop();
        }
    }
}
