//! Speed policy: tick interval as a function of base speed and score

use crate::consts::{MIN_INTERVAL_MS, SPEEDUP_EVERY, SPEEDUP_STEP_MS};

/// Interval in ms: 8 ms faster every 5 points, never below 40 ms.
#[inline]
pub fn compute_interval(base_ms: u32, score: u32) -> u32 {
    let speedup = (score / SPEEDUP_EVERY).saturating_mul(SPEEDUP_STEP_MS);
    base_ms.saturating_sub(speedup).max(MIN_INTERVAL_MS)
}
