//! Input decoding
//!
//! Keyboard, swipe and button events all reduce to an `InputCommand`, which
//! the game applies the same way regardless of where it came from.

use crate::sim::Direction;

/// A player action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Turn(Direction),
    TogglePause,
    Restart,
}

/// Map a keydown event (`key`, `code`) to a command
pub fn key_command(key: &str, code: &str) -> Option<InputCommand> {
    let direction = match key {
        "ArrowUp" | "w" | "W" => Some(Direction::Up),
        "ArrowDown" | "s" | "S" => Some(Direction::Down),
        "ArrowLeft" | "a" | "A" => Some(Direction::Left),
        "ArrowRight" | "d" | "D" => Some(Direction::Right),
        _ => None,
    };
    if let Some(direction) = direction {
        return Some(InputCommand::Turn(direction));
    }
    (code == "Space").then_some(InputCommand::TogglePause)
}

/// Direction for an on-screen button, from its class list ("dir up", ...)
pub fn direction_for_button(class_name: &str) -> Option<Direction> {
    class_name
        .split_whitespace()
        .find_map(|class| match class {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        })
}

/// Turns a single-finger swipe into a direction
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    start: Option<(f64, f64)>,
    threshold: f64,
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            start: None,
            threshold,
        }
    }

    /// Record where a touch began. Multi-finger touches are ignored.
    pub fn touch_start(&mut self, touches: u32, x: f64, y: f64) {
        if touches == 1 {
            self.start = Some((x, y));
        }
    }

    /// Finish a touch; returns the swipe direction if it was long enough.
    ///
    /// The dominant axis wins, ties go vertical.
    pub fn touch_end(&mut self, x: f64, y: f64) -> Option<Direction> {
        let (sx, sy) = self.start?;
        let (dx, dy) = (x - sx, y - sy);
        let (abs_x, abs_y) = (dx.abs(), dy.abs());
        if abs_x.max(abs_y) < self.threshold {
            return None;
        }
        self.start = None;

        let direction = if abs_x > abs_y {
            if dx > 0.0 { Direction::Right } else { Direction::Left }
        } else if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        };
        Some(direction)
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys_and_wasd() {
        assert_eq!(
            key_command("ArrowUp", "ArrowUp"),
            Some(InputCommand::Turn(Direction::Up))
        );
        assert_eq!(
            key_command("ArrowLeft", "ArrowLeft"),
            Some(InputCommand::Turn(Direction::Left))
        );
        assert_eq!(key_command("d", "KeyD"), Some(InputCommand::Turn(Direction::Right)));
        assert_eq!(key_command("S", "KeyS"), Some(InputCommand::Turn(Direction::Down)));
    }

    #[test]
    fn test_space_toggles_pause() {
        assert_eq!(key_command(" ", "Space"), Some(InputCommand::TogglePause));
        assert_eq!(key_command("Enter", "Enter"), None);
    }

    #[test]
    fn test_button_classes() {
        assert_eq!(direction_for_button("dir up"), Some(Direction::Up));
        assert_eq!(direction_for_button("btn dir  right active"), Some(Direction::Right));
        assert_eq!(direction_for_button("dir"), None);
        assert_eq!(direction_for_button("upward"), None);
    }

    #[test]
    fn test_swipe_directions() {
        let mut swipe = SwipeTracker::new(30.0);

        swipe.touch_start(1, 100.0, 100.0);
        assert_eq!(swipe.touch_end(160.0, 110.0), Some(Direction::Right));

        swipe.touch_start(1, 100.0, 100.0);
        assert_eq!(swipe.touch_end(95.0, 20.0), Some(Direction::Up));

        swipe.touch_start(1, 100.0, 100.0);
        assert_eq!(swipe.touch_end(40.0, 100.0), Some(Direction::Left));

        // Diagonal tie goes vertical
        swipe.touch_start(1, 0.0, 0.0);
        assert_eq!(swipe.touch_end(50.0, 50.0), Some(Direction::Down));
    }

    #[test]
    fn test_short_swipe_ignored() {
        let mut swipe = SwipeTracker::new(30.0);
        swipe.touch_start(1, 10.0, 10.0);
        assert_eq!(swipe.touch_end(35.0, 20.0), None);
        // Start is kept, so a longer drag still registers
        assert_eq!(swipe.touch_end(60.0, 20.0), Some(Direction::Right));
        // Consumed
        assert_eq!(swipe.touch_end(200.0, 20.0), None);
    }

    #[test]
    fn test_multi_touch_not_tracked() {
        let mut swipe = SwipeTracker::new(30.0);
        swipe.touch_start(2, 0.0, 0.0);
        assert_eq!(swipe.touch_end(100.0, 0.0), None);
    }
}
