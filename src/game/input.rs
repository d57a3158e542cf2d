//! Input Capture and Normalization
//!
//! Turns the host's held-key state into a per-tick direction vector and
//! rate-limits the intents that go out over the wire.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;

/// Milliseconds between outbound move intents (~20 messages/sec).
pub const INTENT_INTERVAL_MS: u64 = 50;

// =============================================================================
// KEYBOARD ADAPTER
// =============================================================================

/// Handle to the host engine's keyboard device.
///
/// The engine adapter produces one when its input plugin is available and
/// fills a [`KeySnapshot`] from it every tick. Platforms without keyboard
/// input have no handle, and spawning a locally-controlled entity fails.
#[derive(Debug, Clone, Copy)]
pub struct Keyboard(());

impl Keyboard {
    /// Called by the engine adapter once its input plugin is up.
    pub const fn attach() -> Self {
        Self(())
    }
}

/// Held state of the four movement keys, captured once per tick by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySnapshot {
    /// Up key held (W / ArrowUp)
    pub up: bool,
    /// Down key held (S / ArrowDown)
    pub down: bool,
    /// Left key held (A / ArrowLeft)
    pub left: bool,
    /// Right key held (D / ArrowRight)
    pub right: bool,
}

impl KeySnapshot {
    /// Snapshot with no keys held.
    pub const IDLE: Self = Self {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    /// Derive the movement direction for this tick.
    ///
    /// Each axis resolves to -1, 0, or +1 from a mutually exclusive key
    /// pair: up wins over down, left wins over right. Screen convention,
    /// so up is -y. A diagonal is normalized to unit length so diagonal
    /// speed equals axial speed.
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;

        if self.up {
            dir.y = -1.0;
        } else if self.down {
            dir.y = 1.0;
        }

        if self.left {
            dir.x = -1.0;
        } else if self.right {
            dir.x = 1.0;
        }

        if dir.x != 0.0 && dir.y != 0.0 {
            dir = dir.normalize();
        }

        dir
    }

    /// Any movement key held?
    pub fn any_held(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

// =============================================================================
// MOVE INTENT
// =============================================================================

/// A single tick's directional input, stamped for network transport.
///
/// Transient: consumed by the motion controller or serialized for send,
/// never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveIntent {
    /// Unit (or single-axis) direction derived from held keys
    pub direction: Vec2,
    /// Wall-clock Unix milliseconds at dispatch time
    pub timestamp_ms: u64,
}

// =============================================================================
// INTENT THROTTLE
// =============================================================================

/// Rate limiter for outbound move intents.
///
/// Dispatches at most once per [`INTENT_INTERVAL_MS`] while direction is
/// non-zero; idle frames never dispatch and never advance the schedule.
/// The due time advances by whole intervals on each dispatch so the cadence
/// holds on any tick grid, and resyncs after an idle gap longer than one
/// interval rather than bursting to catch up.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct IntentThrottle {
    next_due_ms: Option<u64>,
}

impl IntentThrottle {
    /// Throttle that will dispatch on the first non-idle sample.
    pub const fn new() -> Self {
        Self { next_due_ms: None }
    }

    /// Offer this tick's direction; returns the intent to send, if any.
    pub fn sample(&mut self, direction: Vec2, now_ms: u64) -> Option<MoveIntent> {
        if direction == Vec2::ZERO {
            return None;
        }

        match self.next_due_ms {
            Some(due) if now_ms < due => None,
            Some(due) => {
                self.next_due_ms = if now_ms >= due + INTENT_INTERVAL_MS {
                    Some(now_ms + INTENT_INTERVAL_MS)
                } else {
                    Some(due + INTENT_INTERVAL_MS)
                };
                Some(MoveIntent {
                    direction,
                    timestamp_ms: now_ms,
                })
            }
            None => {
                self.next_due_ms = Some(now_ms + INTENT_INTERVAL_MS);
                Some(MoveIntent {
                    direction,
                    timestamp_ms: now_ms,
                })
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn held(up: bool, down: bool, left: bool, right: bool) -> KeySnapshot {
        KeySnapshot {
            up,
            down,
            left,
            right,
        }
    }

    #[test]
    fn test_single_axis_direction() {
        assert_eq!(held(true, false, false, false).direction(), Vec2::new(0.0, -1.0));
        assert_eq!(held(false, true, false, false).direction(), Vec2::new(0.0, 1.0));
        assert_eq!(held(false, false, true, false).direction(), Vec2::new(-1.0, 0.0));
        assert_eq!(held(false, false, false, true).direction(), Vec2::new(1.0, 0.0));
        assert_eq!(KeySnapshot::IDLE.direction(), Vec2::ZERO);
    }

    #[test]
    fn test_opposed_keys_first_wins() {
        // Up beats down, left beats right
        assert_eq!(held(true, true, false, false).direction(), Vec2::new(0.0, -1.0));
        assert_eq!(held(false, false, true, true).direction(), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_diagonal_is_unit_length() {
        let dir = held(true, false, false, true).direction();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.x > 0.0 && dir.y < 0.0);
    }

    #[test]
    fn test_throttle_first_sample_dispatches() {
        let mut throttle = IntentThrottle::new();
        let dir = Vec2::new(1.0, 0.0);

        let intent = throttle.sample(dir, 0).expect("first sample should send");
        assert_eq!(intent.direction, dir);
        assert_eq!(intent.timestamp_ms, 0);

        // Inside the interval: suppressed
        assert!(throttle.sample(dir, 10).is_none());
        assert!(throttle.sample(dir, 49).is_none());

        // Interval elapsed: sends again
        assert!(throttle.sample(dir, 50).is_some());
    }

    #[test]
    fn test_throttle_idle_never_dispatches() {
        let mut throttle = IntentThrottle::new();
        for t in (0..1000).step_by(10) {
            assert!(throttle.sample(Vec2::ZERO, t).is_none());
        }
    }

    #[test]
    fn test_throttle_idle_does_not_advance_schedule() {
        let mut throttle = IntentThrottle::new();
        let dir = Vec2::new(0.0, 1.0);

        assert!(throttle.sample(dir, 0).is_some());
        // Keys released for a while
        assert!(throttle.sample(Vec2::ZERO, 20).is_none());
        assert!(throttle.sample(Vec2::ZERO, 40).is_none());
        // Still inside the interval once keys come back
        assert!(throttle.sample(dir, 45).is_none());
        assert!(throttle.sample(dir, 55).is_some());
    }

    #[test]
    fn test_throttle_cadence_10ms_grid() {
        let mut throttle = IntentThrottle::new();
        let dir = Vec2::new(1.0, 0.0);

        let sent = (0..1000)
            .step_by(10)
            .filter(|&t| throttle.sample(dir, t).is_some())
            .count();
        assert_eq!(sent, 20);
    }

    #[test]
    fn test_throttle_cadence_16ms_grid() {
        // 60 Hz does not divide 50 ms evenly; cadence must still hold.
        let mut throttle = IntentThrottle::new();
        let dir = Vec2::new(0.0, -1.0);

        let sent = (0..1000)
            .step_by(16)
            .filter(|&t| throttle.sample(dir, t).is_some())
            .count();
        assert_eq!(sent, 20);
    }

    #[test]
    fn test_throttle_resumes_immediately_after_long_idle() {
        let mut throttle = IntentThrottle::new();
        let dir = Vec2::new(1.0, 0.0);

        assert!(throttle.sample(dir, 0).is_some());
        // Ten seconds of idle, then input resumes: sends at once, no burst
        let intent = throttle.sample(dir, 10_000);
        assert!(intent.is_some());
        assert!(throttle.sample(dir, 10_010).is_none());
        assert!(throttle.sample(dir, 10_050).is_some());
    }
}
