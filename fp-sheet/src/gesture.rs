//! Drag gesture tracking.

use crate::snap::{self, SnapPoints};

/// Vertical travel (px) a move must exceed before the sheet claims the gesture.
pub const CLAIM_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tracking {
    Idle,
    /// Pointer is down but the gesture still belongs to inner content.
    Pending,
    Claimed { baseline: f64 },
}

/// Turns cumulative drag deltas into sheet offsets.
///
/// Moves are tracked 1:1 from the baseline captured when the gesture is
/// claimed; nothing is smoothed while the finger is down.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    tracking: Tracking,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self {
            tracking: Tracking::Idle,
        }
    }
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer went down.
    pub fn begin(&mut self) {
        self.tracking = Tracking::Pending;
    }

    /// Whether a move with cumulative delta `dy` should be claimed now.
    pub fn wants_claim(&self, dy: f64) -> bool {
        self.tracking == Tracking::Pending && dy.abs() > CLAIM_THRESHOLD
    }

    /// Claim the gesture with the sheet's live position as baseline.
    pub fn claim(&mut self, baseline: f64) {
        self.tracking = Tracking::Claimed { baseline };
    }

    pub fn is_claimed(&self) -> bool {
        matches!(self.tracking, Tracking::Claimed { .. })
    }

    pub fn baseline(&self) -> Option<f64> {
        match self.tracking {
            Tracking::Claimed { baseline } => Some(baseline),
            _ => None,
        }
    }

    /// Offset to display for cumulative delta `dy`, if the gesture is claimed.
    pub fn candidate(&self, dy: f64, points: &SnapPoints) -> Option<f64> {
        self.baseline().map(|baseline| points.clamp(baseline + dy))
    }

    /// Pointer went up. Returns the projected landing offset for a claimed gesture.
    pub fn release(&mut self, dy: f64, vy: f64) -> Option<f64> {
        let projected = self.baseline().map(|baseline| snap::project(baseline, dy, vy));
        self.tracking = Tracking::Idle;
        projected
    }

    /// Abandon the gesture without a release (pointer cancelled, sheet reset).
    pub fn cancel(&mut self) {
        self.tracking = Tracking::Idle;
    }
}

/// Relative weight of the newest sample in the smoothed velocity.
const VELOCITY_SMOOTHING: f64 = 0.7;

/// Samples older than this (ms) no longer describe a flick.
const VELOCITY_STALE_MS: f64 = 100.0;

/// Cumulative delta and velocity of a drag at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSample {
    /// Pixels moved since the pointer went down.
    pub dy: f64,
    /// Pixels per millisecond.
    pub vy: f64,
}

/// Derives drag delta and velocity from raw `(y, time_ms)` pointer positions.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    origin_y: f64,
    last_y: f64,
    last_ms: f64,
    velocity: f64,
}

impl VelocityTracker {
    pub fn start(y: f64, time_ms: f64) -> Self {
        Self {
            origin_y: y,
            last_y: y,
            last_ms: time_ms,
            velocity: 0.0,
        }
    }

    /// Record a pointer position. After a pause longer than the stale window
    /// only the latest movement counts, so a pointer that rested before lifting
    /// reports no velocity.
    pub fn sample(&mut self, y: f64, time_ms: f64) -> DragSample {
        let dt = time_ms - self.last_ms;
        if dt > 0.0 {
            let instant = (y - self.last_y) / dt;
            self.velocity = if dt > VELOCITY_STALE_MS {
                instant
            } else {
                VELOCITY_SMOOTHING * instant + (1.0 - VELOCITY_SMOOTHING) * self.velocity
            };
            self.last_y = y;
            self.last_ms = time_ms;
        }
        DragSample {
            dy: y - self.origin_y,
            vy: self.velocity,
        }
    }
}
