//=========================================================================
// World Scroller
//=========================================================================
//
// Treadmill illusion: the character stays put and the ground slides
// backward at the character's smoothed locomotion speed.
//
// Per tick:
// ```text
//   speed  = smoothed_approach(speed, target, dt, rate)
//   offset = wrap_offset(offset - speed * dt, period)
// ```
//
// `period` must be a multiple of the ground tile size so the wrap is
// invisible.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::config::LocomotionConfig;

//=== Free Functions ======================================================

/// Exponential approach of `current` toward `target`.
///
/// `k = clamp(rate * dt, 0, 1)` so large steps land exactly on target
/// instead of overshooting. Snaps to `target` once within `snap_epsilon`.
pub fn smoothed_approach(current: f32, target: f32, dt: f32, rate: f32, snap_epsilon: f32) -> f32 {
    let k = (rate * dt).clamp(0.0, 1.0);
    let next = (1.0 - k) * current + k * target;

    if (next - target).abs() < snap_epsilon {
        target
    } else {
        next
    }
}

/// Wraps `offset` into `[0, period)`.
pub fn wrap_offset(offset: f32, period: f32) -> f32 {
    let wrapped = offset.rem_euclid(period);

    // rem_euclid may round up to `period` for tiny negative inputs
    if wrapped >= period || !wrapped.is_finite() {
        0.0
    } else {
        wrapped
    }
}

//=== WorldScroller =======================================================

#[derive(Debug, Clone, PartialEq)]
pub struct WorldScroller {
    offset: f32,
    current_speed: f32,
    period: f32,
    rate: f32,
    snap_epsilon: f32,
}

impl WorldScroller {
    pub fn new(config: &LocomotionConfig) -> Self {
        Self {
            offset: 0.0,
            current_speed: 0.0,
            period: config.scroll_period,
            rate: config.speed_smoothing_rate,
            snap_epsilon: config.speed_snap_epsilon,
        }
    }

    /// Starts from a given offset (wrapped into the period).
    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = wrap_offset(offset, self.period);
        self
    }

    /// Smooths the speed toward `target_speed` and scrolls the world.
    ///
    /// Returns the new offset.
    pub fn update(&mut self, elapsed: Duration, target_speed: f32) -> f32 {
        let dt = elapsed.as_secs_f32();

        self.current_speed =
            smoothed_approach(self.current_speed, target_speed, dt, self.rate, self.snap_epsilon);
        self.offset = wrap_offset(self.offset - self.current_speed * dt, self.period);
        self.offset
    }

    /// Returns to rest at offset zero.
    pub fn reset(&mut self) {
        self.offset = 0.0;
        self.current_speed = 0.0;
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    pub fn period(&self) -> f32 {
        self.period
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
