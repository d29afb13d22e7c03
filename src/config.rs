//=========================================================================
// Locomotion Configuration
//=========================================================================
//
// Tunables for the locomotion core, set through a fluent builder in the
// same manner as `EngineBuilder`.
//
// Defaults:
// - Crossfade:        0.25 s out / 0.25 s in
// - First fade-out:   0.5 s (first transition after assets load)
// - Jump lock:        1000 ms of simulated time
// - Speed smoothing:  rate 10, snap below 0.001
// - Scroll period:    10 world units
// - Max frame step:   100 ms
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== BlendConfig =========================================================

/// Crossfade durations (seconds) used when the arbiter switches actions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendConfig {
    /// Fade-out of the outgoing action.
    pub fade_out: f32,

    /// Fade-in of the incoming action.
    pub fade_in: f32,

    /// Fade-out used for the very first transition after load.
    pub first_fade_out: f32,
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            fade_out: 0.25,
            fade_in: 0.25,
            first_fade_out: 0.5,
        }
    }
}

//=== LocomotionConfig ====================================================

/// Configuration for the arbiter, blender, world scroller and frame loop.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use treadmill_locomotion::LocomotionConfig;
///
/// let config = LocomotionConfig::default()
///     .with_lock_duration(Duration::from_millis(800))
///     .with_scroll_period(20.0);
///
/// assert_eq!(config.lock_duration, Duration::from_millis(800));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LocomotionConfig {
    pub blend: BlendConfig,
    pub lock_duration: Duration,
    pub speed_smoothing_rate: f32,
    pub speed_snap_epsilon: f32,
    pub scroll_period: f32,
    pub max_frame_step: Duration,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            blend: BlendConfig::default(),
            lock_duration: Duration::from_millis(1000),
            speed_smoothing_rate: 10.0,
            speed_snap_epsilon: 0.001,
            scroll_period: 10.0,
            max_frame_step: Duration::from_millis(100),
        }
    }
}

impl LocomotionConfig {
    /// Sets the crossfade durations.
    ///
    /// # Panics
    ///
    /// Panics if any duration is negative or not finite.
    pub fn with_blend(mut self, blend: BlendConfig) -> Self {
        for (name, value) in [
            ("fade_out", blend.fade_out),
            ("fade_in", blend.fade_in),
            ("first_fade_out", blend.first_fade_out),
        ] {
            assert!(
                value.is_finite() && value >= 0.0,
                "{} must be a non-negative duration, got {}",
                name,
                value
            );
        }
        self.blend = blend;
        self
    }

    /// Sets how long a jump blocks arbitration.
    pub fn with_lock_duration(mut self, duration: Duration) -> Self {
        self.lock_duration = duration;
        self
    }

    /// Sets the exponential speed smoothing rate (per second).
    ///
    /// # Panics
    ///
    /// Panics if `rate <= 0.0`.
    pub fn with_speed_smoothing_rate(mut self, rate: f32) -> Self {
        assert!(rate > 0.0, "Smoothing rate must be positive, got {}", rate);
        self.speed_smoothing_rate = rate;
        self
    }

    /// Sets the distance below which the smoothed speed snaps to target.
    ///
    /// # Panics
    ///
    /// Panics if `epsilon <= 0.0`.
    pub fn with_speed_snap_epsilon(mut self, epsilon: f32) -> Self {
        assert!(epsilon > 0.0, "Snap epsilon must be positive, got {}", epsilon);
        self.speed_snap_epsilon = epsilon;
        self
    }

    /// Sets the wrap period of the world offset (a multiple of the ground
    /// tile size).
    ///
    /// # Panics
    ///
    /// Panics if `period <= 0.0`.
    pub fn with_scroll_period(mut self, period: f32) -> Self {
        assert!(period > 0.0, "Scroll period must be positive, got {}", period);
        self.scroll_period = period;
        self
    }

    /// Sets the largest elapsed time a single tick may integrate.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    pub fn with_max_frame_step(mut self, step: Duration) -> Self {
        assert!(!step.is_zero(), "Max frame step must be positive");
        self.max_frame_step = step;
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LocomotionConfig::default();
        assert_eq!(config.blend.fade_out, 0.25);
        assert_eq!(config.blend.fade_in, 0.25);
        assert_eq!(config.blend.first_fade_out, 0.5);
        assert_eq!(config.lock_duration, Duration::from_millis(1000));
        assert_eq!(config.speed_smoothing_rate, 10.0);
        assert_eq!(config.speed_snap_epsilon, 0.001);
        assert_eq!(config.scroll_period, 10.0);
        assert_eq!(config.max_frame_step, Duration::from_millis(100));
    }

    #[test]
    fn fluent_api_chaining() {
        let config = LocomotionConfig::default()
            .with_blend(BlendConfig { fade_out: 0.1, fade_in: 0.2, first_fade_out: 0.25 })
            .with_lock_duration(Duration::from_millis(500))
            .with_speed_smoothing_rate(5.0)
            .with_scroll_period(4.0)
            .with_max_frame_step(Duration::from_millis(50));

        assert_eq!(config.blend.first_fade_out, 0.25);
        assert_eq!(config.lock_duration, Duration::from_millis(500));
        assert_eq!(config.speed_smoothing_rate, 5.0);
        assert_eq!(config.scroll_period, 4.0);
        assert_eq!(config.max_frame_step, Duration::from_millis(50));
    }

    #[test]
    #[should_panic(expected = "fade_in must be a non-negative duration")]
    fn negative_fade_panics() {
        LocomotionConfig::default().with_blend(BlendConfig {
            fade_in: -1.0,
            ..BlendConfig::default()
        });
    }

    #[test]
    #[should_panic(expected = "Scroll period must be positive")]
    fn zero_period_panics() {
        LocomotionConfig::default().with_scroll_period(0.0);
    }

    #[test]
    #[should_panic(expected = "Smoothing rate must be positive")]
    fn negative_rate_panics() {
        LocomotionConfig::default().with_speed_smoothing_rate(-10.0);
    }

    #[test]
    #[should_panic(expected = "Max frame step must be positive")]
    fn zero_frame_step_panics() {
        LocomotionConfig::default().with_max_frame_step(Duration::ZERO);
    }
}
