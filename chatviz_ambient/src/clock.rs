// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared animation clock.

/// Default scale from wall-clock milliseconds to animation time.
pub const DEFAULT_CLOCK_RATE: f64 = 0.0005;

/// Derives animation time from a wall-clock sample.
///
/// The value is recomputed fresh every frame and never accumulated, so dropped or irregular
/// frames cannot make it drift.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationClock {
    rate: f64,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self {
            rate: DEFAULT_CLOCK_RATE,
        }
    }
}

impl AnimationClock {
    /// Creates a clock with a custom rate (animation units per millisecond).
    pub fn with_rate(rate: f64) -> Self {
        Self { rate }
    }

    /// Returns the rate in animation units per millisecond.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the animation time for `wall_ms`.
    pub fn sample(&self, wall_ms: f64) -> f64 {
        wall_ms * self.rate
    }
}
