// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tiny scale utilities.
//!
//! These provide the coordinate mapping behind the activity chart: a linear scale for
//! counts and a time scale (numeric epoch seconds) for bucket starts.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::time;

/// A continuous scale instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleContinuous {
    /// Linear scale.
    Linear(ScaleLinear),
    /// Time scale.
    Time(ScaleTime),
}

impl ScaleContinuous {
    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        match self {
            Self::Linear(s) => s.map(x),
            Self::Time(s) => s.map(x),
        }
    }

    /// Returns tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            Self::Linear(s) => s.ticks(count),
            Self::Time(s) => s.ticks(count),
        }
    }

    /// Returns the spacing between ticks produced by [`ScaleContinuous::ticks`].
    pub fn tick_step(&self, count: usize) -> f64 {
        match self {
            Self::Linear(s) => s.tick_step(count),
            Self::Time(s) => s.tick_step(count),
        }
    }

    /// Returns tick values inside the domain, spaced at least `min_step` apart.
    ///
    /// Used when labels cannot resolve finer steps, e.g. `HH:MM` time labels.
    pub fn ticks_with_min_step(&self, count: usize, min_step: f64) -> Vec<f64> {
        let step = self.tick_step(count);
        if count == 0 || step >= min_step {
            return self.ticks(count);
        }
        let (d0, d1) = self.domain();
        ticks_at_step(d0, d1, min_step)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.domain(),
            Self::Time(s) => s.domain(),
        }
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.range(),
            Self::Time(s) => s.range(),
        }
    }
}

impl From<ScaleLinear> for ScaleContinuous {
    fn from(value: ScaleLinear) -> Self {
        Self::Linear(value)
    }
}

impl From<ScaleTime> for ScaleContinuous {
    fn from(value: ScaleTime) -> Self {
        Self::Time(value)
    }
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A zero-width domain maps everything to the middle of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return 0.5 * (r0 + r1);
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns “nice-ish” tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }

    /// Returns the tick spacing used by [`ScaleLinear::ticks`].
    pub fn tick_step(&self, count: usize) -> f64 {
        let span = (self.domain.1 - self.domain.0).abs();
        nice_step(span / count.max(1) as f64)
    }
}

fn nice_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    let span = (max - min).abs();
    ticks_at_step(min, max, nice_step(span / count.max(1) as f64))
}

/// Returns the multiples of `step` inside `[min, max]`, ascending.
///
/// A zero step yields the two endpoints; a zero-width domain yields its single value.
pub(crate) fn ticks_at_step(mut min: f64, mut max: f64, step: f64) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    if step == 0.0 || !step.is_finite() {
        return alloc::vec![min, max];
    }

    let start = (min / step).ceil();
    let stop = (max / step).floor();

    let n_f = (stop - start).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        return Vec::new();
    };
    (0..=n).map(|i| (start + i as f64) * step).collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    #[allow(clippy::cast_possible_truncation, reason = "log10 of a finite f64 fits in i32")]
    let base = 10_f64.powi(power as i32);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// A time scale (a linear scale over epoch seconds).
///
/// Ticks snap to seconds/minutes/hours rather than powers of ten.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTime {
    inner: ScaleLinear,
}

impl ScaleTime {
    /// Creates a new time scale.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: ScaleLinear::new(domain, range),
        }
    }

    /// Maps a timestamp value into range space.
    pub fn map(&self, t: f64) -> f64 {
        self.inner.map(t)
    }

    /// Returns “nice-ish” tick values inside the time domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (min, max) = self.inner.domain();
        time::nice_time_ticks_seconds(min, max, count)
    }

    /// Returns the tick spacing used by [`ScaleTime::ticks`].
    pub fn tick_step(&self, count: usize) -> f64 {
        let (min, max) = self.inner.domain();
        time::time_tick_step(min, max, count)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.inner.domain()
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.inner.range()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn linear_scale_maps_endpoints_to_range() {
        let s = ScaleLinear::new((0.0, 4.0), (360.0, 20.0));
        assert!((s.map(0.0) - 360.0).abs() < 1e-9);
        assert!((s.map(4.0) - 20.0).abs() < 1e-9);
        assert!((s.map(2.0) - 190.0).abs() < 1e-9);
    }

    #[test]
    fn zero_width_domain_maps_to_range_midpoint() {
        let s = ScaleLinear::new((5.0, 5.0), (0.0, 100.0));
        assert_eq!(s.map(5.0), 50.0);
    }

    #[test]
    fn count_ticks_are_half_steps_for_small_domains() {
        let s = ScaleLinear::new((0.0, 3.0), (0.0, 1.0));
        assert_eq!(s.ticks(5), alloc::vec![0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0]);
        assert_eq!(s.tick_step(5), 0.5);
    }

    #[test]
    fn min_step_coarsens_dense_ticks() {
        let s = ScaleContinuous::from(ScaleTime::new((570.0, 630.0), (0.0, 1.0)));
        assert_eq!(s.tick_step(5), 15.0);
        assert_eq!(s.ticks_with_min_step(5, 60.0), alloc::vec![600.0]);
        // Already coarse enough: unchanged.
        assert_eq!(s.ticks_with_min_step(5, 1.0), s.ticks(5));
    }

    #[test]
    fn linear_ticks_never_leave_the_domain() {
        let s = ScaleLinear::new((0.0, 13.0), (0.0, 1.0));
        let ticks = s.ticks(5);
        assert_eq!(ticks.first(), Some(&0.0));
        assert!(ticks.iter().all(|&t| (0.0..=13.0).contains(&t)), "{ticks:?}");
    }
}
