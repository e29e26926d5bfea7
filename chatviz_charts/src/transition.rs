// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animated transitions between chart frames.
//!
//! A [`Transition`] holds the frame it starts from and the frame it ends at. Sampling it
//! interpolates the projected samples and re-fits the monotone curve to the intermediate
//! samples, so every in-between frame obeys the same no-overshoot rule as the end frames.
//!
//! Axis ticks are matched by value. A tick present at both ends slides between its two
//! positions; an entering tick starts where the old scale would have put it and fades in; an
//! exiting tick slides to where the new scale puts it and fades out.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{BezPath, Point};

use crate::axis::{AxisOrient, AxisTicks, Tick};
use crate::curve::{monotone_area, monotone_line};
use crate::mapper::{ScaleState, lerp_scale};

/// Default transition duration in milliseconds.
pub const DEFAULT_TRANSITION_MS: f64 = 500.0;

/// Easing applied to the normalized transition time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Slow start and end (cubic in-out).
    #[default]
    CubicInOut,
}

impl Easing {
    /// Maps `t ∈ [0, 1]` to eased progress in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicInOut => {
                let t2 = t * 2.0;
                if t2 <= 1.0 {
                    0.5 * t2 * t2 * t2
                } else {
                    let u = t2 - 2.0;
                    0.5 * (u * u * u + 2.0)
                }
            }
        }
    }
}

/// Everything drawn for the chart at one instant.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartFrame {
    /// Projected samples in pixel space, ascending x.
    pub points: Vec<Point>,
    /// The y coordinate the area is closed against (the plot bottom).
    pub baseline: f64,
    /// The scale state these samples were projected with.
    ///
    /// Mid-transition this is the blend of both end scales, so a transition started from an
    /// intermediate frame places entering ticks relative to what is on screen.
    pub scale: ScaleState,
    /// Bottom (time) axis ticks.
    pub x_axis: AxisTicks,
    /// Left (count) axis ticks.
    pub y_axis: AxisTicks,
}

impl ChartFrame {
    /// Returns the line geometry along the fitted curve.
    pub fn line(&self) -> BezPath {
        monotone_line(&self.points)
    }

    /// Returns the filled area between the fitted curve and the baseline.
    pub fn area(&self) -> BezPath {
        monotone_area(&self.points, self.baseline)
    }

    /// A copy of this frame flattened onto its baseline with invisible ticks.
    ///
    /// Used as the starting point of the very first transition.
    pub fn collapsed(&self) -> Self {
        let hide = |axis: &AxisTicks| AxisTicks {
            ticks: axis
                .ticks
                .iter()
                .map(|t| Tick {
                    opacity: 0.0,
                    ..t.clone()
                })
                .collect(),
            ..axis.clone()
        };
        Self {
            points: self
                .points
                .iter()
                .map(|p| Point::new(p.x, self.baseline))
                .collect(),
            baseline: self.baseline,
            scale: self.scale,
            x_axis: hide(&self.x_axis),
            y_axis: hide(&self.y_axis),
        }
    }
}

/// A timed interpolation between two chart frames.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    from: ChartFrame,
    to: ChartFrame,
    start_ms: f64,
    duration_ms: f64,
    easing: Easing,
}

impl Transition {
    /// Creates a transition starting at `start_ms`.
    ///
    /// A non-positive duration makes the transition jump straight to `to`.
    pub fn new(from: ChartFrame, to: ChartFrame, start_ms: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(0.0),
            easing: Easing::default(),
        }
    }

    /// Sets the easing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// The frame the transition starts from.
    pub fn from(&self) -> &ChartFrame {
        &self.from
    }

    /// The frame the transition ends at.
    pub fn to(&self) -> &ChartFrame {
        &self.to
    }

    /// Start time in milliseconds.
    pub fn start_ms(&self) -> f64 {
        self.start_ms
    }

    /// Duration in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Returns `true` once `now_ms` is at or past the end.
    pub fn is_finished(&self, now_ms: f64) -> bool {
        now_ms >= self.start_ms + self.duration_ms
    }

    /// Returns eased progress in `[0, 1]` at `now_ms`.
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms == 0.0 {
            return if now_ms >= self.start_ms { 1.0 } else { 0.0 };
        }
        self.easing
            .apply((now_ms - self.start_ms) / self.duration_ms)
    }

    /// Samples the frame displayed at `now_ms`.
    pub fn sample(&self, now_ms: f64) -> ChartFrame {
        let t = self.progress(now_ms);
        if t <= 0.0 {
            return self.from.clone();
        }
        if t >= 1.0 {
            return self.to.clone();
        }
        interpolate(&self.from, &self.to, t)
    }

    /// Samples `count` frames at evenly spaced instants from start to end (inclusive).
    pub fn frames(&self, count: usize) -> Vec<ChartFrame> {
        match count {
            0 => Vec::new(),
            1 => alloc::vec![self.to.clone()],
            _ => (0..count)
                .map(|i| {
                    let f = i as f64 / (count - 1) as f64;
                    self.sample(self.start_ms + f * self.duration_ms)
                })
                .collect(),
        }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Pads the shorter list by repeating its last point so both have the same length.
fn equalize(a: &[Point], b: &[Point]) -> (Vec<Point>, Vec<Point>) {
    let n = a.len().max(b.len());
    let pad = |src: &[Point], fallback: &[Point]| -> Vec<Point> {
        let mut out = src.to_vec();
        let filler = src.last().or_else(|| fallback.first()).copied();
        if let Some(p) = filler {
            out.resize(n, p);
        }
        out
    };
    (pad(a, b), pad(b, a))
}

fn interpolate(from: &ChartFrame, to: &ChartFrame, t: f64) -> ChartFrame {
    let (a, b) = equalize(&from.points, &to.points);
    let points = a.iter().zip(&b).map(|(p, q)| p.lerp(*q, t)).collect();
    ChartFrame {
        points,
        baseline: lerp(from.baseline, to.baseline, t),
        scale: lerp_scale(&from.scale, &to.scale, t),
        x_axis: interpolate_axis(&from.x_axis, &from.scale, &to.x_axis, &to.scale, t),
        y_axis: interpolate_axis(&from.y_axis, &from.scale, &to.y_axis, &to.scale, t),
    }
}

fn axis_position(scale: &ScaleState, orient: AxisOrient, value: f64) -> f64 {
    match orient {
        AxisOrient::Bottom => scale.time.map(value),
        AxisOrient::Left => scale.count.map(value),
    }
}

fn interpolate_axis(
    from: &AxisTicks,
    from_scale: &ScaleState,
    to: &AxisTicks,
    to_scale: &ScaleState,
    t: f64,
) -> AxisTicks {
    fn find(axis: &AxisTicks, value: f64) -> Option<&Tick> {
        axis.ticks.iter().find(|tick| tick.value == value)
    }
    let mut ticks: Vec<Tick> = Vec::with_capacity(from.ticks.len() + to.ticks.len());

    for target in &to.ticks {
        let (start_pos, start_opacity) = match find(from, target.value) {
            Some(old) => (old.position, old.opacity),
            None => (axis_position(from_scale, to.orient, target.value), 0.0),
        };
        ticks.push(Tick {
            value: target.value,
            position: lerp(start_pos, target.position, t),
            label: target.label.clone(),
            opacity: lerp(start_opacity, target.opacity, t),
        });
    }
    for old in &from.ticks {
        if find(to, old.value).is_some() {
            continue;
        }
        ticks.push(Tick {
            value: old.value,
            position: lerp(old.position, axis_position(to_scale, to.orient, old.value), t),
            label: old.label.clone(),
            opacity: lerp(old.opacity, 0.0, t),
        });
    }

    ticks.retain(|tick| tick.opacity > 0.0);
    ticks.sort_by(|a, b| a.value.total_cmp(&b.value));

    AxisTicks {
        ticks,
        ..to.clone()
    }
}
