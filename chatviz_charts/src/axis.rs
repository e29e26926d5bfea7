// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis tick generation.
//!
//! The activity chart has two axes: a bottom time axis labelled `HH:MM` and a left count
//! axis. An [`AxisSpec`] turns a fitted scale into positioned, labelled [`Tick`]s; the
//! transition layer interpolates those between successive scale states.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::scale::ScaleContinuous;
use crate::time::format_clock_time;

/// A paint + width pair for stroked paths (lines, domain lines, ticks).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Axis orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis placed below the plot area.
    Bottom,
    /// A vertical axis placed to the left of the plot area.
    Left,
}

/// How tick values are turned into labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickFormat {
    /// Wall-clock `HH:MM`, shifted by a UTC offset in seconds.
    ClockTime {
        /// Offset added to the epoch seconds before formatting.
        utc_offset_seconds: i32,
    },
    /// Plain numbers with as many decimals as the tick step needs.
    Number,
}

impl TickFormat {
    /// Finest tick step the labels can tell apart; `0` when unlimited.
    pub fn min_step(self) -> f64 {
        match self {
            Self::ClockTime { .. } => 60.0,
            Self::Number => 0.0,
        }
    }
}

/// A single positioned tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Value in data units.
    pub value: f64,
    /// Pixel coordinate along the axis (x for bottom axes, y for left axes).
    pub position: f64,
    /// Rendered label.
    pub label: String,
    /// Opacity in `[0, 1]`; below one while entering or exiting.
    pub opacity: f64,
}

/// Ticks for one axis, plus what is needed to draw them.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTicks {
    /// Axis placement.
    pub orient: AxisOrient,
    /// The plot rectangle the axis is attached to.
    pub plot: Rect,
    /// Tick line length.
    pub tick_size: f64,
    /// Gap between the tick end and its label.
    pub tick_padding: f64,
    /// Ticks in ascending value order.
    pub ticks: Vec<Tick>,
}

impl AxisTicks {
    /// Returns the domain line plus one short rule per tick.
    pub fn rules(&self) -> BezPath {
        let mut p = BezPath::new();
        match self.orient {
            AxisOrient::Bottom => {
                let y = self.plot.y1;
                p.move_to((self.plot.x0, y));
                p.line_to((self.plot.x1, y));
                for t in &self.ticks {
                    p.move_to((t.position, y));
                    p.line_to((t.position, y + self.tick_size));
                }
            }
            AxisOrient::Left => {
                let x = self.plot.x0;
                p.move_to((x, self.plot.y0));
                p.line_to((x, self.plot.y1));
                for t in &self.ticks {
                    p.move_to((x, t.position));
                    p.line_to((x - self.tick_size, t.position));
                }
            }
        }
        p
    }

    /// Returns the anchor point for a tick's label.
    ///
    /// Bottom labels hang centred below the tick; left labels end right before it.
    pub fn label_anchor(&self, tick: &Tick) -> Point {
        let offset = self.tick_size + self.tick_padding;
        match self.orient {
            AxisOrient::Bottom => Point::new(tick.position, self.plot.y1 + offset),
            AxisOrient::Left => Point::new(self.plot.x0 - offset, tick.position),
        }
    }
}

/// Describes how to derive [`AxisTicks`] from a scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisSpec {
    /// Axis placement relative to the plot.
    pub orient: AxisOrient,
    /// Approximate number of ticks.
    pub tick_count: usize,
    /// Tick line length.
    pub tick_size: f64,
    /// Padding between the tick end and the tick label.
    pub tick_padding: f64,
    /// Label format.
    pub format: TickFormat,
}

impl AxisSpec {
    /// A bottom time axis with about five `HH:MM` ticks.
    pub fn time_bottom(utc_offset_seconds: i32) -> Self {
        Self {
            orient: AxisOrient::Bottom,
            tick_count: 5,
            tick_size: 6.0,
            tick_padding: 3.0,
            format: TickFormat::ClockTime { utc_offset_seconds },
        }
    }

    /// A left count axis with about five numeric ticks.
    pub fn count_left() -> Self {
        Self {
            orient: AxisOrient::Left,
            tick_count: 5,
            tick_size: 6.0,
            tick_padding: 3.0,
            format: TickFormat::Number,
        }
    }

    /// Set the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Set tick size in scene coordinates.
    pub fn with_tick_size(mut self, tick_size: f64) -> Self {
        self.tick_size = tick_size;
        self
    }

    /// Formats `value` given the tick `step`.
    pub fn format(&self, value: f64, step: f64) -> String {
        match self.format {
            TickFormat::ClockTime { utc_offset_seconds } => {
                format_clock_time(value, utc_offset_seconds)
            }
            TickFormat::Number => format_number(value, step),
        }
    }

    /// Generates fully opaque ticks for `scale` attached to `plot`.
    pub fn ticks(&self, scale: &ScaleContinuous, plot: Rect) -> AxisTicks {
        let min_step = self.format.min_step();
        let step = scale.tick_step(self.tick_count).max(min_step);
        let ticks = scale
            .ticks_with_min_step(self.tick_count, min_step)
            .into_iter()
            .map(|value| Tick {
                value,
                position: scale.map(value),
                label: self.format(value, step),
                opacity: 1.0,
            })
            .collect();
        AxisTicks {
            orient: self.orient,
            plot,
            tick_size: self.tick_size,
            tick_padding: self.tick_padding,
            ticks,
        }
    }
}

fn format_number(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return alloc::format!("{v}");
    }
    let decimals = if step.is_finite() && step > 0.0 && step < 1.0 {
        let d = (-step.log10()).ceil().clamp(0.0, 12.0);
        #[allow(clippy::cast_possible_truncation, reason = "clamped to [0, 12]")]
        {
            d as usize
        }
    } else {
        0
    };
    alloc::format!("{v:.decimals$}")
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::scale::{ScaleLinear, ScaleTime};

    const TEN_AM: f64 = 1_704_103_200.0;

    fn plot() -> Rect {
        Rect::new(50.0, 20.0, 370.0, 210.0)
    }

    #[test]
    fn count_axis_labels_follow_step_precision() {
        let scale = ScaleContinuous::from(ScaleLinear::new((0.0, 3.0), (210.0, 20.0)));
        let axis = AxisSpec::count_left().ticks(&scale, plot());
        let labels: Vec<&str> = axis.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["0.0", "0.5", "1.0", "1.5", "2.0", "2.5", "3.0"]);
        assert_eq!(axis.ticks[0].position, 210.0);
    }

    #[test]
    fn integer_steps_have_no_decimals() {
        let scale = ScaleContinuous::from(ScaleLinear::new((0.0, 21.0), (210.0, 20.0)));
        let axis = AxisSpec::count_left().ticks(&scale, plot());
        assert!(axis.ticks.iter().all(|t| !t.label.contains('.')));
        assert!(axis.ticks.len() >= 3);
    }

    #[test]
    fn time_axis_uses_clock_labels() {
        let scale = ScaleContinuous::from(ScaleTime::new((TEN_AM, TEN_AM + 240.0), (50.0, 370.0)));
        let axis = AxisSpec::time_bottom(0).ticks(&scale, plot());
        let labels: Vec<&str> = axis.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["10:00", "10:01", "10:02", "10:03", "10:04"]);
        assert_eq!(axis.ticks[0].position, 50.0);
        assert_eq!(axis.ticks[4].position, 370.0);
    }

    #[test]
    fn clock_labels_never_repeat_on_a_one_minute_domain() {
        // A single bucket at 10:00 widened to a 60 s domain.
        let scale =
            ScaleContinuous::from(ScaleTime::new((TEN_AM - 30.0, TEN_AM + 30.0), (50.0, 370.0)));
        let axis = AxisSpec::time_bottom(0).ticks(&scale, plot());
        let labels: Vec<&str> = axis.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["10:00"]);
        assert_eq!(axis.ticks[0].position, 210.0);
    }

    #[test]
    fn label_anchors_sit_outside_the_plot() {
        let scale = ScaleContinuous::from(ScaleLinear::new((0.0, 2.0), (210.0, 20.0)));
        let axis = AxisSpec::count_left().ticks(&scale, plot());
        let anchor = axis.label_anchor(&axis.ticks[0]);
        assert!(anchor.x < plot().x0);
        assert!(!axis.rules().elements().is_empty());
    }
}
