// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container sizing for the activity chart.
//!
//! The chart draws into an outer container; axes live in fixed margins around the inner
//! plot rectangle. Everything is in absolute container coordinates, origin top-left.

use kurbo::Rect;

/// A width/height pair used by chart layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in chart coordinate units.
    pub width: f64,
    /// Height in chart coordinate units.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Per-side margins reserved for axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    /// Space above the plot.
    pub top: f64,
    /// Space right of the plot.
    pub right: f64,
    /// Space below the plot (time axis).
    pub bottom: f64,
    /// Space left of the plot (count axis).
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 30.0,
            bottom: 40.0,
            left: 50.0,
        }
    }
}

/// Output of laying out a container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    /// Outer container bounds.
    pub view: Rect,
    /// The inner plot rectangle.
    pub plot: Rect,
}

impl ChartLayout {
    /// Lays out a container of the given size.
    ///
    /// Margins larger than the container collapse the plot to zero size instead of inverting it.
    pub fn arrange(container: Size, margins: Margins) -> Self {
        let view = Rect::new(0.0, 0.0, container.width.max(0.0), container.height.max(0.0));
        let x0 = margins.left.min(view.x1);
        let y0 = margins.top.min(view.y1);
        let plot = Rect::new(
            x0,
            y0,
            (view.x1 - margins.right).max(x0),
            (view.y1 - margins.bottom).max(y0),
        );
        Self { view, plot }
    }
}
