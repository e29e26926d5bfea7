// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint for the activity chart.

use kurbo::{Point, Rect};
use peniko::{Brush, Color, Gradient};

use crate::axis::StrokeStyle;
use crate::mapper::ScaleState;

/// Default chart title.
pub const DEFAULT_TITLE: &str = "Message Activity Over Time";

/// Line, area and title paint, derived from the two palette colours.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartStyle {
    /// Stroke for the fitted line.
    pub line: StrokeStyle,
    /// Area gradient colour at count zero.
    pub area_start: Color,
    /// Area gradient colour at [`area_end_count`](Self::area_end_count).
    pub area_end: Color,
    /// Count at which the area gradient reaches `area_end`.
    ///
    /// The gradient lives in plot space, so a chart with small counts only shows its start.
    pub area_end_count: f64,
    /// Opacity of the whole area fill.
    pub area_opacity: f32,
    /// Stroke for axis domain lines and tick rules.
    pub axis: StrokeStyle,
    /// Tick label colour.
    pub label: Color,
    /// Tick label font size.
    pub label_font_size: f64,
    /// Title colour.
    pub title_color: Color,
    /// Title font size.
    pub title_font_size: f64,
    /// Title font weight (CSS scale).
    pub title_font_weight: u16,
    /// Distance from the container top to the title baseline.
    pub title_baseline: f64,
}

impl ChartStyle {
    /// Builds the chart paint from the primary and accent colours.
    ///
    /// The line is the primary colour. The area runs from primary at zero towards accent at a
    /// count of 100, drawn at 20% opacity.
    pub fn from_palette(primary: Color, accent: Color) -> Self {
        Self {
            line: StrokeStyle::solid(primary, 3.0),
            area_start: primary,
            area_end: accent,
            area_end_count: 100.0,
            area_opacity: 0.2,
            axis: StrokeStyle::solid(Color::from_rgb8(0x94, 0xa3, 0xb8), 1.0),
            label: Color::from_rgb8(0x94, 0xa3, 0xb8),
            label_font_size: 10.0,
            title_color: Color::from_rgb8(0xf1, 0xf5, 0xf9),
            title_font_size: 14.0,
            title_font_weight: 600,
            title_baseline: 15.0,
        }
    }

    /// Returns the endpoints of the area gradient under `scale`: count zero, then
    /// [`area_end_count`](Self::area_end_count), both at the plot's left edge.
    pub fn area_gradient_line(&self, scale: &ScaleState) -> (Point, Point) {
        let x = scale.plot.x0;
        (
            Point::new(x, scale.count.map(0.0)),
            Point::new(x, scale.count.map(self.area_end_count)),
        )
    }

    /// Returns the area fill under `scale`, with [`area_opacity`](Self::area_opacity) applied.
    pub fn area_brush(&self, scale: &ScaleState) -> Brush {
        let (start, end) = self.area_gradient_line(scale);
        Gradient::new_linear(start, end)
            .with_stops([
                (0.0_f32, self.area_start.multiply_alpha(self.area_opacity)),
                (1.0_f32, self.area_end.multiply_alpha(self.area_opacity)),
            ])
            .into()
    }

    /// Anchor of the title: horizontally centred in `view`, on the title baseline.
    pub fn title_anchor(&self, view: Rect) -> Point {
        Point::new(view.center().x, view.y0 + self.title_baseline)
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self::from_palette(
            Color::from_rgb8(0x63, 0x66, 0xf1),
            Color::from_rgb8(0xec, 0x48, 0x99),
        )
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::scale::{ScaleLinear, ScaleTime};

    fn scale() -> ScaleState {
        let plot = Rect::new(50.0, 20.0, 370.0, 260.0);
        ScaleState {
            time: ScaleTime::new((0.0, 60.0), (plot.x0, plot.x1)),
            count: ScaleLinear::new((0.0, 3.0), (plot.y1, plot.y0)),
            plot,
        }
    }

    #[test]
    fn palette_drives_line_and_area() {
        let primary = Color::from_rgb8(0x10, 0x20, 0x30);
        let accent = Color::from_rgb8(0x40, 0x50, 0x60);
        let style = ChartStyle::from_palette(primary, accent);
        assert_eq!(style.line.stroke_width, 3.0);
        assert_eq!(style.line.brush, Brush::Solid(primary));
        assert_eq!((style.area_start, style.area_end), (primary, accent));
        assert_eq!(style.area_opacity, 0.2);
        assert!(matches!(style.area_brush(&scale()), Brush::Gradient(_)));
    }

    #[test]
    fn gradient_runs_from_zero_up_to_the_end_count() {
        let (start, end) = ChartStyle::default().area_gradient_line(&scale());
        assert_eq!(start, Point::new(50.0, 260.0));
        // 100 on a 0..3 domain over 240 px lands far above the plot.
        assert_eq!(end.x, 50.0);
        assert!((end.y - (260.0 - 100.0 / 3.0 * 240.0)).abs() < 1e-9);
    }

    #[test]
    fn title_is_centred_near_the_top() {
        let style = ChartStyle::default();
        let anchor = style.title_anchor(Rect::new(0.0, 0.0, 400.0, 300.0));
        assert_eq!(anchor, Point::new(200.0, 15.0));
        assert_eq!(style.title_color, Color::from_rgb8(0xf1, 0xf5, 0xf9));
    }
}
