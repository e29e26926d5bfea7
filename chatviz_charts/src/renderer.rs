// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning a scaled series into animated chart geometry.

extern crate alloc;

use kurbo::Point;

use crate::aggregate::AggregatedSeries;
use crate::axis::AxisSpec;
use crate::mapper::ScaleState;
use crate::scale::ScaleContinuous;
use crate::transition::{ChartFrame, DEFAULT_TRANSITION_MS, Easing, Transition};

/// Projects series into frames and animates between them.
///
/// The renderer only ever holds one transition. A render that arrives mid-flight starts the
/// next transition from whatever frame is on screen at that instant.
#[derive(Clone, Debug)]
pub struct ChartRenderer {
    x_axis: AxisSpec,
    y_axis: AxisSpec,
    duration_ms: f64,
    easing: Easing,
    transition: Option<Transition>,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new(AxisSpec::time_bottom(0), AxisSpec::count_left())
    }
}

impl ChartRenderer {
    /// Creates a renderer with the given axes and the default 500 ms transition.
    pub fn new(x_axis: AxisSpec, y_axis: AxisSpec) -> Self {
        Self {
            x_axis,
            y_axis,
            duration_ms: DEFAULT_TRANSITION_MS,
            easing: Easing::default(),
            transition: None,
        }
    }

    /// Sets the transition duration in milliseconds.
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Sets the transition easing.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Projects `series` through `scale` into a static frame.
    pub fn project(&self, series: &AggregatedSeries, scale: &ScaleState) -> ChartFrame {
        let points = series
            .buckets()
            .iter()
            .map(|b| {
                Point::new(
                    scale.time.map(b.bucket_start),
                    scale.count.map(f64::from(b.count)),
                )
            })
            .collect();
        ChartFrame {
            points,
            baseline: scale.plot.y1,
            scale: *scale,
            x_axis: self
                .x_axis
                .ticks(&ScaleContinuous::Time(scale.time), scale.plot),
            y_axis: self
                .y_axis
                .ticks(&ScaleContinuous::Linear(scale.count), scale.plot),
        }
    }

    /// Starts animating towards `series` projected through `scale`.
    ///
    /// An empty series is a no-op: the frame on screen is left exactly as it was.
    /// Returns `true` if a transition was started.
    pub fn render(&mut self, series: &AggregatedSeries, scale: &ScaleState, now_ms: f64) -> bool {
        if series.is_empty() {
            log::debug!("empty series, keeping the current chart frame");
            return false;
        }
        let target = self.project(series, scale);
        let from = match self.frame_at(now_ms) {
            Some(current) => current,
            None => target.collapsed(),
        };
        log::trace!(
            "chart transition at {now_ms}: {} -> {} samples",
            from.points.len(),
            target.points.len()
        );
        self.transition = Some(
            Transition::new(from, target, now_ms, self.duration_ms).with_easing(self.easing),
        );
        true
    }

    /// Jumps straight to `series` projected through `scale`, without animating.
    pub fn snap(&mut self, series: &AggregatedSeries, scale: &ScaleState, now_ms: f64) {
        if series.is_empty() {
            return;
        }
        let target = self.project(series, scale);
        self.transition = Some(Transition::new(target.clone(), target, now_ms, 0.0));
    }

    /// Returns the frame on screen at `now_ms`, or `None` before the first render.
    pub fn frame_at(&self, now_ms: f64) -> Option<ChartFrame> {
        self.transition.as_ref().map(|t| t.sample(now_ms))
    }

    /// Returns the current (possibly finished) transition.
    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    /// Returns `true` while a transition is still running at `now_ms`.
    pub fn is_animating(&self, now_ms: f64) -> bool {
        self.transition
            .as_ref()
            .is_some_and(|t| !t.is_finished(now_ms))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::Rect;

    use super::*;
    use crate::aggregate::Aggregator;
    use crate::event_log::ChatEvent;
    use crate::mapper::{ScaleMapper, ScaleMapperSpec};

    const TEN_AM: f64 = 1_704_103_200.0;

    fn fitted(timestamps: &[f64]) -> (AggregatedSeries, ScaleState) {
        let events: alloc::vec::Vec<ChatEvent> = timestamps
            .iter()
            .map(|&t| ChatEvent::new(t, true, false))
            .collect();
        let series = Aggregator::default().aggregate(&events);
        let mut mapper =
            ScaleMapper::new(ScaleMapperSpec::default(), Rect::new(50.0, 20.0, 370.0, 210.0));
        let scale = mapper.update(&series).unwrap();
        (series, scale)
    }

    #[test]
    fn empty_series_preserves_the_previous_frame() {
        let (series, scale) = fitted(&[TEN_AM, TEN_AM + 61.0]);
        let mut r = ChartRenderer::default();
        assert!(r.render(&series, &scale, 0.0));
        let before = r.frame_at(10_000.0).unwrap();
        assert!(!r.render(&AggregatedSeries::default(), &scale, 10_000.0));
        assert_eq!(r.frame_at(10_000.0).unwrap(), before);
        assert_eq!(r.frame_at(20_000.0).unwrap(), before);
    }

    #[test]
    fn nothing_is_drawn_before_the_first_render() {
        let r = ChartRenderer::default();
        assert_eq!(r.frame_at(0.0), None);
        assert!(!r.is_animating(0.0));
    }

    #[test]
    fn first_render_grows_from_the_baseline() {
        let (series, scale) = fitted(&[TEN_AM, TEN_AM + 61.0]);
        let mut r = ChartRenderer::default();
        r.render(&series, &scale, 100.0);
        let start = r.frame_at(100.0).unwrap();
        assert!(start.points.iter().all(|p| p.y == scale.plot.y1));
        assert!(r.is_animating(300.0));
        assert!(!r.is_animating(600.0));
        assert_eq!(r.frame_at(600.0).unwrap(), r.project(&series, &scale));
    }

    #[test]
    fn interrupted_transition_starts_from_the_screen() {
        let (s1, k1) = fitted(&[TEN_AM]);
        let (s2, k2) = fitted(&[TEN_AM, TEN_AM + 61.0, TEN_AM + 62.0]);
        let mut r = ChartRenderer::default();
        r.render(&s1, &k1, 0.0);
        let on_screen = r.frame_at(200.0).unwrap();
        r.render(&s2, &k2, 200.0);
        assert_eq!(r.frame_at(200.0).unwrap(), on_screen);
        assert_eq!(r.frame_at(700.0).unwrap(), r.project(&s2, &k2));
    }

    #[test]
    fn projected_points_sit_inside_the_plot() {
        let (series, scale) = fitted(&[TEN_AM, TEN_AM + 1.0, TEN_AM + 130.0, TEN_AM + 300.0]);
        let frame = ChartRenderer::default().project(&series, &scale);
        assert_eq!(frame.points.len(), 3);
        for p in &frame.points {
            assert!(p.x >= scale.plot.x0 && p.x <= scale.plot.x1);
            assert!(p.y >= scale.plot.y0 && p.y <= scale.plot.y1);
        }
        assert_eq!(frame.x_axis.ticks.first().map(|t| t.label.as_str()), Some("10:00"));
    }

    #[test]
    fn snap_skips_the_animation() {
        let (series, scale) = fitted(&[TEN_AM]);
        let mut r = ChartRenderer::default();
        r.snap(&series, &scale, 50.0);
        assert!(!r.is_animating(50.0));
        assert_eq!(r.frame_at(50.0).unwrap(), r.project(&series, &scale));
    }
}
