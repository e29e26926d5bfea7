// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The activity chart pipeline: event log → buckets → scales → animated geometry.

use alloc::string::String;

use kurbo::Point;

use crate::aggregate::{AggregateError, AggregatedSeries, Aggregator, DEFAULT_BUCKET_WIDTH};
use crate::axis::AxisSpec;
use crate::event_log::{ChatEvent, DEFAULT_LOG_CAPACITY, EventLog};
use crate::layout::{ChartLayout, Margins, Size};
use crate::mapper::{ScaleMapper, ScaleMapperSpec, ScaleState};
use crate::renderer::ChartRenderer;
use crate::style::{ChartStyle, DEFAULT_TITLE};
use crate::transition::{ChartFrame, DEFAULT_TRANSITION_MS, Easing};

/// Configuration for an [`ActivityChart`].
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSpec {
    /// Outer container size.
    pub container: Size,
    /// Margins around the plot.
    pub margins: Margins,
    /// Number of events kept in the sliding window.
    pub log_capacity: usize,
    /// Bucket width in seconds.
    pub bucket_width: f64,
    /// Scale fitting options.
    pub scale: ScaleMapperSpec,
    /// Bottom time axis.
    pub x_axis: AxisSpec,
    /// Left count axis.
    pub y_axis: AxisSpec,
    /// Transition duration in milliseconds.
    pub transition_ms: f64,
    /// Transition easing.
    pub easing: Easing,
    /// Paint.
    pub style: ChartStyle,
    /// Title drawn above the plot, if any.
    pub title: Option<String>,
}

impl Default for ChartSpec {
    fn default() -> Self {
        Self {
            container: Size::new(400.0, 300.0),
            margins: Margins::default(),
            log_capacity: DEFAULT_LOG_CAPACITY,
            bucket_width: DEFAULT_BUCKET_WIDTH,
            scale: ScaleMapperSpec::default(),
            x_axis: AxisSpec::time_bottom(0),
            y_axis: AxisSpec::count_left(),
            transition_ms: DEFAULT_TRANSITION_MS,
            easing: Easing::default(),
            style: ChartStyle::default(),
            title: Some(String::from(DEFAULT_TITLE)),
        }
    }
}

impl ChartSpec {
    /// Sets the container size.
    pub fn with_container(mut self, container: Size) -> Self {
        self.container = container;
        self
    }

    /// Sets the sliding window capacity.
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity;
        self
    }

    /// Sets the bucket width in seconds.
    pub fn with_bucket_width(mut self, seconds: f64) -> Self {
        self.bucket_width = seconds;
        self
    }

    /// Sets the transition duration in milliseconds.
    pub fn with_transition_ms(mut self, ms: f64) -> Self {
        self.transition_ms = ms;
        self
    }

    /// Sets the paint.
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the title; `None` draws no title.
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Sets the UTC offset used for time axis labels.
    pub fn with_utc_offset_seconds(mut self, offset: i32) -> Self {
        self.x_axis = AxisSpec {
            format: crate::axis::TickFormat::ClockTime {
                utc_offset_seconds: offset,
            },
            ..self.x_axis
        };
        self
    }
}

/// Owns the chart pipeline end to end.
///
/// Every recorded event recomputes the series from the whole log, refits the scales and
/// starts a transition. Nothing else mutates this state.
#[derive(Clone, Debug)]
pub struct ActivityChart {
    spec: ChartSpec,
    layout: ChartLayout,
    log: EventLog,
    aggregator: Aggregator,
    mapper: ScaleMapper,
    renderer: ChartRenderer,
    series: AggregatedSeries,
}

impl ActivityChart {
    /// Builds the pipeline.
    pub fn new(spec: ChartSpec) -> Result<Self, AggregateError> {
        let aggregator = Aggregator::new(spec.bucket_width)?;
        let layout = ChartLayout::arrange(spec.container, spec.margins);
        let mapper = ScaleMapper::new(spec.scale, layout.plot);
        let renderer = ChartRenderer::new(spec.x_axis, spec.y_axis)
            .with_duration_ms(spec.transition_ms)
            .with_easing(spec.easing);
        Ok(Self {
            log: EventLog::new(spec.log_capacity),
            spec,
            layout,
            aggregator,
            mapper,
            renderer,
            series: AggregatedSeries::default(),
        })
    }

    /// Appends `event` and animates the chart towards the new series.
    ///
    /// Returns `true` if a transition was started.
    pub fn record(&mut self, event: ChatEvent, now_ms: f64) -> bool {
        self.log.append(event);
        self.series = self.aggregator.aggregate(self.log.iter());
        let Some(scale) = self.mapper.update(&self.series) else {
            return false;
        };
        self.renderer.render(&self.series, &scale, now_ms)
    }

    /// Moves the chart into a container of a new size.
    ///
    /// The current series is re-projected immediately, without a transition.
    pub fn resize(&mut self, container: Size, now_ms: f64) {
        self.spec.container = container;
        self.layout = ChartLayout::arrange(container, self.spec.margins);
        if let Some(scale) = self.mapper.set_plot(self.layout.plot) {
            self.renderer.snap(&self.series, &scale, now_ms);
        }
        log::debug!(
            "chart resized to {}x{}",
            container.width,
            container.height
        );
    }

    /// The frame on screen at `now_ms`.
    pub fn frame_at(&self, now_ms: f64) -> Option<ChartFrame> {
        self.renderer.frame_at(now_ms)
    }

    /// Returns `true` while a transition is running.
    pub fn is_animating(&self, now_ms: f64) -> bool {
        self.renderer.is_animating(now_ms)
    }

    /// The sliding window of events.
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// The most recently aggregated series.
    pub fn series(&self) -> &AggregatedSeries {
        &self.series
    }

    /// The last fitted scales.
    pub fn scale(&self) -> Option<ScaleState> {
        self.mapper.state()
    }

    /// The current container layout.
    pub fn layout(&self) -> ChartLayout {
        self.layout
    }

    /// The renderer (for direct access to the running transition).
    pub fn renderer(&self) -> &ChartRenderer {
        &self.renderer
    }

    /// The title text and where to draw it, if the chart has a title.
    pub fn title(&self) -> Option<(&str, Point)> {
        let anchor = self.spec.style.title_anchor(self.layout.view);
        self.spec.title.as_deref().map(|title| (title, anchor))
    }

    /// The configuration this chart was built with (container kept current).
    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    const TEN_AM: f64 = 1_704_103_200.0;

    #[test]
    fn record_runs_the_whole_pipeline() {
        let mut chart = ActivityChart::new(ChartSpec::default()).unwrap();
        assert!(chart.record(ChatEvent::new(TEN_AM + 5.0, true, false), 0.0));
        assert!(chart.record(ChatEvent::new(TEN_AM + 45.0, false, true), 10.0));
        assert_eq!(chart.log().len(), 2);
        assert_eq!(chart.series().len(), 1);
        assert_eq!(chart.series().buckets()[0].count, 2);
        let frame = chart.frame_at(1_000.0).unwrap();
        assert_eq!(frame.points.len(), 1);
    }

    #[test]
    fn window_slides_and_buckets_drop_out() {
        let spec = ChartSpec::default().with_log_capacity(3);
        let mut chart = ActivityChart::new(spec).unwrap();
        for i in 0..5 {
            chart.record(ChatEvent::new(TEN_AM + 60.0 * f64::from(i), true, false), 0.0);
        }
        let starts: std::vec::Vec<f64> = chart
            .series()
            .buckets()
            .iter()
            .map(|b| b.bucket_start)
            .collect();
        assert_eq!(starts, [TEN_AM + 120.0, TEN_AM + 180.0, TEN_AM + 240.0]);
    }

    #[test]
    fn resize_moves_the_plot_without_animating() {
        let mut chart = ActivityChart::new(ChartSpec::default()).unwrap();
        chart.record(ChatEvent::new(TEN_AM, true, false), 0.0);
        chart.resize(Size::new(800.0, 250.0), 100.0);
        assert!(!chart.is_animating(100.0));
        let frame = chart.frame_at(100.0).unwrap();
        assert_eq!(frame.scale.plot.x1, 770.0);
        assert_eq!(frame.points[0].x, 0.5 * (50.0 + 770.0));
    }

    #[test]
    fn default_container_and_title() {
        let mut chart = ActivityChart::new(ChartSpec::default()).unwrap();
        assert_eq!(chart.spec().container, Size::new(400.0, 300.0));
        assert_eq!(
            chart.title(),
            Some(("Message Activity Over Time", Point::new(200.0, 15.0)))
        );
        chart.resize(Size::new(640.0, 300.0), 0.0);
        assert_eq!(chart.title().map(|(_, at)| at.x), Some(320.0));

        let untitled = ActivityChart::new(ChartSpec::default().with_title(None)).unwrap();
        assert_eq!(untitled.title(), None);
    }

    #[test]
    fn resize_before_any_event_just_updates_layout() {
        let mut chart = ActivityChart::new(ChartSpec::default()).unwrap();
        chart.resize(Size::new(600.0, 300.0), 0.0);
        assert_eq!(chart.frame_at(0.0), None);
        assert_eq!(chart.layout().plot.x1, 570.0);
    }

    #[test]
    fn bad_bucket_width_is_rejected() {
        let spec = ChartSpec::default().with_bucket_width(0.0);
        assert!(ActivityChart::new(spec).is_err());
    }
}
