// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fitting scales to an aggregated series.

use kurbo::Rect;

use crate::aggregate::AggregatedSeries;
use crate::scale::{ScaleLinear, ScaleTime};

/// Default minimum span (seconds) of the time domain.
pub const DEFAULT_MIN_TIME_SPAN: f64 = 60.0;

/// Scales fitted to one aggregated series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleState {
    /// Bucket start (seconds) → horizontal pixel.
    pub time: ScaleTime,
    /// Bucket count → vertical pixel (inverted: zero at the plot bottom).
    pub count: ScaleLinear,
    /// The plot rectangle both ranges were derived from.
    pub plot: Rect,
}

impl ScaleState {
    /// Returns the time domain in seconds.
    pub fn time_domain(&self) -> (f64, f64) {
        self.time.domain()
    }

    /// Returns the count domain, `(0, max_count + 1)`.
    pub fn count_domain(&self) -> (f64, f64) {
        self.count.domain()
    }

    /// Returns a copy of this state with ranges re-derived from a new plot rectangle.
    pub fn with_plot(&self, plot: Rect) -> Self {
        Self {
            time: ScaleTime::new(self.time_domain(), (plot.x0, plot.x1)),
            count: ScaleLinear::new(self.count_domain(), (plot.y1, plot.y0)),
            plot,
        }
    }
}

/// Linear blend of two scale states, `t = 0` giving `a` and `t = 1` giving `b`.
///
/// Domains, ranges and the plot rectangle are blended independently.
pub fn lerp_scale(a: &ScaleState, b: &ScaleState, t: f64) -> ScaleState {
    let mix = |p: (f64, f64), q: (f64, f64)| (p.0 + (q.0 - p.0) * t, p.1 + (q.1 - p.1) * t);
    let plot = Rect::new(
        a.plot.x0 + (b.plot.x0 - a.plot.x0) * t,
        a.plot.y0 + (b.plot.y0 - a.plot.y0) * t,
        a.plot.x1 + (b.plot.x1 - a.plot.x1) * t,
        a.plot.y1 + (b.plot.y1 - a.plot.y1) * t,
    );
    ScaleState {
        time: ScaleTime::new(
            mix(a.time.domain(), b.time.domain()),
            mix(a.time.range(), b.time.range()),
        ),
        count: ScaleLinear::new(
            mix(a.count.domain(), b.count.domain()),
            mix(a.count.range(), b.count.range()),
        ),
        plot,
    }
}

/// Options for [`ScaleMapper`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleMapperSpec {
    /// Narrowest time domain allowed, in seconds.
    ///
    /// Narrower extents (e.g. a single bucket) are widened symmetrically.
    pub min_time_span: f64,
}

impl Default for ScaleMapperSpec {
    fn default() -> Self {
        Self {
            min_time_span: DEFAULT_MIN_TIME_SPAN,
        }
    }
}

impl ScaleMapperSpec {
    /// Sets the minimum time span in seconds.
    pub fn with_min_time_span(mut self, seconds: f64) -> Self {
        self.min_time_span = seconds;
        self
    }
}

/// Keeps the last good [`ScaleState`] for a fixed plot rectangle.
#[derive(Clone, Debug)]
pub struct ScaleMapper {
    spec: ScaleMapperSpec,
    plot: Rect,
    state: Option<ScaleState>,
}

impl ScaleMapper {
    /// Creates a mapper drawing into `plot`.
    pub fn new(spec: ScaleMapperSpec, plot: Rect) -> Self {
        Self {
            spec,
            plot,
            state: None,
        }
    }

    /// Returns the current plot rectangle.
    pub fn plot(&self) -> Rect {
        self.plot
    }

    /// Returns the last fitted state, if any series has been seen.
    pub fn state(&self) -> Option<ScaleState> {
        self.state
    }

    /// Refits the scales to `series` and returns the current state.
    ///
    /// An empty series leaves the previous state untouched.
    pub fn update(&mut self, series: &AggregatedSeries) -> Option<ScaleState> {
        let (Some((t_min, t_max)), Some(max_count)) = (series.time_extent(), series.max_count())
        else {
            log::debug!("empty series, keeping previous scales");
            return self.state;
        };

        let time_domain = widen(t_min, t_max, self.spec.min_time_span);
        if time_domain != (t_min, t_max) {
            log::debug!(
                "widened time domain [{t_min}, {t_max}] to [{}, {}]",
                time_domain.0,
                time_domain.1
            );
        }
        let count_domain = (0.0, f64::from(max_count) + 1.0);

        let state = ScaleState {
            time: ScaleTime::new(time_domain, (self.plot.x0, self.plot.x1)),
            count: ScaleLinear::new(count_domain, (self.plot.y1, self.plot.y0)),
            plot: self.plot,
        };
        self.state = Some(state);
        self.state
    }

    /// Moves the mapper to a new plot rectangle, re-deriving the ranges of the current state.
    pub fn set_plot(&mut self, plot: Rect) -> Option<ScaleState> {
        self.plot = plot;
        self.state = self.state.map(|s| s.with_plot(plot));
        self.state
    }
}

fn widen(min: f64, max: f64, min_span: f64) -> (f64, f64) {
    // Always leave some width, even if the configured span is zero.
    let min_span = if min_span.is_finite() && min_span > 0.0 {
        min_span
    } else {
        1.0
    };
    let span = max - min;
    if span >= min_span {
        return (min, max);
    }
    let pad = 0.5 * (min_span - span);
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::aggregate::Aggregator;
    use crate::event_log::ChatEvent;

    const TEN_AM: f64 = 1_704_103_200.0;

    fn plot() -> Rect {
        Rect::new(50.0, 20.0, 370.0, 210.0)
    }

    fn series(timestamps: &[f64]) -> AggregatedSeries {
        let events: alloc::vec::Vec<ChatEvent> = timestamps
            .iter()
            .map(|&t| ChatEvent::new(t, true, false))
            .collect();
        Aggregator::default().aggregate(&events)
    }

    #[test]
    fn single_bucket_never_yields_zero_width_domain() {
        let mut mapper = ScaleMapper::new(ScaleMapperSpec::default(), plot());
        let state = mapper.update(&series(&[TEN_AM + 3.0])).unwrap();
        let (lo, hi) = state.time_domain();
        assert!(hi > lo);
        assert_eq!(hi - lo, DEFAULT_MIN_TIME_SPAN);
        // The lone bucket sits in the middle of the plot.
        assert!((state.time.map(TEN_AM) - 210.0).abs() < 1e-9);
    }

    #[test]
    fn zero_min_span_still_pads() {
        let spec = ScaleMapperSpec::default().with_min_time_span(0.0);
        let mut mapper = ScaleMapper::new(spec, plot());
        let state = mapper.update(&series(&[TEN_AM])).unwrap();
        let (lo, hi) = state.time_domain();
        assert!(hi > lo);
    }

    #[test]
    fn count_domain_has_one_unit_of_headroom() {
        let mut mapper = ScaleMapper::new(ScaleMapperSpec::default(), plot());
        let state = mapper
            .update(&series(&[TEN_AM, TEN_AM + 1.0, TEN_AM + 2.0, TEN_AM + 70.0]))
            .unwrap();
        assert_eq!(state.count_domain(), (0.0, 4.0));
        assert_eq!(state.time_domain(), (TEN_AM, TEN_AM + 60.0));
        assert_eq!(state.count.map(0.0), 210.0);
        assert_eq!(state.count.map(4.0), 20.0);
    }

    #[test]
    fn empty_series_keeps_previous_state() {
        let mut mapper = ScaleMapper::new(ScaleMapperSpec::default(), plot());
        assert_eq!(mapper.update(&AggregatedSeries::default()), None);
        let first = mapper.update(&series(&[TEN_AM])).unwrap();
        let again = mapper.update(&AggregatedSeries::default()).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn set_plot_keeps_domains() {
        let mut mapper = ScaleMapper::new(ScaleMapperSpec::default(), plot());
        let before = mapper.update(&series(&[TEN_AM, TEN_AM + 120.0])).unwrap();
        let after = mapper.set_plot(Rect::new(50.0, 20.0, 570.0, 210.0)).unwrap();
        assert_eq!(before.time_domain(), after.time_domain());
        assert_eq!(after.time.map(TEN_AM + 120.0), 570.0);
    }
}
