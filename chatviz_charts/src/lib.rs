// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chat activity chart building blocks.
//!
//! This crate turns a stream of chat messages into an animated time-series chart:
//! - **Event log**: a bounded FIFO of the most recent chat events.
//! - **Aggregation**: fixed-width time buckets with message counts.
//! - **Scales** map bucket starts and counts onto the plot rectangle.
//! - **Geometry**: a monotone cubic line, the area under it, and axis ticks.
//! - **Transitions** interpolate between successive frames over a fixed duration.
//!
//! [`ActivityChart`] wires these together. Rendering the produced [`kurbo::BezPath`]s and tick
//! labels is left to the host.

#![no_std]

extern crate alloc;

mod aggregate;
mod axis;
mod chart;
mod curve;
mod event_log;
#[cfg(not(feature = "std"))]
mod float;
mod layout;
mod mapper;
mod renderer;
mod scale;
mod style;
mod time;
mod transition;

pub use aggregate::{AggregateError, AggregatedSeries, Aggregator, Bucket, DEFAULT_BUCKET_WIDTH};
pub use axis::{AxisOrient, AxisSpec, AxisTicks, StrokeStyle, Tick, TickFormat};
pub use chart::{ActivityChart, ChartSpec};
pub use curve::{extend_monotone, monotone_area, monotone_line, monotone_tangents};
pub use event_log::{ChatEvent, DEFAULT_LOG_CAPACITY, EventLog};
pub use layout::{ChartLayout, Margins, Size};
pub use mapper::{DEFAULT_MIN_TIME_SPAN, ScaleMapper, ScaleMapperSpec, ScaleState, lerp_scale};
pub use renderer::ChartRenderer;
pub use scale::{ScaleContinuous, ScaleLinear, ScaleTime};
pub use style::{ChartStyle, DEFAULT_TITLE};
pub use time::{format_clock_time, nice_time_ticks_seconds, time_tick_step};
pub use transition::{ChartFrame, DEFAULT_TRANSITION_MS, Easing, Transition};
