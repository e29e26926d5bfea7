// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay configuration.

use chatviz_ambient::{DEFAULT_PARTICLE_COUNT, MeshError, Palette, PointerResponse, Viewport};
use chatviz_charts::{AggregateError, DEFAULT_BUCKET_WIDTH, DEFAULT_LOG_CAPACITY, Size};
use thiserror::Error;

/// Default id of the element the chart is mounted into.
pub const DEFAULT_CONTAINER_ID: &str = "chat-analytics";

/// Invalid overlay configuration.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The container id is empty.
    #[error("container id must not be empty")]
    EmptyContainerId,
    /// The event window must hold at least one event.
    #[error("log capacity must be at least 1")]
    ZeroLogCapacity,
    /// Rejected by the aggregator.
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    /// Rejected by a background generator.
    #[error(transparent)]
    Mesh(#[from] MeshError),
    /// Viewport or chart dimensions are not finite and positive.
    #[error("{what} must be finite and positive, got {width}x{height}")]
    InvalidSize {
        /// Which size was rejected.
        what: &'static str,
        /// Rejected width.
        width: f64,
        /// Rejected height.
        height: f64,
    },
}

/// Everything needed to build a [`ChatOverlay`](crate::ChatOverlay).
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    /// Id of the chart container; the host creates it if missing.
    pub container_id: String,
    /// Initial size of the chart container.
    pub chart_size: Size,
    /// Initial size of the background output.
    pub viewport: Viewport,
    /// Primary and accent colours for the chart gradient, particles and lights.
    pub palette: Palette,
    /// Number of recent events kept for the chart.
    pub log_capacity: usize,
    /// Bucket width in seconds.
    pub bucket_width: f64,
    /// UTC offset applied to time axis labels.
    pub utc_offset_seconds: i32,
    /// Number of background particles.
    pub particle_count: usize,
    /// Seed for the particle field.
    pub seed: u64,
    /// Wave grid segments along x and y.
    pub wave_segments: (u32, u32),
    /// How the pointer drives the particle rotation.
    pub pointer_response: PointerResponse,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            container_id: DEFAULT_CONTAINER_ID.to_owned(),
            chart_size: Size::new(400.0, 300.0),
            viewport: Viewport::new(1280.0, 720.0),
            palette: Palette::default(),
            log_capacity: DEFAULT_LOG_CAPACITY,
            bucket_width: DEFAULT_BUCKET_WIDTH,
            utc_offset_seconds: 0,
            particle_count: DEFAULT_PARTICLE_COUNT,
            seed: 0,
            wave_segments: (50, 50),
            pointer_response: PointerResponse::default(),
        }
    }
}

impl OverlayConfig {
    /// Sets the container id.
    pub fn with_container_id(mut self, id: impl Into<String>) -> Self {
        self.container_id = id.into();
        self
    }

    /// Sets the initial chart container size.
    pub fn with_chart_size(mut self, size: Size) -> Self {
        self.chart_size = size;
        self
    }

    /// Sets the initial background viewport.
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Sets the palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Sets the event window size.
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity;
        self
    }

    /// Sets the bucket width in seconds.
    pub fn with_bucket_width(mut self, seconds: f64) -> Self {
        self.bucket_width = seconds;
        self
    }

    /// Sets the label time zone.
    pub fn with_utc_offset_seconds(mut self, offset: i32) -> Self {
        self.utc_offset_seconds = offset;
        self
    }

    /// Sets particle count and seed.
    pub fn with_particles(mut self, count: usize, seed: u64) -> Self {
        self.particle_count = count;
        self.seed = seed;
        self
    }

    /// Sets the wave grid resolution.
    pub fn with_wave_segments(mut self, x: u32, y: u32) -> Self {
        self.wave_segments = (x, y);
        self
    }

    /// Sets the pointer response.
    pub fn with_pointer_response(mut self, response: PointerResponse) -> Self {
        self.pointer_response = response;
        self
    }

    /// Checks every field once, before anything is allocated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.container_id.trim().is_empty() {
            return Err(ConfigError::EmptyContainerId);
        }
        if self.log_capacity == 0 {
            return Err(ConfigError::ZeroLogCapacity);
        }
        if !(self.bucket_width.is_finite() && self.bucket_width > 0.0) {
            return Err(AggregateError::InvalidBucketWidth(self.bucket_width).into());
        }
        check_size("viewport", self.viewport.width, self.viewport.height)?;
        check_size("chart size", self.chart_size.width, self.chart_size.height)?;
        let (x, y) = self.wave_segments;
        if x == 0 || y == 0 {
            return Err(MeshError::ZeroSegments { x, y }.into());
        }
        Ok(())
    }
}

fn check_size(what: &'static str, width: f64, height: f64) -> Result<(), ConfigError> {
    let ok = |v: f64| v.is_finite() && v > 0.0;
    if ok(width) && ok(height) {
        Ok(())
    } else {
        Err(ConfigError::InvalidSize {
            what,
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(OverlayConfig::default().validate(), Ok(()));
    }

    #[test]
    fn chart_size_matches_the_chart_default() {
        assert_eq!(
            OverlayConfig::default().chart_size,
            chatviz_charts::ChartSpec::default().container
        );
    }

    #[test]
    fn each_invalid_field_is_reported() {
        let base = OverlayConfig::default();
        assert_eq!(
            base.clone().with_container_id(" ").validate(),
            Err(ConfigError::EmptyContainerId)
        );
        assert_eq!(
            base.clone().with_log_capacity(0).validate(),
            Err(ConfigError::ZeroLogCapacity)
        );
        assert!(matches!(
            base.clone().with_bucket_width(0.0).validate(),
            Err(ConfigError::Aggregate(AggregateError::InvalidBucketWidth(_)))
        ));
        assert!(matches!(
            base.clone()
                .with_viewport(Viewport::new(0.0, 10.0))
                .validate(),
            Err(ConfigError::InvalidSize {
                what: "viewport",
                ..
            })
        ));
        assert_eq!(
            base.with_wave_segments(4, 0).validate(),
            Err(ConfigError::Mesh(MeshError::ZeroSegments { x: 4, y: 0 }))
        );
    }

    #[test]
    fn errors_render_readably() {
        let err = ConfigError::InvalidSize {
            what: "viewport",
            width: 0.0,
            height: 10.0,
        };
        assert_eq!(
            err.to_string(),
            "viewport must be finite and positive, got 0x10"
        );
    }
}
