// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Rejected generator parameters.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum MeshError {
    /// A wave grid needs at least one segment on each axis.
    #[error("wave grid needs at least one segment per axis, got {x}x{y}")]
    ZeroSegments {
        /// Requested horizontal segments.
        x: u32,
        /// Requested vertical segments.
        y: u32,
    },
    /// Plane dimensions must be finite and positive.
    #[error("plane size must be finite and positive, got {width}x{height}")]
    InvalidPlaneSize {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },
    /// A spiral needs at least one arm.
    #[error("spiral galaxy needs at least one arm")]
    ZeroArms,
    /// A spiral needs at least one colour stop.
    #[error("spiral galaxy needs at least one colour stop")]
    EmptyColorStops,
}
