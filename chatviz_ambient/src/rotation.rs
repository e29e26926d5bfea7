// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Euler rotation in radians, applied X then Y then Z.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Euler {
    /// Rotation about the x axis.
    pub x: f64,
    /// Rotation about the y axis.
    pub y: f64,
    /// Rotation about the z axis.
    pub z: f64,
}

impl Euler {
    /// Creates a rotation.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}
