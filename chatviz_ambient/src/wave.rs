// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The wave surface: a flat grid whose heights follow two travelling sine waves.

use alloc::vec::Vec;
use core::f64::consts::FRAC_PI_3;

use peniko::Color;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::error::MeshError;
use crate::palette::Palette;
use crate::rotation::Euler;

/// Shape of the height function `z = sin(x·f + c·s)·a + sin(y·f + c·s)·a`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveParams {
    /// Spatial frequency `f`.
    pub frequency: f64,
    /// Clock multiplier `s`.
    pub speed: f64,
    /// Amplitude `a` of each component.
    pub amplitude: f64,
    /// Spin about the surface normal per unit of clock.
    pub spin: f64,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            frequency: 0.2,
            speed: 2.0,
            amplitude: 2.0,
            spin: 0.1,
        }
    }
}

/// Height of the surface at original coordinates `(x, y)` for clock value `clock`.
pub fn wave_height(x: f64, y: f64, clock: f64, params: &WaveParams) -> f64 {
    let phase = clock * params.speed;
    (x * params.frequency + phase).sin() * params.amplitude
        + (y * params.frequency + phase).sin() * params.amplitude
}

/// Placement of the mesh in the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveTransform {
    /// Orientation; `x` is the fixed tilt, `z` the clock-driven spin.
    pub rotation: Euler,
    /// Offset along z, pushing the surface behind the particles.
    pub offset_z: f64,
}

impl Default for WaveTransform {
    fn default() -> Self {
        Self {
            rotation: Euler::new(-FRAC_PI_3, 0.0, 0.0),
            offset_z: -30.0,
        }
    }
}

/// Surface material the host renderer should use: a translucent, lit wireframe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveMaterial {
    /// Wire colour.
    pub color: Color,
    /// Draw edges only.
    pub wireframe: bool,
    /// Global opacity.
    pub opacity: f32,
    /// Render both faces.
    pub double_sided: bool,
}

impl WaveMaterial {
    /// The wireframe in the palette's primary colour at 15% opacity.
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            color: palette.primary,
            wireframe: true,
            opacity: 0.15,
            double_sided: true,
        }
    }
}

impl Default for WaveMaterial {
    fn default() -> Self {
        Self::from_palette(&Palette::default())
    }
}

/// A regular grid whose x/y stay fixed and whose z is recomputed from the clock.
#[derive(Clone, Debug)]
pub struct WaveMesh {
    segments_x: u32,
    segments_y: u32,
    original: Vec<[f32; 3]>,
    z: Vec<f32>,
    params: WaveParams,
    material: WaveMaterial,
    transform: WaveTransform,
}

impl WaveMesh {
    /// Builds a `(segments_x + 1) × (segments_y + 1)` grid centred on the origin.
    ///
    /// Vertices are row-major from the top-left corner: `+y` is up, so the first row has the
    /// largest `y`. All original `z` values are zero.
    pub fn build(
        width: f64,
        height: f64,
        segments_x: u32,
        segments_y: u32,
    ) -> Result<Self, MeshError> {
        if segments_x == 0 || segments_y == 0 {
            return Err(MeshError::ZeroSegments {
                x: segments_x,
                y: segments_y,
            });
        }
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(MeshError::InvalidPlaneSize { width, height });
        }

        let seg_w = width / f64::from(segments_x);
        let seg_h = height / f64::from(segments_y);
        let cols = segments_x as usize + 1;
        let rows = segments_y as usize + 1;
        let mut original = Vec::with_capacity(cols * rows);
        for iy in 0..=segments_y {
            let y = height / 2.0 - f64::from(iy) * seg_h;
            for ix in 0..=segments_x {
                let x = f64::from(ix) * seg_w - width / 2.0;
                #[allow(clippy::cast_possible_truncation, reason = "vertex buffers are f32")]
                original.push([x as f32, y as f32, 0.0]);
            }
        }
        log::debug!(
            "built {width}x{height} wave mesh, {segments_x}x{segments_y} segments, {} vertices",
            original.len()
        );
        Ok(Self {
            segments_x,
            segments_y,
            z: alloc::vec![0.0; original.len()],
            original,
            params: WaveParams::default(),
            material: WaveMaterial::default(),
            transform: WaveTransform::default(),
        })
    }

    /// Replaces the height-function parameters.
    pub fn with_params(mut self, params: WaveParams) -> Self {
        self.params = params;
        self
    }

    /// Replaces the surface material.
    pub fn with_material(mut self, material: WaveMaterial) -> Self {
        self.material = material;
        self
    }

    /// Recomputes every vertex height for `clock` and sets the spin to `clock · spin`.
    ///
    /// Only z changes. The result depends on `clock` and the original vertices alone, so the
    /// same clock always yields the same heights.
    pub fn advance(&mut self, clock: f64) -> &[f32] {
        for (z, v) in self.z.iter_mut().zip(&self.original) {
            let h = wave_height(f64::from(v[0]), f64::from(v[1]), clock, &self.params);
            #[allow(clippy::cast_possible_truncation, reason = "vertex buffers are f32")]
            {
                *z = h as f32;
            }
        }
        self.transform.rotation.z = clock * self.params.spin;
        &self.z
    }

    /// Current heights, one per vertex.
    pub fn heights(&self) -> &[f32] {
        &self.z
    }

    /// Original positions, one per vertex.
    pub fn original_positions(&self) -> &[[f32; 3]] {
        &self.original
    }

    /// Current positions: original x/y with the latest heights.
    pub fn positions(&self) -> Vec<[f32; 3]> {
        self.original
            .iter()
            .zip(&self.z)
            .map(|(v, z)| [v[0], v[1], *z])
            .collect()
    }

    /// Triangle list indices, two triangles per grid cell.
    pub fn triangle_indices(&self) -> Vec<u32> {
        let cols = self.segments_x + 1;
        let mut out = Vec::with_capacity(self.segments_x as usize * self.segments_y as usize * 6);
        for iy in 0..self.segments_y {
            for ix in 0..self.segments_x {
                let a = ix + cols * iy;
                let b = ix + cols * (iy + 1);
                let c = ix + 1 + cols * (iy + 1);
                let d = ix + 1 + cols * iy;
                out.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
        out
    }

    /// Grid segments along x and y.
    pub fn segments(&self) -> (u32, u32) {
        (self.segments_x, self.segments_y)
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.original.len()
    }

    /// Scene placement as of the last [`advance`](Self::advance).
    pub fn transform(&self) -> WaveTransform {
        self.transform
    }

    /// Height-function parameters.
    pub fn params(&self) -> &WaveParams {
        &self.params
    }

    /// Surface material.
    pub fn material(&self) -> WaveMaterial {
        self.material
    }
}
