// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rotating particle field.
//!
//! Points are generated once from a seed and never move individually; each frame only the
//! rotation of the whole cloud changes.

#![allow(
    unsafe_code,
    reason = "bytemuck derives emit unsafe impls for the vertex layout"
)]

use alloc::vec::Vec;

use bytemuck::{Pod, Zeroable};
use peniko::Color;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::palette::mix_rgb;
use crate::pointer::Pointer;
use crate::rotation::Euler;

/// Default number of points in the field.
pub const DEFAULT_PARTICLE_COUNT: usize = 1500;

/// Half the side of the cube points are scattered in.
pub const FIELD_HALF_EXTENT: f32 = 50.0;

/// Upper bound of the per-point size attribute.
pub const MAX_POINT_SIZE: f32 = 2.0;

const SPIN_Y: f64 = 0.3;
const SPIN_X: f64 = 0.2;
const POINTER_GAIN: f64 = 0.05;

/// One point of the field, laid out for direct upload as an interleaved vertex buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticlePoint {
    /// Position in `[-50, 50]³`.
    pub position: [f32; 3],
    /// Linear RGB in `[0, 1]³`.
    pub color: [f32; 3],
    /// Size attribute in `[0, 2]`.
    pub size: f32,
}

/// How the pointer feeds into the field rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerResponse {
    /// The pointer term accumulates every frame, so a held pointer keeps the field drifting.
    #[default]
    Drift,
    /// The pointer term is applied fresh every frame as a bounded tilt.
    Tilt,
}

/// Point material the host renderer should use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleMaterial {
    /// Base point size; multiplied by each point's size attribute.
    pub point_size: f32,
    /// Global opacity.
    pub opacity: f32,
    /// Whether points blend additively.
    pub additive: bool,
    /// Whether per-point colours are used.
    pub vertex_colors: bool,
}

impl Default for ParticleMaterial {
    fn default() -> Self {
        Self {
            point_size: 0.5,
            opacity: 0.8,
            additive: true,
            vertex_colors: true,
        }
    }
}

/// A fixed point cloud with a per-frame rotation.
#[derive(Clone, Debug)]
pub struct ParticleField {
    points: Vec<ParticlePoint>,
    response: PointerResponse,
    material: ParticleMaterial,
    // Accumulated pointer contribution, only used by `PointerResponse::Drift`.
    drift: Euler,
    rotation: Euler,
}

impl ParticleField {
    /// Scatters `count` points and mixes their colours between `color_a` and `color_b`.
    ///
    /// Each point draws its own mixing factor, so colour is not spatially correlated. The
    /// same `seed` always yields the same points.
    pub fn generate(count: usize, color_a: Color, color_b: Color, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let coord = |rng: &mut StdRng| (rng.r#gen::<f32>() - 0.5) * 2.0 * FIELD_HALF_EXTENT;
        let mut points = Vec::with_capacity(count);
        for _ in 0..count {
            let position = [coord(&mut rng), coord(&mut rng), coord(&mut rng)];
            let mix = rng.r#gen::<f32>();
            let size = rng.r#gen::<f32>() * MAX_POINT_SIZE;
            points.push(ParticlePoint {
                position,
                color: mix_rgb(color_a, color_b, mix),
                size,
            });
        }
        log::debug!("generated particle field: {count} points, seed {seed}");
        Self {
            points,
            response: PointerResponse::default(),
            material: ParticleMaterial::default(),
            drift: Euler::default(),
            rotation: Euler::default(),
        }
    }

    /// Sets how the pointer affects the rotation.
    pub fn with_pointer_response(mut self, response: PointerResponse) -> Self {
        self.response = response;
        self
    }

    /// Sets the point material.
    pub fn with_material(mut self, material: ParticleMaterial) -> Self {
        self.material = material;
        self
    }

    /// Computes this frame's rotation.
    ///
    /// The time-driven part is absolute: `y = clock * 0.3`, `x = clock * 0.2`. The pointer
    /// adds `pointer.y * 0.05` to `x` and `pointer.x * 0.05` to `y`, either on top of every
    /// earlier frame's contribution ([`PointerResponse::Drift`]) or alone
    /// ([`PointerResponse::Tilt`]).
    pub fn advance(&mut self, clock: f64, pointer: Pointer) -> Euler {
        let nudge_x = pointer.y * POINTER_GAIN;
        let nudge_y = pointer.x * POINTER_GAIN;
        let (offset_x, offset_y) = match self.response {
            PointerResponse::Drift => {
                self.drift.x += nudge_x;
                self.drift.y += nudge_y;
                (self.drift.x, self.drift.y)
            }
            PointerResponse::Tilt => (nudge_x, nudge_y),
        };
        self.rotation = Euler::new(clock * SPIN_X + offset_x, clock * SPIN_Y + offset_y, 0.0);
        self.rotation
    }

    /// The rotation computed by the last [`advance`](Self::advance).
    pub fn rotation(&self) -> Euler {
        self.rotation
    }

    /// The generated points.
    pub fn points(&self) -> &[ParticlePoint] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the field has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The point material.
    pub fn material(&self) -> &ParticleMaterial {
        &self.material
    }

    /// The pointer response mode.
    pub fn pointer_response(&self) -> PointerResponse {
        self.response
    }

    /// The points as raw interleaved vertex bytes (`position`, `color`, `size`).
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }
}
