// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A 2D spiral galaxy: particles on logarithmic-looking arms that wind and twinkle.

use alloc::vec::Vec;
use core::f64::consts::{PI, TAU};

use peniko::Color;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::error::MeshError;
use crate::palette::sample_stops;

/// Generator parameters for [`SpiralGalaxy`].
#[derive(Clone, Debug, PartialEq)]
pub struct SpiralGalaxySpec {
    /// Number of particles.
    pub count: usize,
    /// Number of arms.
    pub arms: u32,
    /// Extra winding per unit of radius.
    pub tightness: f64,
    /// Colour ramp sampled per particle.
    pub color_stops: Vec<Color>,
    /// RNG seed.
    pub seed: u64,
}

impl Default for SpiralGalaxySpec {
    fn default() -> Self {
        Self {
            count: 2000,
            arms: 5,
            tightness: 0.3,
            color_stops: alloc::vec![
                Color::from_rgb8(0x00, 0x77, 0xb6),
                Color::from_rgb8(0x72, 0x09, 0xb7),
                Color::from_rgb8(0xf7, 0x25, 0x85),
                Color::from_rgb8(0xff, 0xd6, 0x0a),
            ],
            seed: 0,
        }
    }
}

impl SpiralGalaxySpec {
    /// Sets the particle count.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Sets the number of arms.
    pub fn with_arms(mut self, arms: u32) -> Self {
        self.arms = arms;
        self
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Star {
    theta: f64,
    radius: f64,
    arm_offset: f64,
    size: f32,
    color: [f32; 3],
    alpha: f32,
}

/// Generated galaxy particles.
#[derive(Clone, Debug)]
pub struct SpiralGalaxy {
    stars: Vec<Star>,
    tightness: f64,
}

impl SpiralGalaxy {
    /// Generates the galaxy.
    ///
    /// Radii follow a gamma(2, 2) distribution so most particles sit near the core.
    pub fn generate(spec: &SpiralGalaxySpec) -> Result<Self, MeshError> {
        if spec.arms == 0 {
            return Err(MeshError::ZeroArms);
        }
        if spec.color_stops.is_empty() {
            return Err(MeshError::EmptyColorStops);
        }
        let mut rng = StdRng::seed_from_u64(spec.seed);
        // `1 - u` keeps the logarithm argument in (0, 1].
        let open_unit = |rng: &mut StdRng| 1.0 - rng.r#gen::<f64>();
        let mut stars = Vec::with_capacity(spec.count);
        for _ in 0..spec.count {
            let theta = rng.r#gen::<f64>() * 2.0 * TAU;
            let arm = rng.gen_range(0..spec.arms);
            let radius = -2.0 * (open_unit(&mut rng) * open_unit(&mut rng)).ln();
            let scale = rng.gen_range(0.5..2.0);
            #[allow(clippy::cast_possible_truncation, reason = "sizes are f32 attributes")]
            let size = (50.0 / (radius + 1.0) * scale) as f32;
            let color = sample_stops(&spec.color_stops, rng.r#gen::<f32>());
            let alpha = rng.gen_range(0.3_f32..=1.0);
            stars.push(Star {
                theta,
                radius,
                arm_offset: f64::from(arm) * 2.0 * PI / f64::from(spec.arms),
                size,
                color,
                alpha,
            });
        }
        log::debug!(
            "generated spiral galaxy: {} particles on {} arms",
            spec.count,
            spec.arms
        );
        Ok(Self {
            stars,
            tightness: spec.tightness,
        })
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    /// Returns `true` if there are no particles.
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Positions at rotation `t`: angle `θ + arm offset + tightness·r + t` at radius `r`.
    pub fn positions(&self, t: f64) -> Vec<[f32; 2]> {
        self.stars
            .iter()
            .map(|s| {
                let angle = s.theta + s.arm_offset + self.tightness * s.radius + t;
                #[allow(clippy::cast_possible_truncation, reason = "vertex buffers are f32")]
                [(s.radius * angle.cos()) as f32, (s.radius * angle.sin()) as f32]
            })
            .collect()
    }

    /// Per-particle alpha at `frame`, pulsing between 70% and 100% of the base alpha.
    pub fn alphas(&self, frame: u32) -> Vec<f32> {
        let pulse = 0.5 + 0.5 * (f64::from(frame) * 0.1).sin();
        #[allow(clippy::cast_possible_truncation, reason = "alpha is an f32 attribute")]
        let factor = (0.7 + 0.3 * pulse) as f32;
        self.stars.iter().map(|s| s.alpha * factor).collect()
    }

    /// Per-particle sizes.
    pub fn sizes(&self) -> Vec<f32> {
        self.stars.iter().map(|s| s.size).collect()
    }

    /// Per-particle colours.
    pub fn colors(&self) -> Vec<[f32; 3]> {
        self.stars.iter().map(|s| s.color).collect()
    }
}
