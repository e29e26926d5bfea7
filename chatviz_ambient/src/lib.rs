// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Procedural ambient background for chat overlays.
//!
//! Two animated objects share one [`AnimationClock`] and one [`PointerState`]:
//!
//! - [`ParticleField`]: a fixed, seeded point cloud whose rotation follows the clock and pointer.
//! - [`WaveMesh`]: a flat grid whose heights are recomputed every frame from the clock.
//!
//! [`AmbientScene`] bundles both with camera and lighting descriptions and exposes a single
//! [`AmbientScene::advance`] entry point for the host's frame loop. [`SpiralGalaxy`] is an
//! alternative 2D backdrop.
//!
//! The crate only produces data. Uploading buffers and drawing is left to the host renderer.

#![no_std]

extern crate alloc;

mod clock;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod palette;
mod particles;
mod pointer;
mod rotation;
mod scene;
mod spiral;
mod viewport;
mod wave;

pub use clock::{AnimationClock, DEFAULT_CLOCK_RATE};
pub use error::MeshError;
pub use palette::{Palette, mix_rgb, sample_stops};
pub use particles::{
    DEFAULT_PARTICLE_COUNT, FIELD_HALF_EXTENT, MAX_POINT_SIZE, ParticleField, ParticleMaterial,
    ParticlePoint, PointerResponse,
};
pub use pointer::{Pointer, PointerState};
pub use rotation::Euler;
pub use scene::{AmbientFrame, AmbientScene, AmbientSpec};
pub use spiral::{SpiralGalaxy, SpiralGalaxySpec};
pub use viewport::{CameraSpec, LightingSpec, PointLight, Viewport};
pub use wave::{WaveMaterial, WaveMesh, WaveParams, WaveTransform, wave_height};
