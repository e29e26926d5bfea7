// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ambient scene: particle field, wave surface, camera and lights driven by one clock.

use crate::clock::AnimationClock;
use crate::error::MeshError;
use crate::palette::Palette;
use crate::particles::{
    DEFAULT_PARTICLE_COUNT, ParticleField, ParticleMaterial, PointerResponse,
};
use crate::pointer::{Pointer, PointerState};
use crate::rotation::Euler;
use crate::viewport::{CameraSpec, LightingSpec, Viewport};
use crate::wave::{WaveMaterial, WaveMesh, WaveParams, WaveTransform};

/// Configuration for [`AmbientScene`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientSpec {
    /// Colours used for particle mixing and lights.
    pub palette: Palette,
    /// Initial output size.
    pub viewport: Viewport,
    /// Number of particles.
    pub particle_count: usize,
    /// Particle RNG seed.
    pub seed: u64,
    /// How the pointer drives the particle rotation.
    pub pointer_response: PointerResponse,
    /// Point material.
    pub material: ParticleMaterial,
    /// Wave plane size.
    pub wave_size: (f64, f64),
    /// Wave grid segments.
    pub wave_segments: (u32, u32),
    /// Wave height function.
    pub wave: WaveParams,
    /// Wall-clock to animation-time conversion.
    pub clock: AnimationClock,
}

impl Default for AmbientSpec {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            viewport: Viewport::new(1280.0, 720.0),
            particle_count: DEFAULT_PARTICLE_COUNT,
            seed: 0,
            pointer_response: PointerResponse::default(),
            material: ParticleMaterial::default(),
            wave_size: (100.0, 100.0),
            wave_segments: (50, 50),
            wave: WaveParams::default(),
            clock: AnimationClock::default(),
        }
    }
}

impl AmbientSpec {
    /// Sets the palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Sets the initial viewport.
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Sets the particle count and seed.
    pub fn with_particles(mut self, count: usize, seed: u64) -> Self {
        self.particle_count = count;
        self.seed = seed;
        self
    }

    /// Sets the pointer response.
    pub fn with_pointer_response(mut self, response: PointerResponse) -> Self {
        self.pointer_response = response;
        self
    }

    /// Sets the wave grid resolution.
    pub fn with_wave_segments(mut self, x: u32, y: u32) -> Self {
        self.wave_segments = (x, y);
        self
    }
}

/// Everything that changed in one [`AmbientScene::advance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientFrame {
    /// Animation clock value for this frame.
    pub clock: f64,
    /// Pointer position used for this frame.
    pub pointer: Pointer,
    /// Rotation of the particle field.
    pub particle_rotation: Euler,
    /// Placement of the wave surface. Heights are read from [`AmbientScene::wave`].
    pub wave: WaveTransform,
}

/// The animated background.
#[derive(Clone, Debug)]
pub struct AmbientScene {
    clock: AnimationClock,
    pointer: PointerState,
    viewport: Viewport,
    camera: CameraSpec,
    lighting: LightingSpec,
    particles: ParticleField,
    wave: WaveMesh,
}

impl AmbientScene {
    /// Generates particles and builds the wave mesh.
    pub fn new(spec: &AmbientSpec) -> Result<Self, MeshError> {
        let (w, h) = spec.wave_size;
        let (sx, sy) = spec.wave_segments;
        let wave = WaveMesh::build(w, h, sx, sy)?
            .with_params(spec.wave)
            .with_material(WaveMaterial::from_palette(&spec.palette));
        let particles = ParticleField::generate(
            spec.particle_count,
            spec.palette.primary,
            spec.palette.accent,
            spec.seed,
        )
        .with_pointer_response(spec.pointer_response)
        .with_material(spec.material);
        Ok(Self {
            clock: spec.clock,
            pointer: PointerState::default(),
            viewport: spec.viewport,
            camera: CameraSpec::for_viewport(spec.viewport),
            lighting: LightingSpec::from_palette(&spec.palette),
            particles,
            wave,
        })
    }

    /// Advances both animated objects to `wall_ms`.
    pub fn advance(&mut self, wall_ms: f64) -> AmbientFrame {
        let clock = self.clock.sample(wall_ms);
        let pointer = self.pointer.get();
        let particle_rotation = self.particles.advance(clock, pointer);
        self.wave.advance(clock);
        AmbientFrame {
            clock,
            pointer,
            particle_rotation,
            wave: self.wave.transform(),
        }
    }

    /// Stores a normalized pointer position.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer.set(x, y);
    }

    /// Updates output size and camera aspect.
    pub fn resize(&mut self, viewport: Viewport) {
        log::debug!("ambient viewport resized to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
        self.camera.resize(viewport);
    }

    /// The current pointer.
    pub fn pointer(&self) -> Pointer {
        self.pointer.get()
    }

    /// Output size.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Camera parameters.
    pub fn camera(&self) -> &CameraSpec {
        &self.camera
    }

    /// Fog and lights.
    pub fn lighting(&self) -> &LightingSpec {
        &self.lighting
    }

    /// The particle field.
    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    /// The wave surface.
    pub fn wave(&self) -> &WaveMesh {
        &self.wave
    }

    /// Material of the wave surface, derived from the palette.
    pub fn wave_material(&self) -> WaveMaterial {
        self.wave.material()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use peniko::Color;

    use super::*;

    fn small() -> AmbientSpec {
        AmbientSpec::default()
            .with_particles(64, 11)
            .with_wave_segments(8, 8)
    }

    #[test]
    fn advance_uses_the_scaled_clock() {
        let mut scene = AmbientScene::new(&small()).unwrap();
        let frame = scene.advance(4_000.0);
        assert_eq!(frame.clock, 2.0);
        assert!((frame.particle_rotation.y - 0.6).abs() < 1e-12);
        assert!((frame.wave.rotation.z - 0.2).abs() < 1e-12);
        assert_eq!(scene.wave().heights().len(), 81);
    }

    #[test]
    fn pointer_feeds_the_next_frame() {
        let mut scene = AmbientScene::new(&small().with_pointer_response(PointerResponse::Tilt))
            .unwrap();
        scene.pointer_moved(1.0, 0.0);
        let frame = scene.advance(0.0);
        assert_eq!(frame.pointer, Pointer::new(1.0, 0.0));
        assert!((frame.particle_rotation.y - 0.05).abs() < 1e-12);
    }

    #[test]
    fn resize_updates_camera_aspect() {
        let mut scene = AmbientScene::new(&small()).unwrap();
        scene.resize(Viewport::new(1000.0, 500.0));
        assert_eq!(scene.camera().aspect, 2.0);
        assert_eq!(scene.viewport(), Viewport::new(1000.0, 500.0));
    }

    #[test]
    fn wave_material_follows_the_palette() {
        let palette = Palette::new(
            Color::from_rgb8(0x22, 0xc5, 0x5e),
            Color::from_rgb8(0xf9, 0x73, 0x16),
        );
        let scene = AmbientScene::new(&small().with_palette(palette)).unwrap();
        assert_eq!(scene.wave_material().color, palette.primary);
        assert_eq!(scene.wave().material(), scene.wave_material());
        assert_eq!(scene.wave_material().opacity, 0.15);
    }

    #[test]
    fn bad_grid_is_reported() {
        assert!(AmbientScene::new(&small().with_wave_segments(0, 3)).is_err());
    }
}
