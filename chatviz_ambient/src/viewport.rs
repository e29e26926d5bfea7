// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Output size, camera and lighting descriptions.
//!
//! The host owns the actual renderer; these types only describe what it should set up.

use peniko::Color;

use crate::palette::Palette;

/// Output surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width over height; `1.0` for a degenerate viewport.
    pub fn aspect(&self) -> f64 {
        if self.height > 0.0 && self.width > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Perspective camera parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSpec {
    /// Vertical field of view in degrees.
    pub fov_degrees: f64,
    /// Width over height, kept in sync with the viewport.
    pub aspect: f64,
    /// Near clip distance.
    pub near: f64,
    /// Far clip distance.
    pub far: f64,
    /// Distance of the camera from the origin along +z.
    pub position_z: f64,
}

impl CameraSpec {
    /// The default camera for `viewport`.
    pub fn for_viewport(viewport: Viewport) -> Self {
        Self {
            fov_degrees: 75.0,
            aspect: viewport.aspect(),
            near: 0.1,
            far: 1000.0,
            position_z: 50.0,
        }
    }

    /// Recomputes the aspect ratio after a resize.
    pub fn resize(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }
}

/// A coloured light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    /// Light colour.
    pub color: Color,
    /// Intensity multiplier.
    pub intensity: f32,
    /// Falloff distance.
    pub distance: f32,
    /// World position.
    pub position: [f32; 3],
}

/// Exponential fog plus the lights of the background scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightingSpec {
    /// Fog colour.
    pub fog_color: Color,
    /// Exponential fog density.
    pub fog_density: f32,
    /// Ambient light colour.
    pub ambient: Color,
    /// Ambient light intensity.
    pub ambient_intensity: f32,
    /// Primary-coloured key light and accent-coloured fill light.
    pub points: [PointLight; 2],
}

impl LightingSpec {
    /// Derives lighting from the palette.
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            fog_color: Color::from_rgb8(0x0f, 0x17, 0x2a),
            fog_density: 0.001,
            ambient: palette.primary,
            ambient_intensity: 0.5,
            points: [
                PointLight {
                    color: palette.primary,
                    intensity: 1.0,
                    distance: 100.0,
                    position: [20.0, 20.0, 20.0],
                },
                PointLight {
                    color: palette.accent,
                    intensity: 1.0,
                    distance: 100.0,
                    position: [-20.0, -20.0, -20.0],
                },
            ],
        }
    }
}
