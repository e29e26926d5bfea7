// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The two-colour palette shared by the chart and the background.

use peniko::Color;

/// Primary and accent colours.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Main brand colour (indigo by default).
    pub primary: Color,
    /// Secondary colour (pink by default).
    pub accent: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Color::from_rgb8(0x63, 0x66, 0xf1),
            accent: Color::from_rgb8(0xec, 0x48, 0x99),
        }
    }
}

impl Palette {
    /// Creates a palette.
    pub fn new(primary: Color, accent: Color) -> Self {
        Self { primary, accent }
    }
}

/// Linearly interpolates the RGB channels of two colours, returning `[r, g, b]` in `[0, 1]`.
pub fn mix_rgb(a: Color, b: Color, t: f32) -> [f32; 3] {
    let t = t.clamp(0.0, 1.0);
    let [ar, ag, ab, _] = a.components;
    let [br, bg, bb, _] = b.components;
    [
        (ar + (br - ar) * t).clamp(0.0, 1.0),
        (ag + (bg - ag) * t).clamp(0.0, 1.0),
        (ab + (bb - ab) * t).clamp(0.0, 1.0),
    ]
}

/// Samples a multi-stop gradient at `t ∈ [0, 1]` with evenly spaced stops.
///
/// Returns black for an empty stop list.
pub fn sample_stops(stops: &[Color], t: f32) -> [f32; 3] {
    match stops {
        [] => [0.0; 3],
        [only] => mix_rgb(*only, *only, 0.0),
        _ => {
            let segments = (stops.len() - 1) as f32;
            let pos = t.clamp(0.0, 1.0) * segments;
            #[allow(clippy::cast_possible_truncation, reason = "pos is within [0, len - 1]")]
            let i = (pos as usize).min(stops.len() - 2);
            mix_rgb(stops[i], stops[i + 1], pos - i as f32)
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn mix_endpoints_are_the_inputs() {
        let p = Palette::default();
        let a = mix_rgb(p.primary, p.accent, 0.0);
        let b = mix_rgb(p.primary, p.accent, 1.0);
        assert!((a[0] - 0x63 as f32 / 255.0).abs() < 1e-6);
        assert!((b[2] - 0x99 as f32 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn stop_sampling_hits_each_stop() {
        let stops = [
            Color::from_rgb8(0, 0, 0),
            Color::from_rgb8(255, 0, 0),
            Color::from_rgb8(255, 255, 255),
        ];
        assert_eq!(sample_stops(&stops, 0.0), [0.0, 0.0, 0.0]);
        assert_eq!(sample_stops(&stops, 0.5), [1.0, 0.0, 0.0]);
        assert_eq!(sample_stops(&stops, 1.0), [1.0, 1.0, 1.0]);
        assert_eq!(sample_stops(&[], 0.3), [0.0; 3]);
    }
}
