// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Latest pointer position, normalized to `[-1, 1]²`.

use crate::viewport::Viewport;

/// A normalized pointer position; `+y` is up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
    /// Horizontal position, `-1` at the left edge.
    pub x: f64,
    /// Vertical position, `-1` at the bottom edge.
    pub y: f64,
}

impl Pointer {
    /// Creates a pointer position, clamping both components into `[-1, 1]`.
    pub fn new(x: f64, y: f64) -> Self {
        let clamp = |v: f64| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
        Self {
            x: clamp(x),
            y: clamp(y),
        }
    }

    /// Normalizes client (pixel) coordinates against `viewport`.
    ///
    /// Client coordinates grow downwards; the result has `+y` up.
    pub fn from_client(client_x: f64, client_y: f64, viewport: Viewport) -> Self {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return Self::default();
        }
        Self::new(
            client_x / viewport.width * 2.0 - 1.0,
            -(client_y / viewport.height) * 2.0 + 1.0,
        )
    }
}

/// Single-writer store for the latest pointer position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    latest: Pointer,
}

impl PointerState {
    /// Overwrites the stored position.
    pub fn set(&mut self, x: f64, y: f64) {
        self.latest = Pointer::new(x, y);
    }

    /// Returns the latest position, `(0, 0)` before any pointer signal.
    pub fn get(&self) -> Pointer {
        self.latest
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn defaults_to_origin() {
        assert_eq!(PointerState::default().get(), Pointer { x: 0.0, y: 0.0 });
    }

    #[test]
    fn set_overwrites_and_clamps() {
        let mut state = PointerState::default();
        state.set(0.25, -0.5);
        assert_eq!(state.get(), Pointer { x: 0.25, y: -0.5 });
        state.set(3.0, f64::NAN);
        assert_eq!(state.get(), Pointer { x: 1.0, y: 0.0 });
    }

    #[test]
    fn client_coordinates_flip_y() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(Pointer::from_client(0.0, 0.0, vp), Pointer { x: -1.0, y: 1.0 });
        assert_eq!(Pointer::from_client(400.0, 300.0, vp), Pointer { x: 0.0, y: 0.0 });
        assert_eq!(Pointer::from_client(800.0, 600.0, vp), Pointer { x: 1.0, y: -1.0 });
    }
}
