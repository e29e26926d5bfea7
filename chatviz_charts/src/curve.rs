// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotone cubic curve fitting ("monotone in x").
//!
//! Tangents follow Steffen's method as popularized by D3's `curveMonotoneX`: each interior
//! tangent is limited by the neighbouring secant slopes, and is zero at local extrema. The
//! resulting Hermite segments are emitted as cubic Béziers and never leave the vertical band
//! spanned by their two end samples.
//!
//! Samples must be ordered by non-decreasing x. Repeated x values are tolerated (the segment
//! degenerates to a straight line) so interpolated transition frames can reuse this code.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{BezPath, Point};

fn sign(x: f64) -> f64 {
    if x < 0.0 { -1.0 } else { 1.0 }
}

fn secant(p0: Point, p1: Point) -> f64 {
    let h = p1.x - p0.x;
    if h == 0.0 { 0.0 } else { (p1.y - p0.y) / h }
}

/// Tangent at `p1` given its neighbours.
fn interior_tangent(p0: Point, p1: Point, p2: Point) -> f64 {
    let h0 = p1.x - p0.x;
    let h1 = p2.x - p1.x;
    let s0 = secant(p0, p1);
    let s1 = secant(p1, p2);
    let h = h0 + h1;
    let p = if h == 0.0 { 0.0 } else { (s0 * h1 + s1 * h0) / h };
    let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if t.is_finite() { t } else { 0.0 }
}

/// One-sided tangent at an end point, given the tangent `t` at its neighbour.
fn end_tangent(p0: Point, p1: Point, t: f64) -> f64 {
    let h = p1.x - p0.x;
    if h == 0.0 {
        t
    } else {
        (3.0 * (p1.y - p0.y) / h - t) / 2.0
    }
}

/// Returns the tangent (dy/dx) at every sample.
pub fn monotone_tangents(points: &[Point]) -> Vec<f64> {
    let n = points.len();
    match n {
        0 => return Vec::new(),
        1 => return alloc::vec![0.0],
        2 => {
            let s = secant(points[0], points[1]);
            return alloc::vec![s, s];
        }
        _ => {}
    }

    let mut tangents = alloc::vec![0.0; n];
    for i in 1..n - 1 {
        tangents[i] = interior_tangent(points[i - 1], points[i], points[i + 1]);
    }
    tangents[0] = end_tangent(points[0], points[1], tangents[1]);
    tangents[n - 1] = end_tangent(points[n - 2], points[n - 1], tangents[n - 2]);
    tangents
}

/// Appends the fitted curve through `points` to `path`.
///
/// The path must already be positioned at `points[0]` (or the caller must accept a
/// straight connector to it).
pub fn extend_monotone(path: &mut BezPath, points: &[Point]) {
    match points.len() {
        0 | 1 => {}
        2 => path.line_to(points[1]),
        _ => {
            let tangents = monotone_tangents(points);
            for i in 0..points.len() - 1 {
                let (p0, p1) = (points[i], points[i + 1]);
                let dx = (p1.x - p0.x) / 3.0;
                path.curve_to(
                    Point::new(p0.x + dx, p0.y + dx * tangents[i]),
                    Point::new(p1.x - dx, p1.y - dx * tangents[i + 1]),
                    p1,
                );
            }
        }
    }
}

/// Builds an open path along the fitted curve.
///
/// A single sample yields a lone `move_to`.
pub fn monotone_line(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some(&first) = points.first() else {
        return path;
    };
    path.move_to(first);
    extend_monotone(&mut path, points);
    path
}

/// Builds a closed area between the fitted curve and the horizontal line `y = baseline`.
pub fn monotone_area(points: &[Point], baseline: f64) -> BezPath {
    let mut path = BezPath::new();
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return path;
    };
    path.move_to((first.x, baseline));
    path.line_to(first);
    extend_monotone(&mut path, points);
    path.line_to((last.x, baseline));
    path.close_path();
    path
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::{ParamCurve, PathSeg};

    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    /// Samples every cubic segment and checks it stays within its end samples' y band.
    fn assert_no_overshoot(points: &[Point]) {
        let path = monotone_line(points);
        let mut seg_index = 0;
        for seg in path.segments() {
            let (p0, p1) = (points[seg_index], points[seg_index + 1]);
            let lo = p0.y.min(p1.y) - 1e-9;
            let hi = p0.y.max(p1.y) + 1e-9;
            for k in 0..=64 {
                let t = k as f64 / 64.0;
                let y = match seg {
                    PathSeg::Cubic(c) => c.eval(t).y,
                    PathSeg::Line(l) => l.eval(t).y,
                    PathSeg::Quad(q) => q.eval(t).y,
                };
                assert!(
                    y >= lo && y <= hi,
                    "segment {seg_index} overshoots: {y} not in [{lo}, {hi}]"
                );
            }
            seg_index += 1;
        }
        assert_eq!(seg_index, points.len() - 1);
    }

    #[test]
    fn sparse_spiky_data_does_not_overshoot() {
        assert_no_overshoot(&pts(&[
            (0.0, 200.0),
            (10.0, 20.0),
            (20.0, 200.0),
            (100.0, 190.0),
            (105.0, 20.0),
            (300.0, 20.0),
            (310.0, 199.0),
        ]));
    }

    #[test]
    fn repeated_x_is_tolerated() {
        let points = pts(&[(0.0, 10.0), (0.0, 10.0), (5.0, 3.0), (5.0, 3.0), (9.0, 7.0)]);
        let tangents = monotone_tangents(&points);
        assert!(tangents.iter().all(|t| t.is_finite()));
        assert_no_overshoot(&points);
    }

    #[test]
    fn flat_neighbourhood_has_zero_tangent() {
        let tangents = monotone_tangents(&pts(&[(0.0, 5.0), (1.0, 5.0), (2.0, 9.0)]));
        assert_eq!(tangents[1], 0.0);
    }

    #[test]
    fn extremum_has_zero_tangent() {
        let tangents = monotone_tangents(&pts(&[(0.0, 0.0), (1.0, 4.0), (2.0, 1.0)]));
        assert_eq!(tangents[1], 0.0);
    }

    #[test]
    fn two_points_make_a_straight_line() {
        let path = monotone_line(&pts(&[(0.0, 0.0), (10.0, 5.0)]));
        let segs: Vec<PathSeg> = path.segments().collect();
        assert_eq!(segs.len(), 1);
        assert!(matches!(segs[0], PathSeg::Line(_)));
    }

    #[test]
    fn area_closes_on_the_baseline() {
        let area = monotone_area(&pts(&[(10.0, 50.0), (20.0, 30.0), (30.0, 40.0)]), 100.0);
        let bbox = kurbo::Shape::bounding_box(&area);
        assert_eq!(bbox.y1, 100.0);
        assert_eq!(bbox.x0, 10.0);
        assert_eq!(bbox.x1, 30.0);
    }

    #[test]
    fn empty_input_gives_empty_paths() {
        assert!(monotone_line(&[]).elements().is_empty());
        assert!(monotone_area(&[], 0.0).elements().is_empty());
    }
}
