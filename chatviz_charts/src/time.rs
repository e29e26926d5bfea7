// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time tick generation and formatting helpers.
//!
//! Time is a numeric value in **seconds since the Unix epoch**. This module provides:
//! - "nice" tick steps for seconds/minutes/hours, restricted to the domain
//! - wall-clock `HH:MM` labels with a fixed UTC offset

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::scale::ticks_at_step;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Returns "nice-ish" tick values inside `[min, max]` for a time domain in seconds.
///
/// Ticks are multiples of a step picked from a seconds/minutes/hours ladder so that roughly
/// `count` of them fit the span. Values outside the domain are dropped.
pub fn nice_time_ticks_seconds(min: f64, max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    ticks_at_step(min, max, time_tick_step(min, max, count))
}

/// Returns the tick step (seconds) used by [`nice_time_ticks_seconds`] for this domain.
pub fn time_tick_step(min: f64, max: f64, count: usize) -> f64 {
    let span = (max - min).abs();
    nice_time_step_seconds(span / count.max(1) as f64)
}

fn nice_time_step_seconds(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }

    // Candidate steps in seconds, spanning seconds/minutes/hours.
    const STEPS: &[f64] = &[
        1.0,
        5.0,
        15.0,
        30.0,
        60.0,
        5.0 * 60.0,
        15.0 * 60.0,
        30.0 * 60.0,
        60.0 * 60.0,
        3.0 * 60.0 * 60.0,
        6.0 * 60.0 * 60.0,
        12.0 * 60.0 * 60.0,
    ];

    for &s in STEPS {
        if s >= step {
            return s;
        }
    }
    let hours = (step / 3600.0).ceil();
    (hours.max(1.0)) * 3600.0
}

/// Formats an epoch timestamp (seconds) as a 24h `HH:MM` wall-clock label.
///
/// `utc_offset_seconds` shifts the label into a local time zone.
pub fn format_clock_time(v: f64, utc_offset_seconds: i32) -> String {
    if !v.is_finite() {
        return alloc::format!("{v}");
    }

    let secs = {
        let secs_f = v.floor().clamp(i64::MIN as f64 / 2.0, i64::MAX as f64 / 2.0);
        #[allow(clippy::cast_possible_truncation, reason = "clamped to half the i64 range")]
        {
            secs_f as i64
        }
    };
    let of_day = (secs + i64::from(utc_offset_seconds)).rem_euclid(SECONDS_PER_DAY);
    let h = of_day / 3600;
    let m = (of_day / 60) % 60;
    alloc::format!("{h:02}:{m:02}")
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    const TEN_AM: f64 = 1_704_103_200.0;

    #[test]
    fn time_ticks_choose_minute_steps_for_minute_spans() {
        let ticks = nice_time_ticks_seconds(TEN_AM, TEN_AM + 300.0, 5);
        assert!(ticks.len() >= 2);
        let step = (ticks[1] - ticks[0]).abs();
        assert_eq!(step, 60.0);
    }

    #[test]
    fn time_ticks_stay_inside_the_domain() {
        let (lo, hi) = (TEN_AM + 7.0, TEN_AM + 1_013.0);
        let ticks = nice_time_ticks_seconds(lo, hi, 5);
        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|&t| t >= lo && t <= hi), "{ticks:?}");
    }

    #[test]
    fn clock_labels_are_hour_minute() {
        assert_eq!(format_clock_time(TEN_AM, 0), "10:00");
        assert_eq!(format_clock_time(TEN_AM + 65.0, 0), "10:01");
        assert_eq!(format_clock_time(TEN_AM, -11 * 3600), "23:00");
        assert_eq!(format_clock_time(TEN_AM, 2 * 3600 + 1800), "12:30");
    }
}
