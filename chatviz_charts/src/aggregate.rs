// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-width time bucketing of the event log.
//!
//! The series is recomputed in full from the log on every chat event; nothing here is
//! incremental. Grouping is keyed by the integer bucket index so two timestamps in the same
//! bucket always collapse to bit-identical `bucket_start` values.

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashMap;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::event_log::ChatEvent;

/// Default bucket width in seconds.
pub const DEFAULT_BUCKET_WIDTH: f64 = 60.0;

/// Errors returned when configuring an [`Aggregator`].
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum AggregateError {
    /// The bucket width was zero, negative, or not finite.
    #[error("bucket width must be positive and finite, got {0}")]
    InvalidBucketWidth(f64),
}

/// One time bucket of the aggregated series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bucket {
    /// Bucket start in seconds, a multiple of the bucket width.
    pub bucket_start: f64,
    /// Number of events in the bucket (always at least one).
    pub count: u32,
}

/// Buckets sorted by strictly increasing `bucket_start`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AggregatedSeries {
    buckets: Vec<Bucket>,
}

impl AggregatedSeries {
    /// Returns the buckets in ascending order.
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Returns the number of buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `true` if there are no buckets.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Returns `(min, max)` bucket start, or `None` for an empty series.
    pub fn time_extent(&self) -> Option<(f64, f64)> {
        let first = self.buckets.first()?;
        let last = self.buckets.last()?;
        Some((first.bucket_start, last.bucket_start))
    }

    /// Returns the largest bucket count, or `None` for an empty series.
    pub fn max_count(&self) -> Option<u32> {
        self.buckets.iter().map(|b| b.count).max()
    }
}

/// Groups chat events into fixed-width buckets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aggregator {
    bucket_width: f64,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self {
            bucket_width: DEFAULT_BUCKET_WIDTH,
        }
    }
}

impl Aggregator {
    /// Creates an aggregator with the given bucket width in seconds.
    pub fn new(bucket_width: f64) -> Result<Self, AggregateError> {
        if !bucket_width.is_finite() || bucket_width <= 0.0 {
            return Err(AggregateError::InvalidBucketWidth(bucket_width));
        }
        Ok(Self { bucket_width })
    }

    /// Returns the bucket width in seconds.
    pub fn bucket_width(&self) -> f64 {
        self.bucket_width
    }

    /// Returns the start of the bucket containing `timestamp`.
    pub fn bucket_start(&self, timestamp: f64) -> f64 {
        bucket_index(timestamp, self.bucket_width) as f64 * self.bucket_width
    }

    /// Aggregates `events` into an ascending series of bucket counts.
    ///
    /// Events with non-finite timestamps are skipped.
    pub fn aggregate<'a>(
        &self,
        events: impl IntoIterator<Item = &'a ChatEvent>,
    ) -> AggregatedSeries {
        let mut counts: HashMap<i64, u32> = HashMap::new();
        for event in events {
            if !event.timestamp.is_finite() {
                log::debug!("skipping chat event with non-finite timestamp");
                continue;
            }
            *counts
                .entry(bucket_index(event.timestamp, self.bucket_width))
                .or_insert(0) += 1;
        }

        let mut keyed: Vec<(i64, u32)> = counts.into_iter().collect();
        keyed.sort_unstable_by_key(|&(index, _)| index);

        let buckets = keyed
            .into_iter()
            .map(|(index, count)| Bucket {
                bucket_start: index as f64 * self.bucket_width,
                count,
            })
            .collect();
        AggregatedSeries { buckets }
    }
}

fn bucket_index(timestamp: f64, width: f64) -> i64 {
    let index = (timestamp / width)
        .floor()
        .clamp(i64::MIN as f64, i64::MAX as f64);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to the i64 range")]
    {
        index as i64
    }
}
