// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seams between the overlay and the page hosting it.
//!
//! The overlay never reads global state. Time, stat cards, the chart container and event
//! subscriptions all come through the traits in this module.

use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

use chatviz_ambient::Viewport;

/// A wall-clock source in milliseconds since the Unix epoch.
pub trait WallClock {
    /// The current time.
    fn now_ms(&self) -> f64;
}

/// [`WallClock`] backed by [`SystemTime`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now_ms(&self) -> f64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_secs_f64() * 1000.0,
            Err(err) => {
                log::warn!("system clock is before the Unix epoch: {err}");
                0.0
            }
        }
    }
}

/// A [`WallClock`] that only moves when told to.
///
/// Useful for deterministic playback and tests.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now_ms: Cell<f64>,
}

impl ManualClock {
    /// Creates a clock reading `start_ms`.
    pub fn new(start_ms: f64) -> Self {
        Self {
            now_ms: Cell::new(start_ms),
        }
    }

    /// Sets the current reading.
    pub fn set(&self, now_ms: f64) {
        self.now_ms.set(now_ms);
    }

    /// Moves the reading forward by `delta_ms`.
    pub fn advance(&self, delta_ms: f64) {
        self.now_ms.set(self.now_ms.get() + delta_ms);
    }
}

impl WallClock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now_ms.get()
    }
}

impl<C: WallClock + ?Sized> WallClock for &C {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}

/// The stat cards the overlay keeps current.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatKey {
    /// All chat messages.
    TotalMessages,
    /// Uploaded documents.
    UploadedFiles,
    /// Replies that used retrieval.
    RagQueries,
}

impl StatKey {
    /// All keys, in display order.
    pub const ALL: [Self; 3] = [Self::TotalMessages, Self::UploadedFiles, Self::RagQueries];

    /// Element id of the card showing this stat.
    pub fn element_id(self) -> &'static str {
        match self {
            Self::TotalMessages => "total-messages",
            Self::UploadedFiles => "uploaded-files",
            Self::RagQueries => "rag-queries",
        }
    }
}

/// Where counter values are displayed.
pub trait StatsSink {
    /// Shows `value` for `key`.
    ///
    /// Returns `false` when the target does not exist; the overlay carries on regardless.
    fn set_stat(&mut self, key: StatKey, value: u64) -> bool;
}

/// A [`StatsSink`] with no targets.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoStats;

impl StatsSink for NoStats {
    fn set_stat(&mut self, _key: StatKey, _value: u64) -> bool {
        false
    }
}

impl<S: StatsSink + ?Sized> StatsSink for &mut S {
    fn set_stat(&mut self, key: StatKey, value: u64) -> bool {
        (**self).set_stat(key, value)
    }
}

/// Kinds of host event the overlay subscribes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// Display refresh.
    FrameTick,
    /// Pointer movement.
    PointerMoved,
    /// Output size change.
    ViewportResized,
    /// The page finished loading.
    Ready,
}

impl SignalKind {
    /// Every kind, in subscription order.
    pub const ALL: [Self; 4] = [
        Self::FrameTick,
        Self::PointerMoved,
        Self::ViewportResized,
        Self::Ready,
    ];
}

/// Handle for a registered subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// An event the host forwards to [`ChatOverlay::handle_signal`].
///
/// [`ChatOverlay::handle_signal`]: crate::ChatOverlay::handle_signal
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostSignal {
    /// Display refresh at `wall_ms`.
    FrameTick {
        /// Wall-clock time of the frame.
        wall_ms: f64,
    },
    /// Pointer position, already normalized to `[-1, 1]²` with `+y` up.
    PointerMoved {
        /// Normalized x.
        x: f64,
        /// Normalized y.
        y: f64,
    },
    /// Pointer position in client pixels; normalized against the current viewport.
    PointerClient {
        /// Client x in pixels.
        x: f64,
        /// Client y in pixels, growing downwards.
        y: f64,
    },
    /// The output was resized.
    ViewportResized(Viewport),
    /// The page is ready.
    Ready,
}

impl HostSignal {
    /// The subscription this signal is delivered through.
    pub fn kind(&self) -> SignalKind {
        match self {
            Self::FrameTick { .. } => SignalKind::FrameTick,
            Self::PointerMoved { .. } | Self::PointerClient { .. } => SignalKind::PointerMoved,
            Self::ViewportResized(_) => SignalKind::ViewportResized,
            Self::Ready => SignalKind::Ready,
        }
    }
}

/// The page hosting the overlay.
pub trait SignalHost {
    /// Makes sure an element with `id` exists.
    ///
    /// Returns `true` if it had to be created.
    fn ensure_container(&mut self, id: &str) -> bool;

    /// Starts delivering `kind` signals to the overlay.
    fn subscribe(&mut self, kind: SignalKind) -> SubscriptionId;

    /// Stops a subscription. Releasing an unknown id is a no-op.
    fn release(&mut self, id: SubscriptionId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_moves_on_request() {
        let clock = ManualClock::new(1_000.0);
        clock.advance(250.0);
        assert_eq!(clock.now_ms(), 1_250.0);
        clock.set(5.0);
        assert_eq!((&clock).now_ms(), 5.0);
    }

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now_ms() > 1_577_836_800_000.0);
    }

    #[test]
    fn signals_map_to_their_subscription() {
        assert_eq!(
            HostSignal::PointerClient { x: 1.0, y: 2.0 }.kind(),
            SignalKind::PointerMoved
        );
        assert_eq!(
            HostSignal::ViewportResized(Viewport::new(1.0, 1.0)).kind(),
            SignalKind::ViewportResized
        );
    }

    #[test]
    fn stat_ids_match_the_cards() {
        let ids: Vec<_> = StatKey::ALL.iter().map(|k| k.element_id()).collect();
        assert_eq!(ids, ["total-messages", "uploaded-files", "rag-queries"]);
    }
}
