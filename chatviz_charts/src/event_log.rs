// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The bounded sliding window of chat events.

extern crate alloc;

use alloc::collections::VecDeque;

/// Default number of events retained by an [`EventLog`].
pub const DEFAULT_LOG_CAPACITY: usize = 20;

/// A single chat event.
///
/// Timestamps are seconds since the Unix epoch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChatEvent {
    /// When the message was added.
    pub timestamp: f64,
    /// Whether the user (rather than the assistant) sent the message.
    pub is_user_originated: bool,
    /// Whether answering the message used document retrieval.
    pub used_retrieval: bool,
}

impl ChatEvent {
    /// Creates an event at `timestamp` (seconds).
    pub fn new(timestamp: f64, is_user_originated: bool, used_retrieval: bool) -> Self {
        Self {
            timestamp,
            is_user_originated,
            used_retrieval,
        }
    }

    /// Creates an event from a wall-clock sample in milliseconds.
    pub fn at_millis(wall_ms: f64, is_user_originated: bool, used_retrieval: bool) -> Self {
        Self::new(wall_ms / 1000.0, is_user_originated, used_retrieval)
    }
}

/// A FIFO of the most recent chat events.
///
/// Appending past capacity evicts from the front, so the log always holds the newest
/// `capacity` events in arrival order.
#[derive(Clone, Debug)]
pub struct EventLog {
    events: VecDeque<ChatEvent>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}

impl EventLog {
    /// Creates an empty log.
    ///
    /// A capacity of zero is bumped to one; configuration layers reject it earlier.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Appends `event`, evicting the oldest entries while over capacity.
    pub fn append(&mut self, event: ChatEvent) {
        self.events.push_back(event);
        while self.events.len() > self.capacity {
            if let Some(evicted) = self.events.pop_front() {
                log::trace!("evicted chat event at {}", evicted.timestamp);
            }
        }
    }

    /// Returns the number of retained events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if no events have been appended.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns the maximum number of retained events.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates events oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &ChatEvent> + '_ {
        self.events.iter()
    }

    /// Returns the newest event, if any.
    pub fn latest(&self) -> Option<&ChatEvent> {
        self.events.back()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec::Vec;

    use super::*;

    fn ev(ts: f64) -> ChatEvent {
        ChatEvent::new(ts, true, false)
    }

    #[test]
    fn length_tracks_appends_until_capacity() {
        for n in 0..45 {
            let mut log = EventLog::default();
            for i in 0..n {
                log.append(ev(i as f64));
            }
            assert_eq!(log.len(), n.min(DEFAULT_LOG_CAPACITY));
        }
    }

    #[test]
    fn overflow_keeps_most_recent_in_arrival_order() {
        let mut log = EventLog::default();
        for i in 0..27 {
            log.append(ev(i as f64));
        }
        let got: Vec<f64> = log.iter().map(|e| e.timestamp).collect();
        let want: Vec<f64> = (7..27).map(|i| i as f64).collect();
        assert_eq!(got, want);
        assert_eq!(log.latest().map(|e| e.timestamp), Some(26.0));
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut log = EventLog::new(0);
        log.append(ev(1.0));
        log.append(ev(2.0));
        assert_eq!(log.capacity(), 1);
        assert_eq!(log.len(), 1);
        assert_eq!(log.latest().map(|e| e.timestamp), Some(2.0));
    }

    #[test]
    fn millis_constructor_converts_to_seconds() {
        let e = ChatEvent::at_millis(1_500.0, false, true);
        assert_eq!(e.timestamp, 1.5);
        assert!(e.used_retrieval);
        assert!(!e.is_user_originated);
    }
}
