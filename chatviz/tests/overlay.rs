// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behaviour of the overlay against a recording host.

use std::collections::BTreeSet;

use chatviz::{
    ChatOverlay, Counters, HostSignal, ManualClock, OverlayConfig, SignalHost, SignalKind,
    StatKey, StatsSink, SubscriptionId, Viewport,
};

// 2024-01-01 10:00:05 UTC.
const TEN_OH_FIVE_MS: f64 = 1_704_103_205_000.0;

#[derive(Debug, Default)]
struct RecordingHost {
    containers: Vec<String>,
    next_id: u64,
    active: BTreeSet<SubscriptionId>,
    kinds: Vec<SignalKind>,
    released: Vec<SubscriptionId>,
}

impl SignalHost for RecordingHost {
    fn ensure_container(&mut self, id: &str) -> bool {
        if self.containers.iter().any(|c| c == id) {
            false
        } else {
            self.containers.push(id.to_owned());
            true
        }
    }

    fn subscribe(&mut self, kind: SignalKind) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.active.insert(id);
        self.kinds.push(kind);
        id
    }

    fn release(&mut self, id: SubscriptionId) {
        self.active.remove(&id);
        self.released.push(id);
    }
}

#[derive(Debug, Default)]
struct Cards {
    shown: Vec<(StatKey, u64)>,
}

impl StatsSink for Cards {
    fn set_stat(&mut self, key: StatKey, value: u64) -> bool {
        // The page has no uploads card.
        if key == StatKey::UploadedFiles {
            return false;
        }
        self.shown.push((key, value));
        true
    }
}

fn small_config() -> OverlayConfig {
    OverlayConfig::default()
        .with_particles(64, 3)
        .with_wave_segments(8, 8)
}

fn overlay_at(start_ms: f64) -> ChatOverlay<ManualClock, Cards> {
    ChatOverlay::with_host(small_config(), ManualClock::new(start_ms), Cards::default()).unwrap()
}

#[test]
fn log_keeps_the_most_recent_twenty() {
    let mut overlay = overlay_at(TEN_OH_FIVE_MS);
    for n in 0..35 {
        overlay.add_message(n % 2 == 0, false);
        assert_eq!(overlay.chart().log().len(), (n + 1).min(20));
        overlay.clock().advance(1_000.0);
    }
    let times: Vec<f64> = overlay.chart().log().iter().map(|e| e.timestamp).collect();
    let expected: Vec<f64> = (15..35)
        .map(|n| (TEN_OH_FIVE_MS + f64::from(n) * 1_000.0) / 1_000.0)
        .collect();
    assert_eq!(times, expected);
}

#[test]
fn two_messages_in_one_bucket() {
    let mut overlay = overlay_at(TEN_OH_FIVE_MS);
    overlay.add_message(true, false);
    overlay.add_message(false, true);

    let buckets = overlay.chart().series().buckets();
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].count, 2);
    assert_eq!(buckets[0].bucket_start, 1_704_103_200.0);
    assert_eq!(
        overlay.counters(),
        Counters {
            total_messages: 2,
            uploaded_files: 0,
            rag_queries: 1,
        }
    );
    assert_eq!(
        overlay.stats().shown.last(),
        Some(&(StatKey::RagQueries, 1))
    );
}

#[test]
fn unmount_releases_exactly_what_mount_registered() {
    let mut host = RecordingHost::default();
    let mut overlay = overlay_at(TEN_OH_FIVE_MS);

    overlay.mount(&mut host);
    assert_eq!(host.containers, ["chat-analytics"]);
    assert_eq!(host.kinds, SignalKind::ALL);
    let registered: BTreeSet<_> = overlay.subscriptions().iter().copied().collect();
    assert_eq!(registered, host.active);

    // A second mount must not leak another set.
    overlay.mount(&mut host);
    assert_eq!(host.active.len(), 4);

    overlay.unmount(&mut host);
    assert!(host.active.is_empty());
    assert!(!overlay.is_mounted());
    let released: BTreeSet<_> = host.released.iter().copied().collect();
    assert_eq!(released, registered);
    assert_eq!(host.released.len(), registered.len());
}

#[test]
fn transition_lands_on_target_after_500ms() {
    let mut overlay = overlay_at(TEN_OH_FIVE_MS);
    overlay.add_message(true, false);
    let start = overlay.advance(TEN_OH_FIVE_MS).chart.unwrap();
    let end = overlay.advance(TEN_OH_FIVE_MS + 500.0).chart.unwrap();
    let later = overlay.advance(TEN_OH_FIVE_MS + 5_000.0).chart.unwrap();
    assert_eq!(end.points, later.points);
    let baseline = start.baseline;
    assert!(start.points.iter().all(|p| p.y == baseline));
    assert!(end.points.iter().all(|p| p.y < baseline));
}

#[test]
fn signals_drive_the_background() {
    let mut overlay = overlay_at(TEN_OH_FIVE_MS);
    overlay.handle_signal(HostSignal::Ready);
    assert!(overlay.is_ready());
    overlay.handle_signal(HostSignal::PointerMoved { x: 0.5, y: -0.5 });
    overlay.handle_signal(HostSignal::ViewportResized(Viewport::new(1920.0, 1080.0)));
    assert!((overlay.scene().camera().aspect - 16.0 / 9.0).abs() < 1e-12);

    let frame = overlay
        .handle_signal(HostSignal::FrameTick { wall_ms: 2_000.0 })
        .unwrap();
    assert_eq!(frame.ambient.clock, 1.0);
    assert_eq!(frame.ambient.pointer.x, 0.5);
    assert!(frame.chart.is_none());
}

#[test]
fn wave_heights_depend_only_on_the_clock() {
    let mut overlay = overlay_at(TEN_OH_FIVE_MS);
    overlay.advance(1_000.0);
    let first = overlay.scene().wave().heights().to_vec();
    overlay.advance(9_000.0);
    overlay.advance(1_000.0);
    assert_eq!(overlay.scene().wave().heights(), &first[..]);
}

#[test]
fn first_message_has_distinct_time_labels() {
    let mut overlay = overlay_at(TEN_OH_FIVE_MS);
    overlay.add_message(true, false);
    let frame = overlay.advance(TEN_OH_FIVE_MS + 500.0).chart.unwrap();
    let labels: Vec<&str> = frame.x_axis.ticks.iter().map(|t| t.label.as_str()).collect();
    let distinct: BTreeSet<&str> = labels.iter().copied().collect();
    assert_eq!(distinct.len(), labels.len(), "{labels:?}");
    assert_eq!(labels, ["10:00"]);
}
