// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay facade: chart pipeline, ambient scene, counters and host wiring.

use chatviz_ambient::{AmbientFrame, AmbientScene, AmbientSpec, Pointer, Viewport};
use chatviz_charts::{ActivityChart, ChartFrame, ChartSpec, ChartStyle, ChatEvent, Size};

use crate::config::{ConfigError, OverlayConfig};
use crate::host::{
    HostSignal, NoStats, SignalHost, SignalKind, StatKey, StatsSink, SubscriptionId, SystemClock,
    WallClock,
};

/// Running totals shown on the stat cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counters {
    /// Every message added.
    pub total_messages: u64,
    /// Every file upload.
    pub uploaded_files: u64,
    /// Assistant replies that used retrieval.
    pub rag_queries: u64,
}

impl Counters {
    /// The value shown for `key`.
    pub fn get(&self, key: StatKey) -> u64 {
        match key {
            StatKey::TotalMessages => self.total_messages,
            StatKey::UploadedFiles => self.uploaded_files,
            StatKey::RagQueries => self.rag_queries,
        }
    }
}

/// What the host draws for one display refresh.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayFrame {
    /// Background state for this refresh.
    pub ambient: AmbientFrame,
    /// Chart geometry, `None` until the first message.
    pub chart: Option<ChartFrame>,
}

/// Chat analytics overlay.
///
/// Chart state changes only on [`add_message`](Self::add_message); the background changes on
/// every [`advance`](Self::advance). Both run on the caller's thread and each call completes
/// before the next begins.
#[derive(Debug)]
pub struct ChatOverlay<C = SystemClock, S = NoStats> {
    config: OverlayConfig,
    clock: C,
    stats: S,
    chart: ActivityChart,
    scene: AmbientScene,
    counters: Counters,
    subscriptions: Vec<SubscriptionId>,
    ready: bool,
}

impl ChatOverlay {
    /// Builds an overlay on the system clock with no stat cards.
    pub fn new(config: OverlayConfig) -> Result<Self, ConfigError> {
        Self::with_host(config, SystemClock, NoStats)
    }
}

impl<C: WallClock, S: StatsSink> ChatOverlay<C, S> {
    /// Builds an overlay reading time from `clock` and showing totals through `stats`.
    pub fn with_host(config: OverlayConfig, clock: C, stats: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let palette = config.palette;
        let chart = ActivityChart::new(
            ChartSpec::default()
                .with_container(config.chart_size)
                .with_log_capacity(config.log_capacity)
                .with_bucket_width(config.bucket_width)
                .with_utc_offset_seconds(config.utc_offset_seconds)
                .with_style(ChartStyle::from_palette(palette.primary, palette.accent)),
        )?;
        let (sx, sy) = config.wave_segments;
        let scene = AmbientScene::new(
            &AmbientSpec::default()
                .with_palette(palette)
                .with_viewport(config.viewport)
                .with_particles(config.particle_count, config.seed)
                .with_pointer_response(config.pointer_response)
                .with_wave_segments(sx, sy),
        )?;
        log::debug!(
            "overlay built for #{} ({} particles, {}x{} wave grid)",
            config.container_id,
            config.particle_count,
            sx,
            sy
        );
        Ok(Self {
            config,
            clock,
            stats,
            chart,
            scene,
            counters: Counters::default(),
            subscriptions: Vec::new(),
            ready: false,
        })
    }

    /// Records a chat message at the current wall-clock time.
    ///
    /// The chart re-aggregates the whole window and animates towards it. Retrieval is only
    /// counted for assistant replies. Returns `true` if a chart transition started.
    pub fn add_message(&mut self, is_user_originated: bool, used_retrieval: bool) -> bool {
        let now_ms = self.clock.now_ms();
        let event = ChatEvent::at_millis(now_ms, is_user_originated, used_retrieval);
        let animated = self.chart.record(event, now_ms);
        self.counters.total_messages += 1;
        if used_retrieval && !is_user_originated {
            self.counters.rag_queries += 1;
        }
        self.publish_stats();
        animated
    }

    /// Counts a document upload. The chart is unaffected.
    pub fn add_file_upload(&mut self) {
        self.counters.uploaded_files += 1;
        self.publish_stats();
    }

    /// Creates the container if needed and subscribes to every [`SignalKind`].
    ///
    /// Mounting twice keeps the first set of subscriptions.
    pub fn mount(&mut self, host: &mut impl SignalHost) {
        if self.is_mounted() {
            log::debug!("overlay already mounted");
            return;
        }
        if host.ensure_container(&self.config.container_id) {
            log::warn!(
                "container #{} was missing and has been created",
                self.config.container_id
            );
        }
        self.subscriptions = SignalKind::ALL
            .iter()
            .map(|kind| host.subscribe(*kind))
            .collect();
    }

    /// Releases every subscription made by [`mount`](Self::mount).
    ///
    /// The host must stop calling [`advance`](Self::advance) afterwards.
    pub fn unmount(&mut self, host: &mut impl SignalHost) {
        for id in self.subscriptions.drain(..) {
            host.release(id);
        }
        self.ready = false;
    }

    /// Returns `true` between [`mount`](Self::mount) and [`unmount`](Self::unmount).
    pub fn is_mounted(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Subscriptions currently held.
    pub fn subscriptions(&self) -> &[SubscriptionId] {
        &self.subscriptions
    }

    /// Dispatches a host signal. Frame ticks return the advanced frame.
    pub fn handle_signal(&mut self, signal: HostSignal) -> Option<OverlayFrame> {
        match signal {
            HostSignal::FrameTick { wall_ms } => return Some(self.advance(wall_ms)),
            HostSignal::PointerMoved { x, y } => self.scene.pointer_moved(x, y),
            HostSignal::PointerClient { x, y } => {
                let p = Pointer::from_client(x, y, self.scene.viewport());
                self.scene.pointer_moved(p.x, p.y);
            }
            HostSignal::ViewportResized(viewport) => self.resize(viewport),
            HostSignal::Ready => {
                self.ready = true;
                self.publish_stats();
            }
        }
        None
    }

    /// Advances the background to `wall_ms` and samples the chart at the same instant.
    pub fn advance(&mut self, wall_ms: f64) -> OverlayFrame {
        let ambient = self.scene.advance(wall_ms);
        log::trace!(
            "frame at clock {:.4}: rotation ({:.4}, {:.4})",
            ambient.clock,
            ambient.particle_rotation.x,
            ambient.particle_rotation.y
        );
        OverlayFrame {
            ambient,
            chart: self.chart.frame_at(wall_ms),
        }
    }

    /// Applies a viewport change to both subsystems.
    ///
    /// The background takes the new size. The chart keeps its height and scales its width by
    /// the same factor as the viewport width, re-projecting without animation.
    pub fn resize(&mut self, viewport: Viewport) {
        if !(viewport.width > 0.0 && viewport.height > 0.0) {
            log::warn!(
                "ignoring degenerate viewport {}x{}",
                viewport.width,
                viewport.height
            );
            return;
        }
        self.scene.resize(viewport);
        let initial = self.config.viewport;
        let base = self.config.chart_size;
        let chart = Size::new(base.width * viewport.width / initial.width, base.height);
        self.chart.resize(chart, self.clock.now_ms());
    }

    /// Current totals.
    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Returns `true` once the host signalled [`HostSignal::Ready`].
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// The chart pipeline.
    pub fn chart(&self) -> &ActivityChart {
        &self.chart
    }

    /// The background scene.
    pub fn scene(&self) -> &AmbientScene {
        &self.scene
    }

    /// The configuration the overlay was built with.
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// The wall clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The stats sink.
    pub fn stats(&self) -> &S {
        &self.stats
    }

    fn publish_stats(&mut self) {
        for key in StatKey::ALL {
            if !self.stats.set_stat(key, self.counters.get(key)) {
                log::trace!("no stat target for {}", key.element_id());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ManualClock;

    fn overlay() -> ChatOverlay<ManualClock, NoStats> {
        let config = OverlayConfig::default().with_particles(32, 1).with_wave_segments(4, 4);
        ChatOverlay::with_host(config, ManualClock::new(1_704_103_205_000.0), NoStats).unwrap()
    }

    #[test]
    fn retrieval_only_counts_for_replies() {
        let mut o = overlay();
        o.add_message(true, true);
        o.add_message(false, true);
        o.add_file_upload();
        assert_eq!(
            o.counters(),
            Counters {
                total_messages: 2,
                uploaded_files: 1,
                rag_queries: 1,
            }
        );
    }

    #[test]
    fn chart_frame_appears_after_first_message() {
        let mut o = overlay();
        assert!(o.advance(1_704_103_205_000.0).chart.is_none());
        assert!(o.add_message(true, false));
        assert!(o.advance(1_704_103_205_500.0).chart.is_some());
    }

    #[test]
    fn resize_scales_chart_width() {
        let mut o = overlay();
        o.resize(Viewport::new(640.0, 480.0));
        assert_eq!(o.chart().layout().view.width(), 200.0);
        assert_eq!(o.chart().layout().view.height(), 300.0);
        assert_eq!(o.scene().viewport(), Viewport::new(640.0, 480.0));
    }

    #[test]
    fn client_pointer_is_normalized() {
        let mut o = overlay();
        o.handle_signal(HostSignal::PointerClient { x: 1280.0, y: 0.0 });
        assert_eq!(o.scene().pointer(), Pointer::new(1.0, 1.0));
    }
}
