// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Live visual overlays for a chat interface.
//!
//! [`ChatOverlay`] combines an animated message-activity chart ([`chatviz_charts`]) with a
//! procedural background ([`chatviz_ambient`]). The host page supplies time ([`WallClock`]),
//! stat cards ([`StatsSink`]) and event subscriptions ([`SignalHost`]), then forwards each
//! [`HostSignal`] and draws what [`ChatOverlay::advance`] returns.
//!
//! ```
//! use chatviz::{ChatOverlay, OverlayConfig};
//!
//! let mut overlay = ChatOverlay::new(OverlayConfig::default()).unwrap();
//! overlay.add_message(true, false);
//! overlay.add_message(false, true);
//! assert_eq!(overlay.counters().total_messages, 2);
//! assert_eq!(overlay.counters().rag_queries, 1);
//! ```

pub use chatviz_ambient as ambient;
pub use chatviz_charts as charts;

mod config;
mod host;
mod overlay;

pub use chatviz_ambient::{Palette, PointerResponse, Viewport};
pub use config::{ConfigError, DEFAULT_CONTAINER_ID, OverlayConfig};
pub use host::{
    HostSignal, ManualClock, NoStats, SignalHost, SignalKind, StatKey, StatsSink, SubscriptionId,
    SystemClock, WallClock,
};
pub use overlay::{ChatOverlay, Counters, OverlayFrame};
