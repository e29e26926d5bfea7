// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plays back a short chat session and writes `chatviz_demo.html`.
//!
//! Run with `RUST_LOG=debug` to see pipeline decisions.

mod html;
mod svg;

use std::error::Error;

use chatviz::ambient::{Euler, ParticleField, SpiralGalaxy, SpiralGalaxySpec};
use chatviz::{ChatOverlay, HostSignal, ManualClock, OverlayConfig, StatKey, StatsSink, Viewport};
use kurbo::Rect;
use peniko::Color;

// 2024-01-01 10:00:05 UTC.
const SESSION_START_MS: f64 = 1_704_103_205_000.0;

/// Prints stat card updates instead of touching a page.
#[derive(Debug, Default)]
struct ConsoleStats {
    last: [u64; 3],
}

impl StatsSink for ConsoleStats {
    fn set_stat(&mut self, key: StatKey, value: u64) -> bool {
        let slot = &mut self.last[key as usize];
        if *slot != value {
            log::info!("stat {} = {value}", key.element_id());
            *slot = value;
        }
        true
    }
}

enum Step {
    User { after_ms: f64 },
    Reply { after_ms: f64, retrieval: bool },
    Upload { after_ms: f64 },
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let sections = vec![
        chat_session_demo()?,
        particle_field_demo()?,
        spiral_galaxy_demo()?,
    ];
    let html = html::render_report("ChatViz demo", &sections);
    std::fs::write("chatviz_demo.html", html)?;
    println!("wrote chatviz_demo.html");
    Ok(())
}

fn chat_session_demo() -> Result<html::HtmlSection, Box<dyn Error>> {
    let config = OverlayConfig::default()
        .with_particles(300, 7)
        .with_wave_segments(20, 20);
    let clock = ManualClock::new(SESSION_START_MS);
    let mut overlay = ChatOverlay::with_host(config, clock, ConsoleStats::default())?;
    overlay.handle_signal(HostSignal::Ready);

    let script = [
        Step::User { after_ms: 0.0 },
        Step::Reply {
            after_ms: 4_000.0,
            retrieval: false,
        },
        Step::Upload { after_ms: 20_000.0 },
        Step::User { after_ms: 30_000.0 },
        Step::Reply {
            after_ms: 3_000.0,
            retrieval: true,
        },
        Step::User { after_ms: 45_000.0 },
        Step::Reply {
            after_ms: 5_000.0,
            retrieval: true,
        },
        Step::User { after_ms: 2_000.0 },
        Step::User { after_ms: 70_000.0 },
        Step::Reply {
            after_ms: 6_000.0,
            retrieval: false,
        },
    ];

    let mut svgs = Vec::new();
    for step in &script {
        let (after_ms, message) = match *step {
            Step::User { after_ms } => (after_ms, Some((true, false))),
            Step::Reply {
                after_ms,
                retrieval,
            } => (after_ms, Some((false, retrieval))),
            Step::Upload { after_ms } => (after_ms, None),
        };
        overlay.clock().advance(after_ms);
        let Some((is_user, retrieval)) = message else {
            overlay.add_file_upload();
            continue;
        };
        if !overlay.add_message(is_user, retrieval) {
            continue;
        }
        let Some(transition) = overlay.chart().renderer().transition() else {
            continue;
        };
        let style = &overlay.chart().spec().style;
        let view = overlay.chart().layout().view;
        let title = overlay.chart().title();
        for (i, frame) in transition.frames(3).iter().enumerate() {
            let id = format!("area-{}-{i}", svgs.len());
            svgs.push(svg::chart_frame_svg(frame, style, view, title, &id));
        }
    }

    let counters = overlay.counters();
    let buckets = overlay.chart().series().len();
    println!(
        "session: {} messages in {buckets} buckets, {} uploads, {} retrieval replies",
        counters.total_messages, counters.uploaded_files, counters.rag_queries
    );

    Ok(html::HtmlSection {
        title: "Chat activity",
        description: format!(
            "Each row of three frames is one 500 ms transition (start, middle, end) after a \
             message. {} messages, {} buckets.",
            counters.total_messages, buckets
        ),
        svgs,
    })
}

fn particle_field_demo() -> Result<html::HtmlSection, Box<dyn Error>> {
    let viewport = Viewport::new(360.0, 240.0);
    let config = OverlayConfig::default()
        .with_viewport(viewport)
        .with_particles(800, 11)
        .with_wave_segments(24, 24);
    let clock = ManualClock::new(SESSION_START_MS);
    let mut overlay = ChatOverlay::with_host(config, clock, ConsoleStats::default())?;

    println!(
        "{:>8} {:>9} {:>9} {:>9} {:>9}",
        "clock", "rot.x", "rot.y", "wave.min", "wave.max"
    );
    let mut svgs = Vec::new();
    for (i, wall_ms) in [0.0, 1_000.0, 2_000.0, 4_000.0].into_iter().enumerate() {
        // Sweep the pointer across the viewport.
        let client_x = viewport.width * i as f64 / 3.0;
        overlay.handle_signal(HostSignal::PointerClient {
            x: client_x,
            y: viewport.height / 2.0,
        });
        let Some(frame) = overlay.handle_signal(HostSignal::FrameTick { wall_ms }) else {
            continue;
        };
        let heights = overlay.scene().wave().heights();
        let (lo, hi) = heights
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), h| {
                (lo.min(*h), hi.max(*h))
            });
        println!(
            "{:>8.3} {:>9.4} {:>9.4} {:>9.3} {:>9.3}",
            frame.ambient.clock,
            frame.ambient.particle_rotation.x,
            frame.ambient.particle_rotation.y,
            lo,
            hi
        );
        svgs.push(project_particles(
            overlay.scene().particles(),
            frame.ambient.particle_rotation,
            viewport,
            overlay.scene().camera().fov_degrees,
            overlay.scene().camera().position_z,
        ));
    }

    Ok(html::HtmlSection {
        title: "Particle field",
        description: "The seeded point cloud seen through the background camera while the \
                      pointer sweeps left to right."
            .to_owned(),
        svgs,
    })
}

fn project_particles(
    field: &ParticleField,
    rotation: Euler,
    viewport: Viewport,
    fov_degrees: f64,
    camera_z: f64,
) -> String {
    let (sx, cx) = rotation.x.sin_cos();
    let (sy, cy) = rotation.y.sin_cos();
    let focal = viewport.height / 2.0 / (fov_degrees.to_radians() / 2.0).tan();
    let opacity = field.material().opacity;
    let dots: Vec<svg::Dot> = field
        .points()
        .iter()
        .filter_map(|p| {
            let [x, y, z] = p.position.map(f64::from);
            let (y, z) = (y * cx - z * sx, y * sx + z * cx);
            let (x, z) = (x * cy + z * sy, -x * sy + z * cy);
            let depth = camera_z - z;
            if depth <= 0.1 {
                return None;
            }
            let scale = focal / depth;
            Some(svg::Dot {
                x: viewport.width / 2.0 + x * scale,
                y: viewport.height / 2.0 - y * scale,
                r: (f64::from(p.size) * scale * 0.05).max(0.3),
                rgb: p.color,
                alpha: opacity,
            })
        })
        .collect();
    svg::dots_svg(
        Rect::new(0.0, 0.0, viewport.width, viewport.height),
        Color::from_rgb8(0x0f, 0x17, 0x2a),
        &dots,
    )
}

fn spiral_galaxy_demo() -> Result<html::HtmlSection, Box<dyn Error>> {
    let spec = SpiralGalaxySpec::default().with_count(1500).with_seed(3);
    let galaxy = SpiralGalaxy::generate(&spec)?;
    let side = 360.0;
    let px_per_unit = 14.0;
    let mut svgs = Vec::new();
    for frame in [0_u32, 15, 30] {
        let t = f64::from(frame) * 0.02;
        let dots: Vec<svg::Dot> = galaxy
            .positions(t)
            .iter()
            .zip(galaxy.alphas(frame))
            .zip(galaxy.sizes())
            .zip(galaxy.colors())
            .map(|(((pos, alpha), size), rgb)| svg::Dot {
                x: side / 2.0 + f64::from(pos[0]) * px_per_unit,
                y: side / 2.0 - f64::from(pos[1]) * px_per_unit,
                r: f64::from(size).sqrt() * 0.35,
                rgb,
                alpha,
            })
            .collect();
        svgs.push(svg::dots_svg(
            Rect::new(0.0, 0.0, side, side),
            Color::from_rgb8(0, 0, 0),
            &dots,
        ));
    }
    Ok(html::HtmlSection {
        title: "Spiral galaxy",
        description: format!(
            "{} particles on five arms at frames 0, 15 and 30.",
            galaxy.len()
        ),
        svgs,
    })
}
