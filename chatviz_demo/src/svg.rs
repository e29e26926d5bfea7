// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG writers for `chatviz_demo`.

use std::fmt::Write as _;

use chatviz::charts::{AxisOrient, AxisTicks, ChartFrame, ChartStyle, StrokeStyle};
use kurbo::{Point, Rect};
use peniko::{Brush, Color};

/// Writes one chart frame as a standalone SVG document.
///
/// `gradient_id` must be unique within the page the SVG is embedded in.
pub(crate) fn chart_frame_svg(
    frame: &ChartFrame,
    style: &ChartStyle,
    view: Rect,
    title: Option<(&str, Point)>,
    gradient_id: &str,
) -> String {
    let mut out = open_svg(view);
    let (start, end) = style.area_gradient_line(&frame.scale);

    out.push_str("<defs>");
    let _ = write!(
        out,
        r#"<linearGradient id="{gradient_id}" gradientUnits="userSpaceOnUse" x1="{}" y1="{}" x2="{}" y2="{}">"#,
        start.x, start.y, end.x, end.y
    );
    write_stop(&mut out, 0.0, style.area_start);
    write_stop(&mut out, 1.0, style.area_end);
    out.push_str("</linearGradient></defs>\n");

    let _ = writeln!(
        out,
        r#"<path d="{}" fill="url(#{gradient_id})" opacity="{}"/>"#,
        frame.area().to_svg(),
        style.area_opacity
    );
    let _ = write!(out, r#"<path d="{}" fill="none""#, frame.line().to_svg());
    write_stroke(&mut out, &style.line);
    out.push_str("/>\n");

    write_axis(&mut out, &frame.x_axis, style);
    write_axis(&mut out, &frame.y_axis, style);

    if let Some((text, at)) = title {
        let _ = write!(
            out,
            r#"<text x="{}" y="{}" font-size="{}" font-weight="{}" text-anchor="middle""#,
            at.x, at.y, style.title_font_size, style.title_font_weight
        );
        write_paint_attr(&mut out, "fill", &Brush::Solid(style.title_color));
        out.push('>');
        out.push_str(&escape_xml(text));
        out.push_str("</text>\n");
    }

    out.push_str("</svg>\n");
    out
}

fn write_axis(out: &mut String, axis: &AxisTicks, style: &ChartStyle) {
    let _ = write!(out, r#"<path d="{}" fill="none""#, axis.rules().to_svg());
    write_stroke(out, &style.axis);
    out.push_str("/>\n");

    let (anchor, baseline) = match axis.orient {
        AxisOrient::Bottom => ("middle", "hanging"),
        AxisOrient::Left => ("end", "middle"),
    };
    for tick in &axis.ticks {
        if tick.opacity <= 0.0 {
            continue;
        }
        let at = axis.label_anchor(tick);
        let _ = write!(
            out,
            r#"<text x="{}" y="{}" font-size="{}" text-anchor="{anchor}" dominant-baseline="{baseline}" opacity="{}""#,
            at.x,
            at.y,
            style.label_font_size,
            tick.opacity.clamp(0.0, 1.0)
        );
        write_paint_attr(out, "fill", &Brush::Solid(style.label));
        out.push('>');
        out.push_str(&escape_xml(&tick.label));
        out.push_str("</text>\n");
    }
}

/// A circle to draw in a point cloud.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Dot {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) r: f64,
    pub(crate) rgb: [f32; 3],
    pub(crate) alpha: f32,
}

/// Writes a point cloud over a solid background.
pub(crate) fn dots_svg(view: Rect, background: Color, dots: &[Dot]) -> String {
    let mut out = open_svg(view);
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
        view.x0,
        view.y0,
        view.width(),
        view.height()
    );
    write_paint_attr(&mut out, "fill", &Brush::Solid(background));
    out.push_str("/>\n");
    for dot in dots {
        let [r, g, b] = dot.rgb;
        let color = Color::new([r, g, b, dot.alpha.clamp(0.0, 1.0)]);
        let _ = write!(
            out,
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}""#,
            dot.x, dot.y, dot.r
        );
        write_paint_attr(&mut out, "fill", &Brush::Solid(color));
        out.push_str("/>\n");
    }
    out.push_str("</svg>\n");
    out
}

fn open_svg(view: Rect) -> String {
    let mut out = String::new();
    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
    let _ = writeln!(
        out,
        r#"viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
        view.x0,
        view.y0,
        view.width(),
        view.height(),
        view.width(),
        view.height()
    );
    out
}

fn write_stop(out: &mut String, offset: f64, color: Color) {
    let (hex, opacity) = svg_color(color);
    let _ = write!(
        out,
        r#"<stop offset="{offset}" stop-color="{hex}" stop-opacity="{}"/>"#,
        opacity.unwrap_or(1.0)
    );
}

fn write_stroke(out: &mut String, stroke: &StrokeStyle) {
    if stroke.stroke_width > 0.0 {
        write_paint_attr(out, "stroke", &stroke.brush);
        let _ = write!(out, r#" stroke-width="{}""#, stroke.stroke_width);
    }
}

fn svg_color(color: Color) -> (String, Option<f64>) {
    let rgba = color.to_rgba8();
    let hex = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
    let opacity = if rgba.a == 255 {
        None
    } else {
        Some(f64::from(rgba.a) / 255.0)
    };
    (hex, opacity)
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => svg_color(*color),
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
