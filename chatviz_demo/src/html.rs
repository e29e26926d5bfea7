// Copyright 2025 the ChatViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single-page HTML report holding the demo SVGs.

use std::fmt::Write as _;

use crate::svg::escape_xml;

#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub(crate) title: &'static str,
    pub(crate) description: String,
    /// One or more inline SVG documents.
    pub(crate) svgs: Vec<String>,
}

pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">");
    let _ = write!(out, "<title>{}</title>", escape_xml(title));
    out.push_str(
        "<style>body{font-family:sans-serif;background:#0f172a;color:#e2e8f0;margin:2em}\
         .frames{display:flex;flex-wrap:wrap;gap:12px}\
         .frames svg{background:#1e293b;border-radius:6px}</style>",
    );
    out.push_str("</head><body>\n");
    let _ = writeln!(out, "<h1>{}</h1>", escape_xml(title));
    for section in sections {
        let _ = writeln!(out, "<section><h2>{}</h2>", escape_xml(section.title));
        let _ = writeln!(out, "<p>{}</p>", escape_xml(&section.description));
        out.push_str("<div class=\"frames\">\n");
        for svg in &section.svgs {
            out.push_str(svg);
        }
        out.push_str("</div></section>\n");
    }
    out.push_str("</body></html>\n");
    out
}
