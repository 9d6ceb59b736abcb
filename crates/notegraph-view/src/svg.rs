//! Static SVG snapshot of a [`Frame`].

use std::fmt::Write as _;

use crate::frame::{Frame, NodeDraw};

const EDGE_COLOR: &str = "#4B5563";
const LABEL_COLOR: &str = "#D1D5DB";
const LABEL_OFFSET: f64 = -25.0;

pub fn render_svg(frame: &Frame) -> String {
    let mut out = String::with_capacity(256 + frame.nodes.len() * 256 + frame.edges.len() * 96);
    let w = fmt(frame.width);
    let h = fmt(frame.height);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" data-generation="{}">"#,
        frame.generation
    );
    let t = frame.transform;
    let _ = write!(
        out,
        r#"<g class="viewport" transform="translate({},{}) scale({})">"#,
        fmt(t.x),
        fmt(t.y),
        fmt(t.k)
    );

    out.push_str(r#"<g class="links">"#);
    for edge in &frame.edges {
        let _ = write!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{EDGE_COLOR}" stroke-opacity="0.6" stroke-width="2"/>"#,
            fmt(edge.x1),
            fmt(edge.y1),
            fmt(edge.x2),
            fmt(edge.y2)
        );
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="nodes">"#);
    for node in &frame.nodes {
        render_node(&mut out, node);
    }
    out.push_str("</g></g></svg>");
    out
}

fn render_node(out: &mut String, node: &NodeDraw) {
    let class = if node.is_note { "node note" } else { "node entity" };
    let _ = write!(
        out,
        r#"<g class="{class}" data-id="{}" transform="translate({},{})">"#,
        escape_xml(&node.id),
        fmt(node.x),
        fmt(node.y)
    );
    let _ = write!(
        out,
        r##"<circle r="{}" fill="{}" stroke="#fff" stroke-width="2"/>"##,
        fmt(node.radius),
        node.color
    );
    let weight = if node.is_note { "bold" } else { "normal" };
    let _ = write!(
        out,
        r#"<text dy="{}" text-anchor="middle" fill="{LABEL_COLOR}" font-size="11px" font-weight="{weight}">{}</text>"#,
        fmt(LABEL_OFFSET),
        escape_xml(&node.label)
    );
    if let Some(count) = node.count.filter(|c| *c > 0) {
        let _ = write!(
            out,
            r##"<text dy="4" text-anchor="middle" fill="#fff" font-size="10px" font-weight="bold">{count}</text>"##
        );
    }
    out.push_str("</g>");
}

/// Shortest decimal form, without `-0` or float noise; non-finite values become `0`.
fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    if v == 0.0 {
        v = 0.0;
    }
    format!("{v}")
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut start = 0usize;
    for (i, b) in text.bytes().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            _ => continue,
        };
        out.push_str(&text[start..i]);
        out.push_str(esc);
        start = i + 1;
    }
    out.push_str(&text[start..]);
    out
}
