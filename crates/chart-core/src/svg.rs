// File: crates/chart-core/src/svg.rs
// Summary: Serialises a chart scene and its tooltip to a standalone SVG document.
// Notes:
// - Marks carry a <title> with their tooltip text and a CSS hover rule, so the
//   file stays interactive in a browser without any script.
// - Recorded transition durations become CSS transitions.

use std::fmt::{self, Write};
use std::f64::consts::PI;

use crate::chart::ChartInstance;
use crate::config::Timings;
use crate::geometry::{polar, PathCmd, Sector};
use crate::interaction::Tooltip;
use crate::scene::{Anchor, Item, Layer, Mark, Scene, Shape, Style, Text};
use crate::theme::Theme;

const TOOLTIP_LINE: f64 = 14.0;
const TOOLTIP_PAD: f64 = 6.0;

/// SVG for a live chart instance, including its current tooltip.
pub fn render_instance(chart: &ChartInstance) -> String {
    let config = chart.config();
    render(&chart.scene, &chart.tooltip, &config.theme(), &config.timings)
}

pub fn render(scene: &Scene, tooltip: &Tooltip, theme: &Theme, timings: &Timings) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_scene(&mut out, scene, tooltip, theme, timings);
    out
}

fn write_scene(out: &mut String, scene: &Scene, tooltip: &Tooltip, theme: &Theme, timings: &Timings) -> fmt::Result {
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = num(scene.width),
        h = num(scene.height)
    )?;
    writeln!(out, "<title>{}</title>", escape(&scene.title))?;
    writeln!(
        out,
        "<style>.mark{{transition:opacity {s}ms,r {s}ms}}.mark:hover{{opacity:var(--hover-opacity,1)}}circle.mark:hover{{r:var(--hover-r)}}.layer{{transition:opacity {t}ms}}.tooltip{{transition:opacity {s}ms}}</style>",
        s = timings.show_ms,
        t = timings.toggle_ms
    )?;
    writeln!(out, r#"<rect width="100%" height="100%" fill="{}"/>"#, scene.background)?;
    for layer in &scene.layers {
        write_layer(out, layer)?;
    }
    if tooltip.visible {
        write_tooltip(out, tooltip, theme)?;
    }
    writeln!(out, "</svg>")
}

fn write_layer(out: &mut String, layer: &Layer) -> fmt::Result {
    write!(out, r#"<g id="{}" class="layer""#, escape(&layer.id))?;
    if layer.opacity < 1.0 {
        write!(out, r#" opacity="{}""#, num(layer.opacity))?;
    }
    writeln!(out, ">")?;
    for item in &layer.items {
        match item {
            Item::Node(node) => write_element(out, &node.shape, &node.style, "", None)?,
            Item::Mark(mark) => write_mark(out, mark)?,
        }
    }
    writeln!(out, "</g>")
}

fn write_mark(out: &mut String, mark: &Mark) -> fmt::Result {
    let mut attrs = format!(r#" class="mark" data-mark="{}" data-state="{:?}""#, escape(&mark.id.0), mark.state);
    // per-mark hover emphasis for the stylesheet's :hover rules
    let _ = write!(attrs, r#" style="--hover-opacity:{}"#, num(mark.hover.opacity));
    if let Shape::Circle { radius, .. } = mark.shape {
        let _ = write!(attrs, ";--hover-r:{}px", num(mark.hover.radius.unwrap_or(radius)));
    }
    attrs.push('"');
    let title = (!mark.tooltip.is_empty()).then(|| mark.tooltip.join("\n"));
    write_element(out, &mark.shape, &mark.style, &attrs, title.as_deref())
}

/// One complete element; `title` becomes a child for native hover text.
fn write_element(out: &mut String, shape: &Shape, style: &Style, attrs: &str, title: Option<&str>) -> fmt::Result {
    let tag = match shape {
        Shape::Rect(r) => {
            write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                num(r.left),
                num(r.top),
                num(r.width),
                num(r.height)
            )?;
            "rect"
        }
        Shape::Circle { center, radius } => {
            write!(out, r#"<circle cx="{}" cy="{}" r="{}""#, num(center.x), num(center.y), num(*radius))?;
            "circle"
        }
        Shape::Line { from, to } => {
            write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                num(from.x),
                num(from.y),
                num(to.x),
                num(to.y)
            )?;
            "line"
        }
        Shape::Path(cmds) => {
            write!(out, r#"<path d="{}""#, path_data(cmds))?;
            "path"
        }
        Shape::Sector(s) => {
            write!(out, r#"<path d="{}" fill-rule="evenodd""#, sector_data(s))?;
            "path"
        }
        Shape::Text(t) => return write_text(out, t, style, attrs),
    };
    write_style(out, style)?;
    out.push_str(attrs);
    match title {
        Some(text) => writeln!(out, "><title>{}</title></{tag}>", escape(text)),
        None => writeln!(out, "/>"),
    }
}

fn write_style(out: &mut String, style: &Style) -> fmt::Result {
    match style.fill {
        Some(c) => write!(out, r#" fill="{c}""#)?,
        None => out.push_str(r#" fill="none""#),
    }
    if let Some(c) = style.stroke {
        write!(out, r#" stroke="{c}" stroke-width="{}""#, num(style.stroke_width))?;
    }
    if let Some((dash, gap)) = style.dash {
        write!(out, r#" stroke-dasharray="{},{}""#, num(dash), num(gap))?;
    }
    if style.opacity < 1.0 {
        write!(out, r#" opacity="{}""#, num(style.opacity))?;
    }
    Ok(())
}

fn write_text(out: &mut String, t: &Text, style: &Style, attrs: &str) -> fmt::Result {
    let anchor = match t.anchor {
        Anchor::Start => "start",
        Anchor::Middle => "middle",
        Anchor::End => "end",
    };
    write!(
        out,
        r#"<text x="{}" y="{}" font-size="{}" text-anchor="{anchor}""#,
        num(t.at.x),
        num(t.at.y),
        num(t.size)
    )?;
    if t.bold {
        out.push_str(r#" font-weight="bold""#);
    }
    if t.rotate != 0.0 {
        write!(out, r#" transform="rotate({} {} {})""#, num(t.rotate), num(t.at.x), num(t.at.y))?;
    }
    write_style(out, style)?;
    out.push_str(attrs);
    writeln!(out, ">{}</text>", escape(&t.content))
}

fn write_tooltip(out: &mut String, tooltip: &Tooltip, theme: &Theme) -> fmt::Result {
    let width = tooltip.lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as f64 * 6.5 + 2.0 * TOOLTIP_PAD;
    let height = tooltip.lines.len() as f64 * TOOLTIP_LINE + 2.0 * TOOLTIP_PAD;
    let (x, y) = (tooltip.position.x, tooltip.position.y);
    writeln!(out, r#"<g class="tooltip" opacity="{}">"#, num(tooltip.opacity))?;
    writeln!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="4" fill="{}" stroke="{}"/>"#,
        num(x),
        num(y),
        num(width),
        num(height),
        theme.tooltip_background,
        theme.annotation
    )?;
    for (i, line) in tooltip.lines.iter().enumerate() {
        let weight = if i == 0 { r#" font-weight="bold""# } else { "" };
        writeln!(
            out,
            r#"<text x="{}" y="{}" font-size="11" fill="{}"{weight}>{}</text>"#,
            num(x + TOOLTIP_PAD),
            num(y + TOOLTIP_PAD + (i as f64 + 1.0) * TOOLTIP_LINE - 3.0),
            theme.tooltip_text,
            escape(line)
        )?;
    }
    writeln!(out, "</g>")
}

fn path_data(cmds: &[PathCmd]) -> String {
    let mut d = String::new();
    for cmd in cmds {
        let _ = match cmd {
            PathCmd::MoveTo(p) => write!(d, "M{},{}", num(p.x), num(p.y)),
            PathCmd::LineTo(p) => write!(d, "L{},{}", num(p.x), num(p.y)),
            PathCmd::CubicTo(a, b, p) => write!(
                d,
                "C{},{},{},{},{},{}",
                num(a.x),
                num(a.y),
                num(b.x),
                num(b.y),
                num(p.x),
                num(p.y)
            ),
        };
    }
    d
}

/// Annular sector as arc commands; a full ring is two half arcs per radius.
pub fn sector_data(s: &Sector) -> String {
    let mut d = String::new();
    let arcs: Vec<(f64, f64)> = if s.is_full_circle() {
        vec![(s.start_angle, s.start_angle + PI), (s.start_angle + PI, s.start_angle + 2.0 * PI)]
    } else {
        vec![(s.start_angle, s.end_angle)]
    };
    let large = |a0: f64, a1: f64| u8::from(a1 - a0 > PI);

    let start = polar(s.center, s.outer_radius, s.start_angle);
    let _ = write!(d, "M{},{}", num(start.x), num(start.y));
    for &(a0, a1) in &arcs {
        let p = polar(s.center, s.outer_radius, a1);
        let r = num(s.outer_radius);
        let _ = write!(d, "A{r},{r} 0 {} 1 {},{}", large(a0, a1), num(p.x), num(p.y));
    }
    if s.inner_radius > 0.0 {
        let r = num(s.inner_radius);
        if s.is_full_circle() {
            let p = polar(s.center, s.inner_radius, s.start_angle);
            let _ = write!(d, "ZM{},{}", num(p.x), num(p.y));
            for &(a0, a1) in arcs.iter().rev() {
                let q = polar(s.center, s.inner_radius, a0);
                let _ = write!(d, "A{r},{r} 0 {} 0 {},{}", large(a0, a1), num(q.x), num(q.y));
            }
        } else {
            let p = polar(s.center, s.inner_radius, s.end_angle);
            let q = polar(s.center, s.inner_radius, s.start_angle);
            let _ = write!(d, "L{},{}", num(p.x), num(p.y));
            let _ = write!(d, "A{r},{r} 0 {} 0 {},{}", large(s.start_angle, s.end_angle), num(q.x), num(q.y));
        }
    } else if !s.is_full_circle() {
        let _ = write!(d, "L{},{}", num(s.center.x), num(s.center.y));
    }
    d.push('Z');
    d
}

/// Two decimals at most, trailing zeros trimmed.
fn num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
