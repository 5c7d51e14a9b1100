// File: crates/chart-core/src/axis.rs
// Summary: Axis model with tick labels and titles, plus dashed horizontal gridlines.

use crate::geometry::{Point, Rect};
use crate::scale::{format_tick, BandScale, LinearScale};
use crate::scene::{Anchor, Layer, Shape, Style, Text};
use crate::theme::Theme;

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
const TICK_FONT: f64 = 10.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Pixel position along the axis.
    pub pos: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub label: String,
    pub ticks: Vec<Tick>,
    /// Distance of the axis title from the axis line, in pixels.
    pub title_offset: f64,
}

impl Axis {
    /// One tick per band, at the band centre.
    pub fn band(label: impl Into<String>, scale: &BandScale) -> Self {
        let ticks = scale
            .domain()
            .iter()
            .filter_map(|c| scale.center(c).map(|pos| Tick { pos, label: c.clone() }))
            .collect();
        Self { label: label.into(), ticks, title_offset: 40.0 }
    }

    /// About `count` nice ticks; `integer` formats labels without decimals (years).
    pub fn linear(label: impl Into<String>, scale: &LinearScale, count: usize, integer: bool) -> Self {
        let step = scale.tick_step(count);
        let ticks = scale
            .ticks(count)
            .into_iter()
            .map(|v| Tick {
                pos: scale.map(v),
                label: if integer { format!("{v:.0}") } else { format_tick(v, step) },
            })
            .collect();
        Self { label: label.into(), ticks, title_offset: 40.0 }
    }

    pub fn with_title_offset(mut self, offset: f64) -> Self {
        self.title_offset = offset;
        self
    }

    /// Horizontal axis along the bottom edge of `plot`.
    pub fn draw_bottom(&self, layer: &mut Layer, plot: Rect, theme: &Theme) {
        let y = plot.bottom();
        let line = Style::stroke(theme.axis_line, 1.0);
        layer.node(Shape::Line { from: Point::new(plot.left, y), to: Point::new(plot.right(), y) }, line);
        for t in &self.ticks {
            layer.node(Shape::Line { from: Point::new(t.pos, y), to: Point::new(t.pos, y + TICK_SIZE) }, line);
            layer.node(
                Shape::text(Point::new(t.pos, y + TICK_SIZE + TICK_PADDING + TICK_FONT * 0.71), &t.label, TICK_FONT, Anchor::Middle),
                Style::fill(theme.axis_label),
            );
        }
        layer.node(
            Shape::text(Point::new(plot.left + plot.width / 2.0, y + self.title_offset), &self.label, 12.0, Anchor::Middle),
            Style::fill(theme.axis_label),
        );
    }

    /// Vertical axis along the left edge of `plot`, title rotated.
    pub fn draw_left(&self, layer: &mut Layer, plot: Rect, theme: &Theme) {
        let x = plot.left;
        let line = Style::stroke(theme.axis_line, 1.0);
        layer.node(Shape::Line { from: Point::new(x, plot.top), to: Point::new(x, plot.bottom()) }, line);
        for t in &self.ticks {
            layer.node(Shape::Line { from: Point::new(x - TICK_SIZE, t.pos), to: Point::new(x, t.pos) }, line);
            layer.node(
                Shape::text(Point::new(x - TICK_SIZE - TICK_PADDING, t.pos + TICK_FONT * 0.32), &t.label, TICK_FONT, Anchor::End),
                Style::fill(theme.axis_label),
            );
        }
        layer.node(
            Shape::Text(Text {
                at: Point::new(x - self.title_offset, plot.top + plot.height / 2.0),
                content: self.label.clone(),
                size: 12.0,
                anchor: Anchor::Middle,
                bold: false,
                rotate: -90.0,
            }),
            Style::fill(theme.axis_label),
        );
    }
}

/// Dashed, faint horizontal gridlines across `plot` at each tick of a vertical axis.
pub fn draw_gridlines(layer: &mut Layer, axis: &Axis, plot: Rect, theme: &Theme) {
    let style = Style::stroke(theme.grid, 1.0).dashed(3.0, 3.0).with_opacity(0.2);
    for t in &axis.ticks {
        layer.node(Shape::Line { from: Point::new(plot.left, t.pos), to: Point::new(plot.right(), t.pos) }, style);
    }
}
