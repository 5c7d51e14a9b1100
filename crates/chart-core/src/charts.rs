// File: crates/chart-core/src/charts.rs
// Summary: The four chart encoders and the pieces they share (plot rect, title, legend, mark ids).

pub mod bar;
pub mod donut;
pub mod line;
pub mod scatter;

use std::collections::HashSet;

use crate::geometry::{Point, Rect};
use crate::schema::Measure;
use crate::scene::{Anchor, Layer, MarkId, Shape, Style};
use crate::theme::{Color, Theme};
use crate::types::Layout;

pub(crate) fn plot_rect(layout: &Layout) -> Rect {
    Rect::from_ltwh(layout.insets.left, layout.insets.top, layout.plot_width(), layout.plot_height())
}

/// Bold 14px title centred above the plot.
pub(crate) fn title_layer(at: Point, text: &str, theme: &Theme) -> Layer {
    let mut layer = Layer::new("title");
    layer.node(Shape::bold_text(at, text, 14.0, Anchor::Middle), Style::fill(theme.title));
    layer
}

/// Swatch-and-label legend, one 20px row per entry.
pub(crate) fn legend_layer(origin: Point, entries: &[(String, Color)], theme: &Theme) -> Layer {
    let mut layer = Layer::new("legend");
    for (i, (label, color)) in entries.iter().enumerate() {
        let y = origin.y + i as f64 * 20.0;
        layer.node(Shape::Rect(Rect::from_ltwh(origin.x, y, 12.0, 12.0)), Style::fill(*color));
        layer.node(
            Shape::text(Point::new(origin.x + 20.0, y + 10.0), label.as_str(), 10.0, Anchor::Start),
            Style::fill(theme.axis_label),
        );
    }
    layer
}

/// Hands out mark ids, suffixing repeats so every mark stays addressable.
#[derive(Default)]
pub(crate) struct MarkIds {
    used: HashSet<MarkId>,
}

impl MarkIds {
    pub(crate) fn next(&mut self, kind: &str, key: &str) -> MarkId {
        let mut id = MarkId::new(kind, key);
        let mut n = 2;
        while self.used.contains(&id) {
            id = MarkId::new(kind, format!("{key}#{n}"));
            n += 1;
        }
        self.used.insert(id.clone());
        id
    }
}

/// Tooltip rendering of a measure: shortest float form, or `n/a`.
pub(crate) fn show(m: &Measure) -> String {
    match m.value() {
        Some(v) => v.to_string(),
        None => "n/a".to_string(),
    }
}

/// Fixed-decimal rendering of a measure, or `n/a`.
pub(crate) fn fixed(m: &Measure, decimals: usize) -> String {
    match m.value() {
        Some(v) => format!("{v:.decimals$}"),
        None => "n/a".to_string(),
    }
}
