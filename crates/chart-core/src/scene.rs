// File: crates/chart-core/src/scene.rs
// Summary: Backend-neutral scene graph: layers of decorations and interactive marks.

use std::fmt;

use crate::geometry::{PathCmd, Point, Rect, Sector};
use crate::theme::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    pub at: Point,
    pub content: String,
    pub size: f64,
    pub anchor: Anchor,
    pub bold: bool,
    /// Rotation in degrees around `at`.
    pub rotate: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Rect(Rect),
    Circle { center: Point, radius: f64 },
    Line { from: Point, to: Point },
    Path(Vec<PathCmd>),
    Sector(Sector),
    Text(Text),
}

impl Shape {
    pub fn text(at: Point, content: impl Into<String>, size: f64, anchor: Anchor) -> Self {
        Shape::Text(Text { at, content: content.into(), size, anchor, bold: false, rotate: 0.0 })
    }

    pub fn bold_text(at: Point, content: impl Into<String>, size: f64, anchor: Anchor) -> Self {
        Shape::Text(Text { at, content: content.into(), size, anchor, bold: true, rotate: 0.0 })
    }

    pub fn contains(&self, p: Point) -> bool {
        match self {
            Shape::Rect(r) => r.contains(p),
            Shape::Circle { center, radius } => (p.x - center.x).hypot(p.y - center.y) <= *radius,
            Shape::Sector(s) => s.contains(p),
            Shape::Line { .. } | Shape::Path(_) | Shape::Text(_) => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    /// Dash and gap lengths in pixels.
    pub dash: Option<(f64, f64)>,
    pub opacity: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self { fill: None, stroke: None, stroke_width: 1.0, dash: None, opacity: 1.0 }
    }
}

impl Style {
    pub fn fill(color: Color) -> Self {
        Self { fill: Some(color), ..Self::default() }
    }

    pub fn stroke(color: Color, width: f64) -> Self {
        Self { stroke: Some(color), stroke_width: width, ..Self::default() }
    }

    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some(color);
        self.stroke_width = width;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn dashed(mut self, dash: f64, gap: f64) -> Self {
        self.dash = Some((dash, gap));
        self
    }
}

/// Static visual element (axis, gridline, label, title).
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub shape: Shape,
    pub style: Style,
}

impl Node {
    pub fn new(shape: Shape, style: Style) -> Self {
        Self { shape, style }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub String);

impl MarkId {
    pub fn new(kind: &str, key: impl fmt::Display) -> Self {
        MarkId(format!("{kind}:{key}"))
    }
}

impl fmt::Display for MarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Visual emphasis of a mark in one interaction state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emphasis {
    pub opacity: f64,
    /// Circle radius or sector outer radius; `None` leaves geometry untouched.
    pub radius: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MarkState {
    #[default]
    Idle,
    Hovered,
}

/// Interactive primitive bound to one data row or aggregate.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    pub id: MarkId,
    pub shape: Shape,
    pub style: Style,
    pub idle: Emphasis,
    pub hover: Emphasis,
    pub state: MarkState,
    /// Duration of the most recent emphasis change, for renderers that animate.
    pub transition_ms: u32,
    pub tooltip: Vec<String>,
}

impl Mark {
    pub fn new(id: MarkId, shape: Shape, style: Style, idle: Emphasis, hover: Emphasis) -> Self {
        let mut mark = Self {
            id,
            shape,
            style,
            idle,
            hover,
            state: MarkState::Idle,
            transition_ms: 0,
            tooltip: Vec::new(),
        };
        mark.apply(idle);
        mark
    }

    /// Representative point of the mark, where a pointer would rest on it.
    pub fn anchor(&self) -> Point {
        match &self.shape {
            Shape::Rect(r) => Point::new(r.left + r.width / 2.0, r.top + r.height / 2.0),
            Shape::Circle { center, .. } => *center,
            Shape::Sector(s) => s.centroid(),
            Shape::Line { from, to } => Point::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0),
            Shape::Text(t) => t.at,
            Shape::Path(cmds) => cmds
                .iter()
                .find_map(|c| match c {
                    PathCmd::MoveTo(p) => Some(*p),
                    _ => None,
                })
                .unwrap_or_default(),
        }
    }

    /// True when `key` names this mark, with or without its kind prefix.
    pub fn matches(&self, key: &str) -> bool {
        self.id.0 == key || self.id.0.split_once(':').is_some_and(|(_, rest)| rest == key)
    }

    pub fn with_tooltip(mut self, lines: Vec<String>) -> Self {
        self.tooltip = lines;
        self
    }

    pub fn set_state(&mut self, state: MarkState, transition_ms: u32) {
        self.state = state;
        self.transition_ms = transition_ms;
        let emphasis = match state {
            MarkState::Idle => self.idle,
            MarkState::Hovered => self.hover,
        };
        self.apply(emphasis);
    }

    fn apply(&mut self, emphasis: Emphasis) {
        self.style.opacity = emphasis.opacity;
        if let Some(r) = emphasis.radius {
            match &mut self.shape {
                Shape::Circle { radius, .. } => *radius = r,
                Shape::Sector(s) => s.outer_radius = r,
                _ => {}
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    Node(Node),
    Mark(Mark),
}

/// Named group of items drawn in order; its opacity multiplies its items'.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub id: String,
    pub opacity: f64,
    pub transition_ms: u32,
    pub items: Vec<Item>,
}

impl Layer {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), opacity: 1.0, transition_ms: 0, items: Vec::new() }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn node(&mut self, shape: Shape, style: Style) {
        self.items.push(Item::Node(Node::new(shape, style)));
    }

    pub fn mark(&mut self, mark: Mark) {
        self.items.push(Item::Mark(mark));
    }

    pub fn marks(&self) -> impl Iterator<Item = &Mark> {
        self.items.iter().filter_map(|i| match i {
            Item::Mark(m) => Some(m),
            Item::Node(_) => None,
        })
    }

    pub fn marks_mut(&mut self) -> impl Iterator<Item = &mut Mark> {
        self.items.iter_mut().filter_map(|i| match i {
            Item::Mark(m) => Some(m),
            Item::Node(_) => None,
        })
    }
}

/// Everything one chart draws, in paint order.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub background: Color,
    pub title: String,
    pub layers: Vec<Layer>,
}

impl Scene {
    pub fn new(width: f64, height: f64, background: Color, title: impl Into<String>) -> Self {
        Self { width, height, background, title: title.into(), layers: Vec::new() }
    }

    pub fn push(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn layer_mut(&mut self, id: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    pub fn marks(&self) -> impl Iterator<Item = &Mark> {
        self.layers.iter().flat_map(|l| l.marks())
    }

    pub fn mark(&self, id: &MarkId) -> Option<&Mark> {
        self.marks().find(|m| &m.id == id)
    }

    pub fn mark_mut(&mut self, id: &MarkId) -> Option<&mut Mark> {
        self.layers.iter_mut().flat_map(|l| l.marks_mut()).find(|m| &m.id == id)
    }

    /// Layer holding the mark `id`.
    pub fn layer_of(&self, id: &MarkId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.marks().any(|m| &m.id == id))
    }

    /// Topmost mark under `p`, ignoring layers that are fully transparent.
    pub fn hit_test(&self, p: Point) -> Option<&MarkId> {
        self.layers
            .iter()
            .rev()
            .filter(|l| l.opacity > 0.0)
            .flat_map(|l| l.items.iter().rev())
            .find_map(|item| match item {
                Item::Mark(m) if m.shape.contains(p) => Some(&m.id),
                _ => None,
            })
    }
}
