// File: crates/chart-core/src/geometry.rs
// Summary: Pixel geometry helpers: rects, paths, pie layout, annular sectors, monotone curves.

use std::f64::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn from_ltwh(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }
    pub fn right(&self) -> f64 { self.left + self.width }
    pub fn bottom(&self) -> f64 { self.top + self.height }
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }
}

/// Path segment in absolute pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCmd {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
}

/// One slice of a pie layout; angles in radians, clockwise from 12 o'clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieSlice {
    pub index: usize,
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieSlice {
    pub fn span(&self) -> f64 { self.end_angle - self.start_angle }
    pub fn mid_angle(&self) -> f64 { (self.start_angle + self.end_angle) * 0.5 }
}

/// Lay values out around a full circle in input order.
///
/// Non-positive values get an empty slice; an all-zero input yields all-empty slices.
pub fn pie(values: &[f64]) -> Vec<PieSlice> {
    let sum: f64 = values.iter().filter(|v| **v > 0.0).sum();
    let k = if sum > 0.0 { TAU / sum } else { 0.0 };
    let mut angle = 0.0;
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let span = if value > 0.0 { value * k } else { 0.0 };
            let slice = PieSlice { index, value, start_angle: angle, end_angle: angle + span };
            angle += span;
            slice
        })
        .collect()
}

/// Point at `radius` and `angle` (clockwise from 12 o'clock) around `center`.
pub fn polar(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(center.x + radius * angle.sin(), center.y - radius * angle.cos())
}

/// Ring segment between two radii and two angles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sector {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Sector {
    /// Midpoint of the sector at the radius halfway between its edges.
    pub fn centroid(&self) -> Point {
        let r = (self.inner_radius + self.outer_radius) * 0.5;
        polar(self.center, r, (self.start_angle + self.end_angle) * 0.5)
    }

    pub fn contains(&self, p: Point) -> bool {
        let (dx, dy) = (p.x - self.center.x, p.y - self.center.y);
        let dist = dx.hypot(dy);
        if dist < self.inner_radius || dist > self.outer_radius {
            return false;
        }
        let mut angle = dx.atan2(-dy);
        if angle < 0.0 {
            angle += TAU;
        }
        angle >= self.start_angle && angle <= self.end_angle
    }

    /// Closed polygon approximating the sector, one vertex per `max_step` radians at most.
    pub fn outline(&self, max_step: f64) -> Vec<Point> {
        let span = self.end_angle - self.start_angle;
        let n = ((span / max_step.max(1e-3)).ceil() as usize).max(1);
        let mut pts = Vec::with_capacity(2 * n + 2);
        for i in 0..=n {
            let a = self.start_angle + span * i as f64 / n as f64;
            pts.push(polar(self.center, self.outer_radius, a));
        }
        for i in (0..=n).rev() {
            let a = self.start_angle + span * i as f64 / n as f64;
            pts.push(polar(self.center, self.inner_radius, a));
        }
        pts
    }

    pub fn is_full_circle(&self) -> bool {
        self.end_angle - self.start_angle >= TAU - 1e-9
    }
}

/// Polyline as move/line commands.
pub fn polyline(points: &[Point]) -> Vec<PathCmd> {
    let mut out = Vec::with_capacity(points.len());
    for (i, p) in points.iter().enumerate() {
        out.push(if i == 0 { PathCmd::MoveTo(*p) } else { PathCmd::LineTo(*p) });
    }
    out
}

/// Cubic curve through `points` that preserves monotonicity in y, assuming x ascends.
///
/// Tangents follow Steffen's method: interior tangents are limited by the
/// neighbouring secant slopes, end tangents use the one-sided estimate.
pub fn monotone_x(points: &[Point]) -> Vec<PathCmd> {
    let n = points.len();
    if n < 3 {
        return polyline(points);
    }

    let mut tangents = vec![0.0; n];
    for i in 1..n - 1 {
        let (p0, p1, p2) = (points[i - 1], points[i], points[i + 1]);
        let h0 = p1.x - p0.x;
        let h1 = p2.x - p1.x;
        let s0 = (p1.y - p0.y) / h0;
        let s1 = (p2.y - p1.y) / h1;
        let p = (s0 * h1 + s1 * h0) / (h0 + h1);
        let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
        tangents[i] = if t.is_finite() { t } else { 0.0 };
    }
    tangents[0] = end_tangent(points[0], points[1], tangents[1]);
    tangents[n - 1] = end_tangent(points[n - 2], points[n - 1], tangents[n - 2]);

    let mut out = Vec::with_capacity(n);
    out.push(PathCmd::MoveTo(points[0]));
    for i in 0..n - 1 {
        let (a, b) = (points[i], points[i + 1]);
        let dx = (b.x - a.x) / 3.0;
        out.push(PathCmd::CubicTo(
            Point::new(a.x + dx, a.y + dx * tangents[i]),
            Point::new(b.x - dx, b.y - dx * tangents[i + 1]),
            b,
        ));
    }
    out
}

fn sign(v: f64) -> f64 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

fn end_tangent(a: Point, b: Point, neighbour: f64) -> f64 {
    let h = b.x - a.x;
    if h != 0.0 { (3.0 * (b.y - a.y) / h - neighbour) / 2.0 } else { neighbour }
}
