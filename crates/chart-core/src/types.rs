// File: crates/chart-core/src/types.rs
// Summary: Shared types and constants (container sizes, margins, plot area).

/// Default container width in pixels.
pub const WIDTH: f64 = 640.0;
/// Fixed container height in pixels; only the width follows the viewport.
pub const HEIGHT: f64 = 300.0;

/// Screen margins around the plot area, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Insets {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Insets {
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub fn hsum(&self) -> f64 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub fn vsum(&self) -> f64 { self.top + self.bottom }
}

/// Outer size of a chart plus the margins that frame its plot area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub insets: Insets,
}

impl Layout {
    pub fn new(width: f64, height: f64, insets: Insets) -> Self {
        Self { width: width.max(0.0), height: height.max(0.0), insets }
    }

    /// Plot width; never negative even for containers narrower than the margins.
    pub fn plot_width(&self) -> f64 { (self.width - self.insets.hsum()).max(0.0) }

    pub fn plot_height(&self) -> f64 { (self.height - self.insets.vsum()).max(0.0) }
}
