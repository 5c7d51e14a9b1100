// File: crates/chart-core/src/interaction.rs
// Summary: Pointer events, the shared per-chart tooltip and region toggle states.

use crate::geometry::Point;
use crate::scene::MarkId;

/// Pointer input delivered to a chart instance, in scene pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerEvent {
    /// Pointer entered a specific mark.
    Enter { mark: MarkId, at: Point },
    /// Pointer left a specific mark.
    Leave { mark: MarkId },
    /// Pointer moved; enter/leave are derived from hit testing.
    Move { at: Point },
    Click { at: Point },
}

/// Floating overlay with detail for the hovered mark; one per chart instance.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub visible: bool,
    pub opacity: f64,
    pub position: Point,
    pub lines: Vec<String>,
    pub transition_ms: u32,
}

impl Tooltip {
    pub const SHOWN_OPACITY: f64 = 0.9;

    pub fn hidden() -> Self {
        Self { visible: false, opacity: 0.0, position: Point::default(), lines: Vec::new(), transition_ms: 0 }
    }

    pub fn show(&mut self, lines: Vec<String>, position: Point, transition_ms: u32) {
        self.visible = true;
        self.opacity = Self::SHOWN_OPACITY;
        self.lines = lines;
        self.position = position;
        self.transition_ms = transition_ms;
    }

    pub fn move_to(&mut self, position: Point) {
        self.position = position;
    }

    /// Hide without clearing the text, so a fade-out still has content.
    pub fn hide(&mut self, transition_ms: u32) {
        self.visible = false;
        self.opacity = 0.0;
        self.transition_ms = transition_ms;
    }
}

impl Default for Tooltip {
    fn default() -> Self { Self::hidden() }
}

/// Visibility of an optional series. Absent from the toggle map until first enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleState {
    Hidden,
    Visible,
}

impl ToggleState {
    pub fn flipped(self) -> Self {
        match self {
            ToggleState::Hidden => ToggleState::Visible,
            ToggleState::Visible => ToggleState::Hidden,
        }
    }

    pub fn is_visible(self) -> bool {
        self == ToggleState::Visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tooltip_show_then_hide_keeps_text() {
        let mut t = Tooltip::hidden();
        t.show(vec!["LED".into()], Point::new(10.0, 20.0), 200);
        assert!(t.visible);
        assert_eq!(t.opacity, 0.9);
        t.hide(500);
        assert!(!t.visible);
        assert_eq!(t.opacity, 0.0);
        assert_eq!(t.transition_ms, 500);
        assert_eq!(t.lines, vec!["LED".to_string()]);
    }
}
