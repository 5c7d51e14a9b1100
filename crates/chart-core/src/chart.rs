// File: crates/chart-core/src/chart.rs
// Summary: Chart kinds, loaded chart data and the ChartInstance that owns scene, tooltip and hover state.

use std::fmt;
use std::str::FromStr;

use crate::charts::{bar, donut, line, scatter};
use crate::config::EncodingConfig;
use crate::dataset::{SpotPrice, TechEnergy, TechShare, TvModel};
use crate::error::{ChartError, Result};
use crate::geometry::Point;
use crate::interaction::{PointerEvent, Tooltip};
use crate::scene::{Mark, MarkId, MarkState, Scene};
use crate::source::DataSource;
use crate::types::{Insets, Layout};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Bar,
    Donut,
    Line,
    Scatter,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [ChartKind::Bar, ChartKind::Donut, ChartKind::Line, ChartKind::Scatter];

    pub fn name(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Donut => "donut",
            ChartKind::Line => "line",
            ChartKind::Scatter => "scatter",
        }
    }

    /// Id of the page element the chart mounts into.
    pub fn container_id(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar-chart",
            ChartKind::Donut => "donut-chart",
            ChartKind::Line => "line-chart",
            ChartKind::Scatter => "scatter-plot",
        }
    }

    pub fn insets(self) -> Insets {
        match self {
            ChartKind::Bar => Insets::new(70.0, 30.0, 40.0, 60.0),
            ChartKind::Donut => Insets::new(30.0, 30.0, 40.0, 40.0),
            ChartKind::Line => Insets::new(60.0, 80.0, 40.0, 60.0),
            ChartKind::Scatter => Insets::new(60.0, 30.0, 40.0, 60.0),
        }
    }

    pub fn layout(self, width: f64, config: &EncodingConfig) -> Layout {
        Layout::new(width, config.height, self.insets())
    }

    /// Fetch and type every dataset the chart needs. The donut fetches two, in sequence.
    pub fn load(self, source: &dyn DataSource) -> Result<ChartData> {
        Ok(match self {
            ChartKind::Bar => ChartData::Bar(bar::load(source)?),
            ChartKind::Donut => ChartData::Donut(donut::load(source)?),
            ChartKind::Line => ChartData::Line(line::load(source)?),
            ChartKind::Scatter => ChartData::Scatter(scatter::load(source)?),
        })
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ChartKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown chart '{s}' (expected bar, donut, line or scatter)"))
    }
}

/// Typed rows for one chart, ready to encode.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartData {
    Bar(Vec<TechEnergy>),
    Donut(Vec<TechShare>),
    Line(Vec<SpotPrice>),
    Scatter(Vec<TvModel>),
}

impl ChartData {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartData::Bar(_) => ChartKind::Bar,
            ChartData::Donut(_) => ChartKind::Donut,
            ChartData::Line(_) => ChartKind::Line,
            ChartData::Scatter(_) => ChartKind::Scatter,
        }
    }

    /// Run scales and geometry for a container `width` pixels wide.
    pub fn build(&self, width: f64, config: &EncodingConfig) -> ChartInstance {
        let layout = self.kind().layout(width, config);
        match self {
            ChartData::Bar(rows) => bar::build(rows, layout, config),
            ChartData::Donut(rows) => donut::build(rows, layout, config),
            ChartData::Line(rows) => line::build(rows, layout, config),
            ChartData::Scatter(rows) => scatter::build(rows, layout, config),
        }
    }
}

/// Chart-specific behaviour behind a chart instance's interaction handlers.
pub trait Encoding {
    /// Tooltip text for a mark entering hover, computed from current data.
    fn tooltip(&self, mark: &Mark) -> Vec<String> {
        mark.tooltip.clone()
    }

    /// Click that landed outside every mark. Returns true when the scene changed.
    fn click(&mut self, _scene: &mut Scene, _at: Point, _config: &EncodingConfig) -> bool {
        false
    }

    /// Flip an optional series by key.
    fn toggle(&mut self, _scene: &mut Scene, key: &str, _config: &EncodingConfig) -> Result<bool> {
        Err(ChartError::UnknownRegion(key.to_string()))
    }

    /// Keys of the optional series that are currently visible.
    fn visible_toggles(&self) -> Vec<String> {
        Vec::new()
    }
}

/// One rendered chart: owns its scene, tooltip and hover state.
pub struct ChartInstance {
    pub kind: ChartKind,
    pub layout: Layout,
    pub scene: Scene,
    pub tooltip: Tooltip,
    config: EncodingConfig,
    encoding: Box<dyn Encoding>,
    hovered: Option<MarkId>,
}

impl fmt::Debug for ChartInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartInstance")
            .field("kind", &self.kind)
            .field("layout", &self.layout)
            .field("hovered", &self.hovered)
            .field("tooltip", &self.tooltip)
            .finish_non_exhaustive()
    }
}

impl ChartInstance {
    pub fn new(kind: ChartKind, layout: Layout, scene: Scene, config: &EncodingConfig, encoding: Box<dyn Encoding>) -> Self {
        Self {
            kind,
            layout,
            scene,
            tooltip: Tooltip::hidden(),
            config: config.clone(),
            encoding,
            hovered: None,
        }
    }

    pub fn config(&self) -> &EncodingConfig { &self.config }

    pub fn hovered(&self) -> Option<&MarkId> { self.hovered.as_ref() }

    pub fn handle(&mut self, event: PointerEvent) -> Result<()> {
        match event {
            PointerEvent::Enter { mark, at } => self.pointer_enter(&mark, at),
            PointerEvent::Leave { mark } => self.pointer_leave(&mark),
            PointerEvent::Move { at } => self.pointer_move(at),
            PointerEvent::Click { at } => {
                self.click(at);
                Ok(())
            }
        }
    }

    /// Idle → Hovered: apply hover emphasis and show the tooltip near the pointer.
    pub fn pointer_enter(&mut self, id: &MarkId, at: Point) -> Result<()> {
        if let Some(prev) = self.hovered.clone() {
            if &prev != id {
                self.pointer_leave(&prev)?;
            }
        }
        let show_ms = self.config.timings.show_ms;
        let mark = self.scene.mark_mut(id).ok_or_else(|| ChartError::UnknownMark(id.to_string()))?;
        mark.set_state(MarkState::Hovered, show_ms);
        let lines = self.encoding.tooltip(mark);
        let (dx, dy) = self.config.tooltip_offset;
        self.tooltip.show(lines, at.offset(dx, dy), show_ms);
        self.hovered = Some(id.clone());
        tracing::trace!(chart = %self.kind, mark = %id, "hover enter");
        Ok(())
    }

    /// Hovered → Idle: restore baseline emphasis and hide the tooltip.
    pub fn pointer_leave(&mut self, id: &MarkId) -> Result<()> {
        let show_ms = self.config.timings.show_ms;
        let mark = self.scene.mark_mut(id).ok_or_else(|| ChartError::UnknownMark(id.to_string()))?;
        mark.set_state(MarkState::Idle, show_ms);
        // the tooltip belongs to the hovered mark; a stale leave must not hide it
        if self.hovered.as_ref() != Some(id) {
            return Ok(());
        }
        self.hovered = None;
        self.tooltip.hide(self.config.timings.hide_ms);
        tracing::trace!(chart = %self.kind, mark = %id, "hover leave");
        Ok(())
    }

    /// Derive enter/leave from a hit test; moving within a mark only repositions the tooltip.
    pub fn pointer_move(&mut self, at: Point) -> Result<()> {
        let hit = self.scene.hit_test(at).cloned();
        match (self.hovered.clone(), hit) {
            (Some(cur), Some(hit)) if cur == hit => {
                let (dx, dy) = self.config.tooltip_offset;
                self.tooltip.move_to(at.offset(dx, dy));
                Ok(())
            }
            (_, Some(hit)) => self.pointer_enter(&hit, at),
            (Some(cur), None) => self.pointer_leave(&cur),
            (None, None) => Ok(()),
        }
    }

    /// Returns true when the click changed the scene.
    pub fn click(&mut self, at: Point) -> bool {
        let changed = self.encoding.click(&mut self.scene, at, &self.config);
        if changed {
            if let Err(err) = self.leave_if_hidden() {
                tracing::warn!(chart = %self.kind, error = %err, "hover reset after click failed");
            }
        }
        changed
    }

    /// Flip an optional series (line chart regions). Returns the new visibility.
    pub fn toggle(&mut self, key: &str) -> Result<bool> {
        let visible = self.encoding.toggle(&mut self.scene, key, &self.config)?;
        self.leave_if_hidden()?;
        Ok(visible)
    }

    /// A hovered mark whose layer was just hidden can no longer receive a leave event.
    fn leave_if_hidden(&mut self) -> Result<()> {
        let hidden = match &self.hovered {
            Some(id) => self.scene.layer_of(id).is_some_and(|l| l.opacity <= 0.0),
            None => false,
        };
        match self.hovered.clone() {
            Some(id) if hidden => self.pointer_leave(&id),
            _ => Ok(()),
        }
    }

    pub fn visible_toggles(&self) -> Vec<String> {
        self.encoding.visible_toggles()
    }

    /// Explicit end of life: clears hover state and hides the tooltip before the instance drops.
    pub fn teardown(mut self) {
        if let Some(id) = self.hovered.take() {
            if let Some(mark) = self.scene.mark_mut(&id) {
                mark.set_state(MarkState::Idle, 0);
            }
        }
        self.tooltip.hide(0);
        tracing::debug!(chart = %self.kind, width = self.layout.width, "chart instance torn down");
    }
}
