// File: crates/chart-core/src/charts/line.rs
// Summary: Spot price line chart: an average series plus lazily built, toggleable region overlays.

use std::collections::BTreeMap;

use crate::axis::{draw_gridlines, Axis};
use crate::chart::{ChartInstance, ChartKind, Encoding};
use crate::charts::{plot_rect, title_layer, MarkIds};
use crate::config::EncodingConfig;
use crate::dataset::{Region, SpotPrice};
use crate::error::{ChartError, Result};
use crate::geometry::{monotone_x, Point, Rect};
use crate::interaction::ToggleState;
use crate::scale::{LinearScale, OrdinalScale};
use crate::scene::{Anchor, Emphasis, Item, Layer, Mark, Scene, Shape, Style};
use crate::series::Series;
use crate::source::DataSource;
use crate::theme::{Color, Theme, CATEGORY10};
use crate::types::Layout;

const TITLE: &str = "Electricity Price Trends";
const AVERAGE: &str = "Average";
const CONTROLS: &str = "controls";
const CHECKBOX_SIZE: f64 = 10.0;
const CHECKBOX_SPACING: f64 = 15.0;

pub fn load(source: &dyn DataSource) -> Result<Vec<SpotPrice>> {
    SpotPrice::load(source)
}

pub struct LineScales {
    pub x: LinearScale,
    pub y: LinearScale,
    pub color: OrdinalScale,
}

/// Year extent on x; y spans every region and the average, with headroom.
pub fn scales(rows: &[SpotPrice], layout: &Layout, config: &EncodingConfig) -> LineScales {
    let plot = plot_rect(layout);
    let x = LinearScale::extent(rows.iter().map(|r| r.year.value()), (plot.left, plot.right()));
    let y = LinearScale::zero_based(
        rows.iter()
            .flat_map(|r| r.regions.iter().chain(std::iter::once(&r.average)))
            .map(|m| m.value()),
        config.domain_headroom,
        (plot.bottom(), plot.top),
    );
    let keys = Region::ALL.iter().map(|r| r.code()).chain(std::iter::once(AVERAGE));
    let color = OrdinalScale::new(keys, &CATEGORY10);
    LineScales { x, y, color }
}

/// Layer id holding a region's overlay.
pub fn region_layer_id(region: Region) -> String {
    format!("region:{}", region.code())
}

struct Checkbox {
    region: Region,
    rect: Rect,
    /// Index of the checkbox node inside the controls layer.
    item: usize,
}

struct LineEncoding {
    rows: Vec<SpotPrice>,
    x: LinearScale,
    y: LinearScale,
    colors: BTreeMap<Region, Color>,
    toggles: BTreeMap<Region, ToggleState>,
    checkboxes: Vec<Checkbox>,
}

impl LineEncoding {
    fn series(&self, region: Region) -> Series {
        Series::from_measures(region.code(), self.rows.iter().map(|r| (&r.year, r.region(region))))
    }

    /// Line and points for one region, built on first enable only.
    fn region_layer(&self, region: Region, color: Color, theme: &Theme) -> Layer {
        let series = self.series(region);
        let mut layer = Layer::new(region_layer_id(region)).with_opacity(0.0);
        let mut ids = MarkIds::default();
        let line = Style::stroke(color, 2.0).dashed(3.0, 3.0).with_opacity(0.7);
        for run in series.runs() {
            let pts: Vec<Point> = run.iter().map(|&(yr, v)| Point::new(self.x.map(yr), self.y.map(v))).collect();
            layer.node(Shape::Path(monotone_x(&pts)), line);
        }
        for (year, value) in series.points() {
            let mark = Mark::new(
                ids.next("point", &format!("{}:{year:.0}", region.code())),
                Shape::Circle { center: Point::new(self.x.map(year), self.y.map(value)), radius: 3.0 },
                Style::fill(color).with_stroke(theme.mark_stroke, 1.0),
                Emphasis { opacity: 0.7, radius: Some(3.0) },
                Emphasis { opacity: 1.0, radius: Some(6.0) },
            )
            .with_tooltip(vec![format!("Year: {year:.0}"), format!("{} Price: ${value:.2}/MWh", region.code())]);
            layer.mark(mark);
        }
        layer
    }
}

impl Encoding for LineEncoding {
    fn click(&mut self, scene: &mut Scene, at: Point, config: &EncodingConfig) -> bool {
        let Some(region) = self.checkboxes.iter().find(|c| c.rect.contains(at)).map(|c| c.region) else {
            return false;
        };
        self.toggle(scene, region.code(), config).is_ok()
    }

    fn toggle(&mut self, scene: &mut Scene, key: &str, config: &EncodingConfig) -> Result<bool> {
        let region = Region::from_code(key).ok_or_else(|| ChartError::UnknownRegion(key.to_string()))?;
        let color = self.colors.get(&region).copied().unwrap_or(Color::BLACK);
        let next = match self.toggles.get(&region) {
            None => {
                let theme = config.theme();
                scene.push(self.region_layer(region, color, &theme));
                tracing::debug!(region = region.code(), "region overlay built");
                ToggleState::Visible
            }
            Some(state) => state.flipped(),
        };
        self.toggles.insert(region, next);

        let layer_id = region_layer_id(region);
        if let Some(layer) = scene.layer_mut(&layer_id) {
            layer.opacity = if next.is_visible() { 1.0 } else { 0.0 };
            layer.transition_ms = config.timings.toggle_ms;
        }
        if let Some(cb) = self.checkboxes.iter().find(|c| c.region == region) {
            if let Some(Item::Node(node)) = scene.layer_mut(CONTROLS).and_then(|l| l.items.get_mut(cb.item)) {
                node.style.fill = Some(if next.is_visible() { color } else { Color::WHITE });
            }
        }
        Ok(next.is_visible())
    }

    fn visible_toggles(&self) -> Vec<String> {
        self.toggles
            .iter()
            .filter(|(_, s)| s.is_visible())
            .map(|(r, _)| r.code().to_string())
            .collect()
    }
}

pub fn build(rows: &[SpotPrice], layout: Layout, config: &EncodingConfig) -> ChartInstance {
    let theme = config.theme();
    let plot = plot_rect(&layout);
    let LineScales { x, y, mut color } = scales(rows, &layout, config);

    let mut scene = Scene::new(layout.width, layout.height, theme.background, TITLE);

    let x_axis = Axis::linear("Year", &x, 10, true);
    let y_axis = Axis::linear("Price ($ per megawatt hour)", &y, 10, false).with_title_offset(45.0);
    let mut axes = Layer::new("axes");
    x_axis.draw_bottom(&mut axes, plot, &theme);
    y_axis.draw_left(&mut axes, plot, &theme);
    scene.push(axes);

    let mut grid = Layer::new("grid");
    draw_gridlines(&mut grid, &y_axis, plot, &theme);
    scene.push(grid);

    let average_color = color.color(AVERAGE);
    let average = Series::from_measures(AVERAGE, rows.iter().map(|r| (&r.year, &r.average)));
    let mut avg_layer = Layer::new("series:Average");
    let mut ids = MarkIds::default();
    for run in average.runs() {
        let pts: Vec<Point> = run.iter().map(|&(yr, v)| Point::new(x.map(yr), y.map(v))).collect();
        avg_layer.node(Shape::Path(monotone_x(&pts)), Style::stroke(average_color, 3.0));
    }
    for (year, value) in average.points() {
        let mark = Mark::new(
            ids.next("point", &format!("{AVERAGE}:{year:.0}")),
            Shape::Circle { center: Point::new(x.map(year), y.map(value)), radius: 4.0 },
            Style::fill(average_color).with_stroke(theme.mark_stroke, 1.0),
            Emphasis { opacity: 0.8, radius: Some(4.0) },
            Emphasis { opacity: 1.0, radius: Some(7.0) },
        )
        .with_tooltip(vec![format!("Year: {year:.0}"), format!("Average Price: ${value:.2}/MWh")]);
        avg_layer.mark(mark);
    }
    scene.push(avg_layer);

    let colors: BTreeMap<Region, Color> = Region::ALL.iter().map(|&r| (r, color.color(r.code()))).collect();
    let (controls, checkboxes) = controls_layer(Point::new(plot.right() + 5.0, plot.top), &colors, &theme);
    scene.push(controls);
    scene.push(title_layer(Point::new(plot.left + plot.width / 2.0, plot.top - 10.0), TITLE, &theme));
    if let Some(peak) = peak_layer(&average, &x, &y, &theme) {
        scene.push(peak);
    }

    let encoding = LineEncoding { rows: rows.to_vec(), x, y, colors, toggles: BTreeMap::new(), checkboxes };
    ChartInstance::new(ChartKind::Line, layout, scene, config, Box::new(encoding))
}

fn controls_layer(origin: Point, colors: &BTreeMap<Region, Color>, theme: &Theme) -> (Layer, Vec<Checkbox>) {
    let mut layer = Layer::new(CONTROLS);
    layer.node(Shape::bold_text(origin, "Show Regions:", 10.0, Anchor::Start), Style::fill(theme.axis_label));
    let mut checkboxes = Vec::new();
    for (i, region) in Region::ALL.into_iter().enumerate() {
        let top = origin.y + 15.0 + i as f64 * CHECKBOX_SPACING;
        let rect = Rect::from_ltwh(origin.x, top, CHECKBOX_SIZE, CHECKBOX_SIZE);
        let stroke = colors.get(&region).copied().unwrap_or(Color::BLACK);
        checkboxes.push(Checkbox { region, rect, item: layer.items.len() });
        layer.node(Shape::Rect(rect), Style::fill(Color::WHITE).with_stroke(stroke, 1.0));
        layer.node(
            Shape::text(Point::new(origin.x + CHECKBOX_SIZE + 5.0, top + CHECKBOX_SIZE - 2.0), region.code(), 10.0, Anchor::Start),
            Style::fill(theme.axis_label),
        );
    }
    (layer, checkboxes)
}

/// Dashed leader and label over the first year with the highest average.
fn peak_layer(average: &Series, x: &LinearScale, y: &LinearScale, theme: &Theme) -> Option<Layer> {
    let (year, value) = average.peak()?;
    let at = Point::new(x.map(year), y.map(value));
    let mut layer = Layer::new("annotation");
    layer.node(
        Shape::Line { from: at, to: at.offset(0.0, -30.0) },
        Style::stroke(theme.annotation, 1.0).dashed(3.0, 3.0),
    );
    layer.node(
        Shape::bold_text(at.offset(0.0, -35.0), format!("Peak: ${value:.1}/MWh"), 10.0, Anchor::Middle),
        Style::fill(theme.axis_label),
    );
    Some(layer)
}
