// File: crates/chart-core/src/charts/bar.rs
// Summary: Bar chart of average energy per screen technology for 55" TVs.

use crate::axis::{draw_gridlines, Axis};
use crate::chart::{ChartInstance, ChartKind, Encoding};
use crate::charts::{plot_rect, title_layer, MarkIds};
use crate::config::EncodingConfig;
use crate::dataset::{TechEnergy, TECH_55_INCH};
use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::scale::{BandScale, LinearScale, OrdinalScale};
use crate::scene::{Anchor, Emphasis, Layer, Mark, Scene, Shape, Style};
use crate::source::DataSource;
use crate::theme::TECH_PALETTE;
use crate::types::Layout;

const TITLE: &str = "Average Energy Consumption for 55\" TVs by Technology";

pub fn load(source: &dyn DataSource) -> Result<Vec<TechEnergy>> {
    TechEnergy::load(source, TECH_55_INCH)
}

pub struct BarScales {
    pub x: BandScale,
    pub y: LinearScale,
    pub color: OrdinalScale,
}

pub fn scales(rows: &[TechEnergy], layout: &Layout, config: &EncodingConfig) -> BarScales {
    let plot = plot_rect(layout);
    let x = BandScale::new(rows.iter().map(|r| r.technology.as_str()), (plot.left, plot.right()), config.band_padding);
    let y = LinearScale::zero_based(rows.iter().map(|r| r.energy.value()), config.domain_headroom, (plot.bottom(), plot.top));
    let color = OrdinalScale::new(x.domain().iter().map(String::as_str), &TECH_PALETTE);
    BarScales { x, y, color }
}

struct BarEncoding;

impl Encoding for BarEncoding {}

pub fn build(rows: &[TechEnergy], layout: Layout, config: &EncodingConfig) -> ChartInstance {
    let theme = config.theme();
    let plot = plot_rect(&layout);
    let BarScales { x, y, mut color } = scales(rows, &layout, config);

    let mut scene = Scene::new(layout.width, layout.height, theme.background, TITLE);

    let x_axis = Axis::band("Screen Technology", &x);
    let y_axis = Axis::linear("Average Energy Consumption (kWh/year)", &y, 10, false).with_title_offset(50.0);
    let mut axes = Layer::new("axes");
    x_axis.draw_bottom(&mut axes, plot, &theme);
    y_axis.draw_left(&mut axes, plot, &theme);
    scene.push(axes);

    let mut grid = Layer::new("grid");
    draw_gridlines(&mut grid, &y_axis, plot, &theme);
    scene.push(grid);

    let mut bars = Layer::new("marks");
    let mut labels = Layer::new("labels");
    let mut ids = MarkIds::default();
    for row in rows {
        // a missing value keeps its band slot but draws nothing
        let (Some(left), Some(value)) = (x.position(&row.technology), row.energy.value()) else {
            tracing::debug!(technology = %row.technology, "bar skipped, energy missing");
            continue;
        };
        let top = y.map(value);
        let rect = Rect::from_ltwh(left, top, x.bandwidth(), plot.bottom() - top);
        let mark = Mark::new(
            ids.next("bar", &row.technology),
            Shape::Rect(rect),
            Style::fill(color.color(&row.technology)),
            Emphasis { opacity: 0.8, radius: None },
            Emphasis { opacity: 1.0, radius: None },
        )
        .with_tooltip(vec![row.technology.clone(), format!("Avg Energy: {value:.1} kWh/year")]);
        bars.mark(mark);

        labels.node(
            Shape::text(Point::new(left + x.bandwidth() / 2.0, top - 5.0), format!("{value:.1}"), 11.0, Anchor::Middle),
            Style::fill(theme.axis_label),
        );
    }
    scene.push(bars);
    scene.push(labels);
    scene.push(title_layer(Point::new(plot.left + plot.width / 2.0, plot.top - 10.0), TITLE, &theme));

    ChartInstance::new(ChartKind::Bar, layout, scene, config, Box::new(BarEncoding))
}
