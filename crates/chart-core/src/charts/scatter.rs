// File: crates/chart-core/src/charts/scatter.rs
// Summary: Scatter plot of energy use against star rating, one dot per TV model.

use crate::axis::{draw_gridlines, Axis};
use crate::chart::{ChartInstance, ChartKind, Encoding};
use crate::charts::{legend_layer, plot_rect, show, title_layer};
use crate::config::EncodingConfig;
use crate::dataset::TvModel;
use crate::error::Result;
use crate::geometry::Point;
use crate::scale::{distinct, LinearScale, OrdinalScale};
use crate::scene::{Emphasis, Layer, Mark, MarkId, Scene, Shape, Style};
use crate::source::DataSource;
use crate::theme::{Color, CATEGORY10};
use crate::types::Layout;

const TITLE: &str = "Energy Consumption vs Star Rating by Screen Technology";

pub fn load(source: &dyn DataSource) -> Result<Vec<TvModel>> {
    TvModel::load(source)
}

pub struct ScatterScales {
    pub x: LinearScale,
    pub y: LinearScale,
    pub color: OrdinalScale,
}

pub fn scales(rows: &[TvModel], layout: &Layout, config: &EncodingConfig) -> ScatterScales {
    let plot = plot_rect(layout);
    let x = LinearScale::zero_based(rows.iter().map(|r| r.star_rating.value()), config.domain_headroom, (plot.left, plot.right()));
    let y = LinearScale::zero_based(rows.iter().map(|r| r.energy.value()), config.domain_headroom, (plot.bottom(), plot.top));
    let color = OrdinalScale::new(rows.iter().map(|r| r.screen_tech.as_str()), &CATEGORY10);
    ScatterScales { x, y, color }
}

struct ScatterEncoding;

impl Encoding for ScatterEncoding {}

pub fn build(rows: &[TvModel], layout: Layout, config: &EncodingConfig) -> ChartInstance {
    let theme = config.theme();
    let plot = plot_rect(&layout);
    let ScatterScales { x, y, mut color } = scales(rows, &layout, config);

    let mut scene = Scene::new(layout.width, layout.height, theme.background, TITLE);

    let x_axis = Axis::linear("Star Rating (Energy Efficiency)", &x, 10, false);
    let y_axis = Axis::linear("Energy Consumption (kWh/year)", &y, 10, false);
    let mut axes = Layer::new("axes");
    x_axis.draw_bottom(&mut axes, plot, &theme);
    y_axis.draw_left(&mut axes, plot, &theme);
    scene.push(axes);

    let mut grid = Layer::new("grid");
    draw_gridlines(&mut grid, &y_axis, plot, &theme);
    scene.push(grid);

    let mut dots = Layer::new("marks");
    let mut skipped = 0usize;
    for (i, row) in rows.iter().enumerate() {
        let (Some(stars), Some(energy)) = (row.star_rating.value(), row.energy.value()) else {
            skipped += 1;
            continue;
        };
        let mark = Mark::new(
            MarkId::new("dot", i),
            Shape::Circle { center: Point::new(x.map(stars), y.map(energy)), radius: 5.0 },
            Style::fill(color.color(&row.screen_tech)).with_stroke(Color::WHITE, 0.5),
            Emphasis { opacity: 0.7, radius: Some(5.0) },
            Emphasis { opacity: 1.0, radius: Some(8.0) },
        )
        .with_tooltip(vec![
            row.brand.clone(),
            format!("Screen Tech: {}", row.screen_tech),
            format!("Screen Size: {}\"", show(&row.screen_size)),
            format!("Star Rating: {}", show(&row.star_rating)),
            format!("Energy: {} kWh/year", show(&row.energy)),
        ]);
        dots.mark(mark);
    }
    if skipped > 0 {
        tracing::debug!(skipped, "scatter dots without a position");
    }
    scene.push(dots);

    let entries: Vec<(String, Color)> = distinct(rows.iter().map(|r| r.screen_tech.as_str()))
        .into_iter()
        .map(|tech| {
            let c = color.color(&tech);
            (tech, c)
        })
        .collect();
    scene.push(legend_layer(Point::new(plot.right() - 120.0, plot.top + 10.0), &entries, &theme));
    scene.push(title_layer(Point::new(plot.left + plot.width / 2.0, plot.top - 10.0), TITLE, &theme));

    ChartInstance::new(ChartKind::Scatter, layout, scene, config, Box::new(ScatterEncoding))
}
