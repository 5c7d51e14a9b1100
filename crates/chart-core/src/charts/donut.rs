// File: crates/chart-core/src/charts/donut.rs
// Summary: Donut chart of model counts per screen technology, with share-of-whole tooltips.

use crate::chart::{ChartInstance, ChartKind, Encoding};
use crate::charts::{fixed, legend_layer, plot_rect, title_layer, MarkIds};
use crate::config::EncodingConfig;
use crate::dataset::{count_by, load_table, merge_counts, TechEnergy, TechShare, TECH_ALL_SIZES, TV_MODELS};
use crate::error::Result;
use crate::geometry::{pie, polar, PieSlice, Point, Sector};
use crate::schema::{Column, Schema};
use crate::scale::OrdinalScale;
use crate::scene::{Anchor, Emphasis, Layer, Mark, MarkId, Scene, Shape, Style};
use crate::source::DataSource;
use crate::theme::{Color, TECH_PALETTE};
use crate::types::Layout;

const TITLE: &str = "TV Screen Technology Distribution";

/// Load per-technology averages, then count models per technology and merge the counts in.
pub fn load(source: &dyn DataSource) -> Result<Vec<TechShare>> {
    let rows = TechEnergy::load(source, TECH_ALL_SIZES)?;
    let models = load_table(source, TV_MODELS, &Schema::new([Column::text("screen_tech")]))?;
    let counts = count_by(models.records().map(|r| r.text("screen_tech")));
    Ok(merge_counts(rows, &counts))
}

/// Share of `counts[i]` in the total, in percent; zero when the total is zero.
pub fn share_pct(counts: &[usize], i: usize) -> f64 {
    let total: usize = counts.iter().sum();
    match counts.get(i) {
        Some(&c) if total > 0 => c as f64 / total as f64 * 100.0,
        _ => 0.0,
    }
}

/// Radii of the ring, derived from the fitted radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ring {
    pub center: Point,
    pub radius: f64,
}

impl Ring {
    pub fn fit(layout: &Layout) -> Self {
        let plot = plot_rect(layout);
        Self {
            center: Point::new(plot.left + plot.width / 2.0, plot.top + plot.height / 2.0),
            radius: plot.width.min(plot.height) / 2.0,
        }
    }
    pub fn inner(&self) -> f64 { self.radius * 0.5 }
    pub fn outer(&self) -> f64 { self.radius * 0.9 }
    pub fn outer_hover(&self) -> f64 { self.radius * 0.95 }
    pub fn label(&self) -> f64 { self.radius * 0.7 }
}

struct DonutEncoding {
    rows: Vec<TechShare>,
}

impl DonutEncoding {
    fn index_of(&self, id: &MarkId) -> Option<usize> {
        let mut ids = MarkIds::default();
        self.rows.iter().position(|r| &ids.next("arc", &r.technology) == id)
    }
}

impl Encoding for DonutEncoding {
    fn tooltip(&self, mark: &Mark) -> Vec<String> {
        // recomputed on every hover from the current counts
        match self.index_of(&mark.id) {
            Some(i) => tooltip_lines(&self.rows, i),
            None => mark.tooltip.clone(),
        }
    }
}

fn tooltip_lines(rows: &[TechShare], i: usize) -> Vec<String> {
    let row = &rows[i];
    let counts: Vec<usize> = rows.iter().map(|r| r.count).collect();
    let percent = share_pct(&counts, i);
    vec![
        row.technology.clone(),
        format!("Count: {} TVs", row.count),
        format!("Market Share: {percent:.1}%"),
        format!("Avg Energy: {} kWh/year", fixed(&row.energy, 1)),
    ]
}

pub fn build(rows: &[TechShare], layout: Layout, config: &EncodingConfig) -> ChartInstance {
    let theme = config.theme();
    let ring = Ring::fit(&layout);
    let mut color = OrdinalScale::new(rows.iter().map(|r| r.technology.as_str()), &TECH_PALETTE);
    let counts: Vec<usize> = rows.iter().map(|r| r.count).collect();
    let slices = pie(&counts.iter().map(|&c| c as f64).collect::<Vec<_>>());

    let mut scene = Scene::new(layout.width, layout.height, theme.background, TITLE);

    let mut arcs = Layer::new("marks");
    let mut labels = Layer::new("labels");
    let mut ids = MarkIds::default();
    for (row, slice) in rows.iter().zip(&slices) {
        let id = ids.next("arc", &row.technology);
        if slice.span() <= 0.0 {
            continue;
        }
        let fill = color.color(&row.technology);
        arcs.mark(arc_mark(id, &ring, slice, fill, theme.mark_stroke).with_tooltip(tooltip_lines(rows, slice.index)));

        // raw share, not the rounded percentage: a 9.6% slice stays unlabelled at a 10% threshold
        if share_pct(&counts, slice.index) >= config.label_threshold_pct {
            let at = polar(ring.center, ring.label(), slice.mid_angle());
            labels.node(
                Shape::bold_text(at.offset(0.0, 12.0 * 0.35), row.technology.as_str(), 12.0, Anchor::Middle),
                Style::fill(Color::WHITE),
            );
        }
    }
    scene.push(arcs);
    scene.push(labels);

    let mut center = Layer::new("center");
    center.node(
        Shape::text(ring.center.offset(0.0, 12.0 * 0.35), "Screen Types", 12.0, Anchor::Middle),
        Style::fill(theme.axis_label),
    );
    scene.push(center);

    let entries: Vec<(String, Color)> = rows
        .iter()
        .map(|r| (format!("{} ({})", r.technology, r.count), color.color(&r.technology)))
        .collect();
    let legend_origin = ring.center.offset(ring.radius * 1.2, -ring.radius + 20.0);
    scene.push(legend_layer(legend_origin, &entries, &theme));
    scene.push(title_layer(ring.center.offset(0.0, -ring.radius - 10.0), TITLE, &theme));

    ChartInstance::new(ChartKind::Donut, layout, scene, config, Box::new(DonutEncoding { rows: rows.to_vec() }))
}

fn arc_mark(id: MarkId, ring: &Ring, slice: &PieSlice, fill: Color, stroke: Color) -> Mark {
    let sector = Sector {
        center: ring.center,
        inner_radius: ring.inner(),
        outer_radius: ring.outer(),
        start_angle: slice.start_angle,
        end_angle: slice.end_angle,
    };
    Mark::new(
        id,
        Shape::Sector(sector),
        Style::fill(fill).with_stroke(stroke, 2.0),
        Emphasis { opacity: 0.8, radius: Some(ring.outer()) },
        Emphasis { opacity: 1.0, radius: Some(ring.outer_hover()) },
    )
}
