// File: crates/chart-core/src/report.rs
// Summary: Writes per-chart SVG files and an HTML report page embedding them.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tinytemplate::TinyTemplate;

use crate::chart::ChartInstance;
use crate::error::Result;
use crate::svg;

const INDEX_FILE_NAME: &str = "index.html";

/// One chart card on the report page.
#[derive(Clone, Debug, Serialize)]
pub struct ReportChart {
    /// Container element id.
    pub id: String,
    pub heading: String,
    pub svg: String,
    /// Interaction state worth noting under the chart; empty for none.
    pub state: String,
}

impl ReportChart {
    pub fn from_instance(chart: &ChartInstance) -> Self {
        let mut notes = Vec::new();
        if let Some(id) = chart.hovered() {
            notes.push(format!("hovered: {id}"));
        }
        let regions = chart.visible_toggles();
        if !regions.is_empty() {
            notes.push(format!("regions shown: {}", regions.join(", ")));
        }
        Self {
            id: chart.kind.container_id().to_string(),
            heading: chart.scene.title.clone(),
            svg: svg::render_instance(chart),
            state: notes.join("; "),
        }
    }
}

#[derive(Serialize)]
struct Context<'a> {
    title: &'a str,
    charts: &'a [ReportChart],
}

pub fn render_report(title: &str, charts: &[ReportChart]) -> Result<String> {
    let mut template = TinyTemplate::new();
    template.add_template("index", include_str!("./template/index.html.tt"))?;
    Ok(template.render("index", &Context { title, charts })?)
}

/// Render the report into `<dir>/index.html`.
pub fn write_report(dir: &Path, title: &str, charts: &[ReportChart]) -> Result<PathBuf> {
    let text = render_report(title, charts)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(INDEX_FILE_NAME);
    let mut file = File::create(&path)?;
    file.write_all(text.as_bytes())?;
    file.flush()?;
    tracing::info!(path = %path.display(), charts = charts.len(), "wrote report");
    Ok(path)
}

/// Write `<dir>/<kind>.svg` for a chart.
pub fn write_svg(dir: &Path, chart: &ChartInstance) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.svg", chart.kind));
    fs::write(&path, svg::render_instance(chart))?;
    tracing::info!(path = %path.display(), "wrote svg");
    Ok(path)
}
