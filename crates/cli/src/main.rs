// File: crates/cli/src/main.rs
// Summary: Loads the datasets, builds every chart (with resizes), applies requested interactions and writes output.

mod cli;

use std::io;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wattchart_core::charts::{bar, donut, line, scatter};
use wattchart_core::report::{self, ReportChart};
use wattchart_core::source::is_remote_url;
use wattchart_core::{
    ChartData, ChartHost, ChartInstance, ChartKind, DataSource, DirSource, EncodingConfig, HttpSource,
};
use wattchart_render_skia::{RasterOptions, SkiaRenderer};

use crate::cli::{Cli, Commands, InspectArgs, RenderArgs, SourceArgs};

const REPORT_TITLE: &str = "TV Energy Consumption and Electricity Prices";

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).try_init();

    let config = match &cli.config {
        Some(path) => EncodingConfig::load(path).with_context(|| format!("failed to load config '{}'", path.display()))?,
        None => EncodingConfig::default(),
    };

    match cli.command {
        Commands::Render(args) => run_render(args, config),
        Commands::Inspect(args) => run_inspect(args, &config),
    }
}

fn open_source(args: &SourceArgs) -> Box<dyn DataSource> {
    if let Some(url) = &args.base_url {
        return Box::new(HttpSource::new(url.clone()));
    }
    let data = args.data.to_string_lossy();
    if is_remote_url(&data) {
        Box::new(HttpSource::new(data.into_owned()))
    } else {
        Box::new(DirSource::new(args.data.clone()))
    }
}

fn run_render(args: RenderArgs, mut config: EncodingConfig) -> Result<()> {
    if let Some(theme) = &args.theme {
        config.theme = theme.clone();
    }
    let source = open_source(&args.source);
    let widths = args.width.clone();
    let Some((&first, resizes)) = widths.split_first() else {
        bail!("at least one --width is required");
    };

    let renderer = args.png.then(|| SkiaRenderer::new(RasterOptions { scale: args.scale, ..RasterOptions::default() }));
    let mut cards = Vec::new();

    for kind in ChartKind::ALL {
        let mut host = ChartHost::new(kind, source.as_ref(), config.clone(), first);
        let mut outcome = host.rebuild(first);
        for &w in resizes {
            outcome = host.resize(w);
        }
        let Some(chart) = host.instance_mut() else {
            tracing::warn!(chart = %kind, ?outcome, "chart left blank");
            continue;
        };
        apply_interactions(chart, &args)?;

        let svg = report::write_svg(&args.out, chart)?;
        println!("Wrote {}", svg.display());
        if let Some(renderer) = &renderer {
            let png = renderer.write_png(&args.out, chart).with_context(|| format!("failed to rasterise {kind}"))?;
            println!("Wrote {}", png.display());
        }
        cards.push(ReportChart::from_instance(chart));
        host.clear();
    }

    let index = report::write_report(&args.out, REPORT_TITLE, &cards)?;
    println!("Wrote {}", index.display());
    Ok(())
}

/// Region toggles and hover requests from the command line, applied to one chart.
fn apply_interactions(chart: &mut ChartInstance, args: &RenderArgs) -> Result<()> {
    if chart.kind == ChartKind::Line {
        for region in &args.show_region {
            chart.toggle(region).with_context(|| format!("cannot show region '{region}'"))?;
        }
    }
    for spec in &args.hover {
        let Some((name, key)) = spec.split_once(':') else {
            bail!("--hover expects <chart>:<mark>, got '{spec}'");
        };
        let target: ChartKind = name.parse().map_err(anyhow::Error::msg)?;
        if target != chart.kind {
            continue;
        }
        let (id, at) = chart
            .scene
            .marks()
            .find(|m| m.matches(key))
            .map(|m| (m.id.clone(), m.anchor()))
            .with_context(|| format!("no mark '{key}' on the {} chart", chart.kind))?;
        chart.pointer_enter(&id, at)?;
    }
    Ok(())
}

fn run_inspect(args: InspectArgs, config: &EncodingConfig) -> Result<()> {
    let source = open_source(&args.source);
    for kind in ChartKind::ALL {
        let data = kind.load(source.as_ref()).with_context(|| format!("failed to load {kind} data"))?;
        let layout = kind.layout(args.width, config);
        println!("[{kind}]");
        match &data {
            ChartData::Bar(rows) => {
                let s = bar::scales(rows, &layout, config);
                println!("  x domain: {:?}", s.x.domain());
                println!("  y domain: {:?}", s.y.domain());
                println!("  bandwidth: {:.1}px", s.x.bandwidth());
            }
            ChartData::Donut(rows) => {
                let counts: Vec<usize> = rows.iter().map(|r| r.count).collect();
                for (i, row) in rows.iter().enumerate() {
                    println!("  {}: {} models, {:.1}%", row.technology, row.count, donut::share_pct(&counts, i));
                }
            }
            ChartData::Line(rows) => {
                let s = line::scales(rows, &layout, config);
                println!("  x domain: {:?}", s.x.domain());
                println!("  y domain: {:?}", s.y.domain());
                println!("  years: {}", rows.len());
            }
            ChartData::Scatter(rows) => {
                let s = scatter::scales(rows, &layout, config);
                println!("  x domain: {:?}", s.x.domain());
                println!("  y domain: {:?}", s.y.domain());
                println!("  technologies: {:?}", s.color.domain());
            }
        }
    }
    Ok(())
}
