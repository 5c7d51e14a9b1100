// File: crates/cli/src/cli.rs
// Summary: Command-line arguments for the wattchart binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use wattchart_core::types::WIDTH;

#[derive(Parser, Debug)]
#[command(name = "wattchart")]
#[command(author, version, about = "Render TV energy and electricity price charts")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv for more); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// TOML file overriding encoding constants
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build every chart and write SVG files plus an HTML report
    Render(RenderArgs),

    /// Print scale domains and donut shares for every chart
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Directory holding the CSV datasets (an http(s) URL is fetched remotely)
    #[arg(long, default_value = "data", conflicts_with = "base_url")]
    pub data: PathBuf,

    /// Fetch datasets over HTTP from this base URL instead
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Container width in pixels
    #[arg(long, default_value_t = WIDTH)]
    pub width: f64,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Container width in pixels; repeat to resize, each later width rebuilds every chart
    #[arg(long, default_values_t = [WIDTH])]
    pub width: Vec<f64>,

    /// Output directory
    #[arg(short, long, default_value = "out")]
    pub out: PathBuf,

    /// Also rasterise each chart to PNG
    #[arg(long)]
    pub png: bool,

    /// Device pixels per chart pixel for PNG output
    #[arg(long, default_value_t = 1.0)]
    pub scale: f32,

    /// Line chart region to show (QLD, NSW, VIC, SA, TAS, Snowy); repeatable
    #[arg(long = "show-region")]
    pub show_region: Vec<String>,

    /// Render a hovered mark, as <chart>:<mark>, e.g. bar:LED or line:Average:2008
    #[arg(long)]
    pub hover: Vec<String>,

    /// Theme preset name (light, dark); overrides the config file
    #[arg(long)]
    pub theme: Option<String>,
}
