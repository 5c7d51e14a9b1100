// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; loads datasets and encodes them into interactive chart scenes.

pub mod error;
pub mod types;
pub mod theme;
pub mod config;
pub mod schema;
pub mod source;
pub mod dataset;
pub mod scale;
pub mod geometry;
pub mod series;
pub mod scene;
pub mod axis;
pub mod interaction;
pub mod chart;
pub mod charts;
pub mod host;
pub mod svg;
pub mod report;

pub use error::{ChartError, Result};
pub use types::{Insets, Layout};
pub use theme::{Color, Theme};
pub use config::{EncodingConfig, Timings};
pub use schema::{Measure, Schema, Table};
pub use source::{DataSource, DirSource, HttpSource, MemorySource};
pub use scale::{BandScale, LinearScale, OrdinalScale};
pub use geometry::Point;
pub use series::Series;
pub use scene::{Layer, Mark, MarkId, MarkState, Scene};
pub use interaction::{PointerEvent, ToggleState, Tooltip};
pub use chart::{ChartData, ChartInstance, ChartKind};
pub use host::{BuildOutcome, ChartHost, PendingBuild, RequestToken};
