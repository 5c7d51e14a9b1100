// File: crates/chart-core/src/error.rs
// Summary: Error and Result types shared by the loader, encoder and renderers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("failed to fetch dataset '{name}'")]
    Fetch {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP request for '{url}' failed: {reason}")]
    Http { url: String, reason: String },

    #[error("CSV parse error in '{name}': {source}")]
    Csv {
        name: String,
        #[source]
        source: csv::Error,
    },

    #[error("dataset '{0}' has no header row")]
    MissingHeader(String),

    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("template error: {0}")]
    Template(#[from] tinytemplate::error::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("raster error: {0}")]
    Raster(String),

    #[error("no mark with id '{0}'")]
    UnknownMark(String),

    #[error("no toggleable region named '{0}'")]
    UnknownRegion(String),
}

pub type Result<T> = std::result::Result<T, ChartError>;
