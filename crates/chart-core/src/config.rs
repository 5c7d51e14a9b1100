// File: crates/chart-core/src/config.rs
// Summary: Encoding constants (headroom, label threshold, padding, timings) loadable from TOML.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::theme::{self, Theme};
use crate::types::HEIGHT;

/// Transition durations attached to state changes, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Timings {
    pub show_ms: u32,
    pub hide_ms: u32,
    pub toggle_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self { show_ms: 200, hide_ms: 500, toggle_ms: 300 }
    }
}

/// Tunable constants of the data-to-visual encoding.
///
/// Every field has a default, so an empty TOML document is a valid config.
///
/// ```toml
/// domain_headroom = 1.25
/// label_threshold_pct = 5.0
///
/// [timings]
/// hide_ms = 250
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodingConfig {
    /// Multiplier applied to the data maximum of zero-based linear domains.
    pub domain_headroom: f64,
    /// Minimum share of the whole, in percent, for a donut arc to get a label.
    pub label_threshold_pct: f64,
    /// Inner and outer padding of band scales, as a fraction of the step.
    pub band_padding: f64,
    /// Tooltip offset from the pointer, in pixels.
    pub tooltip_offset: (f64, f64),
    /// Container height; the width comes from the host.
    pub height: f64,
    pub timings: Timings,
    /// Theme preset name, see [`theme::presets`].
    pub theme: String,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            domain_headroom: 1.1,
            label_threshold_pct: 10.0,
            band_padding: 0.3,
            tooltip_offset: (10.0, -28.0),
            height: HEIGHT,
            timings: Timings::default(),
            theme: "light".to_string(),
        }
    }
}

impl EncodingConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded encoding config");
        Ok(config)
    }

    pub fn theme(&self) -> Theme {
        theme::find(&self.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = EncodingConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, EncodingConfig::default());
        assert_eq!(cfg.timings.show_ms, 200);
        assert_eq!(cfg.timings.hide_ms, 500);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = EncodingConfig::from_toml_str(
            "label_threshold_pct = 5.0\ntooltip_offset = [12.0, -20.0]\n[timings]\nhide_ms = 250\n",
        )
        .unwrap();
        assert_eq!(cfg.label_threshold_pct, 5.0);
        assert_eq!(cfg.tooltip_offset, (12.0, -20.0));
        assert_eq!(cfg.timings.hide_ms, 250);
        assert_eq!(cfg.timings.show_ms, 200);
        assert_eq!(cfg.domain_headroom, 1.1);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(EncodingConfig::from_toml_str("headroom = 2.0").is_err());
    }
}
