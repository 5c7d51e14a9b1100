// File: crates/chart-core/src/host.rs
// Summary: Per-chart host owning container width, the live instance and rebuild request tokens.
// Notes:
// - Every rebuild draws a fresh token from the generation counter; only the
//   newest token may commit, so a slow fetch that finishes after a resize
//   is dropped instead of drawn over the newer chart.
// - Committing tears the previous instance down first, leaving one tooltip.

use crate::chart::{ChartData, ChartInstance, ChartKind};
use crate::config::EncodingConfig;
use crate::error::Result;
use crate::source::DataSource;

/// Identifies one rebuild request. Stale once a newer request is issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
}

/// A rebuild in flight: the width it was requested at and its token.
#[derive(Debug)]
pub struct PendingBuild {
    pub token: RequestToken,
    pub width: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildOutcome {
    Committed,
    /// A newer request exists; the result was dropped.
    Discarded,
    /// Fetch or parse failed; the container is left blank.
    Failed,
}

pub struct ChartHost<S: DataSource> {
    kind: ChartKind,
    source: S,
    config: EncodingConfig,
    width: f64,
    generation: u64,
    instance: Option<ChartInstance>,
}

impl<S: DataSource> ChartHost<S> {
    pub fn new(kind: ChartKind, source: S, config: EncodingConfig, width: f64) -> Self {
        Self { kind, source, config, width, generation: 0, instance: None }
    }

    pub fn kind(&self) -> ChartKind { self.kind }

    pub fn width(&self) -> f64 { self.width }

    pub fn instance(&self) -> Option<&ChartInstance> { self.instance.as_ref() }

    pub fn instance_mut(&mut self) -> Option<&mut ChartInstance> { self.instance.as_mut() }

    /// Record the new width and issue a token that invalidates all earlier ones.
    pub fn begin_rebuild(&mut self, width: f64) -> PendingBuild {
        self.generation += 1;
        self.width = width;
        tracing::debug!(chart = %self.kind, width, generation = self.generation, "rebuild requested");
        PendingBuild { token: RequestToken(self.generation), width }
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.generation
    }

    /// Fetch and type the chart's datasets. Does not touch the live instance.
    pub fn fetch(&self) -> Result<ChartData> {
        self.kind.load(&self.source)
    }

    /// Finish a rebuild with the outcome of its fetch.
    pub fn complete(&mut self, pending: PendingBuild, data: Result<ChartData>) -> BuildOutcome {
        if !self.is_current(pending.token) {
            tracing::debug!(
                chart = %self.kind,
                stale = pending.token.0,
                current = self.generation,
                "discarding stale build"
            );
            return BuildOutcome::Discarded;
        }
        self.clear();
        match data {
            Ok(data) => {
                let instance = data.build(pending.width, &self.config);
                tracing::debug!(chart = %self.kind, width = pending.width, marks = instance.scene.marks().count(), "chart built");
                self.instance = Some(instance);
                BuildOutcome::Committed
            }
            Err(err) => {
                tracing::error!(chart = %self.kind, error = %err, "error loading the data");
                BuildOutcome::Failed
            }
        }
    }

    /// Full rebuild at `width`: issue a token, fetch, commit.
    pub fn rebuild(&mut self, width: f64) -> BuildOutcome {
        let pending = self.begin_rebuild(width);
        let data = self.fetch();
        self.complete(pending, data)
    }

    /// Resize is a full rebuild; toggle and hover state reset.
    pub fn resize(&mut self, width: f64) -> BuildOutcome {
        self.rebuild(width)
    }

    /// Tear down the live instance, leaving the container empty.
    pub fn clear(&mut self) {
        if let Some(old) = self.instance.take() {
            old.teardown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::TECH_55_INCH;
    use crate::source::MemorySource;

    const BARS: &str = "Screen_Tech,Mean(Labelled energy consumption (kWh/year))\nLED,120\nOLED,150\n";

    fn host() -> ChartHost<MemorySource> {
        let src = MemorySource::new().with(TECH_55_INCH, BARS);
        ChartHost::new(ChartKind::Bar, src, EncodingConfig::default(), 640.0)
    }

    #[test]
    fn newer_request_invalidates_older() {
        let mut h = host();
        let first = h.begin_rebuild(640.0);
        let second = h.begin_rebuild(500.0);
        assert!(!h.is_current(first.token));
        let data = h.fetch();
        assert_eq!(h.complete(first, data), BuildOutcome::Discarded);
        assert!(h.instance().is_none());
        let data = h.fetch();
        assert_eq!(h.complete(second, data), BuildOutcome::Committed);
        assert_eq!(h.instance().map(|i| i.layout.width), Some(500.0));
    }

    #[test]
    fn failed_fetch_leaves_container_blank() {
        let mut h = ChartHost::new(ChartKind::Line, MemorySource::new(), EncodingConfig::default(), 640.0);
        assert_eq!(h.rebuild(640.0), BuildOutcome::Failed);
        assert!(h.instance().is_none());
    }
}
