//! Metric sinks for assertions
//!
//! [`RecordingMetricSink`] keeps every emitted metric in memory;
//! [`FailingMetricSink`] rejects everything so callers can prove emission
//! failures are swallowed.

use std::sync::Mutex;

use anyhow::{Result, bail};
use trellis_core::{Metric, MetricSink};

/// Records every metric it receives.
#[derive(Debug, Default)]
pub struct RecordingMetricSink {
  metrics: Mutex<Vec<Metric>>,
}

impl RecordingMetricSink {
  pub fn new() -> Self {
    Self::default()
  }

  /// Snapshot of everything recorded so far.
  pub fn metrics(&self) -> Vec<Metric> {
    self.metrics.lock().map(|m| m.clone()).unwrap_or_default()
  }

  /// Recorded metrics with the given name.
  pub fn named(&self, name: &str) -> Vec<Metric> {
    self.metrics().into_iter().filter(|m| m.name == name).collect()
  }
}

impl MetricSink for RecordingMetricSink {
  fn emit(&self, metric: &Metric) -> Result<()> {
    match self.metrics.lock() {
      Ok(mut metrics) => {
        metrics.push(metric.clone());
        Ok(())
      }
      Err(_) => bail!("metric recorder poisoned"),
    }
  }
}

/// Fails every emission.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingMetricSink;

impl MetricSink for FailingMetricSink {
  fn emit(&self, _metric: &Metric) -> Result<()> {
    bail!("metric transport unavailable")
  }
}
