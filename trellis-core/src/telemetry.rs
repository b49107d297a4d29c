//! # Telemetry Seams
//!
//! Metrics leave the process through a [`MetricSink`]; the transport behind
//! it is somebody else's concern. Emission failures are logged and dropped
//! so a broken sink can never fail a tool call.
//!
//! The name of the tool being executed travels in a task-local set by the
//! request handler, which lets the HTTP client tag every outbound request
//! without threading the name through each binding signature.

use std::fmt;
use std::future::Future;

use anyhow::Result;

tokio::task_local! {
  static CURRENT_TOOL: String;
}

/// Unit attached to a metric datum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricUnit {
  Count,
  Milliseconds,
}

impl fmt::Display for MetricUnit {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Count => f.write_str("Count"),
      Self::Milliseconds => f.write_str("Milliseconds"),
    }
  }
}

/// A single metric datum with its dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
  pub name: &'static str,
  pub value: f64,
  pub unit: MetricUnit,
  pub dimensions: Vec<(&'static str, String)>,
}

impl Metric {
  /// A count of one.
  pub fn count(name: &'static str) -> Self {
    Self {
      name,
      value: 1.0,
      unit: MetricUnit::Count,
      dimensions: Vec::new(),
    }
  }

  /// A duration in milliseconds.
  pub fn millis(name: &'static str, value: f64) -> Self {
    Self {
      name,
      value,
      unit: MetricUnit::Milliseconds,
      dimensions: Vec::new(),
    }
  }

  pub fn dimension(mut self, key: &'static str, value: impl Into<String>) -> Self {
    self.dimensions.push((key, value.into()));
    self
  }

  /// Look up a dimension value by key.
  pub fn get(&self, key: &str) -> Option<&str> {
    self
      .dimensions
      .iter()
      .find(|(k, _)| *k == key)
      .map(|(_, v)| v.as_str())
  }
}

/// Destination for metrics. Implementations must be safe to share across tasks.
pub trait MetricSink: Send + Sync {
  fn emit(&self, metric: &Metric) -> Result<()>;
}

/// Writes metrics as structured events on the `trellis::metrics` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMetricSink;

impl MetricSink for TracingMetricSink {
  fn emit(&self, metric: &Metric) -> Result<()> {
    let dimensions = serde_json::to_string(&metric.dimensions)?;
    tracing::info!(
      target: "trellis::metrics",
      metric = metric.name,
      value = metric.value,
      unit = %metric.unit,
      dimensions = %dimensions,
      "metric"
    );
    Ok(())
  }
}

/// Discards every metric.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetricSink;

impl MetricSink for NoopMetricSink {
  fn emit(&self, _metric: &Metric) -> Result<()> {
    Ok(())
  }
}

/// Emit a metric, swallowing sink failures.
pub fn emit(sink: &dyn MetricSink, metric: Metric) {
  if let Err(e) = sink.emit(&metric) {
    tracing::debug!(metric = metric.name, error = %e, "Metric emission failed");
  }
}

/// Run `future` with `tool` recorded as the current tool name.
pub async fn tool_scope<F: Future>(tool: impl Into<String>, future: F) -> F::Output {
  CURRENT_TOOL.scope(tool.into(), future).await
}

/// Name of the tool being executed on this task, or `"unknown"`.
pub fn current_tool() -> String {
  CURRENT_TOOL
    .try_with(Clone::clone)
    .unwrap_or_else(|_| "unknown".to_string())
}
