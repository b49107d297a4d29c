//! # Trellis Core Library
//!
//! Shared plumbing for the trellis backend bindings and the MCP server:
//! identifier validation, per-service auth contexts, the retrying HTTP client,
//! Cloud / Data Center platform selection, the `ToolError` taxonomy and the
//! telemetry seams (metric sink and tool scope).

pub mod auth;
pub mod config;
pub mod consts;
pub mod error;
pub mod http;
pub mod platform;
pub mod telemetry;
pub mod url;
pub mod validate;

pub use auth::{AuthContext, Credential, Service};
pub use config::ConfigMap;
pub use error::{ToolError, ToolResult};
pub use http::{ApiRequest, ApiResponse, ClientOptions, HttpClient, RetryPolicy};
pub use platform::Deployment;
pub use telemetry::{Metric, MetricSink, MetricUnit, NoopMetricSink, TracingMetricSink};
