//! Test utilities shared across the trellis workspace
//!
//! This crate provides common testing infrastructure including:
//! - Configuration fixtures for Cloud and Data Center deployments ([`config`])
//! - Metric sinks that record or reject emissions ([`RecordingMetricSink`], [`FailingMetricSink`])
//! - Client options without retry backoff ([`fast_client_options`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod config;
pub mod metrics;

pub use config::{cloud_config, config_map, data_center_config, fast_client_options};
pub use metrics::{FailingMetricSink, RecordingMetricSink};
