//! Configuration fixtures
//!
//! Builds [`ConfigMap`]s pointing every service at a mock server so binding
//! tests never read the real process environment.

use std::sync::Arc;

use trellis_core::{ClientOptions, ConfigMap, NoopMetricSink, RetryPolicy};

/// Build a config map from literal pairs.
pub fn config_map<const N: usize>(pairs: [(&str, &str); N]) -> ConfigMap {
  ConfigMap::from_pairs(pairs)
}

/// Complete Cloud configuration with every service rooted at `base_url`.
///
/// The Bitbucket API root is `{base_url}/2.0`, mirroring the public API layout.
pub fn cloud_config(base_url: &str) -> ConfigMap {
  ConfigMap::from_pairs([
    ("ATLASSIAN_BASE_URL", base_url.to_string()),
    ("ATLASSIAN_USERNAME", "test_user".to_string()),
    ("ATLASSIAN_API_TOKEN", "test_token".to_string()),
    ("BITBUCKET_API_TOKEN", "bb_token".to_string()),
    ("BITBUCKET_WORKSPACE", "acme".to_string()),
    ("BITBUCKET_API_URL", format!("{base_url}/2.0")),
  ])
}

/// Complete Data Center configuration with every service rooted at `base_url`.
pub fn data_center_config(base_url: &str) -> ConfigMap {
  ConfigMap::from_pairs([
    ("JIRA_BASE_URL", base_url),
    ("JIRA_PAT_TOKEN", "jira-pat"),
    ("CONFLUENCE_BASE_URL", base_url),
    ("CONFLUENCE_PAT_TOKEN", "confluence-pat"),
    ("BITBUCKET_BASE_URL", base_url),
    ("BITBUCKET_PAT_TOKEN", "bitbucket-pat"),
    ("BITBUCKET_PROJECT", "OPS"),
  ])
}

/// Client options with the production retry budget but no backoff delay and
/// metrics discarded.
pub fn fast_client_options() -> ClientOptions {
  ClientOptions::default()
    .with_retry(RetryPolicy::immediate())
    .with_metrics(Arc::new(NoopMetricSink))
}
