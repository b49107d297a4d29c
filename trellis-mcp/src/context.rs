//! Shared server context available to all tool handlers.
//!
//! Built once at startup from the configuration map and shared read-only
//! across requests. Dropping it closes every binding's connection pool.

use std::sync::Arc;

use anyhow::{Context, Result};
use trellis_agent::{AgentConfig, SupportAgent};
use trellis_bitbucket::CodeHost;
use trellis_confluence::Wiki;
use trellis_core::{ClientOptions, ConfigMap, Deployment, MetricSink, ToolError};
use trellis_jira::IssueTracker;

use crate::registry::Registry;

pub struct ServerContext {
  pub deployment: Deployment,
  pub registry: Registry,
  pub tracker: Arc<dyn IssueTracker>,
  pub wiki: Arc<dyn Wiki>,
  pub code: Arc<dyn CodeHost>,
  pub agent: Option<SupportAgent>,
  pub metrics: Arc<dyn MetricSink>,
}

impl ServerContext {
  /// Select the platform, then build the bindings and the optional agent.
  pub fn from_config(config: &ConfigMap, options: ClientOptions) -> Result<Self> {
    let deployment = Deployment::select(config)?;
    let metrics = Arc::clone(&options.metrics);

    let tracker = trellis_jira::connect(config, deployment, options.clone()).context("Failed to build Jira binding")?;
    let wiki =
      trellis_confluence::connect(config, deployment, options.clone()).context("Failed to build Confluence binding")?;
    let code = trellis_bitbucket::connect(config, deployment, options).context("Failed to build Bitbucket binding")?;

    let agent = AgentConfig::from_config(config)
      .context("Invalid support agent configuration")?
      .map(|agent_config| SupportAgent::new(agent_config, Arc::clone(&tracker), Arc::clone(&wiki), Arc::clone(&code)));

    tracing::info!(
      platform = deployment.label(),
      jira = tracker.available(),
      confluence = wiki.available(),
      bitbucket = code.available(),
      agent = agent.is_some(),
      "Server context ready"
    );

    Ok(Self {
      deployment,
      registry: Registry::new(),
      tracker,
      wiki,
      code,
      agent,
      metrics,
    })
  }

  /// The support agent, or the canonical not-configured error.
  pub fn agent(&self) -> Result<&SupportAgent, ToolError> {
    self.agent.as_ref().ok_or(ToolError::AgentNotConfigured)
  }
}

#[cfg(test)]
mod tests {
  use trellis_test_utils::{cloud_config, config_map, data_center_config, fast_client_options};

  use super::*;

  #[test]
  fn test_cloud_context_without_agent() {
    let context = ServerContext::from_config(&cloud_config("http://127.0.0.1:9"), fast_client_options()).unwrap();
    assert_eq!(context.deployment, Deployment::Cloud);
    assert!(context.tracker.available());
    assert!(context.code.available());
    assert_eq!(
      context.agent().err().map(|e| e.to_string()).as_deref(),
      Some("Ticket support agent not configured")
    );
  }

  #[test]
  fn test_data_center_context() {
    let context = ServerContext::from_config(&data_center_config("http://127.0.0.1:9"), fast_client_options()).unwrap();
    assert_eq!(context.deployment, Deployment::DataCenter);
    assert_eq!(context.wiki.deployment(), Deployment::DataCenter);
  }

  #[test]
  fn test_agent_configured_from_team() {
    let config = config_map([("AGENT_PRIMARY_TEAM", r#"[{"account_id": "u1", "name": "Ana"}]"#)]);
    let context = ServerContext::from_config(&config, fast_client_options()).unwrap();
    assert!(context.agent().is_ok());
    assert!(!context.tracker.available());
  }

  #[test]
  fn test_startup_errors() {
    let config = config_map([("AGENT_SECONDARY_TEAM", "{broken")]);
    let err = ServerContext::from_config(&config, fast_client_options()).err().unwrap();
    assert!(format!("{err:#}").contains("AGENT_SECONDARY_TEAM"));

    let config = config_map([("DEPLOYMENT_TYPE", "hybrid")]);
    assert!(ServerContext::from_config(&config, fast_client_options()).is_err());
  }
}
