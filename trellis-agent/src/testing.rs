//! Agent fixtures backed by real bindings pointed at a mock server.

use trellis_core::{ConfigMap, Deployment};
use trellis_test_utils::{config_map, fast_client_options};

use crate::{AgentConfig, SupportAgent};

/// Build an agent whose bindings read `bindings` and whose own settings come
/// from `agent_pairs`.
pub(crate) fn agent_with<const N: usize>(
  bindings: &ConfigMap,
  deployment: Deployment,
  agent_pairs: [(&str, &str); N],
) -> SupportAgent {
  let config = AgentConfig::from_config(&config_map(agent_pairs))
    .expect("valid agent config")
    .expect("agent configured");
  let tracker = trellis_jira::connect(bindings, deployment, fast_client_options()).expect("tracker");
  let wiki = trellis_confluence::connect(bindings, deployment, fast_client_options()).expect("wiki");
  let code = trellis_bitbucket::connect(bindings, deployment, fast_client_options()).expect("code host");
  SupportAgent::new(config, tracker, wiki, code)
}

/// Agent configured with a single template rule on `customfield_100`.
pub(crate) fn agent_with_field(bindings: &ConfigMap, deployment: Deployment) -> SupportAgent {
  agent_with(
    bindings,
    deployment,
    [(
      "AGENT_TEMPLATE_MAPPING",
      r#"{"Support Request": {"parent_page": "Request Templates", "custom_field": "customfield_100"}}"#,
    )],
  )
}
