//! # Support Agent
//!
//! [`SupportAgent`] owns the agent configuration and shared handles to the
//! three bindings. Each flow lives in its own module as an `impl SupportAgent`
//! block; this module holds what they share.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value, json};
use trellis_bitbucket::CodeHost;
use trellis_confluence::Wiki;
use trellis_core::ToolResult;
use trellis_jira::IssueTracker;

use crate::config::AgentConfig;
use crate::field::CustomFieldValue;

/// Stateless context builder over the tracker, wiki and code host.
pub struct SupportAgent {
  config: AgentConfig,
  tracker: Arc<dyn IssueTracker>,
  wiki: Arc<dyn Wiki>,
  code: Arc<dyn CodeHost>,
}

impl SupportAgent {
  pub fn new(
    config: AgentConfig,
    tracker: Arc<dyn IssueTracker>,
    wiki: Arc<dyn Wiki>,
    code: Arc<dyn CodeHost>,
  ) -> Self {
    Self {
      config,
      tracker,
      wiki,
      code,
    }
  }

  pub fn config(&self) -> &AgentConfig {
    &self.config
  }

  pub(crate) fn tracker(&self) -> &dyn IssueTracker {
    self.tracker.as_ref()
  }

  pub(crate) fn wiki(&self) -> &dyn Wiki {
    self.wiki.as_ref()
  }

  pub(crate) fn code(&self) -> &dyn CodeHost {
    self.code.as_ref()
  }

  /// The loaded configuration, for the `get_agent_config` tool.
  pub fn describe(&self) -> ToolResult {
    let config = &self.config;
    let template_mapping: Map<String, Value> = config
      .template_mapping
      .iter()
      .map(|(issue_type, rule)| (issue_type.clone(), json!(rule)))
      .collect();

    Ok(json!({
      "configured": true,
      "primary_team": config.primary_team,
      "secondary_team": config.secondary_team,
      "template_mapping": template_mapping,
      "excluded_issue_types": config.excluded_issue_types,
      "workload_statuses": config.workload_statuses,
      "support_jql": config.support_jql,
      "troubleshooting_parent": config.troubleshooting_parent,
      "alert_expertise_jql": config.alert_expertise_jql,
      "other_expertise_jql": config.other_expertise_jql,
    }))
  }

  /// Normalised custom field of an issue, using the rule for its type.
  pub(crate) fn custom_field(&self, fields: &Value) -> Option<CustomFieldValue> {
    let field_id = self.config.custom_field_for(issue_type(fields))?;
    CustomFieldValue::from_fields(fields, field_id)
  }
}

/// `{id, title}` of a wiki page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRef {
  pub id: String,
  pub title: String,
}

impl PageRef {
  pub(crate) fn from_value(page: &Value) -> Option<Self> {
    Some(Self {
      id: id_string(&page["id"])?,
      title: page["title"].as_str().unwrap_or_default().to_string(),
    })
  }
}

/// `{key, summary}` of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueRef {
  pub key: String,
  pub summary: String,
}

impl IssueRef {
  pub(crate) fn from_value(issue: &Value) -> Self {
    Self {
      key: issue["key"].as_str().unwrap_or_default().to_string(),
      summary: summary(&issue["fields"]).to_string(),
    }
  }
}

pub(crate) fn issue_type(fields: &Value) -> &str {
  fields["issuetype"]["name"].as_str().unwrap_or_default()
}

pub(crate) fn summary(fields: &Value) -> &str {
  fields["summary"].as_str().unwrap_or_default()
}

/// Items of a paged listing (`issues` for Jira, `results` for Confluence).
pub(crate) fn items<'a>(response: &'a Value, key: &str) -> &'a [Value] {
  response[key].as_array().map(Vec::as_slice).unwrap_or_default()
}

/// Page ids come back as strings on Confluence and occasionally as numbers.
fn id_string(value: &Value) -> Option<String> {
  match value {
    Value::String(id) => Some(id.clone()),
    Value::Number(id) => Some(id.to_string()),
    _ => None,
  }
}
