//! # Agent Configuration
//!
//! Loaded once at startup from the `AGENT_*` keys. List-valued settings are
//! JSON in the variable's value; malformed JSON is a startup error naming
//! the key. The template mapping keeps its configured order because the
//! first entry picks the custom field used for classification.

use anyhow::{Context, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use trellis_core::ConfigMap;

use crate::consts::{
  DEFAULT_SUPPORT_JQL, ENV_ALERT_EXPERTISE_JQL, ENV_EXCLUDED_TYPES, ENV_OTHER_EXPERTISE_JQL, ENV_PRIMARY_TEAM,
  ENV_SECONDARY_TEAM, ENV_SUPPORT_JQL, ENV_TEMPLATE_MAPPING, ENV_TROUBLESHOOTING_PARENT, ENV_WORKLOAD_STATUSES,
};

/// A member of the support rota.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
  pub account_id: String,
  pub name: String,
}

/// Where the templates for one issue type live, and which custom field
/// discriminates its tickets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRule {
  /// Wiki page title or numeric page id.
  #[serde(deserialize_with = "string_or_number")]
  pub parent_page: String,
  pub custom_field: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentConfig {
  pub primary_team: Vec<TeamMember>,
  pub secondary_team: Vec<TeamMember>,
  /// Issue type name to template rule, in configured order.
  pub template_mapping: Vec<(String, TemplateRule)>,
  pub excluded_issue_types: Vec<String>,
  pub workload_statuses: Vec<String>,
  pub support_jql: String,
  pub troubleshooting_parent: Option<String>,
  pub alert_expertise_jql: Option<String>,
  pub other_expertise_jql: Option<String>,
}

impl AgentConfig {
  /// Load the agent configuration. Returns `Ok(None)` when none of the team
  /// or template settings are present.
  pub fn from_config(config: &ConfigMap) -> Result<Option<Self>> {
    let configured = [ENV_PRIMARY_TEAM, ENV_SECONDARY_TEAM, ENV_TEMPLATE_MAPPING]
      .iter()
      .any(|key| config.has(key));
    if !configured {
      return Ok(None);
    }

    let template_mapping = match config.get_json::<Map<String, Value>>(ENV_TEMPLATE_MAPPING)? {
      Some(entries) => entries
        .into_iter()
        .map(|(issue_type, rule)| {
          let rule = serde_json::from_value::<TemplateRule>(rule)
            .with_context(|| format!("{ENV_TEMPLATE_MAPPING} entry '{issue_type}' is invalid"))?;
          Ok((issue_type, rule))
        })
        .collect::<Result<Vec<_>>>()?,
      None => Vec::new(),
    };

    let owned = |key: &str| config.get(key).map(str::to_string);

    Ok(Some(Self {
      primary_team: config.get_json(ENV_PRIMARY_TEAM)?.unwrap_or_default(),
      secondary_team: config.get_json(ENV_SECONDARY_TEAM)?.unwrap_or_default(),
      template_mapping,
      excluded_issue_types: config.get_json(ENV_EXCLUDED_TYPES)?.unwrap_or_default(),
      workload_statuses: config.get_json(ENV_WORKLOAD_STATUSES)?.unwrap_or_default(),
      support_jql: config.get_or(ENV_SUPPORT_JQL, DEFAULT_SUPPORT_JQL).to_string(),
      troubleshooting_parent: owned(ENV_TROUBLESHOOTING_PARENT),
      alert_expertise_jql: owned(ENV_ALERT_EXPERTISE_JQL),
      other_expertise_jql: owned(ENV_OTHER_EXPERTISE_JQL),
    }))
  }

  /// Template rule for an issue type.
  pub fn template_for(&self, issue_type: &str) -> Option<&TemplateRule> {
    self
      .template_mapping
      .iter()
      .find(|(name, _)| name == issue_type)
      .map(|(_, rule)| rule)
  }

  /// Custom field of the first template rule.
  pub fn primary_custom_field(&self) -> Option<&str> {
    self
      .template_mapping
      .first()
      .map(|(_, rule)| rule.custom_field.as_str())
  }

  /// Custom field for an issue type, falling back to the first rule's.
  pub fn custom_field_for(&self, issue_type: &str) -> Option<&str> {
    self
      .template_for(issue_type)
      .map(|rule| rule.custom_field.as_str())
      .or_else(|| self.primary_custom_field())
  }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
  match Value::deserialize(deserializer)? {
    Value::String(s) => Ok(s),
    Value::Number(n) => Ok(n.to_string()),
    other => Err(D::Error::custom(format!("expected a page title or id, got {other}"))),
  }
}
