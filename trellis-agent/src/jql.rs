//! JQL built by the agent: team-workload queries and expertise templates.

use trellis_jira::jql::{escape, quote};

/// Issues assigned to `account_id` in one of `statuses`, minus excluded types.
pub fn workload(account_id: &str, statuses: &[String], excluded_types: &[String]) -> String {
  let statuses: Vec<String> = statuses.iter().map(|s| quote(s)).collect();
  let mut jql = format!("assignee = {} AND status IN ({})", quote(account_id), statuses.join(", "));
  for issue_type in excluded_types {
    jql.push_str(&format!(" AND issuetype != {}", quote(issue_type)));
  }
  jql
}

/// Values substituted into an expertise template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpertiseValues<'a> {
  pub account_id: &'a str,
  pub issue_type: &'a str,
  pub custom_field_value: &'a str,
  pub summary_prefix: &'a str,
}

/// Fill the placeholders of an expertise template. `{requested_work}` is an
/// alias of `{custom_field_value}`. Values have single quotes doubled.
pub fn interpolate(template: &str, values: &ExpertiseValues<'_>) -> String {
  let custom_field_value = escape(values.custom_field_value);
  [
    ("{account_id}", escape(values.account_id)),
    ("{issue_type}", escape(values.issue_type)),
    ("{custom_field_value}", custom_field_value.clone()),
    ("{requested_work}", custom_field_value),
    ("{summary_prefix}", escape(values.summary_prefix)),
  ]
  .iter()
  .fold(template.to_string(), |jql, (placeholder, value)| jql.replace(placeholder, value))
}

/// Text before the first `:`, trimmed; the whole summary when there is none.
pub fn summary_prefix(summary: &str) -> &str {
  summary.split(':').next().unwrap_or(summary).trim()
}
