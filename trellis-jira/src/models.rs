//! Request payloads sent to the Jira REST API.

use serde::Serialize;
use serde_json::Value;

/// Arguments of `create_issue`.
#[derive(Debug, Clone, Default)]
pub struct NewIssue<'a> {
  pub project_key: &'a str,
  pub summary: &'a str,
  pub issue_type: &'a str,
  pub description: &'a str,
  pub priority: Option<&'a str>,
  pub assignee: Option<&'a str>,
  pub labels: &'a [String],
}

#[derive(Debug, Serialize)]
pub(crate) struct KeyRef<'a> {
  pub key: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct NameRef<'a> {
  pub name: &'a str,
}

/// Body of `POST /issue`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateIssueRequest<'a> {
  pub fields: CreateIssueFields<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateIssueFields<'a> {
  pub project: KeyRef<'a>,
  pub summary: &'a str,
  pub issuetype: NameRef<'a>,
  pub description: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub priority: Option<NameRef<'a>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub assignee: Option<Value>,
  #[serde(skip_serializing_if = "no_labels")]
  pub labels: &'a [String],
}

#[derive(Debug, Serialize)]
pub(crate) struct IdRef<'a> {
  pub id: &'a str,
}

/// Body of `POST /issue/{key}/transitions`.
#[derive(Debug, Serialize)]
pub(crate) struct TransitionRequest<'a> {
  pub transition: IdRef<'a>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub update: Option<Value>,
}

/// Body of `POST /issueLink`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IssueLinkRequest<'a> {
  #[serde(rename = "type")]
  pub link_type: NameRef<'a>,
  pub inward_issue: KeyRef<'a>,
  pub outward_issue: KeyRef<'a>,
}

/// Body of `POST /issue/{key}/worklog`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WorklogRequest<'a> {
  pub time_spent: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub comment: Option<&'a str>,
}

fn no_labels(labels: &&[String]) -> bool {
  labels.is_empty()
}
