//! The issue-tracker capability.
//!
//! [`IssueTracker`] is the union of operations both flavours support. Most
//! of them are provided methods over [`JiraClient`]; an implementation only
//! states how users are referenced and where searching happens.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use trellis_core::{AuthContext, ClientOptions, ConfigMap, Deployment, Service, ToolResult, validate};

use crate::client::JiraClient;
use crate::consts::DEFAULT_SEARCH_FIELDS;
use crate::jql;
use crate::models::NewIssue;
use crate::{CloudJira, DataCenterJira};

#[async_trait]
pub trait IssueTracker: Send + Sync {
  fn client(&self) -> &JiraClient;

  /// Whether credentials for this tracker are configured.
  fn available(&self) -> bool {
    self.client().auth().available()
  }

  fn deployment(&self) -> Deployment {
    self.client().auth().deployment()
  }

  /// JSON object identifying a user in assignee payloads.
  fn user_reference(&self, identifier: &str) -> Value;

  async fn search_issues(&self, jql: &str, max_results: u32, fields: &str) -> ToolResult;

  async fn get_user(&self, identifier: &str) -> ToolResult;

  async fn search_users(&self, query: &str, max_results: u32) -> ToolResult;

  async fn get_issue(&self, issue_key: &str, expand: Option<&str>) -> ToolResult {
    self.client().get_issue(issue_key, expand).await
  }

  async fn create_issue(&self, issue: &NewIssue<'_>) -> ToolResult {
    let assignee = issue.assignee.map(|a| self.user_reference(a));
    self.client().create_issue(issue, assignee).await
  }

  async fn update_issue(&self, issue_key: &str, fields: &Value) -> ToolResult {
    self.client().update_issue(issue_key, fields).await
  }

  async fn add_comment(&self, issue_key: &str, body: &str) -> ToolResult {
    self.client().add_comment(issue_key, body).await
  }

  async fn get_issue_comments(&self, issue_key: &str, max_results: u32) -> ToolResult {
    self.client().get_comments(issue_key, max_results).await
  }

  async fn get_transitions(&self, issue_key: &str) -> ToolResult {
    self.client().get_transitions(issue_key).await
  }

  async fn transition_issue(&self, issue_key: &str, transition_id: &str, comment: Option<&str>) -> ToolResult {
    self.client().transition_issue(issue_key, transition_id, comment).await
  }

  async fn assign_issue(&self, issue_key: &str, assignee: &str) -> ToolResult {
    let reference = self.user_reference(assignee);
    self.client().assign_issue(issue_key, assignee, reference).await
  }

  async fn get_project(&self, project_key: &str) -> ToolResult {
    self.client().get_project(project_key).await
  }

  async fn list_projects(&self) -> ToolResult {
    self.client().list_projects().await
  }

  async fn get_current_user(&self) -> ToolResult {
    self.client().current_user().await
  }

  /// Unresolved issues assigned to `assignee`, skipping `excluded_types`.
  async fn get_assigned_issues(&self, assignee: &str, excluded_types: &[String], max_results: u32) -> ToolResult {
    self.client().auth().ensure_available()?;
    validate::non_empty("assignee", assignee)?;

    let jql = jql::assigned_issues(assignee, excluded_types);
    self.search_issues(&jql, max_results, DEFAULT_SEARCH_FIELDS).await
  }

  async fn link_issues(&self, inward_issue: &str, outward_issue: &str, link_type: &str) -> ToolResult {
    self.client().link_issues(inward_issue, outward_issue, link_type).await
  }

  async fn add_worklog(&self, issue_key: &str, time_spent: &str, comment: Option<&str>) -> ToolResult {
    self.client().add_worklog(issue_key, time_spent, comment).await
  }
}

/// Build the tracker for the selected deployment.
pub fn connect(config: &ConfigMap, deployment: Deployment, options: ClientOptions) -> Result<Arc<dyn IssueTracker>> {
  let auth = AuthContext::from_config(config, deployment, Service::Jira);
  if !auth.available() {
    tracing::info!(missing = ?auth.missing(), "Jira credentials incomplete; tracker tools will report not configured");
  }
  let client = JiraClient::new(auth, options)?;
  Ok(match deployment {
    Deployment::Cloud => Arc::new(CloudJira::new(client)),
    Deployment::DataCenter => Arc::new(DataCenterJira::new(client)),
  })
}
