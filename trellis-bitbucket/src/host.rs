//! The code-host capability.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use trellis_core::{AuthContext, ClientOptions, ConfigMap, Deployment, Service, ToolResult};

use crate::client::BitbucketClient;
use crate::models::NewPullRequest;
use crate::{CloudBitbucket, DataCenterBitbucket};

/// Repository, branch, commit and pull request operations.
///
/// `get_default_branch` answers `{"repo_slug", "branch"}` on both flavours;
/// raw content (file bodies, Cloud diffs) is wrapped in a JSON object.
#[async_trait]
pub trait CodeHost: Send + Sync {
  fn client(&self) -> &BitbucketClient;

  fn available(&self) -> bool {
    self.client().auth().available()
  }

  fn deployment(&self) -> Deployment {
    self.client().auth().deployment()
  }

  async fn list_repositories(&self, limit: u32) -> ToolResult;

  async fn get_repository(&self, repo_slug: &str) -> ToolResult;

  async fn get_default_branch(&self, repo_slug: &str) -> ToolResult;

  async fn list_branches(&self, repo_slug: &str, filter: Option<&str>, limit: u32) -> ToolResult;

  async fn create_branch(&self, repo_slug: &str, branch_name: &str, start_point: &str) -> ToolResult;

  async fn get_file_content(&self, repo_slug: &str, file_path: &str, reference: Option<&str>) -> ToolResult;

  async fn list_directory(&self, repo_slug: &str, path: &str, reference: Option<&str>) -> ToolResult;

  async fn list_commits(&self, repo_slug: &str, branch: Option<&str>, limit: u32) -> ToolResult;

  async fn get_commit(&self, repo_slug: &str, commit_hash: &str) -> ToolResult;

  async fn get_diff(&self, repo_slug: &str, from_ref: &str, to_ref: &str) -> ToolResult;

  async fn list_pull_requests(&self, repo_slug: &str, state: &str, limit: u32) -> ToolResult;

  async fn get_pull_request(&self, repo_slug: &str, pr_id: i64) -> ToolResult;

  async fn create_pull_request(&self, repo_slug: &str, pull_request: &NewPullRequest<'_>) -> ToolResult;

  async fn update_pull_request(
    &self,
    repo_slug: &str,
    pr_id: i64,
    title: Option<&str>,
    description: Option<&str>,
  ) -> ToolResult;

  async fn merge_pull_request(
    &self,
    repo_slug: &str,
    pr_id: i64,
    message: Option<&str>,
    strategy: Option<&str>,
  ) -> ToolResult;

  async fn decline_pull_request(&self, repo_slug: &str, pr_id: i64) -> ToolResult;

  async fn approve_pull_request(&self, repo_slug: &str, pr_id: i64) -> ToolResult;

  async fn get_pull_request_diff(&self, repo_slug: &str, pr_id: i64) -> ToolResult;

  async fn add_pull_request_comment(&self, repo_slug: &str, pr_id: i64, text: &str) -> ToolResult;

  async fn get_pull_request_comments(&self, repo_slug: &str, pr_id: i64, limit: u32) -> ToolResult;

  async fn search_code(&self, query: &str, limit: u32) -> ToolResult;
}

/// Build the code-host binding for the selected deployment.
pub fn connect(config: &ConfigMap, deployment: Deployment, options: ClientOptions) -> Result<Arc<dyn CodeHost>> {
  let auth = AuthContext::from_config(config, deployment, Service::Bitbucket);
  if !auth.available() {
    tracing::info!(missing = ?auth.missing(), "Bitbucket credentials incomplete; code-host tools will report not configured");
  }
  let client = BitbucketClient::new(auth, options)?;
  Ok(match deployment {
    Deployment::Cloud => Arc::new(CloudBitbucket::new(client)),
    Deployment::DataCenter => Arc::new(DataCenterBitbucket::new(client)),
  })
}
