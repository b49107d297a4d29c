//! Bitbucket Data Center (REST API 1.0).

use async_trait::async_trait;
use serde_json::{Value, json};
use trellis_core::url::encode_path_segment;
use trellis_core::{ApiRequest, ToolError, ToolResult, validate};

use crate::client::BitbucketClient;
use crate::consts::{COMMENT_ACTIVITY, DATA_CENTER_API_ROOT};
use crate::host::CodeHost;
use crate::models::{NewPullRequest, pull_request_changes};

/// Bitbucket Data Center: repositories live in a project, listings page with
/// `limit`, and pull request mutations carry the optimistic-locking version.
pub struct DataCenterBitbucket {
  client: BitbucketClient,
}

impl DataCenterBitbucket {
  pub fn new(client: BitbucketClient) -> Self {
    Self { client }
  }

  fn project_url(&self, suffix: &str) -> String {
    format!(
      "{}/{DATA_CENTER_API_ROOT}/projects/{}/repos{suffix}",
      self.client.base_url(),
      encode_path_segment(self.client.scope())
    )
  }

  fn repo_url(&self, repo_slug: &str, suffix: &str) -> String {
    self.project_url(&format!("/{}{suffix}", encode_path_segment(repo_slug)))
  }

  fn pr_url(&self, repo_slug: &str, pr_id: i64, suffix: &str) -> String {
    self.repo_url(repo_slug, &format!("/pull-requests/{pr_id}{suffix}"))
  }

  fn check_pr(&self, repo_slug: &str, pr_id: i64) -> Result<(), ToolError> {
    self.client.ready()?;
    validate::repo_slug(repo_slug)?;
    validate::pr_id(pr_id)
  }

  /// Current optimistic-locking version of a pull request.
  async fn pr_version(&self, repo_slug: &str, pr_id: i64) -> Result<i64, ToolError> {
    let pull_request = self.client.call(ApiRequest::get(self.pr_url(repo_slug, pr_id, ""))).await?;
    pull_request["version"]
      .as_i64()
      .ok_or_else(|| ToolError::Decode(format!("pull request {pr_id} has no version")))
  }

  fn ref_payload(&self, repo_slug: &str, branch: &str) -> Value {
    json!({
      "id": format!("refs/heads/{branch}"),
      "repository": { "slug": repo_slug, "project": { "key": self.client.scope() } }
    })
  }
}

#[async_trait]
impl CodeHost for DataCenterBitbucket {
  fn client(&self) -> &BitbucketClient {
    &self.client
  }

  async fn list_repositories(&self, limit: u32) -> ToolResult {
    self.client.ready()?;
    self.client.call(ApiRequest::get(self.project_url("")).query("limit", limit)).await
  }

  async fn get_repository(&self, repo_slug: &str) -> ToolResult {
    self.client.ready()?;
    validate::repo_slug(repo_slug)?;
    self.client.call(ApiRequest::get(self.repo_url(repo_slug, ""))).await
  }

  async fn get_default_branch(&self, repo_slug: &str) -> ToolResult {
    self.client.ready()?;
    validate::repo_slug(repo_slug)?;

    let branch = self
      .client
      .call(ApiRequest::get(self.repo_url(repo_slug, "/default-branch")))
      .await?;
    Ok(json!({ "repo_slug": repo_slug, "branch": branch["displayId"].clone() }))
  }

  async fn list_branches(&self, repo_slug: &str, filter: Option<&str>, limit: u32) -> ToolResult {
    self.client.ready()?;
    validate::repo_slug(repo_slug)?;

    let request = ApiRequest::get(self.repo_url(repo_slug, "/branches"))
      .query("limit", limit)
      .query_opt("filterText", filter);
    self.client.call(request).await
  }

  async fn create_branch(&self, repo_slug: &str, branch_name: &str, start_point: &str) -> ToolResult {
    self.client.ready()?;
    validate::repo_slug(repo_slug)?;
    validate::ref_name(branch_name)?;
    validate::ref_name(start_point)?;

    let body = json!({ "name": branch_name, "startPoint": start_point });
    self
      .client
      .call(ApiRequest::post(self.repo_url(repo_slug, "/branches")).json(body))
      .await
  }

  async fn get_file_content(&self, repo_slug: &str, file_path: &str, reference: Option<&str>) -> ToolResult {
    self.client.ready()?;
    validate::repo_slug(repo_slug)?;
    validate::non_empty("file_path", file_path)?;
    validate::path(file_path)?;
    if let Some(reference) = reference {
      validate::ref_name(reference)?;
    }

    let url = self.repo_url(repo_slug, &format!("/raw/{}", encode_path_segment(file_path)));
    let content = self.client.text(ApiRequest::get(url).query_opt("at", reference)).await?;
    Ok(json!({ "repo_slug": repo_slug, "path": file_path, "ref": reference, "content": content }))
  }

  async fn list_directory(&self, repo_slug: &str, path: &str, reference: Option<&str>) -> ToolResult {
    self.client.ready()?;
    validate::repo_slug(repo_slug)?;
    validate::path(path)?;
    if let Some(reference) = reference {
      validate::ref_name(reference)?;
    }

    let suffix = if path.is_empty() {
      "/browse".to_string()
    } else {
      format!("/browse/{}", encode_path_segment(path))
    };
    self
      .client
      .call(ApiRequest::get(self.repo_url(repo_slug, &suffix)).query_opt("at", reference))
      .await
  }

  async fn list_commits(&self, repo_slug: &str, branch: Option<&str>, limit: u32) -> ToolResult {
    self.client.ready()?;
    validate::repo_slug(repo_slug)?;
    if let Some(branch) = branch {
      validate::ref_name(branch)?;
    }

    let request = ApiRequest::get(self.repo_url(repo_slug, "/commits"))
      .query("limit", limit)
      .query_opt("until", branch);
    self.client.call(request).await
  }

  async fn get_commit(&self, repo_slug: &str, commit_hash: &str) -> ToolResult {
    self.client.ready()?;
    validate::repo_slug(repo_slug)?;
    validate::commit_hash(commit_hash)?;

    let url = self.repo_url(repo_slug, &format!("/commits/{}", encode_path_segment(commit_hash)));
    self.client.call(ApiRequest::get(url)).await
  }

  async fn get_diff(&self, repo_slug: &str, from_ref: &str, to_ref: &str) -> ToolResult {
    self.client.ready()?;
    validate::repo_slug(repo_slug)?;
    validate::ref_name(from_ref)?;
    validate::ref_name(to_ref)?;

    let request = ApiRequest::get(self.repo_url(repo_slug, "/compare/diff"))
      .query("from", from_ref)
      .query("to", to_ref);
    self.client.call(request).await
  }

  async fn list_pull_requests(&self, repo_slug: &str, state: &str, limit: u32) -> ToolResult {
    self.client.ready()?;
    validate::repo_slug(repo_slug)?;
    validate::non_empty("state", state)?;

    let request = ApiRequest::get(self.repo_url(repo_slug, "/pull-requests"))
      .query("state", state.to_ascii_uppercase())
      .query("limit", limit);
    self.client.call(request).await
  }

  async fn get_pull_request(&self, repo_slug: &str, pr_id: i64) -> ToolResult {
    self.check_pr(repo_slug, pr_id)?;
    self.client.call(ApiRequest::get(self.pr_url(repo_slug, pr_id, ""))).await
  }

  async fn create_pull_request(&self, repo_slug: &str, pull_request: &NewPullRequest<'_>) -> ToolResult {
    self.client.ready()?;
    validate::repo_slug(repo_slug)?;
    validate::non_empty("title", pull_request.title)?;
    validate::ref_name(pull_request.source_branch)?;
    validate::ref_name(pull_request.destination_branch)?;

    let body = json!({
      "title": pull_request.title,
      "description": pull_request.description,
      "fromRef": self.ref_payload(repo_slug, pull_request.source_branch),
      "toRef": self.ref_payload(repo_slug, pull_request.destination_branch),
      "reviewers": pull_request
        .reviewers
        .iter()
        .map(|name| json!({ "user": { "name": name } }))
        .collect::<Vec<_>>(),
    });
    self
      .client
      .call(ApiRequest::post(self.repo_url(repo_slug, "/pull-requests")).json(body))
      .await
  }

  async fn update_pull_request(
    &self,
    repo_slug: &str,
    pr_id: i64,
    title: Option<&str>,
    description: Option<&str>,
  ) -> ToolResult {
    self.check_pr(repo_slug, pr_id)?;

    let version = self.pr_version(repo_slug, pr_id).await?;
    let mut body = pull_request_changes(title, description);
    body["version"] = json!(version);
    self
      .client
      .call(ApiRequest::put(self.pr_url(repo_slug, pr_id, "")).json(body))
      .await
  }

  async fn merge_pull_request(
    &self,
    repo_slug: &str,
    pr_id: i64,
    message: Option<&str>,
    strategy: Option<&str>,
  ) -> ToolResult {
    self.check_pr(repo_slug, pr_id)?;

    let version = self.pr_version(repo_slug, pr_id).await?;
    let mut body = json!({ "version": version });
    if let Some(message) = message {
      body["message"] = json!(message);
    }
    if let Some(strategy) = strategy {
      body["strategyId"] = json!(strategy);
    }
    self
      .client
      .call(ApiRequest::post(self.pr_url(repo_slug, pr_id, "/merge")).json(body))
      .await
  }

  async fn decline_pull_request(&self, repo_slug: &str, pr_id: i64) -> ToolResult {
    self.check_pr(repo_slug, pr_id)?;

    let version = self.pr_version(repo_slug, pr_id).await?;
    self
      .client
      .call(ApiRequest::post(self.pr_url(repo_slug, pr_id, "/decline")).json(json!({ "version": version })))
      .await
  }

  async fn approve_pull_request(&self, repo_slug: &str, pr_id: i64) -> ToolResult {
    self.check_pr(repo_slug, pr_id)?;
    self
      .client
      .call(ApiRequest::post(self.pr_url(repo_slug, pr_id, "/approve")))
      .await
  }

  async fn get_pull_request_diff(&self, repo_slug: &str, pr_id: i64) -> ToolResult {
    self.check_pr(repo_slug, pr_id)?;
    self.client.call(ApiRequest::get(self.pr_url(repo_slug, pr_id, "/diff"))).await
  }

  async fn add_pull_request_comment(&self, repo_slug: &str, pr_id: i64, text: &str) -> ToolResult {
    self.check_pr(repo_slug, pr_id)?;
    validate::non_empty("text", text)?;

    self
      .client
      .call(ApiRequest::post(self.pr_url(repo_slug, pr_id, "/comments")).json(json!({ "text": text })))
      .await
  }

  /// Comments are read from the activity stream.
  async fn get_pull_request_comments(&self, repo_slug: &str, pr_id: i64, limit: u32) -> ToolResult {
    self.check_pr(repo_slug, pr_id)?;

    let activities = self
      .client
      .call(ApiRequest::get(self.pr_url(repo_slug, pr_id, "/activities")).query("limit", limit))
      .await?;
    let comments: Vec<Value> = activities["values"]
      .as_array()
      .into_iter()
      .flatten()
      .filter(|activity| activity["action"] == COMMENT_ACTIVITY)
      .map(|activity| activity["comment"].clone())
      .collect();
    Ok(json!({ "size": comments.len(), "comments": comments }))
  }

  async fn search_code(&self, query: &str, _limit: u32) -> ToolResult {
    self.client.ready()?;
    validate::non_empty("query", query)?;
    Err(ToolError::NotSupported {
      operation: "search_code",
      deployment: self.deployment().display_name(),
    })
  }
}
