//! Bitbucket Cloud (API 2.0).

use async_trait::async_trait;
use serde_json::{Value, json};
use trellis_core::url::encode_path_segment;
use trellis_core::{ApiRequest, ToolError, ToolResult, validate};

use crate::client::BitbucketClient;
use crate::host::CodeHost;
use crate::models::{NewPullRequest, pull_request_changes};

/// Bitbucket Cloud: repositories live in a workspace, listings page with `pagelen`.
pub struct CloudBitbucket {
  client: BitbucketClient,
}

impl CloudBitbucket {
  pub fn new(client: BitbucketClient) -> Self {
    Self { client }
  }

  fn workspace_url(&self, suffix: &str) -> String {
    format!(
      "{}/repositories/{}{suffix}",
      self.client.base_url(),
      encode_path_segment(self.client.scope())
    )
  }

  fn repo_url(&self, repo_slug: &str, suffix: &str) -> String {
    self.workspace_url(&format!("/{}{suffix}", encode_path_segment(repo_slug)))
  }

  fn pr_url(&self, repo_slug: &str, pr_id: i64, suffix: &str) -> String {
    self.repo_url(repo_slug, &format!("/pullrequests/{pr_id}{suffix}"))
  }

  fn check_pr(&self, repo_slug: &str, pr_id: i64) -> Result<(), ToolError> {
    self.client.ready()?;
    validate::repo_slug(repo_slug)?;
    validate::pr_id(pr_id)
  }

  /// The given ref, or the repository's main branch when none is given.
  async fn resolve_ref(&self, repo_slug: &str, reference: Option<&str>) -> Result<String, ToolError> {
    match reference {
      Some(reference) => {
        validate::ref_name(reference)?;
        Ok(reference.to_string())
      }
      None => {
        let branch = self.get_default_branch(repo_slug).await?;
        branch["branch"]
          .as_str()
          .map(str::to_string)
          .ok_or_else(|| ToolError::Decode(format!("repository {repo_slug} has no main branch")))
      }
    }
  }
}

fn reviewer(identifier: &str) -> Value {
  if identifier.starts_with('{') {
    json!({ "uuid": identifier })
  } else {
    json!({ "account_id": identifier })
  }
}

#[async_trait]
impl CodeHost for CloudBitbucket {
  fn client(&self) -> &BitbucketClient {
    &self.client
  }

  async fn list_repositories(&self, limit: u32) -> ToolResult {
    self.client.ready()?;
    self.client.call(ApiRequest::get(self.workspace_url("")).query("pagelen", limit)).await
  }

  async fn get_repository(&self, repo_slug: &str) -> ToolResult {
    self.client.ready()?;
    validate::repo_slug(repo_slug)?;
    self.client.call(ApiRequest::get(self.repo_url(repo_slug, ""))).await
  }

  async fn get_default_branch(&self, repo_slug: &str) -> ToolResult {
    let repository = self.get_repository(repo_slug).await?;
    let branch = repository["mainbranch"]["name"].clone();
    Ok(json!({ "repo_slug": repo_slug, "branch": branch }))
  }

  async fn list_branches(&self, repo_slug: &str, filter: Option<&str>, limit: u32) -> ToolResult {
    self.client.ready()?;
    validate::repo_slug(repo_slug)?;

    let query = filter.map(|f| format!("name ~ \"{}\"", f.replace('"', "\\\"")));
    let request = ApiRequest::get(self.repo_url(repo_slug, "/refs/branches"))
      .query("pagelen", limit)
      .query_opt("q", query);
    self.client.call(request).await
  }

  async fn create_branch(&self, repo_slug: &str, branch_name: &str, start_point: &str) -> ToolResult {
    self.client.ready()?;
    validate::repo_slug(repo_slug)?;
    validate::ref_name(branch_name)?;
    validate::ref_name(start_point)?;

    let body = json!({ "name": branch_name, "target": { "hash": start_point } });
    self
      .client
      .call(ApiRequest::post(self.repo_url(repo_slug, "/refs/branches")).json(body))
      .await
  }

  async fn get_file_content(&self, repo_slug: &str, file_path: &str, reference: Option<&str>) -> ToolResult {
    self.client.ready()?;
    validate::repo_slug(repo_slug)?;
    validate::non_empty("file_path", file_path)?;
    validate::path(file_path)?;

    let reference = self.resolve_ref(repo_slug, reference).await?;
    let url = self.repo_url(
      repo_slug,
      &format!("/src/{}/{}", encode_path_segment(&reference), encode_path_segment(file_path)),
    );
    let content = self.client.text(ApiRequest::get(url)).await?;
    Ok(json!({ "repo_slug": repo_slug, "path": file_path, "ref": reference, "content": content }))
  }

  async fn list_directory(&self, repo_slug: &str, path: &str, reference: Option<&str>) -> ToolResult {
    self.client.ready()?;
    validate::repo_slug(repo_slug)?;
    validate::path(path)?;

    let reference = self.resolve_ref(repo_slug, reference).await?;
    let mut suffix = format!("/src/{}/", encode_path_segment(&reference));
    if !path.is_empty() {
      suffix.push_str(&encode_path_segment(path));
      suffix.push('/');
    }
    self.client.call(ApiRequest::get(self.repo_url(repo_slug, &suffix))).await
  }

  async fn list_commits(&self, repo_slug: &str, branch: Option<&str>, limit: u32) -> ToolResult {
    self.client.ready()?;
    validate::repo_slug(repo_slug)?;
    if let Some(branch) = branch {
      validate::ref_name(branch)?;
    }

    let request = ApiRequest::get(self.repo_url(repo_slug, "/commits"))
      .query("pagelen", limit)
      .query_opt("include", branch);
    self.client.call(request).await
  }

  async fn get_commit(&self, repo_slug: &str, commit_hash: &str) -> ToolResult {
    self.client.ready()?;
    validate::repo_slug(repo_slug)?;
    validate::commit_hash(commit_hash)?;

    let url = self.repo_url(repo_slug, &format!("/commit/{}", encode_path_segment(commit_hash)));
    self.client.call(ApiRequest::get(url)).await
  }

  async fn get_diff(&self, repo_slug: &str, from_ref: &str, to_ref: &str) -> ToolResult {
    self.client.ready()?;
    validate::repo_slug(repo_slug)?;
    validate::ref_name(from_ref)?;
    validate::ref_name(to_ref)?;

    // Cloud diff specs read `{new}..{old}`.
    let spec = format!("{}..{}", encode_path_segment(to_ref), encode_path_segment(from_ref));
    let diff = self
      .client
      .text(ApiRequest::get(self.repo_url(repo_slug, &format!("/diff/{spec}"))))
      .await?;
    Ok(json!({ "from": from_ref, "to": to_ref, "diff": diff }))
  }

  async fn list_pull_requests(&self, repo_slug: &str, state: &str, limit: u32) -> ToolResult {
    self.client.ready()?;
    validate::repo_slug(repo_slug)?;
    validate::non_empty("state", state)?;

    let request = ApiRequest::get(self.repo_url(repo_slug, "/pullrequests"))
      .query("state", state.to_ascii_uppercase())
      .query("pagelen", limit);
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
      "source": { "branch": { "name": pull_request.source_branch } },
      "destination": { "branch": { "name": pull_request.destination_branch } },
      "reviewers": pull_request.reviewers.iter().map(|r| reviewer(r)).collect::<Vec<_>>(),
    });
    self
      .client
      .call(ApiRequest::post(self.repo_url(repo_slug, "/pullrequests")).json(body))
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
    let body = pull_request_changes(title, description);
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

    let mut body = json!({});
    if let Some(message) = message {
      body["message"] = json!(message);
    }
    if let Some(strategy) = strategy {
      body["merge_strategy"] = json!(strategy);
    }
    self
      .client
      .call(ApiRequest::post(self.pr_url(repo_slug, pr_id, "/merge")).json(body))
      .await
  }

  async fn decline_pull_request(&self, repo_slug: &str, pr_id: i64) -> ToolResult {
    self.check_pr(repo_slug, pr_id)?;
    self
      .client
      .call(ApiRequest::post(self.pr_url(repo_slug, pr_id, "/decline")))
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
    let diff = self
      .client
      .text(ApiRequest::get(self.pr_url(repo_slug, pr_id, "/diff")))
      .await?;
    Ok(json!({ "pr_id": pr_id, "diff": diff }))
  }

  async fn add_pull_request_comment(&self, repo_slug: &str, pr_id: i64, text: &str) -> ToolResult {
    self.check_pr(repo_slug, pr_id)?;
    validate::non_empty("text", text)?;

    let body = json!({ "content": { "raw": text } });
    self
      .client
      .call(ApiRequest::post(self.pr_url(repo_slug, pr_id, "/comments")).json(body))
      .await
  }

  async fn get_pull_request_comments(&self, repo_slug: &str, pr_id: i64, limit: u32) -> ToolResult {
    self.check_pr(repo_slug, pr_id)?;
    self
      .client
      .call(ApiRequest::get(self.pr_url(repo_slug, pr_id, "/comments")).query("pagelen", limit))
      .await
  }

  async fn search_code(&self, query: &str, limit: u32) -> ToolResult {
    self.client.ready()?;
    validate::non_empty("query", query)?;

    let url = format!(
      "{}/workspaces/{}/search/code",
      self.client.base_url(),
      encode_path_segment(self.client.scope())
    );
    let request = ApiRequest::get(url)
      .query("search_query", query)
      .query("pagelen", limit);
    self.client.call(request).await
  }
}
