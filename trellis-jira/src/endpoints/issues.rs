//! # Jira Issue Endpoints
//!
//! Fetching, creating, updating, commenting on, assigning, linking and
//! logging work against Jira issues.

use serde_json::{Value, json};
use trellis_core::url::encode_path_segment;
use trellis_core::{ApiRequest, ToolError, ToolResult, validate};

use crate::client::JiraClient;
use crate::models::{
  CreateIssueFields, CreateIssueRequest, IssueLinkRequest, KeyRef, NameRef, NewIssue, WorklogRequest,
};

fn to_body(payload: impl serde::Serialize) -> Result<Value, ToolError> {
  serde_json::to_value(payload).map_err(|e| ToolError::Decode(e.to_string()))
}

impl JiraClient {
  /// Get a Jira issue by key
  pub async fn get_issue(&self, issue_key: &str, expand: Option<&str>) -> ToolResult {
    self.ready()?;
    validate::issue_key(issue_key)?;

    let url = self.url(&format!("issue/{}", encode_path_segment(issue_key)));
    self.call(ApiRequest::get(url).query_opt("expand", expand)).await
  }

  /// Create an issue. `assignee` is the flavour-specific user reference.
  pub async fn create_issue(&self, issue: &NewIssue<'_>, assignee: Option<Value>) -> ToolResult {
    self.ready()?;
    validate::project_key(issue.project_key)?;
    validate::non_empty("summary", issue.summary)?;
    validate::non_empty("issue_type", issue.issue_type)?;

    let payload = CreateIssueRequest {
      fields: CreateIssueFields {
        project: KeyRef { key: issue.project_key },
        summary: issue.summary,
        issuetype: NameRef { name: issue.issue_type },
        description: issue.description,
        priority: issue.priority.map(|name| NameRef { name }),
        assignee,
        labels: issue.labels,
      },
    };

    self.call(ApiRequest::post(self.url("issue")).json(to_body(payload)?)).await
  }

  /// Update arbitrary fields of an issue.
  pub async fn update_issue(&self, issue_key: &str, fields: &Value) -> ToolResult {
    self.ready()?;
    validate::issue_key(issue_key)?;
    if !fields.is_object() {
      return Err(ToolError::validation("fields must be an object"));
    }

    let url = self.url(&format!("issue/{}", encode_path_segment(issue_key)));
    self.call(ApiRequest::put(url).json(json!({ "fields": fields }))).await
  }

  /// Add a comment to an issue.
  pub async fn add_comment(&self, issue_key: &str, body: &str) -> ToolResult {
    self.ready()?;
    validate::issue_key(issue_key)?;
    validate::non_empty("body", body)?;

    let url = self.url(&format!("issue/{}/comment", encode_path_segment(issue_key)));
    self.call(ApiRequest::post(url).json(json!({ "body": body }))).await
  }

  /// First page of an issue's comments.
  pub async fn get_comments(&self, issue_key: &str, max_results: u32) -> ToolResult {
    self.ready()?;
    validate::issue_key(issue_key)?;

    let url = self.url(&format!("issue/{}/comment", encode_path_segment(issue_key)));
    self.call(ApiRequest::get(url).query("maxResults", max_results)).await
  }

  /// Set the assignee using a flavour-specific user reference.
  pub async fn assign_issue(&self, issue_key: &str, assignee: &str, reference: Value) -> ToolResult {
    self.ready()?;
    validate::issue_key(issue_key)?;
    validate::non_empty("assignee", assignee)?;

    let url = self.url(&format!("issue/{}/assignee", encode_path_segment(issue_key)));
    self.call(ApiRequest::put(url).json(reference)).await
  }

  /// Link two issues.
  pub async fn link_issues(&self, inward_issue: &str, outward_issue: &str, link_type: &str) -> ToolResult {
    self.ready()?;
    validate::issue_key(inward_issue)?;
    validate::issue_key(outward_issue)?;
    validate::non_empty("link_type", link_type)?;

    let payload = IssueLinkRequest {
      link_type: NameRef { name: link_type },
      inward_issue: KeyRef { key: inward_issue },
      outward_issue: KeyRef { key: outward_issue },
    };
    self.call(ApiRequest::post(self.url("issueLink")).json(to_body(payload)?)).await
  }

  /// Log work against an issue, e.g. `time_spent = "1h 30m"`.
  pub async fn add_worklog(&self, issue_key: &str, time_spent: &str, comment: Option<&str>) -> ToolResult {
    self.ready()?;
    validate::issue_key(issue_key)?;
    validate::non_empty("time_spent", time_spent)?;

    let url = self.url(&format!("issue/{}/worklog", encode_path_segment(issue_key)));
    let payload = WorklogRequest { time_spent, comment };
    self.call(ApiRequest::post(url).json(to_body(payload)?)).await
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use trellis_core::{AuthContext, Deployment, Service};
  use trellis_test_utils::{cloud_config, config_map, fast_client_options};
  use wiremock::matchers::{basic_auth, body_json, method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;

  fn client(server: &MockServer) -> JiraClient {
    let auth = AuthContext::from_config(&cloud_config(&server.uri()), Deployment::Cloud, Service::Jira);
    JiraClient::new(auth, fast_client_options()).expect("client")
  }

  #[tokio::test]
  async fn test_get_issue() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server);

    Mock::given(method("GET"))
      .and(path("/rest/api/2/issue/TEST-123"))
      .and(basic_auth("test_user", "test_token"))
      .and(query_param("expand", "changelog"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
          "id": "10000",
          "key": "TEST-123",
          "fields": {
              "summary": "Test issue",
              "status": { "id": "10001", "name": "In Progress" }
          }
      })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let issue = client.get_issue("TEST-123", Some("changelog")).await?;
    assert_eq!(issue["key"], "TEST-123");
    assert_eq!(issue["fields"]["summary"], "Test issue");
    assert_eq!(issue["fields"]["status"]["name"], "In Progress");

    Ok(())
  }

  #[tokio::test]
  async fn test_get_issue_rejects_bad_key_without_request() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server);

    Mock::given(method("GET"))
      .respond_with(ResponseTemplate::new(200))
      .expect(0)
      .mount(&mock_server)
      .await;

    let err = client.get_issue("test-1", None).await.unwrap_err();
    assert_eq!(
      err.to_record(),
      json!({ "error": "Invalid issue_key format. Expected: PROJECT-123" })
    );
  }

  #[tokio::test]
  async fn test_unconfigured_client_makes_no_request() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
      .respond_with(ResponseTemplate::new(200))
      .expect(0)
      .mount(&mock_server)
      .await;

    let config = config_map([("ATLASSIAN_BASE_URL", mock_server.uri().as_str())]);
    let auth = AuthContext::from_config(&config, Deployment::Cloud, Service::Jira);
    let client = JiraClient::new(auth, fast_client_options())?;

    let err = client.get_issue("TEST-1", None).await.unwrap_err();
    assert!(err.to_string().contains("not configured"));
    Ok(())
  }

  #[tokio::test]
  async fn test_get_issue_not_found() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server);

    Mock::given(method("GET"))
      .and(path("/rest/api/2/issue/NONEXISTENT-123"))
      .respond_with(ResponseTemplate::new(404).set_body_json(json!({
          "errorMessages": ["Issue does not exist or you do not have permission to see it."],
          "errors": {}
      })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let err = client.get_issue("NONEXISTENT-123", None).await.unwrap_err();
    assert!(err.to_string().starts_with("HTTP 404: "));
    assert!(err.to_string().contains("Issue does not exist"));
  }

  #[tokio::test]
  async fn test_create_issue_payload() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server);

    Mock::given(method("POST"))
      .and(path("/rest/api/2/issue"))
      .and(body_json(json!({
        "fields": {
          "project": { "key": "PROJ" },
          "summary": "Broken build",
          "issuetype": { "name": "Bug" },
          "description": "",
          "priority": { "name": "High" },
          "assignee": { "accountId": "abc" },
          "labels": ["ci"]
        }
      })))
      .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "1", "key": "PROJ-9" })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let labels = vec!["ci".to_string()];
    let issue = NewIssue {
      project_key: "PROJ",
      summary: "Broken build",
      issue_type: "Bug",
      description: "",
      priority: Some("High"),
      assignee: Some("abc"),
      labels: &labels,
    };
    let created = client
      .create_issue(&issue, Some(json!({ "accountId": "abc" })))
      .await?;
    assert_eq!(created["key"], "PROJ-9");
    Ok(())
  }

  #[tokio::test]
  async fn test_create_issue_omits_optional_fields() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server);

    Mock::given(method("POST"))
      .and(path("/rest/api/2/issue"))
      .and(body_json(json!({
        "fields": {
          "project": { "key": "PROJ" },
          "summary": "Plain",
          "issuetype": { "name": "Task" },
          "description": "text"
        }
      })))
      .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "key": "PROJ-10" })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let issue = NewIssue {
      project_key: "PROJ",
      summary: "Plain",
      issue_type: "Task",
      description: "text",
      ..NewIssue::default()
    };
    client.create_issue(&issue, None).await?;
    Ok(())
  }

  #[tokio::test]
  async fn test_update_issue_requires_object() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server);

    let err = client.update_issue("PROJ-1", &json!("summary")).await.unwrap_err();
    assert_eq!(err.to_string(), "fields must be an object");
  }

  #[tokio::test]
  async fn test_update_issue_no_content() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server);

    Mock::given(method("PUT"))
      .and(path("/rest/api/2/issue/PROJ-1"))
      .and(body_json(json!({ "fields": { "summary": "New" } })))
      .respond_with(ResponseTemplate::new(204))
      .expect(1)
      .mount(&mock_server)
      .await;

    let result = client.update_issue("PROJ-1", &json!({ "summary": "New" })).await?;
    assert_eq!(result, json!({ "success": true }));
    Ok(())
  }

  #[tokio::test]
  async fn test_add_comment_rejects_blank_body() {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server);

    let err = client.add_comment("PROJ-1", "   ").await.unwrap_err();
    assert_eq!(err.to_string(), "body must not be empty");
  }

  #[tokio::test]
  async fn test_get_comments_page_size() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server);

    Mock::given(method("GET"))
      .and(path("/rest/api/2/issue/PROJ-1/comment"))
      .and(query_param("maxResults", "50"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "comments": [], "total": 0 })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let comments = client.get_comments("PROJ-1", 50).await?;
    assert_eq!(comments["total"], 0);
    Ok(())
  }

  #[tokio::test]
  async fn test_link_issues_and_worklog() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client(&mock_server);

    Mock::given(method("POST"))
      .and(path("/rest/api/2/issueLink"))
      .and(body_json(json!({
        "type": { "name": "Blocks" },
        "inwardIssue": { "key": "PROJ-1" },
        "outwardIssue": { "key": "PROJ-2" }
      })))
      .respond_with(ResponseTemplate::new(201))
      .expect(1)
      .mount(&mock_server)
      .await;
    Mock::given(method("POST"))
      .and(path("/rest/api/2/issue/PROJ-1/worklog"))
      .and(body_json(json!({ "timeSpent": "1h 30m" })))
      .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "100" })))
      .expect(1)
      .mount(&mock_server)
      .await;

    assert_eq!(
      client.link_issues("PROJ-1", "PROJ-2", "Blocks").await?,
      json!({ "success": true })
    );
    assert_eq!(client.add_worklog("PROJ-1", "1h 30m", None).await?["id"], "100");
    Ok(())
  }
}
