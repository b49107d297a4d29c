use async_trait::async_trait;
use serde_json::{Value, json};
use trellis_core::ToolResult;

use crate::client::JiraClient;
use crate::tracker::IssueTracker;

/// Jira Cloud: users are account ids, search lives at `/search/jql`.
pub struct CloudJira {
  client: JiraClient,
}

impl CloudJira {
  pub fn new(client: JiraClient) -> Self {
    Self { client }
  }
}

#[async_trait]
impl IssueTracker for CloudJira {
  fn client(&self) -> &JiraClient {
    &self.client
  }

  fn user_reference(&self, identifier: &str) -> Value {
    json!({ "accountId": identifier })
  }

  async fn search_issues(&self, jql: &str, max_results: u32, fields: &str) -> ToolResult {
    self.client.search("search/jql", jql, max_results, fields).await
  }

  async fn get_user(&self, identifier: &str) -> ToolResult {
    self.client.get_user("accountId", identifier).await
  }

  async fn search_users(&self, query: &str, max_results: u32) -> ToolResult {
    self.client.search_users("query", query, max_results).await
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use serde_json::json;
  use trellis_core::{ConfigMap, Deployment};
  use trellis_test_utils::{cloud_config, fast_client_options};
  use wiremock::matchers::{body_json, method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::tracker::{IssueTracker, connect};

  fn tracker(config: &ConfigMap) -> Arc<dyn IssueTracker> {
    connect(config, Deployment::Cloud, fast_client_options()).expect("tracker")
  }

  #[tokio::test]
  async fn test_search_uses_jql_endpoint() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let tracker = tracker(&cloud_config(&mock_server.uri()));

    Mock::given(method("GET"))
      .and(path("/rest/api/2/search/jql"))
      .and(query_param("jql", "project = OPS"))
      .and(query_param("maxResults", "50"))
      .and(query_param("fields", "summary,status"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "issues": [{ "key": "OPS-1" }] })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let result = tracker.search_issues("project = OPS", 50, "summary,status").await?;
    assert_eq!(result["issues"][0]["key"], "OPS-1");
    Ok(())
  }

  #[tokio::test]
  async fn test_users_by_account_id() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let tracker = tracker(&cloud_config(&mock_server.uri()));

    Mock::given(method("GET"))
      .and(path("/rest/api/2/user"))
      .and(query_param("accountId", "5b10ac8d82e05b22cc7d4ef5"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "displayName": "Mia" })))
      .expect(1)
      .mount(&mock_server)
      .await;
    Mock::given(method("GET"))
      .and(path("/rest/api/2/user/search"))
      .and(query_param("query", "mia"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "displayName": "Mia" }])))
      .expect(1)
      .mount(&mock_server)
      .await;
    Mock::given(method("PUT"))
      .and(path("/rest/api/2/issue/OPS-1/assignee"))
      .and(body_json(json!({ "accountId": "5b10ac8d82e05b22cc7d4ef5" })))
      .respond_with(ResponseTemplate::new(204))
      .expect(1)
      .mount(&mock_server)
      .await;

    assert_eq!(tracker.get_user("5b10ac8d82e05b22cc7d4ef5").await?["displayName"], "Mia");
    assert_eq!(tracker.search_users("mia", 50).await?[0]["displayName"], "Mia");
    assert_eq!(
      tracker.assign_issue("OPS-1", "5b10ac8d82e05b22cc7d4ef5").await?,
      json!({ "success": true })
    );
    Ok(())
  }

  #[tokio::test]
  async fn test_assigned_issues_query() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let tracker = tracker(&cloud_config(&mock_server.uri()));

    Mock::given(method("GET"))
      .and(path("/rest/api/2/search/jql"))
      .and(query_param(
        "jql",
        "assignee = 'u1' AND resolution = Unresolved AND issuetype NOT IN ('Epic') ORDER BY updated DESC",
      ))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "issues": [] })))
      .expect(1)
      .mount(&mock_server)
      .await;

    tracker.get_assigned_issues("u1", &["Epic".to_string()], 50).await?;
    Ok(())
  }

  #[tokio::test]
  async fn test_unavailable_tracker_reports_not_configured() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
      .respond_with(ResponseTemplate::new(200))
      .expect(0)
      .mount(&mock_server)
      .await;

    let tracker = tracker(&ConfigMap::default());
    assert!(!tracker.available());
    let err = tracker.get_assigned_issues("u1", &[], 50).await.unwrap_err();
    assert_eq!(
      err.to_string(),
      "Jira not configured. Set: ATLASSIAN_BASE_URL, ATLASSIAN_USERNAME, ATLASSIAN_API_TOKEN"
    );
    assert!(tracker.search_issues("project = OPS", 50, "summary").await.is_err());
  }
}
