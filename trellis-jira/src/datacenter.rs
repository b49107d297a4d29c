use async_trait::async_trait;
use serde_json::{Value, json};
use trellis_core::ToolResult;

use crate::client::JiraClient;
use crate::tracker::IssueTracker;

/// Jira Data Center: users are usernames, search lives at `/search`.
pub struct DataCenterJira {
  client: JiraClient,
}

impl DataCenterJira {
  pub fn new(client: JiraClient) -> Self {
    Self { client }
  }
}

#[async_trait]
impl IssueTracker for DataCenterJira {
  fn client(&self) -> &JiraClient {
    &self.client
  }

  fn user_reference(&self, identifier: &str) -> Value {
    json!({ "name": identifier })
  }

  async fn search_issues(&self, jql: &str, max_results: u32, fields: &str) -> ToolResult {
    self.client.search("search", jql, max_results, fields).await
  }

  async fn get_user(&self, identifier: &str) -> ToolResult {
    self.client.get_user("username", identifier).await
  }

  async fn search_users(&self, query: &str, max_results: u32) -> ToolResult {
    self.client.search_users("username", query, max_results).await
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use trellis_core::Deployment;
  use trellis_test_utils::{data_center_config, fast_client_options};
  use wiremock::matchers::{body_json, header, method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::NewIssue;
  use crate::tracker::connect;

  #[tokio::test]
  async fn test_search_and_users() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let tracker = connect(&data_center_config(&mock_server.uri()), Deployment::DataCenter, fast_client_options())?;
    assert_eq!(tracker.deployment(), Deployment::DataCenter);

    Mock::given(method("GET"))
      .and(path("/rest/api/2/search"))
      .and(header("Authorization", "Bearer jira-pat"))
      .and(query_param("jql", "status = Open"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "issues": [], "total": 0 })))
      .expect(1)
      .mount(&mock_server)
      .await;
    Mock::given(method("GET"))
      .and(path("/rest/api/2/user"))
      .and(query_param("username", "jdoe"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "jdoe" })))
      .expect(1)
      .mount(&mock_server)
      .await;
    Mock::given(method("GET"))
      .and(path("/rest/api/2/user/search"))
      .and(query_param("username", "jd"))
      .and(query_param("maxResults", "10"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
      .expect(1)
      .mount(&mock_server)
      .await;

    assert_eq!(tracker.search_issues("status = Open", 50, "summary").await?["total"], 0);
    assert_eq!(tracker.get_user("jdoe").await?["name"], "jdoe");
    assert_eq!(tracker.search_users("jd", 10).await?, json!([]));
    Ok(())
  }

  #[tokio::test]
  async fn test_assignee_is_username() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let tracker = connect(&data_center_config(&mock_server.uri()), Deployment::DataCenter, fast_client_options())?;

    Mock::given(method("PUT"))
      .and(path("/rest/api/2/issue/OPS-7/assignee"))
      .and(body_json(json!({ "name": "jdoe" })))
      .respond_with(ResponseTemplate::new(204))
      .expect(1)
      .mount(&mock_server)
      .await;
    Mock::given(method("POST"))
      .and(path("/rest/api/2/issue"))
      .and(body_json(json!({
        "fields": {
          "project": { "key": "OPS" },
          "summary": "Rotate keys",
          "issuetype": { "name": "Task" },
          "description": "",
          "assignee": { "name": "jdoe" }
        }
      })))
      .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "key": "OPS-8" })))
      .expect(1)
      .mount(&mock_server)
      .await;

    tracker.assign_issue("OPS-7", "jdoe").await?;
    let issue = NewIssue {
      project_key: "OPS",
      summary: "Rotate keys",
      issue_type: "Task",
      assignee: Some("jdoe"),
      ..NewIssue::default()
    };
    assert_eq!(tracker.create_issue(&issue).await?["key"], "OPS-8");
    Ok(())
  }
}
