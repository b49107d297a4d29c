//! # Confluence Page Endpoints
//!
//! Reading, creating, updating and deleting pages, plus walking the page
//! tree through the child and descendant endpoints.

use trellis_core::url::encode_path_segment;
use trellis_core::{ApiRequest, ToolError, ToolResult, validate};

use crate::client::{ConfluenceClient, to_body};
use crate::cql;
use crate::models::{Ancestor, Body, NewPage, PageUpdate, SpaceRef, Version};

impl ConfluenceClient {
  fn page_url(&self, page_id: &str, suffix: &str) -> String {
    self.url(&format!("content/{}{suffix}", encode_path_segment(page_id)))
  }

  /// Get a page, with its storage body when `include_body` is set.
  pub async fn get_page(&self, page_id: &str, include_body: bool) -> ToolResult {
    self.ready()?;
    validate::page_id(page_id)?;

    let expand = if include_body {
      "body.storage,version,space,ancestors"
    } else {
      "version,space,ancestors"
    };
    self.call(ApiRequest::get(self.page_url(page_id, "")).query("expand", expand)).await
  }

  /// Look up a page by exact title within a space.
  pub async fn get_page_by_title(&self, space_key: &str, title: &str) -> ToolResult {
    self.ready()?;
    validate::space_key(space_key)?;
    validate::non_empty("title", title)?;

    let request = ApiRequest::get(self.url("content"))
      .query("spaceKey", space_key)
      .query("title", title)
      .query("expand", "body.storage,version");
    self.call(request).await
  }

  /// Find pages titled `title` in any space via CQL.
  pub async fn find_pages_by_title(&self, title: &str) -> ToolResult {
    self.ready()?;
    validate::non_empty("title", title)?;

    self.search(&cql::page_title(title, None), 1).await
  }

  /// Create a page, optionally below `parent_id`.
  pub async fn create_page(&self, space_key: &str, title: &str, body: &str, parent_id: Option<&str>) -> ToolResult {
    self.ready()?;
    validate::space_key(space_key)?;
    validate::non_empty("title", title)?;
    if let Some(parent_id) = parent_id {
      validate::page_id(parent_id)?;
    }

    let payload = NewPage {
      kind: "page",
      title,
      space: SpaceRef { key: space_key },
      body: Body::storage(body),
      ancestors: parent_id.map(|id| Ancestor { id }).into_iter().collect(),
    };
    self.call(ApiRequest::post(self.url("content")).json(to_body(payload)?)).await
  }

  /// Replace a page's title and body. Reads the current version first and
  /// writes version + 1.
  pub async fn update_page(&self, page_id: &str, title: &str, body: &str, version_comment: Option<&str>) -> ToolResult {
    self.ready()?;
    validate::page_id(page_id)?;
    validate::non_empty("title", title)?;

    let current = self
      .call(ApiRequest::get(self.page_url(page_id, "")).query("expand", "version"))
      .await?;
    let version = current["version"]["number"]
      .as_u64()
      .ok_or_else(|| ToolError::Decode(format!("page {page_id} has no version number")))?;

    let payload = PageUpdate {
      id: page_id,
      kind: "page",
      title,
      body: Body::storage(body),
      version: Version {
        number: version + 1,
        message: version_comment,
      },
    };
    self.call(ApiRequest::put(self.page_url(page_id, "")).json(to_body(payload)?)).await
  }

  pub async fn delete_page(&self, page_id: &str) -> ToolResult {
    self.ready()?;
    validate::page_id(page_id)?;

    self.call(ApiRequest::delete(self.page_url(page_id, ""))).await
  }

  /// Direct child pages.
  pub async fn get_children(&self, page_id: &str, limit: u32) -> ToolResult {
    self.ready()?;
    validate::page_id(page_id)?;

    self.call(ApiRequest::get(self.page_url(page_id, "/child/page")).query("limit", limit)).await
  }

  /// All pages below `page_id`. Only Cloud serves this endpoint.
  pub async fn get_descendants(&self, page_id: &str, limit: u32) -> ToolResult {
    self.ready()?;
    validate::page_id(page_id)?;

    self
      .call(ApiRequest::get(self.page_url(page_id, "/descendant/page")).query("limit", limit))
      .await
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use trellis_core::{AuthContext, Deployment, Service};
  use trellis_test_utils::{cloud_config, data_center_config, fast_client_options};
  use wiremock::matchers::{body_json, method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::client::ConfluenceClient;

  fn cloud(server: &MockServer) -> ConfluenceClient {
    let auth = AuthContext::from_config(&cloud_config(&server.uri()), Deployment::Cloud, Service::Confluence);
    ConfluenceClient::new(auth, fast_client_options()).expect("client")
  }

  fn data_center(server: &MockServer) -> ConfluenceClient {
    let auth = AuthContext::from_config(
      &data_center_config(&server.uri()),
      Deployment::DataCenter,
      Service::Confluence,
    );
    ConfluenceClient::new(auth, fast_client_options()).expect("client")
  }

  #[tokio::test]
  async fn test_get_page_with_body() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = cloud(&mock_server);

    Mock::given(method("GET"))
      .and(path("/wiki/rest/api/content/12345"))
      .and(query_param("expand", "body.storage,version,space,ancestors"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "12345", "title": "Runbook" })))
      .expect(1)
      .mount(&mock_server)
      .await;

    assert_eq!(client.get_page("12345", true).await?["title"], "Runbook");
    assert_eq!(
      client.get_page("12a", true).await.unwrap_err().to_string(),
      "Invalid page_id format. Expected: numeric ID"
    );
    Ok(())
  }

  #[tokio::test]
  async fn test_update_page_bumps_version() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = data_center(&mock_server);

    Mock::given(method("GET"))
      .and(path("/rest/api/content/777"))
      .and(query_param("expand", "version"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "777", "version": { "number": 4 } })))
      .expect(1)
      .mount(&mock_server)
      .await;
    Mock::given(method("PUT"))
      .and(path("/rest/api/content/777"))
      .and(body_json(json!({
        "id": "777",
        "type": "page",
        "title": "Runbook",
        "body": { "storage": { "value": "<p>v5</p>", "representation": "storage" } },
        "version": { "number": 5, "message": "typo" }
      })))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "777", "version": { "number": 5 } })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let updated = client.update_page("777", "Runbook", "<p>v5</p>", Some("typo")).await?;
    assert_eq!(updated["version"]["number"], 5);
    Ok(())
  }

  #[tokio::test]
  async fn test_update_page_without_version_fails() {
    let mock_server = MockServer::start().await;
    let client = data_center(&mock_server);

    Mock::given(method("GET"))
      .and(path("/rest/api/content/777"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "777" })))
      .mount(&mock_server)
      .await;

    let err = client.update_page("777", "Runbook", "x", None).await.unwrap_err();
    assert!(err.to_string().contains("no version number"));
  }

  #[tokio::test]
  async fn test_create_page_under_parent() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = cloud(&mock_server);

    Mock::given(method("POST"))
      .and(path("/wiki/rest/api/content"))
      .and(body_json(json!({
        "type": "page",
        "title": "New",
        "space": { "key": "OPS" },
        "body": { "storage": { "value": "<p>hi</p>", "representation": "storage" } },
        "ancestors": [{ "id": "42" }]
      })))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "43" })))
      .expect(1)
      .mount(&mock_server)
      .await;

    assert_eq!(client.create_page("OPS", "New", "<p>hi</p>", Some("42")).await?["id"], "43");
    Ok(())
  }

  #[tokio::test]
  async fn test_find_pages_by_title_uses_cql() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = cloud(&mock_server);

    Mock::given(method("GET"))
      .and(path("/wiki/rest/api/content/search"))
      .and(query_param("cql", "title = \"Templates\" AND type = page"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [{ "id": "9", "title": "Templates" }] })))
      .expect(1)
      .mount(&mock_server)
      .await;

    assert_eq!(client.find_pages_by_title("Templates").await?["results"][0]["id"], "9");
    Ok(())
  }

  #[tokio::test]
  async fn test_children_and_delete() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = cloud(&mock_server);

    Mock::given(method("GET"))
      .and(path("/wiki/rest/api/content/10/child/page"))
      .and(query_param("limit", "50"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
      .expect(1)
      .mount(&mock_server)
      .await;
    Mock::given(method("DELETE"))
      .and(path("/wiki/rest/api/content/10"))
      .respond_with(ResponseTemplate::new(204))
      .expect(1)
      .mount(&mock_server)
      .await;

    assert_eq!(client.get_children("10", 50).await?["results"], json!([]));
    assert_eq!(client.delete_page("10").await?, json!({ "success": true }));
    Ok(())
  }
}
