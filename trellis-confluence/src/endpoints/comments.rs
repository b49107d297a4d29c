use trellis_core::url::encode_path_segment;
use trellis_core::{ApiRequest, ToolResult, validate};

use crate::client::{ConfluenceClient, to_body};
use crate::models::{Body, Container, NewComment};

impl ConfluenceClient {
  /// Add a footer comment to a page.
  pub async fn add_page_comment(&self, page_id: &str, body: &str) -> ToolResult {
    self.ready()?;
    validate::page_id(page_id)?;
    validate::non_empty("body", body)?;

    let payload = NewComment {
      kind: "comment",
      container: Container {
        id: page_id,
        kind: "page",
      },
      body: Body::storage(body),
    };
    self.call(ApiRequest::post(self.url("content")).json(to_body(payload)?)).await
  }

  pub async fn get_page_comments(&self, page_id: &str, limit: u32) -> ToolResult {
    self.ready()?;
    validate::page_id(page_id)?;

    let url = self.url(&format!("content/{}/child/comment", encode_path_segment(page_id)));
    let request = ApiRequest::get(url)
      .query("expand", "body.storage")
      .query("limit", limit);
    self.call(request).await
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use trellis_core::{AuthContext, Deployment, Service};
  use trellis_test_utils::{data_center_config, fast_client_options};
  use wiremock::matchers::{body_json, header, method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::client::ConfluenceClient;

  #[tokio::test]
  async fn test_page_comments() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let auth = AuthContext::from_config(
      &data_center_config(&mock_server.uri()),
      Deployment::DataCenter,
      Service::Confluence,
    );
    let client = ConfluenceClient::new(auth, fast_client_options())?;

    Mock::given(method("POST"))
      .and(path("/rest/api/content"))
      .and(header("Authorization", "Bearer confluence-pat"))
      .and(body_json(json!({
        "type": "comment",
        "container": { "id": "5", "type": "page" },
        "body": { "storage": { "value": "Looks good", "representation": "storage" } }
      })))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "900" })))
      .expect(1)
      .mount(&mock_server)
      .await;
    Mock::given(method("GET"))
      .and(path("/rest/api/content/5/child/comment"))
      .and(query_param("limit", "25"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [{ "id": "900" }] })))
      .expect(1)
      .mount(&mock_server)
      .await;

    assert_eq!(client.add_page_comment("5", "Looks good").await?["id"], "900");
    assert_eq!(client.get_page_comments("5", 25).await?["results"][0]["id"], "900");
    Ok(())
  }
}
