use async_trait::async_trait;
use trellis_core::ToolResult;

use crate::client::ConfluenceClient;
use crate::wiki::Wiki;

/// Confluence Cloud.
pub struct CloudConfluence {
  client: ConfluenceClient,
}

impl CloudConfluence {
  pub fn new(client: ConfluenceClient) -> Self {
    Self { client }
  }
}

#[async_trait]
impl Wiki for CloudConfluence {
  fn client(&self) -> &ConfluenceClient {
    &self.client
  }

  async fn get_page_descendants(&self, page_id: &str, limit: u32) -> ToolResult {
    self.client.get_descendants(page_id, limit).await
  }
}
