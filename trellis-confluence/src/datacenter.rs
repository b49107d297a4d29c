use async_trait::async_trait;
use trellis_core::{ToolError, ToolResult, validate};

use crate::client::ConfluenceClient;
use crate::wiki::Wiki;

/// Confluence Data Center. Has no descendants endpoint; callers walk
/// children instead.
pub struct DataCenterConfluence {
  client: ConfluenceClient,
}

impl DataCenterConfluence {
  pub fn new(client: ConfluenceClient) -> Self {
    Self { client }
  }
}

#[async_trait]
impl Wiki for DataCenterConfluence {
  fn client(&self) -> &ConfluenceClient {
    &self.client
  }

  async fn get_page_descendants(&self, page_id: &str, _limit: u32) -> ToolResult {
    self.client.auth().ensure_available()?;
    validate::page_id(page_id)?;
    Err(ToolError::NotSupported {
      operation: "get_page_descendants",
      deployment: self.deployment().display_name(),
    })
  }
}
