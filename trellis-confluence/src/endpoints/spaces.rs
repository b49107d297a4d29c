use trellis_core::url::encode_path_segment;
use trellis_core::{ApiRequest, ToolResult, validate};

use crate::client::ConfluenceClient;

impl ConfluenceClient {
  pub async fn list_spaces(&self, limit: u32) -> ToolResult {
    self.ready()?;
    self.call(ApiRequest::get(self.url("space")).query("limit", limit)).await
  }

  pub async fn get_space(&self, space_key: &str) -> ToolResult {
    self.ready()?;
    validate::space_key(space_key)?;

    let url = self.url(&format!("space/{}", encode_path_segment(space_key)));
    self.call(ApiRequest::get(url)).await
  }
}
