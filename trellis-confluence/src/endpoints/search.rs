use trellis_core::{ApiRequest, ToolResult, validate};

use crate::client::ConfluenceClient;

impl ConfluenceClient {
  /// Run a CQL query.
  pub async fn search(&self, cql: &str, limit: u32) -> ToolResult {
    self.ready()?;
    validate::non_empty("cql", cql)?;

    let request = ApiRequest::get(self.url("content/search"))
      .query("cql", cql)
      .query("limit", limit);
    self.call(request).await
  }
}
