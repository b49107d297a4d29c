use trellis_core::{ApiRequest, ToolResult, validate};

use crate::client::JiraClient;

impl JiraClient {
  /// Run a JQL search against `endpoint` (`search` or `search/jql`).
  pub async fn search(&self, endpoint: &str, jql: &str, max_results: u32, fields: &str) -> ToolResult {
    self.ready()?;
    validate::non_empty("jql", jql)?;

    let request = ApiRequest::get(self.url(endpoint))
      .query("jql", jql)
      .query("maxResults", max_results)
      .query("fields", fields);
    self.call(request).await
  }
}
