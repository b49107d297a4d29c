use trellis_core::{ApiRequest, ToolResult, validate};

use crate::client::JiraClient;

impl JiraClient {
  /// Look up one user. `param` is `accountId` on Cloud and `username` on Data Center.
  pub async fn get_user(&self, param: &str, identifier: &str) -> ToolResult {
    self.ready()?;
    validate::non_empty("identifier", identifier)?;

    self.call(ApiRequest::get(self.url("user")).query(param, identifier)).await
  }

  /// Find users. `param` is `query` on Cloud and `username` on Data Center.
  pub async fn search_users(&self, param: &str, query: &str, max_results: u32) -> ToolResult {
    self.ready()?;
    validate::non_empty("query", query)?;

    let request = ApiRequest::get(self.url("user/search"))
      .query(param, query)
      .query("maxResults", max_results);
    self.call(request).await
  }

  /// The user the credentials belong to
  pub async fn current_user(&self) -> ToolResult {
    self.ready()?;
    self.call(ApiRequest::get(self.url("myself"))).await
  }
}
