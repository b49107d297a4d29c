use trellis_core::url::encode_path_segment;
use trellis_core::{ApiRequest, ToolResult, validate};

use crate::client::JiraClient;

impl JiraClient {
  /// Get a project by key
  pub async fn get_project(&self, project_key: &str) -> ToolResult {
    self.ready()?;
    validate::project_key(project_key)?;

    let url = self.url(&format!("project/{}", encode_path_segment(project_key)));
    self.call(ApiRequest::get(url)).await
  }

  /// List projects visible to the configured user
  pub async fn list_projects(&self) -> ToolResult {
    self.ready()?;
    self.call(ApiRequest::get(self.url("project"))).await
  }
}
