use serde_json::json;
use trellis_core::url::encode_path_segment;
use trellis_core::{ApiRequest, ToolError, ToolResult, validate};

use crate::client::JiraClient;
use crate::models::{IdRef, TransitionRequest};

impl JiraClient {
  /// Get available transitions for an issue
  pub async fn get_transitions(&self, issue_key: &str) -> ToolResult {
    self.ready()?;
    validate::issue_key(issue_key)?;

    let url = self.url(&format!("issue/{}/transitions", encode_path_segment(issue_key)));
    self.call(ApiRequest::get(url)).await
  }

  /// Transition an issue to a new status, optionally leaving a comment
  pub async fn transition_issue(&self, issue_key: &str, transition_id: &str, comment: Option<&str>) -> ToolResult {
    self.ready()?;
    validate::issue_key(issue_key)?;
    validate::non_empty("transition_id", transition_id)?;

    let payload = TransitionRequest {
      transition: IdRef { id: transition_id },
      update: comment.map(|body| json!({ "comment": [{ "add": { "body": body } }] })),
    };
    let body = serde_json::to_value(payload).map_err(|e| ToolError::Decode(e.to_string()))?;

    let url = self.url(&format!("issue/{}/transitions", encode_path_segment(issue_key)));
    self.call(ApiRequest::post(url).json(body)).await
  }
}
