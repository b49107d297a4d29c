//! Arguments and payload helpers shared by both flavours.

use serde_json::{Value, json};

/// Arguments of `create_pull_request`.
#[derive(Debug, Clone, Default)]
pub struct NewPullRequest<'a> {
  pub title: &'a str,
  pub source_branch: &'a str,
  pub destination_branch: &'a str,
  pub description: &'a str,
  pub reviewers: &'a [String],
}

/// Body of a title/description update; absent fields are left out.
pub(crate) fn pull_request_changes(title: Option<&str>, description: Option<&str>) -> Value {
  let mut body = json!({});
  if let Some(title) = title {
    body["title"] = json!(title);
  }
  if let Some(description) = description {
    body["description"] = json!(description);
  }
  body
}
