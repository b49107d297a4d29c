//! # Dispatcher
//!
//! Resolves a tool name to its capability and runs it inside a tool scope,
//! so every outbound request made on its behalf is tagged with the tool name.

use serde_json::{Map, Value};
use trellis_core::telemetry::tool_scope;
use trellis_core::{ToolError, ToolResult};

use crate::args::Args;
use crate::context::ServerContext;
use crate::registry::ToolGroup;
use crate::tools;

/// Run `name` with the raw `arguments` of a `tools/call` request.
pub async fn dispatch(context: &ServerContext, name: &str, arguments: Option<&Value>) -> ToolResult {
  let empty = Map::new();
  let values = match arguments {
    None | Some(Value::Null) => &empty,
    Some(Value::Object(values)) => values,
    Some(_) => return Err(ToolError::validation("arguments must be an object")),
  };

  let mut args = Args::new(values);
  dispatch_args(context, name, &mut args).await
}

pub async fn dispatch_args(context: &ServerContext, name: &str, args: &mut Args<'_>) -> ToolResult {
  let group = context
    .registry
    .get(name)
    .map(|tool| tool.group)
    .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

  tool_scope(name, async {
    match group {
      ToolGroup::Tracker => tools::jira::call(context.tracker.as_ref(), name, args).await,
      ToolGroup::Wiki => tools::confluence::call(context.wiki.as_ref(), name, args).await,
      ToolGroup::CodeHost => tools::bitbucket::call(context.code.as_ref(), name, args).await,
      ToolGroup::Agent => tools::agent::call(context, name, args).await,
    }
  })
  .await
}
