//! # Tool Errors
//!
//! Every backend operation and agent flow returns a [`ToolResult`]. Failures
//! never escape as transport-level errors to the MCP client: they are turned
//! into an `{"error": "<message>"}` record by [`ToolError::to_record`] and
//! delivered inside an ordinary 200 response. The messages are part of the
//! contract with downstream AI clients, so keep them stable.

use serde_json::{Value, json};
use thiserror::Error;

/// Result of a tool operation: the decoded upstream JSON or a structured error.
pub type ToolResult = Result<Value, ToolError>;

/// Errors that can occur while executing a tool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
  #[error("{service} not configured. Set: {vars}")]
  NotConfigured { service: String, vars: String },

  #[error("{0}")]
  Validation(String),

  #[error("Invalid argument '{name}': {reason}")]
  InvalidArgument { name: String, reason: String },

  #[error("HTTP {status}: {body}")]
  Upstream { status: u16, body: String },

  #[error("HTTP {status} after {attempts} attempts")]
  RetriesExhausted { status: u16, attempts: u32 },

  #[error("{0}")]
  Transport(String),

  #[error("Failed to decode upstream response: {0}")]
  Decode(String),

  #[error("not-supported: {operation} is not available on {deployment}")]
  NotSupported {
    operation: &'static str,
    deployment: &'static str,
  },

  #[error("Unknown tool: {0}")]
  UnknownTool(String),

  #[error("Ticket support agent not configured")]
  AgentNotConfigured,
}

impl ToolError {
  /// Build a validation error from any message.
  pub fn validation(message: impl Into<String>) -> Self {
    Self::Validation(message.into())
  }

  /// Render the `{"error": "..."}` record handed back to the MCP client.
  pub fn to_record(&self) -> Value {
    json!({ "error": self.to_string() })
  }

  /// Whether the error was raised before any HTTP request was attempted.
  pub fn is_local(&self) -> bool {
    matches!(
      self,
      Self::NotConfigured { .. }
        | Self::Validation(_)
        | Self::InvalidArgument { .. }
        | Self::NotSupported { .. }
        | Self::UnknownTool(_)
        | Self::AgentNotConfigured
    )
  }
}

/// Collapse a [`ToolResult`] into the JSON value returned to the caller.
pub fn into_record(result: ToolResult) -> Value {
  match result {
    Ok(value) => value,
    Err(e) => e.to_record(),
  }
}
