//! JSON-RPC message shapes spoken on the MCP endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol revision announced by `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const JSONRPC_VERSION: &str = "2.0";

/// Inbound message. `method` is optional here so a missing method can be
/// reported as an invalid request instead of a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JsonRpcRequest {
  #[serde(default)]
  pub id: Option<Value>,
  #[serde(default)]
  pub method: Option<String>,
  #[serde(default)]
  pub params: Option<Value>,
}

/// Outbound message: exactly one of `result` or `error` is set.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
  pub jsonrpc: &'static str,
  pub id: Value,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub result: Option<Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
  pub fn success(id: Option<Value>, result: Value) -> Self {
    Self {
      jsonrpc: JSONRPC_VERSION,
      id: id.unwrap_or(Value::Null),
      result: Some(result),
      error: None,
    }
  }

  pub fn failure(id: Option<Value>, error: JsonRpcError) -> Self {
    Self {
      jsonrpc: JSONRPC_VERSION,
      id: id.unwrap_or(Value::Null),
      result: None,
      error: Some(error),
    }
  }
}

/// JSON-RPC error object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonRpcError {
  pub code: i32,
  pub message: String,
}

impl JsonRpcError {
  pub fn parse_error(message: impl Into<String>) -> Self {
    Self {
      code: -32700,
      message: message.into(),
    }
  }

  pub fn invalid_request(message: impl Into<String>) -> Self {
    Self {
      code: -32600,
      message: message.into(),
    }
  }

  pub fn method_not_found(method: &str) -> Self {
    Self {
      code: -32601,
      message: format!("Method not found: {method}"),
    }
  }

  pub fn invalid_params(message: impl Into<String>) -> Self {
    Self {
      code: -32602,
      message: message.into(),
    }
  }

  pub fn internal_error(message: impl Into<String>) -> Self {
    Self {
      code: -32603,
      message: message.into(),
    }
  }
}

/// `tools/call` parameters
#[derive(Debug, Clone, Deserialize)]
pub struct CallToolParams {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub arguments: Option<Value>,
}

/// `initialize` result
#[derive(Debug, Clone, Serialize)]
pub struct InitializeResult {
  #[serde(rename = "protocolVersion")]
  pub protocol_version: &'static str,
  pub capabilities: ServerCapabilities,
  #[serde(rename = "serverInfo")]
  pub server_info: ServerInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerCapabilities {
  pub tools: ToolsCapability,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolsCapability {
  #[serde(rename = "listChanged")]
  pub list_changed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
  pub name: &'static str,
  pub version: &'static str,
}

impl InitializeResult {
  pub fn current() -> Self {
    Self {
      protocol_version: PROTOCOL_VERSION,
      capabilities: ServerCapabilities {
        tools: ToolsCapability { list_changed: false },
      },
      server_info: ServerInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
      },
    }
  }
}
