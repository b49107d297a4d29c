//! # Request Handler
//!
//! axum router for the MCP endpoint. `GET /` is the health probe; `POST /`
//! and `POST /mcp` accept JSON-RPC messages. Tool failures are ordinary
//! results carrying an `{"error": ...}` record; only malformed messages,
//! unknown methods and unknown tools are rejected at the HTTP level.

use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, http};
use serde_json::{Value, json};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use trellis_core::Metric;
use trellis_core::error::into_record;
use trellis_core::telemetry::emit;
use uuid::Uuid;

use crate::context::ServerContext;
use crate::dispatch::dispatch;
use crate::protocol::{CallToolParams, InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// Build the application router over a shared context.
pub fn router(context: Arc<ServerContext>) -> Router {
  Router::new()
    .route("/", get(health).post(rpc))
    .route("/health", get(health))
    .route("/mcp", post(rpc))
    .layer(TraceLayer::new_for_http().make_span_with(|request: &http::Request<_>| {
      tracing::info_span!("http_request", method = %request.method(), uri = %request.uri())
    }))
    .layer(CatchPanicLayer::custom(panic_response))
    .with_state(context)
}

async fn health(State(context): State<Arc<ServerContext>>) -> Json<Value> {
  Json(json!({
    "status": "healthy",
    "tools": context.registry.len(),
    "platform": context.deployment.label(),
  }))
}

fn reply(status: StatusCode, body: JsonRpcResponse) -> Response {
  (status, Json(body)).into_response()
}

fn reject(id: Option<Value>, error: JsonRpcError) -> Response {
  reply(StatusCode::BAD_REQUEST, JsonRpcResponse::failure(id, error))
}

async fn rpc(State(context): State<Arc<ServerContext>>, body: Bytes) -> Response {
  let message: Value = match serde_json::from_slice(&body) {
    Ok(message) => message,
    Err(e) => return reject(None, JsonRpcError::parse_error(format!("Parse error: {e}"))),
  };
  if !message.is_object() {
    return reject(None, JsonRpcError::invalid_request("Request must be a JSON object"));
  }
  let request: JsonRpcRequest = match serde_json::from_value(message) {
    Ok(request) => request,
    Err(e) => return reject(None, JsonRpcError::invalid_request(format!("Invalid request: {e}"))),
  };

  let JsonRpcRequest { id, method, params } = request;
  let Some(method) = method else {
    return reject(id, JsonRpcError::invalid_request("Missing method"));
  };
  tracing::debug!(method = %method, "Incoming request");

  let result = match method.as_str() {
    "initialize" => json!(InitializeResult::current()),
    "ping" => json!({}),
    "notifications/initialized" => return (StatusCode::OK, Json(json!({}))).into_response(),
    "tools/list" => json!({ "tools": context.registry.tools() }),
    "tools/call" => {
      let params = params
        .map(serde_json::from_value::<CallToolParams>)
        .transpose()
        .ok()
        .flatten();
      let Some(CallToolParams { name: Some(name), arguments }) = params else {
        return reject(id, JsonRpcError::invalid_request("Missing tool name"));
      };
      if context.registry.get(&name).is_none() {
        return reject(id, JsonRpcError::invalid_params(format!("Unknown tool: {name}")));
      }
      call_tool(&context, &name, arguments.as_ref()).await
    }
    other => return reject(id, JsonRpcError::method_not_found(other)),
  };

  reply(StatusCode::OK, JsonRpcResponse::success(id, result))
}

/// Run one tool with request logging and invocation metrics.
async fn call_tool(context: &ServerContext, name: &str, arguments: Option<&Value>) -> Value {
  let request_id = Uuid::new_v4().to_string();
  let platform = context.deployment.label();
  let started = Instant::now();
  tracing::info!(request_id = %request_id, tool_name = name, platform, "Tool call started");

  let result = dispatch(context, name, arguments).await;
  let duration_ms = started.elapsed().as_secs_f64() * 1000.0;

  let status = match &result {
    Ok(_) => {
      tracing::info!(request_id = %request_id, tool_name = name, platform, duration_ms, "Tool call succeeded");
      "success"
    }
    Err(e) => {
      tracing::warn!(request_id = %request_id, tool_name = name, platform, duration_ms, error = %e, "Tool call failed");
      "error"
    }
  };

  let metrics = context.metrics.as_ref();
  emit(
    metrics,
    Metric::count("ToolInvocation")
      .dimension("tool", name)
      .dimension("platform", platform)
      .dimension("status", status),
  );
  emit(
    metrics,
    Metric::millis("ToolDuration", duration_ms)
      .dimension("tool", name)
      .dimension("platform", platform),
  );

  into_record(result)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
  let detail = panic
    .downcast_ref::<String>()
    .cloned()
    .or_else(|| panic.downcast_ref::<&str>().map(|s| s.to_string()))
    .unwrap_or_else(|| "unknown panic".to_string());
  tracing::error!(panic = %detail, "Request handler panicked");
  reply(
    StatusCode::INTERNAL_SERVER_ERROR,
    JsonRpcResponse::failure(None, JsonRpcError::internal_error("Internal error")),
  )
}
