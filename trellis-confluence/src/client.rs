use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use trellis_core::{ApiRequest, AuthContext, ClientOptions, Deployment, HttpClient, ToolError, ToolResult};

use crate::consts::{CLOUD_API_ROOT, DATA_CENTER_API_ROOT};

/// Authenticated Confluence REST client.
pub struct ConfluenceClient {
  auth: AuthContext,
  http: HttpClient,
  api_root: String,
}

impl ConfluenceClient {
  pub fn new(auth: AuthContext, options: ClientOptions) -> Result<Self> {
    let http = HttpClient::new(&auth, options)?;
    let api_root = api_root(auth.base_url(), auth.deployment());
    Ok(Self { auth, http, api_root })
  }

  pub fn auth(&self) -> &AuthContext {
    &self.auth
  }

  pub(crate) fn ready(&self) -> Result<(), ToolError> {
    self.auth.ensure_available()
  }

  pub(crate) fn url(&self, path: &str) -> String {
    format!("{}/{path}", self.api_root)
  }

  pub(crate) async fn call(&self, request: ApiRequest) -> ToolResult {
    self.http.json(request).await
  }
}

/// Cloud sites are sometimes configured with the `/wiki` suffix already.
fn api_root(base_url: &str, deployment: Deployment) -> String {
  match deployment {
    Deployment::Cloud => match base_url.strip_suffix("/wiki") {
      Some(site) => format!("{site}/{CLOUD_API_ROOT}"),
      None => format!("{base_url}/{CLOUD_API_ROOT}"),
    },
    Deployment::DataCenter => format!("{base_url}/{DATA_CENTER_API_ROOT}"),
  }
}

pub(crate) fn to_body(payload: impl Serialize) -> Result<Value, ToolError> {
  serde_json::to_value(payload).map_err(|e| ToolError::Decode(e.to_string()))
}
