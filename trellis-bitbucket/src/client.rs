use anyhow::Result;
use trellis_core::{ApiRequest, AuthContext, ClientOptions, HttpClient, ToolError, ToolResult};

/// Authenticated Bitbucket client shared by both flavours.
pub struct BitbucketClient {
  auth: AuthContext,
  http: HttpClient,
}

impl BitbucketClient {
  pub fn new(auth: AuthContext, options: ClientOptions) -> Result<Self> {
    let http = HttpClient::new(&auth, options)?;
    Ok(Self { auth, http })
  }

  pub fn auth(&self) -> &AuthContext {
    &self.auth
  }

  pub(crate) fn ready(&self) -> Result<(), ToolError> {
    self.auth.ensure_available()
  }

  /// Workspace (Cloud) or project key (Data Center). Empty when unconfigured.
  pub(crate) fn scope(&self) -> &str {
    self.auth.scope().unwrap_or_default()
  }

  pub(crate) fn base_url(&self) -> &str {
    self.auth.base_url()
  }

  pub(crate) async fn call(&self, request: ApiRequest) -> ToolResult {
    self.http.json(request).await
  }

  pub(crate) async fn text(&self, request: ApiRequest) -> Result<String, ToolError> {
    self.http.text(request).await
  }
}
