//! # Auth Contexts
//!
//! Derives per-service credentials from configuration. Missing settings never
//! abort startup: they flip [`AuthContext::available`] off and every binding
//! operation answers with a stable "not configured" error instead.
//!
//! * Cloud Jira and Confluence share one Basic credential
//!   (`ATLASSIAN_USERNAME` + `ATLASSIAN_API_TOKEN`).
//! * Cloud Bitbucket reuses the username with its own token and needs a
//!   workspace.
//! * Data Center services each carry their own base URL and bearer PAT;
//!   Bitbucket additionally needs a project key.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::config::ConfigMap;
use crate::consts::{
  BITBUCKET_CLOUD_API, ENV_ATLASSIAN_API_TOKEN, ENV_ATLASSIAN_BASE_URL, ENV_ATLASSIAN_USERNAME, ENV_BITBUCKET_API_TOKEN,
  ENV_BITBUCKET_API_URL, ENV_BITBUCKET_PROJECT, ENV_BITBUCKET_WORKSPACE,
};
use crate::error::ToolError;
use crate::platform::Deployment;
use crate::url::normalize_base_url;

/// Upstream platform served by a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
  Jira,
  Confluence,
  Bitbucket,
}

impl Service {
  /// Name used in error messages.
  pub const fn display_name(self) -> &'static str {
    match self {
      Self::Jira => "Jira",
      Self::Confluence => "Confluence",
      Self::Bitbucket => "Bitbucket",
    }
  }

  /// Label used in logs and metric dimensions.
  pub const fn label(self) -> &'static str {
    match self {
      Self::Jira => "jira",
      Self::Confluence => "confluence",
      Self::Bitbucket => "bitbucket",
    }
  }

  const fn data_center_keys(self) -> (&'static str, &'static str) {
    match self {
      Self::Jira => ("JIRA_BASE_URL", "JIRA_PAT_TOKEN"),
      Self::Confluence => ("CONFLUENCE_BASE_URL", "CONFLUENCE_PAT_TOKEN"),
      Self::Bitbucket => ("BITBUCKET_BASE_URL", "BITBUCKET_PAT_TOKEN"),
    }
  }
}

/// Credential presented to the upstream API. Built once, never mutated.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
  Basic { username: String, token: String },
  Bearer { token: String },
}

impl Credential {
  /// Value of the `Authorization` header.
  pub fn header_value(&self) -> String {
    match self {
      Self::Basic { username, token } => format!("Basic {}", STANDARD.encode(format!("{username}:{token}"))),
      Self::Bearer { token } => format!("Bearer {token}"),
    }
  }
}

impl fmt::Debug for Credential {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Basic { username, .. } => f
        .debug_struct("Basic")
        .field("username", username)
        .field("token", &"<redacted>")
        .finish(),
      Self::Bearer { .. } => f.debug_struct("Bearer").field("token", &"<redacted>").finish(),
    }
  }
}

/// Everything a binding needs to talk to one upstream service.
#[derive(Debug, Clone)]
pub struct AuthContext {
  service: Service,
  deployment: Deployment,
  base_url: String,
  credential: Option<Credential>,
  scope: Option<String>,
  required: Vec<&'static str>,
  missing: Vec<&'static str>,
}

impl AuthContext {
  /// Build the context for `service` under the selected deployment.
  pub fn from_config(config: &ConfigMap, deployment: Deployment, service: Service) -> Self {
    match deployment {
      Deployment::Cloud => Self::cloud(config, service),
      Deployment::DataCenter => Self::data_center(config, service),
    }
  }

  /// Cloud contexts: shared Basic credential, workspace for Bitbucket.
  pub fn cloud(config: &ConfigMap, service: Service) -> Self {
    let mut missing = Vec::new();
    let mut require = |key: &'static str| {
      let value = config.get(key).map(str::to_string);
      if value.is_none() {
        missing.push(key);
      }
      value
    };

    let (required, base_url, credential, scope) = match service {
      Service::Jira | Service::Confluence => {
        let base_url = require(ENV_ATLASSIAN_BASE_URL);
        let username = require(ENV_ATLASSIAN_USERNAME);
        let token = require(ENV_ATLASSIAN_API_TOKEN);
        (
          vec![ENV_ATLASSIAN_BASE_URL, ENV_ATLASSIAN_USERNAME, ENV_ATLASSIAN_API_TOKEN],
          base_url,
          basic(username, token),
          None,
        )
      }
      Service::Bitbucket => {
        let username = require(ENV_ATLASSIAN_USERNAME);
        let token = require(ENV_BITBUCKET_API_TOKEN);
        let workspace = require(ENV_BITBUCKET_WORKSPACE);
        let base_url = Some(config.get_or(ENV_BITBUCKET_API_URL, BITBUCKET_CLOUD_API).to_string());
        (
          vec![ENV_ATLASSIAN_USERNAME, ENV_BITBUCKET_API_TOKEN, ENV_BITBUCKET_WORKSPACE],
          base_url,
          basic(username, token),
          workspace,
        )
      }
    };

    let url_key = match service {
      Service::Bitbucket => ENV_BITBUCKET_API_URL,
      _ => ENV_ATLASSIAN_BASE_URL,
    };
    Self::assemble(service, Deployment::Cloud, required, missing, (url_key, base_url), credential, scope)
  }

  /// Data Center contexts: one base URL and bearer PAT per service.
  pub fn data_center(config: &ConfigMap, service: Service) -> Self {
    let (url_key, token_key) = service.data_center_keys();
    let mut required = vec![url_key, token_key];
    let mut missing = Vec::new();
    let mut require = |key: &'static str| {
      let value = config.get(key).map(str::to_string);
      if value.is_none() {
        missing.push(key);
      }
      value
    };

    let base_url = require(url_key);
    let credential = require(token_key).map(|token| Credential::Bearer { token });
    let scope = if service == Service::Bitbucket {
      required.push(ENV_BITBUCKET_PROJECT);
      require(ENV_BITBUCKET_PROJECT)
    } else {
      None
    };

    Self::assemble(
      service,
      Deployment::DataCenter,
      required,
      missing,
      (url_key, base_url),
      credential,
      scope,
    )
  }

  fn assemble(
    service: Service,
    deployment: Deployment,
    required: Vec<&'static str>,
    mut missing: Vec<&'static str>,
    (url_key, base_url): (&'static str, Option<String>),
    credential: Option<Credential>,
    scope: Option<String>,
  ) -> Self {
    let base_url = match base_url.as_deref().map(normalize_base_url) {
      Some(Ok(url)) => url,
      Some(Err(e)) => {
        tracing::warn!(service = service.label(), key = url_key, error = %e, "Ignoring unparsable base URL");
        missing.push(url_key);
        String::new()
      }
      None => String::new(),
    };

    Self {
      service,
      deployment,
      base_url,
      credential,
      scope,
      required,
      missing,
    }
  }

  /// True iff every required setting is present and non-empty.
  pub fn available(&self) -> bool {
    self.missing.is_empty()
  }

  /// Return the canonical "not configured" error unless the context is usable.
  pub fn ensure_available(&self) -> Result<(), ToolError> {
    if self.available() {
      Ok(())
    } else {
      Err(self.not_configured())
    }
  }

  /// The canonical "not configured" error for this service.
  pub fn not_configured(&self) -> ToolError {
    ToolError::NotConfigured {
      service: self.service.display_name().to_string(),
      vars: self.required.join(", "),
    }
  }

  pub fn service(&self) -> Service {
    self.service
  }

  pub fn deployment(&self) -> Deployment {
    self.deployment
  }

  /// Normalised base URL (empty when not configured).
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Workspace (Cloud Bitbucket) or project key (Data Center Bitbucket).
  pub fn scope(&self) -> Option<&str> {
    self.scope.as_deref()
  }

  /// Settings that were missing when the context was built.
  pub fn missing(&self) -> &[&'static str] {
    &self.missing
  }

  /// `Authorization` header value, when a credential is configured.
  pub fn authorization(&self) -> Option<String> {
    self.credential.as_ref().map(Credential::header_value)
  }
}

fn basic(username: Option<String>, token: Option<String>) -> Option<Credential> {
  match (username, token) {
    (Some(username), Some(token)) => Some(Credential::Basic { username, token }),
    _ => None,
  }
}
