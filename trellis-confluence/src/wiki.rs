//! The wiki capability.
//!
//! [`Wiki`] is the union of page and space operations both flavours
//! support. Operations one flavour lacks answer with a not-supported error.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use trellis_core::{AuthContext, ClientOptions, ConfigMap, Deployment, Service, ToolResult};

use crate::client::ConfluenceClient;
use crate::{CloudConfluence, DataCenterConfluence};

#[async_trait]
pub trait Wiki: Send + Sync {
  fn client(&self) -> &ConfluenceClient;

  fn available(&self) -> bool {
    self.client().auth().available()
  }

  fn deployment(&self) -> Deployment {
    self.client().auth().deployment()
  }

  /// Every page below `page_id`, where the flavour offers it.
  async fn get_page_descendants(&self, page_id: &str, limit: u32) -> ToolResult;

  async fn get_page(&self, page_id: &str, include_body: bool) -> ToolResult {
    self.client().get_page(page_id, include_body).await
  }

  async fn get_page_by_title(&self, space_key: &str, title: &str) -> ToolResult {
    self.client().get_page_by_title(space_key, title).await
  }

  /// CQL title lookup across all spaces.
  async fn find_pages_by_title(&self, title: &str) -> ToolResult {
    self.client().find_pages_by_title(title).await
  }

  async fn search_pages(&self, cql: &str, limit: u32) -> ToolResult {
    self.client().search(cql, limit).await
  }

  async fn create_page(&self, space_key: &str, title: &str, body: &str, parent_id: Option<&str>) -> ToolResult {
    self.client().create_page(space_key, title, body, parent_id).await
  }

  async fn update_page(&self, page_id: &str, title: &str, body: &str, version_comment: Option<&str>) -> ToolResult {
    self.client().update_page(page_id, title, body, version_comment).await
  }

  async fn delete_page(&self, page_id: &str) -> ToolResult {
    self.client().delete_page(page_id).await
  }

  async fn get_page_children(&self, page_id: &str, limit: u32) -> ToolResult {
    self.client().get_children(page_id, limit).await
  }

  async fn list_spaces(&self, limit: u32) -> ToolResult {
    self.client().list_spaces(limit).await
  }

  async fn get_space(&self, space_key: &str) -> ToolResult {
    self.client().get_space(space_key).await
  }

  async fn add_page_comment(&self, page_id: &str, body: &str) -> ToolResult {
    self.client().add_page_comment(page_id, body).await
  }

  async fn get_page_comments(&self, page_id: &str, limit: u32) -> ToolResult {
    self.client().get_page_comments(page_id, limit).await
  }
}

/// Build the wiki binding for the selected deployment.
pub fn connect(config: &ConfigMap, deployment: Deployment, options: ClientOptions) -> Result<Arc<dyn Wiki>> {
  let auth = AuthContext::from_config(config, deployment, Service::Confluence);
  if !auth.available() {
    tracing::info!(missing = ?auth.missing(), "Confluence credentials incomplete; wiki tools will report not configured");
  }
  let client = ConfluenceClient::new(auth, options)?;
  Ok(match deployment {
    Deployment::Cloud => Arc::new(CloudConfluence::new(client)),
    Deployment::DataCenter => Arc::new(DataCenterConfluence::new(client)),
  })
}
