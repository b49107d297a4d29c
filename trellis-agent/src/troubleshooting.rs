//! # Troubleshooting Context
//!
//! Pulls the code-host link out of a ticket description, resolves the
//! repository's default branch and collects the troubleshooting pages below
//! a configured wiki parent. Data Center wikis have no descendants endpoint,
//! so the page tree is walked one level at a time there.

use std::collections::HashSet;

use serde_json::{Value, json};
use trellis_core::consts::DEFAULT_PAGE_SIZE;
use trellis_core::{ToolError, ToolResult};

use crate::agent::{PageRef, SupportAgent, items, summary};
use crate::consts::{FALLBACK_BRANCH, MAX_WALK_DEPTH};
use crate::links::find_repository_link;

impl SupportAgent {
  /// `parent` overrides the configured troubleshooting parent page.
  pub async fn get_troubleshooting_context(&self, issue_key: &str, parent: Option<&str>) -> ToolResult {
    let issue = self.tracker().get_issue(issue_key, None).await?;
    let fields = &issue["fields"];
    let description = match &fields["description"] {
      Value::String(text) => text.clone(),
      Value::Null => String::new(),
      other => other.to_string(),
    };

    let link = find_repository_link(&description);
    let browse = link.as_ref().and_then(|link| link.browse.as_ref());
    let repo_slug = browse.map(|b| b.repo_slug.as_str());

    let branch = match repo_slug {
      Some(slug) => Some(self.default_branch(slug).await),
      None => None,
    };

    let mut context = json!({
      "ticket": {
        "key": issue["key"],
        "summary": summary(fields),
        "description": description,
      },
      "bitbucket_url": link.as_ref().map(|link| link.url.as_str()),
      "repo_slug": repo_slug,
      "file_path": browse.map(|b| b.file_path.as_str()),
      "branch": branch,
      "troubleshooting_docs": [],
      "doc_count": 0,
    });

    let parent = parent
      .filter(|p| !p.trim().is_empty())
      .or(self.config().troubleshooting_parent.as_deref());
    let Some(parent) = parent else {
      return Ok(context);
    };

    match self.troubleshooting_docs(parent).await {
      Ok(docs) => {
        context["doc_count"] = json!(docs.len());
        context["troubleshooting_docs"] = json!(docs);
      }
      Err(e) => {
        tracing::warn!(issue_key, parent, error = %e, "Troubleshooting parent unavailable");
        context["troubleshooting_error"] = json!(e.to_string());
      }
    }

    Ok(context)
  }

  async fn default_branch(&self, repo_slug: &str) -> String {
    if !self.code().available() {
      return FALLBACK_BRANCH.to_string();
    }

    match self.code().get_default_branch(repo_slug).await {
      Ok(found) => match found["branch"].as_str() {
        Some(branch) if !branch.is_empty() => branch.to_string(),
        _ => FALLBACK_BRANCH.to_string(),
      },
      Err(e) => {
        tracing::debug!(repo_slug, error = %e, "Default branch lookup failed");
        FALLBACK_BRANCH.to_string()
      }
    }
  }

  async fn troubleshooting_docs(&self, parent: &str) -> Result<Vec<PageRef>, ToolError> {
    let root = self.resolve_page(parent).await?;

    match self.wiki().get_page_descendants(&root.id, DEFAULT_PAGE_SIZE).await {
      Ok(found) => {
        let docs: Vec<PageRef> = items(&found, "results").iter().filter_map(PageRef::from_value).collect();
        if !docs.is_empty() {
          return Ok(docs);
        }
      }
      Err(e) => tracing::debug!(page_id = %root.id, error = %e, "Descendants unavailable, walking children"),
    }

    self.walk_children(&root.id).await
  }

  /// Depth-first walk over child pages, bounded by [`MAX_WALK_DEPTH`].
  async fn walk_children(&self, root_id: &str) -> Result<Vec<PageRef>, ToolError> {
    let mut docs = Vec::new();
    let mut visited = HashSet::from([root_id.to_string()]);
    let mut pending = vec![(root_id.to_string(), 0usize)];

    while let Some((page_id, depth)) = pending.pop() {
      let children = match self.wiki().get_page_children(&page_id, DEFAULT_PAGE_SIZE).await {
        Ok(children) => children,
        Err(e) if page_id == root_id => return Err(e),
        Err(e) => {
          tracing::debug!(page_id, error = %e, "Skipping unreadable subtree");
          continue;
        }
      };

      let mut next = Vec::new();
      for child in items(&children, "results").iter().filter_map(PageRef::from_value) {
        if visited.insert(child.id.clone()) {
          if depth + 1 < MAX_WALK_DEPTH {
            next.push((child.id.clone(), depth + 1));
          }
          docs.push(child);
        }
      }
      pending.extend(next.into_iter().rev());
    }

    Ok(docs)
  }
}
