//! Template context: the request template pages that apply to a ticket.

use serde_json::{Value, json};
use trellis_core::consts::DEFAULT_PAGE_SIZE;
use trellis_core::{ToolError, ToolResult};

use crate::agent::{PageRef, SupportAgent, issue_type, items};
use crate::field::CustomFieldValue;

impl SupportAgent {
  /// Ticket, its template rule and the child pages of the rule's parent page.
  pub async fn get_template_context(&self, issue_key: &str) -> ToolResult {
    let issue = self.tracker().get_issue(issue_key, None).await?;
    let fields = &issue["fields"];
    let issue_type = issue_type(fields);
    let custom_field = self.custom_field(fields);

    if custom_field.as_ref().is_some_and(CustomFieldValue::is_alert) {
      return Ok(json!({
        "issue_key": issue_key,
        "skipped": true,
        "reason": "Alert tickets follow the alert runbook, not a request template",
      }));
    }

    let custom_field_value = match (&custom_field, self.config().custom_field_for(issue_type)) {
      (Some(value), _) => json!(value.display()),
      (None, Some(field_id)) => fields.get(field_id).cloned().unwrap_or(Value::Null),
      (None, None) => Value::Null,
    };

    let mut context = json!({
      "ticket": { "key": issue["key"], "fields": fields },
      "template_config": self.config().template_for(issue_type),
      "custom_field_value": custom_field_value,
      "template_pages": [],
      "template_page_count": 0,
    });

    let Some(rule) = self.config().template_for(issue_type) else {
      return Ok(context);
    };

    match self.template_pages(&rule.parent_page).await {
      Ok((parent, pages)) => {
        context["template_page_count"] = json!(pages.len());
        context["template_pages"] = json!(pages);
        context["template_parent"] = json!(parent);
      }
      Err(e) => {
        tracing::warn!(issue_key, parent_page = %rule.parent_page, error = %e, "Template parent unavailable");
        context["template_error"] = json!(e.to_string());
      }
    }

    Ok(context)
  }

  async fn template_pages(&self, parent_page: &str) -> Result<(PageRef, Vec<PageRef>), ToolError> {
    let parent = self.resolve_page(parent_page).await?;
    let children = self.wiki().get_page_children(&parent.id, DEFAULT_PAGE_SIZE).await?;
    let pages = items(&children, "results").iter().filter_map(PageRef::from_value).collect();
    Ok((parent, pages))
  }

  /// Resolve a page reference: all digits is a page id, anything else a title.
  pub(crate) async fn resolve_page(&self, reference: &str) -> Result<PageRef, ToolError> {
    let page = if !reference.is_empty() && reference.chars().all(|c| c.is_ascii_digit()) {
      self.wiki().get_page(reference, false).await?
    } else {
      let found = self.wiki().find_pages_by_title(reference).await?;
      items(&found, "results").first().cloned().unwrap_or(Value::Null)
    };

    PageRef::from_value(&page).ok_or_else(|| ToolError::validation(format!("Page not found: {reference}")))
  }
}
