//! Sorting the open support queue into alerts and everything else.

use serde_json::json;
use trellis_core::ToolResult;
use trellis_core::consts::DEFAULT_PAGE_SIZE;

use crate::agent::{IssueRef, SupportAgent, items};
use crate::field::CustomFieldValue;

impl SupportAgent {
  /// Run the support JQL and partition the hits by the discriminating
  /// custom field. The field id comes from the first template rule.
  pub async fn classify_support_tickets(&self) -> ToolResult {
    let support_jql = &self.config().support_jql;
    let found = self
      .tracker()
      .search_issues(support_jql, DEFAULT_PAGE_SIZE, "summary,issuetype")
      .await?;
    let field_id = self.config().primary_custom_field();

    let mut alert_tickets = Vec::new();
    let mut other_tickets = Vec::new();

    for hit in items(&found, "issues") {
      let Some(key) = hit["key"].as_str() else {
        continue;
      };

      let issue = match self.tracker().get_issue(key, None).await {
        Ok(issue) => issue,
        Err(e) => {
          tracing::warn!(issue_key = key, error = %e, "Falling back to search fields for classification");
          hit.clone()
        }
      };

      let is_alert = field_id
        .and_then(|id| CustomFieldValue::from_fields(&issue["fields"], id))
        .is_some_and(|value| value.is_alert());

      let ticket = IssueRef::from_value(&issue);
      if is_alert {
        alert_tickets.push(ticket);
      } else {
        other_tickets.push(ticket);
      }
    }

    tracing::debug!(
      alerts = alert_tickets.len(),
      other = other_tickets.len(),
      "Classified support tickets"
    );

    Ok(json!({
      "total_alerts": alert_tickets.len(),
      "total_other": other_tickets.len(),
      "total": alert_tickets.len() + other_tickets.len(),
      "alert_tickets": alert_tickets,
      "other_tickets": other_tickets,
    }))
  }
}
