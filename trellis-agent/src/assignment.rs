//! Everything the caller needs to suggest an assignee. Ranking is left to
//! the caller; this only gathers data.

use serde_json::{Map, Value, json};
use trellis_core::ToolResult;
use trellis_core::consts::DEFAULT_PAGE_SIZE;

use crate::agent::SupportAgent;
use crate::consts::MAX_OPEN_ISSUES;

impl SupportAgent {
  pub async fn get_assignment_context(&self, issue_key: &str) -> ToolResult {
    let ticket = self.tracker().get_issue(issue_key, None).await?;
    let comments = match self.tracker().get_issue_comments(issue_key, DEFAULT_PAGE_SIZE).await {
      Ok(comments) => comments,
      Err(e) => e.to_record(),
    };
    let team_workload = self.get_team_workload().await?;

    Ok(json!({
      "ticket": ticket,
      "comments": comments,
      "team_workload": team_workload,
      "assignment_rules": {
        "rules": [
          "Only recommend members of the primary or secondary team",
          "Prefer primary team members over secondary team members",
          "Balance load: prefer members with fewer open issues",
          format!("Do not recommend a member with {MAX_OPEN_ISSUES} or more open issues"),
        ],
        "max_open_issues": MAX_OPEN_ISSUES,
      },
      "expertise_jql_templates": self.expertise_templates(),
    }))
  }

  fn expertise_templates(&self) -> Map<String, Value> {
    let config = self.config();
    [("alert", &config.alert_expertise_jql), ("other", &config.other_expertise_jql)]
      .into_iter()
      .filter_map(|(kind, template)| template.as_ref().map(|t| (kind.to_string(), json!(t))))
      .collect()
  }
}
