//! Open work per support-team member.

use serde_json::{Value, json};
use trellis_core::consts::DEFAULT_PAGE_SIZE;
use trellis_core::{ToolError, ToolResult};

use crate::agent::{IssueRef, SupportAgent, items};
use crate::config::TeamMember;
use crate::consts::WORKLOAD_FIELDS;
use crate::jql;

impl SupportAgent {
  /// Issue counts and `{key, summary}` lists for both teams. A failure for
  /// one member is recorded in that member's entry.
  pub async fn get_team_workload(&self) -> ToolResult {
    let mut queries = Vec::new();
    let primary_team = self.team_workload(&self.config().primary_team, &mut queries).await;
    let secondary_team = self.team_workload(&self.config().secondary_team, &mut queries).await;

    Ok(json!({
      "primary_team": primary_team,
      "secondary_team": secondary_team,
      "debug": {
        "workload_statuses": self.config().workload_statuses,
        "excluded_issue_types": self.config().excluded_issue_types,
        "queries": queries,
      },
    }))
  }

  async fn team_workload(&self, team: &[TeamMember], queries: &mut Vec<Value>) -> Vec<Value> {
    let mut entries = Vec::with_capacity(team.len());
    for member in team {
      let (query, result) = self.member_issues(&member.account_id).await;
      queries.push(json!({ "account_id": member.account_id, "jql": query }));

      let entry = match result {
        Ok(issues) => json!({ "member": member, "issue_count": issues.len(), "issues": issues }),
        Err(e) => {
          tracing::warn!(account_id = %member.account_id, error = %e, "Workload lookup failed");
          json!({ "member": member, "issue_count": 0, "issues": [], "error": e.to_string() })
        }
      };
      entries.push(entry);
    }
    entries
  }

  async fn member_issues(&self, account_id: &str) -> (String, Result<Vec<IssueRef>, ToolError>) {
    let config = self.config();
    let (query, response) = if config.workload_statuses.is_empty() {
      let query = trellis_jira::jql::assigned_issues(account_id, &config.excluded_issue_types);
      let response = self
        .tracker()
        .get_assigned_issues(account_id, &config.excluded_issue_types, DEFAULT_PAGE_SIZE)
        .await;
      (query, response)
    } else {
      let query = jql::workload(account_id, &config.workload_statuses, &config.excluded_issue_types);
      let response = self
        .tracker()
        .search_issues(&query, DEFAULT_PAGE_SIZE, WORKLOAD_FIELDS)
        .await;
      (query, response)
    };

    let issues = response.map(|found| items(&found, "issues").iter().map(IssueRef::from_value).collect());
    (query, issues)
  }
}
