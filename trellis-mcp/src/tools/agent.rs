//! Support-agent tools. Arguments are read before the agent is looked up so
//! malformed input is reported even when the agent is absent.

use trellis_core::{ToolError, ToolResult};

use crate::args::Args;
use crate::context::ServerContext;
use crate::registry::{ToolDescriptor, ToolGroup, tool};

const ISSUE_KEY: &str = "Support ticket key (e.g. \"SUP-42\")";

pub fn descriptors() -> Vec<ToolDescriptor> {
  let t = |name, description| tool(ToolGroup::Agent, name, description);
  vec![
    t(
      "classify_support_tickets",
      "Split open support tickets into alerts and other requests",
    )
    .build(),
    t(
      "get_template_context",
      "Ticket plus the request template pages that apply to its type",
    )
    .required_string("issue_key", ISSUE_KEY)
    .build(),
    t(
      "get_team_workload",
      "Open issues per primary and secondary support team member",
    )
    .build(),
    t(
      "get_troubleshooting_context",
      "Repository pointer and troubleshooting pages for a ticket",
    )
    .required_string("issue_key", ISSUE_KEY)
    .string(
      "troubleshooting_parent",
      "Parent page id or title (defaults to the configured parent)",
    )
    .build(),
    t(
      "build_expertise_jql",
      "JQL finding a team member's past tickets similar to this one",
    )
    .required_string("issue_key", ISSUE_KEY)
    .required_string("account_id", "Candidate team member account id")
    .boolean("is_alert", "Use the alert expertise template", false)
    .build(),
    t(
      "get_assignment_context",
      "Ticket, comments, team workload and assignment rules for suggesting an assignee",
    )
    .required_string("issue_key", ISSUE_KEY)
    .build(),
    t("get_agent_config", "The loaded support agent configuration").build(),
  ]
}

pub async fn call(context: &ServerContext, name: &str, args: &mut Args<'_>) -> ToolResult {
  match name {
    "classify_support_tickets" => context.agent()?.classify_support_tickets().await,
    "get_template_context" => {
      let issue_key = args.str("issue_key")?;
      context.agent()?.get_template_context(issue_key).await
    }
    "get_team_workload" => context.agent()?.get_team_workload().await,
    "get_troubleshooting_context" => {
      let issue_key = args.str("issue_key")?;
      let parent = args.opt_str("troubleshooting_parent")?;
      context.agent()?.get_troubleshooting_context(issue_key, parent).await
    }
    "build_expertise_jql" => {
      let issue_key = args.str("issue_key")?;
      let account_id = args.str("account_id")?;
      let is_alert = args.bool_or("is_alert", false)?;
      context.agent()?.build_expertise_jql(issue_key, account_id, is_alert).await
    }
    "get_assignment_context" => {
      let issue_key = args.str("issue_key")?;
      context.agent()?.get_assignment_context(issue_key).await
    }
    "get_agent_config" => context.agent()?.describe(),
    _ => Err(ToolError::UnknownTool(name.to_string())),
  }
}
