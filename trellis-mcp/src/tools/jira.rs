//! Issue-tracker tools.

use trellis_core::consts::DEFAULT_PAGE_SIZE;
use trellis_core::{ToolError, ToolResult};
use trellis_jira::consts::{DEFAULT_ISSUE_TYPE, DEFAULT_LINK_TYPE, DEFAULT_SEARCH_FIELDS};
use trellis_jira::{IssueTracker, NewIssue};

use crate::args::Args;
use crate::registry::{ToolDescriptor, ToolGroup, tool};

const ISSUE_KEY: &str = "Jira issue key (e.g. \"PROJ-123\")";

pub fn descriptors() -> Vec<ToolDescriptor> {
  let t = |name, description| tool(ToolGroup::Tracker, name, description);
  vec![
    t("get_issue", "Get a Jira issue by key")
      .required_string("issue_key", ISSUE_KEY)
      .string("expand", "Comma-separated list of entities to expand (e.g. \"changelog\")")
      .build(),
    t("search_issues", "Search Jira issues with JQL")
      .required_string("jql", "JQL query")
      .integer("max_results", "Maximum number of issues to return", DEFAULT_PAGE_SIZE)
      .string_default("fields", "Comma-separated fields to return", DEFAULT_SEARCH_FIELDS)
      .build(),
    t("create_issue", "Create a Jira issue")
      .required_string("project_key", "Project key (e.g. \"PROJ\")")
      .required_string("summary", "Issue summary")
      .string_default("issue_type", "Issue type name", DEFAULT_ISSUE_TYPE)
      .string_default("description", "Issue description", "")
      .string("priority", "Priority name")
      .string("assignee", "Account id (Cloud) or username (Data Center)")
      .string_list("labels", "Labels to apply")
      .build(),
    t("update_issue", "Update fields of a Jira issue")
      .required_string("issue_key", ISSUE_KEY)
      .required_object("fields", "Field values keyed by field id")
      .build(),
    t("add_comment", "Add a comment to a Jira issue")
      .required_string("issue_key", ISSUE_KEY)
      .required_string("body", "Comment text")
      .build(),
    t("get_issue_comments", "List comments on a Jira issue")
      .required_string("issue_key", ISSUE_KEY)
      .integer("max_results", "Maximum number of comments", DEFAULT_PAGE_SIZE)
      .build(),
    t("get_transitions", "List the workflow transitions available for an issue")
      .required_string("issue_key", ISSUE_KEY)
      .build(),
    t("transition_issue", "Move an issue through a workflow transition")
      .required_string("issue_key", ISSUE_KEY)
      .required_string("transition_id", "Transition id from get_transitions")
      .string("comment", "Comment added with the transition")
      .build(),
    t("assign_issue", "Assign a Jira issue")
      .required_string("issue_key", ISSUE_KEY)
      .required_string("assignee", "Account id (Cloud) or username (Data Center)")
      .build(),
    t("get_project", "Get a Jira project")
      .required_string("project_key", "Project key (e.g. \"PROJ\")")
      .build(),
    t("list_projects", "List Jira projects").build(),
    t("get_user", "Get a Jira user")
      .required_string("identifier", "Account id (Cloud) or username (Data Center)")
      .build(),
    t("search_users", "Search Jira users")
      .required_string("query", "Name or email fragment")
      .integer("max_results", "Maximum number of users", DEFAULT_PAGE_SIZE)
      .build(),
    t("get_current_user", "Get the user the server authenticates as").build(),
    t("get_assigned_issues", "List unresolved issues assigned to a user")
      .required_string("assignee", "Account id (Cloud) or username (Data Center)")
      .string_list("excluded_types", "Issue types to leave out")
      .integer("max_results", "Maximum number of issues", DEFAULT_PAGE_SIZE)
      .build(),
    t("link_issues", "Link two Jira issues")
      .required_string("inward_issue", ISSUE_KEY)
      .required_string("outward_issue", ISSUE_KEY)
      .string_default("link_type", "Link type name", DEFAULT_LINK_TYPE)
      .build(),
    t("add_worklog", "Log time against a Jira issue")
      .required_string("issue_key", ISSUE_KEY)
      .required_string("time_spent", "Duration in Jira notation (e.g. \"1h 30m\")")
      .string("comment", "Worklog comment")
      .build(),
  ]
}

pub async fn call(tracker: &dyn IssueTracker, name: &str, args: &mut Args<'_>) -> ToolResult {
  match name {
    "get_issue" => {
      let issue_key = args.str("issue_key")?;
      let expand = args.opt_str("expand")?;
      tracker.get_issue(issue_key, expand).await
    }
    "search_issues" => {
      let jql = args.str("jql")?;
      let max_results = args.u32_or("max_results", DEFAULT_PAGE_SIZE)?;
      let fields = args.str_or("fields", DEFAULT_SEARCH_FIELDS)?;
      tracker.search_issues(jql, max_results, fields).await
    }
    "create_issue" => {
      let labels = args.str_list("labels")?;
      let issue = NewIssue {
        project_key: args.str("project_key")?,
        summary: args.str("summary")?,
        issue_type: args.str_or("issue_type", DEFAULT_ISSUE_TYPE)?,
        description: args.str_or("description", "")?,
        priority: args.opt_str("priority")?,
        assignee: args.opt_str("assignee")?,
        labels: &labels,
      };
      tracker.create_issue(&issue).await
    }
    "update_issue" => {
      let issue_key = args.str("issue_key")?;
      let fields = args.object("fields")?;
      tracker.update_issue(issue_key, fields).await
    }
    "add_comment" => {
      let issue_key = args.str("issue_key")?;
      let body = args.str("body")?;
      tracker.add_comment(issue_key, body).await
    }
    "get_issue_comments" => {
      let issue_key = args.str("issue_key")?;
      let max_results = args.u32_or("max_results", DEFAULT_PAGE_SIZE)?;
      tracker.get_issue_comments(issue_key, max_results).await
    }
    "get_transitions" => tracker.get_transitions(args.str("issue_key")?).await,
    "transition_issue" => {
      let issue_key = args.str("issue_key")?;
      let transition_id = args.str("transition_id")?;
      let comment = args.opt_str("comment")?;
      tracker.transition_issue(issue_key, transition_id, comment).await
    }
    "assign_issue" => {
      let issue_key = args.str("issue_key")?;
      let assignee = args.str("assignee")?;
      tracker.assign_issue(issue_key, assignee).await
    }
    "get_project" => tracker.get_project(args.str("project_key")?).await,
    "list_projects" => tracker.list_projects().await,
    "get_user" => tracker.get_user(args.str("identifier")?).await,
    "search_users" => {
      let query = args.str("query")?;
      let max_results = args.u32_or("max_results", DEFAULT_PAGE_SIZE)?;
      tracker.search_users(query, max_results).await
    }
    "get_current_user" => tracker.get_current_user().await,
    "get_assigned_issues" => {
      let assignee = args.str("assignee")?;
      let excluded_types = args.str_list("excluded_types")?;
      let max_results = args.u32_or("max_results", DEFAULT_PAGE_SIZE)?;
      tracker.get_assigned_issues(assignee, &excluded_types, max_results).await
    }
    "link_issues" => {
      let inward_issue = args.str("inward_issue")?;
      let outward_issue = args.str("outward_issue")?;
      let link_type = args.str_or("link_type", DEFAULT_LINK_TYPE)?;
      tracker.link_issues(inward_issue, outward_issue, link_type).await
    }
    "add_worklog" => {
      let issue_key = args.str("issue_key")?;
      let time_spent = args.str("time_spent")?;
      let comment = args.opt_str("comment")?;
      tracker.add_worklog(issue_key, time_spent, comment).await
    }
    _ => Err(ToolError::UnknownTool(name.to_string())),
  }
}
