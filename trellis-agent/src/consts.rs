//! Constants for the support agent.

pub const ENV_PRIMARY_TEAM: &str = "AGENT_PRIMARY_TEAM";
pub const ENV_SECONDARY_TEAM: &str = "AGENT_SECONDARY_TEAM";
pub const ENV_TEMPLATE_MAPPING: &str = "AGENT_TEMPLATE_MAPPING";
pub const ENV_EXCLUDED_TYPES: &str = "AGENT_EXCLUDED_TYPES";
pub const ENV_WORKLOAD_STATUSES: &str = "AGENT_WORKLOAD_STATUSES";
pub const ENV_SUPPORT_JQL: &str = "AGENT_SUPPORT_JQL";
pub const ENV_TROUBLESHOOTING_PARENT: &str = "AGENT_TROUBLESHOOTING_PARENT";
pub const ENV_ALERT_EXPERTISE_JQL: &str = "AGENT_ALERT_EXPERTISE_JQL";
pub const ENV_OTHER_EXPERTISE_JQL: &str = "AGENT_OTHER_EXPERTISE_JQL";

/// Open, unassigned tickets, newest first.
pub const DEFAULT_SUPPORT_JQL: &str = "assignee is EMPTY AND status = Open ORDER BY created DESC";

/// Substring that marks a custom-field label as an alert.
pub const ALERT_MARKER: &str = "Alert";

/// Joins list-valued custom-field labels.
pub const LABEL_SEPARATOR: &str = " - ";

/// Branch reported when a repository was found but its default branch was not.
pub const FALLBACK_BRANCH: &str = "master";

/// Deepest level below the troubleshooting parent visited by the child walk.
pub const MAX_WALK_DEPTH: usize = 10;

/// Recommendation ceiling passed to the AI caller.
pub const MAX_OPEN_ISSUES: u32 = 8;

/// Fields requested for workload searches.
pub const WORKLOAD_FIELDS: &str = "summary,status,issuetype,priority";
