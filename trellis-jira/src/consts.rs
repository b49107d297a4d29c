//! Constants for the trellis-jira bindings.

/// Path of the REST API root below the configured base URL.
pub const API_ROOT: &str = "rest/api/2";

/// Fields requested by `search_issues` when the caller does not choose.
pub const DEFAULT_SEARCH_FIELDS: &str = "summary,status,assignee,priority,issuetype,created,updated";

/// Issue type used by `create_issue` when none is given.
pub const DEFAULT_ISSUE_TYPE: &str = "Task";

/// Link type used by `link_issues` when none is given.
pub const DEFAULT_LINK_TYPE: &str = "Relates";
