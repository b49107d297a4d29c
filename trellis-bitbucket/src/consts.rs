//! Constants for the trellis-bitbucket bindings.

/// API root below a Data Center base URL.
pub const DATA_CENTER_API_ROOT: &str = "rest/api/1.0";

/// Pull request state listed when the caller does not choose.
pub const DEFAULT_PR_STATE: &str = "OPEN";

/// Activity action carrying a pull request comment on Data Center.
pub const COMMENT_ACTIVITY: &str = "COMMENTED";
