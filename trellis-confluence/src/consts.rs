//! Constants for the trellis-confluence bindings.

/// API root below a Cloud site URL.
pub const CLOUD_API_ROOT: &str = "wiki/rest/api";

/// API root below a Data Center base URL.
pub const DATA_CENTER_API_ROOT: &str = "rest/api";

/// Storage-format representation used for page and comment bodies.
pub const STORAGE_REPRESENTATION: &str = "storage";
