//! Constants shared across trellis components.

use std::time::Duration;

/// User-Agent header value sent by every backend binding.
pub const USER_AGENT: &str = concat!("trellis/", env!("CARGO_PKG_VERSION"));

/// Per-attempt timeout for outbound HTTP requests.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(25);

/// Additional attempts made after the first one fails with a retryable status.
pub const MAX_RETRIES: u32 = 3;

/// Status codes that trigger a retry.
pub const RETRY_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Page size for ordinary listing operations.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Page size for listing operations whose items are expensive to render.
pub const RICH_PAGE_SIZE: u32 = 25;

/// Upstream response bodies are cut to this many characters in error records.
pub const ERROR_BODY_LIMIT: usize = 500;

/// Cloud code-host API root used when `BITBUCKET_API_URL` is not configured.
pub const BITBUCKET_CLOUD_API: &str = "https://api.bitbucket.org/2.0";

// Configuration keys
pub const ENV_DEPLOYMENT_TYPE: &str = "DEPLOYMENT_TYPE";
pub const ENV_ATLASSIAN_BASE_URL: &str = "ATLASSIAN_BASE_URL";
pub const ENV_ATLASSIAN_USERNAME: &str = "ATLASSIAN_USERNAME";
pub const ENV_ATLASSIAN_API_TOKEN: &str = "ATLASSIAN_API_TOKEN";
pub const ENV_BITBUCKET_WORKSPACE: &str = "BITBUCKET_WORKSPACE";
pub const ENV_BITBUCKET_API_TOKEN: &str = "BITBUCKET_API_TOKEN";
pub const ENV_BITBUCKET_API_URL: &str = "BITBUCKET_API_URL";
pub const ENV_BITBUCKET_PROJECT: &str = "BITBUCKET_PROJECT";

/// Data Center personal-access-token keys; any of them selects Data Center.
pub const DATA_CENTER_TOKEN_KEYS: [&str; 3] = ["JIRA_PAT_TOKEN", "CONFLUENCE_PAT_TOKEN", "BITBUCKET_PAT_TOKEN"];
