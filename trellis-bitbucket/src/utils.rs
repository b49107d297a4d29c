//! # Bitbucket Utility Functions
//!
//! Helpers for pulling repository references out of Bitbucket browse URLs.

use std::sync::LazyLock;

use regex::Regex;

static REPO_BROWSE_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"/repos/([^/?#<]+)/browse/([^?#<]+)").expect("Failed to compile repo browse regex"));

static PROJECT_BROWSE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"/projects/[^/]+/repos/([^/?#<]+)/browse/([^?#<]+)").expect("Failed to compile project browse regex")
});

static CLOUD_SRC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)bitbucket\.org/[^/]+/([^/?#<]+)/src/[^/?#<]+/([^?#<]+)").expect("Failed to compile Cloud src regex")
});

/// Repository and file named by a browse URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseLink {
  pub repo_slug: String,
  pub file_path: String,
}

/// Extract the repository slug and file path from a (decoded) browse URL.
///
/// Recognises `.../repos/{slug}/browse/{path}`, the Data Center
/// `.../projects/{key}/repos/{slug}/browse/{path}` layout and Cloud
/// `bitbucket.org/{workspace}/{slug}/src/{ref}/{path}` links. The path stops
/// at `?`, `#` or `<` and loses trailing whitespace.
pub fn parse_browse_url(url: &str) -> Option<BrowseLink> {
  [&REPO_BROWSE_REGEX, &PROJECT_BROWSE_REGEX, &CLOUD_SRC_REGEX]
    .into_iter()
    .find_map(|regex| regex.captures(url))
    .map(|captures| BrowseLink {
      repo_slug: captures[1].to_string(),
      file_path: captures[2].trim_end().to_string(),
    })
}
