//! # Identifier Validation
//!
//! Pure syntactic checks run by every binding operation before a URL is
//! built. A rejected value never reaches the network.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ToolError;

static ISSUE_KEY: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9]+-\d+$").expect("Failed to compile issue key regex"));

static PROJECT_KEY: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9]+$").expect("Failed to compile project key regex"));

static SPACE_KEY: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[A-Z0-9]+$").expect("Failed to compile space key regex"));

static REPO_SLUG: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[a-z0-9_-]+$").expect("Failed to compile repo slug regex"));

static BRANCH_NAME: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[A-Za-z0-9/_.-]+$").expect("Failed to compile branch name regex"));

static COMMIT_HASH: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[a-f0-9]{7,40}$").expect("Failed to compile commit hash regex"));

type Validation = Result<(), ToolError>;

fn check(ok: bool, message: &str) -> Validation {
  if ok { Ok(()) } else { Err(ToolError::validation(message)) }
}

/// `PROJ-123`
pub fn issue_key(value: &str) -> Validation {
  check(ISSUE_KEY.is_match(value), "Invalid issue_key format. Expected: PROJECT-123")
}

/// `PROJ`
pub fn project_key(value: &str) -> Validation {
  check(
    PROJECT_KEY.is_match(value),
    "Invalid project_key format. Expected: uppercase letters and digits, e.g. PROJ",
  )
}

/// Decimal page id.
pub fn page_id(value: &str) -> Validation {
  check(
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()),
    "Invalid page_id format. Expected: numeric ID",
  )
}

/// `DOCS`, `TEAM1`
pub fn space_key(value: &str) -> Validation {
  check(
    SPACE_KEY.is_match(value),
    "Invalid space_key format. Expected: uppercase letters and digits",
  )
}

/// `my-repo_2`
pub fn repo_slug(value: &str) -> Validation {
  check(
    REPO_SLUG.is_match(value),
    "Invalid repo_slug format. Expected: lowercase letters, digits, '-' or '_'",
  )
}

/// Branch or ref name such as `feature/ABC-1_fix.v2`.
pub fn ref_name(value: &str) -> Validation {
  check(
    BRANCH_NAME.is_match(value),
    "Invalid branch name format. Expected: letters, digits, '/', '_', '.', '-'",
  )
}

/// Abbreviated or full commit hash.
pub fn commit_hash(value: &str) -> Validation {
  check(
    COMMIT_HASH.is_match(value),
    "Invalid commit hash format. Expected: 7-40 lowercase hex characters",
  )
}

/// Repository file path. Rejects any `..` sequence.
pub fn path(value: &str) -> Validation {
  check(!value.contains(".."), "Invalid path: '..' is not allowed")
}

/// Pull request id.
pub fn pr_id(value: i64) -> Validation {
  check(value > 0, "Invalid pr_id. Expected: positive integer")
}

/// Rejects empty or whitespace-only values.
pub fn non_empty(field: &str, value: &str) -> Validation {
  if value.trim().is_empty() {
    Err(ToolError::validation(format!("{field} must not be empty")))
  } else {
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_issue_key() {
    assert!(issue_key("PROJ-123").is_ok());
    assert!(issue_key("A1-1").is_ok());
    assert!(issue_key("test-1").is_err());
    assert!(issue_key("P-1").is_err());
    assert!(issue_key("PROJ-").is_err());
    assert!(issue_key("PROJ-12a").is_err());
    assert_eq!(
      issue_key("test-1").unwrap_err().to_string(),
      "Invalid issue_key format. Expected: PROJECT-123"
    );
  }

  #[test]
  fn test_project_key() {
    assert!(project_key("PROJ").is_ok());
    assert!(project_key("P2").is_ok());
    assert!(project_key("P").is_err());
    assert!(project_key("2P").is_err());
    assert!(project_key("proj").is_err());
  }

  #[test]
  fn test_page_id() {
    assert!(page_id("123456").is_ok());
    assert!(page_id("").is_err());
    assert!(page_id("12a").is_err());
    assert!(page_id("-1").is_err());
  }

  #[test]
  fn test_space_key() {
    assert!(space_key("DOCS").is_ok());
    assert!(space_key("42").is_ok());
    assert!(space_key("docs").is_err());
    assert!(space_key("~user").is_err());
  }

  #[test]
  fn test_repo_slug() {
    assert!(repo_slug("repo-a").is_ok());
    assert!(repo_slug("my_repo2").is_ok());
    assert!(repo_slug("Repo").is_err());
    assert!(repo_slug("repo/other").is_err());
    assert!(repo_slug("").is_err());
  }

  #[test]
  fn test_ref_name() {
    assert!(ref_name("main").is_ok());
    assert!(ref_name("feature/ABC-1_fix.v2").is_ok());
    assert!(ref_name("bad branch").is_err());
    assert!(ref_name("bad;rm").is_err());
  }

  #[test]
  fn test_commit_hash() {
    assert!(commit_hash("abc1234").is_ok());
    assert!(commit_hash("6dcb09b5b57875f334f61aebed695e2e4193db5e").is_ok());
    assert!(commit_hash("abc123").is_err());
    assert!(commit_hash("ABC1234").is_err());
    assert!(commit_hash("6dcb09b5b57875f334f61aebed695e2e4193db5e0").is_err());
  }

  #[test]
  fn test_path_rejects_traversal() {
    assert!(path("src/main.rs").is_ok());
    assert!(path("").is_ok());
    assert!(path("../etc/passwd").is_err());
    assert!(path("docs/../../secret").is_err());
  }

  #[test]
  fn test_pr_id() {
    assert!(pr_id(1).is_ok());
    assert!(pr_id(0).is_err());
    assert!(pr_id(-5).is_err());
  }

  #[test]
  fn test_non_empty() {
    assert!(non_empty("summary", "text").is_ok());
    let err = non_empty("summary", "  \t").unwrap_err();
    assert_eq!(err.to_string(), "summary must not be empty");
  }
}
