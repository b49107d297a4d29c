//! JQL assembly helpers.

/// Escape a value for interpolation inside a single-quoted JQL string.
pub fn escape(value: &str) -> String {
  value.replace('\'', "''")
}

/// Single-quoted, escaped JQL literal.
pub fn quote(value: &str) -> String {
  format!("'{}'", escape(value))
}

/// Unresolved issues assigned to `assignee`, newest activity first.
pub fn assigned_issues(assignee: &str, excluded_types: &[String]) -> String {
  let mut jql = format!("assignee = {} AND resolution = Unresolved", quote(assignee));
  if !excluded_types.is_empty() {
    let types: Vec<String> = excluded_types.iter().map(|t| quote(t)).collect();
    jql.push_str(&format!(" AND issuetype NOT IN ({})", types.join(", ")));
  }
  jql.push_str(" ORDER BY updated DESC");
  jql
}
