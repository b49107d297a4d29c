//! CQL assembly helpers.

/// Escape a value for interpolation inside a double-quoted CQL string.
pub fn escape(value: &str) -> String {
  value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Pages whose title is exactly `title`, optionally within one space.
pub fn page_title(title: &str, space_key: Option<&str>) -> String {
  let mut cql = format!("title = \"{}\" AND type = page", escape(title));
  if let Some(space_key) = space_key {
    cql.push_str(&format!(" AND space = \"{}\"", escape(space_key)));
  }
  cql
}
