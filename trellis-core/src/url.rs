//! URL helpers shared by the backend bindings.
//!
//! Base URLs coming from configuration are normalised once at startup, and
//! every identifier embedded in a request path goes through
//! [`encode_path_segment`], which leaves no separator unescaped.

use anyhow::Result;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use url::{Position, Url};

/// Everything except the RFC 3986 unreserved set is escaped, including `/`.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Percent-encode a value for use as a single URL path segment.
pub fn encode_path_segment(value: &str) -> String {
  utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Decode percent-escapes, replacing invalid UTF-8 sequences.
pub fn percent_decode(value: &str) -> String {
  percent_decode_str(value).decode_utf8_lossy().into_owned()
}

/// Render a URL without a trailing `/` on the path.
fn normalize_url(url: &Url) -> String {
  let mut result = String::new();
  result.push_str(&url[..Position::BeforePath]);

  let path = url.path().trim_end_matches('/');
  result.push_str(path);

  if let Some(query) = url.query() {
    result.push('?');
    result.push_str(query);
  }

  result
}

/// Parse a URL by prefixing it with https:// scheme.
fn parse_with_https_prefix(input: &str) -> Result<Url> {
  let with_scheme = format!("https://{}", input.trim_start_matches('/'));
  Url::parse(&with_scheme).map_err(|_| anyhow::anyhow!("Failed to parse URL: '{input}'. Ensure it has a valid scheme."))
}

/// Normalise a configured base URL.
///
/// A missing scheme defaults to https://, malformed schemes such as
/// "https:/host" are repaired, and trailing slashes are removed so paths can be
/// appended with `format!("{base}/rest/...")`.
pub fn normalize_base_url(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(anyhow::anyhow!("Base URL cannot be empty"));
  }

  let lowered = trimmed.to_ascii_lowercase();
  for scheme in ["http:", "https:"] {
    if lowered.starts_with(scheme) && !lowered.starts_with(&format!("{scheme}//")) {
      let remainder = trimmed.split_once(':').map(|(_, rest)| rest).unwrap_or("");
      return parse_with_https_prefix(remainder).map(|url| normalize_url(&url));
    }
  }

  let url = match Url::parse(trimmed) {
    Ok(url) if url.scheme().len() > 1 && url.host().is_some() => url,
    _ => parse_with_https_prefix(trimmed)?,
  };

  Ok(normalize_url(&url))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_encode_path_segment_escapes_separators() {
    assert_eq!(encode_path_segment("PROJ-123"), "PROJ-123");
    assert_eq!(encode_path_segment("src/main.rs"), "src%2Fmain.rs");
    assert_eq!(encode_path_segment("my file"), "my%20file");
    assert_eq!(encode_path_segment("a?b#c"), "a%3Fb%23c");
    assert_eq!(encode_path_segment("v1.2_x~y"), "v1.2_x~y");
  }

  #[test]
  fn test_encode_path_segment_utf8() {
    assert_eq!(encode_path_segment("é"), "%C3%A9");
  }

  #[test]
  fn test_percent_decode() {
    assert_eq!(percent_decode("refs%2Fheads%2Fmain"), "refs/heads/main");
    assert_eq!(percent_decode("plain"), "plain");
  }

  #[test]
  fn test_normalize_base_url_with_https() {
    assert_eq!(
      normalize_base_url("https://company.atlassian.net").unwrap(),
      "https://company.atlassian.net"
    );
  }

  #[test]
  fn test_normalize_base_url_strips_trailing_slash() {
    assert_eq!(
      normalize_base_url("https://jira.example.com/").unwrap(),
      "https://jira.example.com"
    );
    assert_eq!(
      normalize_base_url("https://example.com/jira/").unwrap(),
      "https://example.com/jira"
    );
  }

  #[test]
  fn test_normalize_base_url_without_scheme() {
    assert_eq!(
      normalize_base_url("company.atlassian.net").unwrap(),
      "https://company.atlassian.net"
    );
  }

  #[test]
  fn test_normalize_base_url_keeps_http_and_port() {
    assert_eq!(
      normalize_base_url("http://localhost:8080").unwrap(),
      "http://localhost:8080"
    );
    assert_eq!(normalize_base_url("localhost:8080").unwrap(), "https://localhost:8080");
  }

  #[test]
  fn test_normalize_base_url_partial_scheme() {
    assert_eq!(normalize_base_url("https:/example.com").unwrap(), "https://example.com");
  }

  #[test]
  fn test_normalize_base_url_empty() {
    assert!(normalize_base_url("   ").is_err());
  }
}
