//! # Repository Links
//!
//! Ticket descriptions reference the failing code by pasting a code-host URL,
//! often as an HTML-escaped anchor. This module finds the first such URL and
//! turns it into a repository slug and file path.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use trellis_bitbucket::{BrowseLink, parse_browse_url};
use trellis_core::url::percent_decode;

static PLAIN_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"(?i)https?://(?:[^\s<>"]*(?:bitbucket|git)[^\s<>"]+)"#).expect("Failed to compile plain URL regex")
});

static HREF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"(?i)href=["']([^"'>]+(?:bitbucket|git)[^"'>]+)["']"#).expect("Failed to compile href regex")
});

/// A code-host URL found in a ticket description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLink {
  /// The URL after percent-decoding.
  pub url: String,
  /// Slug and path, when the URL is a browse link.
  pub browse: Option<BrowseLink>,
}

/// Find the first code-host URL in `description`.
///
/// Escaped markup is searched in its decoded text form; live anchors are
/// searched through their `href` attributes.
pub fn find_repository_link(description: &str) -> Option<RepositoryLink> {
  let fragment = Html::parse_fragment(description);
  let text: String = fragment.root_element().text().collect();

  let raw = PLAIN_URL_REGEX
    .find(&text)
    .map(|m| m.as_str().to_string())
    .or_else(|| {
      HREF_REGEX
        .captures(&text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
    })
    .or_else(|| {
      let anchors = Selector::parse("a[href]").ok()?;
      fragment
        .select(&anchors)
        .filter_map(|anchor| anchor.value().attr("href"))
        .find_map(|href| PLAIN_URL_REGEX.find(href.trim()).map(|m| m.as_str().to_string()))
    })?;

  let url = percent_decode(&raw);
  let browse = parse_browse_url(&url);
  Some(RepositoryLink { url, browse })
}

/// Text content of an HTML fragment with every character reference decoded.
pub fn decode_html_entities(input: &str) -> String {
  Html::parse_fragment(input).root_element().text().collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_decode_html_entities() {
    assert_eq!(decode_html_entities("&lt;a href=&quot;x&quot;&gt;"), "<a href=\"x\">");
    assert_eq!(decode_html_entities("it&#39;s &#x41;&amp;B"), "it's A&B");
    assert_eq!(decode_html_entities("&amp;lt;"), "&lt;");
    assert_eq!(decode_html_entities("fish & chips; &bogus;"), "fish & chips; &bogus;");
    assert_eq!(decode_html_entities("trailing &"), "trailing &");
    assert_eq!(decode_html_entities("&quest;&sol;&hellip;&eacute;"), "?/\u{2026}\u{e9}");
  }

  #[test]
  fn test_named_entities_beyond_markup_escapes() {
    let description = "see &lt;a href=&quot;https://git.example.com/projects/OPS/repos/alerts/browse/sql/check.sql&quest;at=main&quot;&gt;link&lt;/a&gt;";
    let link = find_repository_link(description).unwrap();

    assert_eq!(
      link.url,
      "https://git.example.com/projects/OPS/repos/alerts/browse/sql/check.sql?at=main"
    );
    let browse = link.browse.unwrap();
    assert_eq!(browse.repo_slug, "alerts");
    assert_eq!(browse.file_path, "sql/check.sql");
  }

  #[test]
  fn test_live_anchor_href() {
    let description = r#"<p>Failing job: <a href="https://git.example.com/projects/OPS/repos/etl/browse/jobs/load.py?at=refs%2Fheads%2Fdev">load</a></p>"#;
    let link = find_repository_link(description).unwrap();
    let browse = link.browse.unwrap();
    assert_eq!(browse.repo_slug, "etl");
    assert_eq!(browse.file_path, "jobs/load.py");
  }

  #[test]
  fn test_escaped_anchor_in_description() {
    let description = "...see &lt;a href=&quot;https://git.example.com/projects/OPS/repos/alerts/browse/sql/check.sql?at=refs%2Fheads%2Fmain&quot;&gt;link&lt;/a&gt;";
    let link = find_repository_link(description).unwrap();

    assert_eq!(
      link.url,
      "https://git.example.com/projects/OPS/repos/alerts/browse/sql/check.sql?at=refs/heads/main"
    );
    let browse = link.browse.unwrap();
    assert_eq!(browse.repo_slug, "alerts");
    assert_eq!(browse.file_path, "sql/check.sql");
  }

  #[test]
  fn test_match_is_case_insensitive() {
    let link = find_repository_link("Broken: HTTPS://BitBucket.example.com/projects/X/repos/etl/browse/jobs/load.py").unwrap();
    let browse = link.browse.unwrap();
    assert_eq!(browse.repo_slug, "etl");
    assert_eq!(browse.file_path, "jobs/load.py");
  }

  #[test]
  fn test_non_browse_link_keeps_url() {
    let link = find_repository_link("Repo at https://bitbucket.org/acme/etl").unwrap();
    assert_eq!(link.url, "https://bitbucket.org/acme/etl");
    assert_eq!(link.browse, None);
  }

  #[test]
  fn test_no_code_host_url() {
    assert_eq!(find_repository_link("See https://wiki.example.com/page for details"), None);
    assert_eq!(find_repository_link(""), None);
  }
}
