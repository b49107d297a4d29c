//! Wiki tools.

use trellis_confluence::Wiki;
use trellis_core::consts::{DEFAULT_PAGE_SIZE, RICH_PAGE_SIZE};
use trellis_core::{ToolError, ToolResult};

use crate::args::Args;
use crate::registry::{ToolDescriptor, ToolGroup, tool};

const PAGE_ID: &str = "Numeric Confluence page id";
const SPACE_KEY: &str = "Confluence space key (e.g. \"DOCS\")";

pub fn descriptors() -> Vec<ToolDescriptor> {
  let t = |name, description| tool(ToolGroup::Wiki, name, description);
  vec![
    t("get_page", "Get a Confluence page")
      .required_string("page_id", PAGE_ID)
      .boolean("include_body", "Include the storage-format body", true)
      .build(),
    t("get_page_by_title", "Find a Confluence page by exact title within a space")
      .required_string("space_key", SPACE_KEY)
      .required_string("title", "Page title")
      .build(),
    t("search_pages", "Search Confluence content with CQL")
      .required_string("cql", "CQL query")
      .integer("limit", "Maximum number of results", RICH_PAGE_SIZE)
      .build(),
    t("create_page", "Create a Confluence page")
      .required_string("space_key", SPACE_KEY)
      .required_string("title", "Page title")
      .required_string("body", "Page body in storage format")
      .string("parent_id", "Parent page id")
      .build(),
    t("update_page", "Replace the title and body of a Confluence page")
      .required_string("page_id", PAGE_ID)
      .required_string("title", "Page title")
      .required_string("body", "Page body in storage format")
      .string("version_comment", "Version message")
      .build(),
    t("delete_page", "Delete a Confluence page")
      .required_string("page_id", PAGE_ID)
      .build(),
    t("get_page_children", "List the direct child pages of a page")
      .required_string("page_id", PAGE_ID)
      .integer("limit", "Maximum number of children", DEFAULT_PAGE_SIZE)
      .build(),
    t("get_page_descendants", "List every page below a page (Cloud only)")
      .required_string("page_id", PAGE_ID)
      .integer("limit", "Maximum number of pages", DEFAULT_PAGE_SIZE)
      .build(),
    t("list_spaces", "List Confluence spaces")
      .integer("limit", "Maximum number of spaces", DEFAULT_PAGE_SIZE)
      .build(),
    t("get_space", "Get a Confluence space")
      .required_string("space_key", SPACE_KEY)
      .build(),
    t("add_page_comment", "Comment on a Confluence page")
      .required_string("page_id", PAGE_ID)
      .required_string("body", "Comment body in storage format")
      .build(),
    t("get_page_comments", "List comments on a Confluence page")
      .required_string("page_id", PAGE_ID)
      .integer("limit", "Maximum number of comments", RICH_PAGE_SIZE)
      .build(),
  ]
}

pub async fn call(wiki: &dyn Wiki, name: &str, args: &mut Args<'_>) -> ToolResult {
  match name {
    "get_page" => {
      let page_id = args.str("page_id")?;
      let include_body = args.bool_or("include_body", true)?;
      wiki.get_page(page_id, include_body).await
    }
    "get_page_by_title" => {
      let space_key = args.str("space_key")?;
      let title = args.str("title")?;
      wiki.get_page_by_title(space_key, title).await
    }
    "search_pages" => {
      let cql = args.str("cql")?;
      let limit = args.u32_or("limit", RICH_PAGE_SIZE)?;
      wiki.search_pages(cql, limit).await
    }
    "create_page" => {
      let space_key = args.str("space_key")?;
      let title = args.str("title")?;
      let body = args.str("body")?;
      let parent_id = args.opt_str("parent_id")?;
      wiki.create_page(space_key, title, body, parent_id).await
    }
    "update_page" => {
      let page_id = args.str("page_id")?;
      let title = args.str("title")?;
      let body = args.str("body")?;
      let version_comment = args.opt_str("version_comment")?;
      wiki.update_page(page_id, title, body, version_comment).await
    }
    "delete_page" => wiki.delete_page(args.str("page_id")?).await,
    "get_page_children" => {
      let page_id = args.str("page_id")?;
      let limit = args.u32_or("limit", DEFAULT_PAGE_SIZE)?;
      wiki.get_page_children(page_id, limit).await
    }
    "get_page_descendants" => {
      let page_id = args.str("page_id")?;
      let limit = args.u32_or("limit", DEFAULT_PAGE_SIZE)?;
      wiki.get_page_descendants(page_id, limit).await
    }
    "list_spaces" => wiki.list_spaces(args.u32_or("limit", DEFAULT_PAGE_SIZE)?).await,
    "get_space" => wiki.get_space(args.str("space_key")?).await,
    "add_page_comment" => {
      let page_id = args.str("page_id")?;
      let body = args.str("body")?;
      wiki.add_page_comment(page_id, body).await
    }
    "get_page_comments" => {
      let page_id = args.str("page_id")?;
      let limit = args.u32_or("limit", RICH_PAGE_SIZE)?;
      wiki.get_page_comments(page_id, limit).await
    }
    _ => Err(ToolError::UnknownTool(name.to_string())),
  }
}
