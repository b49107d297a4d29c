//! Code-host tools.

use trellis_bitbucket::consts::DEFAULT_PR_STATE;
use trellis_bitbucket::{CodeHost, NewPullRequest};
use trellis_core::consts::{DEFAULT_PAGE_SIZE, RICH_PAGE_SIZE};
use trellis_core::{ToolError, ToolResult};

use crate::args::Args;
use crate::registry::{ToolDescriptor, ToolGroup, tool};

const REPO_SLUG: &str = "Repository slug (lowercase, e.g. \"my-repo\")";
const PR_ID: &str = "Pull request id";

const PR_STATES: [&str; 4] = ["OPEN", "MERGED", "DECLINED", "SUPERSEDED"];

pub fn descriptors() -> Vec<ToolDescriptor> {
  let t = |name, description| tool(ToolGroup::CodeHost, name, description);
  vec![
    t("list_repositories", "List repositories in the configured workspace or project")
      .integer("limit", "Maximum number of repositories", DEFAULT_PAGE_SIZE)
      .build(),
    t("get_repository", "Get a repository")
      .required_string("repo_slug", REPO_SLUG)
      .build(),
    t("get_default_branch", "Get the default branch of a repository")
      .required_string("repo_slug", REPO_SLUG)
      .build(),
    t("list_branches", "List branches of a repository")
      .required_string("repo_slug", REPO_SLUG)
      .string("filter", "Only branches whose name contains this text")
      .integer("limit", "Maximum number of branches", DEFAULT_PAGE_SIZE)
      .build(),
    t("create_branch", "Create a branch")
      .required_string("repo_slug", REPO_SLUG)
      .required_string("branch_name", "New branch name")
      .required_string("start_point", "Branch, tag or commit to branch from")
      .build(),
    t("get_file_content", "Read a file from a repository")
      .required_string("repo_slug", REPO_SLUG)
      .required_string("file_path", "Path of the file within the repository")
      .string("ref", "Branch, tag or commit (defaults to the default branch)")
      .build(),
    t("list_directory", "List a directory of a repository")
      .required_string("repo_slug", REPO_SLUG)
      .string_default("path", "Directory path within the repository", "")
      .string("ref", "Branch, tag or commit (defaults to the default branch)")
      .build(),
    t("list_commits", "List recent commits")
      .required_string("repo_slug", REPO_SLUG)
      .string("branch", "Branch to list (defaults to the default branch)")
      .integer("limit", "Maximum number of commits", RICH_PAGE_SIZE)
      .build(),
    t("get_commit", "Get a commit")
      .required_string("repo_slug", REPO_SLUG)
      .required_string("commit_hash", "Commit hash (7 to 40 hex characters)")
      .build(),
    t("get_diff", "Diff two refs")
      .required_string("repo_slug", REPO_SLUG)
      .required_string("from_ref", "Ref with the changes")
      .required_string("to_ref", "Ref to compare against")
      .build(),
    t("list_pull_requests", "List pull requests")
      .required_string("repo_slug", REPO_SLUG)
      .string_enum("state", "Pull request state", &PR_STATES, DEFAULT_PR_STATE)
      .integer("limit", "Maximum number of pull requests", RICH_PAGE_SIZE)
      .build(),
    t("get_pull_request", "Get a pull request")
      .required_string("repo_slug", REPO_SLUG)
      .required_integer("pr_id", PR_ID)
      .build(),
    t("create_pull_request", "Open a pull request")
      .required_string("repo_slug", REPO_SLUG)
      .required_string("title", "Pull request title")
      .required_string("source_branch", "Branch with the changes")
      .required_string("destination_branch", "Branch to merge into")
      .string_default("description", "Pull request description", "")
      .string_list("reviewers", "Reviewer account ids, UUIDs (Cloud) or usernames (Data Center)")
      .build(),
    t("update_pull_request", "Change the title or description of a pull request")
      .required_string("repo_slug", REPO_SLUG)
      .required_integer("pr_id", PR_ID)
      .string("title", "New title")
      .string("description", "New description")
      .build(),
    t("merge_pull_request", "Merge a pull request")
      .required_string("repo_slug", REPO_SLUG)
      .required_integer("pr_id", PR_ID)
      .string("message", "Merge commit message")
      .string("strategy", "Merge strategy (e.g. \"merge_commit\", \"squash\", \"fast_forward\")")
      .build(),
    t("decline_pull_request", "Decline a pull request")
      .required_string("repo_slug", REPO_SLUG)
      .required_integer("pr_id", PR_ID)
      .build(),
    t("approve_pull_request", "Approve a pull request")
      .required_string("repo_slug", REPO_SLUG)
      .required_integer("pr_id", PR_ID)
      .build(),
    t("get_pull_request_diff", "Get the diff of a pull request")
      .required_string("repo_slug", REPO_SLUG)
      .required_integer("pr_id", PR_ID)
      .build(),
    t("add_pull_request_comment", "Comment on a pull request")
      .required_string("repo_slug", REPO_SLUG)
      .required_integer("pr_id", PR_ID)
      .required_string("text", "Comment text")
      .build(),
    t("get_pull_request_comments", "List comments on a pull request")
      .required_string("repo_slug", REPO_SLUG)
      .required_integer("pr_id", PR_ID)
      .integer("limit", "Maximum number of comments", DEFAULT_PAGE_SIZE)
      .build(),
    t("search_code", "Search code across the workspace (Cloud only)")
      .required_string("query", "Search text")
      .integer("limit", "Maximum number of matches", RICH_PAGE_SIZE)
      .build(),
  ]
}

pub async fn call(code: &dyn CodeHost, name: &str, args: &mut Args<'_>) -> ToolResult {
  match name {
    "list_repositories" => code.list_repositories(args.u32_or("limit", DEFAULT_PAGE_SIZE)?).await,
    "get_repository" => code.get_repository(args.str("repo_slug")?).await,
    "get_default_branch" => code.get_default_branch(args.str("repo_slug")?).await,
    "list_branches" => {
      let repo_slug = args.str("repo_slug")?;
      let filter = args.opt_str("filter")?;
      let limit = args.u32_or("limit", DEFAULT_PAGE_SIZE)?;
      code.list_branches(repo_slug, filter, limit).await
    }
    "create_branch" => {
      let repo_slug = args.str("repo_slug")?;
      let branch_name = args.str("branch_name")?;
      let start_point = args.str("start_point")?;
      code.create_branch(repo_slug, branch_name, start_point).await
    }
    "get_file_content" => {
      let repo_slug = args.str("repo_slug")?;
      let file_path = args.str("file_path")?;
      let reference = args.opt_str("ref")?;
      code.get_file_content(repo_slug, file_path, reference).await
    }
    "list_directory" => {
      let repo_slug = args.str("repo_slug")?;
      let path = args.str_or("path", "")?;
      let reference = args.opt_str("ref")?;
      code.list_directory(repo_slug, path, reference).await
    }
    "list_commits" => {
      let repo_slug = args.str("repo_slug")?;
      let branch = args.opt_str("branch")?;
      let limit = args.u32_or("limit", RICH_PAGE_SIZE)?;
      code.list_commits(repo_slug, branch, limit).await
    }
    "get_commit" => {
      let repo_slug = args.str("repo_slug")?;
      let commit_hash = args.str("commit_hash")?;
      code.get_commit(repo_slug, commit_hash).await
    }
    "get_diff" => {
      let repo_slug = args.str("repo_slug")?;
      let from_ref = args.str("from_ref")?;
      let to_ref = args.str("to_ref")?;
      code.get_diff(repo_slug, from_ref, to_ref).await
    }
    "list_pull_requests" => {
      let repo_slug = args.str("repo_slug")?;
      let state = args.str_or("state", DEFAULT_PR_STATE)?;
      let limit = args.u32_or("limit", RICH_PAGE_SIZE)?;
      code.list_pull_requests(repo_slug, state, limit).await
    }
    "get_pull_request" => {
      let repo_slug = args.str("repo_slug")?;
      let pr_id = args.i64("pr_id")?;
      code.get_pull_request(repo_slug, pr_id).await
    }
    "create_pull_request" => {
      let reviewers = args.str_list("reviewers")?;
      let pull_request = NewPullRequest {
        title: args.str("title")?,
        source_branch: args.str("source_branch")?,
        destination_branch: args.str("destination_branch")?,
        description: args.str_or("description", "")?,
        reviewers: &reviewers,
      };
      let repo_slug = args.str("repo_slug")?;
      code.create_pull_request(repo_slug, &pull_request).await
    }
    "update_pull_request" => {
      let repo_slug = args.str("repo_slug")?;
      let pr_id = args.i64("pr_id")?;
      let title = args.opt_str("title")?;
      let description = args.opt_str("description")?;
      code.update_pull_request(repo_slug, pr_id, title, description).await
    }
    "merge_pull_request" => {
      let repo_slug = args.str("repo_slug")?;
      let pr_id = args.i64("pr_id")?;
      let message = args.opt_str("message")?;
      let strategy = args.opt_str("strategy")?;
      code.merge_pull_request(repo_slug, pr_id, message, strategy).await
    }
    "decline_pull_request" => {
      let repo_slug = args.str("repo_slug")?;
      let pr_id = args.i64("pr_id")?;
      code.decline_pull_request(repo_slug, pr_id).await
    }
    "approve_pull_request" => {
      let repo_slug = args.str("repo_slug")?;
      let pr_id = args.i64("pr_id")?;
      code.approve_pull_request(repo_slug, pr_id).await
    }
    "get_pull_request_diff" => {
      let repo_slug = args.str("repo_slug")?;
      let pr_id = args.i64("pr_id")?;
      code.get_pull_request_diff(repo_slug, pr_id).await
    }
    "add_pull_request_comment" => {
      let repo_slug = args.str("repo_slug")?;
      let pr_id = args.i64("pr_id")?;
      let text = args.str("text")?;
      code.add_pull_request_comment(repo_slug, pr_id, text).await
    }
    "get_pull_request_comments" => {
      let repo_slug = args.str("repo_slug")?;
      let pr_id = args.i64("pr_id")?;
      let limit = args.u32_or("limit", DEFAULT_PAGE_SIZE)?;
      code.get_pull_request_comments(repo_slug, pr_id, limit).await
    }
    "search_code" => {
      let query = args.str("query")?;
      let limit = args.u32_or("limit", RICH_PAGE_SIZE)?;
      code.search_code(query, limit).await
    }
    _ => Err(ToolError::UnknownTool(name.to_string())),
  }
}
