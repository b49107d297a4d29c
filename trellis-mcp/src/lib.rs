//! # Trellis MCP Server
//!
//! JSON-RPC tool endpoint exposing Jira, Confluence and Bitbucket operations
//! (Cloud or Data Center) plus the ticket support agent's context builders.
//!
//! Requests arrive at the axum router in [`handler`], tool names are resolved
//! against the static catalogue in [`registry`], and [`dispatch`] routes the
//! call to the matching binding with its arguments parsed by [`args`].

pub mod args;
pub mod context;
pub mod dispatch;
pub mod handler;
pub mod protocol;
pub mod registry;
pub mod tools;

pub use context::ServerContext;
pub use handler::router;
pub use registry::Registry;
