//! # Jira Bindings
//!
//! Jira REST API integration for both deployment flavours. The shared REST v2
//! surface lives on [`JiraClient`]; [`CloudJira`] and [`DataCenterJira`]
//! implement the [`IssueTracker`] capability and supply what differs between
//! them: the search endpoint and whether users are identified by account id
//! or by username.

mod client;
mod cloud;
pub mod consts;
mod datacenter;
mod endpoints;
pub mod jql;
pub mod models;
mod tracker;

pub use client::JiraClient;
pub use cloud::CloudJira;
pub use datacenter::DataCenterJira;
pub use models::NewIssue;
pub use tracker::{IssueTracker, connect};
