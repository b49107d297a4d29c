//! # Jira API Endpoints
//!
//! Endpoint implementations on [`JiraClient`](crate::JiraClient), grouped by
//! resource. Every method checks availability, then validates its arguments,
//! and only then builds a URL.

pub mod issues;
pub mod projects;
pub mod search;
pub mod transitions;
pub mod users;
