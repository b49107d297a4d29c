//! # Confluence API Endpoints
//!
//! Endpoint implementations on [`ConfluenceClient`](crate::ConfluenceClient),
//! grouped by resource.

pub mod comments;
pub mod pages;
pub mod search;
pub mod spaces;
