//! # Bitbucket Bindings
//!
//! Bitbucket REST API integration for both deployment flavours. Cloud
//! addresses repositories as `repositories/{workspace}/{slug}` under the 2.0
//! API; Data Center as `projects/{project}/repos/{slug}` under
//! `/rest/api/1.0`. The two differ enough that each flavour implements
//! [`CodeHost`] on its own, sharing only the authenticated [`BitbucketClient`].

mod client;
mod cloud;
pub mod consts;
mod datacenter;
mod host;
pub mod models;
pub mod utils;

pub use client::BitbucketClient;
pub use cloud::CloudBitbucket;
pub use datacenter::DataCenterBitbucket;
pub use host::{CodeHost, connect};
pub use models::NewPullRequest;
pub use utils::{BrowseLink, parse_browse_url};
