//! # Confluence Bindings
//!
//! Confluence REST API integration for both deployment flavours. Cloud serves
//! the API under `/wiki/rest/api`, Data Center under `/rest/api`; beyond that
//! the surfaces match except that Data Center has no descendants endpoint.

mod client;
mod cloud;
pub mod consts;
pub mod cql;
mod datacenter;
mod endpoints;
mod models;
mod wiki;

pub use client::ConfluenceClient;
pub use cloud::CloudConfluence;
pub use datacenter::DataCenterConfluence;
pub use wiki::{Wiki, connect};
