//! Tool descriptors and argument routing, one module per capability.

pub mod agent;
pub mod bitbucket;
pub mod confluence;
pub mod jira;
