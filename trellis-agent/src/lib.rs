//! # Ticket Support Agent
//!
//! Assembles context bundles for AI-assisted support triage: the open queue
//! split into alerts and requests, the request templates that apply to a
//! ticket, per-member workload, troubleshooting pages and repository
//! pointers, and expertise queries. The agent never ranks or decides; it
//! only gathers, normalises and returns data.

mod agent;
mod assignment;
mod classify;
pub mod config;
pub mod consts;
mod expertise;
pub mod field;
pub mod jql;
pub mod links;
mod templates;
#[cfg(test)]
mod testing;
mod troubleshooting;
mod workload;

pub use agent::{IssueRef, PageRef, SupportAgent};
pub use config::{AgentConfig, TeamMember, TemplateRule};
pub use field::CustomFieldValue;
