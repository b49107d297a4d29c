//! # Platform Selection
//!
//! All three backends run either against Atlassian Cloud or against Data
//! Center installations. The choice is made once at startup and applies to
//! every binding; mixing is not supported.

use std::fmt;

use anyhow::{Result, bail};

use crate::config::ConfigMap;
use crate::consts::{DATA_CENTER_TOKEN_KEYS, ENV_DEPLOYMENT_TYPE};

/// Deployment flavour of the upstream platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Deployment {
  Cloud,
  DataCenter,
}

impl Deployment {
  /// Choose the deployment for this process.
  ///
  /// `DEPLOYMENT_TYPE` wins when set. Otherwise the presence of any Data
  /// Center personal access token selects Data Center, even when Cloud
  /// credentials are configured as well.
  pub fn select(config: &ConfigMap) -> Result<Self> {
    if let Some(explicit) = config.get(ENV_DEPLOYMENT_TYPE) {
      return Self::parse(explicit);
    }

    let has_pat = DATA_CENTER_TOKEN_KEYS.iter().any(|key| config.has(key));
    Ok(if has_pat { Self::DataCenter } else { Self::Cloud })
  }

  fn parse(value: &str) -> Result<Self> {
    match value.to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
      "cloud" => Ok(Self::Cloud),
      "datacenter" | "server" | "dc" => Ok(Self::DataCenter),
      other => bail!("{ENV_DEPLOYMENT_TYPE} must be 'cloud' or 'datacenter', got '{other}'"),
    }
  }

  /// Short label used in logs, metrics and the health probe.
  pub const fn label(self) -> &'static str {
    match self {
      Self::Cloud => "cloud",
      Self::DataCenter => "datacenter",
    }
  }

  /// Human-readable name used in error messages.
  pub const fn display_name(self) -> &'static str {
    match self {
      Self::Cloud => "Cloud",
      Self::DataCenter => "Data Center",
    }
  }
}

impl fmt::Display for Deployment {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}
