//! # Configuration Map
//!
//! The server consumes its secrets and settings as a flat string map. In
//! production the map is a snapshot of the process environment; tests build
//! one from literal pairs so nothing has to mutate global state.

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Immutable key/value configuration. Blank values count as absent.
#[derive(Debug, Clone, Default)]
pub struct ConfigMap {
  values: HashMap<String, String>,
}

impl ConfigMap {
  /// Snapshot the current process environment.
  pub fn from_env() -> Self {
    Self::from_pairs(std::env::vars())
  }

  /// Build a map from arbitrary key/value pairs.
  pub fn from_pairs<I, K, V>(pairs: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    let values = pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
    Self { values }
  }

  /// Look up a key, returning `None` for missing or whitespace-only values.
  pub fn get(&self, key: &str) -> Option<&str> {
    self
      .values
      .get(key)
      .map(|v| v.trim())
      .filter(|v| !v.is_empty())
  }

  /// Whether the key is present with a non-blank value.
  pub fn has(&self, key: &str) -> bool {
    self.get(key).is_some()
  }

  /// Look up a key with a fallback value.
  pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
    self.get(key).unwrap_or(default)
  }

  /// Parse a JSON-encoded value. Missing keys yield `Ok(None)`.
  pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
    match self.get(key) {
      Some(raw) => {
        let parsed = serde_json::from_str(raw).with_context(|| format!("{key} must contain valid JSON"))?;
        Ok(Some(parsed))
      }
      None => Ok(None),
    }
  }
}
