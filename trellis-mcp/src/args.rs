//! # Tool Arguments
//!
//! Typed extraction of tool arguments from the `arguments` object of a
//! `tools/call` request. Absent keys fall back to defaults; present keys of
//! the wrong type are rejected. Every key read is recorded so tests can hold
//! the dispatcher to the advertised input schemas.

use serde_json::{Map, Value};
use trellis_core::ToolError;

pub struct Args<'a> {
  values: &'a Map<String, Value>,
  extracted: Vec<&'static str>,
}

fn invalid(name: &str, reason: &str) -> ToolError {
  ToolError::InvalidArgument {
    name: name.to_string(),
    reason: reason.to_string(),
  }
}

impl<'a> Args<'a> {
  pub fn new(values: &'a Map<String, Value>) -> Self {
    Self {
      values,
      extracted: Vec::new(),
    }
  }

  /// Keys read so far, in order.
  pub fn extracted(&self) -> &[&'static str] {
    &self.extracted
  }

  fn lookup(&mut self, name: &'static str) -> Option<&'a Value> {
    self.extracted.push(name);
    self.values.get(name).filter(|value| !value.is_null())
  }

  fn missing(name: &str) -> ToolError {
    ToolError::validation(format!("Missing required argument: {name}"))
  }

  pub fn opt_str(&mut self, name: &'static str) -> Result<Option<&'a str>, ToolError> {
    match self.lookup(name) {
      None => Ok(None),
      Some(Value::String(s)) => Ok(Some(s.as_str())),
      Some(_) => Err(invalid(name, "expected a string")),
    }
  }

  pub fn str(&mut self, name: &'static str) -> Result<&'a str, ToolError> {
    self.opt_str(name)?.ok_or_else(|| Self::missing(name))
  }

  pub fn str_or(&mut self, name: &'static str, default: &'static str) -> Result<&'a str, ToolError> {
    Ok(self.opt_str(name)?.unwrap_or(default))
  }

  fn opt_i64(&mut self, name: &'static str) -> Result<Option<i64>, ToolError> {
    match self.lookup(name) {
      None => Ok(None),
      Some(value) => value
        .as_i64()
        .map(Some)
        .ok_or_else(|| invalid(name, "expected an integer")),
    }
  }

  pub fn i64(&mut self, name: &'static str) -> Result<i64, ToolError> {
    self.opt_i64(name)?.ok_or_else(|| Self::missing(name))
  }

  /// A non-negative count such as `limit` or `max_results`.
  pub fn u32_or(&mut self, name: &'static str, default: u32) -> Result<u32, ToolError> {
    match self.opt_i64(name)? {
      None => Ok(default),
      Some(value) => u32::try_from(value).map_err(|_| invalid(name, "expected a non-negative integer")),
    }
  }

  pub fn bool_or(&mut self, name: &'static str, default: bool) -> Result<bool, ToolError> {
    match self.lookup(name) {
      None => Ok(default),
      Some(Value::Bool(b)) => Ok(*b),
      Some(_) => Err(invalid(name, "expected a boolean")),
    }
  }

  /// A list of strings; absent means empty.
  pub fn str_list(&mut self, name: &'static str) -> Result<Vec<String>, ToolError> {
    match self.lookup(name) {
      None => Ok(Vec::new()),
      Some(Value::Array(items)) => items
        .iter()
        .map(|item| {
          item
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| invalid(name, "expected a list of strings"))
        })
        .collect(),
      Some(_) => Err(invalid(name, "expected a list of strings")),
    }
  }

  pub fn object(&mut self, name: &'static str) -> Result<&'a Value, ToolError> {
    match self.lookup(name) {
      None => Err(Self::missing(name)),
      Some(value @ Value::Object(_)) => Ok(value),
      Some(_) => Err(invalid(name, "expected an object")),
    }
  }
}
