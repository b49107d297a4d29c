//! # Tool Registry
//!
//! Name-indexed catalogue of every tool the endpoint serves. Each descriptor
//! records which capability handles it; the dispatcher routes on that.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::tools;

/// Capability that executes a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolGroup {
  Tracker,
  Wiki,
  CodeHost,
  Agent,
}

/// Tool definition as listed by `tools/list`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
  pub name: &'static str,
  pub description: &'static str,
  #[serde(rename = "inputSchema")]
  pub input_schema: Value,
  #[serde(skip)]
  pub group: ToolGroup,
}

impl ToolDescriptor {
  /// Property names declared by the input schema.
  pub fn properties(&self) -> Vec<&str> {
    self.input_schema["properties"]
      .as_object()
      .map(|props| props.keys().map(String::as_str).collect())
      .unwrap_or_default()
  }

  /// Required property names.
  pub fn required(&self) -> Vec<&str> {
    self.input_schema["required"]
      .as_array()
      .map(|keys| keys.iter().filter_map(Value::as_str).collect())
      .unwrap_or_default()
  }
}

/// Builder for a descriptor and its JSON-Schema input shape.
pub struct ToolBuilder {
  name: &'static str,
  description: &'static str,
  group: ToolGroup,
  properties: Map<String, Value>,
  required: Vec<&'static str>,
}

pub fn tool(group: ToolGroup, name: &'static str, description: &'static str) -> ToolBuilder {
  ToolBuilder {
    name,
    description,
    group,
    properties: Map::new(),
    required: Vec::new(),
  }
}

impl ToolBuilder {
  fn property(mut self, name: &'static str, schema: Value) -> Self {
    self.properties.insert(name.to_string(), schema);
    self
  }

  fn require(mut self, name: &'static str) -> Self {
    self.required.push(name);
    self
  }

  pub fn string(self, name: &'static str, description: &str) -> Self {
    self.property(name, json!({ "type": "string", "description": description }))
  }

  pub fn required_string(self, name: &'static str, description: &str) -> Self {
    self.string(name, description).require(name)
  }

  pub fn string_default(self, name: &'static str, description: &str, default: &str) -> Self {
    self.property(
      name,
      json!({ "type": "string", "description": description, "default": default }),
    )
  }

  pub fn string_enum(self, name: &'static str, description: &str, values: &[&str], default: &str) -> Self {
    self.property(
      name,
      json!({ "type": "string", "description": description, "enum": values, "default": default }),
    )
  }

  pub fn integer(self, name: &'static str, description: &str, default: u32) -> Self {
    self.property(
      name,
      json!({ "type": "integer", "description": description, "default": default, "minimum": 0 }),
    )
  }

  pub fn required_integer(self, name: &'static str, description: &str) -> Self {
    self
      .property(name, json!({ "type": "integer", "description": description, "minimum": 1 }))
      .require(name)
  }

  pub fn boolean(self, name: &'static str, description: &str, default: bool) -> Self {
    self.property(
      name,
      json!({ "type": "boolean", "description": description, "default": default }),
    )
  }

  pub fn string_list(self, name: &'static str, description: &str) -> Self {
    self.property(
      name,
      json!({ "type": "array", "items": { "type": "string" }, "description": description, "default": [] }),
    )
  }

  pub fn required_object(self, name: &'static str, description: &str) -> Self {
    self
      .property(name, json!({ "type": "object", "description": description }))
      .require(name)
  }

  pub fn build(self) -> ToolDescriptor {
    ToolDescriptor {
      name: self.name,
      description: self.description,
      input_schema: json!({
        "type": "object",
        "properties": self.properties,
        "required": self.required,
      }),
      group: self.group,
    }
  }
}

/// All tools, in listing order, with a name index.
pub struct Registry {
  tools: Vec<ToolDescriptor>,
  index: HashMap<&'static str, usize>,
}

impl Registry {
  pub fn new() -> Self {
    let tools: Vec<ToolDescriptor> = [
      tools::jira::descriptors(),
      tools::confluence::descriptors(),
      tools::bitbucket::descriptors(),
      tools::agent::descriptors(),
    ]
    .into_iter()
    .flatten()
    .collect();

    let index = tools.iter().enumerate().map(|(i, tool)| (tool.name, i)).collect();
    Self { tools, index }
  }

  pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
    self.index.get(name).map(|&i| &self.tools[i])
  }

  pub fn tools(&self) -> &[ToolDescriptor] {
    &self.tools
  }

  pub fn len(&self) -> usize {
    self.tools.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tools.is_empty()
  }
}

impl Default for Registry {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;

  #[test]
  fn test_names_are_unique() {
    let registry = Registry::new();
    let names: HashSet<&str> = registry.tools().iter().map(|tool| tool.name).collect();
    assert_eq!(names.len(), registry.len());
  }

  #[test]
  fn test_catalogue_size_per_group() {
    let registry = Registry::new();
    let count = |group| registry.tools().iter().filter(|tool| tool.group == group).count();
    assert_eq!(count(ToolGroup::Tracker), 17);
    assert_eq!(count(ToolGroup::Wiki), 12);
    assert_eq!(count(ToolGroup::CodeHost), 21);
    assert_eq!(count(ToolGroup::Agent), 7);
  }

  #[test]
  fn test_lookup_is_case_sensitive() {
    let registry = Registry::new();
    assert!(registry.get("get_issue").is_some());
    assert!(registry.get("Get_Issue").is_none());
    assert!(registry.get("nope").is_none());
  }

  #[test]
  fn test_required_keys_are_declared() {
    for tool in Registry::new().tools() {
      let properties = tool.properties();
      for key in tool.required() {
        assert!(properties.contains(&key), "{}: required '{key}' is not a property", tool.name);
      }
      assert_eq!(tool.input_schema["type"], "object", "{}", tool.name);
    }
  }

  #[test]
  fn test_descriptor_serialization() {
    let registry = Registry::new();
    let value = serde_json::to_value(registry.get("get_issue").unwrap()).unwrap();
    assert_eq!(value["name"], "get_issue");
    assert_eq!(value["inputSchema"]["required"], json!(["issue_key"]));
    assert!(value.get("group").is_none());
  }
}
