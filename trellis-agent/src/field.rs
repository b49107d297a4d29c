//! # Custom Field Values
//!
//! The discriminating custom field arrives in one of three shapes depending
//! on how the tenant configured it: plain text, a multi-select list of
//! options, or a single select option. [`CustomFieldValue`] names the three
//! and every reader in the agent goes through it.

use serde_json::Value;

use crate::consts::{ALERT_MARKER, LABEL_SEPARATOR};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomFieldValue {
  Text(String),
  List(Vec<String>),
  Record(String),
}

impl CustomFieldValue {
  /// Normalise a raw field value. `null` and unrecognised shapes yield `None`.
  pub fn from_value(value: &Value) -> Option<Self> {
    match value {
      Value::String(text) => Some(Self::Text(text.clone())),
      Value::Array(items) => Some(Self::List(items.iter().filter_map(option_label).collect())),
      Value::Object(_) => option_label(value).map(Self::Record),
      Value::Number(n) => Some(Self::Text(n.to_string())),
      _ => None,
    }
  }

  /// Read `field_id` from an issue's `fields` object.
  pub fn from_fields(fields: &Value, field_id: &str) -> Option<Self> {
    fields.get(field_id).and_then(Self::from_value)
  }

  pub fn labels(&self) -> Vec<&str> {
    match self {
      Self::Text(text) | Self::Record(text) => vec![text.as_str()],
      Self::List(labels) => labels.iter().map(String::as_str).collect(),
    }
  }

  /// Whether any label marks the ticket as an alert.
  pub fn is_alert(&self) -> bool {
    self.labels().iter().any(|label| label.contains(ALERT_MARKER))
  }

  /// Single-line rendering; list labels are joined with `" - "`.
  pub fn display(&self) -> String {
    self.labels().join(LABEL_SEPARATOR)
  }
}

/// Option label of a select value: `selectedOptionLabel`, else `value`.
fn option_label(value: &Value) -> Option<String> {
  match value {
    Value::String(text) => Some(text.clone()),
    Value::Object(map) => map
      .get("selectedOptionLabel")
      .or_else(|| map.get("value"))
      .and_then(Value::as_str)
      .map(str::to_string),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_three_shapes_classify_alike() {
    let text = CustomFieldValue::from_value(&json!("Alert")).unwrap();
    let list = CustomFieldValue::from_value(&json!([{ "selectedOptionLabel": "Alert" }])).unwrap();
    let record = CustomFieldValue::from_value(&json!({ "selectedOptionLabel": "Alert triage" })).unwrap();

    assert!(text.is_alert());
    assert!(list.is_alert());
    assert!(record.is_alert());
  }

  #[test]
  fn test_non_alert_values() {
    let list = CustomFieldValue::from_value(&json!([{ "selectedOptionLabel": "Standard Request" }])).unwrap();
    assert!(!list.is_alert());
    assert!(!CustomFieldValue::Text("alerting".to_string()).is_alert());
    assert!(!CustomFieldValue::List(Vec::new()).is_alert());
  }

  #[test]
  fn test_display_joins_list_labels() {
    let value = CustomFieldValue::from_value(&json!([
      { "selectedOptionLabel": "Data" },
      { "selectedOptionLabel": "Analysis" }
    ]))
    .unwrap();
    assert_eq!(value.display(), "Data - Analysis");
    assert_eq!(CustomFieldValue::Text("Alert - Disk Full".to_string()).display(), "Alert - Disk Full");
  }

  #[test]
  fn test_select_value_fallback() {
    let value = CustomFieldValue::from_value(&json!({ "id": "10001", "value": "Reporting" }));
    assert_eq!(value, Some(CustomFieldValue::Record("Reporting".to_string())));
  }

  #[test]
  fn test_missing_or_unknown_shapes() {
    assert_eq!(CustomFieldValue::from_value(&Value::Null), None);
    assert_eq!(CustomFieldValue::from_value(&json!({ "id": "1" })), None);
    assert_eq!(CustomFieldValue::from_value(&json!(true)), None);

    let fields = json!({ "customfield_1": "Alert" });
    assert!(CustomFieldValue::from_fields(&fields, "customfield_1").is_some());
    assert!(CustomFieldValue::from_fields(&fields, "customfield_2").is_none());
  }
}
