//! Expertise JQL: the query that finds a candidate's past tickets like this one.

use serde_json::json;
use trellis_core::{ToolError, ToolResult, validate};

use crate::agent::{SupportAgent, issue_type, summary};
use crate::consts::{ENV_ALERT_EXPERTISE_JQL, ENV_OTHER_EXPERTISE_JQL};
use crate::jql::{ExpertiseValues, interpolate, summary_prefix};

impl SupportAgent {
  pub async fn build_expertise_jql(&self, issue_key: &str, account_id: &str, is_alert: bool) -> ToolResult {
    validate::non_empty("account_id", account_id)?;
    let (template, key) = if is_alert {
      (&self.config().alert_expertise_jql, ENV_ALERT_EXPERTISE_JQL)
    } else {
      (&self.config().other_expertise_jql, ENV_OTHER_EXPERTISE_JQL)
    };
    let template = template
      .as_deref()
      .ok_or_else(|| ToolError::validation(format!("{key} is not configured")))?;

    let issue = self.tracker().get_issue(issue_key, None).await?;
    let fields = &issue["fields"];
    let custom_field_value = self
      .custom_field(fields)
      .map(|value| value.display())
      .unwrap_or_default();

    let values = ExpertiseValues {
      account_id,
      issue_type: issue_type(fields),
      custom_field_value: &custom_field_value,
      summary_prefix: summary_prefix(summary(fields)),
    };
    let jql = interpolate(template, &values);

    Ok(json!({
      "jql": jql,
      "is_alert": is_alert,
      "account_id": account_id,
      "issue_type": values.issue_type,
      "custom_field_value": values.custom_field_value,
      "summary_prefix": values.summary_prefix,
    }))
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use trellis_core::Deployment;
  use trellis_test_utils::cloud_config;
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::testing::agent_with;

  const TEMPLATE: &str = r#"assignee = "{account_id}" AND issuetype = "{issue_type}" AND "Work Type" = "{custom_field_value}" AND summary ~ "{summary_prefix}*""#;

  const MAPPING: &str = r#"{"Support Request": {"parent_page": "Templates", "custom_field": "customfield_100"}}"#;

  #[tokio::test]
  async fn test_builds_other_expertise_jql() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let agent = agent_with(
      &cloud_config(&mock_server.uri()),
      Deployment::Cloud,
      [("AGENT_TEMPLATE_MAPPING", MAPPING), ("AGENT_OTHER_EXPERTISE_JQL", TEMPLATE)],
    );

    Mock::given(method("GET"))
      .and(path("/rest/api/2/issue/SUP-5"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "key": "SUP-5",
        "fields": {
          "summary": "Daily Report: 2024-01-01",
          "issuetype": { "name": "Support Request" },
          "customfield_100": [{ "selectedOptionLabel": "Data" }, { "selectedOptionLabel": "Analysis" }]
        }
      })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let result = agent.build_expertise_jql("SUP-5", "u1", false).await?;
    assert_eq!(
      result["jql"],
      r#"assignee = "u1" AND issuetype = "Support Request" AND "Work Type" = "Data - Analysis" AND summary ~ "Daily Report*""#
    );
    assert_eq!(result["issue_type"], "Support Request");
    assert_eq!(result["custom_field_value"], "Data - Analysis");
    assert_eq!(result["summary_prefix"], "Daily Report");
    assert_eq!(result["is_alert"], false);
    Ok(())
  }

  #[tokio::test]
  async fn test_missing_template_is_rejected_before_fetching() {
    let mock_server = MockServer::start().await;
    let agent = agent_with(
      &cloud_config(&mock_server.uri()),
      Deployment::Cloud,
      [("AGENT_TEMPLATE_MAPPING", MAPPING), ("AGENT_OTHER_EXPERTISE_JQL", TEMPLATE)],
    );

    let err = agent.build_expertise_jql("SUP-5", "u1", true).await.unwrap_err();
    assert_eq!(err.to_string(), "AGENT_ALERT_EXPERTISE_JQL is not configured");

    let err = agent.build_expertise_jql("SUP-5", " ", false).await.unwrap_err();
    assert_eq!(err.to_string(), "account_id must not be empty");
    assert!(mock_server.received_requests().await.unwrap().is_empty());
  }
}
