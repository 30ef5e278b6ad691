//! Alert policy listing.

use crate::client::NewRelicClient;
use crate::model::AlertPolicy;
use crate::tools::or_na;
use anyhow::Result;
use opsgate_mcp::protocol::{CallToolResult, ToolSchema};
use opsgate_mcp::registry::{json_schema_object, Tool};
use std::fmt::Write as _;
use std::sync::Arc;

/// List alert policies.
pub struct AlertPoliciesTool {
    client: Arc<NewRelicClient>,
}

impl AlertPoliciesTool {
    pub fn new(client: Arc<NewRelicClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for AlertPoliciesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_alert_policies".to_string(),
            description: "Get NewRelic alert policies".to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        match self.client.alert_policies().await {
            Ok(response) => Ok(CallToolResult::text(format_policies(&response.policies))),
            Err(err) => Ok(CallToolResult::error(err.to_string())),
        }
    }
}

fn format_policies(policies: &[AlertPolicy]) -> String {
    if policies.is_empty() {
        return "No alert policies found.".to_string();
    }

    let mut out = format!("Found {} alert policies:\n\n", policies.len());
    for policy in policies {
        let _ = writeln!(
            out,
            "• **{}** (ID: {})",
            policy.name.as_deref().unwrap_or("Unknown"),
            policy.id
        );
        let _ = writeln!(
            out,
            "  - Incident Preference: {}",
            or_na(&policy.incident_preference)
        );
        if let Some(created_at) = policy.created_at {
            let _ = writeln!(out, "  - Created: {}", created_at);
        }
        if let Some(updated_at) = policy.updated_at {
            let _ = writeln!(out, "  - Updated: {}", updated_at);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NewRelicConfig;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn format_policies_empty() {
        assert_eq!(format_policies(&[]), "No alert policies found.");
    }

    #[test]
    fn format_policies_includes_timestamps_when_present() {
        let policies = vec![AlertPolicy {
            id: 11,
            name: Some("High error rate".to_string()),
            incident_preference: Some("PER_POLICY".to_string()),
            created_at: Some(1700000000000),
            updated_at: None,
        }];

        let text = format_policies(&policies);
        assert!(text.starts_with("Found 1 alert policies:"));
        assert!(text.contains("• **High error rate** (ID: 11)"));
        assert!(text.contains("  - Incident Preference: PER_POLICY"));
        assert!(text.contains("  - Created: 1700000000000"));
        assert!(!text.contains("  - Updated:"));
    }

    #[tokio::test]
    async fn lists_policies_from_api() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/alert_policies.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "policies": [
                    { "id": 1, "name": "Default", "incident_preference": "PER_POLICY" }
                ]
            })))
            .mount(&server)
            .await;

        let base = Url::parse(&format!("{}/", server.uri())).unwrap();
        let client =
            NewRelicClient::new(NewRelicConfig::new(base).with_api_key("NRAK-test")).unwrap();
        let tool = AlertPoliciesTool::new(Arc::new(client));

        let result = tool.execute(serde_json::json!({})).await.unwrap();
        assert!(result.is_error.is_none());
        let opsgate_mcp::protocol::ToolContent::Text { text } = &result.content[0];
        assert!(text.contains("• **Default** (ID: 1)"));
    }
}
