//! Application listing, details, and metrics.

use crate::client::NewRelicClient;
use crate::model::{Application, MetricData};
use crate::tools::{or_na, reporting_mark};
use anyhow::{Context, Result};
use chrono::{Duration, SecondsFormat, Utc};
use opsgate_mcp::protocol::{CallToolResult, ToolSchema};
use opsgate_mcp::registry::{json_schema_integer, json_schema_object, json_schema_string, Tool};
use serde::Deserialize;
use std::fmt::Write as _;
use std::sync::Arc;

/// List applications, with optional name/language filters.
pub struct ListApplicationsTool {
    client: Arc<NewRelicClient>,
}

impl ListApplicationsTool {
    pub fn new(client: Arc<NewRelicClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ListApplicationsArgs {
    #[serde(default)]
    filter_name: Option<String>,
    #[serde(default)]
    filter_language: Option<String>,
}

#[async_trait::async_trait]
impl Tool for ListApplicationsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_applications".to_string(),
            description: "List NewRelic applications".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "filter_name": json_schema_string(
                        "Filter applications by name (partial match)"
                    ),
                    "filter_language": json_schema_string(
                        "Filter applications by language (e.g., python, java, ruby)"
                    )
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ListApplicationsArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for list_applications")?;

        match self
            .client
            .list_applications(args.filter_name.as_deref(), args.filter_language.as_deref())
            .await
        {
            Ok(response) => Ok(CallToolResult::text(format_applications(
                &response.applications,
            ))),
            Err(err) => Ok(CallToolResult::error(err.to_string())),
        }
    }
}

fn format_applications(applications: &[Application]) -> String {
    if applications.is_empty() {
        return "No applications found matching the criteria.".to_string();
    }

    let mut out = format!("Found {} applications:\n\n", applications.len());
    for app in applications {
        let _ = writeln!(
            out,
            "• **{}** (ID: {})",
            app.name.as_deref().unwrap_or("Unknown"),
            app.id
        );
        let _ = writeln!(
            out,
            "  - Health: {}",
            app.health_status.as_deref().unwrap_or("unknown")
        );
        let _ = writeln!(out, "  - Reporting: {}", reporting_mark(app.reporting));
        let _ = writeln!(out, "  - Language: {}", or_na(&app.language));

        if let Some(summary) = &app.application_summary {
            let _ = writeln!(out, "  - Response Time: {}ms", or_na(&summary.response_time));
            let _ = writeln!(out, "  - Throughput: {} rpm", or_na(&summary.throughput));
            let _ = writeln!(out, "  - Error Rate: {}%", or_na(&summary.error_rate));
        }
        out.push('\n');
    }
    out
}

/// Fetch detailed information about one application.
pub struct GetApplicationTool {
    client: Arc<NewRelicClient>,
}

impl GetApplicationTool {
    pub fn new(client: Arc<NewRelicClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetApplicationArgs {
    app_id: i64,
}

#[async_trait::async_trait]
impl Tool for GetApplicationTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_application".to_string(),
            description: "Get detailed information about a specific NewRelic application"
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "app_id": json_schema_integer("NewRelic application ID")
                }),
                vec!["app_id"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetApplicationArgs =
            serde_json::from_value(arguments).context("Invalid arguments for get_application")?;

        match self.client.get_application(args.app_id).await {
            Ok(response) => match response.application {
                Some(app) => Ok(CallToolResult::text(format_application(&app))),
                None => Ok(CallToolResult::text(format!(
                    "Application with ID {} not found.",
                    args.app_id
                ))),
            },
            Err(err) => Ok(CallToolResult::error(err.to_string())),
        }
    }
}

fn format_application(app: &Application) -> String {
    let mut out = format!(
        "**Application Details: {}**\n\n",
        app.name.as_deref().unwrap_or("Unknown")
    );
    let _ = writeln!(out, "- **ID**: {}", app.id);
    let _ = writeln!(
        out,
        "- **Health Status**: {}",
        app.health_status.as_deref().unwrap_or("unknown")
    );
    let _ = writeln!(
        out,
        "- **Reporting**: {}",
        if app.reporting { "Yes" } else { "No" }
    );
    let _ = writeln!(out, "- **Language**: {}", or_na(&app.language));

    if let Some(last_reported) = &app.last_reported_at {
        let _ = writeln!(out, "- **Last Reported**: {}", last_reported);
    }

    if let Some(summary) = &app.application_summary {
        out.push_str("\n**Performance Summary:**\n");
        let _ = writeln!(out, "- Response Time: {}ms", or_na(&summary.response_time));
        let _ = writeln!(out, "- Throughput: {} rpm", or_na(&summary.throughput));
        let _ = writeln!(out, "- Error Rate: {}%", or_na(&summary.error_rate));
        let _ = writeln!(out, "- Apdex Score: {}", or_na(&summary.apdex_score));
    }

    if let Some(summary) = &app.end_user_summary {
        out.push_str("\n**End User Summary:**\n");
        let _ = writeln!(out, "- Response Time: {}ms", or_na(&summary.response_time));
        let _ = writeln!(out, "- Throughput: {} rpm", or_na(&summary.throughput));
        let _ = writeln!(out, "- Apdex Score: {}", or_na(&summary.apdex_score));
    }

    if let Some(settings) = &app.settings {
        out.push_str("\n**Settings:**\n");
        let _ = writeln!(
            out,
            "- App Apdex Threshold: {}s",
            or_na(&settings.app_apdex_threshold)
        );
        let _ = writeln!(
            out,
            "- End User Apdex Threshold: {}s",
            or_na(&settings.end_user_apdex_threshold)
        );
        let _ = writeln!(
            out,
            "- Enable Real User Monitoring: {}",
            if settings.enable_real_user_monitoring {
                "Yes"
            } else {
                "No"
            }
        );
    }

    out
}

/// Fetch metric data for an application over a time range.
pub struct ApplicationMetricsTool {
    client: Arc<NewRelicClient>,
}

impl ApplicationMetricsTool {
    pub fn new(client: Arc<NewRelicClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ApplicationMetricsArgs {
    app_id: i64,
    metric_names: String,
    #[serde(default)]
    from_time: Option<String>,
    #[serde(default)]
    to_time: Option<String>,
}

#[async_trait::async_trait]
impl Tool for ApplicationMetricsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_application_metrics".to_string(),
            description: "Get metrics for a specific NewRelic application".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "app_id": json_schema_integer("NewRelic application ID"),
                    "metric_names": json_schema_string(
                        "Comma-separated list of metric names (e.g., \"HttpDispatcher,Apdex\")"
                    ),
                    "from_time": json_schema_string(
                        "Start time in ISO format (default: 30 minutes ago)"
                    ),
                    "to_time": json_schema_string("End time in ISO format (default: now)")
                }),
                vec!["app_id", "metric_names"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ApplicationMetricsArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get_application_metrics")?;

        let names: Vec<String> = args
            .metric_names
            .split(',')
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        let (default_from, default_to) = default_time_range();
        let from = args.from_time.unwrap_or(default_from);
        let to = args.to_time.unwrap_or(default_to);

        match self
            .client
            .application_metrics(args.app_id, &names, &from, &to)
            .await
        {
            Ok(response) => match response.metric_data {
                Some(data) => Ok(CallToolResult::text(format_metrics(
                    args.app_id,
                    &from,
                    &to,
                    &data,
                ))),
                None => Ok(CallToolResult::text(format!(
                    "No metric data found for application {}.",
                    args.app_id
                ))),
            },
            Err(err) => Ok(CallToolResult::error(err.to_string())),
        }
    }
}

/// Last 30 minutes, UTC.
fn default_time_range() -> (String, String) {
    let now = Utc::now();
    let from = now - Duration::minutes(30);
    (
        from.to_rfc3339_opts(SecondsFormat::Secs, true),
        now.to_rfc3339_opts(SecondsFormat::Secs, true),
    )
}

fn format_metrics(app_id: i64, from: &str, to: &str, data: &MetricData) -> String {
    let mut out = format!(
        "**Metrics for Application ID {}**\nTime Range: {} to {}\n\n",
        app_id, from, to
    );

    for metric in &data.metrics {
        let _ = writeln!(
            out,
            "**{}**",
            metric.name.as_deref().unwrap_or("Unknown Metric")
        );
        for slice in &metric.timeslices {
            let _ = writeln!(
                out,
                "  Period: {} to {}",
                slice.from.as_deref().unwrap_or(""),
                slice.to.as_deref().unwrap_or("")
            );
            for (key, value) in &slice.values {
                let _ = writeln!(out, "    {}: {}", key, render_value(value));
            }
            out.push('\n');
        }
    }

    out
}

fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NewRelicConfig;
    use crate::model::{ApplicationSummary, Metric, Timeslice};
    use url::Url;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn application(id: i64, name: &str) -> Application {
        Application {
            id,
            name: Some(name.to_string()),
            health_status: Some("green".to_string()),
            reporting: true,
            language: Some("python".to_string()),
            last_reported_at: None,
            application_summary: None,
            end_user_summary: None,
            settings: None,
        }
    }

    #[test]
    fn format_applications_empty() {
        assert_eq!(
            format_applications(&[]),
            "No applications found matching the criteria."
        );
    }

    #[test]
    fn format_applications_includes_summary_when_present() {
        let mut app = application(1, "checkout");
        app.application_summary = Some(ApplicationSummary {
            response_time: Some(12.5),
            throughput: Some(240.0),
            error_rate: None,
            apdex_score: None,
        });

        let text = format_applications(&[app]);
        assert!(text.starts_with("Found 1 applications:"));
        assert!(text.contains("• **checkout** (ID: 1)"));
        assert!(text.contains("  - Health: green"));
        assert!(text.contains("  - Reporting: ✓"));
        assert!(text.contains("  - Response Time: 12.5ms"));
        assert!(text.contains("  - Error Rate: N/A%"));
    }

    #[test]
    fn format_application_omits_absent_sections() {
        let text = format_application(&application(7, "api"));
        assert!(text.contains("**Application Details: api**"));
        assert!(text.contains("- **Reporting**: Yes"));
        assert!(!text.contains("Performance Summary"));
        assert!(!text.contains("Settings"));
    }

    #[test]
    fn format_metrics_renders_timeslice_values() {
        let data = MetricData {
            metrics: vec![Metric {
                name: Some("HttpDispatcher".to_string()),
                timeslices: vec![Timeslice {
                    from: Some("2024-01-01T00:00:00+00:00".to_string()),
                    to: Some("2024-01-01T00:30:00+00:00".to_string()),
                    values: [
                        ("average_response_time".to_string(), serde_json::json!(12.5)),
                        ("call_count".to_string(), serde_json::json!(100)),
                    ]
                    .into_iter()
                    .collect(),
                }],
            }],
        };

        let text = format_metrics(7, "a", "b", &data);
        assert!(text.starts_with("**Metrics for Application ID 7**\nTime Range: a to b"));
        assert!(text.contains("**HttpDispatcher**"));
        assert!(text.contains("    average_response_time: 12.5"));
        assert!(text.contains("    call_count: 100"));
    }

    #[test]
    fn default_time_range_is_thirty_minutes() {
        let (from, to) = default_time_range();
        let from = chrono::DateTime::parse_from_rfc3339(&from).unwrap();
        let to = chrono::DateTime::parse_from_rfc3339(&to).unwrap();
        assert_eq!((to - from).num_minutes(), 30);
    }

    #[tokio::test]
    async fn metric_names_are_split_and_trimmed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/applications/7/metrics/data.json"))
            .and(query_param("names[]", "Apdex"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "metric_data": { "metrics": [] }
            })))
            .mount(&server)
            .await;

        let base = Url::parse(&format!("{}/", server.uri())).unwrap();
        let client =
            NewRelicClient::new(NewRelicConfig::new(base).with_api_key("NRAK-test")).unwrap();
        let tool = ApplicationMetricsTool::new(Arc::new(client));

        let result = tool
            .execute(serde_json::json!({
                "app_id": 7,
                "metric_names": "HttpDispatcher, Apdex"
            }))
            .await
            .unwrap();
        assert!(result.is_error.is_none());
    }

    #[tokio::test]
    async fn application_not_found_renders_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/applications/404.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({})),
            )
            .mount(&server)
            .await;

        let base = Url::parse(&format!("{}/", server.uri())).unwrap();
        let client =
            NewRelicClient::new(NewRelicConfig::new(base).with_api_key("NRAK-test")).unwrap();
        let tool = GetApplicationTool::new(Arc::new(client));

        let result = tool
            .execute(serde_json::json!({ "app_id": 404 }))
            .await
            .unwrap();
        let opsgate_mcp::protocol::ToolContent::Text { text } = &result.content[0];
        assert_eq!(text, "Application with ID 404 not found.");
    }
}
