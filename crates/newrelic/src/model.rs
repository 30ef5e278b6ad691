//! Typed views of NewRelic REST API (v2) payloads.
//!
//! Everything the API may omit is optional; the formatting layer decides
//! how absent values render.

use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
pub struct Application {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub health_status: Option<String>,
    #[serde(default)]
    pub reporting: bool,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub last_reported_at: Option<String>,
    #[serde(default)]
    pub application_summary: Option<ApplicationSummary>,
    #[serde(default)]
    pub end_user_summary: Option<EndUserSummary>,
    #[serde(default)]
    pub settings: Option<ApplicationSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSummary {
    #[serde(default)]
    pub response_time: Option<f64>,
    #[serde(default)]
    pub throughput: Option<f64>,
    #[serde(default)]
    pub error_rate: Option<f64>,
    #[serde(default)]
    pub apdex_score: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EndUserSummary {
    #[serde(default)]
    pub response_time: Option<f64>,
    #[serde(default)]
    pub throughput: Option<f64>,
    #[serde(default)]
    pub apdex_score: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    #[serde(default)]
    pub app_apdex_threshold: Option<f64>,
    #[serde(default)]
    pub end_user_apdex_threshold: Option<f64>,
    #[serde(default)]
    pub enable_real_user_monitoring: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricData {
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Metric {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub timeslices: Vec<Timeslice>,
}

/// One aggregation window. `values` keys vary by metric, so they stay
/// dynamic; BTreeMap keeps the rendering order stable.
#[derive(Debug, Clone, Deserialize)]
pub struct Timeslice {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub values: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub health_status: Option<String>,
    #[serde(default)]
    pub reporting: bool,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub summary: Option<ServerSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSummary {
    #[serde(default)]
    pub cpu: Option<f64>,
    #[serde(default)]
    pub memory: Option<f64>,
    #[serde(default)]
    pub disk_io: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlertPolicy {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub incident_preference: Option<String>,
    /// Epoch milliseconds.
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<i64>,
}
