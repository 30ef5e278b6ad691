//! Thin client over the NewRelic REST API (v2).
//!
//! All endpoints are GETs with query parameters; failures use HTTP status
//! plus an `{"error": {"title": ...}}` body.

use crate::config::NewRelicConfig;
use crate::error::{NewRelicError, NewRelicResult};
use crate::model::{AlertPolicy, Application, MetricData, Server};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;
use url::Url;

const API_KEY_HEADER: &str = "X-Api-Key";

#[derive(Debug)]
pub struct NewRelicClient {
    http: reqwest::Client,
    config: NewRelicConfig,
}

impl NewRelicClient {
    pub fn new(config: NewRelicConfig) -> NewRelicResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn api_key(&self) -> NewRelicResult<&str> {
        self.config.api_key.as_deref().ok_or(NewRelicError::MissingKey)
    }

    fn endpoint(&self, path: &str) -> NewRelicResult<Url> {
        Ok(self.config.base_url.join(path)?)
    }

    /// List applications, optionally filtered by name and language.
    pub async fn list_applications(
        &self,
        filter_name: Option<&str>,
        filter_language: Option<&str>,
    ) -> NewRelicResult<ApplicationsResponse> {
        let mut query = Vec::new();
        if let Some(name) = filter_name {
            query.push(("filter[name]", name.to_string()));
        }
        if let Some(language) = filter_language {
            query.push(("filter[language]", language.to_string()));
        }
        self.get("applications.json", &query).await
    }

    /// Fetch a single application by id.
    pub async fn get_application(&self, app_id: i64) -> NewRelicResult<ApplicationResponse> {
        self.get(&format!("applications/{}.json", app_id), &[])
            .await
    }

    /// Fetch metric data for an application over a time range.
    pub async fn application_metrics(
        &self,
        app_id: i64,
        metric_names: &[String],
        from: &str,
        to: &str,
    ) -> NewRelicResult<MetricDataResponse> {
        let mut query: Vec<(&str, String)> = metric_names
            .iter()
            .map(|name| ("names[]", name.clone()))
            .collect();
        query.push(("from", from.to_string()));
        query.push(("to", to.to_string()));

        self.get(&format!("applications/{}/metrics/data.json", app_id), &query)
            .await
    }

    /// List servers.
    pub async fn list_servers(&self) -> NewRelicResult<ServersResponse> {
        self.get("servers.json", &[]).await
    }

    /// List alert policies.
    pub async fn alert_policies(&self) -> NewRelicResult<AlertPoliciesResponse> {
        self.get("alert_policies.json", &[]).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> NewRelicResult<T> {
        let api_key = self.api_key()?;
        let url = self.endpoint(path)?;
        debug!(%url, "GET");

        let response = self
            .http
            .get(url)
            .header(API_KEY_HEADER, api_key)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NewRelicError::Status {
                status: status.as_u16(),
                title: error_title(&body)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string()),
            });
        }

        Ok(response.json().await?)
    }
}

/// Pull the human-readable title out of an error body, if there is one.
fn error_title(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorDetail,
    }
    #[derive(Deserialize)]
    struct ErrorDetail {
        title: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error.title)
}

// Response envelopes

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationsResponse {
    #[serde(default)]
    pub applications: Vec<Application>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationResponse {
    #[serde(default)]
    pub application: Option<Application>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricDataResponse {
    #[serde(default)]
    pub metric_data: Option<MetricData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServersResponse {
    #[serde(default)]
    pub servers: Vec<Server>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlertPoliciesResponse {
    #[serde(default)]
    pub policies: Vec<AlertPolicy>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client(server: &MockServer) -> NewRelicClient {
        let base = Url::parse(&format!("{}/", server.uri())).unwrap();
        NewRelicClient::new(NewRelicConfig::new(base).with_api_key("NRAK-test")).unwrap()
    }

    #[tokio::test]
    async fn list_applications_sends_filters_and_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/applications.json"))
            .and(header("X-Api-Key", "NRAK-test"))
            .and(query_param("filter[name]", "checkout"))
            .and(query_param("filter[language]", "python"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "applications": [
                    { "id": 1, "name": "checkout", "language": "python", "reporting": true }
                ]
            })))
            .mount(&server)
            .await;

        let response = client(&server)
            .await
            .list_applications(Some("checkout"), Some("python"))
            .await
            .unwrap();
        assert_eq!(response.applications.len(), 1);
        assert!(response.applications[0].reporting);
    }

    #[tokio::test]
    async fn metrics_repeats_names_param() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/applications/7/metrics/data.json"))
            .and(query_param("from", "2024-01-01T00:00:00Z"))
            .and(query_param("to", "2024-01-01T00:30:00Z"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "metric_data": { "metrics": [] }
            })))
            .mount(&server)
            .await;

        let names = vec!["HttpDispatcher".to_string(), "Apdex".to_string()];
        let response = client(&server)
            .await
            .application_metrics(7, &names, "2024-01-01T00:00:00Z", "2024-01-01T00:30:00Z")
            .await
            .unwrap();
        assert!(response.metric_data.is_some());

        let requests = server.received_requests().await.unwrap();
        let query = requests[0].url.query().unwrap();
        assert!(query.contains("names%5B%5D=HttpDispatcher"));
        assert!(query.contains("names%5B%5D=Apdex"));
    }

    #[tokio::test]
    async fn error_body_title_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/servers.json"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": { "title": "The API key provided is invalid" }
            })))
            .mount(&server)
            .await;

        let err = client(&server).await.list_servers().await.unwrap_err();
        match err {
            NewRelicError::Status { status, title } => {
                assert_eq!(status, 401);
                assert_eq!(title, "The API key provided is invalid");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_falls_back_to_reason() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/servers.json"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let err = client(&server).await.list_servers().await.unwrap_err();
        match err {
            NewRelicError::Status { status, title } => {
                assert_eq!(status, 503);
                assert_eq!(title, "Service Unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let server = MockServer::start().await;
        let base = Url::parse(&format!("{}/", server.uri())).unwrap();
        let client = NewRelicClient::new(NewRelicConfig::new(base)).unwrap();

        let err = client.list_servers().await.unwrap_err();
        assert!(matches!(err, NewRelicError::MissingKey));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
