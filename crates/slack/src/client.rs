//! Thin client over the Slack Web API.
//!
//! Every response carries the `ok`/`error` envelope; `ok: false` is mapped
//! to [`SlackError::Api`] with the vendor error code verbatim.

use crate::config::SlackConfig;
use crate::error::{SlackError, SlackResult};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;
use url::Url;

#[derive(Debug)]
pub struct SlackClient {
    http: reqwest::Client,
    config: SlackConfig,
}

impl SlackClient {
    pub fn new(config: SlackConfig) -> SlackResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    pub fn has_token(&self) -> bool {
        self.config.token.is_some()
    }

    fn token(&self) -> SlackResult<&str> {
        self.config.token.as_deref().ok_or(SlackError::MissingToken)
    }

    fn endpoint(&self, method: &str) -> SlackResult<Url> {
        Ok(self.config.base_url.join(method)?)
    }

    /// Send a message to a channel, optionally as a thread reply.
    pub async fn post_message(
        &self,
        channel: &str,
        text: &str,
        thread_ts: Option<&str>,
    ) -> SlackResult<PostMessageResponse> {
        #[derive(Serialize)]
        struct Body<'a> {
            channel: &'a str,
            text: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            thread_ts: Option<&'a str>,
        }

        self.post_json(
            "chat.postMessage",
            &Body {
                channel,
                text,
                thread_ts,
            },
        )
        .await
    }

    /// List channels of the given comma-separated types, excluding archived.
    pub async fn list_channels(&self, types: &str) -> SlackResult<ChannelListResponse> {
        self.get(
            "conversations.list",
            &[
                ("types", types.to_string()),
                ("exclude_archived", "true".to_string()),
            ],
        )
        .await
    }

    /// Fetch message history for a channel, newest first.
    pub async fn channel_history(
        &self,
        channel: &str,
        limit: u32,
        oldest: Option<&str>,
    ) -> SlackResult<HistoryResponse> {
        let mut query = vec![
            ("channel", channel.to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(oldest) = oldest {
            query.push(("oldest", oldest.to_string()));
        }
        self.get("conversations.history", &query).await
    }

    /// Look up a user by id.
    pub async fn user_info(&self, user_id: &str) -> SlackResult<UserInfoResponse> {
        self.get("users.info", &[("user", user_id.to_string())])
            .await
    }

    /// Search messages across the workspace.
    pub async fn search_messages(&self, query: &str, count: u32) -> SlackResult<SearchResponse> {
        self.get(
            "search.messages",
            &[("query", query.to_string()), ("count", count.to_string())],
        )
        .await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        method: &str,
        query: &[(&str, String)],
    ) -> SlackResult<T> {
        let token = self.token()?;
        let url = self.endpoint(method)?;
        debug!(%url, "GET");

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;
        self.decode(method, response).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &str,
        body: &B,
    ) -> SlackResult<T> {
        let token = self.token()?;
        let url = self.endpoint(method)?;
        debug!(%url, "POST");

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        self.decode(method, response).await
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        method: &str,
        response: reqwest::Response,
    ) -> SlackResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(SlackError::Status {
                method: method.to_string(),
                status: status.as_u16(),
            });
        }

        let value: serde_json::Value = response.json().await?;
        let ok = value.get("ok").and_then(serde_json::Value::as_bool);
        if ok != Some(true) {
            let code = value
                .get("error")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown_error")
                .to_string();
            return Err(SlackError::Api {
                method: method.to_string(),
                code,
            });
        }

        Ok(serde_json::from_value(value)?)
    }
}

// Response payloads. Vendor-optional fields default so partial objects
// (bot messages, stub profiles) still deserialize.

#[derive(Debug, Clone, Deserialize)]
pub struct PostMessageResponse {
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub ts: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub channels: Vec<Channel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub is_member: bool,
    #[serde(default)]
    pub topic: Option<ChannelNote>,
    #[serde(default)]
    pub purpose: Option<ChannelNote>,
}

/// Topic/purpose wrapper object.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelNote {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub ts: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub bot_id: Option<String>,
    #[serde(default)]
    pub files: Vec<FileInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileInfo {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserInfoResponse {
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile: UserProfile,
    #[serde(default)]
    pub tz: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub deleted: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub messages: SearchResults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub matches: Vec<SearchMatch>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchMatch {
    pub ts: String,
    #[serde(default)]
    pub channel: Option<ChannelRef>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelRef {
    #[serde(default)]
    pub name: String,
}
