//! MCP tools over the Slack Web API.

pub mod channels;
pub mod chat;
pub mod search;
pub mod users;

pub use channels::{ChannelHistoryTool, ListChannelsTool};
pub use chat::SendMessageTool;
pub use search::SearchMessagesTool;
pub use users::UserInfoTool;

use chrono::{DateTime, Utc};

/// Render a Slack `ts` value ("1700000000.000100") as a human-readable
/// UTC timestamp. Falls back to the raw value if it does not parse.
pub(crate) fn format_ts(ts: &str) -> String {
    ts.parse::<f64>()
        .ok()
        .and_then(|seconds| DateTime::<Utc>::from_timestamp(seconds as i64, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| ts.to_string())
}
