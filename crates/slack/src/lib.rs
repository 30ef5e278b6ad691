//! MCP adapter server for the Slack Web API.
//!
//! Exposes message sending, channel listing, history, user lookup, and
//! message search as MCP tools. Requires `SLACK_BOT_TOKEN` (a Bot User
//! OAuth token, `xoxb-...`) for outbound calls.

pub mod client;
pub mod config;
pub mod error;
pub mod tools;

pub use client::SlackClient;
pub use config::SlackConfig;
pub use error::{SlackError, SlackResult};
