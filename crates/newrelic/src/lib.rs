//! MCP adapter server for the NewRelic REST API (v2).
//!
//! Exposes application monitoring data, metrics, server information, and
//! alert policies as MCP tools. Requires `NEWRELIC_API_KEY` for outbound
//! calls.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod tools;

pub use client::NewRelicClient;
pub use config::NewRelicConfig;
pub use error::{NewRelicError, NewRelicResult};
