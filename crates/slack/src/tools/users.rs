//! User lookup.

use crate::client::{SlackClient, User};
use anyhow::{Context, Result};
use opsgate_mcp::protocol::{CallToolResult, ToolSchema};
use opsgate_mcp::registry::{json_schema_object, json_schema_string, Tool};
use serde::Deserialize;
use std::sync::Arc;

/// Look up a Slack user by id.
pub struct UserInfoTool {
    client: Arc<SlackClient>,
}

impl UserInfoTool {
    pub fn new(client: Arc<SlackClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct UserInfoArgs {
    user_id: String,
}

#[async_trait::async_trait]
impl Tool for UserInfoTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_user_info".to_string(),
            description: "Get information about a Slack user".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "user_id": json_schema_string("Slack user ID (e.g., \"U1234567890\")")
                }),
                vec!["user_id"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: UserInfoArgs =
            serde_json::from_value(arguments).context("Invalid arguments for get_user_info")?;

        match self.client.user_info(&args.user_id).await {
            Ok(response) => Ok(CallToolResult::text(format_user(&response.user))),
            Err(err) => Ok(CallToolResult::error(err.to_string())),
        }
    }
}

fn format_user(user: &User) -> String {
    fn or_na(value: &Option<String>) -> &str {
        value.as_deref().unwrap_or("N/A")
    }

    [
        format!("User ID: {}", user.id),
        format!("Name: {}", or_na(&user.name)),
        format!("Real Name: {}", or_na(&user.profile.real_name)),
        format!("Display Name: {}", or_na(&user.profile.display_name)),
        format!("Email: {}", or_na(&user.profile.email)),
        format!("Title: {}", or_na(&user.profile.title)),
        format!("Status: {}", or_na(&user.profile.status_text)),
        format!("Timezone: {}", or_na(&user.tz)),
        format!("Is Admin: {}", user.is_admin),
        format!("Is Bot: {}", user.is_bot),
        format!("Is Deleted: {}", user.deleted),
    ]
    .join("\n")
}
