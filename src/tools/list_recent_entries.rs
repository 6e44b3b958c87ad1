//! MCP `list_recent_entries` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `list_recent_entries` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListRecentEntriesParams {
    #[schemars(description = "Maximum number of entries (default 10)")]
    pub limit: Option<usize>,

    #[schemars(description = "Which journal to list: 'project', 'user' or 'both' (default both)")]
    pub r#type: Option<String>,

    #[schemars(description = "Only entries from the last N days (default 30)")]
    pub days: Option<u32>,
}
