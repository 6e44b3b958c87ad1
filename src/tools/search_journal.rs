//! MCP `search_journal` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `search_journal` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchJournalParams {
    /// Natural language query.
    #[schemars(description = "Natural language query, e.g. 'times I felt stuck on async Rust'")]
    pub query: String,

    #[schemars(description = "Maximum number of results (default 10)")]
    pub limit: Option<usize>,

    #[schemars(description = "Which journal to search: 'project', 'user' or 'both' (default both)")]
    pub r#type: Option<String>,

    #[schemars(description = "Only entries containing one of these sections, e.g. ['feelings', 'technical_insights']")]
    pub sections: Option<Vec<String>>,

    #[schemars(description = "Minimum similarity score between 0 and 1 (default 0.1)")]
    pub min_score: Option<f32>,

    #[schemars(description = "Only entries on or after this date: YYYY-MM-DD or RFC 3339")]
    pub since: Option<String>,

    #[schemars(description = "Only entries on or before this date: YYYY-MM-DD (inclusive) or RFC 3339")]
    pub until: Option<String>,
}
