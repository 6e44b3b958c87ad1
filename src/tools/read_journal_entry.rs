use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ReadJournalEntryParams {
    #[schemars(description = "Path of the entry, as returned by search_journal or list_recent_entries")]
    pub path: String,
}
