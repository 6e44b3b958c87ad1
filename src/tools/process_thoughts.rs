//! MCP `process_thoughts` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use private_journal::journal::types::{EntryMetadata, Sections};

/// Parameters for the `process_thoughts` MCP tool. At least one section must
/// be non-empty.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ProcessThoughtsParams {
    #[schemars(description = "Private space for honest feelings, frustrations and reactions. Saved to the personal journal.")]
    pub feelings: Option<String>,

    #[schemars(description = "Notes about the current codebase: architecture, decisions, gotchas. Saved to the project journal.")]
    pub project_notes: Option<String>,

    #[schemars(description = "What you have learned about the user: preferences, working style, communication. Saved to the personal journal.")]
    pub user_context: Option<String>,

    #[schemars(description = "General software engineering learnings that apply beyond this project. Saved to the personal journal.")]
    pub technical_insights: Option<String>,

    #[schemars(description = "Things learned about the world outside software. Saved to the personal journal.")]
    pub world_knowledge: Option<String>,

    #[schemars(description = "Optional project name recorded in the entry metadata")]
    pub project: Option<String>,

    #[schemars(description = "Optional agent name recorded in the entry metadata")]
    pub agent: Option<String>,
}

impl ProcessThoughtsParams {
    pub fn into_parts(self) -> (Sections, EntryMetadata) {
        (
            Sections {
                feelings: self.feelings,
                project_notes: self.project_notes,
                user_context: self.user_context,
                technical_insights: self.technical_insights,
                world_knowledge: self.world_knowledge,
            },
            EntryMetadata {
                project: self.project,
                agent: self.agent,
            },
        )
    }
}
