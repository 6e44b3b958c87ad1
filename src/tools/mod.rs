pub mod list_recent_entries;
pub mod process_thoughts;
pub mod read_journal_entry;
pub mod search_journal;

use list_recent_entries::ListRecentEntriesParams;
use process_thoughts::ProcessThoughtsParams;
use read_journal_entry::ReadJournalEntryParams;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use search_journal::SearchJournalParams;
use std::path::Path;
use std::sync::Arc;

use private_journal::config::JournalConfig;
use private_journal::journal::recent::RecentOptions;
use private_journal::journal::search::{parse_date_bound, SearchOptions};
use private_journal::journal::types::parse_root_filter;
use private_journal::journal::Journal;

/// The MCP tool handler. Holds the shared journal (roots + embedding model)
/// and config, and exposes all MCP tools via the `#[tool_router]` macro.
#[derive(Clone)]
pub struct JournalTools {
    tool_router: ToolRouter<Self>,
    journal: Journal,
    config: Arc<JournalConfig>,
}

#[tool_router]
impl JournalTools {
    pub fn new(journal: Journal, config: Arc<JournalConfig>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            journal,
            config,
        }
    }

    /// Record private thoughts into the project and/or personal journal.
    #[tool(description = "Your private journal. Write freely: feelings, project notes, user context, technical insights and world knowledge. Project notes go to the project journal; everything else to your personal journal. Entries are searchable later.")]
    async fn process_thoughts(
        &self,
        Parameters(params): Parameters<ProcessThoughtsParams>,
    ) -> Result<String, String> {
        let (sections, metadata) = params.into_parts();
        if sections.is_empty() {
            return Err("at least one section must be provided".into());
        }

        tracing::info!(sections = sections.present().len(), "process_thoughts called");

        // The embedding task is detached; it logs its own failures.
        let receipt = self
            .journal
            .write(&sections, &metadata)
            .await
            .map_err(|e| format!("write failed: {e}"))?;

        serde_json::to_string(&serde_json::json!({
            "status": "saved",
            "entries": receipt.entries,
        }))
        .map_err(|e| format!("serialization failed: {e}"))
    }

    /// Semantic search across journal entries.
    #[tool(description = "Search your journal entries by meaning using natural language. Searches the project and personal journals unless restricted by type.")]
    async fn search_journal(
        &self,
        Parameters(params): Parameters<SearchJournalParams>,
    ) -> Result<String, String> {
        let mut options = SearchOptions::from_config(&self.config.search);
        options.root = parse_root_filter(params.r#type.as_deref())?;
        if let Some(limit) = params.limit {
            options.limit = limit.clamp(1, 100);
        }
        if let Some(min_score) = params.min_score {
            if !(0.0..=1.0).contains(&min_score) {
                return Err("min_score must be between 0.0 and 1.0".into());
            }
            options.min_score = min_score;
        }
        options.sections = params.sections.unwrap_or_default();
        options.since = params
            .since
            .as_deref()
            .map(|s| parse_date_bound(s, false))
            .transpose()?;
        options.until = params
            .until
            .as_deref()
            .map(|s| parse_date_bound(s, true))
            .transpose()?;

        tracing::info!(query = %params.query, root = ?options.root, "search_journal called");

        let results = self
            .journal
            .search(&params.query, &options)
            .await
            .map_err(|e| format!("search failed: {e}"))?;

        serde_json::to_string(&serde_json::json!({
            "results": results,
            "total": results.len(),
        }))
        .map_err(|e| format!("serialization failed: {e}"))
    }

    /// Read the full markdown of one entry.
    #[tool(description = "Read the full content of a journal entry by path (from search_journal or list_recent_entries results).")]
    async fn read_journal_entry(
        &self,
        Parameters(params): Parameters<ReadJournalEntryParams>,
    ) -> Result<String, String> {
        tracing::info!(path = %params.path, "read_journal_entry called");
        self.journal
            .read_entry(Path::new(&params.path))
            .await
            .map_err(|e| e.to_string())
    }

    /// List recent entries, newest first.
    #[tool(description = "List recent journal entries in reverse chronological order.")]
    async fn list_recent_entries(
        &self,
        Parameters(params): Parameters<ListRecentEntriesParams>,
    ) -> Result<String, String> {
        let defaults = RecentOptions::default();
        let options = RecentOptions {
            limit: params.limit.unwrap_or(defaults.limit).clamp(1, 100),
            root: parse_root_filter(params.r#type.as_deref())?,
            days: params.days.unwrap_or(defaults.days),
            excerpt_chars: self.config.search.excerpt_chars,
        };

        tracing::info!(limit = options.limit, days = options.days, "list_recent_entries called");

        let entries = self.journal.list_recent(&options).await;
        serde_json::to_string(&serde_json::json!({
            "entries": entries,
            "total": entries.len(),
        }))
        .map_err(|e| format!("serialization failed: {e}"))
    }
}

#[tool_handler]
impl ServerHandler for JournalTools {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            instructions: Some(
                "A private journal. Use process_thoughts to write, search_journal to find past \
                 entries by meaning, list_recent_entries to browse, and read_journal_entry for \
                 full text."
                    .into(),
            ),
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
