//! Dual-root journal: writing, reconciliation, search and listing.
//!
//! [`Journal`] bundles the resolved [`JournalPaths`] with the shared embedding
//! provider and is what the MCP tools and CLI commands talk to.

pub mod entry;
pub mod reconcile;
pub mod recent;
pub mod scan;
pub mod search;
pub mod types;
pub mod writer;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::embedding::record::{save_record, EmbeddingRecord};
use crate::embedding::text::extract_searchable_text;
use crate::embedding::{embed_text, SharedProvider};
use crate::error::{EmbeddingError, JournalError};
use crate::paths::JournalPaths;

use recent::{RecentEntry, RecentOptions};
use search::{SearchOptions, SearchResult};
use types::{EntryMetadata, Sections};
use writer::{JournalWriter, WriteReceipt};

/// Embed one entry and persist its record at the location for `root`.
///
/// Returns the record location, or `None` when the entry has no searchable
/// text and was skipped.
pub(crate) async fn index_entry(
    paths: &JournalPaths,
    embedder: &SharedProvider,
    root: types::JournalRoot,
    markdown_path: &Path,
    markdown: &str,
    timestamp: i64,
) -> Result<Option<PathBuf>, EmbeddingError> {
    let (text, sections) = extract_searchable_text(markdown);
    if text.trim().is_empty() {
        tracing::debug!(path = %markdown_path.display(), "no searchable text, skipping embedding");
        return Ok(None);
    }

    let embedding = embed_text(embedder, &text).await?;
    let record = EmbeddingRecord {
        embedding,
        text,
        sections,
        timestamp,
        path: markdown_path.to_string_lossy().into_owned(),
    };

    let location = paths.embedding_path(markdown_path, root);
    save_record(&record, &location).await?;
    Ok(Some(location))
}

/// Facade over the journal operations, sharing one path resolution and one model.
#[derive(Clone)]
pub struct Journal {
    writer: JournalWriter,
    paths: Arc<JournalPaths>,
    embedder: SharedProvider,
}

impl Journal {
    pub fn new(paths: JournalPaths, embedder: SharedProvider) -> Self {
        let paths = Arc::new(paths);
        Self {
            writer: JournalWriter::new(Arc::clone(&paths), Arc::clone(&embedder)),
            paths,
            embedder,
        }
    }

    pub fn paths(&self) -> &JournalPaths {
        &self.paths
    }

    pub async fn write(
        &self,
        sections: &Sections,
        metadata: &EntryMetadata,
    ) -> Result<WriteReceipt, JournalError> {
        self.writer.write(sections, metadata).await
    }

    pub async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>, EmbeddingError> {
        search::search(&self.paths, &self.embedder, query, options).await
    }

    pub async fn regenerate_missing(&self) -> usize {
        reconcile::regenerate_missing(&self.paths, &self.embedder).await
    }

    pub async fn read_entry(&self, path: &Path) -> Result<String, JournalError> {
        recent::read_entry(&self.paths, path).await
    }

    pub async fn list_recent(&self, options: &RecentOptions) -> Vec<RecentEntry> {
        recent::list_recent(&self.paths, options).await
    }
}
