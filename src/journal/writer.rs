//! Write path — compose, persist markdown, then embed in the background.
//!
//! [`JournalWriter::write`] returns as soon as every markdown file is on disk.
//! Embedding generation runs as a separate task whose handle is returned in the
//! [`WriteReceipt`]; its failures are logged and never undo the write.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Local};
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::embedding::SharedProvider;
use crate::error::JournalError;
use crate::journal::entry::{compose_entry, entry_path, random_disambiguator};
use crate::journal::index_entry;
use crate::journal::types::{EntryMetadata, JournalRoot, Sections};
use crate::paths::JournalPaths;

/// One markdown file produced by a write.
#[derive(Debug, Clone, Serialize)]
pub struct WrittenEntry {
    pub root: JournalRoot,
    pub path: PathBuf,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

/// Outcome of the background embedding task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EmbeddingReport {
    pub generated: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Result of a write: the durable entries, plus the embedding task.
#[derive(Debug)]
pub struct WriteReceipt {
    pub entries: Vec<WrittenEntry>,
    /// `None` when nothing was written. Await it, or drop it to detach.
    pub embeddings: Option<JoinHandle<EmbeddingReport>>,
}

/// Writes entries into the project and user roots.
#[derive(Clone)]
pub struct JournalWriter {
    paths: Arc<JournalPaths>,
    embedder: SharedProvider,
}

impl JournalWriter {
    pub fn new(paths: Arc<JournalPaths>, embedder: SharedProvider) -> Self {
        Self { paths, embedder }
    }

    pub fn paths(&self) -> &Arc<JournalPaths> {
        &self.paths
    }

    /// Write one entry per root that has non-empty sections (zero, one or two files).
    pub async fn write(
        &self,
        sections: &Sections,
        metadata: &EntryMetadata,
    ) -> Result<WriteReceipt, JournalError> {
        self.write_at(sections, metadata, Local::now()).await
    }

    pub(crate) async fn write_at(
        &self,
        sections: &Sections,
        metadata: &EntryMetadata,
        created: DateTime<Local>,
    ) -> Result<WriteReceipt, JournalError> {
        let mut written = Vec::new();

        if let Err(e) = self.write_entries(sections, metadata, &created, &mut written).await {
            // files already on disk still get their embeddings
            if !written.is_empty() {
                tracing::warn!(
                    written = written.len(),
                    error = %e,
                    "journal write failed part way; embedding the entries already saved"
                );
                drop(self.spawn_embeddings(written));
            }
            return Err(e);
        }

        if written.is_empty() {
            return Ok(WriteReceipt {
                entries: Vec::new(),
                embeddings: None,
            });
        }

        let entries = written.iter().map(|(entry, _)| entry.clone()).collect();
        Ok(WriteReceipt {
            entries,
            embeddings: Some(self.spawn_embeddings(written)),
        })
    }

    /// Persist one markdown file per root with content, appending each to
    /// `written` as soon as it is on disk.
    async fn write_entries(
        &self,
        sections: &Sections,
        metadata: &EntryMetadata,
        created: &DateTime<Local>,
        written: &mut Vec<(WrittenEntry, String)>,
    ) -> Result<(), JournalError> {
        for root in JournalRoot::ALL {
            let parts = sections.for_root(root);
            if parts.is_empty() {
                continue;
            }

            let root_dir = self.paths.root(root).await;
            let path = entry_path(&root_dir, created, random_disambiguator());
            let content = compose_entry(&parts, metadata, created);

            if let Some(day_dir) = path.parent() {
                tokio::fs::create_dir_all(day_dir)
                    .await
                    .map_err(|source| JournalError::CreateDirectory {
                        path: day_dir.to_path_buf(),
                        source,
                    })?;
            }
            tokio::fs::write(&path, &content)
                .await
                .map_err(|source| JournalError::WriteEntry {
                    path: path.clone(),
                    source,
                })?;

            tracing::info!(
                root = %root,
                path = %path.display(),
                sections = parts.len(),
                "journal entry written"
            );

            written.push((
                WrittenEntry {
                    root,
                    path,
                    timestamp: created.timestamp_millis(),
                },
                content,
            ));
        }
        Ok(())
    }

    fn spawn_embeddings(&self, written: Vec<(WrittenEntry, String)>) -> JoinHandle<EmbeddingReport> {
        tokio::spawn(embed_written(
            Arc::clone(&self.paths),
            Arc::clone(&self.embedder),
            written,
        ))
    }
}

async fn embed_written(
    paths: Arc<JournalPaths>,
    embedder: SharedProvider,
    written: Vec<(WrittenEntry, String)>,
) -> EmbeddingReport {
    let mut report = EmbeddingReport::default();
    for (entry, content) in written {
        match index_entry(&paths, &embedder, entry.root, &entry.path, &content, entry.timestamp).await {
            Ok(Some(_)) => report.generated += 1,
            Ok(None) => report.skipped += 1,
            Err(e) => {
                report.failed += 1;
                tracing::warn!(
                    path = %entry.path.display(),
                    error = %e,
                    "embedding generation failed; entry kept, reconciliation will retry"
                );
            }
        }
    }
    report
}
