//! Startup reconciliation — regenerate embeddings that are missing.
//!
//! Markdown is the source of truth and travels through the external sync;
//! embeddings may not (in synced-vault mode they live in a local cache). This
//! scan finds entries without a discoverable record and rebuilds them.
//! Regeneration is idempotent, so racing a concurrent write is harmless.

use std::path::Path;

use crate::embedding::record::record_exists;
use crate::embedding::text::frontmatter_timestamp;
use crate::embedding::SharedProvider;
use crate::journal::entry::timestamp_from_path;
use crate::journal::index_entry;
use crate::journal::scan::list_root_files;
use crate::journal::types::JournalRoot;
use crate::paths::{JournalPaths, ENTRY_EXTENSION};

/// Scan both roots and regenerate every missing embedding. Returns how many
/// records were written.
pub async fn regenerate_missing(paths: &JournalPaths, embedder: &SharedProvider) -> usize {
    let mut regenerated = 0;
    for root in JournalRoot::ALL {
        let root_dir = paths.root(root).await;
        match regenerate_root(paths, embedder, root, &root_dir).await {
            Ok(count) => regenerated += count,
            Err(e) => tracing::warn!(
                root = %root,
                path = %root_dir.display(),
                error = %e,
                "reconciliation scan failed for root"
            ),
        }
    }

    if regenerated > 0 {
        tracing::info!(regenerated, "regenerated missing embeddings");
    } else {
        tracing::debug!("all journal entries have embeddings");
    }
    regenerated
}

async fn regenerate_root(
    paths: &JournalPaths,
    embedder: &SharedProvider,
    root: JournalRoot,
    root_dir: &Path,
) -> std::io::Result<usize> {
    let mut regenerated = 0;
    for markdown_path in list_root_files(root_dir, ENTRY_EXTENSION).await? {
        let location = paths.embedding_path(&markdown_path, root);
        if record_exists(&location).await {
            continue;
        }

        let markdown = match tokio::fs::read_to_string(&markdown_path).await {
            Ok(markdown) => markdown,
            Err(e) => {
                tracing::warn!(path = %markdown_path.display(), error = %e, "cannot read entry");
                continue;
            }
        };

        let timestamp = timestamp_from_path(&markdown_path)
            .or_else(|| frontmatter_timestamp(&markdown))
            .unwrap_or_else(|| chrono::Utc::now().timestamp_millis());

        match index_entry(paths, embedder, root, &markdown_path, &markdown, timestamp).await {
            Ok(Some(_)) => {
                regenerated += 1;
                tracing::debug!(path = %markdown_path.display(), "embedding regenerated");
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(
                path = %markdown_path.display(),
                error = %e,
                "failed to regenerate embedding"
            ),
        }
    }
    Ok(regenerated)
}
