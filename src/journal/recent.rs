//! Reading entries back: single-entry reads and recent-entry listings.
//!
//! Both work from the markdown alone, so they are unaffected by missing
//! embeddings.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::embedding::text::{extract_searchable_text, frontmatter_timestamp};
use crate::error::JournalError;
use crate::journal::entry::timestamp_from_path;
use crate::journal::scan::list_root_files;
use crate::journal::search::excerpt;
use crate::journal::types::JournalRoot;
use crate::paths::{JournalPaths, ENTRY_EXTENSION};

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone)]
pub struct RecentOptions {
    pub limit: usize,
    pub root: Option<JournalRoot>,
    /// Only entries from the last `days` days.
    pub days: u32,
    pub excerpt_chars: usize,
}

impl Default for RecentOptions {
    fn default() -> Self {
        Self {
            limit: 10,
            root: None,
            days: 30,
            excerpt_chars: 200,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentEntry {
    pub path: String,
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub root: JournalRoot,
    pub sections: Vec<String>,
    pub excerpt: String,
}

/// Read an entry's markdown. Only paths inside one of the journal roots are
/// served.
pub async fn read_entry(paths: &JournalPaths, path: &Path) -> Result<String, JournalError> {
    let inside_journal = !path.components().any(|c| matches!(c, Component::ParentDir))
        && (path.starts_with(paths.project_root()) || path.starts_with(paths.user_root().await));
    if !inside_journal {
        return Err(JournalError::OutsideJournal {
            path: path.to_path_buf(),
        });
    }

    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| JournalError::ReadEntry {
            path: path.to_path_buf(),
            source,
        })
}

/// Entries from the last `days` days, newest first.
pub async fn list_recent(paths: &JournalPaths, options: &RecentOptions) -> Vec<RecentEntry> {
    let cutoff = chrono::Utc::now().timestamp_millis() - i64::from(options.days) * MS_PER_DAY;

    let mut candidates: Vec<(PathBuf, JournalRoot, Option<i64>)> = Vec::new();
    for root in JournalRoot::ALL {
        if options.root.is_some_and(|only| only != root) {
            continue;
        }
        let root_dir = paths.root(root).await;
        match list_root_files(&root_dir, ENTRY_EXTENSION).await {
            Ok(files) => candidates.extend(files.into_iter().map(|path| {
                let timestamp = timestamp_from_path(&path);
                (path, root, timestamp)
            })),
            Err(e) => tracing::warn!(root = %root, error = %e, "cannot list journal root"),
        }
    }

    let mut entries = Vec::new();
    for (path, root, timestamp) in candidates {
        if timestamp.is_some_and(|ts| ts < cutoff) {
            continue;
        }
        let markdown = match tokio::fs::read_to_string(&path).await {
            Ok(markdown) => markdown,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let Some(timestamp) = timestamp.or_else(|| frontmatter_timestamp(&markdown)) else {
            continue;
        };
        if timestamp < cutoff {
            continue;
        }

        let (text, sections) = extract_searchable_text(&markdown);
        entries.push(RecentEntry {
            path: path.to_string_lossy().into_owned(),
            timestamp,
            root,
            sections,
            excerpt: excerpt(&text, "", options.excerpt_chars),
        });
    }

    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    entries.truncate(options.limit);
    entries
}
