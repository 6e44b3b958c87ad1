//! On-disk embedding records (`*.embedding` JSON files).

use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EmbeddingError;

/// Vector plus the text and metadata it was derived from. Always rebuildable
/// from the markdown entry at `path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    pub embedding: Vec<f32>,
    pub text: String,
    pub sections: Vec<String>,
    /// Entry creation time, epoch milliseconds.
    pub timestamp: i64,
    /// Markdown file this record belongs to.
    pub path: String,
}

/// Write `record` to `location`, creating parent directories as needed.
pub async fn save_record(record: &EmbeddingRecord, location: &Path) -> Result<(), EmbeddingError> {
    if let Some(parent) = location.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| EmbeddingError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    let json = serde_json::to_vec_pretty(record).map_err(|source| EmbeddingError::Format {
        path: location.to_path_buf(),
        source,
    })?;

    tokio::fs::write(location, json)
        .await
        .map_err(|source| EmbeddingError::Io {
            path: location.to_path_buf(),
            source,
        })
}

/// Read the record at `location`. A missing file is `Ok(None)`; any other
/// I/O or parse failure is an error.
pub async fn load_record(location: &Path) -> Result<Option<EmbeddingRecord>, EmbeddingError> {
    let bytes = match tokio::fs::read(location).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(EmbeddingError::Io {
                path: location.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| EmbeddingError::Format {
            path: location.to_path_buf(),
            source,
        })
}

/// Whether a record file exists at `location`.
pub async fn record_exists(location: &Path) -> bool {
    tokio::fs::try_exists(location).await.unwrap_or(false)
}
