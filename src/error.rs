//! Typed errors for the journal core.
//!
//! Write-path failures ([`JournalError`]) and embedding-pipeline failures
//! ([`EmbeddingError`]) are deliberately separate types: a write succeeds or
//! fails on markdown persistence alone, while embedding failures are logged and
//! repaired later by reconciliation.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to durably record (or read back) a journal entry.
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("failed to create journal directory {}: {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write journal entry {}: {source}", path.display())]
    WriteEntry {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read journal entry {}: {source}", path.display())]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not inside a journal root", path.display())]
    OutsideJournal { path: PathBuf },
}

/// Failure anywhere in the text → vector → record pipeline.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("refusing to embed empty text")]
    EmptyText,

    #[error("embedding model failed: {0}")]
    Model(#[source] anyhow::Error),

    #[error("embedding task panicked or was cancelled: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("embedding record I/O failed at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed embedding record at {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
