//! Private journal for AI agents — dual-root markdown entries with local semantic search.
//!
//! Entries are plain markdown files in one of two roots:
//!
//! | Root | Location | Receives |
//! |------|----------|----------|
//! | **Project** | `<project>/.private-journal` | project notes |
//! | **User** | `~/.private-journal`, or `<vault>/agentic-journal` | feelings, user context, technical insights, world knowledge |
//!
//! Each entry gets a derived `.embedding` record used for similarity search. When
//! the user journal lives inside a synced Obsidian vault, its records are kept in
//! a local cache instead, keyed by `<date>--<time>` so they survive the vault
//! moving between machines. Missing records are rebuilt by reconciliation.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`paths`] — Root resolution and the embedding location policy
//! - [`vault`] — Obsidian vault registry discovery
//! - [`embedding`] — Text-to-vector pipeline, record storage, similarity
//! - [`journal`] — Writing, reconciliation, search and listing

pub mod config;
pub mod embedding;
pub mod error;
pub mod journal;
pub mod paths;
pub mod vault;
