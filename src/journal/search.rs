use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::Serialize;

use crate::config::SearchConfig;
use crate::embedding::record::{load_record, EmbeddingRecord};
use crate::embedding::{cosine_similarity, embed_text, SharedProvider};
use crate::error::EmbeddingError;
use crate::journal::scan::{list_files, list_root_files};
use crate::journal::types::JournalRoot;
use crate::paths::{split_flattened_name, JournalPaths, EMBEDDING_EXTENSION, ENTRY_EXTENSION};

// ── Public types ──────────────────────────────────────────────────────────────

/// Filters and knobs for one search.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub limit: usize,
    pub min_score: f32,
    /// Restrict to one root; `None` searches both.
    pub root: Option<JournalRoot>,
    /// Keep records carrying at least one of these sections (case-insensitive,
    /// `project_notes` / `project-notes` / `Project Notes` all match).
    pub sections: Vec<String>,
    /// Inclusive epoch-ms bounds on the entry timestamp.
    pub since: Option<i64>,
    pub until: Option<i64>,
    pub excerpt_chars: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

impl SearchOptions {
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            limit: config.default_limit,
            min_score: config.min_score,
            root: None,
            sections: Vec::new(),
            since: None,
            until: None,
            excerpt_chars: config.excerpt_chars,
        }
    }
}

/// One ranked hit.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub path: String,
    pub score: f32,
    pub text: String,
    pub excerpt: String,
    pub sections: Vec<String>,
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub root: JournalRoot,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Embed `query` once, score every reachable record in the selected roots,
/// filter, and rank by score then recency. Re-scans from scratch every call.
pub async fn search(
    paths: &JournalPaths,
    embedder: &SharedProvider,
    query: &str,
    options: &SearchOptions,
) -> Result<Vec<SearchResult>, EmbeddingError> {
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }
    let query_embedding = embed_text(embedder, query).await?;

    let mut results = Vec::new();
    for root in JournalRoot::ALL {
        if options.root.is_some_and(|only| only != root) {
            continue;
        }
        for (path, record) in load_root_records(paths, root).await {
            if !matches_filters(&record, options) {
                continue;
            }
            let score = cosine_similarity(&query_embedding, &record.embedding);
            if score < options.min_score {
                continue;
            }
            results.push(SearchResult {
                path: path.to_string_lossy().into_owned(),
                score,
                excerpt: excerpt(&record.text, query, options.excerpt_chars),
                text: record.text,
                sections: record.sections,
                timestamp: record.timestamp,
                root,
            });
        }
    }

    // stable: equal score and timestamp keep discovery order
    results.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.timestamp.cmp(&a.timestamp))
    });
    results.truncate(options.limit);

    tracing::debug!(query_len = query.len(), hits = results.len(), "journal search");
    Ok(results)
}

/// Shorten `text` to at most `max_chars` characters around the first query
/// word it contains, marking cut ends with `...`.
pub fn excerpt(text: &str, query: &str, max_chars: usize) -> String {
    let total = text.chars().count();
    if total <= max_chars {
        return text.to_string();
    }

    let lower = text.to_lowercase();
    let hit = if lower.len() == text.len() {
        query
            .split_whitespace()
            .filter(|word| word.chars().count() > 2)
            .filter_map(|word| lower.find(&word.to_lowercase()))
            .min()
    } else {
        None
    };
    let center = hit
        .and_then(|pos| text.get(..pos))
        .map(|before| before.chars().count())
        .unwrap_or(0);

    let start = center.saturating_sub(max_chars / 2).min(total - max_chars);
    let window: String = text.chars().skip(start).take(max_chars).collect();

    let mut out = String::new();
    if start > 0 {
        out.push_str("...");
    }
    out.push_str(window.trim());
    if start + max_chars < total {
        out.push_str("...");
    }
    out
}

/// Parse a `since`/`until` bound into epoch milliseconds.
///
/// Accepts RFC 3339 (`2025-12-22T09:00:00Z`) or a bare local date
/// (`2025-12-22`). A bare date means the start of that day, or its last
/// millisecond when `end_of_day` is set, so date-only ranges are inclusive.
pub fn parse_date_bound(value: &str, end_of_day: bool) -> Result<i64, String> {
    let value = value.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(at.timestamp_millis());
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{value}': expected YYYY-MM-DD or RFC 3339"))?;
    let day = (if end_of_day { date.succ_opt() } else { Some(date) })
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .and_then(|midnight| Local.from_local_datetime(&midnight).earliest())
        .ok_or_else(|| format!("date '{value}' is out of range"))?;

    let millis = day.timestamp_millis();
    Ok(if end_of_day { millis - 1 } else { millis })
}

// ── Internals ─────────────────────────────────────────────────────────────────

/// Every loadable record for `root`, paired with its markdown path.
/// Unreadable roots and records are logged and skipped.
async fn load_root_records(paths: &JournalPaths, root: JournalRoot) -> Vec<(PathBuf, EmbeddingRecord)> {
    let root_dir = paths.root(root).await;
    let from_cache = root == JournalRoot::User && paths.user_embeddings_in_cache();

    let locations = if from_cache {
        list_files(&paths.embedding_cache_dir(), EMBEDDING_EXTENSION).await
    } else {
        list_root_files(&root_dir, EMBEDDING_EXTENSION).await
    };
    let locations = match locations {
        Ok(locations) => locations,
        Err(e) => {
            tracing::warn!(root = %root, error = %e, "cannot scan embeddings for root");
            return Vec::new();
        }
    };

    let mut records = Vec::with_capacity(locations.len());
    for location in locations {
        let record = match load_record(&location).await {
            Ok(Some(record)) => record,
            Ok(None) => continue,
            Err(e) => {
                tracing::debug!(path = %location.display(), error = %e, "skipping unreadable embedding");
                continue;
            }
        };

        let markdown_path = if from_cache {
            // cache records may come from another machine's vault mount
            let Some(path) = cached_entry_path(&root_dir, &location) else {
                continue;
            };
            if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
                tracing::debug!(
                    embedding = %location.display(),
                    entry = %path.display(),
                    "cached embedding has no entry under the current user root"
                );
            }
            path
        } else {
            PathBuf::from(&record.path)
        };
        records.push((markdown_path, record));
    }
    records
}

/// `<cache>/<date>--<time>.embedding` → `<user-root>/<date>/<time>.md`.
fn cached_entry_path(user_root: &Path, location: &Path) -> Option<PathBuf> {
    let name = location.file_name()?.to_str()?;
    let (date, time) = split_flattened_name(name)?;
    Some(user_root.join(date).join(format!("{time}.{ENTRY_EXTENSION}")))
}

fn matches_filters(record: &EmbeddingRecord, options: &SearchOptions) -> bool {
    if options.since.is_some_and(|since| record.timestamp < since) {
        return false;
    }
    if options.until.is_some_and(|until| record.timestamp > until) {
        return false;
    }
    if options.sections.is_empty() {
        return true;
    }
    record.sections.iter().any(|have| {
        let have = normalize_section(have);
        options
            .sections
            .iter()
            .any(|want| normalize_section(want) == have)
    })
}

fn normalize_section(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(['_', '-'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_bounds_cover_whole_days() {
        let start = parse_date_bound("2025-12-22", false).unwrap();
        let end = parse_date_bound("2025-12-22", true).unwrap();
        let midnight = Local
            .with_ymd_and_hms(2025, 12, 22, 0, 0, 0)
            .earliest()
            .unwrap()
            .timestamp_millis();
        assert_eq!(start, midnight);
        assert_eq!(end, parse_date_bound("2025-12-23", false).unwrap() - 1);
    }

    #[test]
    fn date_bounds_accept_rfc3339() {
        assert_eq!(parse_date_bound("1970-01-01T00:00:01Z", false), Ok(1000));
        assert_eq!(parse_date_bound(" 1970-01-01T00:00:01+00:00 ", true), Ok(1000));
    }

    #[test]
    fn date_bounds_reject_garbage() {
        assert!(parse_date_bound("last tuesday", false).is_err());
        assert!(parse_date_bound("2025-13-01", false).is_err());
    }

    fn record(sections: &[&str], timestamp: i64) -> EmbeddingRecord {
        EmbeddingRecord {
            embedding: vec![1.0],
            text: String::new(),
            sections: sections.iter().map(|s| s.to_string()).collect(),
            timestamp,
            path: String::new(),
        }
    }

    #[test]
    fn section_filter_accepts_slug_or_title() {
        let rec = record(&["Project Notes", "Feelings"], 10);
        let mut options = SearchOptions::default();
        options.sections = vec!["project_notes".into()];
        assert!(matches_filters(&rec, &options));
        options.sections = vec!["technical-insights".into()];
        assert!(!matches_filters(&rec, &options));
    }

    #[test]
    fn date_range_is_inclusive() {
        let rec = record(&[], 100);
        let mut options = SearchOptions::default();
        options.since = Some(100);
        options.until = Some(100);
        assert!(matches_filters(&rec, &options));
        options.since = Some(101);
        assert!(!matches_filters(&rec, &options));
        options.since = None;
        options.until = Some(99);
        assert!(!matches_filters(&rec, &options));
    }

    #[test]
    fn cache_names_map_back_to_user_root() {
        let path = cached_entry_path(
            Path::new("/vault/agentic-journal"),
            Path::new("/home/me/.cache/private-journal/embeddings/2025-12-22--14-30-45-123456.embedding"),
        );
        assert_eq!(
            path,
            Some(PathBuf::from("/vault/agentic-journal/2025-12-22/14-30-45-123456.md"))
        );
        assert_eq!(cached_entry_path(Path::new("/v"), Path::new("/c/stray.embedding")), None);
    }

    #[test]
    fn short_text_is_its_own_excerpt() {
        assert_eq!(excerpt("short entry", "entry", 200), "short entry");
    }

    #[test]
    fn excerpt_centres_on_query_word() {
        let text = format!("{} borrow checker {}", "a".repeat(300), "b".repeat(300));
        let out = excerpt(&text, "the borrow checker", 40);
        assert!(out.starts_with("..."));
        assert!(out.ends_with("..."));
        assert!(out.contains("borrow"));
        assert!(out.chars().count() <= 46);
    }

    #[test]
    fn excerpt_without_hit_starts_at_beginning() {
        let text = "x".repeat(500);
        let out = excerpt(&text, "nothing", 100);
        assert!(!out.starts_with("..."));
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 103);
    }
}
