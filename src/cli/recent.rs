use anyhow::Result;
use chrono::{Local, TimeZone};

use private_journal::config::JournalConfig;
use private_journal::journal::recent::{list_recent, RecentOptions};
use private_journal::journal::types::parse_root_filter;
use private_journal::paths::{JournalEnv, JournalPaths};

/// Print the most recent entries, newest first. Reads markdown only, so the
/// embedding model is not loaded.
pub async fn recent(config: &JournalConfig, limit: usize, days: u32, root: Option<&str>) -> Result<()> {
    let paths = JournalPaths::new(JournalEnv::from_env(), &config.resolved_project_dir()?);

    let options = RecentOptions {
        limit,
        root: parse_root_filter(root).map_err(anyhow::Error::msg)?,
        days,
        excerpt_chars: 120,
    };

    let entries = list_recent(&paths, &options).await;
    if entries.is_empty() {
        println!("No entries in the last {days} day(s).");
        return Ok(());
    }

    for entry in &entries {
        let when = Local
            .timestamp_millis_opt(entry.timestamp)
            .single()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| entry.timestamp.to_string());
        println!("  {when}  [{}] {}", entry.root, entry.path);
        println!("     {}", entry.excerpt.replace('\n', " "));
        println!();
    }

    Ok(())
}
