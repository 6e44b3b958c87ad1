use anyhow::{Context, Result};

use private_journal::config::JournalConfig;
use private_journal::journal::search::{parse_date_bound, SearchOptions};
use private_journal::journal::types::parse_root_filter;

/// Optional `--since` / `--until` bounds as given on the command line.
#[derive(Debug, Default, Clone, Copy)]
pub struct DateRange<'a> {
    pub since: Option<&'a str>,
    pub until: Option<&'a str>,
}

/// Run a semantic search from the terminal.
pub async fn search(
    config: &JournalConfig,
    query: &str,
    root: Option<&str>,
    limit: Option<usize>,
    range: DateRange<'_>,
) -> Result<()> {
    let mut options = SearchOptions::from_config(&config.search);
    options.root = parse_root_filter(root).map_err(anyhow::Error::msg)?;
    if let Some(limit) = limit {
        options.limit = limit;
    }
    options.since = range
        .since
        .map(|s| parse_date_bound(s, false))
        .transpose()
        .map_err(anyhow::Error::msg)?;
    options.until = range
        .until
        .map(|s| parse_date_bound(s, true))
        .transpose()
        .map_err(anyhow::Error::msg)?;

    let journal = crate::server::open_journal(config).await?;

    let results = journal
        .search(query, &options)
        .await
        .context("search failed")?;

    if results.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    println!("Found {} result(s)\n", results.len());
    for (i, result) in results.iter().enumerate() {
        println!(
            "  {}. [{}] {} (score: {:.4})",
            i + 1,
            result.root,
            result.path,
            result.score,
        );
        if !result.sections.is_empty() {
            println!("     sections: {}", result.sections.join(", "));
        }
        println!("     {}", result.excerpt.replace('\n', " "));
        println!();
    }

    Ok(())
}
