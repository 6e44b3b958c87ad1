//! CLI `reindex` command — regenerate embeddings missing from either journal.

use anyhow::Result;
use indicatif::ProgressBar;
use std::time::Duration;

use private_journal::config::JournalConfig;

/// Run reconciliation once and report how many embeddings were rebuilt.
pub async fn reindex(config: &JournalConfig) -> Result<()> {
    let journal = crate::server::open_journal(config).await?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Scanning journals for missing embeddings...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let regenerated = journal.regenerate_missing().await;

    spinner.finish_and_clear();
    if regenerated == 0 {
        println!("All entries already have embeddings.");
    } else {
        println!("Regenerated {regenerated} missing embedding(s).");
    }
    Ok(())
}
