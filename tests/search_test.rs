mod helpers;

use helpers::{hashing, write_raw_entry, Sandbox};
use private_journal::journal::search::{parse_date_bound, SearchOptions};
use private_journal::journal::types::{EntryMetadata, JournalRoot, Sections};
use private_journal::journal::Journal;

async fn write_and_wait(journal: &Journal, sections: Sections) {
    let receipt = journal.write(&sections, &EntryMetadata::default()).await.unwrap();
    receipt.embeddings.unwrap().await.unwrap();
}

fn everything() -> SearchOptions {
    SearchOptions {
        min_score: -1.0,
        limit: 100,
        ..SearchOptions::default()
    }
}

#[tokio::test]
async fn related_entry_ranks_first() {
    let sandbox = Sandbox::new();
    let journal = sandbox.journal(sandbox.env(), hashing());
    write_and_wait(
        &journal,
        Sections {
            technical_insights: Some("The borrow checker rejected my parser lifetimes again".into()),
            ..Sections::default()
        },
    )
    .await;
    write_and_wait(
        &journal,
        Sections {
            world_knowledge: Some("Sourdough starter needs feeding twice a day".into()),
            ..Sections::default()
        },
    )
    .await;

    let results = journal.search("borrow checker parser", &everything()).await.unwrap();
    assert_eq!(results.len(), 2);
    assert!(results[0].text.contains("borrow checker"));
    assert!(results[0].score > results[1].score);
    assert_eq!(results[0].root, JournalRoot::User);
    assert_eq!(results[0].sections, vec!["Technical Insights"]);
}

#[tokio::test]
async fn root_filter_limits_search() {
    let sandbox = Sandbox::new();
    let journal = sandbox.journal(sandbox.env(), hashing());
    write_and_wait(
        &journal,
        Sections {
            feelings: Some("Deploy day jitters".into()),
            project_notes: Some("Deploy script lives in ops folder".into()),
            ..Sections::default()
        },
    )
    .await;

    let mut options = everything();
    options.root = Some(JournalRoot::Project);
    let results = journal.search("deploy", &options).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].root, JournalRoot::Project);
    assert!(results[0].path.starts_with(&*sandbox.project_root().to_string_lossy()));

    options.root = None;
    assert_eq!(journal.search("deploy", &options).await.unwrap().len(), 2);
}

#[tokio::test]
async fn blank_query_returns_nothing() {
    let sandbox = Sandbox::new();
    let journal = sandbox.journal(sandbox.env(), hashing());
    write_and_wait(
        &journal,
        Sections {
            feelings: Some("Calm".into()),
            ..Sections::default()
        },
    )
    .await;
    assert!(journal.search("   ", &everything()).await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_journal_returns_nothing() {
    let sandbox = Sandbox::new();
    let journal = sandbox.journal(sandbox.env(), hashing());
    assert!(journal.search("anything", &everything()).await.unwrap().is_empty());
}

#[tokio::test]
async fn corrupt_record_is_skipped() {
    let sandbox = Sandbox::new();
    let user = sandbox.default_user_root();
    write_raw_entry(&user, "2025-12-20", "10-00-00-000000", "Feelings", "Curious about compilers");
    let journal = sandbox.journal(sandbox.env(), hashing());
    assert_eq!(journal.regenerate_missing().await, 1);

    std::fs::write(user.join("2025-12-20/11-00-00-000000.embedding"), "{not json").unwrap();

    let results = journal.search("compilers", &everything()).await.unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].text.contains("compilers"));
}

#[tokio::test]
async fn ties_break_by_recency() {
    let sandbox = Sandbox::new();
    let user = sandbox.default_user_root();
    let older = write_raw_entry(&user, "2025-11-01", "08-00-00-000000", "Feelings", "rainy monday");
    let newer = write_raw_entry(&user, "2025-12-01", "08-00-00-000000", "Feelings", "rainy monday");
    let journal = sandbox.journal(sandbox.env(), hashing());
    assert_eq!(journal.regenerate_missing().await, 2);

    let results = journal.search("rainy monday", &everything()).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].score, results[1].score);
    assert_eq!(results[0].path, newer.to_string_lossy());
    assert_eq!(results[1].path, older.to_string_lossy());
}

#[tokio::test]
async fn limit_and_min_score_apply() {
    let sandbox = Sandbox::new();
    let user = sandbox.default_user_root();
    write_raw_entry(&user, "2025-12-01", "08-00-00-000000", "Feelings", "tea in the garden");
    write_raw_entry(&user, "2025-12-02", "08-00-00-000000", "Feelings", "tea with lemon");
    write_raw_entry(&user, "2025-12-03", "08-00-00-000000", "Feelings", "quarterly tax forms");
    let journal = sandbox.journal(sandbox.env(), hashing());
    journal.regenerate_missing().await;

    let mut options = everything();
    options.limit = 1;
    assert_eq!(journal.search("tea", &options).await.unwrap().len(), 1);

    options.limit = 10;
    options.min_score = 0.3;
    let results = journal.search("tea", &options).await.unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.text.contains("tea")));
}

#[tokio::test]
async fn section_and_date_filters() {
    let sandbox = Sandbox::new();
    let user = sandbox.default_user_root();
    write_raw_entry(&user, "2025-06-01", "08-00-00-000000", "Feelings", "release anxiety");
    write_raw_entry(&user, "2025-12-01", "08-00-00-000000", "Technical Insights", "release builds strip symbols");
    let journal = sandbox.journal(sandbox.env(), hashing());
    journal.regenerate_missing().await;

    let mut options = everything();
    options.sections = vec!["technical_insights".into()];
    let results = journal.search("release", &options).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].sections, vec!["Technical Insights"]);

    let mut options = everything();
    options.since = Some(parse_date_bound("2025-09-01", false).unwrap());
    let results = journal.search("release", &options).await.unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].text.contains("symbols"));

    // a bare `until` date includes the whole day
    let mut options = everything();
    options.until = Some(parse_date_bound("2025-06-01", true).unwrap());
    let results = journal.search("release", &options).await.unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].text.contains("anxiety"));
}
