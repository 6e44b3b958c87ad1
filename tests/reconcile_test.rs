mod helpers;

use helpers::{failing, files_with_extension, hashing, write_raw_entry, Sandbox};
use private_journal::embedding::record::load_record;
use private_journal::journal::types::{EntryMetadata, Sections};

#[tokio::test]
async fn regenerates_entries_missing_embeddings() {
    let sandbox = Sandbox::new();
    let user = sandbox.default_user_root();
    let project = sandbox.project_root();
    let a = write_raw_entry(&user, "2025-12-21", "09-15-00-100200", "Feelings", "Nervous about the demo");
    write_raw_entry(&user, "2025-12-22", "18-02-33-000999", "User Context", "Works late on Fridays");
    write_raw_entry(&project, "2025-12-22", "10-00-00-000000", "Project Notes", "Migrations run on boot");

    let journal = sandbox.journal(sandbox.env(), hashing());
    assert_eq!(journal.regenerate_missing().await, 3);

    let record = load_record(&a.with_extension("embedding")).await.unwrap().unwrap();
    assert_eq!(record.text, "Nervous about the demo");
    assert_eq!(record.sections, vec!["Feelings"]);
    assert_eq!(record.path, a.to_string_lossy());

    let expected = chrono::NaiveDate::from_ymd_opt(2025, 12, 21)
        .unwrap()
        .and_hms_micro_opt(9, 15, 0, 100200)
        .unwrap()
        .and_local_timezone(chrono::Local)
        .earliest()
        .unwrap()
        .timestamp_millis();
    assert_eq!(record.timestamp, expected);
}

#[tokio::test]
async fn second_run_regenerates_nothing() {
    let sandbox = Sandbox::new();
    write_raw_entry(&sandbox.default_user_root(), "2025-12-22", "08-00-00-000001", "Feelings", "Rested");
    write_raw_entry(&sandbox.project_root(), "2025-12-22", "08-00-01-000001", "Project Notes", "CI is green");

    let journal = sandbox.journal(sandbox.env(), hashing());
    assert_eq!(journal.regenerate_missing().await, 2);
    assert_eq!(journal.regenerate_missing().await, 0);
}

#[tokio::test]
async fn written_entries_need_no_reconciliation() {
    let sandbox = Sandbox::new();
    let journal = sandbox.journal(sandbox.env(), hashing());
    let sections = Sections {
        feelings: Some("Pleased with the refactor".into()),
        project_notes: Some("Parser now streams tokens".into()),
        ..Sections::default()
    };
    let receipt = journal.write(&sections, &EntryMetadata::default()).await.unwrap();
    receipt.embeddings.unwrap().await.unwrap();

    assert_eq!(journal.regenerate_missing().await, 0);
}

#[tokio::test]
async fn repairs_after_failed_embedding() {
    let sandbox = Sandbox::new();
    let broken = sandbox.journal(sandbox.env(), failing());
    let sections = Sections {
        world_knowledge: Some("Octopuses have three hearts".into()),
        ..Sections::default()
    };
    let receipt = broken.write(&sections, &EntryMetadata::default()).await.unwrap();
    receipt.embeddings.unwrap().await.unwrap();

    // a model failure during reconciliation is logged, not counted
    assert_eq!(broken.regenerate_missing().await, 0);

    let healthy = sandbox.journal(sandbox.env(), hashing());
    assert_eq!(healthy.regenerate_missing().await, 1);
    assert_eq!(
        files_with_extension(&sandbox.default_user_root(), "embedding").len(),
        1
    );
}

#[tokio::test]
async fn missing_roots_contribute_nothing() {
    let sandbox = Sandbox::new();
    let journal = sandbox.journal(sandbox.env(), hashing());
    assert_eq!(journal.regenerate_missing().await, 0);
}

#[tokio::test]
async fn ignores_non_day_directories_and_empty_entries() {
    let sandbox = Sandbox::new();
    let user = sandbox.default_user_root();
    write_raw_entry(&user, "templates", "09-00-00-000000", "Feelings", "not an entry");
    write_raw_entry(&user, "2025-1-2", "09-00-00-000000", "Feelings", "not an entry");
    // header only: nothing searchable
    let day = user.join("2025-12-22");
    std::fs::create_dir_all(&day).unwrap();
    std::fs::write(day.join("09-00-00-000000.md"), "---\ntitle: x\n---\n\n## Feelings\n\n").unwrap();

    let journal = sandbox.journal(sandbox.env(), hashing());
    assert_eq!(journal.regenerate_missing().await, 0);
    assert!(files_with_extension(&user, "embedding").is_empty());
}

#[tokio::test]
async fn broken_root_does_not_stop_the_other() {
    let sandbox = Sandbox::new();
    // project root is a file, so scanning it fails
    std::fs::create_dir_all(sandbox.project_dir()).unwrap();
    std::fs::write(sandbox.project_root(), "oops").unwrap();
    write_raw_entry(&sandbox.default_user_root(), "2025-12-22", "07-00-00-000000", "Feelings", "Still here");

    let journal = sandbox.journal(sandbox.env(), hashing());
    assert_eq!(journal.regenerate_missing().await, 1);
}
