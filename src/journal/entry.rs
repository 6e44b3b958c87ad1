//! Entry naming and markdown composition.
//!
//! Entries live at `<root>/<YYYY-MM-DD>/<HH-MM-SS-ffffff>.md`. The six-digit
//! sub-second field is `millis * 1000 + random(0..1000)`: unique with high
//! probability for same-second writes, but not guaranteed. A collision
//! overwrites the earlier file.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Timelike, Utc};

use crate::journal::types::{EntryMetadata, Section};
use crate::paths::ENTRY_EXTENSION;

/// First tag of every entry.
pub const DOMAIN_TAG: &str = "agentic-journal";

/// Day directory name for a creation time.
pub fn day_dir_name(created: &DateTime<Local>) -> String {
    created.format("%Y-%m-%d").to_string()
}

/// Entry filename for a creation time and a random value in `0..1000`.
pub fn entry_file_name(created: &DateTime<Local>, random: u32) -> String {
    let subsecond = created.timestamp_subsec_millis() * 1000 + random % 1000;
    format!(
        "{:02}-{:02}-{:02}-{:06}.{ENTRY_EXTENSION}",
        created.hour(),
        created.minute(),
        created.second(),
        subsecond
    )
}

/// Random component of the filename disambiguator.
pub fn random_disambiguator() -> u32 {
    (uuid::Uuid::new_v4().as_u128() % 1000) as u32
}

/// Full path of a new entry under `root`.
pub fn entry_path(root: &Path, created: &DateTime<Local>, random: u32) -> PathBuf {
    root.join(day_dir_name(created))
        .join(entry_file_name(created, random))
}

/// Human-readable title, e.g. `2:30:45 PM - December 22, 2025`.
pub fn entry_title(created: &DateTime<Local>) -> String {
    created.format("%-I:%M:%S %p - %B %-d, %Y").to_string()
}

/// Compose the markdown for one entry: frontmatter, then one `## ` block per
/// section in the order given.
pub fn compose_entry(
    sections: &[(Section, &str)],
    metadata: &EntryMetadata,
    created: &DateTime<Local>,
) -> String {
    let mut out = String::from("---\n");
    out.push_str(&format!("title: {}\n", yaml_string(&entry_title(created))));
    out.push_str(&format!(
        "date: {}\n",
        created
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    ));
    out.push_str(&format!("timestamp: {}\n", created.timestamp_millis()));
    if let Some(project) = non_blank(&metadata.project) {
        out.push_str(&format!("project: {}\n", yaml_string(project)));
    }
    if let Some(agent) = non_blank(&metadata.agent) {
        out.push_str(&format!("agent: {}\n", yaml_string(agent)));
    }
    out.push_str("tags:\n");
    out.push_str(&format!("  - {DOMAIN_TAG}\n"));
    for (section, _) in sections {
        out.push_str(&format!("  - {}\n", section.tag()));
    }
    out.push_str("---\n");

    for (section, content) in sections {
        out.push_str(&format!("\n## {}\n\n{}\n", section.title(), content.trim()));
    }
    out
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// JSON string syntax is a valid YAML double-quoted scalar.
fn yaml_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Recover an entry's creation time (epoch ms) from its path: the day
/// directory plus the `HH-MM-SS-ffffff` stem, read as local time.
pub fn timestamp_from_path(path: &Path) -> Option<i64> {
    let date_str = path.parent()?.file_name()?.to_str()?;
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()?;

    let stem = path.file_stem()?.to_str()?;
    let mut parts = stem.split('-');
    let mut next = || parts.next().and_then(|p| p.parse::<u32>().ok());
    let (hour, minute, second, subsecond) = (next()?, next()?, next()?, next()?);
    if parts.next().is_some() {
        return None;
    }

    let time = NaiveTime::from_hms_micro_opt(hour, minute, second, subsecond)?;
    let local = Local.from_local_datetime(&date.and_time(time)).earliest()?;
    // the last three digits are random, not time
    Some(local.timestamp_millis())
}
