//! Directory walks shared by reconciliation, search and listing.
//!
//! A root holds `YYYY-MM-DD` day directories; anything else at the top level is
//! ignored. A root that does not exist yet is simply empty.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

static DAY_DIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid day directory regex"));

pub fn is_day_dir_name(name: &str) -> bool {
    DAY_DIR_RE.is_match(name)
}

/// Day directories under `root`, sorted by name.
pub async fn list_day_dirs(root: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut reader = match tokio::fs::read_dir(root).await {
        Ok(reader) => reader,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut dirs = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        let name = entry.file_name();
        if !name.to_str().is_some_and(is_day_dir_name) {
            continue;
        }
        if entry.file_type().await?.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Files with `extension` directly inside `dir`, sorted by name. A missing
/// directory is empty.
pub async fn list_files(dir: &Path, extension: &str) -> std::io::Result<Vec<PathBuf>> {
    let mut reader = match tokio::fs::read_dir(dir).await {
        Ok(reader) => reader,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut files = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == extension) && entry.file_type().await?.is_file()
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Every file with `extension` in every day directory of `root`.
pub async fn list_root_files(root: &Path, extension: &str) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for day in list_day_dirs(root).await? {
        files.extend(list_files(&day, extension).await?);
    }
    Ok(files)
}
