//! Discovery of externally-synced Obsidian vaults.
//!
//! The vault registry is owned by another application and may change between
//! invocations, so it is re-read on every lookup. Discovery is best-effort:
//! a missing, unreadable or malformed registry yields an empty [`VaultMap`],
//! and callers must treat "no vaults" as a valid answer rather than an error.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::paths::{join_posix, join_windows, JournalEnv, Platform};

/// Vault display name (last path segment) → absolute vault path.
pub type VaultMap = HashMap<String, PathBuf>;

/// Expected location of the Obsidian registry file (`obsidian.json`) for the
/// environment's platform.
pub fn locate_config(env: &JournalEnv) -> PathBuf {
    match env.platform {
        Platform::Windows => match env.app_data() {
            Some(app_data) => join_windows(app_data, &["obsidian", "obsidian.json"]),
            None => join_windows(
                &env.home_or_temp(),
                &["AppData", "Roaming", "obsidian", "obsidian.json"],
            ),
        },
        Platform::MacOs => join_posix(
            &env.home_or_temp(),
            &["Library", "Application Support", "obsidian", "obsidian.json"],
        ),
        Platform::Linux => join_posix(&env.home_or_temp(), &[".config", "obsidian", "obsidian.json"]),
    }
}

/// Parse registry JSON into a [`VaultMap`].
///
/// Expects `{"vaults": {"<id>": {"path": "..."}}}`; other fields are ignored.
/// Entries without a usable `path` are skipped. Never fails: malformed input
/// produces an empty map.
pub fn parse_registry(raw: &str) -> VaultMap {
    let parsed: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "vault registry is not valid JSON");
            return VaultMap::new();
        }
    };

    let Some(vaults) = parsed.get("vaults").and_then(Value::as_object) else {
        return VaultMap::new();
    };

    let mut map = VaultMap::new();
    for vault in vaults.values() {
        let Some(path) = vault.get("path").and_then(Value::as_str) else {
            continue;
        };
        if let Some(name) = display_name(path) {
            map.insert(name.to_string(), PathBuf::from(path));
        }
    }
    map
}

/// Read and parse the registry at `path`, or at [`locate_config`] when `None`.
/// Any I/O failure yields an empty map.
pub async fn load_vaults(path: Option<&Path>, env: &JournalEnv) -> VaultMap {
    let location = match path {
        Some(p) => p.to_path_buf(),
        None => locate_config(env),
    };

    match tokio::fs::read_to_string(&location).await {
        Ok(raw) => parse_registry(&raw),
        Err(e) => {
            tracing::debug!(path = %location.display(), error = %e, "vault registry unavailable");
            VaultMap::new()
        }
    }
}

/// Last segment of a vault path, accepting either separator style.
fn display_name(path: &str) -> Option<&str> {
    path.trim()
        .trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
}
