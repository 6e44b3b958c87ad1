//! Physical locations of the two journal roots and of embedding records.
//!
//! All inputs come from a [`JournalEnv`] snapshot taken once at construction,
//! so resolution is a function of explicit values rather than of whatever the
//! process environment holds at the moment of the call.

use std::path::{Path, PathBuf};

use tokio::sync::OnceCell;

use crate::journal::types::JournalRoot;
use crate::vault;

/// Explicit user-journal path override.
pub const USER_PATH_VAR: &str = "PRIVATE_JOURNAL_USER_PATH";
/// Name of the Obsidian vault to journal into ("synced-vault mode").
pub const VAULT_VAR: &str = "PRIVATE_JOURNAL_VAULT";

/// Directory name of a journal root inside the home or project directory.
pub const JOURNAL_DIR_NAME: &str = ".private-journal";
/// Subdirectory of a vault that holds the user journal.
pub const VAULT_JOURNAL_DIR: &str = "agentic-journal";

pub const ENTRY_EXTENSION: &str = "md";
pub const EMBEDDING_EXTENSION: &str = "embedding";

/// Platform branch used for locating another application's files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Linux
        }
    }
}

/// Snapshot of every environment indicator the journal consults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEnv {
    pub user_journal_path: Option<String>,
    pub vault_name: Option<String>,
    pub local_app_data: Option<String>,
    pub app_data: Option<String>,
    pub home: Option<String>,
    pub user_profile: Option<String>,
    pub temp_dir: PathBuf,
    pub platform: Platform,
}

impl Default for JournalEnv {
    fn default() -> Self {
        Self {
            user_journal_path: None,
            vault_name: None,
            local_app_data: None,
            app_data: None,
            home: None,
            user_profile: None,
            temp_dir: std::env::temp_dir(),
            platform: Platform::current(),
        }
    }
}

impl JournalEnv {
    /// Read the indicators from the process environment.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok();
        Self {
            user_journal_path: var(USER_PATH_VAR),
            vault_name: var(VAULT_VAR),
            local_app_data: var("LOCALAPPDATA"),
            app_data: var("APPDATA"),
            home: var("HOME"),
            user_profile: var("USERPROFILE"),
            ..Self::default()
        }
    }

    pub fn user_journal_override(&self) -> Option<&str> {
        non_empty(&self.user_journal_path)
    }

    pub fn vault(&self) -> Option<&str> {
        non_empty(&self.vault_name)
    }

    /// Synced-vault mode is about intent: the vault indicator is set, whether
    /// or not the vault could actually be found.
    pub fn is_synced_vault_mode(&self) -> bool {
        self.vault().is_some()
    }

    pub fn home_dir(&self) -> Option<&str> {
        non_empty(&self.home).or_else(|| non_empty(&self.user_profile))
    }

    pub fn local_app_data(&self) -> Option<&str> {
        non_empty(&self.local_app_data)
    }

    pub fn app_data(&self) -> Option<&str> {
        non_empty(&self.app_data)
    }

    /// Home directory, or the temp directory when no home is discoverable.
    pub fn home_or_temp(&self) -> String {
        match self.home_dir() {
            Some(home) => home.to_string(),
            None => self.temp_dir.to_string_lossy().into_owned(),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

pub(crate) fn join_posix(base: &str, parts: &[&str]) -> PathBuf {
    join_with(base, parts, '/')
}

pub(crate) fn join_windows(base: &str, parts: &[&str]) -> PathBuf {
    join_with(base, parts, '\\')
}

fn join_with(base: &str, parts: &[&str], sep: char) -> PathBuf {
    let mut joined = base.trim_end_matches(sep).to_string();
    for part in parts {
        joined.push(sep);
        joined.push_str(part);
    }
    PathBuf::from(joined)
}

/// `<project-dir>/.private-journal`, independent of any mode.
pub fn project_journal_path(project_dir: &Path) -> PathBuf {
    project_dir.join(JOURNAL_DIR_NAME)
}

/// `<home>/.private-journal`, or under the temp directory without a home.
pub fn default_user_journal_path(env: &JournalEnv) -> PathBuf {
    match env.home_dir() {
        Some(home) => PathBuf::from(home).join(JOURNAL_DIR_NAME),
        None => env.temp_dir.join(JOURNAL_DIR_NAME),
    }
}

/// Resolve the user-global journal root: explicit override, then named vault,
/// then the home-directory default.
pub async fn resolve_user_journal_path(env: &JournalEnv) -> PathBuf {
    if let Some(path) = env.user_journal_override() {
        return PathBuf::from(path);
    }

    if let Some(name) = env.vault() {
        let vaults = vault::load_vaults(None, env).await;
        match vaults.get(name) {
            Some(vault_path) => return vault_path.join(VAULT_JOURNAL_DIR),
            None => tracing::warn!(
                vault = %name,
                known = vaults.len(),
                "vault not found in Obsidian registry, using default user journal"
            ),
        }
    }

    default_user_journal_path(env)
}

/// Local-only directory for user-journal embeddings in synced-vault mode.
pub fn embedding_cache_dir(env: &JournalEnv) -> PathBuf {
    cache_path(env, &[])
}

fn cache_path(env: &JournalEnv, extra: &[&str]) -> PathBuf {
    let mut parts = vec!["private-journal", "embeddings"];
    parts.extend_from_slice(extra);
    match env.local_app_data() {
        Some(local) => join_windows(local, &parts),
        None => {
            parts.insert(0, ".cache");
            join_posix(&env.home_or_temp(), &parts)
        }
    }
}

/// Where the embedding record for `markdown` lives.
///
/// Project entries, and user entries outside synced-vault mode, keep the record
/// beside the markdown. In synced-vault mode user entries are flattened into
/// the cache directory as `<date>--<time>.embedding`, which depends only on the
/// entry's own path segments and not on where the vault is mounted.
pub fn embedding_path(markdown: &Path, is_user_root: bool, env: &JournalEnv) -> PathBuf {
    if is_user_root && env.is_synced_vault_mode() {
        let name = flattened_embedding_name(markdown);
        cache_path(env, &[name.as_str()])
    } else {
        markdown.with_extension(EMBEDDING_EXTENSION)
    }
}

fn flattened_embedding_name(markdown: &Path) -> String {
    let stem = markdown
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    match markdown
        .parent()
        .and_then(Path::file_name)
        .map(|d| d.to_string_lossy())
    {
        Some(date) => format!("{date}--{stem}.{EMBEDDING_EXTENSION}"),
        None => format!("{stem}.{EMBEDDING_EXTENSION}"),
    }
}

/// Inverse of the flattening: `<date>--<time>.embedding` → `(date, time)`.
pub fn split_flattened_name(file_name: &str) -> Option<(&str, &str)> {
    let stem = file_name.strip_suffix(".embedding")?;
    stem.split_once("--")
}

/// Resolved roots for one writer/searcher, with the user root memoized.
#[derive(Debug)]
pub struct JournalPaths {
    env: JournalEnv,
    project_root: PathBuf,
    user_override: Option<PathBuf>,
    user_root: OnceCell<PathBuf>,
}

impl JournalPaths {
    pub fn new(env: JournalEnv, project_dir: &Path) -> Self {
        Self {
            env,
            project_root: project_journal_path(project_dir),
            user_override: None,
            user_root: OnceCell::new(),
        }
    }

    /// Pin the user root, bypassing environment resolution.
    pub fn with_user_root(mut self, user_root: impl Into<PathBuf>) -> Self {
        self.user_override = Some(user_root.into());
        self
    }

    pub fn env(&self) -> &JournalEnv {
        &self.env
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub async fn user_root(&self) -> &Path {
        self.user_root
            .get_or_init(|| async {
                match &self.user_override {
                    Some(path) => path.clone(),
                    None => resolve_user_journal_path(&self.env).await,
                }
            })
            .await
    }

    pub async fn root(&self, root: JournalRoot) -> PathBuf {
        match root {
            JournalRoot::Project => self.project_root.clone(),
            JournalRoot::User => self.user_root().await.to_path_buf(),
        }
    }

    pub fn embedding_path(&self, markdown: &Path, root: JournalRoot) -> PathBuf {
        embedding_path(markdown, root == JournalRoot::User, &self.env)
    }

    /// Whether user-root embeddings live in the flat cache directory.
    pub fn user_embeddings_in_cache(&self) -> bool {
        self.env.is_synced_vault_mode()
    }

    pub fn embedding_cache_dir(&self) -> PathBuf {
        embedding_cache_dir(&self.env)
    }
}
