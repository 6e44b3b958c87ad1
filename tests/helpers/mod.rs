#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use private_journal::embedding::{EmbeddingProvider, SharedProvider};
use private_journal::journal::Journal;
use private_journal::paths::{JournalEnv, JournalPaths, Platform};
use tempfile::TempDir;
use tracing_subscriber::fmt::MakeWriter;

/// Dimensions of the hashing test embedder.
pub const TEST_DIM: usize = 1024;

/// Deterministic bag-of-words embedder: each lowercase word bumps one bucket.
/// Texts sharing words score high; unrelated texts score near zero.
pub struct HashingProvider;

impl EmbeddingProvider for HashingProvider {
    fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let mut v = vec![0.0f32; TEST_DIM];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            v[fnv1a(&word.to_lowercase()) % TEST_DIM] += 1.0;
        }
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            v.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(v)
    }
}

fn fnv1a(word: &str) -> usize {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in word.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash as usize
}

/// Embedder that always fails, standing in for a broken model.
pub struct FailingProvider;

impl EmbeddingProvider for FailingProvider {
    fn embed(&self, _text: &str) -> anyhow::Result<Vec<f32>> {
        anyhow::bail!("model unavailable")
    }
}

pub fn hashing() -> SharedProvider {
    Arc::new(HashingProvider)
}

pub fn failing() -> SharedProvider {
    Arc::new(FailingProvider)
}

/// Environment whose home is inside the temp dir, on the Linux branch.
pub fn test_env(home: &Path) -> JournalEnv {
    JournalEnv {
        home: Some(home.to_string_lossy().into_owned()),
        temp_dir: home.join("tmp"),
        platform: Platform::Linux,
        ..JournalEnv::default()
    }
}

/// Isolated project dir + home dir under one temp directory.
pub struct Sandbox {
    pub tmp: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            tmp: TempDir::new().unwrap(),
        }
    }

    pub fn home(&self) -> PathBuf {
        self.tmp.path().join("home")
    }

    pub fn project_dir(&self) -> PathBuf {
        self.tmp.path().join("project")
    }

    pub fn project_root(&self) -> PathBuf {
        self.project_dir().join(".private-journal")
    }

    pub fn default_user_root(&self) -> PathBuf {
        self.home().join(".private-journal")
    }

    pub fn env(&self) -> JournalEnv {
        test_env(&self.home())
    }

    pub fn journal(&self, env: JournalEnv, provider: SharedProvider) -> Journal {
        Journal::new(JournalPaths::new(env, &self.project_dir()), provider)
    }

    /// Write an Obsidian registry listing `vaults` under this sandbox's home.
    pub fn write_registry(&self, home: &Path, vaults: &[&Path]) {
        let mut map = serde_json::Map::new();
        for (i, vault) in vaults.iter().enumerate() {
            map.insert(
                format!("vault{i}"),
                serde_json::json!({ "path": vault.to_string_lossy(), "ts": 1700000000000u64 }),
            );
        }
        let registry = home.join(".config/obsidian/obsidian.json");
        std::fs::create_dir_all(registry.parent().unwrap()).unwrap();
        std::fs::write(
            registry,
            serde_json::json!({ "vaults": map }).to_string(),
        )
        .unwrap();
    }
}

/// Write a hand-made entry at `<root>/<date>/<time>.md`.
pub fn write_raw_entry(root: &Path, date: &str, time: &str, section: &str, body: &str) -> PathBuf {
    let dir = root.join(date);
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("{time}.md"));
    std::fs::write(
        &path,
        format!("---\ntitle: \"test\"\ntags:\n  - agentic-journal\n---\n\n## {section}\n\n{body}\n"),
    )
    .unwrap();
    path
}

/// All files with `extension` anywhere under `dir`.
pub fn files_with_extension(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let Ok(entries) = std::fs::read_dir(dir) else {
        return found;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            found.extend(files_with_extension(&path, extension));
        } else if path.extension().is_some_and(|e| e == extension) {
            found.push(path);
        }
    }
    found.sort();
    found
}

/// Log output captured from a thread-local subscriber.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Route this thread's `tracing` events (debug and up) into the buffer
    /// until the guard is dropped.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
