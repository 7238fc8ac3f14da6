use anyhow::{Context, Result};
use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::debug;

/// On-disk cache of fetched questionnaire exports, keyed by locator.
///
/// Entries older than `ttl` count as misses, since forms are edited in place.
#[derive(Debug, Clone)]
pub struct FormCache {
    dir: PathBuf,
    ttl: Duration,
}

impl FormCache {
    const MAX_KEY_LEN: usize = 100;
    pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    /// `<user cache dir>/formhtml`, when the platform has one
    pub fn default_location(ttl: Duration) -> Option<Self> {
        dirs::cache_dir().map(|dir| Self::new(dir.join("formhtml"), ttl))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, locator: &str) -> PathBuf {
        let readable: String = locator
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .take(Self::MAX_KEY_LEN)
            .collect();

        // Sanitizing is lossy, so the hash keeps distinct locators apart
        let mut hasher = DefaultHasher::new();
        locator.hash(&mut hasher);

        self.dir
            .join(format!("{}-{:016x}.json", readable, hasher.finish()))
    }

    fn is_fresh(&self, path: &Path) -> bool {
        let modified = match fs::metadata(path).and_then(|meta| meta.modified()) {
            Ok(modified) => modified,
            Err(_) => return false,
        };
        // A modification time in the future counts as brand new
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);
        age < self.ttl
    }

    pub fn load(&self, locator: &str) -> Option<Vec<u8>> {
        let path = self.path_for(locator);
        if !self.is_fresh(&path) {
            debug!(path = %path.display(), "cache miss (absent or expired)");
            return None;
        }

        match fs::read(&path) {
            Ok(bytes) => {
                debug!(path = %path.display(), "cache hit");
                Some(bytes)
            }
            Err(_) => {
                debug!(path = %path.display(), "cache miss");
                None
            }
        }
    }

    pub fn store(&self, locator: &str, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create cache directory {}", self.dir.display()))?;

        let path = self.path_for(locator);
        fs::write(&path, bytes)
            .with_context(|| format!("Failed to write cache file {}", path.display()))?;
        debug!(path = %path.display(), "cached questionnaire");

        Ok(())
    }
}
