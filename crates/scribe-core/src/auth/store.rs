use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Session file name in the cache directory
const SESSION_FILE: &str = "session.json";

/// Persistent storage for the single session token.
///
/// All operations are synchronous and total: implementations must not fail,
/// at most one token exists at a time, and `clear` on an empty store is a
/// no-op.
pub trait TokenStore: Send {
    /// The current token, or `None` if no login has happened since the last
    /// clear. No side effects.
    fn get(&self) -> Option<String>;

    /// Overwrite any existing token.
    fn set(&mut self, token: String);

    /// Remove the token if present. Idempotent.
    fn clear(&mut self);
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredToken {
    token: String,
    saved_at: DateTime<Utc>,
}

/// Token store persisted as a JSON file, so the session survives restarts.
///
/// I/O failures are logged and swallowed: the in-memory view stays
/// authoritative for the running process and the contract stays error-free.
pub struct FileTokenStore {
    path: PathBuf,
    cached: Option<StoredToken>,
}

impl FileTokenStore {
    /// Open the store rooted at the given directory, loading any token a
    /// previous run left behind.
    pub fn new(dir: PathBuf) -> Self {
        let path = dir.join(SESSION_FILE);
        let cached = Self::read(&path);
        Self { path, cached }
    }

    fn read(path: &Path) -> Option<StoredToken> {
        if !path.exists() {
            return None;
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(data) => Some(data),
                Err(e) => {
                    warn!(error = %e, "Ignoring malformed session file");
                    None
                }
            },
            Err(e) => {
                warn!(error = %e, "Failed to read session file");
                None
            }
        }
    }

    fn write(&self) {
        let Some(ref data) = self.cached else { return };
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(error = %e, "Failed to create session directory");
                return;
            }
        }
        match serde_json::to_string_pretty(data) {
            Ok(contents) => {
                if let Err(e) = std::fs::write(&self.path, contents) {
                    warn!(error = %e, "Failed to write session file");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize session"),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        self.cached.as_ref().map(|s| s.token.clone())
    }

    fn set(&mut self, token: String) {
        self.cached = Some(StoredToken {
            token,
            saved_at: Utc::now(),
        });
        self.write();
    }

    fn clear(&mut self) {
        self.cached = None;
        if self.path.exists() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                warn!(error = %e, "Failed to remove session file");
            }
        }
    }
}

/// In-memory token store for tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Option<String>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.clone()
    }

    fn set(&mut self, token: String) {
        self.token = Some(token);
    }

    fn clear(&mut self) {
        self.token = None;
    }
}
