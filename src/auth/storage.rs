use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::ClientResult;

pub const SESSION_FILE: &str = "session.json";

/// Persistent home of the single bearer token and the post-login destination.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> ClientResult<()>;
    /// Best-effort; a store that cannot be cleared is logged, not reported.
    /// Leaves a stashed redirect in place.
    fn clear(&self);

    fn stash_redirect(&self, path: &str);
    /// Consumed on read.
    fn take_redirect(&self) -> Option<String>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    redirect: Option<String>,
}

/// Token and redirect kept in `session.json` under the CLI config directory.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SESSION_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> SessionFile {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return SessionFile::default();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("ignoring unreadable session file {}: {}", self.path.display(), e);
            SessionFile::default()
        })
    }

    /// Replaces the whole file; an empty session removes it.
    fn write(&self, file: &SessionFile) -> ClientResult<()> {
        if file.token.is_none() && file.redirect.is_none() {
            match fs::remove_file(&self.path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(file)?)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        self.read().token.filter(|t| !t.is_empty())
    }

    fn save(&self, token: &str) -> ClientResult<()> {
        let mut file = self.read();
        file.token = Some(token.to_string());
        self.write(&file)
    }

    fn clear(&self) {
        let mut file = self.read();
        file.token = None;
        if let Err(e) = self.write(&file) {
            tracing::warn!("failed to clear session file {}: {}", self.path.display(), e);
        }
    }

    fn stash_redirect(&self, path: &str) {
        let mut file = self.read();
        file.redirect = Some(path.to_string());
        if let Err(e) = self.write(&file) {
            tracing::warn!("failed to remember redirect in {}: {}", self.path.display(), e);
        }
    }

    fn take_redirect(&self) -> Option<String> {
        let mut file = self.read();
        let redirect = file.redirect.take()?;
        if let Err(e) = self.write(&file) {
            tracing::warn!("failed to consume redirect in {}: {}", self.path.display(), e);
        }
        Some(redirect)
    }
}

/// Process-local token, for the site server and tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
    redirect: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
            redirect: Mutex::new(None),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().ok().and_then(|t| t.clone())
    }

    fn save(&self, token: &str) -> ClientResult<()> {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
        Ok(())
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }

    fn stash_redirect(&self, path: &str) {
        if let Ok(mut slot) = self.redirect.lock() {
            *slot = Some(path.to_string());
        }
    }

    fn take_redirect(&self) -> Option<String> {
        self.redirect.lock().ok().and_then(|mut slot| slot.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip_and_clear() {
        let dir = std::env::temp_dir().join(format!("portfolio-token-test-{}", std::process::id()));
        let store = FileTokenStore::in_dir(&dir);

        assert_eq!(store.load(), None);
        store.save("abc.def.ghi").unwrap();
        assert_eq!(store.load().as_deref(), Some("abc.def.ghi"));

        store.clear();
        assert_eq!(store.load(), None);
        // clearing twice is fine
        store.clear();

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_redirect_survives_clear_and_is_taken_once() {
        let dir = std::env::temp_dir().join(format!("portfolio-redirect-test-{}", std::process::id()));
        let store = FileTokenStore::in_dir(&dir);

        store.save("tok").unwrap();
        store.stash_redirect("/admin/projects/p1");
        store.clear();
        assert_eq!(store.load(), None);

        store.save("fresh").unwrap();
        let reopened = FileTokenStore::in_dir(&dir);
        assert_eq!(reopened.take_redirect().as_deref(), Some("/admin/projects/p1"));
        assert_eq!(reopened.take_redirect(), None);
        assert_eq!(reopened.load().as_deref(), Some("fresh"));

        reopened.clear();
        assert!(!reopened.path().exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::with_token("t");
        assert_eq!(store.load().as_deref(), Some("t"));
        store.clear();
        assert!(store.load().is_none());
    }
}
