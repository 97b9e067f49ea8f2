//! Session store implementations.

use crate::paths::AquaPaths;
use crate::storage::AtomicTomlFile;
use aqua_core::brand::Brand;
use aqua_core::error::Result;
use aqua_core::session::SessionStore;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

type Slots = BTreeMap<String, String>;

/// Session store backed by a TOML key/value file.
///
/// The file may be shared by several brands; each store only touches its own
/// key. The current value is cached in memory, so `get` never hits the disk
/// after construction and keeps answering even if later writes fail.
pub struct FileSessionStore {
    key: String,
    file: AtomicTomlFile<Slots>,
    cached: Mutex<Option<String>>,
}

impl FileSessionStore {
    /// Opens the store at the platform default location for `brand`.
    pub fn new(brand: Brand) -> Result<Self> {
        Ok(Self::with_path(AquaPaths::session_file()?, brand.session_storage_key()))
    }

    /// Opens the store at `path` under `key` (also used by tests).
    ///
    /// An unreadable file is logged and treated as "no session".
    pub fn with_path(path: PathBuf, key: impl Into<String>) -> Self {
        let key = key.into();
        let file = AtomicTomlFile::<Slots>::new(path);

        let initial = match file.load() {
            Ok(slots) => slots.and_then(|mut slots| slots.remove(&key)),
            Err(e) => {
                tracing::warn!(
                    "[SessionStore] Ignoring unreadable session file {}: {}",
                    file.path().display(),
                    e
                );
                None
            }
        };

        Self {
            key,
            file,
            cached: Mutex::new(initial.filter(|id| !id.is_empty())),
        }
    }

    fn set_cached(&self, value: Option<String>) {
        match self.cached.lock() {
            Ok(mut cached) => *cached = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }
}

impl SessionStore for FileSessionStore {
    fn key(&self) -> &str {
        &self.key
    }

    fn get(&self) -> Option<String> {
        match self.cached.lock() {
            Ok(cached) => cached.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set(&self, session_id: &str) -> Result<()> {
        self.set_cached(Some(session_id.to_string()));

        let key = self.key.clone();
        let value = session_id.to_string();
        self.file.update_or_replace(Slots::new(), move |slots| {
            slots.insert(key, value);
            Ok(())
        })?;

        tracing::debug!("[SessionStore] Persisted session under {}", self.key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.set_cached(None);

        let key = self.key.clone();
        self.file.update_or_replace(Slots::new(), move |slots| {
            slots.remove(&key);
            Ok(())
        })?;

        tracing::debug!("[SessionStore] Cleared session under {}", self.key);
        Ok(())
    }
}

/// Process-local session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    key: String,
    value: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new(brand: Brand) -> Self {
        Self {
            key: brand.session_storage_key(),
            value: Mutex::new(None),
        }
    }

    /// A store that starts with `session_id` already present.
    pub fn with_session(brand: Brand, session_id: impl Into<String>) -> Self {
        Self {
            key: brand.session_storage_key(),
            value: Mutex::new(Some(session_id.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn key(&self) -> &str {
        &self.key
    }

    fn get(&self) -> Option<String> {
        self.value.lock().ok().and_then(|value| value.clone())
    }

    fn set(&self, session_id: &str) -> Result<()> {
        if let Ok(mut value) = self.value.lock() {
            *value = Some(session_id.to_string());
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if let Ok(mut value) = self.value.lock() {
            *value = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_means_no_session() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::with_path(
            temp_dir.path().join("session.toml"),
            "aquapump.chat.session",
        );

        assert_eq!(store.get(), None);
        assert_eq!(store.key(), "aquapump.chat.session");
    }

    #[test]
    fn test_set_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.toml");

        let store = FileSessionStore::with_path(path.clone(), "aquapump.chat.session");
        store.set("abc123").unwrap();

        let reopened = FileSessionStore::with_path(path, "aquapump.chat.session");
        assert_eq!(reopened.get(), Some("abc123".to_string()));
    }

    #[test]
    fn test_clear_removes_only_own_key() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.toml");

        let aqua = FileSessionStore::with_path(path.clone(), Brand::AquaPump.session_storage_key());
        let work = FileSessionStore::with_path(path.clone(), Brand::WorkWave.session_storage_key());
        aqua.set("aqua-1").unwrap();
        work.set("work-1").unwrap();

        aqua.clear().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("aqua-1"));
        assert!(content.contains("work-1"));
        assert_eq!(aqua.get(), None);
    }

    #[test]
    fn test_corrupt_file_is_treated_as_absent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.toml");
        fs::write(&path, "this is = = not toml").unwrap();

        let store = FileSessionStore::with_path(path, "aquapump.chat.session");

        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_set_repairs_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.toml");
        fs::write(&path, "this is = = not toml").unwrap();

        let store = FileSessionStore::with_path(path.clone(), "aquapump.chat.session");
        store.set("abc123").unwrap();

        let reopened = FileSessionStore::with_path(path, "aquapump.chat.session");
        assert_eq!(reopened.get(), Some("abc123".to_string()));
    }

    #[test]
    fn test_clear_repairs_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.toml");
        fs::write(&path, "[[[").unwrap();

        let store = FileSessionStore::with_path(path.clone(), "aquapump.chat.session");
        store.clear().unwrap();

        assert!(!fs::read_to_string(&path).unwrap().contains("[[["));
        let reopened = FileSessionStore::with_path(path, "aquapump.chat.session");
        assert_eq!(reopened.get(), None);
    }

    #[test]
    fn test_failed_write_still_updates_memory() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be makes every write fail.
        let path = temp_dir.path().join("session.toml");
        fs::create_dir(&path).unwrap();

        let store = FileSessionStore::with_path(path, "aquapump.chat.session");
        let result = store.set("abc123");

        assert!(result.is_err());
        assert_eq!(store.get(), Some("abc123".to_string()));
    }

    #[test]
    fn test_memory_store() {
        let store = MemorySessionStore::with_session(Brand::WorkWave, "s-1");
        assert_eq!(store.key(), "workwave.chat.session");
        assert_eq!(store.get(), Some("s-1".to_string()));

        store.clear().unwrap();
        assert_eq!(store.get(), None);
    }
}
