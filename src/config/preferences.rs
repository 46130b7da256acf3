//! Key/value preference stores persisted as JSON files.
//!
//! Two stores live beside the database under `prefs/`:
//! - `default.json`: the application's default preferences
//! - `fluxc-preferences.json`: preferences owned by the data layer
//!
//! File-backed stores write through on every change using a temp file
//! and an atomic rename, so a crash never leaves a half-written file.
//! In-memory stores have no backing file.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Key under which the account token is stored.
pub const ACCOUNT_TOKEN_PREF_KEY: &str = "ACCOUNT_TOKEN_PREF_KEY";

/// File name of the default preference store.
pub const DEFAULT_PREFS_FILE: &str = "default.json";

/// File name of the data layer's own preference store.
pub const FLUXC_PREFS_FILE: &str = "fluxc-preferences.json";

/// A string key/value store.
#[derive(Debug, Clone, Default)]
pub struct Preferences {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

impl Preferences {
    /// A store with no backing file.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load a file-backed store. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, or is not
    /// a JSON object of strings.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| {
                    Error::Config(format!("Invalid preference file {}: {e}", path.display()))
                })?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: Some(path),
            values,
        })
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Set a value and persist the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be written.
    pub fn put(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }

    /// Remove a value and persist the store. Returns the old value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be written.
    pub fn remove(&mut self, key: &str) -> Result<Option<String>> {
        let old = self.values.remove(key);
        if old.is_some() {
            self.save()?;
        }
        Ok(old)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Write the store to its file. No-op for in-memory stores.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let json = serde_json::to_string_pretty(&self.values)?;
        let temp_path = path.with_extension("json.tmp");

        {
            let mut opts = fs::OpenOptions::new();
            opts.write(true).create(true).truncate(true);
            #[cfg(unix)]
            opts.mode(0o600);
            let mut file = opts.open(&temp_path)?;
            file.write_all(json.as_bytes())?;
            file.flush()?;
        }
        fs::rename(&temp_path, path)?;

        debug!(path = %path.display(), keys = self.values.len(), "Saved preferences");
        Ok(())
    }
}

/// The default and data-layer preference stores, opened together.
#[derive(Debug, Clone, Default)]
pub struct PreferenceStores {
    pub default: Preferences,
    pub fluxc: Preferences,
}

impl PreferenceStores {
    /// Both stores in memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load both stores from `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if either file exists but is unreadable.
    pub fn open(dir: &Path) -> Result<Self> {
        Ok(Self {
            default: Preferences::load(dir.join(DEFAULT_PREFS_FILE))?,
            fluxc: Preferences::load(dir.join(FLUXC_PREFS_FILE))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let prefs = Preferences::load(dir.path().join("absent.json")).unwrap();
        assert!(prefs.is_empty());
        assert!(!dir.path().join("absent.json").exists());
    }

    #[test]
    fn test_put_writes_through() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs").join(DEFAULT_PREFS_FILE);

        let mut prefs = Preferences::load(&path).unwrap();
        prefs.put("theme", "dark").unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let reloaded = Preferences::load(&path).unwrap();
        assert_eq!(reloaded.get("theme"), Some("dark"));
    }

    #[test]
    fn test_remove_returns_old_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(FLUXC_PREFS_FILE);

        let mut prefs = Preferences::load(&path).unwrap();
        prefs.put("a", "1").unwrap();
        assert_eq!(prefs.remove("a").unwrap(), Some("1".to_string()));
        assert_eq!(prefs.remove("a").unwrap(), None);

        let reloaded = Preferences::load(&path).unwrap();
        assert!(reloaded.get("a").is_none());
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_PREFS_FILE);
        fs::write(&path, "[1, 2, 3]").unwrap();

        let err = Preferences::load(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_PREFS_FILE);
        let mut prefs = Preferences::load(&path).unwrap();
        prefs.put("k", "v").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_in_memory_has_no_file() {
        let mut prefs = Preferences::in_memory();
        prefs.put("k", "v").unwrap();
        assert!(prefs.path().is_none());
        assert_eq!(prefs.get("k"), Some("v"));
    }
}
