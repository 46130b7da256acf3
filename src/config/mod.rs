//! Configuration management.
//!
//! fluxdb has no config file. Everything is resolved from command-line
//! flags and environment variables:
//! - **Database**: `~/.fluxdb/data/wp-fluxc.db` unless overridden
//! - **Add-ons**: `--addon` flags, then `FLUXDB_ADDONS`
//! - **Preferences**: `prefs/` beside the database file

mod preferences;

pub use preferences::{
    PreferenceStores, Preferences, ACCOUNT_TOKEN_PREF_KEY, DEFAULT_PREFS_FILE, FLUXC_PREFS_FILE,
};

use crate::error::Result;
use crate::model::AddOnSet;
use crate::storage::DB_NAME;

use std::path::{Path, PathBuf};

/// Get the global fluxdb directory location (`~/.fluxdb/`).
#[must_use]
pub fn global_fluxdb_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".fluxdb"))
}

/// Check if test mode is enabled.
///
/// Test mode is enabled by setting `FLUXDB_TEST_DB=1` (or any non-empty
/// value other than `0` / `false`).
#[must_use]
pub fn is_test_mode() -> bool {
    std::env::var("FLUXDB_TEST_DB")
        .map(|v| is_truthy(&v))
        .unwrap_or(false)
}

fn is_truthy(value: &str) -> bool {
    !value.is_empty() && value != "0" && !value.eq_ignore_ascii_case("false")
}

/// Database file name, e.g. `wp-fluxc.db`.
#[must_use]
pub fn db_file_name() -> String {
    format!("{DB_NAME}.db")
}

/// Get the test database path (`~/.fluxdb/test/wp-fluxc.db`).
#[must_use]
pub fn test_db_path() -> Option<PathBuf> {
    global_fluxdb_dir().map(|dir| dir.join("test").join(db_file_name()))
}

/// Resolve the database path.
///
/// Priority:
/// 1. If `explicit_path` is provided, use it directly
/// 2. `FLUXDB_TEST_DB` environment variable → uses test database
/// 3. `FLUXDB_DB` environment variable
/// 4. Global location: `~/.fluxdb/data/wp-fluxc.db`
#[must_use]
pub fn resolve_db_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    if is_test_mode() {
        return test_db_path();
    }

    if let Ok(db_path) = std::env::var("FLUXDB_DB") {
        if !db_path.trim().is_empty() {
            return Some(PathBuf::from(db_path));
        }
    }

    global_fluxdb_dir().map(|dir| dir.join("data").join(db_file_name()))
}

/// Resolve the active add-ons.
///
/// Explicit `--addon` values win. Otherwise `FLUXDB_ADDONS` is read as a
/// comma separated list. With neither, no add-on is active.
///
/// # Errors
///
/// Returns `UnknownAddOn` for any name that is not a known add-on.
pub fn resolve_addons(explicit: &[String]) -> Result<AddOnSet> {
    if !explicit.is_empty() {
        return AddOnSet::parse(explicit);
    }

    match std::env::var("FLUXDB_ADDONS") {
        Ok(value) if !value.trim().is_empty() => AddOnSet::parse(&[value]),
        _ => Ok(AddOnSet::none()),
    }
}

/// Directory holding the preference stores for a database file.
#[must_use]
pub fn prefs_dir(db_path: &Path) -> PathBuf {
    db_path
        .parent()
        .map_or_else(|| PathBuf::from("prefs"), |dir| dir.join("prefs"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AddOn;

    #[test]
    fn test_resolve_db_path_with_explicit() {
        let explicit = PathBuf::from("/custom/path/db.sqlite");
        let result = resolve_db_path(Some(&explicit));
        assert_eq!(result, Some(explicit));
    }

    #[test]
    fn test_global_fluxdb_dir_returns_some() {
        assert!(global_fluxdb_dir().is_some());
    }

    #[test]
    fn test_test_db_path_is_separate() {
        let global = global_fluxdb_dir().unwrap();
        let test = test_db_path().unwrap();

        assert!(test.to_string_lossy().contains("test"));
        assert!(test.ends_with("wp-fluxc.db"));
        assert_ne!(global.join("data").join("wp-fluxc.db"), test);
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(""));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("false"));
        assert!(!is_truthy("FALSE"));
        assert!(is_truthy("1"));
        assert!(is_truthy("yes"));
    }

    #[test]
    fn test_resolve_addons_explicit_wins() {
        let set = resolve_addons(&["woocommerce".to_string()]).unwrap();
        assert!(set.contains(AddOn::WooCommerce));
    }

    #[test]
    fn test_resolve_addons_rejects_unknown() {
        assert!(resolve_addons(&["nope".to_string()]).is_err());
    }

    #[test]
    fn test_prefs_dir_beside_database() {
        let dir = prefs_dir(Path::new("/data/app/wp-fluxc.db"));
        assert_eq!(dir, PathBuf::from("/data/app/prefs"));
    }
}
