//! Create the fluxdb database.
//!
//! `fluxdb init` creates `~/.fluxdb/data/wp-fluxc.db` (or the path given
//! by `--db` / `FLUXDB_DB`) directly at the latest schema version, with
//! the tables of every active add-on. When `FLUXDB_TEST_DB=1` is set the
//! file goes to `~/.fluxdb/test/` instead.

use crate::config::resolve_db_path;
use crate::error::{Error, Result};
use crate::model::AddOnSet;
use crate::storage::{schema, FluxDatabase, OpenOutcome, DB_VERSION};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct InitOutput<'a> {
    database: PathBuf,
    version: u32,
    tables: usize,
    addons: &'a AddOnSet,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    dry_run: bool,
}

/// Execute the init command.
///
/// # Errors
///
/// Returns `AlreadyInitialized` if the file exists and `force` is not set,
/// or an error if the directory or database cannot be created.
pub fn execute(db_path: Option<&Path>, addons: &AddOnSet, force: bool, json: bool) -> Result<()> {
    let db_path = resolve_db_path(db_path)
        .ok_or_else(|| Error::Config("Could not determine the home directory".to_string()))?;

    if db_path.exists() && !force {
        return Err(Error::AlreadyInitialized { path: db_path });
    }

    if crate::is_dry_run() {
        let output = InitOutput {
            tables: schema::active_catalog(addons).count(),
            database: db_path,
            version: DB_VERSION,
            addons,
            dry_run: true,
        };
        if json {
            println!("{}", serde_json::to_string(&output)?);
        } else {
            println!(
                "Would create {} at version {} ({} tables)",
                output.database.display(),
                output.version,
                output.tables
            );
        }
        return Ok(());
    }

    if let Some(dir) = db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    if force {
        remove_database_files(&db_path)?;
    }

    let db = FluxDatabase::open(&db_path, addons.clone())?;
    let tables = match db.opened() {
        OpenOutcome::Created { tables, .. } => *tables,
        _ => db.snapshot()?.len(),
    };

    if json {
        let output = InitOutput {
            database: db_path,
            version: db.schema_version()?,
            tables,
            addons,
            dry_run: false,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("Initialized fluxdb database");
        println!("  Database: {}", db_path.display());
        println!("  Version:  {}", db.schema_version()?);
        println!("  Tables:   {tables}");
        println!("  Add-ons:  {addons}");
    }

    Ok(())
}

/// Remove the database file and its journal side files, if present.
fn remove_database_files(db_path: &Path) -> Result<()> {
    let mut paths = vec![db_path.to_path_buf()];
    for suffix in ["-journal", "-wal", "-shm"] {
        let mut side = db_path.as_os_str().to_owned();
        side.push(suffix);
        paths.push(PathBuf::from(side));
    }

    for path in paths.iter().filter(|p| p.exists()) {
        fs::remove_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AddOn;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_latest_database() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("wp-fluxc.db");

        execute(Some(&path), &AddOnSet::all(), false, true).unwrap();
        assert!(path.exists());

        let info = FluxDatabase::inspect(&path).unwrap();
        assert_eq!(info.version, DB_VERSION);
        assert!(info.snapshot.columns("WCOrderModel").is_some());
    }

    #[test]
    fn test_init_fails_if_already_initialized() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wp-fluxc.db");

        execute(Some(&path), &AddOnSet::none(), false, true).unwrap();
        let result = execute(Some(&path), &AddOnSet::none(), false, true);
        assert!(matches!(result, Err(Error::AlreadyInitialized { .. })));
    }

    #[test]
    fn test_init_force_recreates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wp-fluxc.db");

        execute(Some(&path), &AddOnSet::none(), false, true).unwrap();
        assert!(FluxDatabase::inspect(&path).unwrap().snapshot.columns("WCOrderModel").is_none());

        let woo: AddOnSet = [AddOn::WooCommerce].into_iter().collect();
        execute(Some(&path), &woo, true, true).unwrap();
        assert!(FluxDatabase::inspect(&path).unwrap().snapshot.columns("WCOrderModel").is_some());
    }
}
