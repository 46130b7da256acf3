//! Status command implementation.

use crate::cli::commands::existing_db_path;
use crate::error::Result;
use crate::model::AddOnSet;
use crate::storage::{FluxDatabase, DB_VERSION};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Output for status command.
#[derive(Serialize)]
struct StatusOutput<'a> {
    database: PathBuf,
    version: u32,
    latest_version: u32,
    pending_versions: u32,
    newer_than_supported: bool,
    addons: &'a AddOnSet,
    table_count: usize,
    fingerprint: String,
}

/// Execute status command.
///
/// Reads the file read-only; nothing is created or upgraded.
///
/// # Errors
///
/// Returns `NotInitialized` if the database file does not exist.
pub fn execute(db_path: Option<&Path>, addons: &AddOnSet, json: bool) -> Result<()> {
    let db_path = existing_db_path(db_path)?;
    let info = FluxDatabase::inspect(&db_path)?;

    let output = StatusOutput {
        database: db_path,
        version: info.version,
        latest_version: DB_VERSION,
        pending_versions: DB_VERSION.saturating_sub(info.version),
        newer_than_supported: info.version > DB_VERSION,
        addons,
        table_count: info.snapshot.len(),
        fingerprint: info.snapshot.fingerprint()?,
    };

    if json {
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!("fluxdb Status");
    println!("=============");
    println!();
    println!("Database: {}", output.database.display());

    let version_line = format!("{} (latest {})", output.version, output.latest_version);
    if output.version == 0 {
        println!("Version:  {}", "not created".yellow());
    } else if output.newer_than_supported {
        println!("Version:  {} newer than supported", version_line.as_str().red());
    } else if output.pending_versions > 0 {
        println!(
            "Version:  {} {} pending",
            version_line.as_str().yellow(),
            output.pending_versions
        );
    } else {
        println!("Version:  {}", version_line.as_str().green());
    }

    println!("Add-ons:  {}", output.addons);
    println!("Tables:   {}", output.table_count);
    println!("Schema:   {}", &output.fingerprint[..12]);

    if output.pending_versions > 0 {
        println!();
        println!("Run 'fluxdb migrate' to upgrade.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_status_requires_database() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.db");
        let result = execute(Some(&missing), &AddOnSet::none(), true);
        assert!(matches!(result, Err(Error::NotInitialized)));
    }

    #[test]
    fn test_status_on_fresh_database() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wp-fluxc.db");
        FluxDatabase::open(&path, AddOnSet::none()).unwrap();

        assert!(execute(Some(&path), &AddOnSet::none(), true).is_ok());
        assert!(execute(Some(&path), &AddOnSet::none(), false).is_ok());
    }
}
