//! Reset command implementation.

use crate::cli::commands::existing_db_path;
use crate::error::{Error, Result};
use crate::model::AddOnSet;
use crate::storage::{schema, FluxDatabase};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct ResetOutput {
    database: PathBuf,
    dry_run: bool,
    tables: Vec<&'static str>,
}

/// Execute the reset command.
///
/// Drops and recreates every catalog table of the active add-ons.
/// `--dry-run` lists the tables without touching the file.
///
/// # Errors
///
/// Returns `InvalidArgument` without `--force` (unless previewing), or an
/// error if the database cannot be opened or reset.
pub fn execute(db_path: Option<&Path>, addons: &AddOnSet, force: bool, json: bool) -> Result<()> {
    let db_path = existing_db_path(db_path)?;
    let dry_run = crate::is_dry_run();

    if !force && !dry_run {
        return Err(Error::InvalidArgument(
            "reset drops every table and its data; pass --force to confirm".to_string(),
        ));
    }

    let tables: Vec<&'static str> = schema::active_catalog(addons).map(|t| t.name).collect();

    if !dry_run {
        let mut db = FluxDatabase::open(&db_path, addons.clone())?;
        db.reset()?;
    }

    if crate::is_csv() {
        println!("table");
        for table in &tables {
            println!("{table}");
        }
    } else if json {
        let output = ResetOutput {
            database: db_path,
            dry_run,
            tables,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else if dry_run {
        println!("Would drop and recreate {} tables:", tables.len());
        for table in &tables {
            println!("  {table}");
        }
    } else {
        println!("Reset {} tables in {}", tables.len(), db_path.display());
    }

    Ok(())
}
