//! Schema command implementation.
//!
//! Lists the tables and columns of the database file, or with
//! `--canonical` the latest-version `CREATE TABLE` statements of the
//! catalog for the active add-ons.

use crate::cli::commands::existing_db_path;
use crate::error::{Error, Result};
use crate::model::AddOnSet;
use crate::storage::{schema, FluxDatabase, TableDef};
use crate::validate::find_similar_names;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct TableOutput<'a> {
    name: &'a str,
    columns: &'a [String],
}

#[derive(Serialize)]
struct CanonicalOutput {
    name: &'static str,
    addon: Option<&'static str>,
    create: &'static str,
}

/// Execute the schema command.
///
/// # Errors
///
/// Returns `TableNotFound` if `--table` names an unknown table, or
/// `NotInitialized` if the file is missing (without `--canonical`).
pub fn execute(
    db_path: Option<&Path>,
    addons: &AddOnSet,
    table: Option<&str>,
    canonical: bool,
    json: bool,
) -> Result<()> {
    if canonical {
        return execute_canonical(addons, table, json);
    }

    let db_path = existing_db_path(db_path)?;
    let info = FluxDatabase::inspect(&db_path)?;

    let tables: Vec<TableOutput<'_>> = match table {
        Some(name) => {
            let (found, columns) = info
                .snapshot
                .iter()
                .find(|(t, _)| t.eq_ignore_ascii_case(name))
                .ok_or_else(|| table_not_found(name, info.snapshot.tables()))?;
            vec![TableOutput {
                name: found,
                columns,
            }]
        }
        None => info
            .snapshot
            .iter()
            .map(|(name, columns)| TableOutput { name, columns })
            .collect(),
    };

    if crate::is_csv() {
        println!("table,column");
        for t in &tables {
            for column in t.columns {
                println!("{},{}", t.name, column);
            }
        }
    } else if json {
        println!("{}", serde_json::to_string(&tables)?);
    } else {
        for t in &tables {
            println!("{} ({} columns)", t.name.bold(), t.columns.len());
            println!("  {}", t.columns.join(", "));
        }
    }

    Ok(())
}

fn execute_canonical(addons: &AddOnSet, table: Option<&str>, json: bool) -> Result<()> {
    let defs: Vec<&'static TableDef> = match table {
        Some(name) => {
            let def = schema::find_table(name).ok_or_else(|| {
                table_not_found(name, schema::CATALOG.iter().map(|t| t.name))
            })?;
            vec![def]
        }
        None => schema::active_catalog(addons).collect(),
    };

    let output: Vec<CanonicalOutput> = defs
        .iter()
        .map(|t| CanonicalOutput {
            name: t.name,
            addon: t.addon.map(|a| a.name()),
            create: t.create,
        })
        .collect();

    if crate::is_csv() {
        println!("table,addon,create");
        for t in &output {
            println!(
                "{},{},{}",
                t.name,
                t.addon.unwrap_or(""),
                crate::csv_escape(t.create)
            );
        }
    } else if json {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        for t in &output {
            println!("{};", t.create);
        }
    }

    Ok(())
}

fn table_not_found<'a>(name: &str, existing: impl Iterator<Item = &'a str>) -> Error {
    let existing: Vec<String> = existing.map(str::to_string).collect();
    Error::TableNotFound {
        name: name.to_string(),
        similar: find_similar_names(name, &existing, 3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_unknown_table_suggests_similar() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wp-fluxc.db");
        FluxDatabase::open(&path, AddOnSet::none()).unwrap();

        let err = execute(Some(&path), &AddOnSet::none(), Some("SiteModle"), false, true)
            .unwrap_err();
        match err {
            Error::TableNotFound { similar, .. } => assert!(similar.contains(&"SiteModel".to_string())),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_canonical_needs_no_database() {
        assert!(execute(None, &AddOnSet::all(), Some("wcrefunds"), true, true).is_ok());
        assert!(execute(None, &AddOnSet::none(), None, true, false).is_ok());
    }
}
