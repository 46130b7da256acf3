//! Migrate command implementation.

use crate::cli::commands::existing_db_path;
use crate::error::{Error, Result};
use crate::model::AddOnSet;
use crate::storage::{schema, FluxDatabase, Migrator, OpenOutcome, UpgradeReport, DB_VERSION, STEPS};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct MigrateOutput {
    database: PathBuf,
    dry_run: bool,
    outcome: OpenOutcome,
}

/// Execute the migrate command.
///
/// Opening the database performs the upgrade. With `--dry-run` the file
/// is only inspected and the planned steps are printed.
///
/// # Errors
///
/// Returns `NotInitialized` if the file is missing, `Downgrade` if it is
/// newer than this build, or `Migration` if a step fails.
pub fn execute(db_path: Option<&Path>, addons: &AddOnSet, json: bool) -> Result<()> {
    let db_path = existing_db_path(db_path)?;
    let dry_run = crate::is_dry_run();

    let outcome = if dry_run {
        plan(&db_path, addons)?
    } else {
        FluxDatabase::open(&db_path, addons.clone())?.opened().clone()
    };

    if crate::is_csv() {
        println!("version,target,addon,kind,statements,applied");
        if let OpenOutcome::Upgraded(report) = &outcome {
            print_report_csv(report);
        }
    } else if json {
        let output = MigrateOutput {
            database: db_path,
            dry_run,
            outcome,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        print_outcome(&outcome, dry_run);
    }

    Ok(())
}

/// What opening the file would do, computed without writing.
fn plan(db_path: &Path, addons: &AddOnSet) -> Result<OpenOutcome> {
    let info = FluxDatabase::inspect(db_path)?;
    match info.version {
        0 => Ok(OpenOutcome::Created {
            version: DB_VERSION,
            tables: schema::active_catalog(addons).count(),
        }),
        v if v < DB_VERSION => Ok(OpenOutcome::Upgraded(
            Migrator::new(STEPS)?.plan(v, DB_VERSION, addons)?,
        )),
        v if v == DB_VERSION => Ok(OpenOutcome::Current { version: v }),
        v => Err(Error::Downgrade {
            found: v,
            supported: DB_VERSION,
        }),
    }
}

fn print_outcome(outcome: &OpenOutcome, dry_run: bool) {
    let verb = |done: &'static str, planned: &'static str| if dry_run { planned } else { done };

    match outcome {
        OpenOutcome::Created { version, tables } => {
            println!(
                "{} database at version {version} ({tables} tables)",
                verb("Created", "Would create")
            );
        }
        OpenOutcome::Current { version } => {
            println!("Database is up to date (version {version})");
        }
        OpenOutcome::Upgraded(report) => {
            println!(
                "{} from version {} to {}: {} steps applied, {} skipped",
                verb("Upgraded", "Would upgrade"),
                report.from,
                report.to,
                report.applied.len(),
                report.skipped.len()
            );
            for step in &report.applied {
                println!(
                    "  {} {:>2} -> {:<2} {} ({} statements)",
                    "✓".green(),
                    step.version,
                    step.target,
                    step.kind,
                    step.statements
                );
            }
            for step in &report.skipped {
                let addon = step.addon.map_or("-", |a| a.name());
                println!(
                    "  {} {:>2} -> {:<2} skipped, add-on {addon} inactive",
                    "·".dimmed(),
                    step.version,
                    step.target
                );
            }
        }
    }
}

fn print_report_csv(report: &UpgradeReport) {
    let rows = report
        .applied
        .iter()
        .map(|s| (s, true))
        .chain(report.skipped.iter().map(|s| (s, false)));
    for (step, applied) in rows {
        println!(
            "{},{},{},{},{},{}",
            step.version,
            step.target,
            step.addon.map_or("", |a| a.name()),
            step.kind,
            step.statements,
            applied
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;
    use tempfile::TempDir;

    #[test]
    fn test_plan_does_not_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wp-fluxc.db");
        {
            let conn = Connection::open(&path).unwrap();
            schema::create_baseline(&conn).unwrap();
        }

        let outcome = plan(&path, &AddOnSet::none()).unwrap();
        let OpenOutcome::Upgraded(report) = outcome else {
            panic!("expected an upgrade plan");
        };
        assert_eq!(report.from, 1);
        assert!(!report.skipped.is_empty());
        assert_eq!(FluxDatabase::inspect(&path).unwrap().version, 1);
    }

    #[test]
    fn test_plan_refuses_newer_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wp-fluxc.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.pragma_update(None, "user_version", DB_VERSION + 1).unwrap();
        }

        let err = plan(&path, &AddOnSet::none()).unwrap_err();
        assert!(matches!(err, Error::Downgrade { .. }));
    }

    #[test]
    fn test_execute_upgrades_baseline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wp-fluxc.db");
        {
            let conn = Connection::open(&path).unwrap();
            schema::create_baseline(&conn).unwrap();
        }

        execute(Some(&path), &AddOnSet::all(), true).unwrap();
        assert_eq!(FluxDatabase::inspect(&path).unwrap().version, DB_VERSION);
    }
}
