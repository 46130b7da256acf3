//! Steps command implementation.

use crate::error::Result;
use crate::model::AddOnSet;
use crate::storage::{Migrator, StepOutcome, DB_VERSION, STEPS};
use serde::Serialize;

#[derive(Serialize)]
struct StepsOutput {
    latest_version: u32,
    count: usize,
    steps: Vec<StepRow>,
}

#[derive(Serialize)]
struct StepRow {
    #[serde(flatten)]
    step: StepOutcome,
    active: bool,
}

/// Execute the steps command.
///
/// Lists every registered step at or above `from`, marking gated steps
/// whose add-on is not active.
///
/// # Errors
///
/// Returns an error if the step table is unsorted or JSON fails.
pub fn execute(addons: &AddOnSet, from: Option<u32>, json: bool) -> Result<()> {
    let migrator = Migrator::new(STEPS)?;
    let from = from.unwrap_or(0);

    // A plan over every version with all add-ons lists each step once.
    let report = migrator.plan(from, DB_VERSION.max(from), &AddOnSet::all())?;
    let steps: Vec<StepRow> = report
        .applied
        .into_iter()
        .map(|step| StepRow {
            active: addons.allows(step.addon),
            step,
        })
        .collect();

    if crate::is_csv() {
        println!("version,target,addon,kind,statements,active");
        for row in &steps {
            println!(
                "{},{},{},{},{},{}",
                row.step.version,
                row.step.target,
                row.step.addon.map_or("", |a| a.name()),
                row.step.kind,
                row.step.statements,
                row.active
            );
        }
    } else if json {
        let output = StepsOutput {
            latest_version: DB_VERSION,
            count: steps.len(),
            steps,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else if steps.is_empty() {
        println!("No steps at or above version {from}.");
    } else {
        println!("Migration steps ({} found, latest version {DB_VERSION}):", steps.len());
        println!();
        for row in &steps {
            let addon = row.step.addon.map_or("", |a| a.name());
            let marker = if row.active { " " } else { "-" };
            println!(
                "{marker} {:>2} -> {:<2}  {:<3} {:<4} {} statements",
                row.step.version, row.step.target, addon, row.step.kind, row.step.statements
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_lists_from_version() {
        assert!(execute(&AddOnSet::none(), Some(80), true).is_ok());
        assert!(execute(&AddOnSet::none(), Some(500), false).is_ok());
    }
}
