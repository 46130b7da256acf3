//! Versioned, add-on gated schema migrations.
//!
//! A step table is a static slice of [`MigrationStep`]s sorted by
//! version. The step registered at version `v` upgrades a database from
//! `v` to `v + 1`. Several steps may share a version; each is gated on
//! its own add-on.
//!
//! [`Migrator::run`] visits every version in `[old, new]` inside its own
//! transaction and records progress in `PRAGMA user_version` before
//! committing, so a failure leaves the database at the failed version
//! with everything before it committed.

use std::fmt;

use rusqlite::{Connection, Transaction, TransactionBehavior};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::PreferenceStores;
use crate::error::{Error, Result};
use crate::model::{AddOn, AddOnSet};

/// A one-time data backfill run inside a version's transaction.
pub type RunFn = fn(&Transaction<'_>, &mut MigrationContext) -> Result<()>;

/// What a step does to the database.
#[derive(Clone, Copy)]
pub enum Mutation {
    /// Statements executed in order.
    Sql(&'static [&'static str]),
    Run(RunFn),
}

impl fmt::Debug for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sql(stmts) => f.debug_tuple("Sql").field(&stmts.len()).finish(),
            Self::Run(_) => f.write_str("Run"),
        }
    }
}

/// A mutation registered at a schema version.
#[derive(Debug, Clone, Copy)]
pub struct MigrationStep {
    pub version: u32,
    pub addon: Option<AddOn>,
    pub mutation: Mutation,
}

impl MigrationStep {
    /// Ungated SQL step.
    #[must_use]
    pub const fn sql(version: u32, statements: &'static [&'static str]) -> Self {
        Self {
            version,
            addon: None,
            mutation: Mutation::Sql(statements),
        }
    }

    /// SQL step that only runs when `addon` is active.
    #[must_use]
    pub const fn addon(addon: AddOn, version: u32, statements: &'static [&'static str]) -> Self {
        Self {
            version,
            addon: Some(addon),
            mutation: Mutation::Sql(statements),
        }
    }

    /// Ungated data backfill.
    #[must_use]
    pub const fn run(version: u32, f: RunFn) -> Self {
        Self {
            version,
            addon: None,
            mutation: Mutation::Run(f),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self.mutation {
            Mutation::Sql(_) => "sql",
            Mutation::Run(_) => "run",
        }
    }

    /// Number of SQL statements, 0 for backfills.
    #[must_use]
    pub const fn statement_count(&self) -> usize {
        match self.mutation {
            Mutation::Sql(stmts) => stmts.len(),
            Mutation::Run(_) => 0,
        }
    }

    /// The version this step upgrades to.
    #[must_use]
    pub const fn target(&self) -> u32 {
        self.version + 1
    }
}

/// What a [`Mutation::Run`] step may touch besides the transaction.
#[derive(Debug, Clone, Default)]
pub struct MigrationContext {
    pub addons: AddOnSet,
    pub prefs: PreferenceStores,
}

impl MigrationContext {
    /// Context with in-memory preference stores.
    #[must_use]
    pub fn new(addons: AddOnSet) -> Self {
        Self {
            addons,
            prefs: PreferenceStores::in_memory(),
        }
    }

    #[must_use]
    pub fn with_preferences(addons: AddOnSet, prefs: PreferenceStores) -> Self {
        Self { addons, prefs }
    }
}

/// The fate of one visited step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub version: u32,
    pub target: u32,
    pub addon: Option<AddOn>,
    pub kind: &'static str,
    pub statements: usize,
}

impl StepOutcome {
    fn of(step: &MigrationStep) -> Self {
        Self {
            version: step.version,
            target: step.target(),
            addon: step.addon,
            kind: step.kind(),
            statements: step.statement_count(),
        }
    }
}

/// Steps executed and skipped by one run (or plan).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradeReport {
    pub from: u32,
    pub to: u32,
    pub applied: Vec<StepOutcome>,
    /// Gated steps whose add-on was inactive.
    pub skipped: Vec<StepOutcome>,
}

impl UpgradeReport {
    fn new(from: u32, to: u32) -> Self {
        Self {
            from,
            to,
            applied: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// Runs a sorted step table against a connection.
#[derive(Debug, Clone, Copy)]
pub struct Migrator<'a> {
    steps: &'a [MigrationStep],
}

impl<'a> Migrator<'a> {
    /// Wrap a step table, checking that it is sorted by version.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMigrationTable` at the first out-of-order step.
    pub fn new(steps: &'a [MigrationStep]) -> Result<Self> {
        if let Some(pair) = steps.windows(2).find(|w| w[0].version > w[1].version) {
            return Err(Error::InvalidMigrationTable {
                previous: pair[0].version,
                version: pair[1].version,
            });
        }
        Ok(Self { steps })
    }

    #[must_use]
    pub fn steps(&self) -> &'a [MigrationStep] {
        self.steps
    }

    /// Steps registered at exactly `version`, in registration order.
    #[must_use]
    pub fn steps_at(&self, version: u32) -> &'a [MigrationStep] {
        let start = self.steps.partition_point(|s| s.version < version);
        let end = self.steps.partition_point(|s| s.version <= version);
        &self.steps[start..end]
    }

    /// Highest registered version, if any.
    #[must_use]
    pub fn last_version(&self) -> Option<u32> {
        self.steps.last().map(|s| s.version)
    }

    /// What [`run`](Self::run) would do, without touching a database.
    ///
    /// # Errors
    ///
    /// Returns `InvalidVersionRange` if `old > new`.
    pub fn plan(&self, old: u32, new: u32, addons: &AddOnSet) -> Result<UpgradeReport> {
        check_range(old, new)?;
        let mut report = UpgradeReport::new(old, new);
        for version in old..=new {
            for step in self.steps_at(version) {
                if addons.allows(step.addon) {
                    report.applied.push(StepOutcome::of(step));
                } else {
                    report.skipped.push(StepOutcome::of(step));
                }
            }
        }
        Ok(report)
    }

    /// Apply every version in `[old, new]`, one transaction per version.
    ///
    /// Each transaction ends by setting `user_version` to
    /// `min(v + 1, new)`. On failure that version is rolled back and
    /// earlier versions stay committed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidVersionRange` if `old > new`, or `Migration` with
    /// the failing version and its cause.
    pub fn run(
        &self,
        conn: &mut Connection,
        old: u32,
        new: u32,
        ctx: &mut MigrationContext,
    ) -> Result<UpgradeReport> {
        check_range(old, new)?;
        info!(from = old, to = new, addons = %ctx.addons, "Upgrading database");

        let mut report = UpgradeReport::new(old, new);
        for version in old..=new {
            self.run_version(conn, version, new, ctx, &mut report)
                .map_err(|e| Error::Migration {
                    version,
                    source: Box::new(e),
                })?;
        }

        info!(
            to = new,
            applied = report.applied.len(),
            skipped = report.skipped.len(),
            "Upgrade complete"
        );
        Ok(report)
    }

    fn run_version(
        &self,
        conn: &mut Connection,
        version: u32,
        new: u32,
        ctx: &mut MigrationContext,
        report: &mut UpgradeReport,
    ) -> Result<()> {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        for step in self.steps_at(version) {
            match step.addon {
                Some(addon) => debug!("Migrating addon {} to version {}", addon, step.target()),
                None => debug!("Migrating to version {}", step.target()),
            }

            if !ctx.addons.allows(step.addon) {
                report.skipped.push(StepOutcome::of(step));
                continue;
            }

            match step.mutation {
                Mutation::Sql(statements) => {
                    for sql in statements {
                        tx.execute_batch(sql)?;
                    }
                }
                Mutation::Run(f) => f(&tx, ctx)?,
            }
            report.applied.push(StepOutcome::of(step));
        }

        tx.pragma_update(None, "user_version", (version + 1).min(new))?;
        tx.commit()?;
        Ok(())
    }
}

fn check_range(old: u32, new: u32) -> Result<()> {
    if old > new {
        return Err(Error::InvalidVersionRange { from: old, to: new });
    }
    Ok(())
}

/// Read `PRAGMA user_version`.
///
/// # Errors
///
/// Returns an error if the pragma cannot be read.
pub fn user_version(conn: &Connection) -> Result<u32> {
    let version: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}
