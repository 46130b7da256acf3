//! SQLite storage layer for fluxdb.
//!
//! This module provides the persistence layer using SQLite with:
//! - Versioned schema in `PRAGMA user_version`
//! - One transaction per migrated version
//! - Add-on gated steps and tables
//!
//! # Submodules
//!
//! - [`migrations`] - Generic step runner
//! - [`steps`] - The `wp-fluxc` step table
//! - [`schema`] - Canonical catalog, baseline and snapshots
//! - [`sqlite`] - Database handle: open, reset, order list

pub mod migrations;
pub mod schema;
pub mod sqlite;
pub mod steps;

pub use migrations::{
    MigrationContext, MigrationStep, Migrator, Mutation, RunFn, StepOutcome, UpgradeReport,
};
pub use schema::{SchemaSnapshot, TableDef, CATALOG, DB_NAME, DB_VERSION};
pub use sqlite::{DatabaseInfo, FluxDatabase, OpenOutcome};
pub use steps::STEPS;
