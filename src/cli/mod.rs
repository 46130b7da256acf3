//! CLI definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for list/query commands.
#[derive(ValueEnum, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table (default)
    #[default]
    Table,
    /// JSON (same as --json)
    Json,
    /// Comma-separated values
    Csv,
}

pub mod commands;

/// fluxdb - versioned SQLite storage for WordPress and WooCommerce clients
#[derive(Parser, Debug)]
#[command(name = "fluxdb", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database path (default: ~/.fluxdb/data/wp-fluxc.db)
    #[arg(long, global = true, env = "FLUXDB_DB")]
    pub db: Option<PathBuf>,

    /// Activate an add-on (repeatable; e.g. WC). Falls back to FLUXDB_ADDONS
    #[arg(long = "addon", global = true, value_name = "NAME")]
    pub addons: Vec<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Output format (table, json, csv)
    #[arg(long, value_enum, global = true, default_value_t)]
    pub format: OutputFormat,

    /// Preview changes without writing to the database
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the database at the latest schema version
    Init {
        /// Delete and recreate an existing database
        #[arg(long)]
        force: bool,
    },

    /// Upgrade the database to the latest schema version
    Migrate,

    /// Drop and recreate every table (all data is lost)
    Reset {
        /// Confirm the reset
        #[arg(long)]
        force: bool,
    },

    /// Show schema version and table summary without upgrading
    Status,

    /// List tables and columns
    Schema {
        /// Only this table
        #[arg(long)]
        table: Option<String>,

        /// Print canonical CREATE statements instead of the file's schema
        #[arg(long)]
        canonical: bool,
    },

    /// List registered migration steps
    Steps {
        /// Only steps at or above this version
        #[arg(long)]
        from: Option<u32>,
    },

    /// Show the sectioned WooCommerce order list for a site
    Orders {
        /// Local site id (SiteModel._id)
        #[arg(long)]
        site: i64,

        /// Reference time for grouping, RFC 3339 (default: now)
        #[arg(long)]
        now: Option<String>,
    },

    /// Print version information
    Version,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_repeatable_addon_flag() {
        let cli = Cli::parse_from(["fluxdb", "--addon", "WC", "--addon", "woo", "status"]);
        assert_eq!(cli.addons, vec!["WC", "woo"]);
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["fluxdb", "reset", "--force", "--dry-run", "--format", "csv"]);
        assert!(cli.dry_run);
        assert_eq!(cli.format, OutputFormat::Csv);
        assert!(matches!(cli.command, Commands::Reset { force: true }));
    }
}
