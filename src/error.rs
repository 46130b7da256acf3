//! Error types for fluxdb.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=db, 3=not found, 4=validation, 7=config, 8=io)
//! - Retryability flags for scripted callers
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for fluxdb operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
///
/// Each code maps to a SCREAMING_SNAKE string and a category-based
/// exit code. Scripts match on the string or on the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Database (exit 2)
    NotInitialized,
    AlreadyInitialized,
    DatabaseError,
    MigrationFailed,
    DowngradeUnsupported,
    InvalidMigrationTable,

    // Not found (exit 3)
    TableNotFound,

    // Validation (exit 4)
    InvalidArgument,
    InvalidVersionRange,
    UnknownAddOn,
    AddOnRequired,

    // Config (exit 7)
    ConfigError,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::AlreadyInitialized => "ALREADY_INITIALIZED",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::MigrationFailed => "MIGRATION_FAILED",
            Self::DowngradeUnsupported => "DOWNGRADE_UNSUPPORTED",
            Self::InvalidMigrationTable => "INVALID_MIGRATION_TABLE",
            Self::TableNotFound => "TABLE_NOT_FOUND",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::InvalidVersionRange => "INVALID_VERSION_RANGE",
            Self::UnknownAddOn => "UNKNOWN_ADDON",
            Self::AddOnRequired => "ADDON_REQUIRED",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::NotInitialized
            | Self::AlreadyInitialized
            | Self::DatabaseError
            | Self::MigrationFailed
            | Self::DowngradeUnsupported
            | Self::InvalidMigrationTable => 2,
            Self::TableNotFound => 3,
            Self::InvalidArgument
            | Self::InvalidVersionRange
            | Self::UnknownAddOn
            | Self::AddOnRequired => 4,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError => 8,
        }
    }

    /// Whether a caller should retry with corrected input.
    ///
    /// Migration failures are never retryable: a broken step needs a
    /// code fix, not another attempt.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::TableNotFound
                | Self::InvalidArgument
                | Self::InvalidVersionRange
                | Self::UnknownAddOn
                | Self::AddOnRequired
        )
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in fluxdb operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not initialized: run `fluxdb init` first")]
    NotInitialized,

    #[error("Already initialized at {path}")]
    AlreadyInitialized { path: PathBuf },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Migration at version {version} failed: {source}")]
    Migration {
        version: u32,
        #[source]
        source: Box<Error>,
    },

    #[error("Can't downgrade database from version {found} to {supported}")]
    Downgrade { found: u32, supported: u32 },

    #[error("Migration table is not sorted: version {version} follows {previous}")]
    InvalidMigrationTable { previous: u32, version: u32 },

    #[error("Invalid version range: {from} > {to}")]
    InvalidVersionRange { from: u32, to: u32 },

    #[error("Table not found: {name}")]
    TableNotFound { name: String, similar: Vec<String> },

    #[error("Unknown add-on: {name}")]
    UnknownAddOn {
        name: String,
        suggestion: Option<String>,
    },

    #[error("Add-on {addon} is not active")]
    AddOnRequired { addon: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotInitialized => ErrorCode::NotInitialized,
            Self::AlreadyInitialized { .. } => ErrorCode::AlreadyInitialized,
            Self::Database(_) => ErrorCode::DatabaseError,
            Self::Migration { .. } => ErrorCode::MigrationFailed,
            Self::Downgrade { .. } => ErrorCode::DowngradeUnsupported,
            Self::InvalidMigrationTable { .. } => ErrorCode::InvalidMigrationTable,
            Self::TableNotFound { .. } => ErrorCode::TableNotFound,
            Self::InvalidVersionRange { .. } => ErrorCode::InvalidVersionRange,
            Self::UnknownAddOn { .. } => ErrorCode::UnknownAddOn,
            Self::AddOnRequired { .. } => ErrorCode::AddOnRequired,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::NotInitialized => {
                Some("Run `fluxdb init` to create the database".to_string())
            }

            Self::AlreadyInitialized { path } => Some(format!(
                "Database already exists at {}. Use `--force` to recreate it.",
                path.display()
            )),

            Self::Migration { version, .. } => Some(format!(
                "The database is left at version {version}. \
                 Migrations are not retried; fix the step or run `fluxdb reset --force`."
            )),

            Self::Downgrade { found, .. } => Some(format!(
                "This database was written by a newer release (version {found}). \
                 Upgrade fluxdb or point `--db` at another file."
            )),

            Self::TableNotFound { similar, .. } => {
                if similar.is_empty() {
                    Some("Run `fluxdb schema` to list tables".to_string())
                } else {
                    Some(format!("Did you mean: {}?", similar.join(", ")))
                }
            }

            Self::UnknownAddOn { suggestion, .. } => {
                let valid = crate::model::AddOn::ALL
                    .iter()
                    .map(|a| a.name())
                    .collect::<Vec<_>>()
                    .join(", ");
                match suggestion {
                    Some(s) => Some(format!("Did you mean '{s}'? Valid add-ons: {valid}")),
                    None => Some(format!("Valid add-ons: {valid}. Synonyms: woocommerce, woo")),
                }
            }

            Self::AddOnRequired { addon } => Some(format!(
                "Enable it with `--addon {addon}` or FLUXDB_ADDONS={addon}"
            )),

            Self::InvalidArgument(msg) => {
                if msg.contains("--force") {
                    Some("This operation drops every table. Re-run with `--force`.".to_string())
                } else {
                    None
                }
            }

            Self::Database(_)
            | Self::InvalidMigrationTable { .. }
            | Self::InvalidVersionRange { .. }
            | Self::Io(_)
            | Self::Json(_)
            | Self::Config(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    ///
    /// Includes error code, message, retryability, exit code, and
    /// optional recovery hint.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_category() {
        assert_eq!(Error::NotInitialized.exit_code(), 2);
        assert_eq!(Error::Downgrade { found: 90, supported: 88 }.exit_code(), 2);
        assert_eq!(Error::InvalidVersionRange { from: 5, to: 3 }.exit_code(), 4);
        assert_eq!(Error::Config("x".to_string()).exit_code(), 7);
        assert_eq!(Error::Other("x".to_string()).exit_code(), 1);
    }

    #[test]
    fn test_migration_error_is_not_retryable() {
        let err = Error::Migration {
            version: 12,
            source: Box::new(Error::Other("boom".to_string())),
        };
        assert!(!err.error_code().is_retryable());
        assert!(err.to_string().contains("version 12"));
    }

    #[test]
    fn test_structured_json_includes_hint() {
        let json = Error::AddOnRequired {
            addon: "WC".to_string(),
        }
        .to_structured_json();

        assert_eq!(json["error"]["code"], "ADDON_REQUIRED");
        assert_eq!(json["error"]["exit_code"], 4);
        assert!(json["error"]["hint"].as_str().unwrap().contains("--addon WC"));
    }

    #[test]
    fn test_unknown_addon_hint_lists_names() {
        let hint = Error::UnknownAddOn {
            name: "shop".to_string(),
            suggestion: None,
        }
        .hint()
        .unwrap();
        assert!(hint.contains("WC"));
    }

    #[test]
    fn test_table_not_found_suggests_similar() {
        let err = Error::TableNotFound {
            name: "SiteModle".to_string(),
            similar: vec!["SiteModel".to_string()],
        };
        assert_eq!(err.exit_code(), 3);
        assert!(err.hint().unwrap().contains("SiteModel"));
    }
}
