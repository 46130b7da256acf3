//! Command implementations.

pub mod completions;
pub mod init;
pub mod migrate;
pub mod orders;
pub mod reset;
pub mod schema;
pub mod status;
pub mod steps;
pub mod version;

use crate::config::resolve_db_path;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Resolve the database path and require that the file exists.
pub(crate) fn existing_db_path(db_path: Option<&Path>) -> Result<PathBuf> {
    let db_path = resolve_db_path(db_path).ok_or(Error::NotInitialized)?;

    if !db_path.exists() {
        return Err(Error::NotInitialized);
    }
    Ok(db_path)
}
