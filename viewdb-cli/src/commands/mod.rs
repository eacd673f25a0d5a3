pub(crate) mod build;
pub(crate) mod export;
pub(crate) mod import;
pub(crate) mod stats;
pub(crate) mod verify;

use std::path::{Path, PathBuf};

use viewdb_db::Connection;

use crate::CliError;

/// Default catalog database location under the user cache directory.
pub(crate) fn default_db_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("viewdb")
        .join("viewdb.db")
}

/// Open (or create) the catalog database, creating its directory if needed.
pub(crate) fn open_db(db_path: &Path) -> Result<Connection, CliError> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    viewdb_db::open_database(db_path).map_err(|e| {
        CliError::database(format!(
            "Failed to open catalog database at {}: {}",
            db_path.display(),
            e
        ))
    })
}

pub(crate) fn load_manifest(path: &Path) -> Result<viewdb_catalog::ReportManifest, CliError> {
    viewdb_catalog::load_manifest(path).map_err(|e| CliError::manifest(e.to_string()))
}
