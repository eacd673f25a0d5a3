use std::path::Path;

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::cli_types::ExportArgs;

/// Full pipeline: import, verify, export. Nothing is exported when the
/// verification step fails.
pub(crate) fn run_build(
    db_path: &Path,
    manifest_path: &Path,
    expect_period_end: Option<NaiveDate>,
    export: &ExportArgs,
    quiet: bool,
) -> Result<(), CliError> {
    // Reject bad dialect names before touching anything.
    let dialects = super::export::parse_dialects(export.dialect.as_deref())?;
    let conn = super::open_db(db_path)?;

    let manifest = super::import::run_import(&conn, manifest_path, quiet)?;

    crate::log_blank();
    log::info!("{}", "Verifying".if_supports_color(Stdout, |t| t.bold()));
    super::verify::run_verify(&conn, expect_period_end, Some(&manifest.verify))?;

    crate::log_blank();
    log::info!("{}", "Exporting".if_supports_color(Stdout, |t| t.bold()));
    super::export::run_export(&conn, export, &dialects)?;

    log::info!("  Database: {}", db_path.display());
    Ok(())
}
