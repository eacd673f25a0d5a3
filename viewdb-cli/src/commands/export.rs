use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use viewdb_db::Connection;
use viewdb_export::{Dialect, ExportOptions, export_database};

use crate::CliError;
use crate::cli_types::ExportArgs;

/// Resolve the `--dialect` list; all dialects when omitted.
pub(crate) fn parse_dialects(arg: Option<&str>) -> Result<Vec<Dialect>, CliError> {
    match arg {
        Some(list) => {
            let dialects = Dialect::parse_list(list).map_err(|e| CliError::export(e.to_string()))?;
            if dialects.is_empty() {
                return Err(CliError::export("no dialects given"));
            }
            Ok(dialects)
        }
        None => Ok(Dialect::ALL.to_vec()),
    }
}

/// Write one dump per dialect.
pub(crate) fn run_export(
    conn: &Connection,
    args: &ExportArgs,
    dialects: &[Dialect],
) -> Result<(), CliError> {
    let options = ExportOptions {
        out_dir: args.out_dir.clone(),
        batch_size: args.batch_size,
        compress: !args.no_zip,
    };

    let artifacts =
        export_database(conn, dialects, &options).map_err(|e| CliError::export(e.to_string()))?;

    for artifact in &artifacts {
        let target = artifact.zip_path.as_ref().unwrap_or(&artifact.sql_path);
        log::info!(
            "  {} {:<10} {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            artifact.dialect.name(),
            target.display(),
        );
    }
    Ok(())
}
