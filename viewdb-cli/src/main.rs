//! viewdb CLI
//!
//! Command-line interface for turning streaming engagement reports into a
//! portable SQL database.

mod cli_types;
mod commands;
mod error;
mod logging;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use cli_types::{Cli, Commands};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.quiet, cli.verbose);

    let db_path = cli.db.unwrap_or_else(commands::default_db_path);

    let result = match cli.command {
        Commands::Import { manifest } => commands::open_db(&db_path)
            .and_then(|conn| commands::import::run_import(&conn, &manifest, cli.quiet))
            .map(|_| ()),
        Commands::Verify {
            expect_period_end,
            manifest,
        } => run_verify(&db_path, expect_period_end, manifest.as_deref()),
        Commands::Export { export } => commands::export::parse_dialects(export.dialect.as_deref())
            .and_then(|dialects| {
                let conn = commands::open_db(&db_path)?;
                commands::export::run_export(&conn, &export, &dialects)
            }),
        Commands::Build {
            manifest,
            expect_period_end,
            export,
        } => commands::build::run_build(&db_path, &manifest, expect_period_end, &export, cli.quiet),
        Commands::Stats => commands::stats::run_stats(&db_path),
    };

    if let Err(e) = result {
        log::error!("{} {}", "Error:".if_supports_color(Stderr, |t| t.red()), e);
        std::process::exit(1);
    }
}

fn run_verify(
    db_path: &std::path::Path,
    expect_period_end: Option<chrono::NaiveDate>,
    manifest: Option<&std::path::Path>,
) -> Result<(), CliError> {
    let settings = manifest
        .map(commands::load_manifest)
        .transpose()?
        .map(|m| m.verify);
    let conn = commands::open_db(db_path)?;
    commands::verify::run_verify(&conn, expect_period_end, settings.as_ref())
}

/// Emit an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}
