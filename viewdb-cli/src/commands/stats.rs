use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

pub(crate) fn run_stats(db_path: &Path) -> Result<(), CliError> {
    if !db_path.exists() {
        log::warn!("No catalog database found at {}", db_path.display());
        log::info!("Run 'viewdb import --manifest <file>' to create one.");
        return Ok(());
    }

    let conn = super::open_db(db_path)?;
    let stats = viewdb_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;
    let latest = viewdb_db::latest_period_end(&conn, viewdb_catalog::SummaryDuration::Weekly)
        .map_err(|e| CliError::database(format!("Failed to query latest period: {}", e)))?;

    log::info!(
        "{}",
        "Catalog Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Movies:          {:>8}", stats.movies);
    log::info!("  TV shows:        {:>8}", stats.tv_shows);
    log::info!(
        "  Seasons:         {:>8} ({} without a show)",
        stats.seasons,
        stats.orphan_seasons
    );
    log::info!(
        "  View summaries:  {:>8} ({} weekly)",
        stats.view_summaries,
        stats.weekly_summaries
    );
    log::info!("  Reports imported:{:>8}", stats.imports);
    if let Some(end) = latest {
        log::info!("  Latest week:     {:>8}", end);
    }

    let recent = viewdb_db::list_import_logs(&conn, 5)
        .map_err(|e| CliError::database(format!("Failed to list imports: {}", e)))?;
    if !recent.is_empty() {
        crate::log_blank();
        log::info!("{}", "Recent imports".if_supports_color(Stdout, |t| t.bold()));
        for entry in recent {
            log::info!(
                "  {} {} ({} rows, {} dropped)",
                entry.imported_at.if_supports_color(Stdout, |t| t.dimmed()),
                entry.report_name,
                entry.rows_read,
                entry.rows_dropped,
            );
        }
    }

    Ok(())
}
