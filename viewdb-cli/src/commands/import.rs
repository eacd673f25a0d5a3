use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use viewdb_catalog::ReportManifest;
use viewdb_db::Connection;
use viewdb_import::{ImportProgress, RunStats, import_manifest};

use crate::CliError;

/// Import and merge every report of a manifest. Returns the loaded manifest
/// so later stages can read its settings.
pub(crate) fn run_import(
    conn: &Connection,
    manifest_path: &Path,
    quiet: bool,
) -> Result<ReportManifest, CliError> {
    let manifest = super::load_manifest(manifest_path)?;

    log::info!(
        "{}",
        format!(
            "Importing {} report(s) from {}",
            manifest.reports.len(),
            manifest_path.display()
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );

    let progress = CliImportProgress::new(quiet);
    let run = import_manifest(conn, &manifest, Some(&progress)).map_err(|e| {
        progress.clear();
        log::error!(
            "  {} import failed",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
        );
        CliError::import(e.to_string())
    })?;

    print_summary(&run);
    Ok(manifest)
}

fn print_summary(run: &RunStats) {
    for report in &run.reports {
        log::info!(
            "  {} {}: {} rows, {} accepted, {} dropped",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            report.report_name.if_supports_color(Stdout, |t| t.bold()),
            report.rows_read,
            report.rows_accepted,
            report.rows_dropped,
        );
    }

    let m = &run.merge;
    crate::log_blank();
    log::info!("{}", "Import complete".if_supports_color(Stdout, |t| t.bold()));
    log::info!("  Movies: {} new, {} updated", m.movies_created, m.movies_updated);
    log::info!("  Seasons: {} new, {} updated", m.seasons_created, m.seasons_updated);
    log::info!("  TV shows: {} new, {} updated", m.tv_shows_created, m.tv_shows_updated);
    log::info!(
        "  View summaries: {} new, {} updated",
        m.summaries_appended,
        m.summaries_updated
    );
    if m.conflicts > 0 {
        log::info!("  Conflicting values (latest period kept): {}", m.conflicts);
    }
}

/// CLI progress reporter backed by a spinner.
struct CliImportProgress {
    pb: ProgressBar,
}

impl CliImportProgress {
    fn new(quiet: bool) -> Self {
        let pb = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        let style = ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("/-\\|");
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    fn clear(&self) {
        self.pb.finish_and_clear();
    }
}

impl ImportProgress for CliImportProgress {
    fn on_row(&self, current: usize, report: &str) {
        if current.is_multiple_of(250) {
            self.pb.set_message(format!(
                "{} [{} rows]",
                report.if_supports_color(Stdout, |t| t.dimmed()),
                current
            ));
        }
    }

    fn on_phase(&self, message: &str) {
        self.pb.set_message(message.to_string());
        self.pb.suspend(|| log::debug!("{}", message));
    }

    fn on_complete(&self, message: &str) {
        self.pb.finish_and_clear();
        log::info!("{}", message);
    }
}
