//! Run-level import: read every report of a manifest, then merge.
//!
//! Reading is per report; merging happens once for the whole run, inside a
//! single transaction, so tie-breaks see every row of every report.

use std::io::Read;

use rusqlite::Connection;
use thiserror::Error;
use viewdb_catalog::manifest::ReportManifest;
use viewdb_catalog::types::*;
use viewdb_db::operations::{self, OperationError};
use viewdb_db::EntityStore;

use crate::accumulator::RunAccumulator;
use crate::merge::{MergeStats, merge_groups};
use crate::normalize::{Columns, normalize};
use crate::progress::ImportProgress;
use crate::source::{CsvReportSource, ReportMetadata};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

/// Statistics from reading a single report.
#[derive(Debug, Default, Clone)]
pub struct ImportStats {
    pub report_name: String,
    pub rows_read: u64,
    pub rows_accepted: u64,
    pub rows_dropped: u64,
}

/// Statistics from a whole run.
#[derive(Debug, Default)]
pub struct RunStats {
    pub reports: Vec<ImportStats>,
    pub merge: MergeStats,
}

impl RunStats {
    pub fn rows_read(&self) -> u64 {
        self.reports.iter().map(|r| r.rows_read).sum()
    }

    pub fn rows_dropped(&self) -> u64 {
        self.reports.iter().map(|r| r.rows_dropped).sum()
    }
}

/// Read one report into the run accumulator.
///
/// Rows that can't be normalized or identified are counted and dropped.
pub fn read_report<R: Read>(
    source: CsvReportSource<R>,
    acc: &mut RunAccumulator,
    progress: Option<&dyn ImportProgress>,
) -> ImportStats {
    let metadata = source.metadata().clone();
    let columns = Columns::resolve(metadata.kind, &metadata.columns);
    let mut stats = ImportStats {
        report_name: metadata.name.clone(),
        ..Default::default()
    };

    for (i, record) in source.into_records().enumerate() {
        stats.rows_read += 1;

        let accepted = match normalize(&record, &metadata, &columns) {
            Some(row) => acc.push(row).is_ok(),
            None => {
                log::debug!("Dropping row {} of {}: no reporting period", i + 1, metadata.name);
                false
            }
        };
        if accepted {
            stats.rows_accepted += 1;
        } else {
            stats.rows_dropped += 1;
        }

        if let Some(p) = progress {
            p.on_row(i + 1, &metadata.name);
        }
    }

    log::info!(
        "{}: {} rows read, {} accepted, {} dropped",
        stats.report_name,
        stats.rows_read,
        stats.rows_accepted,
        stats.rows_dropped
    );
    stats
}

/// Record one report's statistics in the import log.
pub fn log_import(
    conn: &Connection,
    metadata: &ReportMetadata,
    stats: &ImportStats,
) -> Result<i64, ImportError> {
    let now = chrono::Utc::now().to_rfc3339();
    let log_entry = ImportLog {
        id: 0,
        report_name: metadata.name.clone(),
        report_kind: metadata.kind.as_str().to_string(),
        source_path: metadata.source.display().to_string(),
        imported_at: now,
        rows_read: stats.rows_read as i64,
        rows_accepted: stats.rows_accepted as i64,
        rows_dropped: stats.rows_dropped as i64,
    };
    let id = operations::insert_import_log(conn, &log_entry)?;
    Ok(id)
}

/// Import every report in the manifest and merge the results.
pub fn import_manifest(
    conn: &Connection,
    manifest: &ReportManifest,
    progress: Option<&dyn ImportProgress>,
) -> Result<RunStats, ImportError> {
    let mut acc = RunAccumulator::new();
    let mut read = Vec::with_capacity(manifest.reports.len());

    for entry in &manifest.reports {
        if let Some(p) = progress {
            p.on_phase(&format!("Reading {}", entry.name));
        }
        let source = CsvReportSource::open(entry)?;
        let metadata = source.metadata().clone();
        let stats = read_report(source, &mut acc, progress);
        read.push((metadata, stats));
    }

    if let Some(p) = progress {
        p.on_phase(&format!(
            "Merging {} movie and {} season groups",
            acc.movie_group_count(),
            acc.season_group_count()
        ));
    }

    let tx = conn.unchecked_transaction()?;
    let store: &Connection = &tx;
    let merge = merge_groups(store, &acc.into_groups())?;
    for (metadata, stats) in &read {
        log_import(&tx, metadata, stats)?;
    }
    tx.commit()?;

    let run = RunStats {
        reports: read.into_iter().map(|(_, stats)| stats).collect(),
        merge,
    };
    if let Some(p) = progress {
        p.on_complete(&format!(
            "Imported {} reports ({} rows, {} dropped)",
            run.reports.len(),
            run.rows_read(),
            run.rows_dropped()
        ));
    }
    Ok(run)
}

/// Merge already-normalized rows straight into a store.
///
/// Unidentifiable rows are skipped; their count is logged.
pub fn merge_rows<S: EntityStore + ?Sized>(
    store: &S,
    rows: impl IntoIterator<Item = ReportRow>,
) -> Result<MergeStats, ImportError> {
    let mut acc = RunAccumulator::new();
    let dropped = rows
        .into_iter()
        .map(|row| acc.push(row))
        .filter(Result::is_err)
        .count();
    if dropped > 0 {
        log::info!("Skipped {dropped} unidentifiable rows");
    }
    merge_groups(store, &acc.into_groups())
}
