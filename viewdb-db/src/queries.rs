//! Read queries for the catalog database.
//!
//! Listings are ordered by surrogate id so exports are deterministic.

use chrono::NaiveDate;
use rusqlite::{Connection, params};
use viewdb_catalog::types::*;

use crate::operations::{
    OperationError, row_to_movie, row_to_season, row_to_tv_show, row_to_view_summary_record,
};

const VIEW_SUMMARY_COLUMNS: &str = "id, movie_id, season_id, start_date, end_date, duration,
    view_rank, hours_viewed, views, cumulative_weeks_in_top10";

// ── Entity Listings ─────────────────────────────────────────────────────────

/// List all movies in id order.
///
/// The returned movies carry no view summaries; use [`all_view_summaries`].
pub fn all_movies(conn: &Connection) -> Result<Vec<Movie>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, original_title, runtime, release_date, available_globally, locale
         FROM movie ORDER BY id",
    )?;
    let rows = stmt.query_map([], row_to_movie)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// List all TV shows in id order.
pub fn all_tv_shows(conn: &Connection) -> Result<Vec<TvShow>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, original_title, release_date, available_globally, locale
         FROM tv_show ORDER BY id",
    )?;
    let rows = stmt.query_map([], row_to_tv_show)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// List all seasons in id order, without view summaries.
pub fn all_seasons(conn: &Connection) -> Result<Vec<Season>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, tv_show_id, season_number, title, original_title, runtime, release_date
         FROM season ORDER BY id",
    )?;
    let rows = stmt.query_map([], row_to_season)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// List the seasons of one TV show, ordered by season number then id.
pub fn seasons_for_show(conn: &Connection, tv_show_id: i64) -> Result<Vec<Season>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, tv_show_id, season_number, title, original_title, runtime, release_date
         FROM season WHERE tv_show_id = ?1 ORDER BY season_number, id",
    )?;
    let rows = stmt.query_map(params![tv_show_id], row_to_season)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// List every view summary with its owner, in id order.
pub fn all_view_summaries(conn: &Connection) -> Result<Vec<ViewSummaryRecord>, OperationError> {
    let sql = format!("SELECT {VIEW_SUMMARY_COLUMNS} FROM view_summary ORDER BY id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], row_to_view_summary_record)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// List the view summaries whose period ends on `end_date`.
pub fn view_summaries_ending_on(
    conn: &Connection,
    end_date: NaiveDate,
) -> Result<Vec<ViewSummaryRecord>, OperationError> {
    let sql = format!(
        "SELECT {VIEW_SUMMARY_COLUMNS} FROM view_summary WHERE end_date = ?1 ORDER BY id"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![end_date], row_to_view_summary_record)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Most recent period end date present in the store.
pub fn latest_period_end(
    conn: &Connection,
    duration: SummaryDuration,
) -> Result<Option<NaiveDate>, OperationError> {
    conn.query_row(
        "SELECT MAX(end_date) FROM view_summary WHERE duration = ?1",
        params![duration.as_str()],
        |row| row.get(0),
    )
    .map_err(Into::into)
}

// ── Stats ───────────────────────────────────────────────────────────────────

/// Get summary statistics for the catalog.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let movies: i64 = conn.query_row("SELECT COUNT(*) FROM movie", [], |r| r.get(0))?;
    let tv_shows: i64 = conn.query_row("SELECT COUNT(*) FROM tv_show", [], |r| r.get(0))?;
    let seasons: i64 = conn.query_row("SELECT COUNT(*) FROM season", [], |r| r.get(0))?;
    let view_summaries: i64 =
        conn.query_row("SELECT COUNT(*) FROM view_summary", [], |r| r.get(0))?;
    let weekly_summaries: i64 = conn.query_row(
        "SELECT COUNT(*) FROM view_summary WHERE duration = ?1",
        params![SummaryDuration::Weekly.as_str()],
        |r| r.get(0),
    )?;
    let orphan_seasons: i64 = conn.query_row(
        "SELECT COUNT(*) FROM season WHERE tv_show_id IS NULL",
        [],
        |r| r.get(0),
    )?;
    let imports: i64 = conn.query_row("SELECT COUNT(*) FROM import_log", [], |r| r.get(0))?;

    Ok(CatalogStats {
        movies,
        tv_shows,
        seasons,
        view_summaries,
        weekly_summaries,
        orphan_seasons,
        imports,
    })
}

/// Summary statistics for the catalog.
#[derive(Debug)]
pub struct CatalogStats {
    pub movies: i64,
    pub tv_shows: i64,
    pub seasons: i64,
    pub view_summaries: i64,
    pub weekly_summaries: i64,
    pub orphan_seasons: i64,
    pub imports: i64,
}

// ── Import Logs ─────────────────────────────────────────────────────────────

/// List recent import logs, newest first.
pub fn list_import_logs(conn: &Connection, limit: u32) -> Result<Vec<ImportLog>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, report_name, report_kind, source_path, imported_at,
                rows_read, rows_accepted, rows_dropped
         FROM import_log ORDER BY id DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        Ok(ImportLog {
            id: row.get(0)?,
            report_name: row.get(1)?,
            report_kind: row.get(2)?,
            source_path: row.get(3)?,
            imported_at: row.get(4)?,
            rows_read: row.get(5)?,
            rows_accepted: row.get(6)?,
            rows_dropped: row.get(7)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}
