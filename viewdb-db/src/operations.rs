//! CRUD operations for all catalog entity types.

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;
use viewdb_catalog::types::*;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: i64 },
}

// ── Movie Operations ────────────────────────────────────────────────────────

/// Find a movie by its (title, runtime) identity, with its view summaries.
pub fn find_movie(conn: &Connection, key: &IdentityKey) -> Result<Option<Movie>, OperationError> {
    let movie = conn
        .query_row(
            "SELECT id, title, original_title, runtime, release_date, available_globally, locale
             FROM movie WHERE title = ?1 AND runtime = ?2",
            params![key.title, key.runtime],
            row_to_movie,
        )
        .optional()?;

    match movie {
        Some(mut movie) => {
            if let Some(id) = movie.id {
                movie.view_summaries = view_summaries_for(conn, SummaryOwner::Movie(id))?;
            }
            Ok(Some(movie))
        }
        None => Ok(None),
    }
}

/// Insert or update a movie and its view summaries.
///
/// Assigns surrogate ids to the movie and to any new summaries.
pub fn save_movie(conn: &Connection, mut movie: Movie) -> Result<Movie, OperationError> {
    let id = match movie.id {
        Some(id) => {
            let changed = conn.execute(
                "UPDATE movie SET title = ?2, original_title = ?3, runtime = ?4,
                     release_date = ?5, available_globally = ?6, locale = ?7
                 WHERE id = ?1",
                params![
                    id,
                    movie.title,
                    movie.original_title,
                    movie.runtime,
                    movie.release_date,
                    movie.available_globally,
                    movie.locale,
                ],
            )?;
            if changed == 0 {
                return Err(OperationError::NotFound {
                    entity_type: "movie".to_string(),
                    id,
                });
            }
            id
        }
        None => {
            conn.execute(
                "INSERT INTO movie (title, original_title, runtime, release_date,
                     available_globally, locale)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    movie.title,
                    movie.original_title,
                    movie.runtime,
                    movie.release_date,
                    movie.available_globally,
                    movie.locale,
                ],
            )?;
            conn.last_insert_rowid()
        }
    };

    movie.id = Some(id);
    save_view_summaries(conn, SummaryOwner::Movie(id), &mut movie.view_summaries)?;
    Ok(movie)
}

pub(crate) fn row_to_movie(row: &rusqlite::Row<'_>) -> rusqlite::Result<Movie> {
    Ok(Movie {
        id: row.get(0)?,
        title: row.get(1)?,
        original_title: row.get(2)?,
        runtime: row.get(3)?,
        release_date: row.get(4)?,
        available_globally: row.get(5)?,
        locale: row.get(6)?,
        view_summaries: Vec::new(),
    })
}

// ── TV Show Operations ──────────────────────────────────────────────────────

/// Find a TV show by its (season-stripped) title.
pub fn find_tv_show(conn: &Connection, title: &str) -> Result<Option<TvShow>, OperationError> {
    conn.query_row(
        "SELECT id, title, original_title, release_date, available_globally, locale
         FROM tv_show WHERE title = ?1",
        params![title],
        row_to_tv_show,
    )
    .optional()
    .map_err(Into::into)
}

/// Find a TV show by surrogate id.
pub fn find_tv_show_by_id(conn: &Connection, id: i64) -> Result<Option<TvShow>, OperationError> {
    conn.query_row(
        "SELECT id, title, original_title, release_date, available_globally, locale
         FROM tv_show WHERE id = ?1",
        params![id],
        row_to_tv_show,
    )
    .optional()
    .map_err(Into::into)
}

/// Insert or update a TV show.
pub fn save_tv_show(conn: &Connection, mut show: TvShow) -> Result<TvShow, OperationError> {
    let id = match show.id {
        Some(id) => {
            let changed = conn.execute(
                "UPDATE tv_show SET title = ?2, original_title = ?3, release_date = ?4,
                     available_globally = ?5, locale = ?6
                 WHERE id = ?1",
                params![
                    id,
                    show.title,
                    show.original_title,
                    show.release_date,
                    show.available_globally,
                    show.locale,
                ],
            )?;
            if changed == 0 {
                return Err(OperationError::NotFound {
                    entity_type: "tv_show".to_string(),
                    id,
                });
            }
            id
        }
        None => {
            conn.execute(
                "INSERT INTO tv_show (title, original_title, release_date, available_globally, locale)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    show.title,
                    show.original_title,
                    show.release_date,
                    show.available_globally,
                    show.locale,
                ],
            )?;
            conn.last_insert_rowid()
        }
    };

    show.id = Some(id);
    Ok(show)
}

pub(crate) fn row_to_tv_show(row: &rusqlite::Row<'_>) -> rusqlite::Result<TvShow> {
    Ok(TvShow {
        id: row.get(0)?,
        title: row.get(1)?,
        original_title: row.get(2)?,
        release_date: row.get(3)?,
        available_globally: row.get(4)?,
        locale: row.get(5)?,
    })
}

// ── Season Operations ───────────────────────────────────────────────────────

/// Find a season by its (title, runtime) identity, with its view summaries.
pub fn find_season(conn: &Connection, key: &IdentityKey) -> Result<Option<Season>, OperationError> {
    let season = conn
        .query_row(
            "SELECT id, tv_show_id, season_number, title, original_title, runtime, release_date
             FROM season WHERE title = ?1 AND runtime = ?2",
            params![key.title, key.runtime],
            row_to_season,
        )
        .optional()?;

    match season {
        Some(mut season) => {
            if let Some(id) = season.id {
                season.view_summaries = view_summaries_for(conn, SummaryOwner::Season(id))?;
            }
            Ok(Some(season))
        }
        None => Ok(None),
    }
}

/// Insert or update a season and its view summaries.
pub fn save_season(conn: &Connection, mut season: Season) -> Result<Season, OperationError> {
    let id = match season.id {
        Some(id) => {
            let changed = conn.execute(
                "UPDATE season SET tv_show_id = ?2, season_number = ?3, title = ?4,
                     original_title = ?5, runtime = ?6, release_date = ?7
                 WHERE id = ?1",
                params![
                    id,
                    season.tv_show_id,
                    season.season_number,
                    season.title,
                    season.original_title,
                    season.runtime,
                    season.release_date,
                ],
            )?;
            if changed == 0 {
                return Err(OperationError::NotFound {
                    entity_type: "season".to_string(),
                    id,
                });
            }
            id
        }
        None => {
            conn.execute(
                "INSERT INTO season (tv_show_id, season_number, title, original_title,
                     runtime, release_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    season.tv_show_id,
                    season.season_number,
                    season.title,
                    season.original_title,
                    season.runtime,
                    season.release_date,
                ],
            )?;
            conn.last_insert_rowid()
        }
    };

    season.id = Some(id);
    save_view_summaries(conn, SummaryOwner::Season(id), &mut season.view_summaries)?;
    Ok(season)
}

pub(crate) fn row_to_season(row: &rusqlite::Row<'_>) -> rusqlite::Result<Season> {
    Ok(Season {
        id: row.get(0)?,
        tv_show_id: row.get(1)?,
        season_number: row.get(2)?,
        title: row.get(3)?,
        original_title: row.get(4)?,
        runtime: row.get(5)?,
        release_date: row.get(6)?,
        view_summaries: Vec::new(),
    })
}

// ── View Summary Operations ─────────────────────────────────────────────────

/// List the view summaries of one owner, in id order.
pub fn view_summaries_for(
    conn: &Connection,
    owner: SummaryOwner,
) -> Result<Vec<ViewSummary>, OperationError> {
    let (sql, id) = match owner {
        SummaryOwner::Movie(id) => (
            "SELECT id, movie_id, season_id, start_date, end_date, duration, view_rank,
                    hours_viewed, views, cumulative_weeks_in_top10
             FROM view_summary WHERE movie_id = ?1 ORDER BY id",
            id,
        ),
        SummaryOwner::Season(id) => (
            "SELECT id, movie_id, season_id, start_date, end_date, duration, view_rank,
                    hours_viewed, views, cumulative_weeks_in_top10
             FROM view_summary WHERE season_id = ?1 ORDER BY id",
            id,
        ),
    };
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params![id], row_to_view_summary_record)?;
    rows.map(|r| r.map(|record| record.summary))
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

/// Persist an owner's view summaries: update those with ids, insert the rest.
fn save_view_summaries(
    conn: &Connection,
    owner: SummaryOwner,
    summaries: &mut [ViewSummary],
) -> Result<(), OperationError> {
    for summary in summaries.iter_mut() {
        match summary.id {
            Some(id) => {
                conn.execute(
                    "UPDATE view_summary SET start_date = ?2, end_date = ?3, duration = ?4,
                         view_rank = ?5, hours_viewed = ?6, views = ?7,
                         cumulative_weeks_in_top10 = ?8
                     WHERE id = ?1",
                    params![
                        id,
                        summary.start_date,
                        summary.end_date,
                        summary.duration.as_str(),
                        summary.view_rank,
                        summary.hours_viewed,
                        summary.views,
                        summary.cumulative_weeks_in_top10,
                    ],
                )?;
            }
            None => {
                conn.execute(
                    "INSERT INTO view_summary (movie_id, season_id, start_date, end_date,
                         duration, view_rank, hours_viewed, views, cumulative_weeks_in_top10)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                    params![
                        owner.movie_id(),
                        owner.season_id(),
                        summary.start_date,
                        summary.end_date,
                        summary.duration.as_str(),
                        summary.view_rank,
                        summary.hours_viewed,
                        summary.views,
                        summary.cumulative_weeks_in_top10,
                    ],
                )?;
                summary.id = Some(conn.last_insert_rowid());
            }
        }
    }
    Ok(())
}

/// Map a `view_summary` row (selected in the canonical column order).
pub(crate) fn row_to_view_summary_record(
    row: &rusqlite::Row<'_>,
) -> rusqlite::Result<ViewSummaryRecord> {
    let movie_id: Option<i64> = row.get(1)?;
    let season_id: Option<i64> = row.get(2)?;
    let owner = match (movie_id, season_id) {
        (Some(id), None) => SummaryOwner::Movie(id),
        (None, Some(id)) => SummaryOwner::Season(id),
        _ => {
            return Err(rusqlite::Error::FromSqlConversionFailure(
                1,
                Type::Integer,
                "view summary must belong to exactly one movie or season".into(),
            ));
        }
    };

    let duration_str: String = row.get(5)?;
    let duration = SummaryDuration::from_str_loose(&duration_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            5,
            Type::Text,
            format!("unknown summary duration '{duration_str}'").into(),
        )
    })?;

    let start_date: NaiveDate = row.get(3)?;
    let end_date: NaiveDate = row.get(4)?;

    Ok(ViewSummaryRecord {
        owner,
        summary: ViewSummary {
            id: row.get(0)?,
            start_date,
            end_date,
            duration,
            view_rank: row.get(6)?,
            hours_viewed: row.get(7)?,
            views: row.get(8)?,
            cumulative_weeks_in_top10: row.get(9)?,
        },
    })
}

// ── Import Log Operations ───────────────────────────────────────────────────

/// Record an import log entry.
pub fn insert_import_log(conn: &Connection, log: &ImportLog) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO import_log (report_name, report_kind, source_path, imported_at,
             rows_read, rows_accepted, rows_dropped)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            log.report_name,
            log.report_kind,
            log.source_path,
            log.imported_at,
            log.rows_read,
            log.rows_accepted,
            log.rows_dropped,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
