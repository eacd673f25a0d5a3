//! SQLite schema creation and migration.

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Migration error: expected version {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Current schema version. Increment when adding migrations.
pub const CURRENT_VERSION: i32 = 1;

/// Create all tables and indexes if they don't exist.
///
/// Idempotent; safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    set_schema_version(conn, CURRENT_VERSION)?;
    Ok(())
}

/// Open or create a catalog database at the given path.
pub fn open_database(path: &std::path::Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    let version = get_schema_version(&conn)?;
    if version == 0 {
        create_schema(&conn)?;
    } else if version != CURRENT_VERSION {
        migrate(&conn, version)?;
    }

    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Get the current schema version, or 0 if no schema exists.
pub fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Record a schema version.
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Run migrations from `from_version` up to `CURRENT_VERSION`.
fn migrate(conn: &Connection, from_version: i32) -> Result<(), SchemaError> {
    if from_version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: from_version,
        });
    }

    for version in (from_version + 1)..=CURRENT_VERSION {
        set_schema_version(conn, version)?;
    }

    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Movies, identified by (title, runtime)
CREATE TABLE IF NOT EXISTS movie (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    original_title TEXT,
    runtime INTEGER NOT NULL,
    release_date TEXT,
    available_globally BOOLEAN,
    locale TEXT
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_movie_title_runtime ON movie(title, runtime);

-- TV shows, identified by their season-stripped title
CREATE TABLE IF NOT EXISTS tv_show (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    original_title TEXT,
    release_date TEXT,
    available_globally BOOLEAN,
    locale TEXT
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_tv_show_title ON tv_show(title);

-- Seasons, identified by (title, runtime)
CREATE TABLE IF NOT EXISTS season (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tv_show_id INTEGER REFERENCES tv_show(id),
    season_number INTEGER,
    title TEXT NOT NULL,
    original_title TEXT,
    runtime INTEGER NOT NULL,
    release_date TEXT
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_season_title_runtime ON season(title, runtime);
CREATE INDEX IF NOT EXISTS idx_season_tv_show ON season(tv_show_id);

-- Periodic viewing statistics, owned by exactly one movie or season
CREATE TABLE IF NOT EXISTS view_summary (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    movie_id INTEGER REFERENCES movie(id) ON DELETE CASCADE,
    season_id INTEGER REFERENCES season(id) ON DELETE CASCADE,
    start_date TEXT NOT NULL,
    end_date TEXT NOT NULL,
    duration TEXT NOT NULL,
    view_rank INTEGER,
    hours_viewed INTEGER,
    views INTEGER,
    cumulative_weeks_in_top10 INTEGER,
    CHECK ((movie_id IS NULL) <> (season_id IS NULL))
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_view_summary_movie_period
    ON view_summary(movie_id, duration, start_date) WHERE movie_id IS NOT NULL;
CREATE UNIQUE INDEX IF NOT EXISTS idx_view_summary_season_period
    ON view_summary(season_id, duration, start_date) WHERE season_id IS NOT NULL;
CREATE INDEX IF NOT EXISTS idx_view_summary_end_date ON view_summary(end_date);

-- Import tracking
CREATE TABLE IF NOT EXISTS import_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    report_name TEXT NOT NULL,
    report_kind TEXT NOT NULL,
    source_path TEXT NOT NULL,
    imported_at TEXT NOT NULL,
    rows_read INTEGER DEFAULT 0,
    rows_accepted INTEGER DEFAULT 0,
    rows_dropped INTEGER DEFAULT 0
);
"#;
