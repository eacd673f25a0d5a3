//! SQLite persistence layer for the streaming catalog.
//!
//! Provides schema creation, CRUD operations, query APIs, and the
//! [`EntityStore`] contract backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;
pub mod store;

pub use operations::{
    OperationError, find_movie, find_season, find_tv_show, find_tv_show_by_id,
    insert_import_log, save_movie, save_season, save_tv_show, view_summaries_for,
};
pub use queries::{
    CatalogStats, all_movies, all_seasons, all_tv_shows, all_view_summaries, catalog_stats,
    latest_period_end, list_import_logs, seasons_for_show, view_summaries_ending_on,
};
pub use schema::{SchemaError, open_database, open_memory};
pub use store::EntityStore;

pub use rusqlite::Connection;
