//! The persistence contract consumed by the merge engine.
//!
//! The engine only ever looks entities up by identity, saves them back, and
//! lists them for verification and export. [`EntityStore`] captures exactly
//! that surface; the SQLite connection is the production implementation.

use chrono::NaiveDate;
use rusqlite::Connection;
use viewdb_catalog::types::*;

use crate::operations::{self, OperationError};
use crate::queries;

pub trait EntityStore {
    fn find_movie(&self, key: &IdentityKey) -> Result<Option<Movie>, OperationError>;

    /// Persist a movie, assigning ids on first save.
    fn save_movie(&self, movie: Movie) -> Result<Movie, OperationError>;

    fn find_season(&self, key: &IdentityKey) -> Result<Option<Season>, OperationError>;

    fn save_season(&self, season: Season) -> Result<Season, OperationError>;

    /// Look up a TV show by its season-stripped title.
    fn find_tv_show(&self, title: &str) -> Result<Option<TvShow>, OperationError>;

    fn find_tv_show_by_id(&self, id: i64) -> Result<Option<TvShow>, OperationError>;

    fn save_tv_show(&self, show: TvShow) -> Result<TvShow, OperationError>;

    fn all_movies(&self) -> Result<Vec<Movie>, OperationError>;

    fn all_tv_shows(&self) -> Result<Vec<TvShow>, OperationError>;

    fn all_seasons(&self) -> Result<Vec<Season>, OperationError>;

    fn all_view_summaries(&self) -> Result<Vec<ViewSummaryRecord>, OperationError>;

    fn view_summaries_ending_on(
        &self,
        end_date: NaiveDate,
    ) -> Result<Vec<ViewSummaryRecord>, OperationError>;
}

impl EntityStore for Connection {
    fn find_movie(&self, key: &IdentityKey) -> Result<Option<Movie>, OperationError> {
        operations::find_movie(self, key)
    }

    fn save_movie(&self, movie: Movie) -> Result<Movie, OperationError> {
        operations::save_movie(self, movie)
    }

    fn find_season(&self, key: &IdentityKey) -> Result<Option<Season>, OperationError> {
        operations::find_season(self, key)
    }

    fn save_season(&self, season: Season) -> Result<Season, OperationError> {
        operations::save_season(self, season)
    }

    fn find_tv_show(&self, title: &str) -> Result<Option<TvShow>, OperationError> {
        operations::find_tv_show(self, title)
    }

    fn find_tv_show_by_id(&self, id: i64) -> Result<Option<TvShow>, OperationError> {
        operations::find_tv_show_by_id(self, id)
    }

    fn save_tv_show(&self, show: TvShow) -> Result<TvShow, OperationError> {
        operations::save_tv_show(self, show)
    }

    fn all_movies(&self) -> Result<Vec<Movie>, OperationError> {
        queries::all_movies(self)
    }

    fn all_tv_shows(&self) -> Result<Vec<TvShow>, OperationError> {
        queries::all_tv_shows(self)
    }

    fn all_seasons(&self) -> Result<Vec<Season>, OperationError> {
        queries::all_seasons(self)
    }

    fn all_view_summaries(&self) -> Result<Vec<ViewSummaryRecord>, OperationError> {
        queries::all_view_summaries(self)
    }

    fn view_summaries_ending_on(
        &self,
        end_date: NaiveDate,
    ) -> Result<Vec<ViewSummaryRecord>, OperationError> {
        queries::view_summaries_ending_on(self, end_date)
    }
}
