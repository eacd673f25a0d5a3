//! Data model types for the streaming engagement catalog.
//!
//! These types represent the persistent schema (movies, TV shows, seasons and
//! their view summaries) plus the ephemeral `ReportRow` parsed from a report.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Category ────────────────────────────────────────────────────────────────

/// Streaming category of a report row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Movie,
    TvShow,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "MOVIE",
            Self::TvShow => "TV_SHOW",
        }
    }

    /// Derive a category from a worksheet name or a category cell.
    ///
    /// Case-insensitive substring match: "film" wins over "tv".
    /// Returns `None` for anything else.
    pub fn from_label(label: &str) -> Option<Self> {
        let lower = label.to_lowercase();
        if lower.contains("film") {
            Some(Self::Movie)
        } else if lower.contains("tv") {
            Some(Self::TvShow)
        } else {
            match label.trim() {
                "MOVIE" => Some(Self::Movie),
                "TV_SHOW" => Some(Self::TvShow),
                _ => None,
            }
        }
    }
}

// ── Summary Duration ────────────────────────────────────────────────────────

/// Granularity of a reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SummaryDuration {
    /// Semi-annual engagement report ("What We Watched").
    SemiAnnually,
    /// Weekly top-10 list.
    Weekly,
}

impl SummaryDuration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SemiAnnually => "SEMI_ANNUALLY",
            Self::Weekly => "WEEKLY",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SEMI_ANNUALLY" | "SEMI_ANNUAL" => Some(Self::SemiAnnually),
            "WEEKLY" => Some(Self::Weekly),
            _ => None,
        }
    }
}

// ── Report Row ──────────────────────────────────────────────────────────────

/// One normalized line of a report. Immutable once parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub category: Option<Category>,
    /// Runtime in whole minutes.
    pub runtime: Option<i64>,
    pub release_date: Option<NaiveDate>,
    pub available_globally: Option<bool>,
    pub locale: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration: SummaryDuration,
    pub hours_viewed: Option<i64>,
    pub views: Option<i64>,
    pub view_rank: Option<i64>,
    pub cumulative_weeks_in_top10: Option<i64>,
}

impl ReportRow {
    /// The view summary this row contributes to its owner.
    pub fn to_view_summary(&self) -> ViewSummary {
        ViewSummary {
            id: None,
            start_date: self.start_date,
            end_date: self.end_date,
            duration: self.duration,
            view_rank: self.view_rank,
            hours_viewed: self.hours_viewed,
            views: self.views,
            cumulative_weeks_in_top10: self.cumulative_weeks_in_top10,
        }
    }
}

/// (title, runtime) pair identifying a movie or a season.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey {
    pub title: String,
    pub runtime: i64,
}

impl IdentityKey {
    pub fn new(title: impl Into<String>, runtime: i64) -> Self {
        Self {
            title: title.into(),
            runtime,
        }
    }
}

// ── Movie ───────────────────────────────────────────────────────────────────

/// A movie and the view summaries it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    /// Surrogate id, assigned on first save.
    pub id: Option<i64>,
    pub title: String,
    pub original_title: Option<String>,
    pub runtime: i64,
    pub release_date: Option<NaiveDate>,
    pub available_globally: Option<bool>,
    pub locale: Option<String>,
    pub view_summaries: Vec<ViewSummary>,
}

impl Movie {
    pub fn key(&self) -> IdentityKey {
        IdentityKey::new(&self.title, self.runtime)
    }
}

// ── TV Show ─────────────────────────────────────────────────────────────────

/// A TV show. Seasons point at it; it does not own them.
#[derive(Debug, Clone, PartialEq)]
pub struct TvShow {
    pub id: Option<i64>,
    /// Title with the season suffix stripped.
    pub title: String,
    pub original_title: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub available_globally: Option<bool>,
    pub locale: Option<String>,
}

// ── Season ──────────────────────────────────────────────────────────────────

/// A season of a TV show and the view summaries it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct Season {
    pub id: Option<i64>,
    pub tv_show_id: Option<i64>,
    /// Absent when the title carries no season marker.
    pub season_number: Option<i32>,
    /// Full title including the season marker, e.g. "Show A: Season 2".
    pub title: String,
    pub original_title: Option<String>,
    pub runtime: i64,
    pub release_date: Option<NaiveDate>,
    pub view_summaries: Vec<ViewSummary>,
}

impl Season {
    pub fn key(&self) -> IdentityKey {
        IdentityKey::new(&self.title, self.runtime)
    }
}

// ── View Summary ────────────────────────────────────────────────────────────

/// Viewing statistics for one owner over one reporting period.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSummary {
    pub id: Option<i64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration: SummaryDuration,
    pub view_rank: Option<i64>,
    pub hours_viewed: Option<i64>,
    pub views: Option<i64>,
    pub cumulative_weeks_in_top10: Option<i64>,
}

/// The aggregate a persisted view summary belongs to. Never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryOwner {
    Movie(i64),
    Season(i64),
}

impl SummaryOwner {
    pub fn movie_id(&self) -> Option<i64> {
        match self {
            Self::Movie(id) => Some(*id),
            Self::Season(_) => None,
        }
    }

    pub fn season_id(&self) -> Option<i64> {
        match self {
            Self::Movie(_) => None,
            Self::Season(id) => Some(*id),
        }
    }
}

/// A persisted view summary together with its owner back-reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSummaryRecord {
    pub owner: SummaryOwner,
    pub summary: ViewSummary,
}

/// Aggregates that own a list of view summaries.
pub trait HasViewSummaries {
    fn view_summaries(&self) -> &[ViewSummary];
    fn view_summaries_mut(&mut self) -> &mut Vec<ViewSummary>;
}

impl HasViewSummaries for Movie {
    fn view_summaries(&self) -> &[ViewSummary] {
        &self.view_summaries
    }

    fn view_summaries_mut(&mut self) -> &mut Vec<ViewSummary> {
        &mut self.view_summaries
    }
}

impl HasViewSummaries for Season {
    fn view_summaries(&self) -> &[ViewSummary] {
        &self.view_summaries
    }

    fn view_summaries_mut(&mut self) -> &mut Vec<ViewSummary> {
        &mut self.view_summaries
    }
}

// ── Import Tracking ─────────────────────────────────────────────────────────

/// Log entry for one imported report.
#[derive(Debug, Clone)]
pub struct ImportLog {
    pub id: i64,
    pub report_name: String,
    pub report_kind: String,
    pub source_path: String,
    pub imported_at: String,
    pub rows_read: i64,
    pub rows_accepted: i64,
    pub rows_dropped: i64,
}
