//! Entity resolution and non-destructive field merging.
//!
//! Every identity group resolves to one stored entity (or a fresh one), and
//! each row of the group is folded in. Only present values overwrite; when
//! two present values disagree the later row wins and the conflict is logged.

use std::collections::BTreeMap;
use std::fmt::Debug;

use viewdb_catalog::title_parser::{extract_season_number, strip_season_suffix};
use viewdb_catalog::types::*;
use viewdb_db::EntityStore;

use crate::accumulator::AccumulatedGroups;
use crate::report_import::ImportError;
use crate::summary::{SummaryMerge, merge_view_summary};

/// Counters from one merge pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeStats {
    pub movies_created: u64,
    pub movies_updated: u64,
    pub seasons_created: u64,
    pub seasons_updated: u64,
    pub tv_shows_created: u64,
    pub tv_shows_updated: u64,
    pub summaries_appended: u64,
    pub summaries_updated: u64,
    pub conflicts: u64,
}

impl MergeStats {
    fn count_summary(&mut self, outcome: SummaryMerge) {
        match outcome {
            SummaryMerge::Appended => self.summaries_appended += 1,
            SummaryMerge::Updated => self.summaries_updated += 1,
        }
    }
}

// ── Field Merging ───────────────────────────────────────────────────────────

/// Compare an existing value with an incoming one.
///
/// Returns `true` for a real conflict: both present and different.
pub fn check_field<T: PartialEq + Debug>(
    entity: &str,
    field: &str,
    existing: Option<&T>,
    incoming: Option<&T>,
) -> bool {
    // No conflict if either side is missing
    let (Some(a), Some(b)) = (existing, incoming) else {
        return false;
    };

    // No conflict if they're the same
    if a == b {
        return false;
    }

    log::debug!("Conflict on {entity} {field}: {a:?} replaced by {b:?}");
    true
}

/// Assign `incoming` to `target` when present.
pub fn merge_field<T: PartialEq + Clone + Debug>(
    entity: &str,
    field: &str,
    target: &mut Option<T>,
    incoming: &Option<T>,
    stats: &mut MergeStats,
) {
    if check_field(entity, field, target.as_ref(), incoming.as_ref()) {
        stats.conflicts += 1;
    }
    if incoming.is_some() {
        target.clone_from(incoming);
    }
}

// ── Movies ──────────────────────────────────────────────────────────────────

/// Resolve one movie group and fold its rows in. The result is not saved.
pub fn merge_movie_group<S: EntityStore + ?Sized>(
    store: &S,
    key: &IdentityKey,
    rows: &[ReportRow],
    stats: &mut MergeStats,
) -> Result<Movie, ImportError> {
    let mut movie = match store.find_movie(key)? {
        Some(existing) => {
            stats.movies_updated += 1;
            existing
        }
        None => {
            stats.movies_created += 1;
            Movie {
                id: None,
                title: key.title.clone(),
                original_title: None,
                runtime: key.runtime,
                release_date: None,
                available_globally: None,
                locale: None,
                view_summaries: Vec::new(),
            }
        }
    };

    let label = format!("movie '{}'", key.title);
    for row in rows {
        merge_field(&label, "original_title", &mut movie.original_title, &row.original_title, stats);
        merge_field(&label, "release_date", &mut movie.release_date, &row.release_date, stats);
        merge_field(
            &label,
            "available_globally",
            &mut movie.available_globally,
            &row.available_globally,
            stats,
        );
        merge_field(&label, "locale", &mut movie.locale, &row.locale, stats);

        let outcome = merge_view_summary(&mut movie, row.to_view_summary());
        stats.count_summary(outcome);
    }

    Ok(movie)
}

/// Merge and persist every movie group.
pub fn merge_movies<S: EntityStore + ?Sized>(
    store: &S,
    groups: &BTreeMap<IdentityKey, Vec<ReportRow>>,
    stats: &mut MergeStats,
) -> Result<(), ImportError> {
    for (key, rows) in groups {
        let movie = merge_movie_group(store, key, rows, stats)?;
        store.save_movie(movie)?;
    }
    Ok(())
}

// ── Seasons & TV Shows ──────────────────────────────────────────────────────

/// Resolve one season group and fold its rows in. The result is not saved,
/// and its parent show is not resolved yet.
pub fn merge_season_group<S: EntityStore + ?Sized>(
    store: &S,
    key: &IdentityKey,
    rows: &[ReportRow],
    stats: &mut MergeStats,
) -> Result<Season, ImportError> {
    let mut season = match store.find_season(key)? {
        Some(existing) => {
            stats.seasons_updated += 1;
            existing
        }
        None => {
            stats.seasons_created += 1;
            Season {
                id: None,
                tv_show_id: None,
                season_number: extract_season_number(&key.title),
                title: key.title.clone(),
                original_title: None,
                runtime: key.runtime,
                release_date: None,
                view_summaries: Vec::new(),
            }
        }
    };

    let label = format!("season '{}'", key.title);
    for row in rows {
        merge_field(&label, "original_title", &mut season.original_title, &row.original_title, stats);
        merge_field(&label, "release_date", &mut season.release_date, &row.release_date, stats);

        let outcome = merge_view_summary(&mut season, row.to_view_summary());
        stats.count_summary(outcome);
    }

    Ok(season)
}

/// Find a show by its stripped title, or create it, then fold the show-level
/// fields of `rows` in. Returns the saved show.
///
/// `rows` are all rows of the show's seasons, in period order, so the latest
/// reporting period wins across seasons as well as within one.
pub fn resolve_tv_show<S: EntityStore + ?Sized>(
    store: &S,
    title: &str,
    rows: &[&ReportRow],
    stats: &mut MergeStats,
) -> Result<TvShow, ImportError> {
    let mut show = match store.find_tv_show(title)? {
        Some(existing) => {
            stats.tv_shows_updated += 1;
            existing
        }
        None => {
            stats.tv_shows_created += 1;
            TvShow {
                id: None,
                title: title.to_string(),
                original_title: None,
                release_date: None,
                available_globally: None,
                locale: None,
            }
        }
    };

    let label = format!("tv show '{title}'");
    for row in rows {
        let original = row.original_title.as_deref().map(strip_season_suffix);
        merge_field(&label, "original_title", &mut show.original_title, &original, stats);
        merge_field(
            &label,
            "available_globally",
            &mut show.available_globally,
            &row.available_globally,
            stats,
        );
        merge_field(&label, "locale", &mut show.locale, &row.locale, stats);

        // A show premieres with its first season.
        show.release_date = match (show.release_date, row.release_date) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
    }

    Ok(store.save_tv_show(show)?)
}

/// Season groups keyed by the stripped show title.
fn groups_by_show(
    groups: &BTreeMap<IdentityKey, Vec<ReportRow>>,
) -> BTreeMap<String, Vec<(&IdentityKey, &[ReportRow])>> {
    let mut shows: BTreeMap<String, Vec<(&IdentityKey, &[ReportRow])>> = BTreeMap::new();
    for (key, rows) in groups {
        shows
            .entry(strip_season_suffix(&key.title))
            .or_default()
            .push((key, rows.as_slice()));
    }
    shows
}

/// Merge and persist every season group, attaching each to its show.
///
/// Each show is resolved once per pass, from the rows of all its seasons.
pub fn merge_seasons<S: EntityStore + ?Sized>(
    store: &S,
    groups: &BTreeMap<IdentityKey, Vec<ReportRow>>,
    stats: &mut MergeStats,
) -> Result<(), ImportError> {
    for (title, seasons) in groups_by_show(groups) {
        let mut show_rows: Vec<&ReportRow> =
            seasons.iter().flat_map(|(_, rows)| rows.iter()).collect();
        show_rows.sort_by_key(|r| (r.end_date, r.start_date));
        let show = resolve_tv_show(store, &title, &show_rows, stats)?;

        for (key, rows) in seasons {
            let mut season = merge_season_group(store, key, rows, stats)?;
            if season.tv_show_id.is_none() {
                season.tv_show_id = show.id;
            }
            store.save_season(season)?;
        }
    }
    Ok(())
}

/// Merge all accumulated groups of a run into the store.
pub fn merge_groups<S: EntityStore + ?Sized>(
    store: &S,
    groups: &AccumulatedGroups,
) -> Result<MergeStats, ImportError> {
    let mut stats = MergeStats::default();
    merge_movies(store, &groups.movies, &mut stats)?;
    merge_seasons(store, &groups.seasons, &mut stats)?;

    log::info!(
        "Merged {} movies ({} new), {} seasons ({} new), {} shows ({} new); \
         {} summaries appended, {} updated, {} conflicts",
        stats.movies_created + stats.movies_updated,
        stats.movies_created,
        stats.seasons_created + stats.seasons_updated,
        stats.seasons_created,
        stats.tv_shows_created + stats.tv_shows_updated,
        stats.tv_shows_created,
        stats.summaries_appended,
        stats.summaries_updated,
        stats.conflicts,
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_field() {
        assert!(!check_field("movie", "locale", None::<&String>, None));
        assert!(!check_field("movie", "locale", Some(&"en".to_string()), None));
        assert!(!check_field("movie", "locale", None, Some(&"en".to_string())));
        assert!(!check_field("movie", "locale", Some(&"en"), Some(&"en")));
        assert!(check_field("movie", "locale", Some(&"en"), Some(&"ko")));
    }

    #[test]
    fn test_merge_field_keeps_present_values() {
        let mut stats = MergeStats::default();
        let mut target = Some(true);

        merge_field("movie", "available_globally", &mut target, &None, &mut stats);
        assert_eq!(target, Some(true));
        assert_eq!(stats.conflicts, 0);

        merge_field("movie", "available_globally", &mut target, &Some(false), &mut stats);
        assert_eq!(target, Some(false));
        assert_eq!(stats.conflicts, 1);
    }
}
