//! Per-run accumulation of normalized rows, grouped by identity.

use std::collections::BTreeMap;

use viewdb_catalog::types::{Category, IdentityKey, ReportRow};

/// Why a row could not be accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    NoCategory,
    NoTitle,
    NoRuntime,
}

/// Rows of one run, partitioned by category and grouped by (title, runtime).
///
/// Groups are keyed in a `BTreeMap`, so iteration order is independent of
/// the order rows arrived in.
#[derive(Debug, Default)]
pub struct RunAccumulator {
    movies: BTreeMap<IdentityKey, Vec<ReportRow>>,
    seasons: BTreeMap<IdentityKey, Vec<ReportRow>>,
    dropped: u64,
}

impl RunAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row to its identity group, or drop it if it can't be matched.
    pub fn push(&mut self, row: ReportRow) -> Result<(), DropReason> {
        let (category, key) = match Self::classify(&row) {
            Ok(classified) => classified,
            Err(reason) => {
                log::debug!("Dropping row {:?}: {:?}", row.title, reason);
                self.dropped += 1;
                return Err(reason);
            }
        };
        let groups = match category {
            Category::Movie => &mut self.movies,
            Category::TvShow => &mut self.seasons,
        };
        groups.entry(key).or_default().push(row);
        Ok(())
    }

    fn classify(row: &ReportRow) -> Result<(Category, IdentityKey), DropReason> {
        let category = row.category.ok_or(DropReason::NoCategory)?;
        let title = row.title.as_deref().ok_or(DropReason::NoTitle)?;
        let runtime = row.runtime.ok_or(DropReason::NoRuntime)?;
        Ok((category, IdentityKey::new(title, runtime)))
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn movie_group_count(&self) -> usize {
        self.movies.len()
    }

    pub fn season_group_count(&self) -> usize {
        self.seasons.len()
    }

    /// Take the grouped rows, each group sorted by period (end date, then
    /// start date). The sort is stable, so ties keep arrival order.
    pub fn into_groups(self) -> AccumulatedGroups {
        AccumulatedGroups {
            movies: sort_groups(self.movies),
            seasons: sort_groups(self.seasons),
        }
    }
}

fn sort_groups(
    groups: BTreeMap<IdentityKey, Vec<ReportRow>>,
) -> BTreeMap<IdentityKey, Vec<ReportRow>> {
    groups
        .into_iter()
        .map(|(key, mut rows)| {
            rows.sort_by_key(|r| (r.end_date, r.start_date));
            (key, rows)
        })
        .collect()
}

/// Identity groups ready for merging.
#[derive(Debug, Default)]
pub struct AccumulatedGroups {
    pub movies: BTreeMap<IdentityKey, Vec<ReportRow>>,
    pub seasons: BTreeMap<IdentityKey, Vec<ReportRow>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};
    use viewdb_catalog::types::SummaryDuration;

    fn row(title: Option<&str>, category: Option<Category>, runtime: Option<i64>, end: u32) -> ReportRow {
        let end_date = NaiveDate::from_ymd_opt(2024, 3, end).unwrap();
        ReportRow {
            title: title.map(str::to_string),
            original_title: None,
            category,
            runtime,
            release_date: None,
            available_globally: None,
            locale: None,
            start_date: end_date,
            end_date,
            duration: SummaryDuration::Weekly,
            hours_viewed: None,
            views: None,
            view_rank: None,
            cumulative_weeks_in_top10: None,
        }
    }

    #[test]
    fn test_unidentifiable_rows_are_dropped() {
        let mut acc = RunAccumulator::new();
        assert_eq!(acc.push(row(None, Some(Category::Movie), Some(90), 1)), Err(DropReason::NoTitle));
        assert_eq!(acc.push(row(Some("A"), None, Some(90), 1)), Err(DropReason::NoCategory));
        assert_eq!(acc.push(row(Some("A"), Some(Category::Movie), None, 1)), Err(DropReason::NoRuntime));
        assert_eq!(acc.dropped(), 3);
        assert_eq!(acc.movie_group_count(), 0);
    }

    #[test]
    fn test_groups_sorted_by_period() {
        let mut acc = RunAccumulator::new();
        acc.push(row(Some("A"), Some(Category::Movie), Some(90), 17)).unwrap();
        acc.push(row(Some("A"), Some(Category::Movie), Some(90), 3)).unwrap();
        acc.push(row(Some("A"), Some(Category::Movie), Some(100), 10)).unwrap();
        acc.push(row(Some("A: Season 1"), Some(Category::TvShow), Some(300), 3)).unwrap();

        let groups = acc.into_groups();
        assert_eq!(groups.movies.len(), 2);
        assert_eq!(groups.seasons.len(), 1);

        let rows = &groups.movies[&IdentityKey::new("A", 90)];
        assert_eq!(rows[0].end_date.day0(), 2);
        assert_eq!(rows[1].end_date.day0(), 16);
    }
}
