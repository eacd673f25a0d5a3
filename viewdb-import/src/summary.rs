//! View-summary deduplication.
//!
//! An owner holds at most one summary per (duration, start date). Merging a
//! candidate either refreshes the matching period or appends a new one.

use viewdb_catalog::types::{HasViewSummaries, ViewSummary};

/// Outcome of [`merge_view_summary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryMerge {
    /// An existing summary for the same period was updated in place.
    Updated,
    /// No summary covered the period; the candidate was appended.
    Appended,
}

/// Fold `candidate` into the owner's summaries.
///
/// On a period match only the candidate's non-null statistics overwrite the
/// existing ones; the existing id is kept.
pub fn merge_view_summary<O: HasViewSummaries + ?Sized>(
    owner: &mut O,
    candidate: ViewSummary,
) -> SummaryMerge {
    let existing = owner
        .view_summaries_mut()
        .iter_mut()
        .find(|s| s.duration == candidate.duration && s.start_date == candidate.start_date);

    match existing {
        Some(existing) => {
            overwrite(&mut existing.view_rank, candidate.view_rank);
            overwrite(&mut existing.hours_viewed, candidate.hours_viewed);
            overwrite(&mut existing.views, candidate.views);
            overwrite(
                &mut existing.cumulative_weeks_in_top10,
                candidate.cumulative_weeks_in_top10,
            );
            SummaryMerge::Updated
        }
        None => {
            owner.view_summaries_mut().push(ViewSummary {
                id: None,
                ..candidate
            });
            SummaryMerge::Appended
        }
    }
}

fn overwrite<T>(target: &mut Option<T>, incoming: Option<T>) {
    if incoming.is_some() {
        *target = incoming;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use viewdb_catalog::types::{Movie, SummaryDuration};

    fn movie() -> Movie {
        Movie {
            id: Some(1),
            title: "Example".to_string(),
            original_title: None,
            runtime: 120,
            release_date: None,
            available_globally: None,
            locale: None,
            view_summaries: Vec::new(),
        }
    }

    fn weekly(start: u32, rank: Option<i64>, hours: Option<i64>) -> ViewSummary {
        let start_date = NaiveDate::from_ymd_opt(2024, 3, start).unwrap();
        ViewSummary {
            id: None,
            start_date,
            end_date: start_date + chrono::Days::new(6),
            duration: SummaryDuration::Weekly,
            view_rank: rank,
            hours_viewed: hours,
            views: None,
            cumulative_weeks_in_top10: None,
        }
    }

    #[test]
    fn test_same_period_updates() {
        let mut m = movie();
        assert_eq!(merge_view_summary(&mut m, weekly(4, Some(3), Some(100))), SummaryMerge::Appended);
        m.view_summaries[0].id = Some(7);

        assert_eq!(merge_view_summary(&mut m, weekly(4, None, Some(250))), SummaryMerge::Updated);
        assert_eq!(m.view_summaries.len(), 1);
        assert_eq!(m.view_summaries[0].id, Some(7));
        assert_eq!(m.view_summaries[0].view_rank, Some(3));
        assert_eq!(m.view_summaries[0].hours_viewed, Some(250));
    }

    #[test]
    fn test_different_period_appends() {
        let mut m = movie();
        merge_view_summary(&mut m, weekly(4, Some(3), None));
        merge_view_summary(&mut m, weekly(11, Some(5), None));

        let mut semi = weekly(4, None, Some(1000));
        semi.duration = SummaryDuration::SemiAnnually;
        assert_eq!(merge_view_summary(&mut m, semi), SummaryMerge::Appended);
        assert_eq!(m.view_summaries.len(), 3);
    }
}
