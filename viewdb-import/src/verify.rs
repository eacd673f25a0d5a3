//! Post-merge verification of the most recent reporting period.

use chrono::{Datelike, Days, NaiveDate};
use thiserror::Error;
use viewdb_catalog::manifest::VerifySettings;
use viewdb_db::{EntityStore, OperationError};

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("No view summaries found for the period ending {end_date}")]
    NoSummaries { end_date: NaiveDate },
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
}

/// The most recent Sunday strictly before `today`.
///
/// Weekly top-10 periods end on a Sunday, and the current week is never
/// complete yet.
///
/// ```
/// use chrono::NaiveDate;
/// use viewdb_import::verify::latest_completed_week_ending;
///
/// let wednesday = NaiveDate::from_ymd_opt(2024, 3, 13).unwrap();
/// let sunday = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
/// assert_eq!(latest_completed_week_ending(wednesday), sunday);
/// ```
pub fn latest_completed_week_ending(today: NaiveDate) -> NaiveDate {
    let back = match today.weekday().num_days_from_sunday() {
        0 => 7,
        n => u64::from(n),
    };
    today - Days::new(back)
}

/// Pick the expected period end: explicit value, then manifest setting,
/// then the last completed week before `today`.
pub fn expected_period_end(
    explicit: Option<NaiveDate>,
    settings: Option<&VerifySettings>,
    today: NaiveDate,
) -> NaiveDate {
    explicit
        .or_else(|| settings.and_then(|s| s.expected_period_end))
        .unwrap_or_else(|| latest_completed_week_ending(today))
}

/// Check that the store holds at least one view summary ending on
/// `end_date`. Returns the number found.
pub fn verify_period<S: EntityStore + ?Sized>(
    store: &S,
    end_date: NaiveDate,
) -> Result<usize, VerifyError> {
    let found = store.view_summaries_ending_on(end_date)?.len();
    if found == 0 {
        log::error!("No view summaries for the period ending {end_date}");
        return Err(VerifyError::NoSummaries { end_date });
    }
    log::info!("Found {found} view summaries for the period ending {end_date}");
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sunday_goes_back_a_full_week() {
        assert_eq!(latest_completed_week_ending(date(2024, 3, 17)), date(2024, 3, 10));
        assert_eq!(latest_completed_week_ending(date(2024, 3, 18)), date(2024, 3, 17));
        assert_eq!(latest_completed_week_ending(date(2024, 3, 23)), date(2024, 3, 17));
    }

    #[test]
    fn test_expected_period_end_precedence() {
        let today = date(2024, 3, 13);
        let settings = VerifySettings {
            expected_period_end: Some(date(2024, 3, 3)),
        };

        assert_eq!(
            expected_period_end(Some(date(2024, 2, 25)), Some(&settings), today),
            date(2024, 2, 25)
        );
        assert_eq!(expected_period_end(None, Some(&settings), today), date(2024, 3, 3));
        assert_eq!(expected_period_end(None, None, today), date(2024, 3, 10));
    }
}
