//! Row normalization: raw report cells into a canonical [`ReportRow`].
//!
//! Unparsable cells become `None` rather than errors. Whether a row is usable
//! at all is decided later, when it is accumulated for merging.

use chrono::{Days, NaiveDate};
use viewdb_catalog::manifest::{ColumnOverrides, ReportKind};
use viewdb_catalog::title_parser::split_combined_title;
use viewdb_catalog::types::{Category, ReportRow};

use crate::source::{RawRecord, ReportMetadata};

/// Placeholder used by the top-10 lists for films, which have no season.
const NOT_APPLICABLE: &str = "N/A";

// ── Column Names ────────────────────────────────────────────────────────────

/// Column names for one report, after applying manifest overrides.
#[derive(Debug, Clone)]
pub struct Columns {
    pub title: String,
    pub season_title: Option<String>,
    pub category: Option<String>,
    pub runtime: String,
    pub release_date: Option<String>,
    pub available_globally: Option<String>,
    pub hours_viewed: String,
    pub views: String,
    pub view_rank: Option<String>,
    pub cumulative_weeks_in_top10: Option<String>,
    pub week: Option<String>,
}

impl Columns {
    pub fn resolve(kind: ReportKind, overrides: &ColumnOverrides) -> Self {
        let pick = |value: &Option<String>, default: &str| {
            value.clone().unwrap_or_else(|| default.to_string())
        };

        match kind {
            ReportKind::Engagement => Self {
                title: pick(&overrides.title, "Title"),
                season_title: overrides.season_title.clone(),
                category: overrides.category.clone(),
                runtime: pick(&overrides.runtime, "Runtime"),
                release_date: Some(pick(&overrides.release_date, "Release Date")),
                available_globally: Some(pick(
                    &overrides.available_globally,
                    "Available Globally?",
                )),
                hours_viewed: pick(&overrides.hours_viewed, "Hours Viewed"),
                views: pick(&overrides.views, "Views"),
                view_rank: overrides.view_rank.clone(),
                cumulative_weeks_in_top10: overrides.cumulative_weeks_in_top10.clone(),
                week: None,
            },
            ReportKind::Top10 => Self {
                title: pick(&overrides.title, "show_title"),
                season_title: Some(pick(&overrides.season_title, "season_title")),
                category: Some(pick(&overrides.category, "category")),
                runtime: pick(&overrides.runtime, "runtime"),
                release_date: overrides.release_date.clone(),
                available_globally: overrides.available_globally.clone(),
                hours_viewed: pick(&overrides.hours_viewed, "weekly_hours_viewed"),
                views: pick(&overrides.views, "weekly_views"),
                view_rank: Some(pick(&overrides.view_rank, "weekly_rank")),
                cumulative_weeks_in_top10: Some(pick(
                    &overrides.cumulative_weeks_in_top10,
                    "cumulative_weeks_in_top_10",
                )),
                week: Some(pick(&overrides.week, "week")),
            },
        }
    }
}

// ── Cell Parsers ────────────────────────────────────────────────────────────

/// Parse a runtime cell into whole minutes.
///
/// Accepts `H:MM` and decimal hours (`1.5`). Decimal hours are truncated
/// after conversion.
///
/// ```
/// use viewdb_import::normalize::parse_runtime_minutes;
///
/// assert_eq!(parse_runtime_minutes("1:30"), Some(90));
/// assert_eq!(parse_runtime_minutes("1.5"), Some(90));
/// assert_eq!(parse_runtime_minutes(""), None);
/// ```
pub fn parse_runtime_minutes(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Some((hours, minutes)) = s.split_once(':') {
        let hours: i64 = hours.trim().parse().ok()?;
        let minutes: i64 = minutes.trim().parse().ok()?;
        if hours < 0 || !(0..60).contains(&minutes) {
            return None;
        }
        return hours.checked_mul(60)?.checked_add(minutes);
    }

    parse_decimal_hours(s)
}

/// Decimal hours to whole minutes, computed on the digits so `2.05` is
/// exactly 123 minutes.
fn parse_decimal_hours(s: &str) -> Option<i64> {
    const MAX_FRACTION_DIGITS: usize = 30;

    let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return None;
    }

    let hours: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
    let fraction_minutes = if fraction.is_empty() {
        0
    } else {
        let numerator: u128 = fraction.parse().ok()?;
        let denominator = 10u128.pow(fraction.len() as u32);
        i64::try_from(numerator * 60 / denominator).ok()?
    };

    hours.checked_mul(60)?.checked_add(fraction_minutes)
}

/// Parse an integer cell, ignoring thousands separators.
pub fn parse_int(s: &str) -> Option<i64> {
    let cleaned: String = s.chars().filter(|c| *c != ',').collect();
    cleaned.trim().parse().ok()
}

/// `Yes` / `No`, case-insensitive. Anything else is unknown.
pub fn parse_available_globally(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

/// Parse an ISO (`2024-03-10`) or US-style (`3/10/2024`) date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
        .ok()
}

// ── Normalization ───────────────────────────────────────────────────────────

/// Normalize one record of the given report.
///
/// Returns `None` only when the reporting period cannot be established,
/// e.g. a top-10 row with an unreadable week.
pub fn normalize(
    record: &RawRecord,
    metadata: &ReportMetadata,
    columns: &Columns,
) -> Option<ReportRow> {
    match metadata.kind {
        ReportKind::Engagement => normalize_engagement(record, metadata, columns),
        ReportKind::Top10 => normalize_top10(record, metadata, columns),
    }
}

fn cell<'a>(record: &'a RawRecord, column: Option<&String>) -> Option<&'a str> {
    column.and_then(|c| record.get(c))
}

fn split_title(raw: Option<&str>) -> (Option<String>, Option<String>) {
    match raw {
        Some(raw) => {
            let (title, original) = split_combined_title(raw);
            ((!title.is_empty()).then_some(title), original)
        }
        None => (None, None),
    }
}

pub fn normalize_engagement(
    record: &RawRecord,
    metadata: &ReportMetadata,
    columns: &Columns,
) -> Option<ReportRow> {
    let start_date = metadata.start_date?;
    let end_date = metadata.end_date?;

    let (title, original_title) = split_title(record.get(&columns.title));

    let category = match cell(record, columns.category.as_ref()) {
        Some(label) => Category::from_label(label),
        None => metadata.sheet.as_deref().and_then(Category::from_label),
    };

    Some(ReportRow {
        title,
        original_title,
        category,
        runtime: record.get(&columns.runtime).and_then(parse_runtime_minutes),
        release_date: cell(record, columns.release_date.as_ref()).and_then(parse_date),
        available_globally: cell(record, columns.available_globally.as_ref())
            .and_then(parse_available_globally),
        locale: None,
        start_date,
        end_date,
        duration: metadata.duration(),
        hours_viewed: record.get(&columns.hours_viewed).and_then(parse_int),
        views: record.get(&columns.views).and_then(parse_int),
        view_rank: cell(record, columns.view_rank.as_ref()).and_then(parse_int),
        cumulative_weeks_in_top10: cell(record, columns.cumulative_weeks_in_top10.as_ref())
            .and_then(parse_int),
    })
}

pub fn normalize_top10(
    record: &RawRecord,
    metadata: &ReportMetadata,
    columns: &Columns,
) -> Option<ReportRow> {
    let end_date = cell(record, columns.week.as_ref()).and_then(parse_date)?;
    let start_date = end_date.checked_sub_days(Days::new(6))?;

    let raw_title = cell(record, columns.season_title.as_ref())
        .filter(|t| *t != NOT_APPLICABLE)
        .or_else(|| record.get(&columns.title));
    let (title, original_title) = split_title(raw_title);

    let category_label = cell(record, columns.category.as_ref());
    let locale = category_label
        .filter(|label| label.contains("(English)"))
        .map(|_| "en".to_string());

    Some(ReportRow {
        title,
        original_title,
        category: category_label.and_then(Category::from_label),
        runtime: record.get(&columns.runtime).and_then(parse_runtime_minutes),
        release_date: cell(record, columns.release_date.as_ref()).and_then(parse_date),
        available_globally: cell(record, columns.available_globally.as_ref())
            .and_then(parse_available_globally),
        locale,
        start_date,
        end_date,
        duration: metadata.duration(),
        hours_viewed: record.get(&columns.hours_viewed).and_then(parse_int),
        views: record.get(&columns.views).and_then(parse_int),
        view_rank: cell(record, columns.view_rank.as_ref()).and_then(parse_int),
        cumulative_weeks_in_top10: cell(record, columns.cumulative_weeks_in_top10.as_ref())
            .and_then(parse_int),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_formats() {
        assert_eq!(parse_runtime_minutes("2:05"), Some(125));
        assert_eq!(parse_runtime_minutes(" 0:45 "), Some(45));
        assert_eq!(parse_runtime_minutes("2.1333"), Some(127));
        assert_eq!(parse_runtime_minutes("abc"), None);
        assert_eq!(parse_runtime_minutes("1:75"), None);
        assert_eq!(parse_runtime_minutes("-1.0"), None);
        assert_eq!(parse_runtime_minutes("1.2.3"), None);
        assert_eq!(parse_runtime_minutes("."), None);
    }

    #[test]
    fn test_parse_int_strips_commas() {
        assert_eq!(parse_int("1,234,500"), Some(1_234_500));
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("n/a"), None);
    }

    #[test]
    fn test_available_globally() {
        assert_eq!(parse_available_globally("Yes"), Some(true));
        assert_eq!(parse_available_globally("NO"), Some(false));
        assert_eq!(parse_available_globally("maybe"), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 10);
        assert_eq!(parse_date("2024-03-10"), expected);
        assert_eq!(parse_date("3/10/2024"), expected);
        assert_eq!(parse_date("March 10"), None);
    }
}
