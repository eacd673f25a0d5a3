//! Parser for the title conventions used in engagement reports.
//!
//! TV rows name a season inline after the last colon:
//! ```text
//! Show Title: Season 2
//! ```
//! Non-English rows carry the original-language title after `//`:
//! ```text
//! Squid Game // 오징어 게임
//! ```
//!
//! Only the segment after the *last* colon is treated as the season marker,
//! so "Show: Part One: Chapter 2" strips to "Show: Part One".

/// Separator between the English and original-language title.
pub const COMBINED_TITLE_SEPARATOR: &str = "//";

/// Remove the trailing season segment from a title.
///
/// # Examples
///
/// ```
/// use viewdb_catalog::title_parser::strip_season_suffix;
///
/// assert_eq!(strip_season_suffix("Stranger Things: Season 4"), "Stranger Things");
/// assert_eq!(strip_season_suffix("Wednesday"), "Wednesday");
/// ```
pub fn strip_season_suffix(title: &str) -> String {
    match title.rsplit_once(':') {
        Some((base, _)) => base.trim().to_string(),
        None => title.to_string(),
    }
}

/// Extract the season number from the segment after the last colon.
///
/// All non-digit characters of that segment are discarded. Returns `None`
/// if there is no colon or no digits remain.
///
/// # Examples
///
/// ```
/// use viewdb_catalog::title_parser::extract_season_number;
///
/// assert_eq!(extract_season_number("Stranger Things: Season 4"), Some(4));
/// assert_eq!(extract_season_number("Bridgerton: Limited Series"), None);
/// ```
pub fn extract_season_number(title: &str) -> Option<i32> {
    let (_, marker) = title.rsplit_once(':')?;
    let digits: String = marker.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Split a combined "Title // Original Title" cell.
///
/// Returns `(title, Some(original))` when the separator is present (first and
/// last parts, trimmed), or `(trimmed input, None)` otherwise.
///
/// # Examples
///
/// ```
/// use viewdb_catalog::title_parser::split_combined_title;
///
/// let (title, original) = split_combined_title("Squid Game // 오징어 게임");
/// assert_eq!(title, "Squid Game");
/// assert_eq!(original.as_deref(), Some("오징어 게임"));
/// ```
pub fn split_combined_title(raw: &str) -> (String, Option<String>) {
    if !raw.contains(COMBINED_TITLE_SEPARATOR) {
        return (raw.trim().to_string(), None);
    }

    let mut parts = raw.split(COMBINED_TITLE_SEPARATOR);
    let first = parts.next().unwrap_or("").trim().to_string();
    let last = parts.last().unwrap_or("").trim().to_string();
    (first, Some(last))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_keeps_earlier_colons() {
        assert_eq!(
            strip_season_suffix("Show: Part One: Chapter 2"),
            "Show: Part One"
        );
    }

    #[test]
    fn season_number_uses_last_segment_only() {
        assert_eq!(extract_season_number("Show 3: Part One: Chapter 2"), Some(2));
    }

    #[test]
    fn season_number_without_colon_is_none() {
        assert_eq!(extract_season_number("1899"), None);
    }

    #[test]
    fn split_uses_first_and_last_parts() {
        let (title, original) = split_combined_title(" A // B // C ");
        assert_eq!(title, "A");
        assert_eq!(original.as_deref(), Some("C"));
    }
}
