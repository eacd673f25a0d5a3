use viewdb_catalog::title_parser::{
    extract_season_number, split_combined_title, strip_season_suffix,
};

#[test]
fn strip_season_suffix_removes_marker() {
    assert_eq!(
        strip_season_suffix("Stranger Things: Season 4"),
        "Stranger Things"
    );
}

#[test]
fn strip_season_suffix_without_colon_is_unchanged() {
    assert_eq!(strip_season_suffix("Wednesday"), "Wednesday");
}

#[test]
fn strip_season_suffix_trims_whitespace() {
    assert_eq!(strip_season_suffix("  Show A  :  Season 2"), "Show A");
}

#[test]
fn extract_season_number_from_marker() {
    assert_eq!(extract_season_number("Stranger Things: Season 4"), Some(4));
}

#[test]
fn extract_multi_digit_season_number() {
    assert_eq!(extract_season_number("Grey's Anatomy: Season 19"), Some(19));
}

#[test]
fn extract_season_number_without_digits() {
    assert_eq!(extract_season_number("Baby Reindeer: Limited Series"), None);
    assert_eq!(extract_season_number("Wednesday"), None);
}

#[test]
fn split_combined_title_with_original() {
    let (title, original) = split_combined_title("Squid Game // 오징어 게임");
    assert_eq!(title, "Squid Game");
    assert_eq!(original, Some("오징어 게임".to_string()));
}

#[test]
fn split_combined_title_without_separator() {
    let (title, original) = split_combined_title("Wednesday");
    assert_eq!(title, "Wednesday");
    assert!(original.is_none());
}

#[test]
fn split_combined_title_trims_plain_title() {
    let (title, original) = split_combined_title("  The Night Agent: Season 1 ");
    assert_eq!(title, "The Night Agent: Season 1");
    assert!(original.is_none());
}
