use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use viewdb_catalog::load_manifest;
use viewdb_catalog::types::*;
use viewdb_db::*;
use viewdb_import::*;

const FILMS_CSV: &str = "\
Title,Available Globally?,Release Date,Hours Viewed,Runtime,Views
Example // Ejemplo,Yes,2023-12-01,\"1,000\",2:00,500
,,,,,
Untimed,No,,\"2,000\",,
";

const TOP10_CSV: &str = "\
week,category,weekly_rank,show_title,season_title,weekly_hours_viewed,runtime,weekly_views,cumulative_weeks_in_top_10
2024-03-10,Films (English),3,Example,N/A,\"5,000\",2.0,2500,1
2024-03-10,TV (English),1,Show A,Show A: Season 2,\"9,000\",6.5,1384,2
2024-03-10,TV (English),2,Show A,Show A: Season 3,\"7,000\",6.0,1166,1
not-a-date,TV (English),4,Show C,Show C: Season 1,100,1.0,100,1
";

fn write_run(dir: &Path) -> std::path::PathBuf {
    fs::write(dir.join("films.csv"), FILMS_CSV).unwrap();
    fs::write(dir.join("top10.csv"), TOP10_CSV).unwrap();
    let manifest = dir.join("reports.yaml");
    fs::write(
        &manifest,
        "\
reports:
  - name: engagement-2024-h1-film
    kind: engagement
    path: films.csv
    sheet: Film
    start_date: 2024-01-01
    end_date: 2024-06-30
  - name: top10-2024-03-10
    kind: top10
    path: top10.csv
verify:
  expected_period_end: 2024-03-10
",
    )
    .unwrap();
    manifest
}

#[test]
fn import_manifest_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let manifest = load_manifest(&write_run(tmp.path())).unwrap();
    let conn = open_memory().unwrap();

    let run = import_manifest(&conn, &manifest, Some(&SilentProgress)).unwrap();
    assert_eq!(run.reports.len(), 2);
    assert_eq!(run.reports[0].rows_read, 3);
    assert_eq!(run.reports[0].rows_accepted, 1);
    assert_eq!(run.reports[1].rows_read, 4);
    assert_eq!(run.reports[1].rows_dropped, 1);

    let movie = find_movie(&conn, &IdentityKey::new("Example", 120)).unwrap().unwrap();
    assert_eq!(movie.original_title.as_deref(), Some("Ejemplo"));
    assert_eq!(movie.available_globally, Some(true));
    assert_eq!(movie.view_summaries.len(), 2);

    let show = find_tv_show(&conn, "Show A").unwrap().unwrap();
    assert_eq!(show.locale.as_deref(), Some("en"));
    assert_eq!(seasons_for_show(&conn, show.id.unwrap()).unwrap().len(), 2);

    let end = manifest.verify.expected_period_end.unwrap();
    assert_eq!(verify_period(&conn, end).unwrap(), 3);

    assert_eq!(list_import_logs(&conn, 10).unwrap().len(), 2);
}

#[test]
fn reimporting_manifest_adds_no_summaries() {
    let tmp = tempfile::tempdir().unwrap();
    let manifest = load_manifest(&write_run(tmp.path())).unwrap();
    let conn = open_memory().unwrap();

    import_manifest(&conn, &manifest, None).unwrap();
    let before = catalog_stats(&conn).unwrap();
    let second = import_manifest(&conn, &manifest, None).unwrap();
    let after = catalog_stats(&conn).unwrap();

    assert_eq!(second.merge.summaries_appended, 0);
    assert_eq!(before.view_summaries, after.view_summaries);
    assert_eq!(before.movies, after.movies);
    assert_eq!(after.imports, 4);
}

#[test]
fn missing_report_file_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let manifest_path = write_run(tmp.path());
    fs::remove_file(tmp.path().join("top10.csv")).unwrap();
    let manifest = load_manifest(&manifest_path).unwrap();
    let conn = open_memory().unwrap();

    let err = import_manifest(&conn, &manifest, None).unwrap_err();
    assert!(matches!(err, ImportError::Io { .. }));
    assert_eq!(catalog_stats(&conn).unwrap().movies, 0);
}

#[test]
fn expected_period_defaults_to_last_sunday() {
    let tuesday = NaiveDate::from_ymd_opt(2024, 3, 12).unwrap();
    assert_eq!(
        expected_period_end(None, None, tuesday),
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    );
}
