use chrono::NaiveDate;
use viewdb_catalog::types::*;
use viewdb_db::*;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn semi_annual_summary(hours: i64) -> ViewSummary {
    ViewSummary {
        id: None,
        start_date: date("2024-01-01"),
        end_date: date("2024-06-30"),
        duration: SummaryDuration::SemiAnnually,
        view_rank: None,
        hours_viewed: Some(hours),
        views: Some(hours / 2),
        cumulative_weeks_in_top10: None,
    }
}

fn test_movie() -> Movie {
    Movie {
        id: None,
        title: "Leave the World Behind".to_string(),
        original_title: None,
        runtime: 141,
        release_date: Some(date("2023-12-08")),
        available_globally: Some(true),
        locale: None,
        view_summaries: vec![semi_annual_summary(1000)],
    }
}

#[test]
fn save_movie_assigns_ids() {
    let conn = open_memory().unwrap();
    let saved = save_movie(&conn, test_movie()).unwrap();

    assert!(saved.id.is_some());
    assert_eq!(saved.view_summaries.len(), 1);
    assert!(saved.view_summaries[0].id.is_some());
}

#[test]
fn find_movie_by_identity() {
    let conn = open_memory().unwrap();
    let saved = save_movie(&conn, test_movie()).unwrap();

    let found = find_movie(&conn, &IdentityKey::new("Leave the World Behind", 141))
        .unwrap()
        .unwrap();
    assert_eq!(found, saved);

    let other_runtime = find_movie(&conn, &IdentityKey::new("Leave the World Behind", 90)).unwrap();
    assert!(other_runtime.is_none());
}

#[test]
fn save_movie_updates_existing_rows() {
    let conn = open_memory().unwrap();
    let mut saved = save_movie(&conn, test_movie()).unwrap();

    saved.original_title = Some("Leave the World Behind".to_string());
    saved.view_summaries[0].hours_viewed = Some(2000);
    let updated = save_movie(&conn, saved.clone()).unwrap();
    assert_eq!(updated.id, saved.id);

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM view_summary", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);

    let found = find_movie(&conn, &updated.key()).unwrap().unwrap();
    assert_eq!(found.view_summaries[0].hours_viewed, Some(2000));
    assert!(found.original_title.is_some());
}

#[test]
fn save_movie_with_unknown_id_fails() {
    let conn = open_memory().unwrap();
    let mut movie = test_movie();
    movie.id = Some(42);
    let err = save_movie(&conn, movie).unwrap_err();
    assert!(matches!(err, OperationError::NotFound { id: 42, .. }));
}

#[test]
fn duplicate_period_per_owner_is_rejected() {
    let conn = open_memory().unwrap();
    let mut movie = test_movie();
    movie.view_summaries.push(semi_annual_summary(5));
    assert!(save_movie(&conn, movie).is_err());
}

#[test]
fn season_links_to_tv_show() {
    let conn = open_memory().unwrap();
    let show = save_tv_show(
        &conn,
        TvShow {
            id: None,
            title: "Show A".to_string(),
            original_title: None,
            release_date: None,
            available_globally: Some(true),
            locale: None,
        },
    )
    .unwrap();

    let season = save_season(
        &conn,
        Season {
            id: None,
            tv_show_id: show.id,
            season_number: Some(2),
            title: "Show A: Season 2".to_string(),
            original_title: None,
            runtime: 412,
            release_date: None,
            view_summaries: vec![semi_annual_summary(300)],
        },
    )
    .unwrap();

    let found = find_season(&conn, &IdentityKey::new("Show A: Season 2", 412))
        .unwrap()
        .unwrap();
    assert_eq!(found.tv_show_id, show.id);
    assert_eq!(found.view_summaries.len(), 1);
    assert_eq!(found, season);

    let by_title = find_tv_show(&conn, "Show A").unwrap().unwrap();
    assert_eq!(by_title.id, show.id);
    assert_eq!(find_tv_show_by_id(&conn, show.id.unwrap()).unwrap(), Some(by_title));
}

#[test]
fn import_log_round_trip() {
    let conn = open_memory().unwrap();
    let id = insert_import_log(
        &conn,
        &ImportLog {
            id: 0,
            report_name: "engagement-2024-h1-film".to_string(),
            report_kind: "engagement".to_string(),
            source_path: "reports/film.csv".to_string(),
            imported_at: "2024-09-01T00:00:00Z".to_string(),
            rows_read: 10,
            rows_accepted: 8,
            rows_dropped: 2,
        },
    )
    .unwrap();
    assert!(id > 0);

    let logs = list_import_logs(&conn, 10).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].rows_dropped, 2);
}
