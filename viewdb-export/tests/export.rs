use chrono::NaiveDate;
use viewdb_catalog::types::*;
use viewdb_db::*;
use viewdb_export::*;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn weekly(end: &str, rank: i64) -> ViewSummary {
    let end_date = date(end);
    ViewSummary {
        id: None,
        start_date: end_date - chrono::Days::new(6),
        end_date,
        duration: SummaryDuration::Weekly,
        view_rank: Some(rank),
        hours_viewed: Some(12_000),
        views: Some(4_000),
        cumulative_weeks_in_top10: Some(1),
    }
}

fn seeded() -> rusqlite::Connection {
    let conn = open_memory().unwrap();
    save_movie(
        &conn,
        Movie {
            id: None,
            title: "Don't Look Up".to_string(),
            original_title: None,
            runtime: 138,
            release_date: Some(date("2021-12-24")),
            available_globally: Some(true),
            locale: Some("en".to_string()),
            view_summaries: vec![weekly("2024-03-10", 4)],
        },
    )
    .unwrap();

    let show = save_tv_show(
        &conn,
        TvShow {
            id: None,
            title: "Show A".to_string(),
            original_title: None,
            release_date: None,
            available_globally: Some(false),
            locale: None,
        },
    )
    .unwrap();
    save_season(
        &conn,
        Season {
            id: None,
            tv_show_id: show.id,
            season_number: Some(2),
            title: "Show A: Season 2".to_string(),
            original_title: None,
            runtime: 400,
            release_date: None,
            view_summaries: vec![weekly("2024-03-10", 1), weekly("2024-03-17", 2)],
        },
    )
    .unwrap();
    conn
}

#[test]
fn exports_every_dialect() {
    let conn = seeded();
    let tmp = tempfile::tempdir().unwrap();
    let options = ExportOptions {
        out_dir: tmp.path().join("artifacts"),
        batch_size: 100,
        compress: true,
    };

    let artifacts = export_database(&conn, Dialect::ALL, &options).unwrap();
    assert_eq!(artifacts.len(), 5);
    for artifact in &artifacts {
        assert_eq!(artifact.sql_path, dump_path(&options.out_dir, artifact.dialect));
        assert!(artifact.sql_path.exists());
        assert!(artifact.zip_path.as_ref().unwrap().exists());
    }

    let postgres = std::fs::read_to_string(options.out_dir.join("viewdb-postgresql.sql")).unwrap();
    assert!(postgres.contains("ViewDB for POSTGRESQL"));
    assert!(postgres.contains("'Don''t Look Up'"));
    assert!(postgres.find("CREATE TABLE view_summary").unwrap() < postgres.find("INSERT INTO movie").unwrap());

    let sqlserver = std::fs::read_to_string(options.out_dir.join("viewdb-sqlserver.sql")).unwrap();
    assert!(sqlserver.contains("N'Don''t Look Up'"));
    assert!(sqlserver.contains("N'WEEKLY'"));

    let oracle = std::fs::read_to_string(options.out_dir.join("viewdb-oracle.sql")).unwrap();
    assert!(oracle.contains("date '2024-03-10'"));
    assert_eq!(oracle.matches("INSERT INTO view_summary").count(), 3);
}

#[test]
fn sqlite_dump_loads_back() {
    let conn = seeded();
    let tmp = tempfile::tempdir().unwrap();
    let options = ExportOptions {
        out_dir: tmp.path().to_path_buf(),
        batch_size: 2,
        compress: false,
    };

    let artifacts = export_database(&conn, &[Dialect::Sqlite], &options).unwrap();
    assert!(artifacts[0].zip_path.is_none());

    let sql = std::fs::read_to_string(&artifacts[0].sql_path).unwrap();
    let target = rusqlite::Connection::open_in_memory().unwrap();
    target.execute_batch(&sql).unwrap();

    let summaries: i64 = target
        .query_row("SELECT COUNT(*) FROM view_summary", [], |r| r.get(0))
        .unwrap();
    assert_eq!(summaries, 3);
    let title: String = target
        .query_row("SELECT title FROM movie WHERE id = 1", [], |r| r.get(0))
        .unwrap();
    assert_eq!(title, "Don't Look Up");
}

#[test]
fn unsupported_dialect_writes_nothing() {
    let conn = seeded();
    let tmp = tempfile::tempdir().unwrap();
    let options = ExportOptions {
        out_dir: tmp.path().join("artifacts"),
        ..Default::default()
    };

    let err = export_named(&conn, "postgresql,db2", &options).unwrap_err();
    assert!(matches!(err, ExportError::UnsupportedDialect(name) if name == "db2"));
    assert!(!options.out_dir.exists());
}
