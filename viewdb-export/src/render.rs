//! SQL dump rendering: header, DDL, then batched INSERT statements.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use viewdb_catalog::types::*;

use crate::dialect::Dialect;
use crate::schema::{self, Table};

/// Everything exported from the store, each list in id order.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub tv_shows: Vec<TvShow>,
    pub movies: Vec<Movie>,
    pub seasons: Vec<Season>,
    pub view_summaries: Vec<ViewSummaryRecord>,
}

/// Render INSERT statements for `rows`, `batch_size` rows per statement.
///
/// The batch size is capped by what the dialect accepts; Oracle always gets
/// one statement per row.
pub fn render_inserts<T: 'static>(
    dialect: Dialect,
    table: &Table<T>,
    rows: &[T],
    batch_size: usize,
) -> String {
    let mut batch = batch_size.max(1);
    if let Some(max) = dialect.max_rows_per_insert() {
        batch = batch.min(max);
    }

    let prefix = format!("INSERT INTO {} ({}) VALUES", table.name, table.column_names().join(", "));
    let mut out = String::new();

    for chunk in rows.chunks(batch) {
        let tuples: Vec<String> = chunk
            .iter()
            .map(|row| {
                let values: Vec<String> =
                    table.values(row).iter().map(|v| dialect.literal(v)).collect();
                format!("({})", values.join(", "))
            })
            .collect();

        if tuples.len() == 1 || !dialect.supports_multi_row_insert() {
            for tuple in tuples {
                let _ = writeln!(out, "{prefix} {tuple};");
            }
        } else {
            let _ = writeln!(out, "{prefix}\n    {};", tuples.join(",\n    "));
        }
    }

    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n-- ─── {title} ───\n");
}

/// Render the full dump for one dialect.
pub fn render_dump(
    dialect: Dialect,
    snapshot: &Snapshot,
    batch_size: usize,
    generated_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "/*");
    let _ = writeln!(out, "  ViewDB for {}", dialect.name().to_uppercase());
    let _ = writeln!(out, "  Description: Creates and populates the streaming catalog database.");
    let _ = writeln!(out, "  Created on: {}", generated_at.to_rfc3339());
    let _ = writeln!(out);
    let _ = writeln!(out, "  WARNING: This file is generated; changes will be lost when it is regenerated.");
    let _ = writeln!(out, "*/");

    section(&mut out, "Schema");
    out.push_str(&schema::TV_SHOW.create_sql(dialect));
    out.push('\n');
    out.push_str(&schema::MOVIE.create_sql(dialect));
    out.push('\n');
    out.push_str(&schema::SEASON.create_sql(dialect));
    out.push('\n');
    out.push_str(&schema::VIEW_SUMMARY.create_sql(dialect));

    section(&mut out, "Data: tv_show");
    out.push_str(&render_inserts(dialect, &schema::TV_SHOW, &snapshot.tv_shows, batch_size));
    section(&mut out, "Data: movie");
    out.push_str(&render_inserts(dialect, &schema::MOVIE, &snapshot.movies, batch_size));
    section(&mut out, "Data: season");
    out.push_str(&render_inserts(dialect, &schema::SEASON, &snapshot.seasons, batch_size));
    section(&mut out, "Data: view_summary");
    out.push_str(&render_inserts(
        dialect,
        &schema::VIEW_SUMMARY,
        &snapshot.view_summaries,
        batch_size,
    ));

    out
}
