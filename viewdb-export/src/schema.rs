//! Static table descriptors for the exported schema.
//!
//! Each exported table is an ordered list of columns, every column carrying
//! its SQL kind and an accessor that pulls the value out of a catalog entity.

use chrono::NaiveDate;
use viewdb_catalog::types::*;

use crate::dialect::Dialect;

/// Logical column type; each dialect maps it to a physical type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Surrogate primary key.
    Id,
    /// Reference to the `id` of the named table.
    ForeignKey(&'static str),
    Text,
    Integer,
    Date,
    Boolean,
    /// Enum stored by name.
    Enum,
}

/// A value ready to be rendered as a SQL literal.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Text(String),
    Date(NaiveDate),
    Bool(bool),
    Enum(&'static str),
}

impl From<Option<i64>> for SqlValue {
    fn from(v: Option<i64>) -> Self {
        v.map_or(Self::Null, Self::Int)
    }
}

impl From<Option<&String>> for SqlValue {
    fn from(v: Option<&String>) -> Self {
        v.map_or(Self::Null, |s| Self::Text(s.clone()))
    }
}

impl From<Option<NaiveDate>> for SqlValue {
    fn from(v: Option<NaiveDate>) -> Self {
        v.map_or(Self::Null, Self::Date)
    }
}

impl From<Option<bool>> for SqlValue {
    fn from(v: Option<bool>) -> Self {
        v.map_or(Self::Null, Self::Bool)
    }
}

pub struct Column<T> {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
    pub value: fn(&T) -> SqlValue,
}

pub struct Table<T: 'static> {
    pub name: &'static str,
    pub columns: &'static [Column<T>],
    /// Column sets that must be unique, besides the primary key.
    pub unique: &'static [&'static [&'static str]],
}

// ── Tables ──────────────────────────────────────────────────────────────────

#[rustfmt::skip]
pub static TV_SHOW: Table<TvShow> = Table {
    name: "tv_show",
    columns: &[
        Column { name: "id", kind: ColumnKind::Id, nullable: false, value: |s| s.id.into() },
        Column { name: "title", kind: ColumnKind::Text, nullable: false, value: |s| SqlValue::Text(s.title.clone()) },
        Column { name: "original_title", kind: ColumnKind::Text, nullable: true, value: |s| s.original_title.as_ref().into() },
        Column { name: "release_date", kind: ColumnKind::Date, nullable: true, value: |s| s.release_date.into() },
        Column { name: "available_globally", kind: ColumnKind::Boolean, nullable: true, value: |s| s.available_globally.into() },
        Column { name: "locale", kind: ColumnKind::Text, nullable: true, value: |s| s.locale.as_ref().into() },
    ],
    unique: &[&["title"]],
};

#[rustfmt::skip]
pub static MOVIE: Table<Movie> = Table {
    name: "movie",
    columns: &[
        Column { name: "id", kind: ColumnKind::Id, nullable: false, value: |m| m.id.into() },
        Column { name: "title", kind: ColumnKind::Text, nullable: false, value: |m| SqlValue::Text(m.title.clone()) },
        Column { name: "original_title", kind: ColumnKind::Text, nullable: true, value: |m| m.original_title.as_ref().into() },
        Column { name: "runtime", kind: ColumnKind::Integer, nullable: false, value: |m| SqlValue::Int(m.runtime) },
        Column { name: "release_date", kind: ColumnKind::Date, nullable: true, value: |m| m.release_date.into() },
        Column { name: "available_globally", kind: ColumnKind::Boolean, nullable: true, value: |m| m.available_globally.into() },
        Column { name: "locale", kind: ColumnKind::Text, nullable: true, value: |m| m.locale.as_ref().into() },
    ],
    unique: &[&["title", "runtime"]],
};

#[rustfmt::skip]
pub static SEASON: Table<Season> = Table {
    name: "season",
    columns: &[
        Column { name: "id", kind: ColumnKind::Id, nullable: false, value: |s| s.id.into() },
        Column { name: "tv_show_id", kind: ColumnKind::ForeignKey("tv_show"), nullable: true, value: |s| s.tv_show_id.into() },
        Column { name: "season_number", kind: ColumnKind::Integer, nullable: true, value: |s| s.season_number.map(i64::from).into() },
        Column { name: "title", kind: ColumnKind::Text, nullable: false, value: |s| SqlValue::Text(s.title.clone()) },
        Column { name: "original_title", kind: ColumnKind::Text, nullable: true, value: |s| s.original_title.as_ref().into() },
        Column { name: "runtime", kind: ColumnKind::Integer, nullable: false, value: |s| SqlValue::Int(s.runtime) },
        Column { name: "release_date", kind: ColumnKind::Date, nullable: true, value: |s| s.release_date.into() },
    ],
    unique: &[&["title", "runtime"]],
};

#[rustfmt::skip]
pub static VIEW_SUMMARY: Table<ViewSummaryRecord> = Table {
    name: "view_summary",
    columns: &[
        Column { name: "id", kind: ColumnKind::Id, nullable: false, value: |r| r.summary.id.into() },
        Column { name: "movie_id", kind: ColumnKind::ForeignKey("movie"), nullable: true, value: |r| r.owner.movie_id().into() },
        Column { name: "season_id", kind: ColumnKind::ForeignKey("season"), nullable: true, value: |r| r.owner.season_id().into() },
        Column { name: "start_date", kind: ColumnKind::Date, nullable: false, value: |r| SqlValue::Date(r.summary.start_date) },
        Column { name: "end_date", kind: ColumnKind::Date, nullable: false, value: |r| SqlValue::Date(r.summary.end_date) },
        Column { name: "duration", kind: ColumnKind::Enum, nullable: false, value: |r| SqlValue::Enum(r.summary.duration.as_str()) },
        Column { name: "view_rank", kind: ColumnKind::Integer, nullable: true, value: |r| r.summary.view_rank.into() },
        Column { name: "hours_viewed", kind: ColumnKind::Integer, nullable: true, value: |r| r.summary.hours_viewed.into() },
        Column { name: "views", kind: ColumnKind::Integer, nullable: true, value: |r| r.summary.views.into() },
        Column { name: "cumulative_weeks_in_top10", kind: ColumnKind::Integer, nullable: true, value: |r| r.summary.cumulative_weeks_in_top10.into() },
    ],
    unique: &[],
};

// ── DDL ─────────────────────────────────────────────────────────────────────

impl<T: 'static> Table<T> {
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    /// The row's values in column order.
    pub fn values(&self, row: &T) -> Vec<SqlValue> {
        self.columns.iter().map(|c| (c.value)(row)).collect()
    }

    /// `CREATE TABLE` plus unique indexes for one dialect.
    pub fn create_sql(&self, dialect: Dialect) -> String {
        let mut lines: Vec<String> = self
            .columns
            .iter()
            .map(|c| {
                let null = if c.nullable { "" } else { " NOT NULL" };
                format!("    {} {}{}", c.name, dialect.column_type(c.kind), null)
            })
            .collect();

        lines.push("    PRIMARY KEY (id)".to_string());
        for c in self.columns {
            if let ColumnKind::ForeignKey(target) = c.kind {
                lines.push(format!(
                    "    CONSTRAINT fk_{}_{} FOREIGN KEY ({}) REFERENCES {} (id)",
                    self.name, c.name, c.name, target
                ));
            }
        }

        let mut sql = format!("CREATE TABLE {} (\n{}\n);\n", self.name, lines.join(",\n"));
        for columns in self.unique {
            sql.push_str(&format!(
                "CREATE UNIQUE INDEX idx_{}_{} ON {} ({});\n",
                self.name,
                columns.join("_"),
                self.name,
                columns.join(", ")
            ));
        }
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_ddl_postgres() {
        let sql = MOVIE.create_sql(Dialect::PostgreSql);
        assert!(sql.starts_with("CREATE TABLE movie (\n    id BIGINT NOT NULL,\n"));
        assert!(sql.contains("    available_globally BOOLEAN,\n"));
        assert!(sql.contains("    PRIMARY KEY (id)\n);"));
        assert!(sql.contains("CREATE UNIQUE INDEX idx_movie_title_runtime ON movie (title, runtime);"));
    }

    #[test]
    fn test_view_summary_foreign_keys() {
        let sql = VIEW_SUMMARY.create_sql(Dialect::Oracle);
        assert!(sql.contains("CONSTRAINT fk_view_summary_movie_id FOREIGN KEY (movie_id) REFERENCES movie (id)"));
        assert!(sql.contains("CONSTRAINT fk_view_summary_season_id FOREIGN KEY (season_id) REFERENCES season (id)"));
        assert!(sql.contains("    duration VARCHAR2(20 CHAR) NOT NULL,\n"));
    }

    #[test]
    fn test_values_follow_column_order() {
        let record = ViewSummaryRecord {
            owner: SummaryOwner::Season(4),
            summary: ViewSummary {
                id: Some(9),
                start_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
                duration: SummaryDuration::Weekly,
                view_rank: Some(1),
                hours_viewed: None,
                views: None,
                cumulative_weeks_in_top10: Some(2),
            },
        };
        let values = VIEW_SUMMARY.values(&record);
        assert_eq!(values.len(), VIEW_SUMMARY.column_names().len());
        assert_eq!(values[0], SqlValue::Int(9));
        assert_eq!(values[1], SqlValue::Null);
        assert_eq!(values[2], SqlValue::Int(4));
        assert_eq!(values[5], SqlValue::Enum("WEEKLY"));
    }
}
