//! Target SQL dialects and their literal and type syntax.

use std::fmt;
use std::str::FromStr;

use crate::error::ExportError;
use crate::schema::{ColumnKind, SqlValue};

/// A database the dump can be loaded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    PostgreSql,
    MySql,
    SqlServer,
    Oracle,
    Sqlite,
}

impl Dialect {
    pub const ALL: &'static [Dialect] = &[
        Self::PostgreSql,
        Self::MySql,
        Self::SqlServer,
        Self::Oracle,
        Self::Sqlite,
    ];

    /// Name used in output file names and the dump header.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PostgreSql => "postgresql",
            Self::MySql => "mysql",
            Self::SqlServer => "sqlserver",
            Self::Oracle => "oracle",
            Self::Sqlite => "sqlite",
        }
    }

    /// Parse a comma-separated dialect list.
    ///
    /// Fails on the first unknown name, so nothing is rendered for a list
    /// that contains a typo. Duplicates are collapsed.
    pub fn parse_list(list: &str) -> Result<Vec<Dialect>, ExportError> {
        let mut dialects = Vec::new();
        for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let dialect: Dialect = name.parse()?;
            if !dialects.contains(&dialect) {
                dialects.push(dialect);
            }
        }
        Ok(dialects)
    }

    /// Whether one INSERT may carry several rows.
    pub fn supports_multi_row_insert(&self) -> bool {
        !matches!(self, Self::Oracle)
    }

    /// Upper bound on rows per INSERT imposed by the database.
    pub fn max_rows_per_insert(&self) -> Option<usize> {
        match self {
            Self::SqlServer => Some(1000),
            Self::Oracle => Some(1),
            _ => None,
        }
    }

    // ── Types ───────────────────────────────────────────────────────────

    pub fn column_type(&self, kind: ColumnKind) -> &'static str {
        use ColumnKind::*;
        match (self, kind) {
            (Self::Sqlite, Id | ForeignKey(_) | Integer | Boolean) => "INTEGER",
            (Self::Sqlite, Text | Enum | Date) => "TEXT",

            (Self::Oracle, Id | ForeignKey(_) | Integer) => "NUMBER(19)",
            (Self::Oracle, Text) => "VARCHAR2(255 CHAR)",
            (Self::Oracle, Enum) => "VARCHAR2(20 CHAR)",
            (Self::Oracle, Boolean) => "NUMBER(1)",

            (Self::SqlServer, Text) => "NVARCHAR(255)",
            (Self::SqlServer, Enum) => "NVARCHAR(20)",
            (Self::SqlServer, Boolean) => "BIT",

            (_, Id | ForeignKey(_) | Integer) => "BIGINT",
            (_, Text) => "VARCHAR(255)",
            (_, Enum) => "VARCHAR(20)",
            (_, Boolean) => "BOOLEAN",
            (_, Date) => "DATE",
        }
    }

    // ── Literals ────────────────────────────────────────────────────────

    /// Render a value as a SQL literal.
    ///
    /// ```
    /// use viewdb_export::Dialect;
    /// use viewdb_export::schema::SqlValue;
    ///
    /// let title = SqlValue::Text("Don't Look Up".to_string());
    /// assert_eq!(Dialect::PostgreSql.literal(&title), "'Don''t Look Up'");
    /// assert_eq!(Dialect::SqlServer.literal(&title), "N'Don''t Look Up'");
    /// assert_eq!(Dialect::Oracle.literal(&SqlValue::Bool(true)), "1");
    /// ```
    pub fn literal(&self, value: &SqlValue) -> String {
        match value {
            SqlValue::Null => "null".to_string(),
            SqlValue::Int(n) => n.to_string(),
            SqlValue::Text(s) => self.quote(s),
            SqlValue::Enum(name) => self.quote(name),
            SqlValue::Bool(b) => match self {
                Self::PostgreSql | Self::MySql => b.to_string(),
                Self::SqlServer | Self::Oracle | Self::Sqlite => u8::from(*b).to_string(),
            },
            SqlValue::Date(d) => {
                let iso = d.format("%Y-%m-%d").to_string();
                match self {
                    Self::Oracle => format!("date '{iso}'"),
                    _ => format!("'{iso}'"),
                }
            }
        }
    }

    fn quote(&self, s: &str) -> String {
        let escaped = s.replace('\'', "''");
        match self {
            Self::SqlServer => format!("N'{escaped}'"),
            _ => format!("'{escaped}'"),
        }
    }
}

impl FromStr for Dialect {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgresql" | "postgres" | "h2" => Ok(Self::PostgreSql),
            "mysql" => Ok(Self::MySql),
            "sqlserver" | "mssql" => Ok(Self::SqlServer),
            "oracle" => Ok(Self::Oracle),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(ExportError::UnsupportedDialect(s.to_string())),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("postgres".parse::<Dialect>().unwrap(), Dialect::PostgreSql);
        assert_eq!("H2".parse::<Dialect>().unwrap(), Dialect::PostgreSql);
        assert_eq!("mssql".parse::<Dialect>().unwrap(), Dialect::SqlServer);
        assert!(matches!(
            "db2".parse::<Dialect>(),
            Err(ExportError::UnsupportedDialect(name)) if name == "db2"
        ));
    }

    #[test]
    fn test_parse_list() {
        let list = Dialect::parse_list("mysql, oracle,mysql").unwrap();
        assert_eq!(list, vec![Dialect::MySql, Dialect::Oracle]);
        assert!(Dialect::parse_list("sqlite,informix").is_err());
    }

    #[test]
    fn test_date_literals() {
        let d = SqlValue::Date(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert_eq!(Dialect::PostgreSql.literal(&d), "'2024-03-10'");
        assert_eq!(Dialect::Oracle.literal(&d), "date '2024-03-10'");
    }

    #[test]
    fn test_bool_and_null_literals() {
        assert_eq!(Dialect::MySql.literal(&SqlValue::Bool(false)), "false");
        assert_eq!(Dialect::SqlServer.literal(&SqlValue::Bool(false)), "0");
        assert_eq!(Dialect::Sqlite.literal(&SqlValue::Null), "null");
        assert_eq!(Dialect::SqlServer.literal(&SqlValue::Enum("WEEKLY")), "N'WEEKLY'");
    }
}
