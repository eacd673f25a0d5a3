//! CSV report sources.
//!
//! Each worksheet of a report is exported to CSV. A [`CsvReportSource`] owns
//! the reader (and so the file handle) and hands out its records once; the
//! handle is released when the record iterator is dropped.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use chrono::NaiveDate;
use viewdb_catalog::manifest::{ColumnOverrides, ReportEntry, ReportKind};
use viewdb_catalog::types::SummaryDuration;

use crate::report_import::ImportError;

/// Static description of one report, taken from its manifest entry.
#[derive(Debug, Clone)]
pub struct ReportMetadata {
    pub name: String,
    pub kind: ReportKind,
    pub source: PathBuf,
    pub sheet: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub columns: ColumnOverrides,
}

impl ReportMetadata {
    pub fn from_entry(entry: &ReportEntry) -> Self {
        Self {
            name: entry.name.clone(),
            kind: entry.kind,
            source: entry.path.clone(),
            sheet: entry.sheet.clone(),
            start_date: entry.start_date,
            end_date: entry.end_date,
            columns: entry.columns.clone(),
        }
    }

    pub fn duration(&self) -> SummaryDuration {
        self.kind.duration()
    }
}

/// One CSV line, addressed by header name.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    cells: HashMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests.
    pub fn with(mut self, column: &str, value: &str) -> Self {
        self.cells.insert(column.to_string(), value.to_string());
        self
    }

    /// Trimmed cell value. Blank cells and unknown columns are `None`.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// A report backed by CSV data.
pub struct CsvReportSource<R: Read> {
    metadata: ReportMetadata,
    headers: Vec<String>,
    reader: csv::Reader<R>,
}

impl CsvReportSource<File> {
    /// Open the CSV file named by a manifest entry.
    pub fn open(entry: &ReportEntry) -> Result<Self, ImportError> {
        let file = File::open(&entry.path).map_err(|e| ImportError::Io {
            path: entry.path.display().to_string(),
            source: e,
        })?;
        Self::from_reader(ReportMetadata::from_entry(entry), file)
    }
}

impl<R: Read> CsvReportSource<R> {
    pub fn from_reader(metadata: ReportMetadata, rdr: R) -> Result<Self, ImportError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(rdr);

        let headers = reader
            .headers()
            .map_err(|e| ImportError::Csv {
                path: metadata.source.display().to_string(),
                source: e,
            })?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        Ok(Self {
            metadata,
            headers,
            reader,
        })
    }

    pub fn metadata(&self) -> &ReportMetadata {
        &self.metadata
    }

    /// Consume the source, yielding its records in file order.
    pub fn into_records(self) -> RawRecords<R> {
        RawRecords {
            name: self.metadata.name,
            headers: self.headers,
            inner: self.reader.into_records(),
        }
    }
}

/// Lazy iterator over the records of a [`CsvReportSource`].
pub struct RawRecords<R: Read> {
    name: String,
    headers: Vec<String>,
    inner: csv::StringRecordsIntoIter<R>,
}

impl<R: Read> Iterator for RawRecords<R> {
    type Item = RawRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.inner.next()? {
                Ok(r) => r,
                Err(e) => {
                    log::warn!("Skipping malformed CSV row in {}: {e}", self.name);
                    continue;
                }
            };

            let cells = self
                .headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.clone(), v.to_string()))
                .collect();
            return Some(RawRecord { cells });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> ReportMetadata {
        ReportMetadata {
            name: "test".to_string(),
            kind: ReportKind::Top10,
            source: PathBuf::from("test.csv"),
            sheet: None,
            start_date: None,
            end_date: None,
            columns: ColumnOverrides::default(),
        }
    }

    #[test]
    fn test_records_by_header() {
        let csv = "\u{feff}week,show_title\n2024-03-10,Wednesday\n2024-03-10,\n";
        let source = CsvReportSource::from_reader(metadata(), csv.as_bytes()).unwrap();
        let records: Vec<_> = source.into_records().collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("week"), Some("2024-03-10"));
        assert_eq!(records[0].get("show_title"), Some("Wednesday"));
        assert_eq!(records[1].get("show_title"), None);
        assert_eq!(records[1].get("missing"), None);
    }

    #[test]
    fn test_short_rows_are_kept() {
        let csv = "a,b,c\n1,2\n";
        let source = CsvReportSource::from_reader(metadata(), csv.as_bytes()).unwrap();
        let records: Vec<_> = source.into_records().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("b"), Some("2"));
        assert_eq!(records[0].get("c"), None);
    }
}
