//! Import streaming engagement reports into the catalog database.
//!
//! This crate owns all ETL logic: reading CSV report exports, normalizing
//! rows, grouping them by identity, merging them into movies, seasons and
//! shows without losing data, and verifying the latest period landed.

pub mod accumulator;
pub mod merge;
pub mod normalize;
pub mod progress;
pub mod report_import;
pub mod source;
pub mod summary;
pub mod verify;

pub use accumulator::{AccumulatedGroups, DropReason, RunAccumulator};
pub use merge::{MergeStats, check_field, merge_groups, merge_movies, merge_seasons};
pub use normalize::{Columns, normalize, parse_int, parse_runtime_minutes};
pub use progress::{ImportProgress, LogProgress, SilentProgress};
pub use report_import::{
    ImportError, ImportStats, RunStats, import_manifest, log_import, merge_rows, read_report,
};
pub use source::{CsvReportSource, RawRecord, ReportMetadata};
pub use summary::{SummaryMerge, merge_view_summary};
pub use verify::{VerifyError, expected_period_end, latest_completed_week_ending, verify_period};
