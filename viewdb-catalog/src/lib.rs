//! Streaming catalog data model types, title parsing, and the YAML report manifest.
//!
//! This crate defines the persistent data model without any database
//! dependencies. Consumers can use these types directly or pass them to
//! `viewdb-db` for persistence.

pub mod manifest;
pub mod title_parser;
pub mod types;

pub use manifest::{
    ColumnOverrides, ReportEntry, ReportKind, ReportManifest, VerifySettings, YamlError,
    load_manifest,
};
pub use title_parser::{extract_season_number, split_combined_title, strip_season_suffix};
pub use types::*;
