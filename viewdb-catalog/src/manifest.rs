//! YAML loading for the report manifest.
//!
//! A manifest lists the reports that make up one run and where their CSV
//! exports live. Relative paths resolve against the manifest's directory.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::SummaryDuration;

#[derive(Debug, Error)]
pub enum YamlError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Invalid report entry '{name}': {reason}")]
    InvalidEntry { name: String, reason: String },
}

/// The two report shapes understood by the importer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Semi-annual "What We Watched" engagement report.
    Engagement,
    /// Global weekly top-10 list.
    Top10,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Engagement => "engagement",
            Self::Top10 => "top10",
        }
    }

    pub fn duration(&self) -> SummaryDuration {
        match self {
            Self::Engagement => SummaryDuration::SemiAnnually,
            Self::Top10 => SummaryDuration::Weekly,
        }
    }
}

/// Optional column-name overrides. Unset entries fall back to the defaults
/// for the report kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnOverrides {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub season_title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub runtime: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub available_globally: Option<String>,
    #[serde(default)]
    pub hours_viewed: Option<String>,
    #[serde(default)]
    pub views: Option<String>,
    #[serde(default)]
    pub view_rank: Option<String>,
    #[serde(default)]
    pub cumulative_weeks_in_top10: Option<String>,
    #[serde(default)]
    pub week: Option<String>,
}

/// One report of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    pub name: String,
    pub kind: ReportKind,
    pub path: PathBuf,
    /// Worksheet name the CSV was exported from; drives category detection
    /// for engagement reports.
    #[serde(default)]
    pub sheet: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub columns: ColumnOverrides,
}

/// Settings for the post-merge verification step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifySettings {
    #[serde(default)]
    pub expected_period_end: Option<NaiveDate>,
}

/// A full report manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportManifest {
    pub reports: Vec<ReportEntry>,
    #[serde(default)]
    pub verify: VerifySettings,
}

/// Load a manifest file and resolve report paths relative to it.
///
/// Engagement entries must carry both `start_date` and `end_date`.
pub fn load_manifest(path: &Path) -> Result<ReportManifest, YamlError> {
    let contents = std::fs::read_to_string(path).map_err(|e| YamlError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let mut manifest: ReportManifest =
        serde_yml::from_str(&contents).map_err(|e| YamlError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    for entry in &mut manifest.reports {
        if entry.path.is_relative() {
            entry.path = base.join(&entry.path);
        }
        validate_entry(entry)?;
    }

    Ok(manifest)
}

fn validate_entry(entry: &ReportEntry) -> Result<(), YamlError> {
    if entry.kind != ReportKind::Engagement {
        return Ok(());
    }
    match (entry.start_date, entry.end_date) {
        (Some(start), Some(end)) if start <= end => Ok(()),
        (Some(_), Some(_)) => Err(YamlError::InvalidEntry {
            name: entry.name.clone(),
            reason: "start_date is after end_date".to_string(),
        }),
        _ => Err(YamlError::InvalidEntry {
            name: entry.name.clone(),
            reason: "engagement reports need start_date and end_date".to_string(),
        }),
    }
}
