//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "viewdb")]
#[command(about = "Build a portable SQL database from streaming engagement reports", long_about = None)]
pub(crate) struct Cli {
    /// Catalog database path (default: <cache dir>/viewdb/viewdb.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments shared by commands that write SQL dumps.
#[derive(Args, Clone)]
pub(crate) struct ExportArgs {
    /// Directory for the generated .sql/.zip files
    #[arg(long, default_value = "build/artifacts")]
    pub out_dir: PathBuf,

    /// Target dialects (e.g., postgresql,mysql,sqlserver,oracle,sqlite); all when omitted
    #[arg(long)]
    pub dialect: Option<String>,

    /// Don't compress the dumps
    #[arg(long)]
    pub no_zip: bool,

    /// Rows per INSERT statement
    #[arg(long, default_value_t = viewdb_export::DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Import and merge every report listed in a manifest
    Import {
        /// Report manifest (YAML)
        #[arg(long)]
        manifest: PathBuf,
    },

    /// Check that the latest reporting period has view summaries
    Verify {
        /// Week-ending date to check (default: manifest setting, else last Sunday)
        #[arg(long)]
        expect_period_end: Option<NaiveDate>,

        /// Report manifest to read `verify.expected_period_end` from
        #[arg(long)]
        manifest: Option<PathBuf>,
    },

    /// Write SQL dumps of the catalog database
    Export {
        #[command(flatten)]
        export: ExportArgs,
    },

    /// Import, verify, then export in one run
    Build {
        /// Report manifest (YAML)
        #[arg(long)]
        manifest: PathBuf,

        /// Week-ending date to check (default: manifest setting, else last Sunday)
        #[arg(long)]
        expect_period_end: Option<NaiveDate>,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Show catalog database statistics
    Stats,
}
