//! Writing dumps for a set of dialects.

use std::path::{Path, PathBuf};

use viewdb_db::EntityStore;

use crate::dialect::Dialect;
use crate::error::ExportError;
use crate::render::{Snapshot, render_dump};

pub const DEFAULT_BATCH_SIZE: usize = 100;

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    pub batch_size: usize,
    /// Also write a `.zip` next to each `.sql` file.
    pub compress: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("build/artifacts"),
            batch_size: DEFAULT_BATCH_SIZE,
            compress: true,
        }
    }
}

/// Files written for one dialect.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub dialect: Dialect,
    pub sql_path: PathBuf,
    pub zip_path: Option<PathBuf>,
}

/// Load every exported entity from the store, in id order.
pub fn load_snapshot<S: EntityStore + ?Sized>(store: &S) -> Result<Snapshot, ExportError> {
    Ok(Snapshot {
        tv_shows: store.all_tv_shows()?,
        movies: store.all_movies()?,
        seasons: store.all_seasons()?,
        view_summaries: store.all_view_summaries()?,
    })
}

/// Output path of the dump for `dialect`.
pub fn dump_path(out_dir: &Path, dialect: Dialect) -> PathBuf {
    out_dir.join(format!("viewdb-{}.sql", dialect.name()))
}

/// Export the store once per dialect.
pub fn export_database<S: EntityStore + ?Sized>(
    store: &S,
    dialects: &[Dialect],
    options: &ExportOptions,
) -> Result<Vec<ExportArtifact>, ExportError> {
    let snapshot = load_snapshot(store)?;
    log::info!(
        "Exporting {} shows, {} movies, {} seasons, {} view summaries",
        snapshot.tv_shows.len(),
        snapshot.movies.len(),
        snapshot.seasons.len(),
        snapshot.view_summaries.len()
    );

    std::fs::create_dir_all(&options.out_dir).map_err(|e| ExportError::io(&options.out_dir, e))?;
    let generated_at = chrono::Utc::now();

    let mut artifacts = Vec::with_capacity(dialects.len());
    for &dialect in dialects {
        let sql_path = dump_path(&options.out_dir, dialect);
        let sql = render_dump(dialect, &snapshot, options.batch_size, generated_at);
        std::fs::write(&sql_path, sql).map_err(|e| ExportError::io(&sql_path, e))?;
        log::info!("Wrote {}", sql_path.display());

        let zip_path = if options.compress {
            let path = crate::archive::zip_file(&sql_path)?;
            log::info!("Wrote {}", path.display());
            Some(path)
        } else {
            None
        };

        artifacts.push(ExportArtifact {
            dialect,
            sql_path,
            zip_path,
        });
    }

    Ok(artifacts)
}

/// Like [`export_database`], taking dialect names.
///
/// Every name is checked before anything is written.
pub fn export_named<S: EntityStore + ?Sized>(
    store: &S,
    names: &str,
    options: &ExportOptions,
) -> Result<Vec<ExportArtifact>, ExportError> {
    let dialects = Dialect::parse_list(names)?;
    export_database(store, &dialects, options)
}
