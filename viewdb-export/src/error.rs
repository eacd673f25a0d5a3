use thiserror::Error;
use viewdb_db::OperationError;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported dialect: {0}")]
    UnsupportedDialect(String),

    #[error("Database error: {0}")]
    Db(#[from] OperationError),

    #[error("I/O error writing {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl ExportError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
