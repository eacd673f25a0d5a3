use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Manifest could not be loaded
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Report import failed
    #[error("Import error: {0}")]
    Import(String),

    /// The expected period has no data
    #[error("Verification failed: {0}")]
    Verify(String),

    /// Dump rendering or writing failed
    #[error("Export error: {0}")]
    Export(String),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn manifest(msg: impl Into<String>) -> Self {
        Self::Manifest(msg.into())
    }

    pub(crate) fn import(msg: impl Into<String>) -> Self {
        Self::Import(msg.into())
    }

    pub(crate) fn verify(msg: impl Into<String>) -> Self {
        Self::Verify(msg.into())
    }

    pub(crate) fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }
}
