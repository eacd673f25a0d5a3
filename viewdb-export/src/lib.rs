//! SQL dump export for the streaming catalog.
//!
//! Renders the stored catalog as a portable `.sql` script (schema followed
//! by batched INSERTs) for several database dialects, optionally zipped.

pub mod archive;
pub mod dialect;
pub mod error;
pub mod export;
pub mod render;
pub mod schema;

pub use dialect::Dialect;
pub use error::ExportError;
pub use export::{
    DEFAULT_BATCH_SIZE, ExportArtifact, ExportOptions, dump_path, export_database, export_named,
    load_snapshot,
};
pub use render::{Snapshot, render_dump, render_inserts};
