//! Zip compression of rendered dumps.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::ExportError;

/// Compress `path` into a sibling `.zip` holding a single entry named after
/// the file. Returns the archive path.
pub fn zip_file(path: &Path) -> Result<PathBuf, ExportError> {
    let zip_path = path.with_extension("zip");
    let entry_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dump.sql".to_string());

    let out = File::create(&zip_path).map_err(|e| ExportError::io(&zip_path, e))?;
    let mut zip = ZipWriter::new(BufWriter::new(out));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .large_file(true);
    zip.start_file(entry_name, options)?;

    let input = File::open(path).map_err(|e| ExportError::io(path, e))?;
    std::io::copy(&mut BufReader::new(input), &mut zip).map_err(|e| ExportError::io(&zip_path, e))?;
    zip.finish()?;

    Ok(zip_path)
}
