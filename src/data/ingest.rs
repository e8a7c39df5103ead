//! Input acquisition
//!
//! Accepts exactly one user-supplied file: either a raw delimited table, or
//! a ZIP archive whose first entry is the table. No schema validation happens
//! here; a missing expected column surfaces later as a column-lookup error.

use super::table::{PriceTable, TableError};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while acquiring the input table
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("No file uploaded. Please upload a ZIP or CSV file.")]
    NoFileSupplied,

    #[error("Failed to open input file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Archive contains no entries")]
    EmptyArchive,

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Read the input table from the supplied path.
///
/// A `.zip` path is opened as an archive and its first entry is parsed as a
/// delimited table; any further entries are ignored. Any other path is
/// parsed directly. `None` is a configuration error.
pub fn read_table(path: Option<&Path>) -> Result<PriceTable, IngestError> {
    let path = path.ok_or(IngestError::NoFileSupplied)?;

    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let table = if is_archive(path) {
        info!(?path, "reading table from ZIP archive");
        let mut archive = zip::ZipArchive::new(file)?;
        if archive.len() == 0 {
            return Err(IngestError::EmptyArchive);
        }
        let entry = archive.by_index(0)?;
        PriceTable::from_csv(entry)?
    } else {
        info!(?path, "reading table from flat file");
        PriceTable::from_csv(BufReader::new(file))?
    };

    info!(rows = table.n_rows(), "table ingested");
    Ok(table)
}

fn is_archive(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("zip"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    const SAMPLE: &str = "\
,Open,High,Low,Close,Adj Close,Volume
2020-01-02,74.06,75.15,73.80,75.09,72.96,135480400
2020-01-03,74.29,75.14,74.13,74.36,72.25,146322800
";

    #[test]
    fn test_no_file_is_a_configuration_error() {
        let err = read_table(None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "No file uploaded. Please upload a ZIP or CSV file."
        );
    }

    #[test]
    fn test_flat_file_ingestion() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        let table = read_table(Some(&path)).unwrap();
        assert_eq!(table.n_rows(), 2);
    }

    #[test]
    fn test_zip_first_entry_matches_flat_file() {
        let dir = tempdir().unwrap();

        let flat_path = dir.path().join("prices.csv");
        std::fs::write(&flat_path, SAMPLE).unwrap();

        let zip_path = dir.path().join("prices.zip");
        let mut writer = zip::ZipWriter::new(File::create(&zip_path).unwrap());
        writer
            .start_file("prices.csv", zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(SAMPLE.as_bytes()).unwrap();
        writer.finish().unwrap();

        let from_flat = read_table(Some(&flat_path)).unwrap();
        let from_zip = read_table(Some(&zip_path)).unwrap();

        assert_eq!(from_flat.bars, from_zip.bars);
    }

    #[test]
    fn test_empty_archive_is_rejected() {
        let dir = tempdir().unwrap();
        let zip_path = dir.path().join("empty.zip");
        let mut writer = zip::ZipWriter::new(File::create(&zip_path).unwrap());
        writer.finish().unwrap();

        let err = read_table(Some(&zip_path)).unwrap_err();
        assert!(matches!(err, IngestError::EmptyArchive));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = read_table(Some(Path::new("/nonexistent/prices.csv"))).unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }
}
