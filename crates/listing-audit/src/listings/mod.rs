mod domain;
mod normalizer;
mod parser;

pub use domain::{Listing, ListingDataset, APARTMENT, ENTIRE_HOME, SHORT_TERM_NIGHTS};

use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug)]
pub enum ListingImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for ListingImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingImportError::Io(err) => write!(f, "failed to read listing snapshot: {}", err),
            ListingImportError::Csv(err) => write!(f, "invalid listing CSV data: {}", err),
            ListingImportError::Json(err) => write!(f, "invalid listing JSON data: {}", err),
        }
    }
}

impl std::error::Error for ListingImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListingImportError::Io(err) => Some(err),
            ListingImportError::Csv(err) => Some(err),
            ListingImportError::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ListingImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ListingImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for ListingImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// On-disk encodings of a listing snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Csv,
    Json,
}

impl SnapshotFormat {
    /// `.json` files are JSON arrays; everything else is read as CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

pub struct ListingDatasetLoader;

impl ListingDatasetLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ListingDataset, ListingImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let dataset = match SnapshotFormat::from_path(path) {
            SnapshotFormat::Json => Self::from_json_reader(file)?,
            SnapshotFormat::Csv => Self::from_csv_reader(file)?,
        };

        info!(path = %path.display(), listings = dataset.len(), "listing snapshot loaded");
        Ok(dataset)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<ListingDataset, ListingImportError> {
        Ok(ListingDataset::new(parser::parse_csv(reader)?))
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<ListingDataset, ListingImportError> {
        Ok(ListingDataset::new(parser::parse_json(reader)?))
    }
}
