//! Catalog file loading
//!
//! Catalog files are a JSON or YAML sequence of [`CourseRecord`]s. The format is
//! picked from the file extension.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::catalog::course::CourseRecord;
use crate::catalog::Catalog;
use crate::config::GroveConfig;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported catalog format for {} (expected .json, .yaml or .yml)", .0.display())]
    UnsupportedFormat(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(CatalogFormat::Json),
            Some("yaml") | Some("yml") => Ok(CatalogFormat::Yaml),
            _ => Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Deserialize the records of one catalog document.
pub fn parse_records(text: &str, format: CatalogFormat) -> Result<Vec<CourseRecord>, CatalogError> {
    let records = match format {
        CatalogFormat::Json => serde_json::from_str(text)?,
        CatalogFormat::Yaml => serde_yaml::from_str(text)?,
    };
    Ok(records)
}

/// Read a catalog file and build the catalog.
pub fn load_catalog(path: impl AsRef<Path>, config: &GroveConfig) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let format = CatalogFormat::from_path(path)?;
    let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_records(&text, format)?;
    debug!(path = %path.display(), records = records.len(), "loaded catalog records");
    Ok(Catalog::from_records(&records, &config.levels, config.parse_options()))
}
