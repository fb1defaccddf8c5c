//! File output for export documents.
//!
//! Handles naming, validating, and writing the JSON snapshot.

use schema_export_core::{
    ExportDocument, ExportError, Result, find_secret_paths, validate_export_output,
};
use std::path::{Path, PathBuf};

/// What a successful write produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub bytes: u64,
    pub tables: usize,
}

impl ExportSummary {
    /// File size in kilobytes, for the completion message.
    pub fn kilobytes(&self) -> f64 {
        self.bytes as f64 / 1024.0
    }
}

/// Output file for a database: `<dir>/schema_<database>.json`.
pub fn output_path(dir: &Path, database: &str) -> PathBuf {
    dir.join(format!("schema_{}.json", database))
}

/// Serializes, validates and writes the document under `dir`.
///
/// The directory is created only once the document has passed validation, so
/// a failing run leaves the filesystem untouched.
///
/// `secrets` are the run's own credentials. Catalog text that contains one is
/// reported with a warning but still written; it is the database's content.
///
/// # Errors
/// Returns a serialization, validation, or I/O error.
pub async fn write_export(
    document: &ExportDocument,
    dir: &Path,
    secrets: &[&str],
) -> Result<ExportSummary> {
    let json_data =
        serde_json::to_string_pretty(document).map_err(|e| ExportError::Serialization {
            context: "JSON serialization of export document".to_string(),
            source: e,
        })?;

    let json_value: serde_json::Value =
        serde_json::from_str(&json_data).map_err(|e| ExportError::Serialization {
            context: "JSON parsing for validation".to_string(),
            source: e,
        })?;
    validate_export_output(&json_value)?;
    tracing::debug!("Output validation passed");

    for path in find_secret_paths(&json_value, secrets) {
        tracing::warn!("Catalog value at {} contains this run's credentials", path);
    }

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| ExportError::Io {
            context: format!("Failed to create output directory {}", dir.display()),
            source: e,
        })?;

    let path = output_path(dir, &document.database);
    tokio::fs::write(&path, json_data.as_bytes())
        .await
        .map_err(|e| ExportError::Io {
            context: format!("Failed to write to {}", path.display()),
            source: e,
        })?;

    tracing::info!("Schema saved to {}", path.display());

    Ok(ExportSummary {
        path,
        bytes: json_data.len() as u64,
        tables: document.table_count(),
    })
}
