//! Core library for exporting a MySQL schema as a JSON snapshot.
//!
//! The crate reads a database catalog through the [`CatalogSource`] seam,
//! reshapes the flat catalog rows into nested table records, and validates the
//! resulting [`ExportDocument`] before it is written.
//!
//! # Security Guarantees
//! - All database operations are read-only (SELECT/SHOW only)
//! - Passwords are held in zeroizing buffers and never logged
//! - Connection targets appear in errors and logs with the password redacted
//!
//! # Architecture
//! - [`config`]: flag > environment > INI file > default resolution
//! - [`filter`]: start-anchored table name filter
//! - [`catalog`]: catalog seam and the sequential per-table pipeline
//! - [`reshape`]: row-to-tree reshaping of grouped catalog rows
//! - [`adapters`]: the MySQL implementation of the catalog seam

pub mod adapters;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod models;
pub mod reshape;
pub mod security;
pub mod validation;

// Re-export commonly used types
pub use adapters::MySqlCatalog;
pub use catalog::{CatalogSource, collect_export, collect_table};
pub use config::{CliOverrides, ConfigFile, EnvSource, ExportSettings};
pub use error::{ExportError, Result};
pub use filter::TableFilter;
pub use models::{Column, ExportDocument, ForeignKey, Index, TableInfo, TableRecord};
pub use validation::{ValidationError, find_secret_paths, validate_export_output};
