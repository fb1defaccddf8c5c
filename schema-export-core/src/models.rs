//! Data models for the exported schema document.
//!
//! Field names follow the JSON layout of the snapshot file, so the serde
//! representation of these structs *is* the output format.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Table column information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// Declared type as reported by the catalog, e.g. `varchar(255)`
    #[serde(rename = "type")]
    pub column_type: String,
    pub nullable: bool,
    pub default: Option<String>,
    /// Modifiers such as `auto_increment` or `DEFAULT_GENERATED`
    pub extra: String,
    pub comment: String,
    /// 1-based ordinal position within the table
    pub position: u32,
}

/// Named unique constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueConstraint {
    pub name: String,
    /// Key parts in key order; `None` where the catalog has no column name
    pub columns: Vec<Option<String>>,
}

/// Secondary index. Never the primary key's own index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub unique: bool,
    /// Key parts in sequence order; `None` for key parts without a column
    /// (functional key parts)
    pub columns: Vec<Option<String>>,
}

/// Foreign key constraint.
///
/// `columns` and `ref_columns` are parallel: `columns[i]` references
/// `ref_columns[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub name: String,
    pub columns: Vec<String>,
    pub ref_table: String,
    pub ref_columns: Vec<String>,
    pub on_update: Option<String>,
    pub on_delete: Option<String>,
}

/// Storage-level table metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    /// Estimated row count; InnoDB reports an approximation
    pub row_count_est: Option<u64>,
    pub engine: Option<String>,
    pub collation: Option<String>,
}

/// Everything exported for a single base table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRecord {
    pub name: String,
    pub columns: Vec<Column>,
    pub primary_key: Vec<String>,
    pub unique: Vec<UniqueConstraint>,
    pub indexes: Vec<Index>,
    pub foreign_keys: Vec<ForeignKey>,
    pub table_info: TableInfo,
    pub ddl: String,
}

/// The complete snapshot written to `schema_<database>.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    pub database: String,
    pub generated_at: DateTime<Local>,
    pub schema_version: String,
    pub tables: Vec<TableRecord>,
}

impl ExportDocument {
    /// Creates an empty document stamped with the current local time.
    pub fn new(database: impl Into<String>, schema_version: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            generated_at: Local::now(),
            schema_version: schema_version.into(),
            tables: Vec::new(),
        }
    }

    /// Number of exported tables
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Looks up a table record by name
    pub fn table(&self, name: &str) -> Option<&TableRecord> {
        self.tables.iter().find(|t| t.name == name)
    }
}
