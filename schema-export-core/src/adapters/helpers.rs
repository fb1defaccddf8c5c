//! Helper utilities for catalog adapters.
//!
//! Provides consistent error handling when decoding catalog result rows.

use crate::{Result, error::ExportError};
use sqlx::{MySql, Row, mysql::MySqlRow};

/// Extension trait for extracting typed values from catalog rows
/// with consistent error handling.
///
/// # Example
/// ```rust,ignore
/// use schema_export_core::adapters::helpers::RowExt;
///
/// let name: String = row.get_field("COLUMN_NAME", Some("orders"))?;
/// let rows: Option<u64> = row.get_field("TABLE_ROWS", None)?;
/// ```
pub trait RowExt {
    /// Extracts a typed field from the row with proper error context.
    ///
    /// # Arguments
    /// * `field_name` - Name of the column to extract
    /// * `table_context` - Optional table name for error messages
    fn get_field<'r, T>(&'r self, field_name: &str, table_context: Option<&str>) -> Result<T>
    where
        T: sqlx::Decode<'r, MySql> + sqlx::Type<MySql>;

    /// Extracts a `u32` stored as an unsigned 64-bit catalog value.
    fn get_position(&self, field_name: &str, table_context: Option<&str>) -> Result<u32>;
}

impl RowExt for MySqlRow {
    fn get_field<'r, T>(&'r self, field_name: &str, table_context: Option<&str>) -> Result<T>
    where
        T: sqlx::Decode<'r, MySql> + sqlx::Type<MySql>,
    {
        self.try_get(field_name)
            .map_err(|e| ExportError::parse_field(field_name, table_context, e))
    }

    fn get_position(&self, field_name: &str, table_context: Option<&str>) -> Result<u32> {
        let raw: u64 = self.get_field(field_name, table_context)?;
        u32::try_from(raw).map_err(|e| ExportError::parse_field(field_name, table_context, e))
    }
}
