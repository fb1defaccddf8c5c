//! MySQL catalog source.
//!
//! # Module Structure
//! - `connection`: Single read-only connection setup and teardown
//! - `schema_collection`: `INFORMATION_SCHEMA` and `SHOW CREATE TABLE` queries
//!
//! # Security Guarantees
//! - The session is switched to read-only before any catalog query
//! - All operations are SELECT/SHOW only
//! - Connection targets are redacted in logs and error messages

pub mod connection;
pub mod schema_collection;

use crate::Result;
use crate::catalog::CatalogSource;
use crate::reshape::{ColumnRow, ConstraintRow, ForeignKeyRow, IndexRow, TableInfoRow};
use async_trait::async_trait;
use sqlx::MySqlConnection;

pub use connection::{connection_target, quote_identifier};

/// Catalog source backed by one MySQL connection.
pub struct MySqlCatalog {
    conn: MySqlConnection,
    /// Schema every query is scoped to
    database: String,
}

impl std::fmt::Debug for MySqlCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlCatalog")
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}

impl MySqlCatalog {
    /// The schema this catalog reads.
    pub fn database(&self) -> &str {
        &self.database
    }
}

#[async_trait]
impl CatalogSource for MySqlCatalog {
    async fn list_base_tables(&mut self) -> Result<Vec<String>> {
        schema_collection::list_base_tables(&mut self.conn, &self.database).await
    }

    async fn column_rows(&mut self, table: &str) -> Result<Vec<ColumnRow>> {
        schema_collection::column_rows(&mut self.conn, &self.database, table).await
    }

    async fn constraint_rows(&mut self, table: &str) -> Result<Vec<ConstraintRow>> {
        schema_collection::constraint_rows(&mut self.conn, &self.database, table).await
    }

    async fn index_rows(&mut self, table: &str) -> Result<Vec<IndexRow>> {
        schema_collection::index_rows(&mut self.conn, &self.database, table).await
    }

    async fn foreign_key_rows(&mut self, table: &str) -> Result<Vec<ForeignKeyRow>> {
        schema_collection::foreign_key_rows(&mut self.conn, &self.database, table).await
    }

    async fn table_info_row(&mut self, table: &str) -> Result<Option<TableInfoRow>> {
        schema_collection::table_info_row(&mut self.conn, &self.database, table).await
    }

    async fn create_table_ddl(&mut self, table: &str) -> Result<String> {
        schema_collection::create_table_ddl(&mut self.conn, table).await
    }
}
