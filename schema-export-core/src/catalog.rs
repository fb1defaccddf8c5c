//! Catalog source trait and the per-table export pipeline.
//!
//! A [`CatalogSource`] answers the raw catalog queries; this module drives
//! them table by table and hands the rows to [`crate::reshape`]. The pipeline
//! is strictly sequential, so the output table order is the catalog listing
//! order.

use crate::Result;
use crate::filter::TableFilter;
use crate::models::{ExportDocument, TableRecord};
use crate::reshape::{self, ColumnRow, ConstraintRow, ForeignKeyRow, IndexRow, TableInfoRow};
use async_trait::async_trait;

/// Read-only access to a database catalog.
///
/// Implementations issue no DDL or DML. Every method returns rows for a single
/// table of the schema the source is connected to.
#[async_trait]
pub trait CatalogSource: Send {
    /// Names of base tables (never views), in catalog listing order.
    async fn list_base_tables(&mut self) -> Result<Vec<String>>;

    /// Column rows ordered by ordinal position.
    async fn column_rows(&mut self, table: &str) -> Result<Vec<ColumnRow>>;

    /// Key parts of every constraint of the table.
    async fn constraint_rows(&mut self, table: &str) -> Result<Vec<ConstraintRow>>;

    /// Key parts of every index of the table, including the primary index.
    async fn index_rows(&mut self, table: &str) -> Result<Vec<IndexRow>>;

    /// Local/referenced column pairs of every foreign key, in key order.
    async fn foreign_key_rows(&mut self, table: &str) -> Result<Vec<ForeignKeyRow>>;

    /// Storage metadata, `None` when the catalog has no row for the table.
    async fn table_info_row(&mut self, table: &str) -> Result<Option<TableInfoRow>>;

    /// `CREATE TABLE` statement, empty when the server returns nothing.
    async fn create_table_ddl(&mut self, table: &str) -> Result<String>;
}

/// Collects and reshapes everything exported for one table.
///
/// # Errors
/// Any failing query aborts the table, and with it the whole run.
pub async fn collect_table<S>(source: &mut S, table: &str) -> Result<TableRecord>
where
    S: CatalogSource + ?Sized,
{
    let columns = reshape::columns(source.column_rows(table).await?);
    let (primary_key, unique) = reshape::split_constraints(&source.constraint_rows(table).await?);
    let indexes = reshape::indexes(source.index_rows(table).await?);
    let foreign_keys = reshape::foreign_keys(source.foreign_key_rows(table).await?);
    let table_info = reshape::table_info(source.table_info_row(table).await?);
    let ddl = source.create_table_ddl(table).await?;

    tracing::debug!(
        "Collected table '{}' with {} columns, {} unique constraints, {} indexes, {} foreign keys",
        table,
        columns.len(),
        unique.len(),
        indexes.len(),
        foreign_keys.len()
    );

    Ok(TableRecord {
        name: table.to_string(),
        columns,
        primary_key,
        unique,
        indexes,
        foreign_keys,
        table_info,
        ddl,
    })
}

/// Per-table progress message. `total` counts every base table, filtered or
/// not, so a narrow filter finishes well below `total`.
pub fn progress_line(position: usize, total: usize, table: &str) -> String {
    format!("[{}/{}] Processing table: {}", position, total, table)
}

/// Builds the export document for every base table matching `filter`.
///
/// # Errors
/// Returns the first catalog error; there is no partial export.
pub async fn collect_export<S>(
    source: &mut S,
    database: &str,
    schema_version: &str,
    filter: &TableFilter,
) -> Result<ExportDocument>
where
    S: CatalogSource + ?Sized,
{
    let start_time = std::time::Instant::now();
    let all_tables = source.list_base_tables().await?;
    let total_tables = all_tables.len();
    let tables = filter.apply(all_tables);

    tracing::info!(
        "Processing {} of {} tables with filter: {}",
        tables.len(),
        total_tables,
        filter.pattern()
    );

    let mut document = ExportDocument::new(database, schema_version);

    for (index, table) in tables.iter().enumerate() {
        tracing::info!("{}", progress_line(index.saturating_add(1), total_tables, table));
        document.tables.push(collect_table(source, table).await?);
    }

    tracing::info!(
        "Collected {} tables in {:.2}s",
        document.table_count(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(document)
}
