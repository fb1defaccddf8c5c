//! MySQL catalog queries.
//!
//! Each function runs one query against `INFORMATION_SCHEMA` (or `SHOW CREATE
//! TABLE`) and decodes the result into the typed rows [`crate::reshape`]
//! consumes. String columns are cast to CHAR and numeric ones to
//! SIGNED/UNSIGNED to avoid VARBINARY and DECIMAL decoding issues on MySQL 8.0+.

use super::connection::quote_identifier;
use crate::Result;
use crate::adapters::helpers::RowExt;
use crate::error::ExportError;
use crate::reshape::{ColumnRow, ConstraintRow, ForeignKeyRow, IndexRow, TableInfoRow};
use sqlx::mysql::MySqlConnection;
use sqlx::Row;

/// Lists base tables (never views) of the schema.
pub(crate) async fn list_base_tables(
    conn: &mut MySqlConnection,
    db_name: &str,
) -> Result<Vec<String>> {
    let tables_query = r#"
        SELECT CAST(TABLE_NAME AS CHAR) as TABLE_NAME
        FROM INFORMATION_SCHEMA.TABLES
        WHERE TABLE_SCHEMA = ?
        AND TABLE_TYPE = 'BASE TABLE'
        ORDER BY TABLE_NAME
    "#;

    let rows = sqlx::query(tables_query)
        .bind(db_name)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| ExportError::collection_failed("Failed to enumerate tables", e))?;

    let tables = rows
        .iter()
        .map(|row| row.get_field::<String>("TABLE_NAME", None))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!("Found {} base tables in {}", tables.len(), db_name);
    Ok(tables)
}

/// Collects column rows ordered by ordinal position.
pub(crate) async fn column_rows(
    conn: &mut MySqlConnection,
    db_name: &str,
    table_name: &str,
) -> Result<Vec<ColumnRow>> {
    let columns_query = r#"
        SELECT
            CAST(COLUMN_NAME AS CHAR) as COLUMN_NAME,
            CAST(COLUMN_TYPE AS CHAR) as COLUMN_TYPE,
            CAST(IS_NULLABLE AS CHAR) as IS_NULLABLE,
            CAST(COLUMN_DEFAULT AS CHAR) as COLUMN_DEFAULT,
            CAST(EXTRA AS CHAR) as EXTRA,
            CAST(COLUMN_COMMENT AS CHAR) as COLUMN_COMMENT,
            CAST(ORDINAL_POSITION AS UNSIGNED) as ORDINAL_POSITION
        FROM INFORMATION_SCHEMA.COLUMNS
        WHERE TABLE_SCHEMA = ?
        AND TABLE_NAME = ?
        ORDER BY ORDINAL_POSITION
    "#;

    let rows = sqlx::query(columns_query)
        .bind(db_name)
        .bind(table_name)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            ExportError::collection_failed(
                format!("Failed to collect columns for table '{}'", table_name),
                e,
            )
        })?;

    let table = Some(table_name);
    let mut columns = Vec::with_capacity(rows.len());
    for row in &rows {
        columns.push(ColumnRow {
            name: row.get_field("COLUMN_NAME", table)?,
            column_type: row.get_field("COLUMN_TYPE", table)?,
            is_nullable: row.get_field("IS_NULLABLE", table)?,
            default: row.get_field("COLUMN_DEFAULT", table)?,
            extra: row
                .get_field::<Option<String>>("EXTRA", table)?
                .unwrap_or_default(),
            comment: row
                .get_field::<Option<String>>("COLUMN_COMMENT", table)?
                .unwrap_or_default(),
            ordinal_position: row.get_position("ORDINAL_POSITION", table)?,
        });
    }

    tracing::debug!("Table '{}': {} column rows", table_name, columns.len());
    Ok(columns)
}

/// Collects the key parts of every constraint on the table.
pub(crate) async fn constraint_rows(
    conn: &mut MySqlConnection,
    db_name: &str,
    table_name: &str,
) -> Result<Vec<ConstraintRow>> {
    let constraints_query = r#"
        SELECT
            CAST(tc.CONSTRAINT_NAME AS CHAR) as CONSTRAINT_NAME,
            CAST(tc.CONSTRAINT_TYPE AS CHAR) as CONSTRAINT_TYPE,
            CAST(kcu.COLUMN_NAME AS CHAR) as COLUMN_NAME,
            CAST(kcu.ORDINAL_POSITION AS UNSIGNED) as ORDINAL_POSITION
        FROM INFORMATION_SCHEMA.TABLE_CONSTRAINTS tc
        JOIN INFORMATION_SCHEMA.KEY_COLUMN_USAGE kcu
            ON tc.CONSTRAINT_NAME = kcu.CONSTRAINT_NAME
            AND tc.TABLE_SCHEMA = kcu.TABLE_SCHEMA
            AND tc.TABLE_NAME = kcu.TABLE_NAME
        WHERE tc.TABLE_SCHEMA = ?
        AND tc.TABLE_NAME = ?
        ORDER BY tc.CONSTRAINT_NAME, kcu.ORDINAL_POSITION
    "#;

    let rows = sqlx::query(constraints_query)
        .bind(db_name)
        .bind(table_name)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            ExportError::collection_failed(
                format!("Failed to collect constraints for table '{}'", table_name),
                e,
            )
        })?;

    let table = Some(table_name);
    let mut constraints = Vec::with_capacity(rows.len());
    for row in &rows {
        constraints.push(ConstraintRow {
            constraint_name: row.get_field("CONSTRAINT_NAME", table)?,
            constraint_type: row.get_field("CONSTRAINT_TYPE", table)?,
            column_name: row.get_field("COLUMN_NAME", table)?,
            ordinal_position: row.get_position("ORDINAL_POSITION", table)?,
        });
    }

    tracing::debug!("Table '{}': {} constraint rows", table_name, constraints.len());
    Ok(constraints)
}

/// Collects the key parts of every index, the primary index included.
pub(crate) async fn index_rows(
    conn: &mut MySqlConnection,
    db_name: &str,
    table_name: &str,
) -> Result<Vec<IndexRow>> {
    let index_query = r#"
        SELECT
            CAST(INDEX_NAME AS CHAR) as INDEX_NAME,
            CAST(NON_UNIQUE AS SIGNED) as NON_UNIQUE,
            CAST(SEQ_IN_INDEX AS UNSIGNED) as SEQ_IN_INDEX,
            CAST(COLUMN_NAME AS CHAR) as COLUMN_NAME
        FROM INFORMATION_SCHEMA.STATISTICS
        WHERE TABLE_SCHEMA = ?
        AND TABLE_NAME = ?
        ORDER BY INDEX_NAME, SEQ_IN_INDEX
    "#;

    let rows = sqlx::query(index_query)
        .bind(db_name)
        .bind(table_name)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            ExportError::collection_failed(
                format!("Failed to collect indexes for table '{}'", table_name),
                e,
            )
        })?;

    let table = Some(table_name);
    let mut indexes = Vec::with_capacity(rows.len());
    for row in &rows {
        let non_unique: i64 = row.get_field("NON_UNIQUE", table)?;
        indexes.push(IndexRow {
            index_name: row.get_field("INDEX_NAME", table)?,
            non_unique: non_unique != 0,
            seq_in_index: row.get_position("SEQ_IN_INDEX", table)?,
            // NULL for functional key parts
            column_name: row.get_field("COLUMN_NAME", table)?,
        });
    }

    tracing::debug!("Table '{}': {} index rows", table_name, indexes.len());
    Ok(indexes)
}

/// Collects foreign key column pairs in constraint and key order.
pub(crate) async fn foreign_key_rows(
    conn: &mut MySqlConnection,
    db_name: &str,
    table_name: &str,
) -> Result<Vec<ForeignKeyRow>> {
    let fk_query = r#"
        SELECT
            CAST(kcu.CONSTRAINT_NAME AS CHAR) as CONSTRAINT_NAME,
            CAST(kcu.COLUMN_NAME AS CHAR) as COLUMN_NAME,
            CAST(kcu.REFERENCED_TABLE_NAME AS CHAR) as REFERENCED_TABLE_NAME,
            CAST(kcu.REFERENCED_COLUMN_NAME AS CHAR) as REFERENCED_COLUMN_NAME,
            CAST(rc.UPDATE_RULE AS CHAR) as UPDATE_RULE,
            CAST(rc.DELETE_RULE AS CHAR) as DELETE_RULE
        FROM INFORMATION_SCHEMA.KEY_COLUMN_USAGE kcu
        JOIN INFORMATION_SCHEMA.REFERENTIAL_CONSTRAINTS rc
            ON kcu.CONSTRAINT_NAME = rc.CONSTRAINT_NAME
            AND kcu.TABLE_SCHEMA = rc.CONSTRAINT_SCHEMA
            AND kcu.TABLE_NAME = rc.TABLE_NAME
        WHERE kcu.TABLE_SCHEMA = ?
        AND kcu.TABLE_NAME = ?
        AND kcu.REFERENCED_TABLE_NAME IS NOT NULL
        ORDER BY kcu.CONSTRAINT_NAME, kcu.ORDINAL_POSITION
    "#;

    let rows = sqlx::query(fk_query)
        .bind(db_name)
        .bind(table_name)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            ExportError::collection_failed(
                format!("Failed to collect foreign keys for table '{}'", table_name),
                e,
            )
        })?;

    let table = Some(table_name);
    let mut foreign_keys = Vec::with_capacity(rows.len());
    for row in &rows {
        foreign_keys.push(ForeignKeyRow {
            constraint_name: row.get_field("CONSTRAINT_NAME", table)?,
            column_name: row.get_field("COLUMN_NAME", table)?,
            referenced_table: row.get_field("REFERENCED_TABLE_NAME", table)?,
            referenced_column: row.get_field("REFERENCED_COLUMN_NAME", table)?,
            update_rule: row.get_field("UPDATE_RULE", table)?,
            delete_rule: row.get_field("DELETE_RULE", table)?,
        });
    }

    tracing::debug!("Table '{}': {} foreign key rows", table_name, foreign_keys.len());
    Ok(foreign_keys)
}

/// Collects the row estimate, engine and collation of the table.
pub(crate) async fn table_info_row(
    conn: &mut MySqlConnection,
    db_name: &str,
    table_name: &str,
) -> Result<Option<TableInfoRow>> {
    // TABLE_ROWS is an estimate for InnoDB
    let info_query = r#"
        SELECT
            CAST(TABLE_ROWS AS UNSIGNED) as TABLE_ROWS,
            CAST(ENGINE AS CHAR) as ENGINE,
            CAST(TABLE_COLLATION AS CHAR) as TABLE_COLLATION
        FROM INFORMATION_SCHEMA.TABLES
        WHERE TABLE_SCHEMA = ?
        AND TABLE_NAME = ?
    "#;

    let row = sqlx::query(info_query)
        .bind(db_name)
        .bind(table_name)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            ExportError::collection_failed(
                format!("Failed to collect table info for table '{}'", table_name),
                e,
            )
        })?;

    let table = Some(table_name);
    row.map(|row| {
        Ok(TableInfoRow {
            table_rows: row.get_field("TABLE_ROWS", table)?,
            engine: row.get_field("ENGINE", table)?,
            collation: row.get_field("TABLE_COLLATION", table)?,
        })
    })
    .transpose()
}

/// Fetches the `CREATE TABLE` statement, empty when the server returns no row.
pub(crate) async fn create_table_ddl(
    conn: &mut MySqlConnection,
    table_name: &str,
) -> Result<String> {
    let statement = format!("SHOW CREATE TABLE {}", quote_identifier(table_name));

    // `RawSql::fetch_optional` in sqlx 0.8.6 is mis-declared (delegates to
    // `fetch_one`), so go through `Executor::fetch_optional` directly.
    let row = sqlx::Executor::fetch_optional(&mut *conn, sqlx::raw_sql(&statement))
        .await
        .map_err(|e| {
            ExportError::collection_failed(
                format!("Failed to fetch DDL for table '{}'", table_name),
                e,
            )
        })?;

    let Some(row) = row else {
        tracing::warn!("SHOW CREATE TABLE returned no row for '{}'", table_name);
        return Ok(String::new());
    };

    // Second column is "Create Table"; some servers report it as binary
    match row.try_get::<String, _>(1) {
        Ok(ddl) => Ok(ddl),
        Err(_) => {
            let bytes: Vec<u8> = row.try_get(1).map_err(|e| {
                ExportError::parse_field("Create Table", Some(table_name), e)
            })?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}
