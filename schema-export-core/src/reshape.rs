//! Row-to-tree reshaping of catalog query results.
//!
//! Catalog queries return flat rows where one logical entity (a multi-column
//! index, a composite unique constraint) is spread over several rows and
//! disambiguated by a name plus a sequence number. This module groups those
//! rows by entity name into position-keyed maps and flattens each map in
//! ascending position order, so the output never depends on the order rows
//! arrive in.
//!
//! Entities themselves are emitted in first-seen order.

use crate::models::{Column, ForeignKey, Index, TableInfo, UniqueConstraint};
use std::collections::{BTreeMap, HashMap};

/// `CONSTRAINT_TYPE` value of primary key rows
pub const PRIMARY_KEY: &str = "PRIMARY KEY";
/// `CONSTRAINT_TYPE` value of unique constraint rows
pub const UNIQUE: &str = "UNIQUE";
/// Name the catalog gives the primary key's own index
pub const PRIMARY_INDEX: &str = "PRIMARY";

/// One row of `INFORMATION_SCHEMA.COLUMNS`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRow {
    pub name: String,
    pub column_type: String,
    /// Raw `IS_NULLABLE` value (`YES` / `NO`)
    pub is_nullable: String,
    pub default: Option<String>,
    pub extra: String,
    pub comment: String,
    pub ordinal_position: u32,
}

/// One key part of a table constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintRow {
    pub constraint_name: String,
    pub constraint_type: String,
    /// NULL in the catalog for key parts that are not plain columns
    pub column_name: Option<String>,
    pub ordinal_position: u32,
}

/// One row of `INFORMATION_SCHEMA.STATISTICS`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRow {
    pub index_name: String,
    pub non_unique: bool,
    pub seq_in_index: u32,
    pub column_name: Option<String>,
}

/// One local/referenced column pair of a foreign key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyRow {
    pub constraint_name: String,
    pub column_name: String,
    pub referenced_table: String,
    pub referenced_column: String,
    pub update_rule: Option<String>,
    pub delete_rule: Option<String>,
}

/// Storage metadata row from `INFORMATION_SCHEMA.TABLES`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableInfoRow {
    pub table_rows: Option<u64>,
    pub engine: Option<String>,
    pub collation: Option<String>,
}

/// Rows grouped by entity name, remembering first-seen order.
struct NamedGroups<T> {
    slots: HashMap<String, usize>,
    groups: Vec<(String, T)>,
}

impl<T> NamedGroups<T> {
    fn new() -> Self {
        Self {
            slots: HashMap::new(),
            groups: Vec::new(),
        }
    }

    fn entry(&mut self, name: &str, init: impl FnOnce() -> T) -> &mut T {
        let slot = match self.slots.get(name).copied() {
            Some(slot) => slot,
            None => {
                let slot = self.groups.len();
                self.slots.insert(name.to_string(), slot);
                self.groups.push((name.to_string(), init()));
                slot
            }
        };
        &mut self.groups[slot].1
    }

    fn into_groups(self) -> impl Iterator<Item = (String, T)> {
        self.groups.into_iter()
    }
}

/// Flattens a position-keyed map into a list ordered by ascending position.
fn flatten_by_position<V>(positions: BTreeMap<u32, V>) -> Vec<V> {
    positions.into_values().collect()
}

/// Converts column rows into output columns ordered by ordinal position.
pub fn columns(mut rows: Vec<ColumnRow>) -> Vec<Column> {
    rows.sort_by_key(|row| row.ordinal_position);
    rows.into_iter()
        .map(|row| Column {
            nullable: row.is_nullable.eq_ignore_ascii_case("YES"),
            name: row.name,
            column_type: row.column_type,
            default: row.default,
            extra: row.extra,
            comment: row.comment,
            position: row.ordinal_position,
        })
        .collect()
}

/// Primary key columns in declared key order.
///
/// A table has at most one primary key, so every `PRIMARY KEY` row belongs to
/// the same anonymous entity. Key parts without a column name are skipped.
pub fn primary_key(rows: &[ConstraintRow]) -> Vec<String> {
    let positions: BTreeMap<u32, String> = rows
        .iter()
        .filter(|row| row.constraint_type == PRIMARY_KEY)
        .filter_map(|row| Some((row.ordinal_position, row.column_name.clone()?)))
        .collect();
    flatten_by_position(positions)
}

/// Unique constraints with their columns in key order.
///
/// Key parts without a column name stay in place as `None`, as in [`indexes`].
pub fn unique_constraints(rows: &[ConstraintRow]) -> Vec<UniqueConstraint> {
    let mut groups: NamedGroups<BTreeMap<u32, Option<String>>> = NamedGroups::new();

    for row in rows.iter().filter(|row| row.constraint_type == UNIQUE) {
        groups
            .entry(&row.constraint_name, BTreeMap::new)
            .insert(row.ordinal_position, row.column_name.clone());
    }

    groups
        .into_groups()
        .map(|(name, positions)| UniqueConstraint {
            name,
            columns: flatten_by_position(positions),
        })
        .collect()
}

/// Splits one constraint query result into the primary key and the unique
/// constraints. Other constraint types are ignored.
pub fn split_constraints(rows: &[ConstraintRow]) -> (Vec<String>, Vec<UniqueConstraint>) {
    (primary_key(rows), unique_constraints(rows))
}

/// Secondary indexes with their key parts in sequence order.
///
/// The index backing the primary key is left out; it is already described by
/// [`primary_key`].
pub fn indexes(rows: Vec<IndexRow>) -> Vec<Index> {
    struct Bucket {
        unique: bool,
        parts: BTreeMap<u32, Option<String>>,
    }

    let mut groups: NamedGroups<Bucket> = NamedGroups::new();

    for row in rows {
        if row.index_name.eq_ignore_ascii_case(PRIMARY_INDEX) {
            continue;
        }
        groups
            .entry(&row.index_name, || Bucket {
                unique: !row.non_unique,
                parts: BTreeMap::new(),
            })
            .parts
            .insert(row.seq_in_index, row.column_name);
    }

    groups
        .into_groups()
        .map(|(name, bucket)| Index {
            name,
            unique: bucket.unique,
            columns: flatten_by_position(bucket.parts),
        })
        .collect()
}

/// Foreign keys with local and referenced columns paired by position.
///
/// Key parts carry no sequence number of their own here, so both column lists
/// are built in row order and never re-sorted; that keeps them index-aligned.
pub fn foreign_keys(rows: Vec<ForeignKeyRow>) -> Vec<ForeignKey> {
    let mut groups: NamedGroups<ForeignKey> = NamedGroups::new();

    for row in rows {
        let fk = groups.entry(&row.constraint_name, || ForeignKey {
            name: row.constraint_name.clone(),
            columns: Vec::new(),
            ref_table: row.referenced_table.clone(),
            ref_columns: Vec::new(),
            on_update: row.update_rule.clone(),
            on_delete: row.delete_rule.clone(),
        });
        fk.columns.push(row.column_name);
        fk.ref_columns.push(row.referenced_column);
    }

    groups.into_groups().map(|(_, fk)| fk).collect()
}

/// Table metadata; every field is null when the catalog returned no row.
pub fn table_info(row: Option<TableInfoRow>) -> TableInfo {
    row.map_or_else(TableInfo::default, |row| TableInfo {
        row_count_est: row.table_rows,
        engine: row.engine,
        collation: row.collation,
    })
}
