//! Schema metadata consulted during analysis.
//!
//! The analyzer never talks to a database directly. It reads table
//! descriptions through the [`SchemaLookup`] trait, wrapped in a
//! [`SchemaCache`] so each table is described at most once.

mod cache;
mod catalog;

use std::sync::Arc;

use serde::Serialize;

use crate::error::Result;

pub use cache::SchemaCache;
pub use catalog::{Catalog, ColumnDefinition, SchemaDefinition, TableDefinition};

/// Description of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    /// Column name.
    pub name: String,
    /// 0-based position in the table.
    pub position: usize,
    /// SQL type code.
    pub sql_type: i32,
    /// Declared type name.
    pub type_name: String,
    /// Rust type a value of this column binds as.
    pub native_type: String,
}

/// Description of a table or view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableInfo {
    /// Table name.
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<ColumnInfo>,
}

impl TableInfo {
    /// Creates a table description.
    #[must_use]
    pub fn new(name: impl Into<String>, columns: Vec<ColumnInfo>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Returns the column with the given name, ignoring case.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Returns the 0-based position of a column, ignoring case.
    #[must_use]
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.column(name).map(|c| c.position)
    }

    /// Returns true if `name` is a column of this table, ignoring case.
    #[must_use]
    pub fn is_valid_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }
}

/// Source of table descriptions.
///
/// Implementations must treat table names case-insensitively. `Ok(None)`
/// means the table does not exist; errors are reserved for failures of the
/// underlying source.
pub trait SchemaLookup {
    /// Describes `table`.
    fn lookup(&self, table: &str) -> Result<Option<TableInfo>>;
}

impl<L: SchemaLookup + ?Sized> SchemaLookup for &L {
    fn lookup(&self, table: &str) -> Result<Option<TableInfo>> {
        (**self).lookup(table)
    }
}

impl<L: SchemaLookup + ?Sized> SchemaLookup for Arc<L> {
    fn lookup(&self, table: &str) -> Result<Option<TableInfo>> {
        (**self).lookup(table)
    }
}

impl<L: SchemaLookup + ?Sized> SchemaLookup for Box<L> {
    fn lookup(&self, table: &str) -> Result<Option<TableInfo>> {
        (**self).lookup(table)
    }
}
