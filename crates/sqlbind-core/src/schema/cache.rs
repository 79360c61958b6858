//! Read-through table cache.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use super::{SchemaLookup, TableInfo};
use crate::error::Result;

/// Read-through cache over a [`SchemaLookup`], keyed by uppercased table
/// name.
///
/// Both found and missing tables are remembered, so every table is described
/// at most once. Lookup errors are returned to the caller and not cached.
#[derive(Debug)]
pub struct SchemaCache<L> {
    lookup: L,
    tables: RwLock<HashMap<String, Option<Arc<TableInfo>>>>,
}

impl<L: SchemaLookup> SchemaCache<L> {
    /// Wraps a lookup in an empty cache.
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the wrapped lookup.
    pub fn inner(&self) -> &L {
        &self.lookup
    }

    /// Describes `table`, consulting the lookup on the first request only.
    pub fn table(&self, table: &str) -> Result<Option<Arc<TableInfo>>> {
        let key = table.to_uppercase();
        if let Some(cached) = self
            .tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(cached.clone());
        }

        debug!(table, "Looking up table metadata");
        let info = self.lookup.lookup(table)?.map(Arc::new);
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, info.clone());
        Ok(info)
    }

    /// Returns true if `column` is a column of `table`.
    ///
    /// Missing tables and lookup failures count as "no".
    pub fn has_column(&self, table: &str, column: &str) -> bool {
        match self.table(table) {
            Ok(Some(info)) => info.is_valid_column(column),
            Ok(None) => false,
            Err(e) => {
                warn!(table, column, error = %e, "Failed to check column membership");
                false
            }
        }
    }

    /// Number of cached entries, including cached misses.
    pub fn len(&self) -> usize {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
