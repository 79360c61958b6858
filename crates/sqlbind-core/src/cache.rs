//! Cache of analyzed statements keyed by SQL text.

use std::sync::{Arc, Mutex, PoisonError};

use indexmap::IndexMap;
use tracing::trace;

use crate::analyzer::StatementAnalyzer;
use crate::error::Result;
use crate::model::Statement;
use crate::schema::SchemaLookup;

/// Analyzed statements with least-recently-used eviction.
///
/// Entries are kept in an [`IndexMap`] ordered from least to most recently
/// used. A capacity of 0 disables caching.
#[derive(Debug)]
pub struct StatementCache {
    entries: Mutex<IndexMap<String, Arc<Statement>>>,
    capacity: usize,
}

impl StatementCache {
    /// Creates a cache holding at most `capacity` statements.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(IndexMap::with_capacity(capacity)),
            capacity,
        }
    }

    /// Returns the analyzed statement for `sql`, analyzing it on a miss.
    ///
    /// The lock is held during analysis, so concurrent callers asking for
    /// the same text analyze it once. Errors are returned and not cached.
    pub fn get_or_analyze<L: SchemaLookup>(
        &self,
        sql: &str,
        analyzer: &StatementAnalyzer<L>,
    ) -> Result<Arc<Statement>> {
        if self.capacity == 0 {
            return analyzer.analyze_sql(sql).map(Arc::new);
        }

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(statement) = entries.shift_remove(sql) {
            trace!(sql, "Statement cache hit");
            entries.insert(sql.to_string(), Arc::clone(&statement));
            return Ok(statement);
        }

        trace!(sql, "Statement cache miss");
        let statement = Arc::new(analyzer.analyze_sql(sql)?);
        if entries.len() >= self.capacity {
            if let Some((evicted, _)) = entries.shift_remove_index(0) {
                trace!(sql = %evicted, "Evicted statement from cache");
            }
        }
        entries.insert(sql.to_string(), Arc::clone(&statement));
        Ok(statement)
    }

    /// Returns true if `sql` is cached. Does not change the eviction order.
    pub fn contains(&self, sql: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(sql)
    }

    /// Number of cached statements.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of cached statements.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops every cached statement.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
