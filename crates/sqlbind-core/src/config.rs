//! Analyzer configuration.

use serde::Deserialize;

/// Default number of analyzed statements kept by a
/// [`StatementCache`](crate::StatementCache).
pub const DEFAULT_STATEMENT_CACHE_SIZE: usize = 128;

/// Settings for building an analyzer and its statement cache.
///
/// Every field has a default, so an empty JSON object is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Extra SQL types as `NAME:CODE:NATIVE_TYPE`, e.g.
    /// `GEOMETRY:1111:geo_types::Geometry`.
    pub additional_type_mappings: Vec<String>,
    /// Capacity of the statement cache. Zero disables caching.
    pub statement_cache_size: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            additional_type_mappings: Vec::new(),
            statement_cache_size: DEFAULT_STATEMENT_CACHE_SIZE,
        }
    }
}
