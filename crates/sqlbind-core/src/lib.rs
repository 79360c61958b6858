//! # sqlbind-core
//!
//! Heuristic placeholder analysis for raw SQL statements.
//!
//! Given statement text with positional `?` placeholders, this crate works
//! out for each placeholder which table and column it binds to, and from
//! there which SQL type and Rust type a value for it should have. It does
//! so without a SQL grammar:
//! - table aliases are rewritten back to table names
//! - the statement is split into a flat token list
//! - each placeholder is bound to the column that governs it
//!   (`age > ?`, `id IN (?, ?)`, `birth BETWEEN ? AND ?`)
//! - join tables are disambiguated through a [`SchemaLookup`]
//!
//! Driver-reported parameter metadata can be overlaid afterwards with
//! [`load_parameter_metadata`].
//!
//! ## Placeholders
//!
//! Besides the bare `?`, a placeholder may carry a name and a type hint:
//! `?id`, `?id:BIGINT`, `?:BIGINT`, `?users.id`. A type hint always wins
//! over anything inferred.
//!
//! ```rust
//! use sqlbind_core::{Catalog, StatementAnalyzer, sql_type};
//!
//! let analyzer = StatementAnalyzer::new(Catalog::new());
//! let statement = analyzer
//!     .analyze_sql("SELECT * FROM accounts a WHERE a.owner = ?owner AND a.created > ?since:TIMESTAMP")
//!     .unwrap();
//!
//! let owner = statement.parameter(1).unwrap();
//! assert_eq!(owner.name(), "owner");
//! assert_eq!(owner.table_name(), Some("ACCOUNTS"));
//! assert_eq!(owner.column_name(), Some("OWNER"));
//!
//! let since = statement.parameter(2).unwrap();
//! assert_eq!(since.sql_data_type(), sql_type::TIMESTAMP);
//!
//! assert_eq!(
//!     statement.executable_sql(),
//!     "SELECT * FROM accounts a WHERE a.owner = ? AND a.created > ?"
//! );
//! ```

pub mod analyzer;
pub mod cache;
pub mod config;
pub mod error;
pub mod lexer;
pub mod metadata;
pub mod model;
pub mod parser;
pub mod schema;
pub mod types;

pub use analyzer::StatementAnalyzer;
pub use cache::StatementCache;
pub use config::AnalyzerConfig;
pub use error::{AnalyzeError, Result};
pub use metadata::{ParameterMetadata, load_parameter_metadata};
pub use model::{Parameter, Statement, StatementKind};
pub use parser::ParameterExtractor;
pub use schema::{
    Catalog, ColumnDefinition, ColumnInfo, SchemaCache, SchemaDefinition, SchemaLookup,
    TableDefinition, TableInfo,
};
pub use types::{SqlTypeInfo, TypeRegistry, sql_type};
