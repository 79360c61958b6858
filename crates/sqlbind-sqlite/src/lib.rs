//! # sqlbind-sqlite
//!
//! SQLite collaborators for `sqlbind-core`.
//!
//! Analysis itself is synchronous, so the database is read up front:
//! [`load_catalog`] turns the live schema into an in-memory
//! [`Catalog`](sqlbind_core::Catalog), and [`describe_parameters`] asks the
//! driver what it knows about a prepared statement's parameters.
//!
//! ```rust,no_run
//! use sqlbind_core::{StatementAnalyzer, TypeRegistry};
//! use sqlbind_sqlite::load_catalog;
//! use sqlx::sqlite::SqlitePool;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = SqlitePool::connect("sqlite://app.db").await?;
//! let types = TypeRegistry::new();
//! let catalog = load_catalog(&pool, &types).await?;
//!
//! let analyzer = StatementAnalyzer::with_types(catalog, types);
//! let statement = analyzer.analyze_sql("SELECT * FROM users WHERE email = ?")?;
//! println!("{statement}");
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod describe;
pub mod error;

pub use catalog::{affinity, load_catalog};
pub use describe::{
    DescribedParameter, DescribedParameters, describe_parameters, load_driver_metadata,
};
pub use error::{Result, SqliteError};
