//! Parameter metadata reported by SQLite for a prepared statement.

use sqlbind_core::{ParameterMetadata, Statement, TypeRegistry, load_parameter_metadata, sql_type};
use sqlx::sqlite::SqlitePool;
use sqlx::{Either, Executor, Statement as _, TypeInfo as _};
use tracing::debug;

use crate::error::Result;

/// Type of one parameter as reported by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribedParameter {
    /// Driver type name.
    pub type_name: String,
    /// SQL type code resolved from the type name.
    pub sql_type: i32,
    /// Rust type resolved from the type name.
    pub native_type: String,
}

impl DescribedParameter {
    fn from_type_name(type_name: &str, types: &TypeRegistry) -> Self {
        let (sql_type, native_type) = types.get(type_name).map_or_else(
            || (sql_type::UNKNOWN, String::new()),
            |info| (info.code, info.native_type.clone()),
        );
        Self {
            type_name: type_name.to_string(),
            sql_type,
            native_type,
        }
    }
}

/// What the driver could tell about the parameters of a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescribedParameters {
    /// One entry per parameter, in order.
    Typed(Vec<DescribedParameter>),
    /// The driver reports at most a parameter count. SQLite always does.
    Unsupported {
        /// Parameter count, when reported.
        count: Option<usize>,
    },
}

impl DescribedParameters {
    fn get(&self, index: usize) -> Option<&DescribedParameter> {
        match self {
            Self::Typed(parameters) => index.checked_sub(1).and_then(|i| parameters.get(i)),
            Self::Unsupported { .. } => None,
        }
    }
}

impl ParameterMetadata for DescribedParameters {
    fn parameter_count(&self) -> Option<usize> {
        match self {
            Self::Typed(parameters) => Some(parameters.len()),
            Self::Unsupported { .. } => None,
        }
    }

    fn native_type_name(&self, index: usize) -> String {
        self.get(index)
            .map(|p| p.native_type.clone())
            .unwrap_or_default()
    }

    fn type_code(&self, index: usize) -> i32 {
        self.get(index).map_or(sql_type::UNKNOWN, |p| p.sql_type)
    }

    fn type_name(&self, index: usize) -> String {
        self.get(index)
            .map(|p| p.type_name.clone())
            .unwrap_or_default()
    }
}

/// Prepares the executable text of `statement` and reads what the driver
/// reports about its parameters.
pub async fn describe_parameters(
    pool: &SqlitePool,
    statement: &Statement,
    types: &TypeRegistry,
) -> Result<DescribedParameters> {
    let prepared = pool.prepare(statement.executable_sql()).await?;
    let described = match prepared.parameters() {
        Some(Either::Left(infos)) => DescribedParameters::Typed(
            infos
                .iter()
                .map(|info| DescribedParameter::from_type_name(info.name(), types))
                .collect(),
        ),
        Some(Either::Right(count)) => DescribedParameters::Unsupported { count: Some(count) },
        None => DescribedParameters::Unsupported { count: None },
    };
    debug!(sql = statement.sql(), described = ?described, "Described statement parameters");
    Ok(described)
}

/// Describes `statement` through SQLite and overlays the result.
///
/// Returns whether driver metadata was applied.
pub async fn load_driver_metadata(
    pool: &SqlitePool,
    statement: &mut Statement,
    types: &TypeRegistry,
) -> Result<bool> {
    let described = describe_parameters(pool, statement, types).await?;
    Ok(load_parameter_metadata(statement, &described)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SqliteError;
    use sqlbind_core::{AnalyzeError, Catalog, StatementAnalyzer};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .expect("Failed to create in-memory SQLite pool");
        sqlx::query("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT)")
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    #[tokio::test]
    async fn test_sqlite_reports_count_only() {
        let pool = create_test_pool().await;
        let st = Statement::new("SELECT * FROM users WHERE id = ?id:INTEGER AND name = ?");
        let described = describe_parameters(&pool, &st, &TypeRegistry::new())
            .await
            .unwrap();
        assert_eq!(described, DescribedParameters::Unsupported { count: Some(2) });
        assert_eq!(described.parameter_count(), None);
    }

    #[tokio::test]
    async fn test_load_is_noop_on_sqlite() {
        let pool = create_test_pool().await;
        let analyzer = StatementAnalyzer::new(Catalog::new());
        let mut st = analyzer
            .analyze_sql("UPDATE users SET name = ? WHERE id = ?")
            .unwrap();
        let applied = load_driver_metadata(&pool, &mut st, analyzer.types())
            .await
            .unwrap();
        assert!(!applied);
        assert!(!st.has_loaded_parameter_metadata());
    }

    #[tokio::test]
    async fn test_prepare_error() {
        let pool = create_test_pool().await;
        let st = Statement::new("SELECT * FROM missing WHERE id = ?");
        let err = describe_parameters(&pool, &st, &TypeRegistry::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SqliteError::Database(_)));
    }

    #[test]
    fn test_typed_parameters_overlay() {
        let types = TypeRegistry::new();
        let described = DescribedParameters::Typed(vec![
            DescribedParameter::from_type_name("TEXT", &types),
            DescribedParameter::from_type_name("INTEGER", &types),
        ]);
        assert_eq!(described.parameter_count(), Some(2));
        assert_eq!(described.type_code(2), sql_type::INTEGER);
        assert_eq!(described.native_type_name(1), "String");
        assert_eq!(described.type_code(3), sql_type::UNKNOWN);

        let mut st = StatementAnalyzer::new(Catalog::new())
            .analyze_sql("UPDATE users SET name = ? WHERE id = ?")
            .unwrap();
        assert!(load_parameter_metadata(&mut st, &described).unwrap());
        assert_eq!(st.parameter(1).unwrap().sql_data_type_name(), Some("TEXT"));
        assert_eq!(st.parameter(2).unwrap().native_type_name(), Some("i32"));

        let mut short = StatementAnalyzer::new(Catalog::new())
            .analyze_sql("DELETE FROM users WHERE id = ?")
            .unwrap();
        let err = load_parameter_metadata(&mut short, &described).unwrap_err();
        assert!(matches!(err, AnalyzeError::ParameterCountMismatch { .. }));
    }
}
