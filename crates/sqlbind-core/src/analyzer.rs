//! Statement analysis: extraction followed by property resolution.

use tracing::{debug, warn};

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::model::{Parameter, Statement};
use crate::parser::ParameterExtractor;
use crate::schema::{SchemaCache, SchemaLookup};
use crate::types::TypeRegistry;

/// Analyzes statements against a schema.
///
/// Holds the schema cache and type registry that every analysis shares, so
/// one analyzer should live as long as the schema it reads.
///
/// ```
/// use sqlbind_core::{Catalog, StatementAnalyzer};
///
/// let analyzer = StatementAnalyzer::new(Catalog::new());
/// let statement = analyzer.analyze_sql("UPDATE users SET age = ? WHERE id = ?").unwrap();
///
/// let age = statement.parameter(1).unwrap();
/// assert_eq!(age.table_name(), Some("USERS"));
/// assert_eq!(age.column_name(), Some("AGE"));
/// ```
#[derive(Debug)]
pub struct StatementAnalyzer<L> {
    schema: SchemaCache<L>,
    types: TypeRegistry,
}

impl<L: SchemaLookup> StatementAnalyzer<L> {
    /// Creates an analyzer with the built-in types.
    pub fn new(lookup: L) -> Self {
        Self::with_types(lookup, TypeRegistry::new())
    }

    /// Creates an analyzer with a custom type registry.
    pub fn with_types(lookup: L, types: TypeRegistry) -> Self {
        Self {
            schema: SchemaCache::new(lookup),
            types,
        }
    }

    /// Creates an analyzer with the built-in types plus the configured
    /// mappings.
    pub fn from_config(lookup: L, config: &AnalyzerConfig) -> Result<Self> {
        let types = TypeRegistry::with_mappings(&config.additional_type_mappings)?;
        Ok(Self::with_types(lookup, types))
    }

    /// The schema cache.
    pub const fn schema(&self) -> &SchemaCache<L> {
        &self.schema
    }

    /// The type registry.
    pub const fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Extracts the parameters of `statement` and types them from the schema.
    ///
    /// Does nothing if the statement was already analyzed. On error the
    /// statement is left unchanged.
    pub fn analyze(&self, statement: &mut Statement) -> Result<()> {
        if statement.has_loaded_parameter_properties() {
            return Ok(());
        }

        ParameterExtractor::new(&self.schema, &self.types).extract(statement)?;
        for parameter in statement.parameters_mut() {
            self.resolve_properties(parameter);
        }
        statement.set_properties_loaded();

        debug!(%statement, "Analyzed statement");
        Ok(())
    }

    /// Creates and analyzes a statement.
    pub fn analyze_sql(&self, sql: &str) -> Result<Statement> {
        let mut statement = Statement::new(sql);
        self.analyze(&mut statement)?;
        Ok(statement)
    }

    fn resolve_properties(&self, parameter: &mut Parameter) {
        if parameter.is_used_by_count() || parameter.type_hint().is_some() || parameter.is_typed()
        {
            return;
        }
        let (Some(table), Some(column)) = (parameter.table_name(), parameter.column_name()) else {
            warn!(
                index = parameter.index(),
                name = parameter.name(),
                "Cannot type placeholder without table and column"
            );
            return;
        };

        let info = match self.schema.table(table) {
            Ok(Some(info)) => info,
            Ok(None) => {
                warn!(table, "Table not found in schema");
                return;
            }
            Err(e) => {
                warn!(table, error = %e, "Failed to describe table");
                return;
            }
        };
        let Some(column_info) = info.column(column) else {
            warn!(table, column, "Column not found in table");
            return;
        };

        parameter.set_type(
            column_info.sql_type,
            &column_info.type_name,
            &column_info.native_type,
        );
    }
}
