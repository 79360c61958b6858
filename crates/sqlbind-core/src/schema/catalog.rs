//! In-memory schema.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{ColumnInfo, SchemaLookup, TableInfo};
use crate::error::Result;
use crate::types::{TypeRegistry, sql_type};

/// A column as written in a schema file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Column name.
    pub name: String,
    /// Declared SQL type, e.g. `VARCHAR(255)`.
    #[serde(rename = "type")]
    pub type_name: String,
}

/// A table as written in a schema file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDefinition {
    /// Table name.
    pub name: String,
    /// Columns in declaration order.
    #[serde(default)]
    pub columns: Vec<ColumnDefinition>,
}

/// A whole schema file: `{"tables": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    /// Table definitions.
    #[serde(default)]
    pub tables: Vec<TableDefinition>,
}

/// A [`SchemaLookup`] over tables held in memory.
///
/// Tables are keyed by uppercased name and listed in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: IndexMap<String, TableInfo>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from definitions, typing each column through
    /// `types`.
    ///
    /// Columns whose declared type is unknown are typed as
    /// [`sql_type::OTHER`].
    #[must_use]
    pub fn from_definitions(schema: &SchemaDefinition, types: &TypeRegistry) -> Self {
        let mut catalog = Self::new();
        for table in &schema.tables {
            let columns = table
                .columns
                .iter()
                .enumerate()
                .map(|(position, column)| column_info(position, column, types))
                .collect();
            catalog.insert(TableInfo::new(table.name.clone(), columns));
        }
        catalog
    }

    /// Adds or replaces a table.
    pub fn insert(&mut self, table: TableInfo) {
        self.tables.insert(table.name.to_uppercase(), table);
    }

    /// Builder form of [`Catalog::insert`].
    #[must_use]
    pub fn with_table(mut self, table: TableInfo) -> Self {
        self.insert(table);
        self
    }

    /// Returns a table by name, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TableInfo> {
        self.tables.get(&name.to_uppercase())
    }

    /// Iterates over tables in insertion order.
    pub fn tables(&self) -> impl Iterator<Item = &TableInfo> {
        self.tables.values()
    }

    /// Number of tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if the catalog has no tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl SchemaLookup for Catalog {
    fn lookup(&self, table: &str) -> Result<Option<TableInfo>> {
        Ok(self.get(table).cloned())
    }
}

fn column_info(position: usize, column: &ColumnDefinition, types: &TypeRegistry) -> ColumnInfo {
    let (sql_type, native_type) = match types.get(&column.type_name) {
        Some(info) => (info.code, info.native_type.clone()),
        None => {
            warn!(
                column = %column.name,
                type_name = %column.type_name,
                "Unknown column type, treating it as OTHER"
            );
            let native = types
                .native_for_code(sql_type::OTHER)
                .unwrap_or("Vec<u8>")
                .to_string();
            (sql_type::OTHER, native)
        }
    };
    ColumnInfo {
        name: column.name.clone(),
        position,
        sql_type,
        type_name: column.type_name.clone(),
        native_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> SchemaDefinition {
        serde_json::from_str(
            r#"{
                "tables": [
                    {"name": "users", "columns": [
                        {"name": "id", "type": "BIGINT"},
                        {"name": "email", "type": "varchar(255)"},
                        {"name": "shape", "type": "GEOMETRY"}
                    ]},
                    {"name": "orders"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_from_definitions() {
        let catalog = Catalog::from_definitions(&definition(), &TypeRegistry::new());
        assert_eq!(catalog.len(), 2);

        let users = catalog.get("USERS").unwrap();
        assert_eq!(users.columns.len(), 3);
        let email = users.column("EMAIL").unwrap();
        assert_eq!(email.position, 1);
        assert_eq!(email.sql_type, sql_type::VARCHAR);
        assert_eq!(email.type_name, "varchar(255)");
        assert_eq!(email.native_type, "String");

        let shape = users.column("shape").unwrap();
        assert_eq!(shape.sql_type, sql_type::OTHER);

        assert!(catalog.get("orders").unwrap().columns.is_empty());
    }

    #[test]
    fn test_tables_keep_insertion_order() {
        let catalog = Catalog::from_definitions(&definition(), &TypeRegistry::new());
        let names: Vec<_> = catalog.tables().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["users", "orders"]);
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::new().with_table(TableInfo::new("Items", Vec::new()));
        assert!(catalog.lookup("items").unwrap().is_some());
        assert!(catalog.lookup("missing").unwrap().is_none());
    }
}
