#![allow(dead_code)]

use std::sync::Mutex;

use sqlbind_core::{
    AnalyzeError, Catalog, ColumnDefinition, Parameter, Result, SchemaDefinition, SchemaLookup,
    Statement, StatementAnalyzer, TableDefinition, TableInfo, TypeRegistry,
};

fn table(name: &str, columns: &[(&str, &str)]) -> TableDefinition {
    TableDefinition {
        name: name.to_string(),
        columns: columns
            .iter()
            .map(|(name, type_name)| ColumnDefinition {
                name: (*name).to_string(),
                type_name: (*type_name).to_string(),
            })
            .collect(),
    }
}

/// A small shop schema used across the integration tests.
pub fn shop_schema() -> SchemaDefinition {
    SchemaDefinition {
        tables: vec![
            table(
                "users",
                &[
                    ("id", "BIGINT"),
                    ("name", "VARCHAR(100)"),
                    ("age", "INTEGER"),
                    ("email", "VARCHAR(255)"),
                ],
            ),
            table(
                "orders",
                &[
                    ("id", "BIGINT"),
                    ("user_id", "BIGINT"),
                    ("total", "DECIMAL(10, 2)"),
                    ("status", "VARCHAR(20)"),
                    ("created_at", "TIMESTAMP"),
                ],
            ),
            table(
                "accounts",
                &[("id", "BIGINT"), ("owner", "VARCHAR"), ("balance", "DECIMAL")],
            ),
            table(
                "products",
                &[("id", "BIGINT"), ("name", "TEXT"), ("price", "DOUBLE")],
            ),
        ],
    }
}

pub fn shop_catalog() -> Catalog {
    Catalog::from_definitions(&shop_schema(), &TypeRegistry::new())
}

pub fn shop_analyzer() -> StatementAnalyzer<Catalog> {
    StatementAnalyzer::new(shop_catalog())
}

pub fn analyze(sql: &str) -> Statement {
    shop_analyzer()
        .analyze_sql(sql)
        .unwrap_or_else(|e| panic!("Failed to analyze: {sql}\nError: {e:?}"))
}

pub fn analyze_err(sql: &str) -> AnalyzeError {
    shop_analyzer()
        .analyze_sql(sql)
        .expect_err(&format!("Expected analysis error for: {sql}"))
}

pub fn param(statement: &Statement, index: usize) -> &Parameter {
    statement
        .parameter(index)
        .unwrap_or_else(|| panic!("No parameter {index} in: {}", statement.sql()))
}

/// Asserts the table and column a parameter binds to.
pub fn assert_binding(parameter: &Parameter, table: Option<&str>, column: Option<&str>) {
    assert_eq!(
        (parameter.table_name(), parameter.column_name()),
        (table, column),
        "Unexpected binding for parameter {parameter}"
    );
}

/// A lookup over the shop catalog that records every table it is asked for.
#[derive(Debug, Default)]
pub struct RecordingLookup {
    catalog: Catalog,
    calls: Mutex<Vec<String>>,
}

impl RecordingLookup {
    pub fn shop() -> Self {
        Self {
            catalog: shop_catalog(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl SchemaLookup for RecordingLookup {
    fn lookup(&self, table: &str) -> Result<Option<TableInfo>> {
        self.calls.lock().unwrap().push(table.to_string());
        self.catalog.lookup(table)
    }
}
