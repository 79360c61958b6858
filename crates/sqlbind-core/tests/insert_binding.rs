//! Tests for placeholder binding in INSERT statements.

mod common;
use common::*;

use sqlbind_core::{AnalyzeError, Statement, StatementKind, sql_type};

// ===================================================================
// Single-row VALUES
// ===================================================================

#[test]
fn insert_all_placeholders() {
    let st = analyze("INSERT INTO users (id, name, age) VALUES (?, ?, ?)");
    assert_eq!(st.kind(), StatementKind::Insert);
    assert_eq!(st.parameter_count(), 3);
    assert_binding(param(&st, 1), Some("USERS"), Some("ID"));
    assert_binding(param(&st, 2), Some("USERS"), Some("NAME"));
    assert_binding(param(&st, 3), Some("USERS"), Some("AGE"));
    assert_eq!(param(&st, 1).sql_data_type(), sql_type::BIGINT);
    assert_eq!(param(&st, 2).sql_data_type(), sql_type::VARCHAR);
    assert_eq!(param(&st, 3).sql_data_type(), sql_type::INTEGER);
    assert_eq!(param(&st, 3).name(), "3");
}

#[test]
fn insert_literals_are_skipped() {
    let st = analyze("INSERT INTO users (id, name, age) VALUES (?, 'anonymous', ?)");
    assert_eq!(st.parameter_count(), 2);
    assert_binding(param(&st, 1), Some("USERS"), Some("ID"));
    assert_eq!(param(&st, 2).index(), 2);
    assert_binding(param(&st, 2), Some("USERS"), Some("AGE"));
}

#[test]
fn insert_named_and_hinted() {
    let st = analyze("insert into orders (user_id, total) values (?userId, ?total:DECIMAL)");
    assert_eq!(param(&st, 1).name(), "userId");
    assert_binding(param(&st, 1), Some("ORDERS"), Some("USER_ID"));
    assert_eq!(param(&st, 1).sql_data_type(), sql_type::BIGINT);

    let total = param(&st, 2);
    assert_eq!(total.name(), "total");
    assert_eq!(total.type_hint(), Some("DECIMAL"));
    assert_eq!(total.sql_data_type(), sql_type::DECIMAL);
    assert_binding(total, Some("ORDERS"), Some("TOTAL"));
}

#[test]
fn insert_quoted_identifiers_and_terminator() {
    let st = analyze("INSERT INTO \"users\" (\"id\", \"email\") VALUES (?, ?);");
    assert_binding(param(&st, 1), Some("USERS"), Some("ID"));
    assert_binding(param(&st, 2), Some("USERS"), Some("EMAIL"));
}

#[test]
fn insert_executable_sql() {
    let st = analyze("INSERT INTO users (id, name) VALUES (?id:BIGINT, ?name)");
    assert_eq!(st.executable_sql(), "INSERT INTO users (id, name) VALUES (?, ?)");
}

// ===================================================================
// INSERT ... SELECT
// ===================================================================

#[test]
fn insert_select_uses_general_rules() {
    let st = analyze(
        "INSERT INTO orders (user_id, status) SELECT id, 'new' FROM users WHERE age > ?",
    );
    assert!(!st.is_plain_insert());
    assert_eq!(st.parameter_count(), 1);
    assert_binding(param(&st, 1), Some("USERS"), Some("AGE"));
}

// ===================================================================
// Structural errors
// ===================================================================

#[test]
fn insert_without_column_list() {
    let err = analyze_err("INSERT INTO users VALUES (?, ?)");
    assert!(matches!(err, AnalyzeError::InsertWithoutColumns(_)));
}

#[test]
fn insert_column_value_mismatch() {
    let err = analyze_err("INSERT INTO users (id, name) VALUES (?)");
    assert!(matches!(
        err,
        AnalyzeError::ColumnValueMismatch {
            columns: 2,
            values: 1,
            ..
        }
    ));
}

#[test]
fn insert_too_short() {
    assert!(matches!(
        analyze_err("INSERT users ?"),
        AnalyzeError::MalformedInsert(_)
    ));
}

#[test]
fn insert_missing_values_keyword() {
    assert!(matches!(
        analyze_err("INSERT INTO users (id, name) SET ?"),
        AnalyzeError::MalformedInsert(_)
    ));
}

#[test]
fn insert_error_leaves_statement_unchanged() {
    let analyzer = shop_analyzer();
    let mut st = Statement::new("INSERT INTO users (id, name) VALUES (?, ?, ?)");
    assert!(analyzer.analyze(&mut st).is_err());
    assert_eq!(st.parameter_count(), 0);
    assert!(!st.has_loaded_parameter_properties());
}

#[test]
fn insert_without_placeholders_is_not_parsed() {
    let st = analyze("INSERT INTO users VALUES (1, 'x')");
    assert_eq!(st.parameter_count(), 0);
    assert!(st.has_loaded_parameter_properties());
}
