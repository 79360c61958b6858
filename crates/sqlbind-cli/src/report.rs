//! Plain-text rendering of analysis results.

use std::fmt::Write;

use sqlbind_core::{Catalog, Statement};

/// Renders a statement and its parameters as an aligned table.
pub fn render_statement(statement: &Statement) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "kind:       {}", statement.kind());
    let _ = writeln!(out, "executable: {}", statement.executable_sql());
    if statement.parameter_count() == 0 {
        let _ = writeln!(out, "no parameters");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<4} {:<16} {:<16} {:<16} {:>6} {:<16} {}",
        "#", "name", "table", "column", "code", "type", "native"
    );
    let _ = writeln!(out, "{:-<90}", "");
    for p in statement.parameters() {
        let column = if p.is_used_by_count() {
            "COUNT(*)"
        } else {
            p.column_name().unwrap_or("-")
        };
        let _ = writeln!(
            out,
            "{:<4} {:<16} {:<16} {:<16} {:>6} {:<16} {}",
            p.index(),
            p.name(),
            p.table_name().unwrap_or("-"),
            column,
            p.sql_data_type(),
            p.sql_data_type_name().unwrap_or("-"),
            p.native_type_name().unwrap_or("-"),
        );
    }
    out
}

/// Renders every table of a catalog with its columns.
pub fn render_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    for table in catalog.tables() {
        let _ = writeln!(out, "{}", table.name);
        for column in &table.columns {
            let _ = writeln!(
                out,
                "  {:<24} {:<20} {:>6}  {}",
                column.name, column.type_name, column.sql_type, column.native_type
            );
        }
    }
    out
}
