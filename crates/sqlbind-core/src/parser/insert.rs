//! Single-row INSERT fast path.
//!
//! `INSERT INTO t (a, b, c) VALUES (?, 'x', ?id)` is read positionally: the
//! table is the third token, the columns run up to `VALUES` and each value
//! pairs with the column at the same position.

use tracing::debug;

use crate::error::{AnalyzeError, Result};
use crate::lexer::{INSERT_DELIMITERS, Placeholder, split};
use crate::model::Parameter;
use crate::types::TypeRegistry;

pub(super) fn extract(sql: &str, types: &TypeRegistry) -> Result<Vec<Parameter>> {
    let tokens = split(sql, INSERT_DELIMITERS);
    if tokens.len() < 4 {
        return Err(AnalyzeError::MalformedInsert(sql.to_string()));
    }
    if tokens[3].eq_ignore_ascii_case("VALUES") {
        return Err(AnalyzeError::InsertWithoutColumns(sql.to_string()));
    }
    let values_pos = tokens
        .iter()
        .position(|t| t.eq_ignore_ascii_case("VALUES"))
        .ok_or_else(|| AnalyzeError::MalformedInsert(sql.to_string()))?;
    if values_pos < 3 {
        return Err(AnalyzeError::MalformedInsert(sql.to_string()));
    }

    let table = tokens[2].to_uppercase();
    let columns = &tokens[3..values_pos];
    let values = &tokens[values_pos + 1..];
    if columns.len() != values.len() {
        return Err(AnalyzeError::ColumnValueMismatch {
            columns: columns.len(),
            values: values.len(),
            sql: sql.to_string(),
        });
    }

    let mut parameters = Vec::new();
    for (column, value) in columns.iter().zip(values) {
        let Some(placeholder) = Placeholder::parse(value) else {
            continue;
        };
        let index = parameters.len() + 1;
        let mut parameter = Parameter::new(index, placeholder.name_or_index(index));
        parameter.bind(Some(table.clone()), column.to_uppercase());
        if let Some(hint) = placeholder.type_hint {
            parameter.apply_type_hint(hint, types);
        }
        parameters.push(parameter);
    }

    debug!(table = %table, parameters = parameters.len(), "Parsed INSERT statement");
    Ok(parameters)
}
