//! Resolving the table a governing column belongs to.

use tracing::{debug, warn};

use crate::lexer::{TokenStream, is_placeholder};
use crate::model::StatementKind;
use crate::schema::{SchemaCache, SchemaLookup};

/// Words that end the table list of a `FROM` clause.
const CLAUSE_END: &[&str] = &["WHERE", "GROUP", "ORDER", "HAVING", "LIMIT", "OFFSET", "UNION"];

/// Words inside a `FROM` clause that are never table names.
const JOIN_KEYWORDS: &[&str] = &[
    "JOIN", "INNER", "LEFT", "RIGHT", "OUTER", "FULL", "CROSS", "NATURAL", "ON", "USING", "AND",
    "OR", "AS", "NOT", "NULL", "IS", "IN", "SELECT", "FROM",
];

/// Finds the table `column` belongs to for the placeholder at `pos`.
///
/// The nearest statement keyword before the placeholder decides how the
/// table is read.
pub(super) fn resolve_table<L: SchemaLookup>(
    stream: &TokenStream,
    pos: usize,
    column: &str,
    schema: &SchemaCache<L>,
) -> Option<String> {
    let (keyword_pos, kind) = (0..pos)
        .rev()
        .find_map(|i| stream.get(i).and_then(StatementKind::from_keyword).map(|k| (i, k)))?;

    let table = match kind {
        StatementKind::Insert => stream.get(keyword_pos + 2).map(str::to_string),
        StatementKind::Update => stream.get(keyword_pos + 1).map(str::to_string),
        StatementKind::Delete => {
            let offset = if stream.is(keyword_pos + 1, "FROM") { 2 } else { 1 };
            stream.get(keyword_pos + offset).map(str::to_string)
        }
        StatementKind::Select => select_table(stream, pos, column, schema),
        StatementKind::Other => None,
    };
    let table = table
        .map(|t| t.trim_matches('"').to_string())
        .filter(|t| is_table_candidate(t));
    debug!(column, table = ?table, kind = %kind, "Resolved table for column");
    table
}

/// Reads the table of a SELECT from the nearest `FROM` before `pos`.
fn select_table<L: SchemaLookup>(
    stream: &TokenStream,
    pos: usize,
    column: &str,
    schema: &SchemaCache<L>,
) -> Option<String> {
    let from = (0..pos).rev().find(|&i| stream.is(i, "FROM"))?;
    let boundary = (from + 1..pos).find(|&i| {
        stream
            .get(i)
            .is_some_and(|token| CLAUSE_END.contains(&token))
    });
    let end = boundary.unwrap_or(pos);
    let after_where = boundary.is_some_and(|b| stream.is(b, "WHERE"));

    // `FROM main.users WHERE`: a lone token is the table even when qualified.
    if after_where && end == from + 2 {
        if let Some(token) = stream.get(from + 1).map(|t| t.trim_matches('"')) {
            if is_table_name(token) {
                return Some(token.to_string());
            }
        }
    }

    let mut candidates: Vec<&str> = Vec::new();
    for i in from + 1..end {
        if let Some(token) = stream.get(i) {
            let token = token.trim_matches('"');
            if is_table_candidate(token) && !candidates.contains(&token) {
                candidates.push(token);
            }
        }
    }

    if after_where && candidates.len() == 1 {
        return Some(candidates[0].to_string());
    }

    let found = candidates
        .iter()
        .find(|table| schema.has_column(table, column))
        .map(|table| (*table).to_string());
    if found.is_none() {
        warn!(
            column,
            candidates = ?candidates,
            "No table in the FROM clause has this column"
        );
    }
    found
}

fn is_table_candidate(token: &str) -> bool {
    !token.contains('.') && is_table_name(token)
}

fn is_table_name(token: &str) -> bool {
    !is_placeholder(token)
        && !JOIN_KEYWORDS.contains(&token)
        && !CLAUSE_END.contains(&token)
        && token
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::GENERAL_DELIMITERS;
    use crate::schema::{Catalog, ColumnInfo, TableInfo};

    fn table(name: &str, columns: &[&str]) -> TableInfo {
        TableInfo::new(
            name,
            columns
                .iter()
                .enumerate()
                .map(|(position, c)| ColumnInfo {
                    name: (*c).to_string(),
                    position,
                    sql_type: 4,
                    type_name: "INTEGER".into(),
                    native_type: "i32".into(),
                })
                .collect(),
        )
    }

    fn schema() -> SchemaCache<Catalog> {
        SchemaCache::new(
            Catalog::new()
                .with_table(table("ORDERS", &["ID", "USER_ID", "TOTAL"]))
                .with_table(table("USERS", &["ID", "NAME"])),
        )
    }

    fn resolve(sql: &str, column: &str) -> Option<String> {
        let stream = TokenStream::new(sql, GENERAL_DELIMITERS);
        let pos = stream.placeholder_positions().last().unwrap();
        resolve_table(&stream, pos, column, &schema())
    }

    #[test]
    fn test_dml_keywords() {
        assert_eq!(
            resolve("UPDATE USERS SET NAME = ?", "NAME").as_deref(),
            Some("USERS")
        );
        assert_eq!(
            resolve("DELETE FROM USERS WHERE ID = ?", "ID").as_deref(),
            Some("USERS")
        );
        assert_eq!(
            resolve("DELETE USERS WHERE ID = ?", "ID").as_deref(),
            Some("USERS")
        );
        assert_eq!(
            resolve("INSERT INTO USERS (ID) SELECT ID FROM ORDERS WHERE TOTAL > ?", "TOTAL")
                .as_deref(),
            Some("ORDERS")
        );
    }

    #[test]
    fn test_single_table_before_where() {
        assert_eq!(
            resolve("SELECT * FROM ACCOUNTS WHERE ID = ?", "ID").as_deref(),
            Some("ACCOUNTS")
        );
    }

    #[test]
    fn test_schema_qualified_table_before_where() {
        assert_eq!(
            resolve("SELECT * FROM MAIN.USERS WHERE ID = ?", "ID").as_deref(),
            Some("MAIN.USERS")
        );
        assert_eq!(
            resolve("SELECT * FROM \"MAIN.USERS\" WHERE ID = ?", "ID").as_deref(),
            Some("MAIN.USERS")
        );
    }

    #[test]
    fn test_join_consults_schema() {
        let sql = "SELECT * FROM ORDERS INNER JOIN USERS ON USERS.ID = ORDERS.USER_ID WHERE NAME = ?";
        assert_eq!(resolve(sql, "NAME").as_deref(), Some("USERS"));
        assert_eq!(resolve(sql, "TOTAL").as_deref(), Some("ORDERS"));
        assert_eq!(resolve(sql, "MISSING"), None);
    }

    #[test]
    fn test_order_by_clause() {
        assert_eq!(
            resolve("SELECT * FROM USERS ORDER BY NAME LIMIT ? ", "NAME").as_deref(),
            Some("USERS")
        );
    }

    #[test]
    fn test_no_statement_keyword() {
        assert_eq!(resolve("WITH X AS Y WHERE A = ?", "A"), None);
    }
}
