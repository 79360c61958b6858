//! Finding the token that governs a placeholder.
//!
//! The governing token is the column a placeholder is compared with:
//! `AGE` in `AGE > ?`, `BIRTH` in `BIRTH BETWEEN ? AND ?`, `ID` in
//! `ID NOT IN (?, ?)`.

use crate::lexer::{TokenStream, is_placeholder};

/// Words that can precede a placeholder without naming a column.
const CLAUSE_KEYWORDS: &[&str] = &[
    "ALL", "AND", "AS", "BY", "CASE", "DISTINCT", "ELSE", "END", "EXISTS", "FROM", "HAVING",
    "INTO", "IS", "LIMIT", "NOT", "NULL", "OFFSET", "ON", "OR", "RETURNING", "SELECT", "SET",
    "THEN", "UNION", "VALUES", "WHEN", "WHERE",
];

/// What a placeholder is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Governing<'a> {
    /// A column name, possibly `TABLE.COLUMN`.
    Column(&'a str),
    /// The placeholder feeds a `COUNT` expression.
    Count,
    /// No column could be determined.
    Unresolved,
}

pub(super) fn governing(stream: &TokenStream, pos: usize) -> Governing<'_> {
    let back = |n| stream.before(pos, n);

    if back(1) == Some("BETWEEN") {
        return column(back(2));
    }
    if back(3) == Some("BETWEEN") && back(1) == Some("AND") {
        return column(back(4));
    }
    if back(1) == Some("COUNT") || back(2) == Some("COUNT") {
        return Governing::Count;
    }

    // IN (?, ?, ?): walk back to the operator over the rest of the list.
    let mut anchor = pos;
    while stream.before(anchor, 1).is_some_and(is_placeholder) {
        anchor -= 1;
    }
    match stream.before(anchor, 1) {
        Some("IN" | "LIKE") => {
            let operand = if stream.before(anchor, 2) == Some("NOT") { 3 } else { 2 };
            column(stream.before(anchor, operand))
        }
        _ if anchor != pos => Governing::Unresolved,
        token => column(token),
    }
}

fn column(token: Option<&str>) -> Governing<'_> {
    match token {
        Some(token) if is_column_token(token) => Governing::Column(token.trim_matches('"')),
        _ => Governing::Unresolved,
    }
}

fn is_column_token(token: &str) -> bool {
    if is_placeholder(token) || CLAUSE_KEYWORDS.contains(&token) {
        return false;
    }
    token
        .trim_start_matches('"')
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
}
