//! Table alias resolution.
//!
//! Rewrites `alias.column` references back to `table.column` so the
//! extractor never has to track aliases. Scope is not tracked: an alias
//! reused inside a nested subquery binds to the first table it follows.

use tracing::trace;

use super::placeholder::is_placeholder;
use super::tokenizer::split;

/// Tokens that, when directly preceding a candidate alias, show it is not
/// introducing an alias (`FROM users`, `JOIN users`, `, users`, ...).
const NON_INTRODUCING: &[&str] = &[",", "UPDATE", "FROM", "AS", "JOIN", ")"];

/// Delimiters of the alias pass. Parentheses and commas are kept as
/// standalone tokens instead.
const ALIAS_DELIMITERS: &str = "|><={}+-*/";

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_identifier_start(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
}

/// Replaces table aliases in `sql` with the table names they stand for.
///
/// Text without a `.` cannot reference an alias and is returned unchanged.
/// Otherwise the result is uppercased and whitespace-normalized, with
/// parentheses and commas surrounded by spaces.
#[must_use]
pub fn resolve_aliases(sql: &str) -> String {
    if !sql.contains('.') {
        return sql.to_string();
    }

    let mut message = sql.to_uppercase().split_whitespace().collect::<Vec<_>>().join(" ");
    message.push(' ');
    let mut message = message
        .replace('(', " ( ")
        .replace(')', " ) ")
        .replace(',', " , ");

    let tokens = split(&message, ALIAS_DELIMITERS);

    let mut candidates: Vec<&str> = Vec::new();
    for token in &tokens {
        if is_placeholder(token) {
            continue;
        }
        if let Some((alias, _)) = token.split_once('.') {
            if is_identifier_start(alias) && !candidates.contains(&alias) {
                candidates.push(alias);
            }
        }
    }

    let mut bindings: Vec<(&str, &str)> = Vec::new();
    let mut introduced_by_as: Vec<&str> = Vec::new();
    for j in 1..tokens.len() {
        let token = tokens[j].as_str();
        if !candidates.contains(&token) || bindings.iter().any(|(alias, _)| *alias == token) {
            continue;
        }
        let previous = tokens[j - 1].as_str();
        if previous == "AS" {
            if let Some(table) = j.checked_sub(2).map(|p| tokens[p].as_str()) {
                if is_identifier_start(table) {
                    bindings.push((token, table));
                    introduced_by_as.push(token);
                }
            }
        } else if !NON_INTRODUCING.contains(&previous) && is_identifier_start(previous) {
            bindings.push((token, previous));
        }
    }

    for (alias, table) in &bindings {
        trace!(alias, table, "Resolved table alias");
        message = replace_words(&message, &format!("{alias}."), &format!("{table}."));
        message = replace_words(&message, &format!("{table} {alias}"), table);
    }
    for alias in &introduced_by_as {
        message = replace_words(&message, &format!("AS {alias}"), "");
    }

    message
}

/// Replaces every whole-word occurrence of `old` in `message` with `new`.
///
/// An occurrence counts only when the character before it is not an
/// identifier character (letter, digit or underscore). When `old` ends with
/// an identifier character, the character after it must not be one either.
#[must_use]
pub fn replace_words(message: &str, old: &str, new: &str) -> String {
    if old.is_empty() {
        return message.to_string();
    }
    let check_trailing = old.chars().next_back().is_some_and(is_identifier_char);

    let mut out = String::with_capacity(message.len());
    let mut copied = 0;
    let mut search_from = 0;
    while let Some(found) = message[search_from..].find(old) {
        let start = search_from + found;
        let end = start + old.len();
        let leading_ok = !message[..start]
            .chars()
            .next_back()
            .is_some_and(is_identifier_char);
        let trailing_ok =
            !check_trailing || !message[end..].chars().next().is_some_and(is_identifier_char);

        if leading_ok && trailing_ok {
            out.push_str(&message[copied..start]);
            out.push_str(new);
            copied = end;
            search_from = end;
        } else {
            search_from = start + old.chars().next().map_or(1, char::len_utf8);
        }
    }
    out.push_str(&message[copied..]);
    out
}
