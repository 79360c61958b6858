//! Delimiter-based splitting.

use super::placeholder::is_placeholder;

/// Delimiters of the general scanning pass (whitespace is always a delimiter).
pub const GENERAL_DELIMITERS: &str = ",|><=(){}+-*/";

/// Delimiters of the single-row INSERT fast path.
pub const INSERT_DELIMITERS: &str = ",()\"";

/// Splits `input` on whitespace and on every character of `delimiters`.
///
/// Delimiters are dropped and empty tokens are never produced.
#[must_use]
pub fn split(input: &str, delimiters: &str) -> Vec<String> {
    input
        .split(|c: char| c.is_whitespace() || delimiters.contains(c))
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

/// Strips trailing statement terminators and whitespace.
pub(crate) fn trim_terminator(sql: &str) -> &str {
    sql.trim_end_matches(|c: char| c == ';' || c.is_whitespace())
}

/// A flat token list with bounds-checked positional access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<String>,
}

impl TokenStream {
    /// Tokenizes `input` with the given delimiter set.
    #[must_use]
    pub fn new(input: &str, delimiters: &str) -> Self {
        Self {
            tokens: split(input, delimiters),
        }
    }

    /// Returns the number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if there are no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the token at `pos`.
    #[must_use]
    pub fn get(&self, pos: usize) -> Option<&str> {
        self.tokens.get(pos).map(String::as_str)
    }

    /// Returns the token `back` positions before `pos`.
    #[must_use]
    pub fn before(&self, pos: usize, back: usize) -> Option<&str> {
        pos.checked_sub(back).and_then(|p| self.get(p))
    }

    /// Returns true if the token at `pos` equals `word`.
    #[must_use]
    pub fn is(&self, pos: usize, word: &str) -> bool {
        self.get(pos) == Some(word)
    }

    /// Iterates over `(position, token)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.tokens.iter().map(String::as_str).enumerate()
    }

    /// Iterates over the positions of placeholder tokens.
    pub fn placeholder_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.iter()
            .filter(|(_, token)| is_placeholder(token))
            .map(|(pos, _)| pos)
    }

    /// Returns the tokens as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }
}
