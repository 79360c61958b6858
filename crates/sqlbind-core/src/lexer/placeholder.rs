//! Placeholder marker parsing.
//!
//! A marker is `?` optionally followed, without whitespace, by a name and a
//! `:`-separated type hint: `?`, `?id`, `?id:INTEGER`, `?:INTEGER`,
//! `?users.id`, `?users.id:INTEGER`.

/// Returns true if `token` is a placeholder marker.
#[must_use]
pub fn is_placeholder(token: &str) -> bool {
    token.starts_with('?')
}

/// Returns true if `sql` contains at least one placeholder marker.
#[must_use]
pub fn has_placeholder(sql: &str) -> bool {
    sql.contains('?')
}

/// A parsed placeholder token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Inline name, if one follows the marker.
    pub name: Option<&'a str>,
    /// Inline type hint, if one follows the name.
    pub type_hint: Option<&'a str>,
}

impl<'a> Placeholder<'a> {
    /// Parses a placeholder token. Returns `None` if `token` is not one.
    #[must_use]
    pub fn parse(token: &'a str) -> Option<Self> {
        let body = token.strip_prefix('?')?;
        let (name, type_hint) = match body.split_once(':') {
            Some((name, hint)) => (name, Some(hint).filter(|h| !h.is_empty())),
            None => (body, None),
        };
        Some(Self {
            name: Some(name).filter(|n| !n.is_empty()),
            type_hint,
        })
    }

    /// Returns the parameter name: the inline name, or the index as text.
    #[must_use]
    pub fn name_or_index(&self, index: usize) -> String {
        self.name
            .map_or_else(|| index.to_string(), ToString::to_string)
    }

    /// Splits a `table.column` inline name.
    #[must_use]
    pub fn qualified(&self) -> Option<(&'a str, &'a str)> {
        self.name?
            .rsplit_once('.')
            .filter(|(table, column)| !table.is_empty() && !column.is_empty())
    }
}
