//! Analyzed SQL statement.

use core::fmt;
use std::sync::OnceLock;

use serde::Serialize;

use super::Parameter;

/// Characters that end an inline placeholder name or type hint.
const MARKER_STOPPERS: &str = ",|><=(){}+-*/;";

/// Kind of a statement, taken from a statement-defining keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    /// SELECT.
    Select,
    /// INSERT.
    Insert,
    /// UPDATE.
    Update,
    /// DELETE.
    Delete,
    /// Anything else (WITH, MERGE, CALL, ...).
    Other,
}

impl StatementKind {
    /// Maps an uppercase statement keyword to its kind.
    #[must_use]
    pub fn from_keyword(token: &str) -> Option<Self> {
        match token {
            "SELECT" => Some(Self::Select),
            "INSERT" => Some(Self::Insert),
            "UPDATE" => Some(Self::Update),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }

    /// Detects the kind of `sql` from its leading keyword.
    #[must_use]
    pub fn detect(sql: &str) -> Self {
        let leading = sql
            .trim_start()
            .split(|c: char| c.is_whitespace() || c == '(')
            .next()
            .unwrap_or_default();
        Self::from_keyword(&leading.to_uppercase()).unwrap_or(Self::Other)
    }

    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A SQL statement and the parameters found in it.
///
/// Created once per statement text. Parameters are only ever appended, in
/// index order, and the two load flags only ever go from `false` to `true`,
/// so a fully analyzed statement can be shared freely.
#[derive(Debug, Clone, Serialize)]
pub struct Statement {
    sql: String,
    kind: StatementKind,
    parameters: Vec<Parameter>,
    properties_loaded: bool,
    metadata_loaded: bool,
    #[serde(skip)]
    executable: OnceLock<String>,
}

impl Statement {
    /// Creates an unanalyzed statement.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        let sql = sql.into();
        let kind = StatementKind::detect(&sql);
        Self {
            sql,
            kind,
            parameters: Vec::new(),
            properties_loaded: false,
            metadata_loaded: false,
            executable: OnceLock::new(),
        }
    }

    /// The original statement text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The kind detected from the leading keyword.
    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        self.kind
    }

    /// True for an INSERT that carries no SELECT, i.e. a single VALUES row.
    #[must_use]
    pub fn is_plain_insert(&self) -> bool {
        self.kind == StatementKind::Insert && !self.sql.to_uppercase().contains("SELECT")
    }

    /// The statement text with inline names and type hints removed, ready
    /// for a driver: `id = ?id:INTEGER` becomes `id = ?`.
    pub fn executable_sql(&self) -> &str {
        self.executable
            .get_or_init(|| to_executable(&self.sql))
    }

    /// Parameters in index order.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Returns the parameter with the given 1-based index.
    #[must_use]
    pub fn parameter(&self, index: usize) -> Option<&Parameter> {
        index.checked_sub(1).and_then(|i| self.parameters.get(i))
    }

    /// Returns the first parameter with the given name.
    #[must_use]
    pub fn parameter_named(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name() == name)
    }

    /// Number of parameters.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    /// True once parameters were extracted and typed from the schema.
    #[must_use]
    pub const fn has_loaded_parameter_properties(&self) -> bool {
        self.properties_loaded
    }

    /// True once driver metadata was overlaid.
    #[must_use]
    pub const fn has_loaded_parameter_metadata(&self) -> bool {
        self.metadata_loaded
    }

    pub(crate) fn push_parameter(&mut self, parameter: Parameter) {
        debug_assert_eq!(parameter.index(), self.parameters.len() + 1);
        self.parameters.push(parameter);
    }

    pub(crate) fn parameters_mut(&mut self) -> &mut [Parameter] {
        &mut self.parameters
    }

    pub(crate) fn set_properties_loaded(&mut self) {
        self.properties_loaded = true;
    }

    pub(crate) fn set_metadata_loaded(&mut self) {
        self.metadata_loaded = true;
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "sql = {}", self.sql)?;
        writeln!(f, "executable sql = {}", self.executable_sql())?;
        writeln!(f, "kind = {}", self.kind)?;
        write!(f, "parameters size = {}", self.parameters.len())?;
        for parameter in &self.parameters {
            write!(f, "\n  {parameter}")?;
        }
        Ok(())
    }
}

fn to_executable(sql: &str) -> String {
    if !sql.contains('?') {
        return sql.to_string();
    }
    let mut out = String::with_capacity(sql.len());
    let mut in_marker = false;
    for c in sql.chars() {
        if c == '?' {
            in_marker = true;
            out.push(c);
            continue;
        }
        if c.is_whitespace() || MARKER_STOPPERS.contains(c) {
            in_marker = false;
        }
        if !in_marker {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_kind() {
        assert_eq!(StatementKind::detect("select * from t"), StatementKind::Select);
        assert_eq!(StatementKind::detect("  INSERT INTO t"), StatementKind::Insert);
        assert_eq!(StatementKind::detect("Update t SET a = 1"), StatementKind::Update);
        assert_eq!(StatementKind::detect("delete from t"), StatementKind::Delete);
        assert_eq!(StatementKind::detect("(SELECT 1)"), StatementKind::Other);
        assert_eq!(StatementKind::detect("WITH x AS (SELECT 1)"), StatementKind::Other);
        assert_eq!(StatementKind::detect(""), StatementKind::Other);
    }

    #[test]
    fn test_plain_insert() {
        assert!(Statement::new("INSERT INTO t (a) VALUES (?)").is_plain_insert());
        assert!(!Statement::new("INSERT INTO t (a) SELECT a FROM s").is_plain_insert());
        assert!(!Statement::new("SELECT * FROM t").is_plain_insert());
    }

    #[test]
    fn test_executable_sql() {
        let st = Statement::new("SELECT * FROM t WHERE id = ?id:INTEGER AND name = ?name");
        assert_eq!(
            st.executable_sql(),
            "SELECT * FROM t WHERE id = ? AND name = ?"
        );
    }

    #[test]
    fn test_executable_sql_stops_at_delimiters() {
        let st = Statement::new("INSERT INTO t (a, b) VALUES (?a,?b:VARCHAR)");
        assert_eq!(st.executable_sql(), "INSERT INTO t (a, b) VALUES (?,?)");

        let plain = Statement::new("SELECT 1");
        assert_eq!(plain.executable_sql(), "SELECT 1");
    }

    #[test]
    fn test_parameter_lookup() {
        let mut st = Statement::new("SELECT * FROM t WHERE a = ?a AND b = ?");
        st.push_parameter(Parameter::new(1, "a"));
        st.push_parameter(Parameter::new(2, "2"));
        assert_eq!(st.parameter_count(), 2);
        assert_eq!(st.parameter(1).unwrap().name(), "a");
        assert_eq!(st.parameter(2).unwrap().name(), "2");
        assert!(st.parameter(0).is_none());
        assert!(st.parameter(3).is_none());
        assert_eq!(st.parameter_named("a").unwrap().index(), 1);
    }

    #[test]
    fn test_flags_start_unset() {
        let st = Statement::new("SELECT 1");
        assert!(!st.has_loaded_parameter_properties());
        assert!(!st.has_loaded_parameter_metadata());
        assert_eq!(st.kind(), StatementKind::Select);
    }
}
