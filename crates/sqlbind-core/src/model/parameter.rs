//! Positional parameter.

use core::fmt;

use serde::Serialize;

use crate::types::{TypeRegistry, sql_type};

/// One positional placeholder of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    index: usize,
    name: String,
    table_name: Option<String>,
    column_name: Option<String>,
    sql_data_type: i32,
    sql_data_type_name: Option<String>,
    native_type_name: Option<String>,
    type_hint: Option<String>,
    used_by_count: bool,
}

impl Parameter {
    /// Creates an untyped, unbound parameter.
    #[must_use]
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            table_name: None,
            column_name: None,
            sql_data_type: sql_type::UNKNOWN,
            sql_data_type_name: None,
            native_type_name: None,
            type_hint: None,
            used_by_count: false,
        }
    }

    /// 1-based position of the placeholder in the statement.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Parameter name: the inline name, or the index as text.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Table the placeholder binds to, if inferred.
    #[must_use]
    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    /// Column the placeholder binds to, if inferred.
    #[must_use]
    pub fn column_name(&self) -> Option<&str> {
        self.column_name.as_deref()
    }

    /// SQL type code, [`sql_type::UNKNOWN`] when not known.
    #[must_use]
    pub const fn sql_data_type(&self) -> i32 {
        self.sql_data_type
    }

    /// SQL type name.
    #[must_use]
    pub fn sql_data_type_name(&self) -> Option<&str> {
        self.sql_data_type_name.as_deref()
    }

    /// Rust type a value for this parameter binds as.
    #[must_use]
    pub fn native_type_name(&self) -> Option<&str> {
        self.native_type_name.as_deref()
    }

    /// Inline type hint exactly as written after the marker.
    #[must_use]
    pub fn type_hint(&self) -> Option<&str> {
        self.type_hint.as_deref()
    }

    /// True when the placeholder sits inside a `COUNT` expression.
    #[must_use]
    pub const fn is_used_by_count(&self) -> bool {
        self.used_by_count
    }

    /// True when the type code is known.
    #[must_use]
    pub const fn is_typed(&self) -> bool {
        self.sql_data_type != sql_type::UNKNOWN
    }

    pub(crate) fn bind(&mut self, table: Option<String>, column: String) {
        if self.used_by_count {
            return;
        }
        self.table_name = table;
        self.column_name = Some(column);
    }

    pub(crate) fn mark_used_by_count(&mut self) {
        self.used_by_count = true;
        self.table_name = None;
        self.column_name = None;
    }

    /// Records an inline type hint and resolves it through `types`.
    pub(crate) fn apply_type_hint(&mut self, hint: &str, types: &TypeRegistry) {
        self.type_hint = Some(hint.to_string());
        self.sql_data_type = types.code_for(hint);
        self.sql_data_type_name = Some(hint.to_string());
        self.native_type_name = types
            .get(hint)
            .map(|info| info.native_type.clone());
    }

    pub(crate) fn set_type(&mut self, code: i32, type_name: &str, native_type_name: &str) {
        self.sql_data_type = code;
        self.sql_data_type_name = Some(type_name.to_string());
        self.native_type_name = Some(native_type_name.to_string());
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opt = |value: Option<&str>| value.unwrap_or("-").to_string();
        write!(
            f,
            "index = {}, name = {}, table = {}, column = {}, sqlDataType = {}, \
             sqlDataTypeName = {}, nativeType = {}, usedByCount = {}",
            self.index,
            self.name,
            opt(self.table_name()),
            opt(self.column_name()),
            self.sql_data_type,
            opt(self.sql_data_type_name()),
            opt(self.native_type_name()),
            self.used_by_count
        )
    }
}
