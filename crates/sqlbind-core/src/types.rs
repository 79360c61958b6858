//! SQL data type codes and the type registry.
//!
//! Type codes follow the numbering used by most database drivers for their
//! generic parameter metadata (`VARCHAR = 12`, `INTEGER = 4`, ...). The
//! registry maps a declared type name to its code and to the Rust type a
//! value should be bound as.

use std::collections::HashMap;

use tracing::warn;

use crate::error::{AnalyzeError, Result};

/// Numeric SQL type codes.
pub mod sql_type {
    /// Sentinel for a parameter whose type is not known.
    pub const UNKNOWN: i32 = -9999;

    pub const ARRAY: i32 = 2003;
    pub const BIGINT: i32 = -5;
    pub const BINARY: i32 = -2;
    pub const BIT: i32 = -7;
    pub const BLOB: i32 = 2004;
    pub const BOOLEAN: i32 = 16;
    pub const CHAR: i32 = 1;
    pub const CLOB: i32 = 2005;
    pub const DATE: i32 = 91;
    pub const DECIMAL: i32 = 3;
    pub const DOUBLE: i32 = 8;
    pub const FLOAT: i32 = 6;
    pub const INTEGER: i32 = 4;
    pub const LONGVARBINARY: i32 = -4;
    pub const LONGVARCHAR: i32 = -1;
    pub const NCHAR: i32 = -15;
    pub const NULL: i32 = 0;
    pub const NUMERIC: i32 = 2;
    pub const NVARCHAR: i32 = -9;
    pub const OTHER: i32 = 1111;
    pub const REAL: i32 = 7;
    pub const SMALLINT: i32 = 5;
    pub const TIME: i32 = 92;
    pub const TIMESTAMP: i32 = 93;
    pub const TINYINT: i32 = -6;
    pub const VARBINARY: i32 = -3;
    pub const VARCHAR: i32 = 12;
}

/// Built-in `NAME:CODE:NATIVE` entries.
const BUILTIN_TYPES: &[(&str, i32, &str)] = &[
    ("ARRAY", sql_type::ARRAY, "Vec<String>"),
    ("BIGINT", sql_type::BIGINT, "i64"),
    ("BINARY", sql_type::BINARY, "Vec<u8>"),
    ("BIT", sql_type::BIT, "bool"),
    ("BLOB", sql_type::BLOB, "Vec<u8>"),
    ("BOOLEAN", sql_type::BOOLEAN, "bool"),
    ("CHAR", sql_type::CHAR, "String"),
    ("CLOB", sql_type::CLOB, "String"),
    ("DATE", sql_type::DATE, "chrono::NaiveDate"),
    ("DECIMAL", sql_type::DECIMAL, "rust_decimal::Decimal"),
    ("DOUBLE", sql_type::DOUBLE, "f64"),
    ("FLOAT", sql_type::FLOAT, "f64"),
    ("INT", sql_type::INTEGER, "i32"),
    ("INTEGER", sql_type::INTEGER, "i32"),
    ("LONGVARBINARY", sql_type::LONGVARBINARY, "Vec<u8>"),
    ("LONGVARCHAR", sql_type::LONGVARCHAR, "String"),
    ("NCHAR", sql_type::NCHAR, "String"),
    ("NULL", sql_type::NULL, "()"),
    ("NUMBER", sql_type::NUMERIC, "rust_decimal::Decimal"),
    ("NUMERIC", sql_type::NUMERIC, "rust_decimal::Decimal"),
    ("NVARCHAR", sql_type::NVARCHAR, "String"),
    ("OTHER", sql_type::OTHER, "Vec<u8>"),
    ("REAL", sql_type::REAL, "f32"),
    ("SMALLINT", sql_type::SMALLINT, "i16"),
    ("TEXT", sql_type::LONGVARCHAR, "String"),
    ("TIME", sql_type::TIME, "chrono::NaiveTime"),
    ("TIMESTAMP", sql_type::TIMESTAMP, "chrono::NaiveDateTime"),
    ("TINYINT", sql_type::TINYINT, "i8"),
    ("VARBINARY", sql_type::VARBINARY, "Vec<u8>"),
    ("VARCHAR", sql_type::VARCHAR, "String"),
    ("VARCHAR2", sql_type::VARCHAR, "String"),
];

/// A resolved SQL type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlTypeInfo {
    /// Normalized type name (e.g. `VARCHAR`).
    pub name: String,
    /// Numeric type code.
    pub code: i32,
    /// Rust type a value of this type binds as.
    pub native_type: String,
}

/// Maps SQL type names to type codes and native type names.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    by_name: HashMap<String, SqlTypeInfo>,
    native_by_code: HashMap<i32, String>,
}

impl TypeRegistry {
    /// Creates a registry holding only the built-in types.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            by_name: HashMap::new(),
            native_by_code: HashMap::new(),
        };
        for (name, code, native) in BUILTIN_TYPES {
            registry.register(name, *code, native);
        }
        registry
    }

    /// Creates a registry from the built-in types plus `NAME:CODE:NATIVE`
    /// mapping lines.
    pub fn with_mappings<S: AsRef<str>>(mappings: &[S]) -> Result<Self> {
        let mut registry = Self::new();
        for mapping in mappings {
            registry.register_mapping(mapping.as_ref())?;
        }
        Ok(registry)
    }

    /// Registers (or replaces) a type.
    ///
    /// The first native type registered for a code becomes the default
    /// native type of that code.
    pub fn register(&mut self, name: &str, code: i32, native_type: &str) {
        let name = normalize_type_name(name);
        self.native_by_code
            .entry(code)
            .or_insert_with(|| native_type.to_string());
        self.by_name.insert(
            name.clone(),
            SqlTypeInfo {
                name,
                code,
                native_type: native_type.to_string(),
            },
        );
    }

    /// Parses and registers a `NAME:CODE:NATIVE` line.
    pub fn register_mapping(&mut self, mapping: &str) -> Result<()> {
        let invalid = || AnalyzeError::InvalidTypeMapping(mapping.to_string());
        let mut items = mapping.splitn(3, ':').map(str::trim);
        let (Some(name), Some(code), Some(native)) = (items.next(), items.next(), items.next())
        else {
            return Err(invalid());
        };
        if name.is_empty() || native.is_empty() {
            return Err(invalid());
        }
        let code: i32 = code.parse().map_err(|_| invalid())?;
        self.register(name, code, native);
        Ok(())
    }

    /// Looks up a type by declared name.
    ///
    /// Matching is case-insensitive and ignores everything after the first
    /// space or parenthesis, so `varchar(255)` and `DOUBLE PRECISION` resolve.
    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<&SqlTypeInfo> {
        self.by_name.get(&normalize_type_name(type_name))
    }

    /// Returns the type code for a declared name, or
    /// [`sql_type::UNKNOWN`] with a warning.
    #[must_use]
    pub fn code_for(&self, type_name: &str) -> i32 {
        match self.get(type_name) {
            Some(info) => info.code,
            None => {
                warn!(type_name, "No SQL data type registered for type name");
                sql_type::UNKNOWN
            }
        }
    }

    /// Returns the default native type for a type code.
    #[must_use]
    pub fn native_for_code(&self, code: i32) -> Option<&str> {
        self.native_by_code.get(&code).map(String::as_str)
    }

    /// Returns the number of registered type names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns true if no type is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_type_name(type_name: &str) -> String {
    let trimmed = type_name.trim();
    let end = trimmed
        .find(|c: char| c.is_whitespace() || c == '(')
        .unwrap_or(trimmed.len());
    trimmed[..end].to_uppercase()
}
