//! Error types for statement analysis.

/// Structural errors that abort the analysis of a statement.
///
/// Inference problems (a placeholder whose column cannot be found, a join
/// table that cannot be resolved) are not errors: they are logged and leave
/// the affected parameter untyped.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    /// An INSERT statement is too short or lacks a `VALUES` clause.
    #[error("Cannot parse INSERT statement: [{0}]")]
    MalformedInsert(String),

    /// An INSERT statement without an explicit column list.
    #[error("INSERT statements without a column list are not supported: [{0}]")]
    InsertWithoutColumns(String),

    /// The column list and the value list of an INSERT differ in length.
    #[error("The number of columns ({columns}) does not match the number of values ({values}) in: [{sql}]")]
    ColumnValueMismatch {
        /// Number of columns listed.
        columns: usize,
        /// Number of values listed.
        values: usize,
        /// The statement text.
        sql: String,
    },

    /// The driver and the extractor disagree on the number of parameters.
    #[error("Parameter metadata size is {facility} while statement parameters size is {statement}")]
    ParameterCountMismatch {
        /// Count reported by the driver facility.
        facility: usize,
        /// Count found by the extractor.
        statement: usize,
    },

    /// A configured type mapping could not be parsed.
    #[error("Invalid SQL type mapping '{0}', expected NAME:CODE:NATIVE_TYPE")]
    InvalidTypeMapping(String),

    /// A schema collaborator failed to describe a table.
    #[error("Schema lookup failed for table '{table}': {message}")]
    Lookup {
        /// The table being looked up.
        table: String,
        /// Error message from the collaborator.
        message: String,
    },
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalyzeError>;
