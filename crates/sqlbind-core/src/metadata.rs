//! Overlaying driver-reported parameter metadata.

use tracing::debug;

use crate::error::{AnalyzeError, Result};
use crate::model::Statement;

/// Parameter descriptions reported by a database driver for a prepared
/// statement. Indexes are 1-based.
pub trait ParameterMetadata {
    /// Number of parameters, or `None` when the driver cannot describe
    /// parameters at all.
    fn parameter_count(&self) -> Option<usize>;

    /// Rust type a value for parameter `index` binds as.
    fn native_type_name(&self, index: usize) -> String;

    /// SQL type code of parameter `index`.
    fn type_code(&self, index: usize) -> i32;

    /// SQL type name of parameter `index`.
    fn type_name(&self, index: usize) -> String;
}

/// Copies driver metadata onto the parameters of `statement`.
///
/// Returns `Ok(false)` when the driver cannot describe parameters, leaving
/// the statement untouched. Driver types replace inferred ones, except on
/// parameters carrying an inline type hint. A second call after success
/// returns `Ok(true)` without reading `metadata` again.
///
/// # Errors
///
/// [`AnalyzeError::ParameterCountMismatch`] when the driver and the
/// statement disagree on the number of parameters. The statement is left
/// unchanged.
pub fn load_parameter_metadata(
    statement: &mut Statement,
    metadata: &dyn ParameterMetadata,
) -> Result<bool> {
    if statement.has_loaded_parameter_metadata() {
        return Ok(true);
    }
    let Some(count) = metadata.parameter_count() else {
        debug!(sql = statement.sql(), "Driver cannot describe parameters");
        return Ok(false);
    };
    if count != statement.parameter_count() {
        return Err(AnalyzeError::ParameterCountMismatch {
            facility: count,
            statement: statement.parameter_count(),
        });
    }

    for parameter in statement.parameters_mut() {
        if parameter.type_hint().is_some() {
            continue;
        }
        let index = parameter.index();
        parameter.set_type(
            metadata.type_code(index),
            &metadata.type_name(index),
            &metadata.native_type_name(index),
        );
    }
    statement.set_metadata_loaded();
    Ok(true)
}
