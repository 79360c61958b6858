//! Statement and parameter model.
//!
//! The extractor and the metadata loader write into these types; the query
//! layer reads them to bind values positionally.

mod parameter;
mod statement;

pub use parameter::Parameter;
pub use statement::{Statement, StatementKind};
