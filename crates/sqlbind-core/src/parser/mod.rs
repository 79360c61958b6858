//! Placeholder extraction.
//!
//! Two strategies are used. A single-row `INSERT ... VALUES` pairs columns
//! and values positionally. Everything else is normalized by the alias
//! resolver, then every placeholder is bound to the column that governs it
//! and to the table that column belongs to.

mod governing;
mod insert;
mod table;

use tracing::{debug, warn};

use crate::error::Result;
use crate::lexer::{
    GENERAL_DELIMITERS, Placeholder, TokenStream, has_placeholder, is_placeholder,
    resolve_aliases, split, trim_terminator,
};
use crate::model::{Parameter, Statement};
use crate::schema::{SchemaCache, SchemaLookup};
use crate::types::TypeRegistry;

use governing::{Governing, governing};

/// Finds the placeholders of a statement and what they bind to.
#[derive(Debug)]
pub struct ParameterExtractor<'a, L> {
    schema: &'a SchemaCache<L>,
    types: &'a TypeRegistry,
}

impl<'a, L: SchemaLookup> ParameterExtractor<'a, L> {
    /// Creates an extractor reading tables through `schema` and inline type
    /// hints through `types`.
    pub const fn new(schema: &'a SchemaCache<L>, types: &'a TypeRegistry) -> Self {
        Self { schema, types }
    }

    /// Appends one [`Parameter`] per placeholder to `statement`.
    ///
    /// Structural problems are errors and leave `statement` unchanged.
    /// Placeholders whose column or table cannot be found are kept with
    /// those fields unset.
    pub fn extract(&self, statement: &mut Statement) -> Result<()> {
        let sql = trim_terminator(statement.sql());
        if !has_placeholder(sql) {
            debug!("Statement has no placeholders");
            return Ok(());
        }

        let parameters = if statement.is_plain_insert() {
            insert::extract(sql, self.types)?
        } else {
            self.extract_general(sql)
        };
        for parameter in parameters {
            statement.push_parameter(parameter);
        }
        Ok(())
    }

    fn extract_general(&self, sql: &str) -> Vec<Parameter> {
        let normalized = resolve_aliases(sql).to_uppercase();
        let stream = TokenStream::new(&normalized, GENERAL_DELIMITERS);
        let written: Vec<String> = split(sql, GENERAL_DELIMITERS)
            .into_iter()
            .filter(|token| is_placeholder(token))
            .collect();

        let mut parameters = Vec::new();
        for (ordinal, pos) in stream.placeholder_positions().enumerate() {
            let index = ordinal + 1;
            let token = written
                .get(ordinal)
                .map_or_else(|| stream.get(pos).unwrap_or("?"), String::as_str);
            let Some(placeholder) = Placeholder::parse(token) else {
                continue;
            };
            let mut parameter = Parameter::new(index, placeholder.name_or_index(index));
            self.infer(&mut parameter, &placeholder, &stream, pos);
            parameters.push(parameter);
        }
        parameters
    }

    fn infer(
        &self,
        parameter: &mut Parameter,
        placeholder: &Placeholder<'_>,
        stream: &TokenStream,
        pos: usize,
    ) {
        if let Some(hint) = placeholder.type_hint {
            parameter.apply_type_hint(hint, self.types);
            return;
        }
        // Aliases are only rewritten in the normalized stream.
        let normalized = stream.get(pos).and_then(Placeholder::parse);
        if let Some((table, column)) = normalized.as_ref().and_then(Placeholder::qualified) {
            parameter.bind(Some(table.to_uppercase()), column.to_uppercase());
            return;
        }

        match governing(stream, pos) {
            Governing::Count => parameter.mark_used_by_count(),
            Governing::Unresolved => {
                warn!(
                    index = parameter.index(),
                    "Failed to detect the column of a placeholder, \
                     use an inline type hint if the driver cannot describe parameters"
                );
            }
            Governing::Column(token) => match token.rsplit_once('.') {
                Some((table, column)) => {
                    parameter.bind(Some(table.to_string()), column.to_string());
                }
                None => {
                    let table = table::resolve_table(stream, pos, token, self.schema);
                    if table.is_none() {
                        warn!(
                            index = parameter.index(),
                            column = token,
                            "Failed to detect the table of a placeholder column"
                        );
                    }
                    parameter.bind(table, token.to_string());
                }
            },
        }
    }
}
