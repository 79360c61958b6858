//! Heuristic SQL tokenization.
//!
//! This is not a SQL grammar: statements are split on a fixed
//! set of delimiter characters and table aliases are rewritten textually, so
//! the parameter extractor can scan a flat token list. Replacing this module
//! with a real parser would not change the binding rules in
//! [`crate::parser`].

mod alias;
mod placeholder;
mod tokenizer;

pub use alias::{replace_words, resolve_aliases};
pub use placeholder::{Placeholder, has_placeholder, is_placeholder};
pub use tokenizer::{GENERAL_DELIMITERS, INSERT_DELIMITERS, TokenStream, split};
pub(crate) use tokenizer::trim_terminator;
