//! Loading configuration and schema files.

use std::fs;
use std::path::Path;

use anyhow::Context;
use sqlbind_core::{AnalyzerConfig, SchemaDefinition};

/// Reads an [`AnalyzerConfig`] from a JSON file, or the defaults when no
/// file is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AnalyzerConfig> {
    let Some(path) = path else {
        return Ok(AnalyzerConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

/// Reads table definitions from a JSON schema file.
pub fn load_schema(path: &Path) -> anyhow::Result<SchemaDefinition> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file '{}'", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse schema file '{}'", path.display()))
}
