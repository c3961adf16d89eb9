//! Schema command implementation.

use super::output::write_output;
use anyhow::{bail, Context, Result};
use modelscribe::json_schema::{all_schemas, get_schema, schema_names};
use std::path::PathBuf;

/// Run the schema command
pub fn run(name: Option<String>, output: Option<PathBuf>) -> Result<()> {
    let mut json = match name {
        Some(name) => {
            let Some(schema) = get_schema(&name) else {
                bail!(
                    "unknown schema '{}'. Valid options: {}",
                    name,
                    schema_names().join(", ")
                );
            };
            serde_json::to_string_pretty(&schema)
        }
        None => serde_json::to_string_pretty(&all_schemas()),
    }
    .context("serializing JSON schema")?;
    json.push('\n');

    write_output(output.as_deref(), &json)?;
    Ok(())
}
