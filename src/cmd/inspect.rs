//! Inspect command implementation.

use super::output::write_output;
use anyhow::{Context, Result};
use modelscribe::model::InspectOutput;
use std::path::PathBuf;

/// Run the inspect command
pub fn run(
    registry: PathBuf,
    apps: Option<String>,
    exclude: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let (_, models) = super::collect_models(&registry, apps.as_deref(), exclude.as_deref())?;

    let report = InspectOutput::from_models(models);
    let mut json = report.to_json().context("serializing inspect output")?;
    json.push('\n');
    write_output(output.as_deref(), &json)?;

    if let Some(ref out_path) = output {
        eprintln!("Inspect output written to: {}", out_path.display());
    }

    Ok(())
}
