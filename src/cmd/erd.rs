//! Erd command implementation.

use super::output::write_output;
use anyhow::Result;
use modelscribe::erd::{self, Dialect, ErdView};
use std::path::PathBuf;

/// Run the erd command
pub fn run(
    registry: PathBuf,
    apps: Option<String>,
    dialect: String,
    exclude: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    // Reject a bad dialect before touching the registry
    let dialect: Dialect = dialect.parse()?;

    eprintln!(
        "Generating ERD: {} [dialect: {}]",
        registry.display(),
        dialect
    );

    let (_, models) = super::collect_models(&registry, apps.as_deref(), exclude.as_deref())?;

    if models.is_empty() {
        eprintln!("No models found for the selected apps.");
    }

    let view = ErdView::from_models(&models);
    let content = erd::render_view(&view, dialect);
    write_output(output.as_deref(), &content)?;

    if let Some(ref out_path) = output {
        eprintln!("ERD written to: {}", out_path.display());
    }

    eprintln!(
        "ERD: {} entities, {} columns, {} relationships",
        view.entity_count(),
        view.column_count(),
        view.edge_count()
    );

    Ok(())
}
