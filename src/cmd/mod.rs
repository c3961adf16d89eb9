mod dictionary;
mod erd;
mod inspect;
mod output;
mod schema;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use modelscribe::model::{AppSelection, Collector, ModelDescriptor};
use modelscribe::registry::Registry;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(name = "modelscribe")]
#[command(version)]
#[command(
    about = "Generate ERD source and Markdown data dictionaries from a model registry",
    long_about = None
)]
pub struct Cli {
    /// Enable debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate ERD source in Mermaid, PlantUML or dbdiagram syntax
    Erd {
        /// Registry document exported from the framework (.yaml, .yml or .json)
        #[arg(short, long, default_value = "models.yaml")]
        registry: PathBuf,

        /// Only include specific apps (comma-separated, default: all)
        #[arg(short, long)]
        apps: Option<String>,

        /// Diagram dialect: mermaid, plantuml, or dbdiagram
        #[arg(short, long, default_value = "mermaid")]
        dialect: String,

        /// Exclude models matching glob patterns (comma-separated, `Model` or `app.Model`)
        #[arg(short, long)]
        exclude: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a Markdown data dictionary
    Dictionary {
        /// Registry document exported from the framework (.yaml, .yml or .json)
        #[arg(short, long, default_value = "models.yaml")]
        registry: PathBuf,

        /// Only include specific apps (comma-separated, default: all)
        #[arg(short, long)]
        apps: Option<String>,

        /// Exclude models matching glob patterns (comma-separated, `Model` or `app.Model`)
        #[arg(short, long)]
        exclude: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Title of the document (default: registry `project`, then file name)
        #[arg(long)]
        project_name: Option<String>,

        /// Version shown under the title (default: current git commit)
        #[arg(long)]
        version_tag: Option<String>,
    },

    /// Print collected models and relations as JSON
    Inspect {
        /// Registry document exported from the framework (.yaml, .yml or .json)
        #[arg(short, long, default_value = "models.yaml")]
        registry: PathBuf,

        /// Only include specific apps (comma-separated, default: all)
        #[arg(short, long)]
        apps: Option<String>,

        /// Exclude models matching glob patterns (comma-separated, `Model` or `app.Model`)
        #[arg(short, long)]
        exclude: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print JSON Schemas for the registry document and inspect output
    Schema {
        /// Only print one schema: registry or inspect
        name: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Erd {
            registry,
            apps,
            dialect,
            exclude,
            output,
        } => erd::run(registry, apps, dialect, exclude, output),
        Commands::Dictionary {
            registry,
            apps,
            exclude,
            output,
            project_name,
            version_tag,
        } => dictionary::run(registry, apps, exclude, output, project_name, version_tag),
        Commands::Inspect {
            registry,
            apps,
            exclude,
            output,
        } => inspect::run(registry, apps, exclude, output),
        Commands::Schema { name, output } => schema::run(name, output),
        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "modelscribe",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}

/// Split a comma-separated flag value into trimmed, non-empty items
fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Load the registry and collect the selected models
fn collect_models(
    registry_path: &Path,
    apps: Option<&str>,
    exclude: Option<&str>,
) -> anyhow::Result<(Registry, Vec<ModelDescriptor>)> {
    let registry = Registry::load(registry_path)?;
    let selection = AppSelection::parse(apps);
    debug!(registry = %registry_path.display(), ?selection, "loading models");

    let models = Collector::new(&registry)
        .with_exclude(&split_list(exclude))?
        .collect(&selection)
        .with_context(|| format!("collecting models from {}", registry_path.display()))?;

    Ok((registry, models))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert!(split_list(None).is_empty());
        assert_eq!(split_list(Some("a, b,,c ")), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_erd_defaults() {
        let cli = Cli::try_parse_from(["modelscribe", "erd"]).unwrap();
        match cli.command {
            Commands::Erd {
                registry,
                dialect,
                apps,
                ..
            } => {
                assert_eq!(registry, PathBuf::from("models.yaml"));
                assert_eq!(dialect, "mermaid");
                assert!(apps.is_none());
            }
            _ => panic!("expected erd command"),
        }
    }
}
