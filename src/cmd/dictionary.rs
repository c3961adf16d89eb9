//! Dictionary command implementation.

use super::output::write_output;
use anyhow::Result;
use modelscribe::dictionary;
use modelscribe::registry::Registry;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

const UNVERSIONED: &str = "unversioned";

/// Run the dictionary command
pub fn run(
    registry_path: PathBuf,
    apps: Option<String>,
    exclude: Option<String>,
    output: Option<PathBuf>,
    project_name: Option<String>,
    version_tag: Option<String>,
) -> Result<()> {
    eprintln!("Generating data dictionary: {}", registry_path.display());

    let (registry, models) =
        super::collect_models(&registry_path, apps.as_deref(), exclude.as_deref())?;

    let project_name = resolve_project_name(project_name, &registry, &registry_path);
    let version_tag = version_tag.unwrap_or_else(|| git_commit(&registry_path));

    let content = dictionary::render(&models, &project_name, &version_tag);
    write_output(output.as_deref(), &content)?;

    if let Some(ref out_path) = output {
        eprintln!("Data dictionary written to: {}", out_path.display());
    }

    let field_count: usize = models.iter().map(|m| m.fields.len()).sum();
    eprintln!(
        "Data dictionary: {} models, {} fields",
        models.len(),
        field_count
    );

    Ok(())
}

/// Explicit name, then the registry `project` key, then the registry file stem
fn resolve_project_name(explicit: Option<String>, registry: &Registry, path: &Path) -> String {
    explicit
        .or_else(|| registry.project.clone())
        .or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "Project".to_string())
}

/// Current commit of the repository holding the registry document
fn git_commit(registry_path: &Path) -> String {
    let dir = match registry_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let result = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(dir)
        .output();

    match result {
        Ok(out) if out.status.success() => {
            let commit = String::from_utf8_lossy(&out.stdout).trim().to_string();
            debug!(%commit, "resolved version tag from git");
            if commit.is_empty() {
                UNVERSIONED.to_string()
            } else {
                commit
            }
        }
        Ok(out) => {
            warn!(
                status = %out.status,
                "git rev-parse failed, using '{}' as version tag",
                UNVERSIONED
            );
            UNVERSIONED.to_string()
        }
        Err(e) => {
            warn!(error = %e, "git not available, using '{}' as version tag", UNVERSIONED);
            UNVERSIONED.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_name_precedence() {
        let mut registry = Registry::default();
        let path = Path::new("docs/shop.yaml");

        assert_eq!(resolve_project_name(None, &registry, path), "shop");

        registry.project = Some("Storefront".to_string());
        assert_eq!(resolve_project_name(None, &registry, path), "Storefront");
        assert_eq!(
            resolve_project_name(Some("Explicit".to_string()), &registry, path),
            "Explicit"
        );
    }

    #[test]
    fn test_git_commit_outside_repository() {
        let dir = tempfile::TempDir::new().unwrap();
        let commit = git_commit(&dir.path().join("models.yaml"));
        assert!(!commit.is_empty());
    }
}
