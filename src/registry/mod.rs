//! Registry document exported from the host framework.
//!
//! The registry is read-only input: applications in declaration order, each
//! holding its models in declaration order, each holding its fields with the
//! framework's field-kind tag and options. Both YAML and JSON are accepted.

use crate::error::{Error, Result};
use ahash::AHashSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Kind used for the implicit primary key when nothing else is configured
pub const DEFAULT_AUTO_FIELD: &str = "AutoField";

/// Root of a registry document
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Registry {
    /// Project name used as the data dictionary title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Field kind of the implicit `id` primary key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_auto_field: Option<String>,
    /// Applications in declaration order
    #[serde(default)]
    pub apps: Vec<AppEntry>,
}

/// One application and its models
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AppEntry {
    /// Application label (e.g. `sales`)
    pub label: String,
    /// Overrides the registry-wide `default_auto_field` for this app
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_auto_field: Option<String>,
    /// Models in declaration order
    #[serde(default)]
    pub models: Vec<ModelEntry>,
}

/// One declared model
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ModelEntry {
    pub name: String,
    /// Model docstring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
}

/// One declared field with the options the framework exposes
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FieldEntry {
    pub name: String,
    /// Framework field kind, e.g. `CharField` or `ForeignKey`
    pub kind: String,
    #[serde(default)]
    pub primary_key: bool,
    /// Column allows NULL
    #[serde(default)]
    pub null: bool,
    #[serde(default)]
    pub unique: bool,
    /// Explicit index flag; relations default to indexed when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_index: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    /// Allowed values, either plain values or `[value, label]` pairs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<serde_json::Value>,
    /// Relation target: `Model`, `app.Model` or `self`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Overrides the storage column name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_column: Option<String>,
}

/// Document encoding, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryFormat {
    Yaml,
    Json,
}

impl RegistryFormat {
    /// Detect format from a path; anything that is not `.json` is read as YAML
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("json") => RegistryFormat::Json,
            _ => RegistryFormat::Yaml,
        }
    }
}

impl Registry {
    /// Load a registry document from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::Registry {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        Self::parse(&content, RegistryFormat::from_path(path)).map_err(|e| match e {
            Error::Registry { details, .. } => Error::Registry {
                path: path.to_path_buf(),
                details,
            },
            other => other,
        })
    }

    /// Parse a registry document from a string
    pub fn parse(content: &str, format: RegistryFormat) -> Result<Self> {
        let parsed = match format {
            RegistryFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            RegistryFormat::Yaml => serde_yaml_ng::from_str(content).map_err(|e| e.to_string()),
        };
        let registry: Self = parsed.map_err(|details| Error::Registry {
            path: Default::default(),
            details,
        })?;
        registry.check_labels()?;
        Ok(registry)
    }

    /// Application labels must be unique; lookups by label pick one entry
    fn check_labels(&self) -> Result<()> {
        let mut seen = AHashSet::new();
        for app in &self.apps {
            if !seen.insert(app.label.as_str()) {
                return Err(Error::DuplicateApp {
                    label: app.label.clone(),
                });
            }
        }
        Ok(())
    }

    /// Find an application by label
    pub fn app(&self, label: &str) -> Option<&AppEntry> {
        self.apps.iter().find(|a| a.label == label)
    }

    /// All application labels in declaration order
    pub fn app_labels(&self) -> Vec<String> {
        self.apps.iter().map(|a| a.label.clone()).collect()
    }

    /// Find a model by application label and model name
    pub fn model(&self, app: &str, name: &str) -> Option<&ModelEntry> {
        self.app(app)?.models.iter().find(|m| m.name == name)
    }

    /// Apps that declare a model with the given name
    pub fn apps_declaring(&self, name: &str) -> Vec<&str> {
        self.apps
            .iter()
            .filter(|a| a.models.iter().any(|m| m.name == name))
            .map(|a| a.label.as_str())
            .collect()
    }

    /// Field kind for the implicit primary key of models in `app`
    pub fn auto_field_for<'r>(&'r self, app: &'r AppEntry) -> &'r str {
        app.default_auto_field
            .as_deref()
            .or(self.default_auto_field.as_deref())
            .unwrap_or(DEFAULT_AUTO_FIELD)
    }
}

impl FieldEntry {
    /// Whether any choices were declared
    pub fn has_choices(&self) -> bool {
        !self.choices.is_empty()
    }
}
