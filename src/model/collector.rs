//! Model collection from a registry.

use super::kinds::{lookup_kind, KindClass, StorageType};
use super::{Cardinality, FieldDescriptor, ModelDescriptor, RelationTarget};
use crate::error::{Error, Result};
use crate::registry::{AppEntry, FieldEntry, ModelEntry, Registry};
use ahash::AHashSet;
use glob::Pattern;
use tracing::debug;

/// Primary keys can themselves be one-to-one references to a parent model;
/// chains longer than this are treated as cycles.
const MAX_PK_CHAIN: usize = 16;

/// Which applications to collect
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppSelection {
    #[default]
    All,
    Only(Vec<String>),
}

impl AppSelection {
    /// Parse a comma-separated `--apps` value; empty or missing means all
    pub fn parse(apps: Option<&str>) -> Self {
        let labels: Vec<String> = apps
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if labels.is_empty() {
            AppSelection::All
        } else {
            AppSelection::Only(labels)
        }
    }
}

/// Walks a registry and produces model descriptors
pub struct Collector<'a> {
    registry: &'a Registry,
    exclude: Vec<Pattern>,
}

impl<'a> Collector<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            exclude: Vec::new(),
        }
    }

    /// Drop models whose `Name` or `app.Name` matches any of the glob patterns
    pub fn with_exclude(mut self, patterns: &[String]) -> Result<Self> {
        for pattern in patterns {
            let compiled = Pattern::new(pattern).map_err(|e| Error::InvalidPattern {
                pattern: pattern.clone(),
                details: e.to_string(),
            })?;
            self.exclude.push(compiled);
        }
        Ok(self)
    }

    /// Collect models for the selected apps.
    ///
    /// Apps and models come out in registry declaration order regardless of
    /// the order labels were requested in.
    pub fn collect(&self, selection: &AppSelection) -> Result<Vec<ModelDescriptor>> {
        let selected = self.resolve_selection(selection)?;
        let mut models = Vec::new();
        let mut seen = AHashSet::new();

        for app in self
            .registry
            .apps
            .iter()
            .filter(|a| selected.contains(a.label.as_str()))
        {
            debug!(app = %app.label, models = app.models.len(), "collecting app");

            for model in &app.models {
                if !seen.insert((app.label.as_str(), model.name.as_str())) {
                    return Err(Error::DuplicateModel {
                        app: app.label.clone(),
                        model: model.name.clone(),
                    });
                }

                let descriptor = self.collect_model(app, model)?;
                if self.is_excluded(&descriptor) {
                    debug!(model = %descriptor.qualified_name(), "excluded by pattern");
                    continue;
                }
                models.push(descriptor);
            }
        }

        debug!(count = models.len(), "collection finished");
        Ok(models)
    }

    fn resolve_selection(&self, selection: &AppSelection) -> Result<AHashSet<&'a str>> {
        match selection {
            AppSelection::All => Ok(self
                .registry
                .apps
                .iter()
                .map(|a| a.label.as_str())
                .collect()),
            AppSelection::Only(labels) => labels
                .iter()
                .map(|label| {
                    self.registry
                        .app(label)
                        .map(|a| a.label.as_str())
                        .ok_or_else(|| Error::UnknownApp {
                            label: label.clone(),
                            known: self.registry.app_labels(),
                        })
                })
                .collect(),
        }
    }

    fn is_excluded(&self, model: &ModelDescriptor) -> bool {
        let qualified = model.qualified_name();
        self.exclude
            .iter()
            .any(|p| p.matches(&model.name) || p.matches(&qualified))
    }

    fn collect_model(&self, app: &'a AppEntry, model: &ModelEntry) -> Result<ModelDescriptor> {
        let mut fields = Vec::with_capacity(model.fields.len() + 1);

        if !model.fields.iter().any(|f| f.primary_key) {
            fields.push(self.implicit_pk(app, model)?);
        }

        for field in &model.fields {
            fields.push(self.collect_field(app, model, field)?);
        }

        Ok(ModelDescriptor {
            app: app.label.clone(),
            name: model.name.clone(),
            doc: model
                .doc
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            fields,
        })
    }

    fn implicit_pk(&self, app: &AppEntry, model: &ModelEntry) -> Result<FieldDescriptor> {
        let kind = self.registry.auto_field_for(app);
        let storage = match lookup_kind(kind) {
            Some(KindClass::Scalar(storage)) => storage,
            _ => {
                return Err(Error::UnsupportedFieldType {
                    app: app.label.clone(),
                    model: model.name.clone(),
                    field: "id".to_string(),
                    kind: kind.to_string(),
                })
            }
        };

        Ok(FieldDescriptor {
            name: "id".to_string(),
            column: "id".to_string(),
            kind: kind.to_string(),
            storage,
            primary_key: true,
            nullable: false,
            unique: true,
            has_choices: false,
            db_index: false,
            max_length: None,
            help_text: None,
            default: None,
            relation: None,
            implicit: true,
        })
    }

    fn collect_field(
        &self,
        app: &'a AppEntry,
        model: &ModelEntry,
        field: &FieldEntry,
    ) -> Result<FieldDescriptor> {
        let class = lookup_kind(&field.kind).ok_or_else(|| Error::UnsupportedFieldType {
            app: app.label.clone(),
            model: model.name.clone(),
            field: field.name.clone(),
            kind: field.kind.clone(),
        })?;

        let (storage, relation) = match class {
            KindClass::Scalar(storage) => (storage, None),
            KindClass::Relation(cardinality) => {
                let (target_app, target_model) = self.resolve_target(app, model, field)?;
                let (pk_column, pk_storage) = self.target_pk(target_app, target_model, 0)?;
                (
                    pk_storage,
                    Some(RelationTarget {
                        app: target_app.label.clone(),
                        model: target_model.name.clone(),
                        pk_column,
                        cardinality,
                    }),
                )
            }
        };

        let cardinality = relation.as_ref().map(|r| r.cardinality);
        let column = field
            .db_column
            .clone()
            .unwrap_or_else(|| match cardinality {
                Some(Cardinality::ManyToOne) | Some(Cardinality::OneToOne) => {
                    format!("{}_id", field.name)
                }
                _ => field.name.clone(),
            });
        let single_ref = matches!(
            cardinality,
            Some(Cardinality::ManyToOne) | Some(Cardinality::OneToOne)
        );

        Ok(FieldDescriptor {
            name: field.name.clone(),
            column,
            kind: field.kind.clone(),
            storage,
            primary_key: field.primary_key,
            nullable: field.null,
            unique: field.unique
                || field.primary_key
                || cardinality == Some(Cardinality::OneToOne),
            has_choices: field.has_choices(),
            db_index: field.db_index.unwrap_or(single_ref),
            max_length: field.max_length,
            help_text: field
                .help_text
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            default: field.default.as_ref().map(render_default),
            relation,
            implicit: false,
        })
    }

    /// Resolve a `to` reference: `self`, `app.Model`, or a bare `Model` that is
    /// looked up in the declaring app first and then in the only other app
    /// declaring it.
    fn resolve_target(
        &self,
        app: &'a AppEntry,
        model: &ModelEntry,
        field: &FieldEntry,
    ) -> Result<(&'a AppEntry, &'a ModelEntry)> {
        let target = field
            .to
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::MissingRelationTarget {
                app: app.label.clone(),
                model: model.name.clone(),
                field: field.name.clone(),
                kind: field.kind.clone(),
            })?;

        let dangling = || Error::DanglingRelation {
            app: app.label.clone(),
            model: model.name.clone(),
            field: field.name.clone(),
            target: target.to_string(),
        };

        let (target_app, target_name) = if target == "self" {
            (app.label.as_str(), model.name.as_str())
        } else if let Some((label, name)) = target.rsplit_once('.') {
            (label, name)
        } else if self.registry.model(&app.label, target).is_some() {
            (app.label.as_str(), target)
        } else {
            match self.registry.apps_declaring(target).as_slice() {
                [only] => (*only, target),
                _ => return Err(dangling()),
            }
        };

        let entry = self.registry.app(target_app).ok_or_else(dangling)?;
        let model = entry
            .models
            .iter()
            .find(|m| m.name == target_name)
            .ok_or_else(dangling)?;
        Ok((entry, model))
    }

    /// Column and storage type of a target model's primary key
    fn target_pk(
        &self,
        app: &'a AppEntry,
        model: &'a ModelEntry,
        depth: usize,
    ) -> Result<(String, StorageType)> {
        let Some(pk) = model.fields.iter().find(|f| f.primary_key) else {
            let auto = self.implicit_pk(app, model)?;
            return Ok((auto.column, auto.storage));
        };

        let unsupported = || Error::UnsupportedFieldType {
            app: app.label.clone(),
            model: model.name.clone(),
            field: pk.name.clone(),
            kind: pk.kind.clone(),
        };

        match lookup_kind(&pk.kind).ok_or_else(unsupported)? {
            KindClass::Scalar(storage) => Ok((
                pk.db_column.clone().unwrap_or_else(|| pk.name.clone()),
                storage,
            )),
            KindClass::Relation(Cardinality::ManyToMany) => Err(unsupported()),
            KindClass::Relation(_) => {
                if depth >= MAX_PK_CHAIN {
                    return Err(unsupported());
                }
                let (parent_app, parent) = self.resolve_target(app, model, pk)?;
                let (_, storage) = self.target_pk(parent_app, parent, depth + 1)?;
                let column = pk
                    .db_column
                    .clone()
                    .unwrap_or_else(|| format!("{}_id", pk.name));
                Ok((column, storage))
            }
        }
    }
}

/// Render a declared default as display text
fn render_default(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
