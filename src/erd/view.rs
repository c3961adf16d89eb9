//! Entity/edge view of collected models for ERD rendering.

use crate::model::{self, Cardinality, EntityNames, ModelDescriptor, StorageType};
use ahash::{AHashMap, AHashSet};

/// Information about a column in an entity
#[derive(Debug, Clone)]
pub struct ColumnInfo {
    /// Storage column name
    pub name: String,
    pub storage: StorageType,
    pub is_primary_key: bool,
    /// Single-target or one-to-one reference column
    pub is_foreign_key: bool,
    pub is_nullable: bool,
}

/// Information about an entity (one model) for ERD rendering
#[derive(Debug, Clone)]
pub struct EntityInfo {
    /// Entity name, app-qualified when shared across apps
    pub name: String,
    /// All columns in declaration order
    pub columns: Vec<ColumnInfo>,
}

/// Information about a relationship line
#[derive(Debug, Clone)]
pub struct EdgeInfo {
    /// Entity declaring the relational field
    pub from_entity: String,
    /// Declaring field name
    pub from_field: String,
    /// Column on the declaring side (the model's key for symmetric relations)
    pub from_column: String,
    /// Referenced entity
    pub to_entity: String,
    /// Referenced primary key column
    pub to_column: String,
    pub cardinality: Cardinality,
}

/// Many-to-one relations are distinct per declaring column
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DirectedKey {
    source: String,
    column: String,
    target: String,
}

/// Symmetric relation drawn from `source` to `target`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SymmetricKey {
    cardinality: Cardinality,
    source: String,
    target: String,
}

/// Entities and deduplicated edges, both in discovery order
#[derive(Debug)]
pub struct ErdView {
    pub entities: Vec<EntityInfo>,
    pub edges: Vec<EdgeInfo>,
}

impl ErdView {
    /// Build a view from collected models
    pub fn from_models(models: &[ModelDescriptor]) -> Self {
        let names = EntityNames::new(models);
        let mut entities = Vec::with_capacity(models.len());
        let mut edges = Vec::new();
        let mut seen = AHashSet::new();
        let mut unmatched: AHashMap<SymmetricKey, usize> = AHashMap::new();

        for model in models {
            let columns = model
                .fields
                .iter()
                .map(|f| ColumnInfo {
                    name: f.column.clone(),
                    storage: f.storage,
                    is_primary_key: f.primary_key,
                    is_foreign_key: f
                        .relation
                        .as_ref()
                        .is_some_and(|r| r.cardinality != Cardinality::ManyToMany),
                    is_nullable: f.nullable,
                })
                .collect();

            entities.push(EntityInfo {
                name: names.entity(&model.app, &model.name),
                columns,
            });
        }

        for rel in model::relations(models) {
            let source = rel.source.qualified_name();
            let target = rel.target.qualified_name();
            let cardinality = rel.cardinality();

            if cardinality.is_symmetric() {
                // A declaration on the other model mirrors one already drawn
                let reverse = SymmetricKey {
                    cardinality,
                    source: target.clone(),
                    target: source.clone(),
                };
                if source != target {
                    if let Some(pending) = unmatched.get_mut(&reverse).filter(|n| **n > 0) {
                        *pending -= 1;
                        continue;
                    }
                }
                *unmatched
                    .entry(SymmetricKey {
                        cardinality,
                        source,
                        target,
                    })
                    .or_insert(0) += 1;
            } else {
                let key = DirectedKey {
                    source,
                    column: rel.field.column.clone(),
                    target,
                };
                if !seen.insert(key) {
                    continue;
                }
            }

            let from_column = if cardinality.is_symmetric() {
                rel.source.pk_column().to_string()
            } else {
                rel.field.column.clone()
            };

            edges.push(EdgeInfo {
                from_entity: names.entity(&rel.source.app, &rel.source.name),
                from_field: rel.field.name.clone(),
                from_column,
                to_entity: names.entity(&rel.target.app, &rel.target.model),
                to_column: rel.target.pk_column.clone(),
                cardinality,
            });
        }

        Self { entities, edges }
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn column_count(&self) -> usize {
        self.entities.iter().map(|e| e.columns.len()).sum()
    }
}
