//! Model descriptors collected from the registry.
//!
//! This module provides:
//! - Descriptors for models and fields, immutable after collection
//! - The closed storage-type set and the field-kind lookup table
//! - The collector that resolves app selections against a registry
//! - Entity naming that disambiguates models sharing a name across apps
//! - A JSON view of a collection run

mod collector;
mod inspect;
pub mod kinds;
mod names;

pub use collector::{AppSelection, Collector};
pub use inspect::{InspectOutput, InspectStats, RelationJson};
pub use kinds::{lookup_kind, KindClass, StorageType};
pub use names::EntityNames;

use schemars::JsonSchema;
use serde::Serialize;
use std::fmt;

/// Relationship cardinality, seen from the model declaring the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// Single-target reference (`ForeignKey`)
    ManyToOne,
    /// Multi-target reference (`ManyToManyField`)
    ManyToMany,
    /// `OneToOneField`
    OneToOne,
}

impl Cardinality {
    /// Whether both ends of the relation look the same
    pub fn is_symmetric(self) -> bool {
        matches!(self, Cardinality::ManyToMany | Cardinality::OneToOne)
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::ManyToOne => write!(f, "many-to-one"),
            Cardinality::ManyToMany => write!(f, "many-to-many"),
            Cardinality::OneToOne => write!(f, "one-to-one"),
        }
    }
}

/// Target of a relational field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct RelationTarget {
    pub app: String,
    pub model: String,
    /// Primary key column of the target model
    pub pk_column: String,
    pub cardinality: Cardinality,
}

impl RelationTarget {
    /// `app.Model`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.app, self.model)
    }
}

/// One field of a collected model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct FieldDescriptor {
    /// Field name as declared
    pub name: String,
    /// Storage column name (`customer_id` for a `customer` foreign key)
    pub column: String,
    /// Declared field kind, verbatim
    pub kind: String,
    pub storage: StorageType,
    pub primary_key: bool,
    pub nullable: bool,
    pub unique: bool,
    pub has_choices: bool,
    pub db_index: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<RelationTarget>,
    /// Auto-generated primary key that was not declared
    pub implicit: bool,
}

/// One collected model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ModelDescriptor {
    /// Owning application label
    pub app: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Fields in declaration order, implicit primary key first
    pub fields: Vec<FieldDescriptor>,
}

impl ModelDescriptor {
    /// `app.Model`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.app, self.name)
    }

    /// Primary key columns
    pub fn primary_keys(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.primary_key)
    }

    /// Column of the first primary key (`id` when none is declared)
    pub fn pk_column(&self) -> &str {
        self.primary_keys()
            .next()
            .map(|f| f.column.as_str())
            .unwrap_or("id")
    }

    /// Relations declared on this model, in field order
    pub fn relations(&self) -> impl Iterator<Item = RelationDescriptor<'_>> {
        self.fields.iter().filter_map(move |field| {
            field.relation.as_ref().map(|target| RelationDescriptor {
                source: self,
                field,
                target,
            })
        })
    }
}

/// A relation derived from a relational field; borrowed, never stored
#[derive(Debug, Clone, Copy)]
pub struct RelationDescriptor<'a> {
    pub source: &'a ModelDescriptor,
    pub field: &'a FieldDescriptor,
    pub target: &'a RelationTarget,
}

impl RelationDescriptor<'_> {
    pub fn cardinality(&self) -> Cardinality {
        self.target.cardinality
    }
}

/// All relations of `models` in discovery order
pub fn relations(models: &[ModelDescriptor]) -> Vec<RelationDescriptor<'_>> {
    models.iter().flat_map(|m| m.relations()).collect()
}

/// Whether a model with the given app and name is among `models`
pub fn contains(models: &[ModelDescriptor], app: &str, name: &str) -> bool {
    models.iter().any(|m| m.app == app && m.name == name)
}
