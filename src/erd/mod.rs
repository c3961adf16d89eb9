//! ERD (Entity-Relationship Diagram) source generation.
//!
//! This module provides:
//! - An entity/edge view of collected models with deduplicated relations
//! - Output in three dialects: Mermaid erDiagram, PlantUML, dbdiagram.io (DBML)
//! - Per-dialect type names drawn from the closed storage-type set

mod dbdiagram;
mod mermaid;
mod plantuml;
pub mod view;

pub use dbdiagram::to_dbdiagram;
pub use mermaid::to_mermaid;
pub use plantuml::to_plantuml;
pub use view::{ColumnInfo, EdgeInfo, EntityInfo, ErdView};

use crate::error::Error;
use crate::model::{Cardinality, ModelDescriptor, StorageType};
use std::fmt;
use std::str::FromStr;

/// Diagram dialect for ERD export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Mermaid erDiagram
    #[default]
    Mermaid,
    /// PlantUML entity diagram
    PlantUml,
    /// dbdiagram.io DBML
    DbDiagram,
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mermaid" => Ok(Dialect::Mermaid),
            "plantuml" => Ok(Dialect::PlantUml),
            "dbdiagram" => Ok(Dialect::DbDiagram),
            _ => Err(Error::UnsupportedDialect(s.to_string())),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Mermaid => write!(f, "mermaid"),
            Dialect::PlantUml => write!(f, "plantuml"),
            Dialect::DbDiagram => write!(f, "dbdiagram"),
        }
    }
}

impl Dialect {
    /// All dialects, in the order they are listed to users
    pub const ALL: [Dialect; 3] = [Dialect::Mermaid, Dialect::PlantUml, Dialect::DbDiagram];

    /// Comma-separated dialect names for messages
    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Relationship notation for a cardinality
    pub fn cardinality(&self, cardinality: Cardinality) -> &'static str {
        match (self, cardinality) {
            (Dialect::Mermaid | Dialect::PlantUml, Cardinality::ManyToOne) => "}|--||",
            (Dialect::Mermaid | Dialect::PlantUml, Cardinality::ManyToMany) => "}|--|{",
            (Dialect::Mermaid | Dialect::PlantUml, Cardinality::OneToOne) => "||--||",
            (Dialect::DbDiagram, Cardinality::ManyToOne) => ">",
            (Dialect::DbDiagram, Cardinality::ManyToMany) => "<>",
            (Dialect::DbDiagram, Cardinality::OneToOne) => "-",
        }
    }

    /// Type name for a storage type in this dialect's vocabulary
    pub fn type_name(&self, storage: StorageType) -> String {
        match self {
            Dialect::Mermaid => match storage {
                // Mermaid type tokens cannot contain spaces or parentheses
                StorageType::GeometryCollection => "geometry_collection".to_string(),
                s if s.is_spatial_shape() => format!("geometry_{}", s.as_str()),
                s => s.as_str().to_string(),
            },
            Dialect::PlantUml => storage.as_str().to_uppercase(),
            Dialect::DbDiagram => match storage {
                s if s.is_spatial_shape() => format!("geometry({})", s.as_str().to_uppercase()),
                s => s.as_str().to_string(),
            },
        }
    }
}

/// Render collected models as diagram source in the given dialect
pub fn render(models: &[ModelDescriptor], dialect: Dialect) -> String {
    render_view(&ErdView::from_models(models), dialect)
}

/// Render an already built view in the given dialect
pub fn render_view(view: &ErdView, dialect: Dialect) -> String {
    match dialect {
        Dialect::Mermaid => to_mermaid(view),
        Dialect::PlantUml => to_plantuml(view),
        Dialect::DbDiagram => to_dbdiagram(view),
    }
}
