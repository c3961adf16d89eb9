//! JSON view of collected models for programmatic use.

use super::{Cardinality, ModelDescriptor};
use schemars::JsonSchema;
use serde::Serialize;

/// JSON representation of a collection run
#[derive(Debug, Serialize, JsonSchema)]
pub struct InspectOutput {
    pub models: Vec<ModelDescriptor>,
    pub relations: Vec<RelationJson>,
    pub stats: InspectStats,
}

/// JSON representation of one relational field
#[derive(Debug, Serialize, JsonSchema)]
pub struct RelationJson {
    /// `app.Model` declaring the field
    pub source: String,
    pub field: String,
    /// `app.Model` referenced
    pub target: String,
    pub cardinality: Cardinality,
    /// Whether the target is among the collected models
    pub target_collected: bool,
}

/// Collection statistics
#[derive(Debug, Serialize, JsonSchema)]
pub struct InspectStats {
    pub app_count: usize,
    pub model_count: usize,
    pub field_count: usize,
    pub relation_count: usize,
}

impl InspectOutput {
    pub fn from_models(models: Vec<ModelDescriptor>) -> Self {
        let relations: Vec<RelationJson> = super::relations(&models)
            .into_iter()
            .map(|rel| RelationJson {
                source: rel.source.qualified_name(),
                field: rel.field.name.clone(),
                target: rel.target.qualified_name(),
                cardinality: rel.cardinality(),
                target_collected: super::contains(&models, &rel.target.app, &rel.target.model),
            })
            .collect();

        let mut apps: Vec<&str> = models.iter().map(|m| m.app.as_str()).collect();
        apps.dedup();

        let stats = InspectStats {
            app_count: apps.len(),
            model_count: models.len(),
            field_count: models.iter().map(|m| m.fields.len()).sum(),
            relation_count: relations.len(),
        };

        Self {
            models,
            relations,
            stats,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::*;

    #[test]
    fn test_inspect_output() {
        let models = vec![
            model("crm", "Customer", vec![]),
            model(
                "sales",
                "Order",
                vec![
                    relation("customer", "crm", "Customer", Cardinality::ManyToOne),
                    relation("tags", "tagging", "Tag", Cardinality::ManyToMany),
                ],
            ),
        ];
        let output = InspectOutput::from_models(models);

        assert_eq!(output.stats.app_count, 2);
        assert_eq!(output.stats.model_count, 2);
        assert_eq!(output.stats.field_count, 4);
        assert_eq!(output.stats.relation_count, 2);
        assert!(output.relations[0].target_collected);
        assert!(!output.relations[1].target_collected);

        let json = output.to_json().unwrap();
        assert!(json.contains("\"cardinality\": \"many_to_one\""));
        assert!(json.contains("\"storage\": \"integer\""));
    }
}
