//! JSON Schema generation for the registry document and `inspect` output.
//!
//! Schemas are generated using the schemars crate and can be exported via the
//! `schema` subcommand.

use schemars::{schema_for, Schema};
use std::collections::BTreeMap;

/// Returns every schema the tool publishes.
/// Uses BTreeMap for deterministic ordering (important for diffable output).
pub fn all_schemas() -> BTreeMap<&'static str, Schema> {
    let mut schemas = BTreeMap::new();

    // input document
    schemas.insert("registry", schema_for!(crate::registry::Registry));

    // inspect command output
    schemas.insert("inspect", schema_for!(crate::model::InspectOutput));

    schemas
}

/// Generate a single schema by name.
pub fn get_schema(name: &str) -> Option<Schema> {
    all_schemas().remove(name)
}

/// List all available schema names.
pub fn schema_names() -> Vec<&'static str> {
    all_schemas().keys().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_names() {
        assert_eq!(schema_names(), vec!["inspect", "registry"]);
    }

    #[test]
    fn test_registry_schema_mentions_fields() {
        let schema = get_schema("registry").unwrap();
        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.contains("default_auto_field"));
        assert!(json.contains("max_length"));
        assert!(get_schema("missing").is_none());
    }
}
