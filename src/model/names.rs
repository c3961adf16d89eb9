//! Entity naming across applications.

use super::ModelDescriptor;
use ahash::{AHashMap, AHashSet};

/// Resolves display names for models, qualifying names shared across apps.
///
/// Both collected models and relation targets outside the selection count,
/// so a diagram never draws two different models under one entity name.
/// Unshared names are kept as declared; a qualified `app_Name` that clashes
/// with one of them gets a numeric suffix.
#[derive(Debug, Default)]
pub struct EntityNames {
    apps_by_name: AHashMap<String, AHashSet<String>>,
    assigned: AHashMap<(String, String), String>,
}

impl EntityNames {
    pub fn new(models: &[ModelDescriptor]) -> Self {
        let mut apps_by_name: AHashMap<String, AHashSet<String>> = AHashMap::new();
        let mut in_play: Vec<(String, String)> = Vec::new();
        let mut note = |app: &str, name: &str| {
            let apps = apps_by_name.entry(name.to_string()).or_default();
            if apps.insert(app.to_string()) {
                in_play.push((app.to_string(), name.to_string()));
            }
        };

        for model in models {
            note(&model.app, &model.name);
            for rel in model.relations() {
                note(&rel.target.app, &rel.target.model);
            }
        }

        let shared = |name: &str| apps_by_name.get(name).is_some_and(|apps| apps.len() > 1);
        let mut taken: AHashSet<String> = in_play
            .iter()
            .filter(|(_, name)| !shared(name.as_str()))
            .map(|(_, name)| name.clone())
            .collect();

        let mut assigned = AHashMap::with_capacity(in_play.len());
        for (app, name) in in_play {
            let entity = if shared(name.as_str()) {
                let base = format!("{}_{}", app, name);
                let mut candidate = base.clone();
                let mut n = 2;
                while taken.contains(&candidate) {
                    candidate = format!("{}_{}", base, n);
                    n += 1;
                }
                taken.insert(candidate.clone());
                candidate
            } else {
                name.clone()
            };
            assigned.insert((app, name), entity);
        }

        Self {
            apps_by_name,
            assigned,
        }
    }

    /// Whether `name` is declared by more than one app in play
    pub fn is_shared(&self, name: &str) -> bool {
        self.apps_by_name
            .get(name)
            .map(|apps| apps.len() > 1)
            .unwrap_or(false)
    }

    /// Diagram entity name: `Name`, or `app_Name` when the name is shared
    pub fn entity(&self, app: &str, name: &str) -> String {
        if let Some(entity) = self.assigned.get(&(app.to_string(), name.to_string())) {
            return entity.clone();
        }
        if self.is_shared(name) {
            format!("{}_{}", app, name)
        } else {
            name.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::*;
    use crate::model::Cardinality;

    #[test]
    fn test_unique_names_stay_plain() {
        let models = vec![model("crm", "Customer", vec![])];
        let names = EntityNames::new(&models);
        assert_eq!(names.entity("crm", "Customer"), "Customer");
    }

    #[test]
    fn test_shared_names_are_qualified() {
        let models = vec![
            model("crm", "Address", vec![]),
            model(
                "sales",
                "Order",
                vec![relation("ship_to", "shipping", "Address", Cardinality::ManyToOne)],
            ),
        ];
        let names = EntityNames::new(&models);

        assert!(names.is_shared("Address"));
        assert_eq!(names.entity("crm", "Address"), "crm_Address");
        assert_eq!(names.entity("shipping", "Address"), "shipping_Address");
        assert_eq!(names.entity("sales", "Order"), "Order");
    }

    #[test]
    fn test_qualified_name_avoids_literal_clash() {
        let models = vec![
            model("crm", "Address", vec![]),
            model("shipping", "Address", vec![]),
            model("legacy", "crm_Address", vec![]),
        ];
        let names = EntityNames::new(&models);

        assert_eq!(names.entity("legacy", "crm_Address"), "crm_Address");
        assert_eq!(names.entity("crm", "Address"), "crm_Address_2");
        assert_eq!(names.entity("shipping", "Address"), "shipping_Address");
    }
}
