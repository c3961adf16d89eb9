//! PlantUML entity diagram output.

use super::view::ErdView;
use super::Dialect;

/// Generate a PlantUML entity diagram from an ERD view
pub fn to_plantuml(view: &ErdView) -> String {
    let mut output = String::new();

    output.push_str("@startuml\n\n");

    for entity in &view.entities {
        output.push_str(&format!("entity {} {{\n", escape_plantuml_id(&entity.name)));

        for col in &entity.columns {
            // `*` marks key attributes
            let marker = if col.is_primary_key { "*" } else { "" };
            output.push_str(&format!(
                "    {}{} : {}\n",
                marker,
                col.name,
                Dialect::PlantUml.type_name(col.storage)
            ));
        }

        output.push_str("}\n");
    }

    if !view.edges.is_empty() {
        output.push('\n');
    }

    for edge in &view.edges {
        output.push_str(&format!(
            "{} {} {}\n",
            escape_plantuml_id(&edge.from_entity),
            Dialect::PlantUml.cardinality(edge.cardinality),
            escape_plantuml_id(&edge.to_entity)
        ));
    }

    output.push_str("\n@enduml\n");
    output
}

fn escape_plantuml_id(s: &str) -> String {
    if s.chars().all(|c| c.is_alphanumeric() || c == '_') {
        s.to_string()
    } else {
        format!("\"{}\"", s.replace('"', "'"))
    }
}
