//! Mermaid erDiagram format output.

use super::view::ErdView;
use super::Dialect;

/// Generate a Mermaid erDiagram from an ERD view
pub fn to_mermaid(view: &ErdView) -> String {
    let mut output = String::new();

    output.push_str("erDiagram\n");

    for entity in &view.entities {
        let safe_name = escape_mermaid_id(&entity.name);
        output.push_str(&format!("    {} {{\n", safe_name));

        for col in &entity.columns {
            let key_marker = match (col.is_primary_key, col.is_foreign_key) {
                (true, true) => "PK, FK",
                (true, false) => "PK",
                (false, true) => "FK",
                (false, false) => "",
            };

            let col_type = Dialect::Mermaid.type_name(col.storage);
            let col_name = escape_mermaid_id(&col.name);

            if key_marker.is_empty() {
                output.push_str(&format!("        {} {}\n", col_type, col_name));
            } else {
                output.push_str(&format!(
                    "        {} {} {}\n",
                    col_type, col_name, key_marker
                ));
            }
        }

        output.push_str("    }\n");
    }

    if !view.edges.is_empty() {
        output.push('\n');
    }

    for edge in &view.edges {
        output.push_str(&format!(
            "    {} {} {} : \"{}\"\n",
            escape_mermaid_id(&edge.from_entity),
            Dialect::Mermaid.cardinality(edge.cardinality),
            escape_mermaid_id(&edge.to_entity),
            edge.from_field
        ));
    }

    output
}

/// Escape a string for use as a Mermaid entity or attribute name
fn escape_mermaid_id(s: &str) -> String {
    // Mermaid IDs should be alphanumeric with underscores
    s.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
