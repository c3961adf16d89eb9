//! dbdiagram.io (DBML) output.

use super::view::ErdView;
use super::Dialect;

/// Generate DBML table definitions and references from an ERD view
pub fn to_dbdiagram(view: &ErdView) -> String {
    let mut output = String::new();

    for entity in &view.entities {
        output.push_str(&format!("Table {} {{\n", escape_dbml_id(&entity.name)));

        for col in &entity.columns {
            let mut settings = Vec::new();
            if col.is_primary_key {
                settings.push("primary key");
            }
            if !col.is_nullable && !col.is_primary_key {
                settings.push("not null");
            }

            let col_type = Dialect::DbDiagram.type_name(col.storage);
            if settings.is_empty() {
                output.push_str(&format!(
                    "  {} \"{}\"\n",
                    escape_dbml_id(&col.name),
                    col_type
                ));
            } else {
                output.push_str(&format!(
                    "  {} \"{}\" [{}]\n",
                    escape_dbml_id(&col.name),
                    col_type,
                    settings.join(", ")
                ));
            }
        }

        output.push_str("}\n");
    }

    if !view.edges.is_empty() {
        output.push('\n');
    }

    for edge in &view.edges {
        output.push_str(&format!(
            "Ref: {}.{} {} {}.{}\n",
            escape_dbml_id(&edge.from_entity),
            escape_dbml_id(&edge.from_column),
            Dialect::DbDiagram.cardinality(edge.cardinality),
            escape_dbml_id(&edge.to_entity),
            escape_dbml_id(&edge.to_column)
        ));
    }

    output
}

/// Quote identifiers DBML would not accept bare
fn escape_dbml_id(s: &str) -> String {
    if s.chars().all(|c| c.is_alphanumeric() || c == '_') {
        s.to_string()
    } else {
        format!("\"{}\"", s.replace('"', "\\\""))
    }
}
