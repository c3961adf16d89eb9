//! Markdown data dictionary generation.
//!
//! The document has a title, the version tag, a table of contents nesting
//! application → model, and one section per application with one subsection
//! per model. Every heading carries an explicit `<a id>` anchor and the table
//! of contents links only to those anchors.

pub mod anchors;
pub mod markdown;

pub use anchors::{slugify, AnchorSet};
pub use markdown::Table;

use crate::erd::Dialect;
use crate::model::{self, EntityNames, FieldDescriptor, ModelDescriptor};

const CHECK: &str = "✓";

/// Column headers of every field table
pub const FIELD_TABLE_HEADERS: [&str; 10] = [
    "PK",
    "Field",
    "Type",
    "Related Model",
    "Description",
    "Nullable",
    "Unique",
    "Choices",
    "Max Length",
    "DB Index",
];

/// Models of one application, in collection order
struct AppGroup<'a> {
    label: &'a str,
    models: Vec<&'a ModelDescriptor>,
}

fn group_by_app(models: &[ModelDescriptor]) -> Vec<AppGroup<'_>> {
    let mut groups: Vec<AppGroup<'_>> = Vec::new();
    for model in models {
        match groups.iter_mut().find(|g| g.label == model.app) {
            Some(group) => group.models.push(model),
            None => groups.push(AppGroup {
                label: &model.app,
                models: vec![model],
            }),
        }
    }
    groups
}

fn app_key(label: &str) -> String {
    format!("app:{}", label)
}

fn model_key(app: &str, name: &str) -> String {
    format!("model:{}.{}", app, name)
}

/// Allocate anchors for the fixed sections, every app and every model
fn allocate_anchors(groups: &[AppGroup<'_>], names: &EntityNames) -> AnchorSet {
    let mut anchors = AnchorSet::new();
    anchors.assign("toc", "toc");
    anchors.assign("modules", "modules");

    for group in groups {
        anchors.assign(&app_key(group.label), &format!("app-{}", group.label));
    }
    for group in groups {
        for model in &group.models {
            let wanted = if names.is_shared(&model.name) {
                format!("{}-{}", model.app, model.name)
            } else {
                model.name.clone()
            };
            anchors.assign(&model_key(&model.app, &model.name), &wanted);
        }
    }

    anchors
}

/// Render collected models as a Markdown data dictionary
pub fn render(models: &[ModelDescriptor], project_name: &str, version_tag: &str) -> String {
    let groups = group_by_app(models);
    let names = EntityNames::new(models);
    let anchors = allocate_anchors(&groups, &names);
    let anchor = |key: &str| anchors.get(key).unwrap_or_default().to_string();

    let mut out = String::new();

    out.push_str(&format!("# {} - Data Dictionary\n\n", project_name));
    out.push_str(&format!("Version `{}`\n\n", version_tag));
    out.push_str("---\n\n");

    // Table of contents
    out.push_str(&format!("<a id=\"{}\"></a>\n", anchor("toc")));
    out.push_str("## Table of Contents\n\n");
    out.push_str(&format!("- [Table of Contents](#{})\n", anchor("toc")));
    out.push_str(&format!("- [Modules](#{})\n", anchor("modules")));
    for group in &groups {
        out.push_str(&format!(
            "  - [{}](#{})\n",
            group.label,
            anchor(&app_key(group.label))
        ));
        for model in &group.models {
            out.push_str(&format!(
                "    - [{}](#{})\n",
                model.name,
                anchor(&model_key(&model.app, &model.name))
            ));
        }
    }
    out.push_str("\n---\n\n");

    // Sections
    out.push_str(&format!("<a id=\"{}\"></a>\n", anchor("modules")));
    out.push_str("## Modules\n");
    for group in &groups {
        out.push_str(&format!(
            "\n<a id=\"{}\"></a>\n### {}\n",
            anchor(&app_key(group.label)),
            group.label
        ));
        for model in &group.models {
            out.push('\n');
            out.push_str(&render_model(model, models, &anchors));
        }
    }

    out
}

/// `Model(field, field, ...)` with field names in declaration order
pub fn signature(model: &ModelDescriptor) -> String {
    let fields: Vec<&str> = model.fields.iter().map(|f| f.name.as_str()).collect();
    format!("{}({})", model.name, fields.join(", "))
}

fn render_model(model: &ModelDescriptor, models: &[ModelDescriptor], anchors: &AnchorSet) -> String {
    let mut out = String::new();
    let own_anchor = anchors
        .get(&model_key(&model.app, &model.name))
        .unwrap_or_default();
    let signature = signature(model);

    out.push_str(&format!("<a id=\"{}\"></a>\n", own_anchor));
    out.push_str(&format!("#### {}\n\n", model.name));
    out.push_str(&format!("`{}`\n\n", signature));

    // Generated docstrings only repeat the signature
    if let Some(doc) = model
        .doc
        .as_deref()
        .filter(|d| !d.starts_with(&format!("{}(", model.name)))
    {
        let doc: Vec<&str> = doc.lines().map(str::trim).collect();
        out.push_str(&doc.join(" "));
        out.push_str("\n\n");
    }

    let mut table = Table::new(FIELD_TABLE_HEADERS);
    for field in &model.fields {
        table.push_row(field_row(field, models, anchors));
    }
    out.push_str(&table.render());

    out
}

fn mark(flag: bool) -> String {
    if flag {
        CHECK.to_string()
    } else {
        String::new()
    }
}

fn field_row(field: &FieldDescriptor, models: &[ModelDescriptor], anchors: &AnchorSet) -> Vec<String> {
    let type_name = Dialect::Mermaid.type_name(field.storage).replace('_', " ");

    let related = match &field.relation {
        Some(target) if model::contains(models, &target.app, &target.model) => {
            let anchor = anchors
                .get(&model_key(&target.app, &target.model))
                .unwrap_or_default();
            format!("[{}](#{})", target.model, anchor)
        }
        Some(target) => target.qualified_name(),
        None => String::new(),
    };

    vec![
        mark(field.primary_key),
        field.column.clone(),
        format!("`{}`", type_name),
        related,
        field.help_text.clone().unwrap_or_default(),
        mark(field.nullable),
        mark(field.unique),
        mark(field.has_choices),
        field.max_length.map(|n| n.to_string()).unwrap_or_default(),
        mark(field.db_index),
    ]
}
