//! Unit tests for the Markdown data dictionary.

use modelscribe::dictionary::{self, FIELD_TABLE_HEADERS};
use modelscribe::model::{AppSelection, Collector, ModelDescriptor};
use modelscribe::registry::Registry;
use std::collections::HashSet;
use std::path::Path;

fn fixture() -> Registry {
    Registry::load(Path::new("tests/fixtures/shop.yaml")).unwrap()
}

fn collect(registry: &Registry, apps: Option<&str>) -> Vec<ModelDescriptor> {
    Collector::new(registry)
        .collect(&AppSelection::parse(apps))
        .unwrap()
}

/// Field rows of the table following the `#### <model>` heading
fn table_rows<'a>(doc: &'a str, model: &str) -> Vec<&'a str> {
    let heading = format!("#### {}\n", model);
    let start = doc.find(&heading).expect("model heading");
    doc[start..]
        .lines()
        .skip_while(|l| !l.starts_with("| PK |"))
        .skip(2)
        .take_while(|l| l.starts_with('|'))
        .collect()
}

fn link_targets(doc: &str) -> Vec<String> {
    let mut targets = Vec::new();
    let mut rest = doc;
    while let Some(pos) = rest.find("](#") {
        let after = &rest[pos + 3..];
        let end = after.find(')').unwrap();
        targets.push(after[..end].to_string());
        rest = &after[end..];
    }
    targets
}

fn anchors(doc: &str) -> HashSet<String> {
    doc.lines()
        .filter_map(|l| l.strip_prefix("<a id=\""))
        .filter_map(|l| l.strip_suffix("\"></a>"))
        .map(str::to_string)
        .collect()
}

#[test]
fn test_row_count_matches_declared_fields() {
    let registry = fixture();
    let models = collect(&registry, None);
    let doc = dictionary::render(&models, "shop", "v1");

    for app in &registry.apps {
        for entry in &app.models {
            let declared = entry.fields.len();
            let implicit = usize::from(!entry.fields.iter().any(|f| f.primary_key));
            assert_eq!(
                table_rows(&doc, &entry.name).len(),
                declared + implicit,
                "row count for {}",
                entry.name
            );
        }
    }
}

#[test]
fn test_every_link_resolves() {
    let registry = fixture();
    let models = collect(&registry, None);
    let doc = dictionary::render(&models, "shop", "v1");

    let anchors = anchors(&doc);
    let targets = link_targets(&doc);
    assert!(!targets.is_empty());
    for target in targets {
        assert!(anchors.contains(&target), "dangling link #{target}");
    }
}

#[test]
fn test_links_resolve_with_partial_selection() {
    let registry = fixture();
    let models = collect(&registry, Some("sales"));
    let doc = dictionary::render(&models, "shop", "v1");

    let anchors = anchors(&doc);
    for target in link_targets(&doc) {
        assert!(anchors.contains(&target), "dangling link #{target}");
    }

    // Uncollected targets are plain text
    assert!(doc.contains("| | customer_id | `bigint` | crm.Customer |"));
    assert!(doc.contains("| | products | `varchar` | catalog.Product |"));
    // Collected targets are links
    assert!(doc.contains("| | order_id | `bigint` | [Order](#order) |"));
}

#[test]
fn test_header_lists_fixed_columns() {
    let registry = fixture();
    let doc = dictionary::render(&collect(&registry, None), "shop", "v1");

    let header = format!("| {} |", FIELD_TABLE_HEADERS.join(" | "));
    assert_eq!(
        header,
        "| PK | Field | Type | Related Model | Description | Nullable | Unique | Choices | Max Length | DB Index |"
    );
    assert_eq!(doc.matches(&header).count(), 5);
}

#[test]
fn test_field_flags() {
    let registry = fixture();
    let doc = dictionary::render(&collect(&registry, None), "shop", "abc");

    let rows = table_rows(&doc, "Customer");
    assert_eq!(rows[0], "| ✓ | id | `bigint` | | | | ✓ | | | |");
    assert_eq!(
        rows[1],
        "| | name | `varchar` | | Full legal name | | | | 255 | |"
    );
    assert_eq!(
        rows[3],
        "| | region_id | `bigint` | [Region](#region) | | ✓ | | | | ✓ |"
    );
    assert_eq!(rows[4], "| | tier | `varchar` | | | | | ✓ | 8 | |");

    let region = table_rows(&doc, "Region");
    assert_eq!(region[2], "| | area | `geometry polygon` | | | ✓ | | | | |");
}

#[test]
fn test_docstrings_and_signatures() {
    let registry = fixture();
    let doc = dictionary::render(&collect(&registry, None), "shop", "abc");

    assert!(doc.contains(
        "`Customer(id, name, email, region, tier)`\n\nSomeone who buys things. Customers belong to one region.\n"
    ));
    // Generated docstring that repeats the signature is dropped
    assert!(doc.contains("`Order(id, customer, placed_at, products)`\n\n| PK |"));
    // Explicit primary key keeps its position
    assert!(doc.contains("`Product(sku, title, price, description)`"));
}

#[test]
fn test_version_tag_verbatim() {
    let registry = fixture();
    let doc = dictionary::render(&collect(&registry, None), "shop", "release/2.1 (rc)");
    assert!(doc.contains("Version `release/2.1 (rc)`\n"));
}

#[test]
fn test_deterministic_output() {
    let registry = fixture();
    let first = dictionary::render(&collect(&registry, None), "shop", "v1");
    let second = dictionary::render(&collect(&registry, None), "shop", "v1");
    assert_eq!(first, second);
}
