use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use modelscribe::dictionary;
use modelscribe::erd::{self, Dialect};
use modelscribe::model::{AppSelection, Collector};
use modelscribe::registry::{Registry, RegistryFormat};
use std::fmt::Write;

fn generate_registry(apps: usize, models_per_app: usize) -> String {
    let mut doc = String::from("default_auto_field: BigAutoField\napps:\n");

    for a in 0..apps {
        writeln!(doc, "  - label: app_{}\n    models:", a).unwrap();
        for m in 0..models_per_app {
            writeln!(doc, "      - name: Model{}", m).unwrap();
            writeln!(doc, "        doc: Generated model {} of app {}", m, a).unwrap();
            doc.push_str("        fields:\n");
            doc.push_str("          - { name: title, kind: CharField, max_length: 200 }\n");
            doc.push_str("          - { name: body, kind: TextField, null: true }\n");
            doc.push_str("          - { name: created, kind: DateTimeField, db_index: true }\n");
            if m > 0 {
                writeln!(
                    doc,
                    "          - {{ name: parent, kind: ForeignKey, to: Model{} }}",
                    m - 1
                )
                .unwrap();
            }
            if a > 0 {
                writeln!(
                    doc,
                    "          - {{ name: peers, kind: ManyToManyField, to: app_{}.Model{} }}",
                    a - 1,
                    m
                )
                .unwrap();
            }
        }
    }

    doc
}

fn bench_collect(c: &mut Criterion) {
    let mut group = c.benchmark_group("collect");

    for (apps, models) in [(5, 20), (20, 50)] {
        let registry = Registry::parse(&generate_registry(apps, models), RegistryFormat::Yaml)
            .unwrap();

        group.throughput(Throughput::Elements((apps * models) as u64));
        group.bench_with_input(
            BenchmarkId::new("all_apps", format!("{}a_{}m", apps, models)),
            &registry,
            |b, registry| {
                b.iter(|| {
                    Collector::new(registry)
                        .collect(&AppSelection::All)
                        .unwrap()
                })
            },
        );
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let registry = Registry::parse(&generate_registry(20, 50), RegistryFormat::Yaml).unwrap();
    let models = Collector::new(&registry)
        .collect(&AppSelection::All)
        .unwrap();
    group.throughput(Throughput::Elements(models.len() as u64));

    for dialect in Dialect::ALL {
        group.bench_with_input(
            BenchmarkId::new("erd", dialect),
            &models,
            |b, models| b.iter(|| erd::render(models, dialect)),
        );
    }

    group.bench_with_input(
        BenchmarkId::new("dictionary", "markdown"),
        &models,
        |b, models| b.iter(|| dictionary::render(models, "bench", "v1")),
    );

    group.finish();
}

criterion_group!(benches, bench_collect, bench_render);
criterion_main!(benches);
