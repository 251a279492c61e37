use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use warehouse_core::ProductId;
use warehouse_inventory::{NameResolver, Product, QuantityOperation};

/// A catalog where `base` and its first `copies` suffixes are already taken,
/// padded with unrelated names.
fn catalog(base: &str, copies: usize, unrelated: usize) -> Vec<String> {
    let mut names = Vec::with_capacity(1 + copies + unrelated);
    names.push(base.to_string());
    names.extend((1..=copies).map(|n| format!("{base} ({n})")));
    names.extend((0..unrelated).map(|n| format!("Item {n}")));
    names
}

fn bench_name_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("name_resolution");
    let resolver = NameResolver::default();

    for catalog_size in [100usize, 1_000, 10_000].iter() {
        let names = catalog("Widget", 10, *catalog_size);
        group.throughput(Throughput::Elements(names.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("collision_with_ten_copies", catalog_size),
            &names,
            |b, names| {
                b.iter(|| {
                    let resolved =
                        resolver.resolve(black_box("Widget"), names.iter().map(String::as_str));
                    black_box(resolved)
                });
            },
        );
        group.bench_with_input(BenchmarkId::new("no_collision", catalog_size), &names, |b, names| {
            b.iter(|| {
                let resolved =
                    resolver.resolve(black_box("Gadget"), names.iter().map(String::as_str));
                black_box(resolved)
            });
        });
    }

    group.finish();
}

fn bench_quantity_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantity_rules");
    let product = Product::restore(ProductId::new(1), "Widget", 1_000, 250)
        .expect("benchmark product is valid");

    for op in [
        QuantityOperation::Reserve,
        QuantityOperation::Ship,
        QuantityOperation::Restock,
    ] {
        group.bench_function(op.as_str(), |b| {
            b.iter(|| black_box(product.decide(op, black_box(10))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_name_resolution, bench_quantity_rules);
criterion_main!(benches);
