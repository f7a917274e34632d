//! Benchmarks for catalog page reordering

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use refcat_core::catalog::{reorder_catalog, Catalog, CatalogNode};

/// A catalog shaped like catalog-nk.yml: a few shelves, many books, a
/// handful of pages per book with dividers between groups
fn build_catalog(shelves: usize, books: usize, pages: usize) -> Catalog {
    let shelves = (0..shelves)
        .map(|s| {
            let books = (0..books)
                .map(|b| {
                    let mut children = vec![CatalogNode::divider("Experimental data")];
                    for p in 0..pages {
                        if p == pages / 2 {
                            children.push(CatalogNode::divider("Model"));
                        }
                        let year = 1950 + (p * 37 + b * 11) % 70;
                        children.push(CatalogNode::page(
                            format!("Author{p}"),
                            format!("Author{p} et al. {year}: n,k 0.2–2 µm"),
                        ));
                    }
                    CatalogNode::book(format!("B{b}"), format!("Book {b}")).with_children(children)
                })
                .collect();
            CatalogNode::shelf(format!("S{s}"), format!("Shelf {s}")).with_children(books)
        })
        .collect();
    Catalog::new(shelves)
}

fn benchmark_reorder_catalog(c: &mut Criterion) {
    let catalog = build_catalog(8, 200, 12);

    c.bench_function("reorder_catalog_8x200x12", |b| {
        b.iter(|| reorder_catalog(black_box(catalog.clone())).unwrap());
    });
}

fn benchmark_yaml_roundtrip(c: &mut Criterion) {
    let yaml = build_catalog(4, 100, 8).to_yaml().unwrap();

    c.bench_function("load_reorder_dump_4x100x8", |b| {
        b.iter(|| {
            let catalog = Catalog::from_yaml(black_box(&yaml)).unwrap();
            reorder_catalog(catalog).unwrap().to_yaml().unwrap()
        });
    });
}

criterion_group!(benches, benchmark_reorder_catalog, benchmark_yaml_roundtrip);
criterion_main!(benches);
