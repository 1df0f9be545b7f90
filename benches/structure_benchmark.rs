//! Benchmarks for outline recovery.
//!
//! Run with: cargo bench
//!
//! These benchmarks structure synthetic fragment streams.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pdf_hierarchy::{
    HierarchyParser, MemorySource, Policy, RawFragment, Rect, StructureOptions, Whitespace,
};

/// Creates a synthetic document: per page, a chapter heading, two section
/// headings and several body lines each.
fn create_test_source(page_count: u32) -> MemorySource {
    let page = Rect::from_size(595.0, 842.0);
    let mut source = MemorySource::new("bench://synthetic", Vec::new());

    let mut line = |text: String, index: u32, y: f32, width: f32, font: &str, size: f32| {
        source.push(
            RawFragment::new(text, Rect::new(50.0, y, 50.0 + width, y + size), page)
                .with_container(Rect::new(50.0, y, 545.0, y + size))
                .with_uniform_style(font, size, 0)
                .on_page(index),
        );
    };

    for p in 0..page_count {
        let mut y = 60.0;
        line(format!("Chapter {}", p + 1), p, y, 160.0, "Arial-Bold", 16.0);
        for s in 0..2 {
            y += 30.0;
            line(format!("Section Title {}", s + 1), p, y, 140.0, "Arial-Bold", 12.0);
            for b in 0..8 {
                y += 14.0;
                line(
                    format!("Body line {} of the benchmark document with ordinary text.", b),
                    p,
                    y,
                    480.0,
                    "Arial",
                    10.0,
                );
            }
        }
    }

    source
}

/// Benchmark whitespace geometry.
fn bench_whitespace(c: &mut Criterion) {
    let outer = Rect::new(50.0, 0.0, 545.0, 10.0);
    let inner = Rect::new(200.0, 0.0, 400.0, 10.0);

    c.bench_function("whitespace_is_centered", |b| {
        b.iter(|| Whitespace::new(black_box(outer), black_box(inner)).is_centered(10.0));
    });
}

/// Benchmark full structuring at various sizes.
fn bench_structure(c: &mut Criterion) {
    let mut group = c.benchmark_group("structure_document");

    for page_count in [1, 10, 50].iter() {
        let source = create_test_source(*page_count);
        let parser = HierarchyParser::new(StructureOptions::default());

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| parser.structure_document(black_box(&source)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark policy construction.
fn bench_policy_creation(c: &mut Criterion) {
    c.bench_function("kid_policy_creation", |b| {
        b.iter(Policy::kid);
    });
}

criterion_group!(benches, bench_whitespace, bench_structure, bench_policy_creation);
criterion_main!(benches);
