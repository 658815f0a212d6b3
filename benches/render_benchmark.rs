//! Benchmarks for layout and PDF serialization.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pqreport::render::render_to_bytes;
use pqreport::{build_document, layout_document, Document, PageGeometry, RenderOptions, StyleSheet};

/// A document with `sections` heading + paragraph pairs.
fn synthetic_document(sections: usize) -> Document {
    let mut doc = Document::new(StyleSheet::base());
    doc.append_title("Benchmark");
    for i in 0..sections {
        doc.append_section(
            format!("Section {}", i + 1),
            "Keep only records where **Date** and **SegmentID** are not null. ".repeat(8),
        );
        if i % 5 == 0 {
            doc.append_preformatted("Total Sales    = SUM(Financials_Table[Sales])\nTotal Profit   = SUM(Financials_Table[Profit])");
        }
    }
    doc
}

fn bench_report(c: &mut Criterion) {
    let doc = build_document().unwrap();
    let options = RenderOptions::default();

    c.bench_function("report_layout", |b| {
        b.iter(|| layout_document(black_box(&doc), &options.geometry))
    });
    c.bench_function("report_render", |b| {
        b.iter(|| render_to_bytes(black_box(&doc), &options))
    });
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_sections");
    let geometry = PageGeometry::default();

    for sections in [10, 50, 200] {
        let doc = synthetic_document(sections);
        group.bench_with_input(BenchmarkId::new("layout", sections), &doc, |b, doc| {
            b.iter(|| layout_document(black_box(doc), &geometry))
        });
        group.bench_with_input(BenchmarkId::new("compressed", sections), &doc, |b, doc| {
            b.iter(|| render_to_bytes(black_box(doc), &RenderOptions::default()))
        });
        group.bench_with_input(BenchmarkId::new("uncompressed", sections), &doc, |b, doc| {
            let options = RenderOptions::default().with_compression(false);
            b.iter(|| render_to_bytes(black_box(doc), &options))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_report, bench_scaling);
criterion_main!(benches);
