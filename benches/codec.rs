use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nsv::{
    decode, encode, from_str, lift, to_string, unlift, Codec, FastCodec, ReferenceCodec, Table,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
    tags: Vec<String>,
}

fn sample_table(rows: usize) -> Table {
    (0..rows)
        .map(|i| {
            vec![
                i.to_string(),
                format!("Product {}", i),
                format!("line one\nline two {}", i),
                String::new(),
                format!("C:\\data\\{}", i),
            ]
        })
        .collect()
}

fn products(rows: u32) -> Vec<Product> {
    (0..rows)
        .map(|i| Product {
            sku: format!("SKU{}", i),
            name: format!("Product {}", i),
            price: 9.99 + f64::from(i),
            quantity: i,
            tags: vec!["new".to_string(), format!("batch-{}", i % 7)],
        })
        .collect()
}

fn benchmark_escape(c: &mut Criterion) {
    let mut group = c.benchmark_group("escape");

    let plain = "This is a plain cell with nothing to escape at all, just text";
    let dense = "a\\b\nc\\d\ne\\f\ng\\h\ni\\j\nk\\l\nm\\n\no\\p\nq\\r\ns\\t\nu";

    for (label, cell) in [("plain", plain), ("dense", dense)] {
        group.bench_with_input(BenchmarkId::new("fast", label), cell, |b, cell| {
            b.iter(|| FastCodec.escape(black_box(cell)))
        });
        group.bench_with_input(BenchmarkId::new("reference", label), cell, |b, cell| {
            b.iter(|| ReferenceCodec.escape(black_box(cell)))
        });
    }
    group.finish();
}

fn benchmark_unescape(c: &mut Criterion) {
    let mut group = c.benchmark_group("unescape");

    let plain = FastCodec.escape("This is a plain cell with nothing to escape at all, just text");
    let dense = FastCodec.escape("a\\b\nc\\d\ne\\f\ng\\h\ni\\j\nk\\l\nm\\n\no\\p\nq\\r\ns\\t\nu");

    for (label, line) in [("plain", plain.as_str()), ("dense", dense.as_str())] {
        group.bench_with_input(BenchmarkId::new("fast", label), line, |b, line| {
            b.iter(|| FastCodec.unescape(black_box(line)))
        });
        group.bench_with_input(BenchmarkId::new("reference", label), line, |b, line| {
            b.iter(|| ReferenceCodec.unescape(black_box(line)))
        });
    }
    group.finish();
}

fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for size in [10, 100, 1000].iter() {
        let table = sample_table(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| encode(black_box(table)))
        });
    }
    group.finish();
}

fn benchmark_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for size in [10, 100, 1000].iter() {
        let text = encode(sample_table(*size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| decode(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_lift(c: &mut Criterion) {
    let cells: Vec<String> = (0..32).map(|i| format!("cell {}\n{}", i, i * 2)).collect();
    let lifted = lift(&cells);

    c.bench_function("lift_32_cells", |b| b.iter(|| lift(black_box(&cells))));
    c.bench_function("unlift_32_cells", |b| b.iter(|| unlift(black_box(&lifted))));
}

fn benchmark_serde(c: &mut Criterion) {
    let mut group = c.benchmark_group("serde");

    for size in [10, 100, 500].iter() {
        let data = products(*size);
        let text = to_string(&data).unwrap();

        group.bench_with_input(BenchmarkId::new("serialize", size), &data, |b, data| {
            b.iter(|| to_string(black_box(data)))
        });
        group.bench_with_input(BenchmarkId::new("deserialize", size), &text, |b, text| {
            b.iter(|| from_str::<Vec<Product>>(black_box(text)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_escape,
    benchmark_unescape,
    benchmark_encode,
    benchmark_decode,
    benchmark_lift,
    benchmark_serde,
);
criterion_main!(benches);
