use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_record::codec::{JsonBuilder, JsonParser, NativeBuilder, NativeParser};
use serde_record::normalize::{normalize_data, validate_data};
use serde_record::{value, Map, RecordBuilder, RecordParser, Value};

fn object(value: Value) -> Map {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn user() -> Map {
    object(value!({
        "id": 123,
        "name": "Alice",
        "email": "alice@example.com",
        "active": true
    }))
}

fn nested() -> Map {
    object(value!({
        "id": 42,
        "metadata": {
            "created": "2023-01-01T00:00:00Z",
            "updated": "2023-12-31T23:59:59Z",
            "version": 3
        },
        "tags": ["important", "verified", "production"]
    }))
}

fn products(size: u32) -> Map {
    let items = (0..size)
        .map(|i| {
            value!({
                "sku": (format!("SKU{}", i)),
                "name": (format!("Product {}", i)),
                "price": (9.99 + f64::from(i)),
                "quantity": i
            })
        })
        .collect::<Vec<_>>();
    object(value!({ "products": items }))
}

fn benchmark_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let data = nested();

    group.bench_function("validate_nested", |b| {
        b.iter(|| validate_data(black_box(&data)))
    });
    group.bench_function("normalize_nested", |b| {
        b.iter(|| normalize_data(black_box(&data)))
    });

    group.finish();
}

fn benchmark_build_simple(c: &mut Criterion) {
    let data = user();
    let json = JsonBuilder::new();
    let native = NativeBuilder::new();

    c.bench_function("build_json_simple", |b| b.iter(|| json.build(black_box(&data))));
    c.bench_function("build_native_simple", |b| {
        b.iter(|| native.build(black_box(&data)))
    });
}

fn benchmark_parse_simple(c: &mut Criterion) {
    let data = user();
    let json = JsonBuilder::new().build(&data).unwrap();
    let native = NativeBuilder::new().build(&data).unwrap();

    c.bench_function("parse_json_simple", |b| {
        b.iter(|| JsonParser::new().parse(black_box(&json)))
    });
    c.bench_function("parse_native_simple", |b| {
        b.iter(|| NativeParser::new().parse(black_box(&native)))
    });
}

fn benchmark_build_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_list");
    let json = JsonBuilder::new();
    let native = NativeBuilder::new();

    for size in [10, 50, 100, 500].iter() {
        let data = products(*size);

        group.bench_with_input(BenchmarkId::new("json", size), &data, |b, data| {
            b.iter(|| json.build(black_box(data)))
        });
        group.bench_with_input(BenchmarkId::new("native", size), &data, |b, data| {
            b.iter(|| native.build(black_box(data)))
        });
    }
    group.finish();
}

fn benchmark_parse_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_list");

    for size in [10, 50, 100, 500].iter() {
        let data = products(*size);
        let json = JsonBuilder::new().build(&data).unwrap();
        let native = NativeBuilder::new().build(&data).unwrap();

        group.bench_with_input(BenchmarkId::new("json", size), &json, |b, bytes| {
            b.iter(|| JsonParser::new().parse(black_box(bytes)))
        });
        group.bench_with_input(BenchmarkId::new("native", size), &native, |b, bytes| {
            b.iter(|| NativeParser::new().parse(black_box(bytes)))
        });
    }
    group.finish();
}

fn benchmark_nested(c: &mut Criterion) {
    let data = nested();
    let native = NativeBuilder::new().build(&data).unwrap();

    c.bench_function("build_native_nested", |b| {
        b.iter(|| NativeBuilder::new().build(black_box(&data)))
    });
    c.bench_function("parse_native_nested", |b| {
        b.iter(|| NativeParser::new().parse(black_box(&native)))
    });
}

fn benchmark_string_escaping(c: &mut Criterion) {
    let mut group = c.benchmark_group("string_escaping");

    let plain = object(value!({ "text": "This is a medium length string with some content" }));
    let markup = object(value!({ "text": "<p class='note'>Escaped for embedding in markup</p>" }));
    let quoted = object(value!({ "text": "key: \"value\"\n\ttabbed, with commas" }));

    for (label, data) in [("plain", &plain), ("markup", &markup), ("quoted", &quoted)] {
        group.bench_with_input(BenchmarkId::new("json", label), data, |b, data| {
            b.iter(|| JsonBuilder::new().build(black_box(data)))
        });
        group.bench_with_input(BenchmarkId::new("native", label), data, |b, data| {
            b.iter(|| NativeBuilder::new().build(black_box(data)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_normalize,
    benchmark_build_simple,
    benchmark_parse_simple,
    benchmark_build_list,
    benchmark_parse_list,
    benchmark_nested,
    benchmark_string_escaping
);
criterion_main!(benches);
