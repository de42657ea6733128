//! Benchmark – one-shot vs. chunked parsing, and validation alone
#![allow(missing_docs)]

use std::{fmt::Write, hint::black_box, time::Duration};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use streamjson::{
    NullSink, ParserOptions, StreamingParser, ValueParser, parse_to_value, validate,
};

/// A deterministic document of records with every kind of scalar, at least
/// `target_len` bytes long.
fn make_json_payload(target_len: usize) -> String {
    let mut s = String::with_capacity(target_len + 128);
    s.push('[');
    let mut i = 0u64;
    while s.len() < target_len {
        if i > 0 {
            s.push(',');
        }
        write!(
            s,
            r#"{{"id":{i},"name":"item é {i}","score":{}.5e-1,"tags":["a","b\n"],"ok":{},"next":null}}"#,
            i % 97,
            i % 2 == 0
        )
        .unwrap();
        i += 1;
    }
    s.push(']');
    s
}

fn run_chunked(payload: &[u8], parts: usize) -> streamjson::Value {
    let chunk_size = payload.len().div_ceil(parts);
    let mut parser = ValueParser::new();
    for chunk in payload.chunks(chunk_size) {
        parser.write(chunk).unwrap();
    }
    parser.finish().unwrap();
    parser.release().unwrap()
}

fn run_validate_chunked(payload: &[u8], parts: usize) -> bool {
    let chunk_size = payload.len().div_ceil(parts);
    let mut parser = StreamingParser::new(NullSink, ParserOptions::default());
    for chunk in payload.chunks(chunk_size) {
        if parser.write(chunk).is_err() {
            return false;
        }
    }
    parser.finish().is_ok()
}

fn bench_parse(c: &mut Criterion) {
    let payload = make_json_payload(100_000);
    let bytes = payload.as_bytes();

    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("one_shot", |b| {
        b.iter(|| black_box(parse_to_value(black_box(bytes)).unwrap()));
    });
    group.bench_function("validate", |b| {
        b.iter(|| black_box(validate(black_box(bytes))));
    });
    for &parts in &[10usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("chunked", parts), &parts, |b, &parts| {
            b.iter(|| black_box(run_chunked(black_box(bytes), parts)));
        });
        group.bench_with_input(
            BenchmarkId::new("validate_chunked", parts),
            &parts,
            |b, &parts| {
                b.iter(|| black_box(run_validate_chunked(black_box(bytes), parts)));
            },
        );
    }
    group.finish();
}

fn bench_serialize(c: &mut Criterion) {
    let value = parse_to_value(make_json_payload(100_000).as_bytes()).unwrap();

    let mut group = c.benchmark_group("serialize");
    group.bench_function("compact", |b| {
        b.iter(|| black_box(value.to_json_string().unwrap()));
    });
    group.bench_function("indented", |b| {
        b.iter(|| black_box(value.to_json_pretty(2).unwrap()));
    });
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(10));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_parse, bench_serialize }
criterion_main!(benches);
