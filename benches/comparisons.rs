#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};
use jksn::prelude::*;
use serde_json::json;

fn document() -> serde_json::Value {
    let rows: Vec<serde_json::Value> = (0..100)
        .map(|i| json!({"id": 1_000_000 + i, "name": format!("row{}", i % 7), "ok": i % 2 == 0}))
        .collect();
    json!({ "rows": rows, "total": 100 })
}

fn jksn_i64_encode(c: &mut Criterion) {
    c.bench_function("JKSN i64 encode", |b| {
        let k = Value::from(1_000_000i64);
        b.iter(|| encode_full(black_box(&k)))
    });
}

fn json_i64_encode(c: &mut Criterion) {
    c.bench_function("JSON i64 encode", |b| {
        b.iter(|| serde_json::to_string(&black_box(1_000_000i64)))
    });
}

fn jksn_i64_decode(c: &mut Criterion) {
    c.bench_function("JKSN i64 decode", |b| {
        let buf = encode_full(&Value::from(1_000_000i64));
        b.iter(|| decode(black_box(&buf)))
    });
}

fn json_i64_decode(c: &mut Criterion) {
    c.bench_function("JSON i64 decode", |b| {
        b.iter(|| serde_json::from_str::<i64>(black_box("1000000")))
    });
}

fn jksn_str_encode(c: &mut Criterion) {
    c.bench_function("JKSN blob encode", |b| {
        let s: Vec<u8> = (0..10_000).map(|x| x as u8).collect();
        let k = Value::Blob(Bytes::from(s));
        b.iter(|| encode_full(black_box(&k)))
    });
}

fn json_str_encode(c: &mut Criterion) {
    c.bench_function("JSON byte array encode", |b| {
        let s: Vec<u8> = (0..10_000).map(|x| x as u8).collect();
        b.iter(|| serde_json::to_string(&black_box(&s)))
    });
}

fn jksn_document_encode(c: &mut Criterion) {
    let k = Value::from(document());
    let len = encode_full(&k).len();
    c.bench_function(&format!("JKSN document encode, {} bytes", len), move |b| {
        b.iter(|| encode_full(black_box(&k)))
    });
}

fn json_document_encode(c: &mut Criterion) {
    let doc = document();
    let len = serde_json::to_vec(&doc).map(|v| v.len()).unwrap_or(0);
    c.bench_function(&format!("JSON document encode, {} bytes", len), move |b| {
        b.iter(|| serde_json::to_vec(black_box(&doc)))
    });
}

criterion_group!(
    benches,
    jksn_i64_encode,
    json_i64_encode,
    jksn_i64_decode,
    json_i64_decode,
    jksn_str_encode,
    json_str_encode,
    jksn_document_encode,
    json_document_encode,
);

criterion_main!(benches);
