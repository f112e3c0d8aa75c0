#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};

use jksn::prelude::*;

const N_BIG_ARR: usize = 2000;

fn big_arr() -> Value {
    let v: Vec<Value> = (0..N_BIG_ARR).map(|i| Value::from(i as i64 * 37)).collect();
    Value::from(v)
}

const N_ROWS: usize = 200;

/// Rows of a table, the shape column storage is for.
fn table() -> Value {
    let rows: Vec<Value> = (0..N_ROWS)
        .map(|i| {
            let mut m = VecMap::new();
            m.insert(Value::from("id"), Value::from(i));
            m.insert(Value::from("name"), Value::from(format!("user{}", i % 17)));
            m.insert(Value::from("score"), Value::from(i as f64 / 3.0));
            m.insert(Value::from("tags"), Value::from(vec!["alpha", "beta"]));
            Value::Map(m)
        })
        .collect();
    Value::from(rows)
}

fn bench_construction(c: &mut Criterion) {
    c.bench_function(
        &format!("Creating a table of size {}", encode_full(&table()).len()),
        |b| b.iter(|| black_box(table())),
    );
}

fn bench_enc(c: &mut Criterion) {
    let table = table();
    let enc_len = encode_full(&table).len();
    c.bench_function(
        &format!("Encoding a table, output size of {} bytes", enc_len),
        move |b| b.iter(|| encode_full(black_box(&table))),
    );
}

fn bench_enc_plain(c: &mut Criterion) {
    let table = table();
    let enc_len = Encoder::with_config(EncoderConfig::plain()).encode(&table).len();
    c.bench_function(
        &format!("Encoding a table without optimizations, output size of {} bytes", enc_len),
        move |b| {
            b.iter(|| Encoder::with_config(EncoderConfig::plain()).encode(black_box(&table)))
        },
    );
}

fn bench_enc_single_alloc(c: &mut Criterion) {
    let table = table();
    let enc_len = encode_full(&table).len();
    c.bench_function(
        &format!(
            "Encoding a table, output size of {} bytes, buffer preallocated",
            enc_len
        ),
        move |b| {
            b.iter(|| {
                let mut out = Vec::with_capacity(enc_len * 2);
                encode(black_box(&table), &mut out);
                out
            })
        },
    );
}

fn bench_dec(c: &mut Criterion) {
    let enc = encode_full(&table());
    c.bench_function(
        &format!("Decoding a table, input size of {} bytes", enc.len()),
        move |b| b.iter(|| decode(black_box(&enc)).unwrap()),
    );
}

fn bench_enc_flat(c: &mut Criterion) {
    let big_arr = big_arr();
    let enc_len = encode_full(&big_arr).len();
    c.bench_function(
        &format!("Encoding an integer array, output size of {} bytes", enc_len),
        move |b| b.iter(|| encode_full(black_box(&big_arr))),
    );
}

fn bench_dec_flat(c: &mut Criterion) {
    let enc = encode_full(&big_arr());
    c.bench_function(
        &format!("Decoding an integer array of {} bytes", enc.len()),
        move |b| b.iter(|| decode(black_box(&enc)).unwrap()),
    );
}

criterion_group!(
    benches,
    bench_construction,
    bench_enc,
    bench_enc_plain,
    bench_enc_single_alloc,
    bench_dec,
    bench_enc_flat,
    bench_dec_flat
);
criterion_main!(benches);
