use billing_json::scanner::Cursor;
use criterion::{criterion_group, criterion_main, Criterion};
use pprof::criterion::{Output, PProfProfiler};
use std::fs;

fn scan(text: &str) {
    let mut cursor = Cursor::new(text);
    loop {
        cursor.skip_whitespace();
        if cursor.next_char().is_none() {
            break;
        }
    }
}

fn benchmark(c: &mut Criterion) {
    let text = fs::read_to_string("fixtures/json/valid/subscriptions.json").unwrap();
    c.bench_function("scan subscriptions", |b| b.iter(|| scan(&text)));
}

criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = benchmark
}
criterion_main!(benches);
