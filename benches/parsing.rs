use billing_json::parser::Parser;
use criterion::{criterion_group, criterion_main, Criterion};

macro_rules! build_parse_benchmark {
    ($func : tt, $filename : expr) => {
        fn $func() {
            let parser = Parser::default();
            let _ = parser.parse_file(format!("fixtures/json/valid/{}.json", $filename));
        }
    };
}

build_parse_benchmark!(customer, "customer");
build_parse_benchmark!(subscriptions, "subscriptions");
build_parse_benchmark!(components, "components");

fn benchmark_customer(c: &mut Criterion) {
    c.bench_function("parse of customer", |b| b.iter(customer));
}

fn benchmark_subscriptions(c: &mut Criterion) {
    c.bench_function("parse of subscriptions", |b| b.iter(subscriptions));
}

fn benchmark_components(c: &mut Criterion) {
    c.bench_function("parse of components", |b| b.iter(components));
}

criterion_group!(
    benches,
    benchmark_customer,
    benchmark_subscriptions,
    benchmark_components
);
criterion_main!(benches);
