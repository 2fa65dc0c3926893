use criterion::{black_box, criterion_group, criterion_main, Criterion};
use weighted_seats::generator::{generate, SyntheticSettings};
use weighted_seats::quota::{compute_quotas, QuotaOptions};

fn quota_benchmark(c: &mut Criterion) {
    let mut settings = SyntheticSettings::preset(2).expect("preset 2 exists");
    settings.elections = 1;
    let instance = generate(&settings).expect("valid preset").remove(0);
    let options = QuotaOptions::default();

    c.bench_function("quotas, 10 parties x 100 seats", |b| {
        b.iter(|| compute_quotas(black_box(&instance), &options).unwrap())
    });
}

criterion_group!(benches, quota_benchmark);
criterion_main!(benches);
