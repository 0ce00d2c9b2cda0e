use criterion::{black_box, criterion_group, criterion_main, Criterion};
use playhead::{format_progress, progress_percent};

fn bench_format_progress(c: &mut Criterion) {
    c.bench_function("format_progress_under_hour", |b| {
        b.iter(|| format_progress(black_box(754.3)))
    });

    c.bench_function("format_progress_over_hour", |b| {
        b.iter(|| format_progress(black_box(7325.0)))
    });
}

fn bench_progress_percent(c: &mut Criterion) {
    c.bench_function("progress_percent", |b| {
        b.iter(|| progress_percent(black_box(42.5), black_box(120.0)))
    });
}

criterion_group!(benches, bench_format_progress, bench_progress_percent);
criterion_main!(benches);
