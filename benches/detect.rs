//! A benchmark for the Latin-1 detectors.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use strcompress::detect::{is_latin1_scalar, is_latin1_wide};
use strcompress::utils::text;

fn get_latin_string(items: usize) -> Vec<u16> {
    let mut rng = StdRng::seed_from_u64(0);
    text::random_latin1(items, &mut rng)
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let short = get_latin_string(85);
    let long = get_latin_string(100_000);

    c.bench_function("scalar check", |b| {
        b.iter(|| is_latin1_scalar(black_box(&short)))
    });
    c.bench_function("wide word check", |b| {
        b.iter(|| is_latin1_wide(black_box(&short)))
    });
    c.bench_function("scalar check large", |b| {
        b.iter(|| is_latin1_scalar(black_box(&long)))
    });
    c.bench_function("wide word check large", |b| {
        b.iter(|| is_latin1_wide(black_box(&long)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
