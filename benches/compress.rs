//! Benchmarks for moving encoded strings into an off-heap buffer.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use strcompress::utils::text;
use strcompress::{compress_direct, Encoding, MemoryBuffer, StringCompressor};

const BUFFER_SIZE: usize = 256;

fn get_inputs() -> (Vec<u16>, Vec<u16>) {
    let mut rng = StdRng::seed_from_u64(0);
    let utf16 = text::mixed(64, &mut rng);
    let latin = text::random_latin1(utf16.len(), &mut rng);
    (latin, utf16)
}

/// Stage the string in a scratch array and copy it with one bulk write.
fn compress_staged(
    chars: &[u16],
    compressor: &mut StringCompressor,
    dest: &mut MemoryBuffer,
    encoding: Encoding,
) {
    dest.set_writer_index(0);
    let written = compressor.compress(chars, dest, encoding).unwrap();
    black_box(written);
}

/// Store every byte at its offset in the buffer.
fn compress_in_place(
    chars: &[u16],
    dest: &mut MemoryBuffer,
    encoding: Encoding,
) {
    let written = compress_direct(chars, dest, 0, encoding).unwrap();
    black_box(written);
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let (latin, utf16) = get_inputs();
    let mut compressor = StringCompressor::with_capacity(BUFFER_SIZE);
    let mut memory = vec![0u8; BUFFER_SIZE];
    let mut dest = MemoryBuffer::from_slice(&mut memory).unwrap();

    c.bench_function("compress latin chars via heap scratch", |b| {
        b.iter(|| {
            compress_staged(
                &latin,
                &mut compressor,
                &mut dest,
                Encoding::Latin1,
            )
        })
    });
    c.bench_function("compress latin chars to off-heap", |b| {
        b.iter(|| compress_in_place(&latin, &mut dest, Encoding::Latin1))
    });
    c.bench_function("compress utf16 chars via heap scratch", |b| {
        b.iter(|| {
            compress_staged(
                &utf16,
                &mut compressor,
                &mut dest,
                Encoding::Utf16,
            )
        })
    });
    c.bench_function("compress utf16 chars to off-heap", |b| {
        b.iter(|| compress_in_place(&utf16, &mut dest, Encoding::Utf16))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
