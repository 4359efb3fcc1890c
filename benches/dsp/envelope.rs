//! Benchmarks for the compiled ADR envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use linesound::dsp::EnvelopeSpec;
use linesound::SAMPLE_RATE;

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let env = EnvelopeSpec {
        attack_seconds: 0.1,
        attack_value: 1.0,
        decay_seconds: 0.1,
        decay_value: 0.5,
        release_seconds: 0.3,
    }
    .compile(SAMPLE_RATE)
    .unwrap();

    for &size in BLOCK_SIZES {
        let mut buffer = vec![1.0f32; size];

        // Attack segment (first branch)
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter(|| {
                env.apply(black_box(0), black_box(&mut buffer));
            })
        });

        // Release segment (last branch)
        let release_start = env.decay_end();
        group.bench_with_input(BenchmarkId::new("release", size), &size, |b, _| {
            b.iter(|| {
                env.apply(black_box(release_start), black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
