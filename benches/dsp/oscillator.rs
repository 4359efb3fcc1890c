//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use linesound::dsp::{Oscillator, OscillatorSpec};
use linesound::SAMPLE_RATE;

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Tone - modular phase plus sin()
        let mut osc = Oscillator::new(OscillatorSpec::Tone { frequency_hz: 425 }, SAMPLE_RATE);
        let mut elapsed = 0u64;
        group.bench_with_input(BenchmarkId::new("tone", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(elapsed), black_box(&mut buffer));
                elapsed += size as u64;
            })
        });

        // Noise - one PRNG draw per sample
        let mut osc = Oscillator::with_seed(OscillatorSpec::Noise, SAMPLE_RATE, 1);
        group.bench_with_input(BenchmarkId::new("noise", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(0), black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
