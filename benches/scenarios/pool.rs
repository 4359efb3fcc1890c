//! Benchmarks for the voice pool render pass.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use linesound::dsp::{EnvelopeSpec, OscillatorSpec};
use linesound::synth::{VoicePool, VoiceSpec};
use linesound::SAMPLE_RATE;

use crate::BLOCK_SIZES;

/// Voice counts: a quiet log, a busy one, and the default `maxVoices`.
const VOICE_COUNTS: &[usize] = &[1, 10, 50];

fn spec(oscillator: OscillatorSpec) -> VoiceSpec {
    // Long enough that no voice is reaped while benchmarking
    let envelope = EnvelopeSpec {
        attack_seconds: 0.01,
        attack_value: 1.0,
        decay_seconds: 3_600.0,
        decay_value: 0.8,
        release_seconds: 1.0,
    }
    .compile(SAMPLE_RATE)
    .unwrap();

    VoiceSpec {
        oscillator,
        envelope,
    }
}

pub fn bench_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/pool");
    let tone = spec(OscillatorSpec::Tone { frequency_hz: 425 });
    let noise = spec(OscillatorSpec::Noise);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for &voices in VOICE_COUNTS {
            // Half tones, half noise - like the default geiger/phone config
            let pool = VoicePool::new(0);
            for i in 0..voices {
                let spec = if i % 2 == 0 { tone } else { noise };
                pool.insert(spec.build(SAMPLE_RATE));
            }

            let id = BenchmarkId::new(format!("{voices}_voices"), size);
            group.bench_with_input(id, &size, |b, _| {
                b.iter(|| {
                    pool.render(black_box(&mut buffer));
                })
            });
        }
    }

    group.finish();
}
