//! Benchmarks for DSP primitives and the render pass.
//!
//! Run with: cargo bench
//!
//! The audio callback must finish well within the hardware buffer period.
//! Reference deadlines at 44.1kHz:
//!   - 64 samples  = 1.45ms
//!   - 128 samples = 2.90ms
//!   - 256 samples = 5.80ms
//!   - 512 samples = 11.61ms
//!
//! Benchmark groups:
//!   - dsp/*        Oscillator and envelope primitives
//!   - scenarios/*  Full pool render passes with many active voices

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

criterion_group!(
    benches,
    // Low-level DSP primitives
    dsp::bench_oscillator,
    dsp::bench_envelope,
    // Real-world scenarios
    scenarios::bench_pool,
);
criterion_main!(benches);
