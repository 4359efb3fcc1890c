//! Real-world scenario benchmarks.
//!
//! These model the audio callback: a pool full of triggered voices rendered
//! one hardware buffer at a time.

mod pool;

pub use pool::bench_pool;
