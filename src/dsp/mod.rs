//! Low-level DSP primitives used by voices and the mixing pool.
//!
//! Everything here renders into caller-provided buffers and never allocates,
//! so it is safe to call from inside the audio callback. The envelope and
//! oscillator are driven by an absolute sample clock owned by the voice.

/// Attack/decay/release envelope, compiled to sample-domain segments.
pub mod envelope;
/// Block summing and gain.
pub mod mix;
/// Noise and tone sources.
pub mod oscillator;

pub use envelope::{CompiledEnvelope, EnvelopeError, EnvelopeSpec};
pub use oscillator::{Oscillator, OscillatorSpec};
