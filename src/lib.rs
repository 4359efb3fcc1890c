pub mod config; // On-disk configuration and the shipped default
pub mod dsp;
pub mod engine; // Wires the shared tables together
pub mod synth; // Voices, voice specs and the mixing pool
pub mod trigger;

/// Output sample rate in Hz. Every sample-domain quantity is derived from it.
pub const SAMPLE_RATE: u32 = 44_100;
/// Largest block the audio callback renders in one pass.
pub const MAX_BLOCK_SIZE: usize = 2048;
/// Global gain applied to the mix so overlapping voices don't clip.
pub const ATTENUATION: f32 = 0.3;
