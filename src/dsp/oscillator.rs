use std::f64::consts::TAU;

/*
Trigger Oscillators
===================

A triggered sound only needs two raw sources: a burst of noise (clicks,
geiger ticks, hiss) or a pure tone (beeps, dial tones). The envelope shapes
either one afterwards.

Noise
-----

Uniform white noise in [-1, 1). Every voice owns its own generator so
concurrent voices are uncorrelated and nothing is shared between threads.

Tone
----

A sine at an integer frequency. The phase is NOT accumulated per sample; it
is derived from the absolute sample clock of the voice:

    phase(t) = 2π · f · t / sample_rate

so rendering 2N samples at once and rendering N samples twice produce the
same waveform. Buffer boundaries are invisible.

Long-lived voices would lose precision if we multiplied f · t in floating
point, so the product is reduced modulo the sample rate first. Because both
f and t are integers this is exact:

    (f · t) mod sr = ((f mod sr) · (t mod sr)) mod sr

and phase(t) = 2π · ((f · t) mod sr) / sr differs from the naive formula by
whole turns only.
*/

/// What an oscillator generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscillatorSpec {
    Noise,
    Tone { frequency_hz: u32 },
}

/// A running oscillator instance, owned by exactly one voice.
pub struct Oscillator {
    spec: OscillatorSpec,
    sample_rate: u32,
    rng: fastrand::Rng,
}

impl Oscillator {
    pub fn new(spec: OscillatorSpec, sample_rate: u32) -> Self {
        Self {
            spec,
            sample_rate,
            rng: fastrand::Rng::new(),
        }
    }

    /// Same as [`Oscillator::new`] but with a deterministic noise sequence.
    pub fn with_seed(spec: OscillatorSpec, sample_rate: u32, seed: u64) -> Self {
        Self {
            spec,
            sample_rate,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn spec(&self) -> OscillatorSpec {
        self.spec
    }

    /// Fill `out` with the waveform starting at absolute sample `elapsed`.
    pub fn render(&mut self, elapsed: u64, out: &mut [f32]) {
        match self.spec {
            OscillatorSpec::Noise => {
                for sample in out.iter_mut() {
                    *sample = self.rng.f32() * 2.0 - 1.0;
                }
            }
            OscillatorSpec::Tone { frequency_hz } => {
                let sr = u64::from(self.sample_rate.max(1));
                let freq = u64::from(frequency_hz) % sr;
                let mut t = elapsed % sr;
                for sample in out.iter_mut() {
                    let turns = (freq * t) % sr;
                    *sample = (TAU * turns as f64 / sr as f64).sin() as f32;
                    t += 1;
                    if t == sr {
                        t = 0;
                    }
                }
            }
        }
    }

    /// Allocating variant of [`Oscillator::render`].
    pub fn samples(&mut self, elapsed: u64, count: usize) -> Vec<f32> {
        let mut out = vec![0.0; count];
        self.render(elapsed, &mut out);
        out
    }
}
