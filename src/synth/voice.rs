use crate::dsp::{CompiledEnvelope, Oscillator};

/// One sounding instance: an oscillator shaped by an envelope, on its own clock.
pub struct Voice {
    oscillator: Oscillator,
    envelope: CompiledEnvelope,
    elapsed: u64,
}

impl Voice {
    pub fn new(oscillator: Oscillator, envelope: CompiledEnvelope) -> Self {
        Self {
            oscillator,
            envelope,
            elapsed: 0,
        }
    }

    /// Render the next `out.len()` samples and advance the clock.
    pub fn render(&mut self, out: &mut [f32]) {
        self.oscillator.render(self.elapsed, out);
        self.envelope.apply(self.elapsed, out);
        self.elapsed += out.len() as u64;
    }

    /// Allocating variant of [`Voice::render`].
    pub fn render_samples(&mut self, count: usize) -> Vec<f32> {
        let mut out = vec![0.0; count];
        self.render(&mut out);
        out
    }

    /// Checked after rendering, so the pass that crosses the end still plays its tail.
    pub fn is_finished(&self) -> bool {
        self.envelope.done(self.elapsed)
    }

    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }
}
