use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{
    dsp::mix::{apply_gain, sum_in_place},
    synth::voice::Voice,
    ATTENUATION, MAX_BLOCK_SIZE,
};

/// The mixing engine: a slot list of active voices behind one short-held lock.
///
/// The audio callback calls [`VoicePool::render`]; trigger handling calls
/// [`VoicePool::insert`] from another thread. Freed slots are reused before
/// the list grows.
pub struct VoicePool {
    state: Mutex<PoolState>,
    max_voices: usize,
}

struct PoolState {
    slots: Vec<Option<Voice>>,
    temp_buffer: Vec<f32>,
}

impl VoicePool {
    /// `max_voices == 0` leaves the pool unbounded.
    pub fn new(max_voices: usize) -> Self {
        Self {
            state: Mutex::new(PoolState {
                slots: Vec::with_capacity(max_voices),
                temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
            }),
            max_voices,
        }
    }

    fn lock(&self) -> MutexGuard<'_, PoolState> {
        // Voices hold no invariants a panicking holder could break halfway.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Place a voice in the first free slot, appending if none is free.
    ///
    /// Once `max_voices` voices are sounding the oldest one is replaced.
    /// Returns the slot index used.
    pub fn insert(&self, voice: Voice) -> usize {
        let mut state = self.lock();

        if let Some(idx) = state.slots.iter().position(Option::is_none) {
            state.slots[idx] = Some(voice);
            return idx;
        }

        if self.max_voices == 0 || state.slots.len() < self.max_voices {
            state.slots.push(Some(voice));
            return state.slots.len() - 1;
        }

        // Full: steal the voice that has been playing longest
        let steal_idx = state
            .slots
            .iter()
            .enumerate()
            .max_by_key(|(_, slot)| slot.as_ref().map_or(0, Voice::elapsed))
            .map_or(0, |(idx, _)| idx);

        tracing::debug!(slot = steal_idx, "voice pool full, stealing oldest voice");
        state.slots[steal_idx] = Some(voice);
        steal_idx
    }

    /// Mix every active voice into `out`, reap the finished ones and attenuate.
    ///
    /// Always fills all of `out`; an empty pool yields silence.
    pub fn render(&self, out: &mut [f32]) {
        out.fill(0.0);

        let mut state = self.lock();
        let PoolState { slots, temp_buffer } = &mut *state;

        if temp_buffer.len() < out.len() {
            temp_buffer.resize(out.len(), 0.0);
        }
        let block = &mut temp_buffer[..out.len()];

        for slot in slots.iter_mut() {
            let Some(voice) = slot else { continue };

            voice.render(block);
            sum_in_place(out, block);

            if voice.is_finished() {
                *slot = None;
            }
        }
        drop(state);

        apply_gain(out, ATTENUATION);
    }

    /// Allocating variant of [`VoicePool::render`].
    pub fn render_samples(&self, count: usize) -> Vec<f32> {
        let mut out = vec![0.0; count];
        self.render(&mut out);
        out
    }

    /// Number of occupied slots.
    pub fn active_voices(&self) -> usize {
        self.lock().slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Number of slots, occupied or not.
    pub fn slot_count(&self) -> usize {
        self.lock().slots.len()
    }

    pub fn max_voices(&self) -> usize {
        self.max_voices
    }
}

impl Default for VoicePool {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::{CompiledEnvelope, EnvelopeSpec, Oscillator, OscillatorSpec};

    const SAMPLE_RATE: u32 = 44_100;

    fn envelope(release: f32) -> CompiledEnvelope {
        EnvelopeSpec {
            attack_seconds: 0.0,
            attack_value: 1.0,
            decay_seconds: 0.0,
            decay_value: 1.0,
            release_seconds: release,
        }
        .compile(SAMPLE_RATE)
        .unwrap()
    }

    fn tone(release: f32) -> Voice {
        let osc = Oscillator::new(OscillatorSpec::Tone { frequency_hz: 425 }, SAMPLE_RATE);
        Voice::new(osc, envelope(release))
    }

    #[test]
    fn empty_pool_renders_exact_silence() {
        let pool = VoicePool::default();
        assert_eq!(pool.max_voices(), 0);
        for count in [0, 1, 64, 4_096] {
            let block = pool.render_samples(count);
            assert_eq!(block.len(), count);
            assert!(block.iter().all(|s| *s == 0.0));
        }
    }

    #[test]
    fn mix_is_attenuated_sum() {
        let pool = VoicePool::default();
        pool.insert(tone(1.0));
        pool.insert(tone(1.0));

        let mixed = pool.render_samples(64);
        let single = tone(1.0).render_samples(64);

        for (m, s) in mixed.iter().zip(&single) {
            assert!((m - 2.0 * s * ATTENUATION).abs() < 1e-6);
        }
    }

    #[test]
    fn finished_voices_are_reaped() {
        let pool = VoicePool::default();
        pool.insert(tone(0.0));
        assert_eq!(pool.active_voices(), 1);

        pool.render_samples(16);
        assert_eq!(pool.active_voices(), 0);
        assert_eq!(pool.slot_count(), 1);
    }

    #[test]
    fn reaped_slot_is_reused() {
        let pool = VoicePool::default();
        assert_eq!(pool.insert(tone(0.0)), 0);
        assert_eq!(pool.insert(tone(1.0)), 1);

        pool.render_samples(16);
        assert_eq!(pool.active_voices(), 1);

        assert_eq!(pool.insert(tone(1.0)), 0);
        assert_eq!(pool.slot_count(), 2);
    }

    #[test]
    fn full_pool_steals_oldest_voice() {
        let pool = VoicePool::new(2);
        assert_eq!(pool.max_voices(), 2);
        pool.insert(tone(1.0));
        pool.render_samples(128);
        pool.insert(tone(1.0));
        pool.render_samples(64);

        // slot 0 has played 192 samples, slot 1 only 64
        assert_eq!(pool.insert(tone(1.0)), 0);
        assert_eq!(pool.slot_count(), 2);
        assert_eq!(pool.active_voices(), 2);
    }

    #[test]
    fn blocks_larger_than_max_block_size_are_rendered() {
        let pool = VoicePool::default();
        pool.insert(tone(1.0));

        let block = pool.render_samples(MAX_BLOCK_SIZE * 2 + 3);
        assert_eq!(block.len(), MAX_BLOCK_SIZE * 2 + 3);
        assert!(block.iter().any(|s| s.abs() > 0.0));
    }
}
