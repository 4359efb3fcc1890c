//! One instance of each shared table, wired together.
//!
//! The three tables have independent locks and no method here holds two of
//! them at once. Producers (line input, config reload) and the audio
//! callback share one `Arc<Engine>`.

use crate::{
    config::Config,
    synth::{SpecError, VoicePool, VoiceSpecTable},
    trigger::{TriggerError, TriggerTable},
    SAMPLE_RATE,
};

pub struct Engine {
    pool: VoicePool,
    triggers: TriggerTable,
    specs: VoiceSpecTable,
}

impl Engine {
    /// Empty engine: no triggers, no voices. `max_voices == 0` is unbounded.
    pub fn new(max_voices: usize) -> Self {
        Self {
            pool: VoicePool::new(max_voices),
            triggers: TriggerTable::new(),
            specs: VoiceSpecTable::new(SAMPLE_RATE),
        }
    }

    /// Engine sized by `config.max_voices` with its voices and triggers applied.
    pub fn from_config(config: &Config) -> Result<Self, TriggerError> {
        let engine = Self::new(config.max_voices);
        engine.apply(config)?;
        tracing::info!(
            max_voices = engine.pool.max_voices(),
            sample_rate = engine.specs.sample_rate(),
            "engine ready"
        );
        Ok(engine)
    }

    /// Install the voices and triggers of `config`.
    ///
    /// Voice specs are always swapped in; malformed entries are logged and
    /// fail when triggered. Triggers are all-or-nothing: on a bad pattern the
    /// previous trigger list stays and the error is returned.
    pub fn apply(&self, config: &Config) -> Result<(), TriggerError> {
        for err in self.specs.replace(&config.voices) {
            tracing::warn!("{err}");
        }
        self.triggers.replace(&config.triggers)?;

        tracing::info!(
            voices = config.voices.len(),
            triggers = config.triggers.len(),
            "configuration applied"
        );
        Ok(())
    }

    /// Match one input line and start the voice it triggers.
    ///
    /// Returns the pool slot of the new voice, or `None` if no trigger matched.
    pub fn trigger(&self, line: &[u8]) -> Result<Option<usize>, SpecError> {
        let Some(name) = self.triggers.first_match(line) else {
            return Ok(None);
        };

        let voice = self.specs.build(&name)?;
        let slot = self.pool.insert(voice);
        tracing::debug!(voice = %name, slot, "trigger fired");
        Ok(Some(slot))
    }

    /// Audio callback entry point; see [`VoicePool::render`].
    pub fn render(&self, out: &mut [f32]) {
        self.pool.render(out);
    }

    pub fn pool(&self) -> &VoicePool {
        &self.pool
    }

    pub fn triggers(&self) -> &TriggerTable {
        &self.triggers
    }

    pub fn specs(&self) -> &VoiceSpecTable {
        &self.specs
    }
}
