use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    config::VoiceConfig,
    dsp::{CompiledEnvelope, EnvelopeError, Oscillator, OscillatorSpec},
    synth::voice::Voice,
};

/// Why a single voice descriptor could not be turned into a [`VoiceSpec`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DescriptorError {
    #[error("oscillator has no `type`")]
    MissingType,
    #[error("oscillator `type` must be a string, got {0}")]
    InvalidType(Value),
    #[error("unknown oscillator type `{0}`")]
    UnknownType(String),
    #[error("sine oscillator must have a `frequency`")]
    MissingFrequency,
    #[error("`frequency` must be a number of at least 1 Hz, got {0}")]
    InvalidFrequency(Value),
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecError {
    #[error("unknown voice name `{0}`")]
    UnknownVoice(String),
    #[error("malformed voice spec `{name}`: {source}")]
    Malformed {
        name: String,
        #[source]
        source: DescriptorError,
    },
}

/// Validated recipe for building voices: a closed oscillator kind plus a compiled envelope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceSpec {
    pub oscillator: OscillatorSpec,
    pub envelope: CompiledEnvelope,
}

impl VoiceSpec {
    pub fn from_config(config: &VoiceConfig, sample_rate: u32) -> Result<Self, DescriptorError> {
        Ok(Self {
            oscillator: parse_oscillator(&config.osc)?,
            envelope: config.env.compile(sample_rate)?,
        })
    }

    pub fn build(&self, sample_rate: u32) -> Voice {
        Voice::new(Oscillator::new(self.oscillator, sample_rate), self.envelope)
    }
}

fn parse_oscillator(descriptor: &Map<String, Value>) -> Result<OscillatorSpec, DescriptorError> {
    let kind = match descriptor.get("type") {
        None => return Err(DescriptorError::MissingType),
        Some(Value::String(kind)) => kind.as_str(),
        Some(other) => return Err(DescriptorError::InvalidType(other.clone())),
    };

    match kind {
        "noise" => Ok(OscillatorSpec::Noise),
        "sine" => {
            let value = descriptor
                .get("frequency")
                .ok_or(DescriptorError::MissingFrequency)?;
            let frequency = value
                .as_f64()
                .filter(|f| f.is_finite() && *f >= 1.0 && *f <= f64::from(u32::MAX))
                .ok_or_else(|| DescriptorError::InvalidFrequency(value.clone()))?;

            // Fractional hertz are truncated
            Ok(OscillatorSpec::Tone {
                frequency_hz: frequency as u32,
            })
        }
        other => Err(DescriptorError::UnknownType(other.to_owned())),
    }
}

type SpecMap = HashMap<String, Result<VoiceSpec, DescriptorError>>;

/// Name → voice recipe table, swapped whole on reload.
///
/// Entries are converted once when a table is installed. A malformed entry is
/// kept alongside its error and only reported when something tries to build it,
/// so one bad voice never hides the good ones.
pub struct VoiceSpecTable {
    specs: Mutex<Arc<SpecMap>>,
    sample_rate: u32,
}

impl VoiceSpecTable {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            specs: Mutex::new(Arc::new(HashMap::new())),
            sample_rate,
        }
    }

    fn snapshot(&self) -> Arc<SpecMap> {
        Arc::clone(&self.specs.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Build a fresh voice (clock at zero) from the named spec.
    pub fn build(&self, name: &str) -> Result<Voice, SpecError> {
        let specs = self.snapshot();
        match specs.get(name) {
            None => Err(SpecError::UnknownVoice(name.to_owned())),
            Some(Ok(spec)) => Ok(spec.build(self.sample_rate)),
            Some(Err(source)) => Err(SpecError::Malformed {
                name: name.to_owned(),
                source: source.clone(),
            }),
        }
    }

    /// Install a new table. Returns the entries that failed to convert; they
    /// stay in the table and fail again on [`VoiceSpecTable::build`].
    pub fn replace<'a, I>(&self, voices: I) -> Vec<SpecError>
    where
        I: IntoIterator<Item = (&'a String, &'a VoiceConfig)>,
    {
        let mut malformed = Vec::new();
        let specs: SpecMap = voices
            .into_iter()
            .map(|(name, config)| {
                let spec = VoiceSpec::from_config(config, self.sample_rate);
                if let Err(source) = &spec {
                    malformed.push(SpecError::Malformed {
                        name: name.clone(),
                        source: source.clone(),
                    });
                }
                (name.clone(), spec)
            })
            .collect();

        *self.specs.lock().unwrap_or_else(PoisonError::into_inner) = Arc::new(specs);
        malformed
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}
