use serde::{Deserialize, Serialize};
use thiserror::Error;

/*
ADR Envelope Implementation
===========================

Triggered sounds have no note-off: once a trigger fires, the sound plays its
whole shape and then disappears. So instead of a gated ADSR state machine we
use a fixed attack/decay/release shape that is a pure function of time.


The Shape: Three Linear Segments
--------------------------------

  Level
    A   ┐     ╱╲
        │    ╱  ╲
    D   │   ╱    ╲________
        │  ╱              ╲
    0.0 └─╱────────────────╲──→ Time (samples)
         0   attackEnd  decayEnd  releaseEnd

  attack   0         → attackValue   over attackSeconds
  decay    attackValue → decayValue  over decaySeconds
  release  decayValue  → 0           over releaseSeconds


Compiling to the Sample Domain
------------------------------

The envelope is written in seconds. It is compiled once, when voice specs are
loaded, into three segment end points in samples:

    attackEnd  = sample_rate · attackSeconds
    decayEnd   = attackEnd + sample_rate · decaySeconds
    releaseEnd = decayEnd  + sample_rate · releaseSeconds

plus a line (slope and offset) per segment, so the amplitude at absolute
sample t is a single multiply-add:

    amplitude(t) = slope · t + offset

A zero-length segment has no samples inside it. It is never evaluated, and
the next segment starts at its target value, which is exactly an
instantaneous jump. An empty segment gets slope zero instead of a division
by zero.


Finished
--------

A voice is finished once its elapsed sample count is strictly greater than
releaseEnd. Amplitude from releaseEnd on is already zero, so the strict
comparison only means the pool keeps the voice for one more render pass.
*/

/// Envelope parameters as written in the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeSpec {
    pub attack_seconds: f32,
    pub attack_value: f32,
    pub decay_seconds: f32,
    pub decay_value: f32,
    pub release_seconds: f32,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvelopeError {
    #[error("envelope field `{field}` must be a finite non-negative number, got {value}")]
    InvalidField { field: &'static str, value: f32 },
    #[error("envelope is too long to express in samples")]
    TooLong,
}

/// One straight piece of the envelope, valid for `t < end`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Segment {
    end: u64,
    slope: f64,
    offset: f64,
}

impl Segment {
    /// Line from `(start, from)` to `(end, to)`.
    fn between(start: u64, from: f32, end: u64, to: f32) -> Self {
        let (from, to) = (f64::from(from), f64::from(to));
        let slope = if end > start {
            (to - from) / (end - start) as f64
        } else {
            0.0
        };

        Self {
            end,
            slope,
            offset: from - slope * start as f64,
        }
    }

    #[inline]
    fn level(&self, t: u64) -> f32 {
        (self.slope * t as f64 + self.offset) as f32
    }
}

/// Sample-domain envelope shared by every voice built from the same spec.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompiledEnvelope {
    attack: Segment,
    decay: Segment,
    release: Segment,
}

impl EnvelopeSpec {
    /// Convert to sample-domain segments at `sample_rate`.
    pub fn compile(&self, sample_rate: u32) -> Result<CompiledEnvelope, EnvelopeError> {
        let fields = [
            ("attackSeconds", self.attack_seconds),
            ("attackValue", self.attack_value),
            ("decaySeconds", self.decay_seconds),
            ("decayValue", self.decay_value),
            ("releaseSeconds", self.release_seconds),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(EnvelopeError::InvalidField { field, value });
            }
        }

        let to_samples = |seconds: f32| (f64::from(sample_rate) * f64::from(seconds)).round() as u64;

        // Huge but finite durations saturate in `to_samples`; the sums must not wrap
        let attack_end = to_samples(self.attack_seconds);
        let decay_end = attack_end
            .checked_add(to_samples(self.decay_seconds))
            .ok_or(EnvelopeError::TooLong)?;
        let release_end = decay_end
            .checked_add(to_samples(self.release_seconds))
            .ok_or(EnvelopeError::TooLong)?;

        Ok(CompiledEnvelope {
            attack: Segment::between(0, 0.0, attack_end, self.attack_value),
            decay: Segment::between(attack_end, self.attack_value, decay_end, self.decay_value),
            release: Segment::between(decay_end, self.decay_value, release_end, 0.0),
        })
    }
}

impl CompiledEnvelope {
    /// Amplitude at absolute sample `t`.
    #[inline]
    pub fn amplitude(&self, t: u64) -> f32 {
        if t < self.attack.end {
            self.attack.level(t)
        } else if t < self.decay.end {
            self.decay.level(t)
        } else if t < self.release.end {
            self.release.level(t)
        } else {
            0.0
        }
    }

    /// Multiply `buffer` in place, treating `buffer[0]` as sample `elapsed`.
    pub fn apply(&self, elapsed: u64, buffer: &mut [f32]) {
        for (i, sample) in buffer.iter_mut().enumerate() {
            *sample *= self.amplitude(elapsed + i as u64);
        }
    }

    /// True once `elapsed` has moved past the end of the release segment.
    pub fn done(&self, elapsed: u64) -> bool {
        elapsed > self.release.end
    }

    pub fn attack_end(&self) -> u64 {
        self.attack.end
    }

    pub fn decay_end(&self) -> u64 {
        self.decay.end
    }

    pub fn release_end(&self) -> u64 {
        self.release.end
    }
}
