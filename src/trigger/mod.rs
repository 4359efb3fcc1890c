//! Line → voice-name matching.
//!
//! Patterns are byte regexes so input lines don't have to be valid UTF-8.
//! The table is ordered and the first matching pattern wins.

use std::sync::{Arc, Mutex, PoisonError};

use regex::bytes::Regex;
use thiserror::Error;

use crate::config::TriggerConfig;

#[derive(Debug, Clone, Error)]
pub enum TriggerError {
    #[error("trigger {index}: invalid regex `{pattern}`: {source}")]
    InvalidPattern {
        index: usize,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Trigger {
    pattern: Regex,
    voice: String,
}

impl Trigger {
    pub fn new(pattern: &str, voice: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            voice: voice.into(),
        })
    }

    pub fn is_match(&self, line: &[u8]) -> bool {
        self.pattern.is_match(line)
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn voice(&self) -> &str {
        &self.voice
    }
}

/// Ordered trigger list, replaced whole on reload.
#[derive(Default)]
pub struct TriggerTable {
    triggers: Mutex<Arc<Vec<Trigger>>>,
}

impl TriggerTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn snapshot(&self) -> Arc<Vec<Trigger>> {
        Arc::clone(&self.triggers.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Voice name of the first trigger whose pattern matches `line`.
    pub fn first_match(&self, line: &[u8]) -> Option<String> {
        self.snapshot()
            .iter()
            .find(|trigger| trigger.is_match(line))
            .map(|trigger| trigger.voice.clone())
    }

    /// Compile every pattern, then swap the table in one step.
    ///
    /// If any pattern fails to compile nothing is applied and the previous
    /// table stays active.
    pub fn replace(&self, configs: &[TriggerConfig]) -> Result<(), TriggerError> {
        let triggers = configs
            .iter()
            .enumerate()
            .map(|(index, config)| {
                Trigger::new(&config.regex, config.voice.as_str()).map_err(|source| {
                    TriggerError::InvalidPattern {
                        index,
                        pattern: config.regex.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        *self.triggers.lock().unwrap_or_else(PoisonError::into_inner) = Arc::new(triggers);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}
