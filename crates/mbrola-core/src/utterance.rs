//! Utterance - the unit handed to the synthesizer
//!
//! An utterance holds the four fields as the caller gave them. It is checked
//! once by [`validate_mbrola_args`] and turned into a [`CanonicalUtterance`]
//! by [`Utterance::normalize`]; neither mutates it.

use serde::{Deserialize, Serialize};

use crate::phon::check_arity;
use crate::silences::{check_positive, silence_ms, silence_pair};
use crate::{
    DurationVector, MbrolaError, MbrolaResult, OuterSilences, PhonemeSequence, PitchVector,
    Validator, Value,
};

/// Default duration of every phoneme, in ms
pub const DEFAULT_DURATION_MS: i64 = 100;

/// Default flat pitch, in Hz
pub const DEFAULT_PITCH_HZ: i64 = 200;

/// Default onset and offset silence, in ms
pub const DEFAULT_OUTER_SILENCE_MS: i64 = 1;

/// Raw synthesis request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    /// A word or an explicit phoneme list
    pub phon: Value,

    /// One duration, or one per phoneme
    #[serde(default = "default_durations")]
    pub durations: Value,

    /// One pitch, or one target per phoneme
    #[serde(default = "default_pitch")]
    pub pitch: Value,

    /// (onset, offset) pair
    #[serde(default = "default_outer_silences")]
    pub outer_silences: Value,
}

fn default_durations() -> Value {
    Value::Int(DEFAULT_DURATION_MS)
}

fn default_pitch() -> Value {
    Value::Int(DEFAULT_PITCH_HZ)
}

fn default_outer_silences() -> Value {
    Value::from((DEFAULT_OUTER_SILENCE_MS, DEFAULT_OUTER_SILENCE_MS))
}

impl Utterance {
    /// Utterance with default durations, pitch and silences
    pub fn new(phon: impl Into<Value>) -> Self {
        Self {
            phon: phon.into(),
            durations: default_durations(),
            pitch: default_pitch(),
            outer_silences: default_outer_silences(),
        }
    }

    pub fn with_durations(mut self, durations: impl Into<Value>) -> Self {
        self.durations = durations.into();
        self
    }

    pub fn with_pitch(mut self, pitch: impl Into<Value>) -> Self {
        self.pitch = pitch.into();
        self
    }

    pub fn with_outer_silences(mut self, outer_silences: impl Into<Value>) -> Self {
        self.outer_silences = outer_silences.into();
        self
    }

    /// Gate, then canonicalize every field in order
    pub fn normalize(&self, validator: &Validator) -> MbrolaResult<CanonicalUtterance> {
        validator.mbrola_args(self)?;

        let word = match &self.phon {
            Value::Str(_) => Some(validator.word(&self.phon)?),
            _ => None,
        };
        let phon = validator.phon(&self.phon)?;
        let durations = validator.durations(&phon, &self.durations)?;
        let pitch = validator.pitch(&phon, &self.pitch)?;
        let outer_silences = validator.outer_silences(&self.outer_silences)?;

        tracing::debug!(
            phonemes = phon.len(),
            total_ms = durations.total_ms().saturating_add(outer_silences.total_ms()),
            "utterance normalized"
        );

        Ok(CanonicalUtterance {
            word,
            phon,
            durations,
            pitch,
            outer_silences,
        })
    }
}

/// A validated utterance: every per-phoneme vector has the phoneme count
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalUtterance {
    /// Source word, when the phonemes were spelled from one
    pub word: Option<String>,
    pub phon: PhonemeSequence,
    pub durations: DurationVector,
    pub pitch: PitchVector,
    pub outer_silences: OuterSilences,
}

impl CanonicalUtterance {
    /// Total length including silences, in ms, saturating at the `i64` bounds
    pub fn total_ms(&self) -> i64 {
        self.durations
            .total_ms()
            .saturating_add(self.outer_silences.total_ms())
    }

    /// Phonemes zipped with their duration and contour
    pub fn segments(&self) -> impl Iterator<Item = (&str, i64, &[i64])> + '_ {
        self.phon
            .iter()
            .zip(self.durations.iter())
            .zip(self.pitch.iter())
            .map(|((ph, d), contour)| (ph.as_str(), *d, contour.as_slice()))
    }
}

impl Validator {
    /// Structural gate over an utterance; returns nothing on success
    ///
    /// Order: phon/durations parity, phon/pitch parity, onset silence,
    /// offset silence. Scalar durations and pitch skip the parity checks.
    pub fn mbrola_args(&self, utterance: &Utterance) -> MbrolaResult<()> {
        let nphon = phoneme_count(&utterance.phon)?;

        if let Some(durations) = utterance.durations.as_list() {
            check_arity("durations", nphon, durations.len())?;
        }
        if let Some(pitch) = utterance.pitch.as_list() {
            check_arity("pitch", nphon, pitch.len())?;
        }

        let (onset, offset) = silence_pair(&utterance.outer_silences)?;
        check_positive("onset_silence", silence_ms("onset_silence", onset)?)?;
        check_positive("offset_silence", silence_ms("offset_silence", offset)?)?;
        Ok(())
    }
}

fn phoneme_count(phon: &Value) -> MbrolaResult<usize> {
    match phon {
        Value::Str(word) => Ok(word.chars().count()),
        Value::List(items) | Value::Tuple(items) => Ok(items.len()),
        other => Err(MbrolaError::type_mismatch(
            "phon",
            "a string or a list of phonemes",
            other.kind(),
        )
        .logged()),
    }
}

/// Gate an utterance under the default configuration
pub fn validate_mbrola_args(utterance: &Utterance) -> MbrolaResult<()> {
    Validator::default().mbrola_args(utterance)
}
