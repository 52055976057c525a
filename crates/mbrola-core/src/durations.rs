//! Phoneme durations
//!
//! A single duration is broadcast to every phoneme; an explicit list must
//! carry exactly one integer per phoneme.

use crate::phon::check_arity;
use crate::{MbrolaError, MbrolaResult, PhonemeSequence, Validator, Value};

/// Durations as the caller gave them, after type discrimination
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DurationSpec {
    /// One duration in ms for every phoneme
    Scalar(i64),
    /// One duration in ms per phoneme
    PerPhoneme(Vec<i64>),
}

impl DurationSpec {
    /// Broadcast or arity-check against the phoneme count
    pub fn normalize(self, count: usize) -> MbrolaResult<DurationVector> {
        match self {
            DurationSpec::Scalar(ms) => {
                tracing::trace!(ms, count, "broadcasting duration");
                Ok(DurationVector(vec![ms; count]))
            }
            DurationSpec::PerPhoneme(values) => {
                check_arity("durations", count, values.len())?;
                Ok(DurationVector(values))
            }
        }
    }
}

impl TryFrom<&Value> for DurationSpec {
    type Error = MbrolaError;

    fn try_from(value: &Value) -> MbrolaResult<Self> {
        match value {
            Value::Int(ms) => Ok(DurationSpec::Scalar(*ms)),
            Value::List(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    item.as_int().ok_or_else(|| {
                        MbrolaError::type_mismatch(
                            format!("durations[{}]", i),
                            "an integer",
                            item.kind(),
                        )
                        .logged()
                    })
                })
                .collect::<MbrolaResult<Vec<_>>>()
                .map(DurationSpec::PerPhoneme),
            other => Err(MbrolaError::type_mismatch(
                "durations",
                "an integer or a list of integers",
                other.kind(),
            )
            .logged()),
        }
    }
}

/// One duration in ms per phoneme
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DurationVector(Vec<i64>);

impl DurationVector {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, i64> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    /// Sum of all phoneme durations in ms, saturating at the `i64` bounds
    pub fn total_ms(&self) -> i64 {
        self.0.iter().fold(0i64, |total, ms| total.saturating_add(*ms))
    }

    pub fn into_inner(self) -> Vec<i64> {
        self.0
    }
}

impl PartialEq<Vec<i64>> for DurationVector {
    fn eq(&self, other: &Vec<i64>) -> bool {
        &self.0 == other
    }
}

impl From<DurationVector> for Value {
    fn from(durations: DurationVector) -> Self {
        Value::from(durations.0)
    }
}

impl Validator {
    /// Canonical duration vector for `phon`
    ///
    /// A list of the wrong length is a constraint violation whatever its
    /// elements hold.
    pub fn durations(&self, phon: &PhonemeSequence, durations: &Value) -> MbrolaResult<DurationVector> {
        if let Some(items) = durations.as_list() {
            check_arity("durations", phon.len(), items.len())?;
        }
        DurationSpec::try_from(durations)?.normalize(phon.len())
    }
}

/// Canonical duration vector under the default configuration
pub fn validate_durations(phon: &PhonemeSequence, durations: &Value) -> MbrolaResult<DurationVector> {
    Validator::default().durations(phon, durations)
}
