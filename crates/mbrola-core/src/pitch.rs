//! Pitch contours
//!
//! Pitch is the most polymorphic field. A caller may give:
//! - one integer, a constant pitch for the whole utterance
//! - a list with one entry per phoneme, each entry either an integer
//!   (flat target) or a list of integers (contour control points)
//!
//! All of these normalize to one shape: a contour per phoneme, where a flat
//! target becomes a two-point plateau `[p, p]`.

use crate::phon::check_arity;
use crate::{
    MbrolaError, MbrolaResult, PhonemeSequence, ValidationConfig, Validator, Value, PLATEAU_POINTS,
};

/// Pitch for one phoneme
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PitchTarget {
    Flat(i64),
    Contour(Vec<i64>),
}

impl PitchTarget {
    fn discriminate(index: usize, value: &Value, config: &ValidationConfig) -> MbrolaResult<Self> {
        match value {
            Value::Int(p) => Ok(PitchTarget::Flat(*p)),
            Value::List(points) => contour_points(index, points).map(PitchTarget::Contour),
            Value::Tuple(points) if config.accept_tuple_contours => {
                contour_points(index, points).map(PitchTarget::Contour)
            }
            other => Err(MbrolaError::type_mismatch(
                format!("pitch[{}]", index),
                "an integer or a list of integers",
                other.kind(),
            )
            .logged()),
        }
    }

    /// Canonical contour: flat targets become a plateau
    pub fn into_contour(self) -> Vec<i64> {
        match self {
            PitchTarget::Flat(p) => vec![p; PLATEAU_POINTS],
            PitchTarget::Contour(points) => points,
        }
    }
}

fn contour_points(index: usize, points: &[Value]) -> MbrolaResult<Vec<i64>> {
    points
        .iter()
        .enumerate()
        .map(|(j, point)| {
            point.as_int().ok_or_else(|| {
                MbrolaError::type_mismatch(format!("pitch[{}][{}]", index, j), "an integer", point.kind())
                    .logged()
            })
        })
        .collect()
}

/// Pitch as the caller gave it, after type discrimination
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PitchSpec {
    /// One flat pitch for every phoneme
    Scalar(i64),
    /// One target per phoneme
    PerPhoneme(Vec<PitchTarget>),
}

impl PitchSpec {
    pub fn from_value(value: &Value, config: &ValidationConfig) -> MbrolaResult<Self> {
        match value {
            Value::Int(p) => Ok(PitchSpec::Scalar(*p)),
            Value::List(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| PitchTarget::discriminate(i, item, config))
                .collect::<MbrolaResult<Vec<_>>>()
                .map(PitchSpec::PerPhoneme),
            other => Err(MbrolaError::type_mismatch(
                "pitch",
                "an integer or a list with one entry per phoneme",
                other.kind(),
            )
            .logged()),
        }
    }

    /// Broadcast or arity-check against the phoneme count
    pub fn normalize(self, count: usize) -> MbrolaResult<PitchVector> {
        match self {
            PitchSpec::Scalar(p) => {
                tracing::trace!(pitch = p, count, "broadcasting flat pitch");
                Ok(PitchVector(vec![vec![p; PLATEAU_POINTS]; count]))
            }
            PitchSpec::PerPhoneme(targets) => {
                check_arity("pitch", count, targets.len())?;
                targets
                    .into_iter()
                    .enumerate()
                    .map(|(i, target)| match target.into_contour() {
                        points if points.is_empty() => Err(MbrolaError::constraint(
                            format!("pitch[{}]", i),
                            "contour must have at least one point",
                        )
                        .logged()),
                        points => Ok(points),
                    })
                    .collect::<MbrolaResult<Vec<_>>>()
                    .map(PitchVector)
            }
        }
    }
}

impl TryFrom<&Value> for PitchSpec {
    type Error = MbrolaError;

    fn try_from(value: &Value) -> MbrolaResult<Self> {
        PitchSpec::from_value(value, &ValidationConfig::default())
    }
}

/// One non-empty contour per phoneme
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PitchVector(Vec<Vec<i64>>);

impl PitchVector {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vec<i64>> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Vec<i64>] {
        &self.0
    }

    /// True when every phoneme holds one constant pitch
    pub fn is_flat(&self) -> bool {
        self.0
            .iter()
            .all(|contour| contour.windows(2).all(|w| w[0] == w[1]))
    }

    pub fn into_inner(self) -> Vec<Vec<i64>> {
        self.0
    }
}

impl PartialEq<Vec<Vec<i64>>> for PitchVector {
    fn eq(&self, other: &Vec<Vec<i64>>) -> bool {
        &self.0 == other
    }
}

impl From<PitchVector> for Value {
    fn from(pitch: PitchVector) -> Self {
        Value::from(pitch.0)
    }
}

impl Validator {
    /// Canonical pitch vector for `phon`
    ///
    /// A list of the wrong length is a constraint violation whatever its
    /// entries hold.
    pub fn pitch(&self, phon: &PhonemeSequence, pitch: &Value) -> MbrolaResult<PitchVector> {
        if let Some(targets) = pitch.as_list() {
            check_arity("pitch", phon.len(), targets.len())?;
        }
        PitchSpec::from_value(pitch, self.config())?.normalize(phon.len())
    }
}

/// Canonical pitch vector under the default configuration
pub fn validate_pitch(phon: &PhonemeSequence, pitch: &Value) -> MbrolaResult<PitchVector> {
    Validator::default().pitch(phon, pitch)
}
