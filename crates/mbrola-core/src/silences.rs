//! Outer silences
//!
//! The silences written before the first and after the last phoneme.

use crate::{MbrolaError, MbrolaResult, Validator, Value};

const FIELDS: [&str; 2] = ["onset_silence", "offset_silence"];

/// Onset and offset silence in ms, both strictly positive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OuterSilences {
    pub onset_ms: i64,
    pub offset_ms: i64,
}

impl OuterSilences {
    pub fn new(onset_ms: i64, offset_ms: i64) -> MbrolaResult<Self> {
        check_positive(FIELDS[0], onset_ms)?;
        check_positive(FIELDS[1], offset_ms)?;
        Ok(Self { onset_ms, offset_ms })
    }

    /// Onset plus offset, saturating at `i64::MAX`
    pub fn total_ms(&self) -> i64 {
        self.onset_ms.saturating_add(self.offset_ms)
    }
}

impl Default for OuterSilences {
    fn default() -> Self {
        Self {
            onset_ms: 1,
            offset_ms: 1,
        }
    }
}

impl From<OuterSilences> for (i64, i64) {
    fn from(s: OuterSilences) -> Self {
        (s.onset_ms, s.offset_ms)
    }
}

impl TryFrom<(i64, i64)> for OuterSilences {
    type Error = MbrolaError;

    fn try_from((onset_ms, offset_ms): (i64, i64)) -> MbrolaResult<Self> {
        OuterSilences::new(onset_ms, offset_ms)
    }
}

impl From<OuterSilences> for Value {
    fn from(s: OuterSilences) -> Self {
        Value::from((s.onset_ms, s.offset_ms))
    }
}

pub(crate) fn check_positive(field: &str, ms: i64) -> MbrolaResult<()> {
    if ms <= 0 {
        return Err(MbrolaError::constraint(field, "must be a positive integer").logged());
    }
    Ok(())
}

/// Integer payload of one silence, or a type error naming it
pub(crate) fn silence_ms(field: &str, value: &Value) -> MbrolaResult<i64> {
    value
        .as_int()
        .ok_or_else(|| MbrolaError::type_mismatch(field, "an integer", value.kind()).logged())
}

/// The two elements of an (onset, offset) pair
pub(crate) fn silence_pair(value: &Value) -> MbrolaResult<(&Value, &Value)> {
    match value.as_sequence() {
        Some([onset, offset]) => Ok((onset, offset)),
        Some(items) => Err(MbrolaError::constraint(
            "outer_silences",
            format!("must hold exactly two values, got {}", items.len()),
        )
        .logged()),
        None => Err(MbrolaError::type_mismatch(
            "outer_silences",
            "an (onset, offset) pair",
            value.kind(),
        )
        .logged()),
    }
}

impl Validator {
    /// Checked (onset, offset) pair, returned unchanged
    pub fn outer_silences(&self, outer_silences: &Value) -> MbrolaResult<OuterSilences> {
        let (onset, offset) = silence_pair(outer_silences)?;
        let onset_ms = silence_ms(FIELDS[0], onset)?;
        let offset_ms = silence_ms(FIELDS[1], offset)?;
        OuterSilences::new(onset_ms, offset_ms)
    }
}

/// Checked outer silences under the default configuration
pub fn validate_outer_silences(outer_silences: &Value) -> MbrolaResult<OuterSilences> {
    Validator::default().outer_silences(outer_silences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{list, tuple, ErrorKind};

    #[test]
    fn test_validate_outer_silences() {
        let out = validate_outer_silences(&(1, 1).into()).unwrap();
        assert_eq!(<(i64, i64)>::from(out), (1, 1));

        let err = validate_outer_silences(&"2".into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);

        let err = validate_outer_silences(&("a", 1).into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.field(), "onset_silence");
    }

    #[test]
    fn test_non_positive_silences() {
        let err = validate_outer_silences(&(0, 1).into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConstraintViolation);
        assert_eq!(err.field(), "onset_silence");

        let err = validate_outer_silences(&(5, -3).into()).unwrap_err();
        assert_eq!(err.field(), "offset_silence");
    }

    #[test]
    fn test_pair_arity() {
        let err = validate_outer_silences(&tuple!(1, 2, 3)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConstraintViolation);
        assert_eq!(err.field(), "outer_silences");
    }

    #[test]
    fn test_list_pair_accepted() {
        let out = validate_outer_silences(&list![100, 250]).unwrap();
        assert_eq!(out, OuterSilences::new(100, 250).unwrap());
        assert_eq!(out.total_ms(), 350);
    }

    #[test]
    fn test_total_ms_saturates() {
        let out = OuterSilences::new(i64::MAX, i64::MAX).unwrap();
        assert_eq!(out.total_ms(), i64::MAX);
    }

    #[test]
    fn test_idempotent() {
        let out = validate_outer_silences(&(20, 40).into()).unwrap();
        assert_eq!(validate_outer_silences(&Value::from(out)).unwrap(), out);
    }

    #[test]
    fn test_try_from_tuple() {
        assert!(OuterSilences::try_from((0, 0)).is_err());
        assert_eq!(OuterSilences::try_from((1, 1)).unwrap(), OuterSilences::default());
    }
}
