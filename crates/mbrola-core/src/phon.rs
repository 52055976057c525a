//! Phoneme sequences
//!
//! A phoneme source is either a word, split into one phoneme per character,
//! or an explicit list whose elements are taken by their string form. Any
//! string token is a valid phoneme; no phonetic alphabet is enforced.

use std::ops::Index;

use crate::{MbrolaError, MbrolaResult, ValidationConfig, Validator, Value};

/// Ordered phoneme tokens, in pronunciation order. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PhonemeSequence(Vec<String>);

impl PhonemeSequence {
    pub fn new(phonemes: Vec<String>) -> MbrolaResult<Self> {
        if phonemes.is_empty() {
            return Err(MbrolaError::constraint("phon", "must contain at least one phoneme").logged());
        }
        Ok(PhonemeSequence(phonemes))
    }

    /// Phoneme count, the length every per-phoneme field is checked against
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Index<usize> for PhonemeSequence {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a PhonemeSequence {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<S: AsRef<str>> PartialEq<Vec<S>> for PhonemeSequence {
    fn eq(&self, other: &Vec<S>) -> bool {
        self.0.len() == other.len() && self.0.iter().zip(other).all(|(a, b)| a == b.as_ref())
    }
}

impl From<PhonemeSequence> for Value {
    fn from(phon: PhonemeSequence) -> Self {
        Value::from(phon.0)
    }
}

impl Validator {
    /// Check a word used as a phoneme source; returns it unchanged
    pub fn word(&self, word: &Value) -> MbrolaResult<String> {
        let word = word
            .as_str()
            .ok_or_else(|| MbrolaError::type_mismatch("word", "a string", word.kind()).logged())?;
        check_word(self.config(), word)?;
        Ok(word.to_string())
    }

    /// Canonical phoneme sequence from a word or an explicit sequence
    pub fn phon(&self, phon: &Value) -> MbrolaResult<PhonemeSequence> {
        match phon {
            Value::Str(word) => {
                check_word(self.config(), word)?;
                PhonemeSequence::new(word.chars().map(String::from).collect())
            }
            Value::List(items) | Value::Tuple(items) => {
                PhonemeSequence::new(items.iter().map(ToString::to_string).collect())
            }
            other => Err(MbrolaError::type_mismatch(
                "phon",
                "a string or a list of phonemes",
                other.kind(),
            )
            .logged()),
        }
    }
}

/// Per-phoneme field arity: exactly one entry per phoneme
pub(crate) fn check_arity(field: &str, count: usize, len: usize) -> MbrolaResult<()> {
    if len != count {
        return Err(MbrolaError::constraint(
            field,
            format!("must have the same length as `phon` ({}), got {}", count, len),
        )
        .logged());
    }
    Ok(())
}

fn check_word(config: &ValidationConfig, word: &str) -> MbrolaResult<()> {
    let len = word.chars().count();
    if len > config.max_word_len {
        return Err(MbrolaError::constraint(
            "word",
            format!(
                "must be at most {} characters long, got {}",
                config.max_word_len, len
            ),
        )
        .logged());
    }
    if let Some(c) = word.chars().find(|c| config.forbidden_word_chars.contains(c)) {
        return Err(MbrolaError::constraint("word", format!("must not contain {:?}", c)).logged());
    }
    Ok(())
}

/// Validate a word under the default configuration
pub fn validate_word(word: &Value) -> MbrolaResult<String> {
    Validator::default().word(word)
}

/// Canonical phoneme sequence under the default configuration
pub fn validate_phon(phon: &Value) -> MbrolaResult<PhonemeSequence> {
    Validator::default().phon(phon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{list, ErrorKind};
    use proptest::prelude::*;

    const WORD: &str = "mbrola";

    fn phon_list() -> Vec<&'static str> {
        vec!["m", "b", "r", "o", "l", "a"]
    }

    #[test]
    fn test_validate_word() {
        assert_eq!(validate_word(&WORD.into()).unwrap(), WORD);

        let err = validate_word(&1.into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);

        let err = validate_word(&"a".repeat(256).into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConstraintViolation);

        let err = validate_word(&"a/".into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConstraintViolation);
    }

    #[test]
    fn test_word_length_counts_characters() {
        // 255 two-byte characters is still 255 characters
        let word = "é".repeat(255);
        assert_eq!(validate_word(&word.clone().into()).unwrap(), word);
    }

    #[test]
    fn test_validate_phon() {
        assert_eq!(validate_phon(&Value::from(phon_list())).unwrap(), phon_list());
        assert_eq!(validate_phon(&WORD.into()).unwrap(), phon_list());
        assert_eq!(
            validate_phon(&list![1, 2, 3]).unwrap(),
            vec!["1", "2", "3"]
        );

        let err = validate_phon(&1.into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_phon_stringifies_scalars() {
        let phon = validate_phon(&list![1.0, true, Value::None, list!["a"]]).unwrap();
        assert_eq!(phon, vec!["1.0", "True", "None", "['a']"]);
    }

    #[test]
    fn test_phon_word_rules_apply() {
        let err = validate_phon(&"m/b".into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConstraintViolation);
        assert_eq!(err.field(), "word");
    }

    #[test]
    fn test_phon_empty_rejected() {
        assert!(validate_phon(&"".into()).unwrap_err().is_constraint_violation());
        assert!(validate_phon(&list![]).unwrap_err().is_constraint_violation());
    }

    #[test]
    fn test_phon_is_idempotent() {
        let phon = validate_phon(&WORD.into()).unwrap();
        let again = validate_phon(&Value::from(phon.clone())).unwrap();
        assert_eq!(phon, again);
    }

    #[test]
    fn test_custom_forbidden_chars() {
        let validator = Validator::new(ValidationConfig {
            forbidden_word_chars: vec!['/', '\\'],
            ..ValidationConfig::default()
        });
        assert!(validator.word(&"a\\b".into()).is_err());
        assert!(validate_word(&"a\\b".into()).is_ok());
    }

    proptest! {
        #[test]
        fn prop_valid_word_is_identity(word in "[a-zA-Z@:]{1,255}") {
            prop_assert_eq!(validate_word(&word.clone().into()).unwrap(), word);
        }

        #[test]
        fn prop_long_word_rejected(word in "[a-z]{256,400}") {
            prop_assert!(validate_word(&word.into()).unwrap_err().is_constraint_violation());
        }

        #[test]
        fn prop_word_splits_per_character(word in "[a-z]{1,64}") {
            let phon = validate_phon(&word.clone().into()).unwrap();
            prop_assert_eq!(phon.len(), word.chars().count());
        }
    }
}
