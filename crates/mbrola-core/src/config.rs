//! Validation limits

use serde::{Deserialize, Serialize};

/// Longest word accepted as a phoneme source, in characters
pub const MAX_WORD_LEN: usize = 255;

/// Points a flat pitch target expands to
pub const PLATEAU_POINTS: usize = 2;

/// Validation configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Maximum word length in characters
    pub max_word_len: usize,

    /// Characters a word may not contain (path separators)
    pub forbidden_word_chars: Vec<char>,

    /// Accept fixed-size tuples as pitch contours alongside lists
    pub accept_tuple_contours: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        ValidationConfig {
            max_word_len: MAX_WORD_LEN,
            forbidden_word_chars: vec!['/'],
            accept_tuple_contours: false,
        }
    }
}

impl ValidationConfig {
    /// Config that takes any ordered integer sequence as a contour
    pub fn lenient() -> Self {
        ValidationConfig {
            accept_tuple_contours: true,
            ..ValidationConfig::default()
        }
    }
}

/// Runs the field validators under one configuration
#[derive(Clone, Debug, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }
}
